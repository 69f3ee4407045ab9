use std::{
    io::{self, Write},
    num::NonZeroUsize,
    sync::{Arc, Mutex},
};

use collective::WorkerSet;
use log::{debug, info};

use crate::{
    Result, SumErr,
    alloc::BufferAlloc,
    generation::VecGen,
    layout::BlockLayout,
    sum::vector_sum_into,
};

/// The rank that holds the full-length vectors.
pub const ORIGIN: usize = 0;

/// Where the origin writes the one line describing a collective failure.
pub type DiagSink = Arc<Mutex<dyn Write + Send>>;

const CONFIGURE: &str = "configure";
const ALLOCATE_VECTORS: &str = "allocate_vectors";
const READ_VECTOR: &str = "read_vector";
const COLLECT_VECTOR: &str = "collect_vector";

const LOCAL_ARRAYS: &str = "can't allocate local arrays";
const TEMPORARY_VECTOR: &str = "can't allocate temporary vector";

/// Runs one block-distributed vector sum on a single worker.
///
/// Every worker of the set runs its own `Coordinator` and they all go through the same
/// collective steps: configure, allocate, distribute, compute and collect. Any failure
/// before a scatter or gather is agreed upon by the whole set, so either every worker
/// proceeds or every worker returns the same `SumErr::Aborted`.
pub struct Coordinator<W, A> {
    ws: W,
    alloc: A,
    order: usize,
    diag: DiagSink,
}

impl<W: WorkerSet<f64>, A: BufferAlloc> Coordinator<W, A> {
    /// Creates a new `Coordinator`.
    ///
    /// # Arguments
    /// * `ws` - This worker's handle to the worker set.
    /// * `alloc` - Where this worker's buffers come from.
    /// * `order` - The length of the full vectors.
    ///
    /// # Returns
    /// A new `Coordinator` reporting failures to standard error.
    pub fn new(ws: W, alloc: A, order: usize) -> Self {
        let diag: DiagSink = Arc::new(Mutex::new(io::stderr()));

        Self {
            ws,
            alloc,
            order,
            diag,
        }
    }

    /// Replaces the sink the origin writes its diagnostic line to.
    pub fn with_diagnostics(mut self, diag: DiagSink) -> Self {
        self.diag = diag;
        self
    }

    fn is_origin(&self) -> bool {
        self.ws.rank() == ORIGIN
    }

    /// Computes `z = x + y`, with `x` and `y` drawn from `vec_gen` on the origin.
    ///
    /// # Arguments
    /// * `vec_gen` - The input source, only the origin's is used.
    ///
    /// # Returns
    /// The full sum on the origin, `None` on every other worker, or the error the
    /// whole worker set agreed on.
    pub async fn run<G>(&mut self, vec_gen: Option<&mut G>) -> Result<Option<Vec<f64>>>
    where
        G: VecGen + Send,
    {
        let rank = self.ws.rank();

        let layout = self.configure();
        let layout = self
            .agree_on(layout, CONFIGURE, "worker set disagrees on the vector layout")
            .await?;
        let block_len = layout.block_len();
        debug!("rank {rank} owns {:?}", layout.block_range(rank));

        let local = self.allocate_local(block_len);
        let (mut local_x, mut local_y, mut local_z) =
            self.agree_on(local, ALLOCATE_VECTORS, LOCAL_ARRAYS).await?;

        let inputs = self.read_inputs(vec_gen, layout.order());
        let inputs = self
            .agree_on(inputs, READ_VECTOR, "origin couldn't produce the input vectors")
            .await?;

        let full_x = inputs.as_ref().map(|(x, _)| x.as_slice());
        self.ws.scatter(full_x, &mut local_x, ORIGIN).await?;
        let full_y = inputs.as_ref().map(|(_, y)| y.as_slice());
        self.ws.scatter(full_y, &mut local_y, ORIGIN).await?;
        drop(inputs);

        vector_sum_into(&local_x, &local_y, &mut local_z);
        debug!("rank {rank} summed its block");

        // Only the origin needs room for the whole output.
        let out = if self.is_origin() {
            self.alloc
                .alloc(layout.order())
                .map(Some)
                .ok_or_else(|| TEMPORARY_VECTOR.to_string())
        } else {
            Ok(None)
        };
        let mut out = self.agree_on(out, COLLECT_VECTOR, TEMPORARY_VECTOR).await?;

        self.ws.gather(&local_z, out.as_deref_mut(), ORIGIN).await?;

        if self.is_origin() {
            info!("collected {} elements from {} workers", layout.order(), layout.workers());
        }

        Ok(out)
    }

    fn configure(&self) -> std::result::Result<BlockLayout, String> {
        let workers = NonZeroUsize::new(self.ws.size()).ok_or("empty worker set")?;
        BlockLayout::new(self.order, workers)
    }

    fn allocate_local(
        &self,
        block_len: usize,
    ) -> std::result::Result<(Vec<f64>, Vec<f64>, Vec<f64>), String> {
        let x = self.alloc.alloc(block_len);
        let y = self.alloc.alloc(block_len);
        let z = self.alloc.alloc(block_len);

        match (x, y, z) {
            (Some(x), Some(y), Some(z)) => Ok((x, y, z)),
            _ => Err(LOCAL_ARRAYS.to_string()),
        }
    }

    /// Only the origin materializes the full-length inputs.
    fn read_inputs<G: VecGen>(
        &self,
        vec_gen: Option<&mut G>,
        order: usize,
    ) -> std::result::Result<Option<(Vec<f64>, Vec<f64>)>, String> {
        if !self.is_origin() {
            return Ok(None);
        }

        let vec_gen = vec_gen.ok_or("missing input generator")?;

        let (Some(mut x), Some(mut y)) = (self.alloc.alloc(order), self.alloc.alloc(order)) else {
            return Err(TEMPORARY_VECTOR.to_string());
        };

        if !vec_gen.fill(&mut x) || !vec_gen.fill(&mut y) {
            return Err("can't generate input vector".to_string());
        }

        Ok(Some((x, y)))
    }

    /// Combines this worker's outcome of a step with everyone else's.
    ///
    /// # Arguments
    /// * `local` - This worker's outcome, the error being the reason it can't go on.
    /// * `step` - The name of the step.
    /// * `fallback` - The reason to report when this worker succeeded but another one didn't.
    ///
    /// # Returns
    /// The local value if every worker succeeded, `SumErr::Aborted` otherwise.
    async fn agree_on<T: Send>(
        &mut self,
        local: std::result::Result<T, String>,
        step: &'static str,
        fallback: &str,
    ) -> Result<T> {
        let ok = self.ws.agree(local.is_ok()).await?;

        match local {
            Ok(value) if ok => Ok(value),
            Ok(_) => Err(self.abort(step, fallback.to_string())),
            Err(message) => Err(self.abort(step, message)),
        }
    }

    fn abort(&self, step: &'static str, message: String) -> SumErr {
        let rank = self.ws.rank();

        if self.is_origin() {
            // The sink line is the only report a failed collective gets by default.
            debug!("aborting the worker set in {step}: {message}");

            if let Ok(mut sink) = self.diag.lock() {
                let _ = writeln!(sink, "Proc {rank} > In {step}, {message}");
                let _ = sink.flush();
            }
        }

        SumErr::Aborted { step, message }
    }
}
