use std::{num::NonZeroUsize, sync::Arc};

use collective::WorkerSet;
use log::{error, info, warn};

use crate::{
    Result, SumErr,
    alloc::BufferAlloc,
    coordinator::{Coordinator, DiagSink, ORIGIN},
    generation::VecGen,
};

/// Runs a block-distributed vector sum over an in-process worker set, one task per worker.
///
/// # Arguments
/// * `order` - The length of the vectors.
/// * `workers` - The size of the worker set.
/// * `vec_gen` - The origin's input source, `x` is drawn first and `y` second.
/// * `alloc_for` - Builds each rank's buffer allocator.
/// * `diag` - Where the origin reports a collective failure.
///
/// # Returns
/// The full sum vector, or the origin's error if the worker set aborted.
pub async fn distributed_sum<G, A, F>(
    order: usize,
    workers: NonZeroUsize,
    vec_gen: G,
    alloc_for: F,
    diag: DiagSink,
) -> Result<Vec<f64>>
where
    G: VecGen + Send + 'static,
    A: BufferAlloc + Send + 'static,
    F: Fn(usize) -> A,
{
    info!("summing vectors of order {order} over {workers} workers");

    let mut vec_gen = Some(vec_gen);

    let handles: Vec<_> = collective::world::<f64>(workers)
        .into_iter()
        .map(|comm| {
            let rank = comm.rank();
            let mut vec_gen = if rank == ORIGIN { vec_gen.take() } else { None };
            let mut coordinator =
                Coordinator::new(comm, alloc_for(rank), order).with_diagnostics(Arc::clone(&diag));

            tokio::spawn(async move { coordinator.run(vec_gen.as_mut()).await })
        })
        .collect();

    let mut sum = None;
    let mut failure = None;

    for (rank, joined) in futures::future::join_all(handles).await.into_iter().enumerate() {
        match joined {
            Ok(Ok(out)) => sum = sum.or(out),
            Ok(Err(e)) => {
                warn!("worker {rank} stopped: {e}");
                failure.get_or_insert(e);
            }
            Err(e) => {
                error!("worker {rank} panicked: {e}");
                failure.get_or_insert(SumErr::WorkerPanicked { rank });
            }
        }
    }

    if let Some(e) = failure {
        return Err(e);
    }

    sum.ok_or_else(|| SumErr::Aborted {
        step: "collect_vector",
        message: "origin returned no output".to_string(),
    })
}
