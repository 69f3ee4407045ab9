use crate::Result;

/// A fixed set of workers that run the same program in lockstep at the granularity of
/// collective operations.
///
/// Every rank must call the same collectives in the same order, otherwise the set deadlocks
/// or reports an `UnexpectedMessage`.
#[allow(unused)]
#[trait_variant::make(WorkerSet: Send)]
pub trait LocalWorkerSet<T> {
    /// The rank of this worker, in `[0, size)`.
    fn rank(&self) -> usize;

    /// The amount of workers in the set.
    fn size(&self) -> usize;

    /// Distributes `full` from `origin` in contiguous blocks of `block.len()` elements,
    /// rank `k` receives the `k`-th block.
    ///
    /// # Arguments
    /// * `full` - The full-length buffer, must be `Some` on the origin and is ignored elsewhere.
    /// * `block` - Where to write this rank's block.
    /// * `origin` - The rank holding the full-length buffer.
    ///
    /// # Returns
    /// An error if the layout doesn't match or a peer goes away.
    async fn scatter(&mut self, full: Option<&[T]>, block: &mut [T], origin: usize) -> Result<()>;

    /// Collects every rank's block into `full` at `origin`, block `k` lands at
    /// `[k * block.len(), (k + 1) * block.len())`.
    ///
    /// # Arguments
    /// * `block` - This rank's block.
    /// * `full` - The output buffer, must be `Some` on the origin and is ignored elsewhere.
    /// * `origin` - The rank that collects.
    ///
    /// # Returns
    /// An error if the layout doesn't match or a peer goes away.
    async fn gather(&mut self, block: &[T], full: Option<&mut [T]>, origin: usize) -> Result<()>;

    /// Combines every rank's `local_ok` flag with a logical AND and delivers the result to all of them.
    ///
    /// # Arguments
    /// * `local_ok` - Whether this rank can proceed.
    ///
    /// # Returns
    /// `true` only if every rank reported `true`.
    async fn agree(&mut self, local_ok: bool) -> Result<bool>;
}
