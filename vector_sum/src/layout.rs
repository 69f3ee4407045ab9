use std::{num::NonZeroUsize, ops::Range};

/// Partition of a vector of `order` elements in one contiguous, equal-sized block per worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    order: usize,
    workers: NonZeroUsize,
    block_len: usize,
}

impl BlockLayout {
    /// Creates a new `BlockLayout`.
    ///
    /// # Arguments
    /// * `order` - The length of the full vector.
    /// * `workers` - The amount of workers sharing it.
    ///
    /// # Returns
    /// The layout, or the reason why `order` can't be split evenly.
    pub fn new(order: usize, workers: NonZeroUsize) -> Result<Self, String> {
        if order == 0 {
            return Err("vector order must be positive".to_string());
        }

        if order % workers != 0 {
            return Err(format!(
                "vector order {order} is not evenly divisible by {workers} workers"
            ));
        }

        Ok(Self {
            order,
            workers,
            block_len: order / workers,
        })
    }

    /// The length of the full vector.
    pub fn order(&self) -> usize {
        self.order
    }

    /// The amount of blocks.
    pub fn workers(&self) -> usize {
        self.workers.get()
    }

    /// The length of every block.
    pub fn block_len(&self) -> usize {
        self.block_len
    }

    /// Returns the positions of the full vector owned by `rank`.
    ///
    /// # Arguments
    /// * `rank` - A rank in `[0, workers)`.
    pub fn block_range(&self, rank: usize) -> Range<usize> {
        rank * self.block_len..(rank + 1) * self.block_len
    }

    /// Returns every block's range, ordered by rank.
    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.workers()).map(|rank| self.block_range(rank))
    }
}
