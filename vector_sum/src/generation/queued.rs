use std::collections::VecDeque;

use super::VecGen;

/// A vector generator that hands out already built vectors in order, one per `fill`.
#[derive(Debug, Default)]
pub struct QueuedVecGen {
    queue: VecDeque<Vec<f64>>,
}

impl QueuedVecGen {
    /// Creates a new `QueuedVecGen` vector generator.
    ///
    /// # Arguments
    /// * `vectors` - The vectors to hand out, in order.
    ///
    /// # Returns
    /// A new `QueuedVecGen` instance.
    pub fn new<I>(vectors: I) -> Self
    where
        I: IntoIterator<Item = Vec<f64>>,
    {
        Self {
            queue: vectors.into_iter().collect(),
        }
    }
}

impl VecGen for QueuedVecGen {
    fn fill(&mut self, out: &mut [f64]) -> bool {
        match self.queue.pop_front() {
            Some(next) if next.len() == out.len() => {
                out.copy_from_slice(&next);
                true
            }
            _ => false,
        }
    }
}
