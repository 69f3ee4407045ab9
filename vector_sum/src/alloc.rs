use log::warn;

/// Hands out zero-filled `f64` buffers, reporting failure instead of aborting the process.
pub trait BufferAlloc {
    /// Should allocate a zero-filled buffer of `len` elements.
    ///
    /// # Arguments
    /// * `len` - The amount of elements.
    ///
    /// # Returns
    /// The buffer, or `None` if it couldn't be allocated.
    fn alloc(&self, len: usize) -> Option<Vec<f64>>;
}

/// Allocates from the global heap.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapAlloc;

impl BufferAlloc for HeapAlloc {
    fn alloc(&self, len: usize) -> Option<Vec<f64>> {
        let mut buf = Vec::new();

        if let Err(e) = buf.try_reserve_exact(len) {
            warn!("failed to allocate {len} elements: {e}");
            return None;
        }

        buf.resize(len, 0.);
        Some(buf)
    }
}

/// Allocates from the global heap but refuses any buffer above a fixed amount of elements.
#[derive(Debug, Clone, Copy)]
pub struct CappedAlloc {
    cap: usize,
}

impl CappedAlloc {
    /// Creates a new `CappedAlloc`.
    ///
    /// # Arguments
    /// * `cap` - The maximum amount of elements of a single buffer.
    ///
    /// # Returns
    /// A new `CappedAlloc` instance.
    pub fn new(cap: usize) -> Self {
        Self { cap }
    }

    /// Creates a `CappedAlloc` that never refuses a buffer on its own.
    pub fn unlimited() -> Self {
        Self::new(usize::MAX)
    }
}

impl BufferAlloc for CappedAlloc {
    fn alloc(&self, len: usize) -> Option<Vec<f64>> {
        if len > self.cap {
            warn!("refusing to allocate {len} elements, cap is {}", self.cap);
            return None;
        }

        HeapAlloc.alloc(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap() {
        let buf = HeapAlloc.alloc(16).unwrap();
        assert_eq!(buf, vec![0.; 16]);
    }

    #[test]
    fn heap_capacity_overflow() {
        assert!(HeapAlloc.alloc(usize::MAX).is_none());
    }

    #[test]
    fn capped() {
        let alloc = CappedAlloc::new(4);

        assert_eq!(alloc.alloc(4).map(|b| b.len()), Some(4));
        assert!(alloc.alloc(5).is_none());
        assert!(CappedAlloc::unlimited().alloc(5).is_some());
    }
}
