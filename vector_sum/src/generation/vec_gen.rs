/// A `VecGen` produces the values of an input vector.
pub trait VecGen {
    /// Should fill the whole of `out` with freshly generated values.
    ///
    /// # Arguments
    /// * `out` - The buffer to fill.
    ///
    /// # Returns
    /// Whether the generator could produce `out.len()` values.
    fn fill(&mut self, out: &mut [f64]) -> bool;
}
