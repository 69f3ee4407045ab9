use super::VecGen;

/// A vector generator that always generates the same value.
pub struct ConstVecGen {
    value: f64,
}

impl ConstVecGen {
    /// Creates a new `ConstVecGen` vector generator.
    ///
    /// # Arguments
    /// * `value` - The value to always generate.
    ///
    /// # Returns
    /// A new `ConstVecGen` instance.
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl VecGen for ConstVecGen {
    fn fill(&mut self, out: &mut [f64]) -> bool {
        out.fill(self.value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        let mut vec_gen = ConstVecGen::new(1.);
        assert!(vec_gen.fill(&mut []));
    }

    #[test]
    fn exact() {
        let mut vec_gen = ConstVecGen::new(2.5);
        let mut out = [0.; 10];

        assert!(vec_gen.fill(&mut out));
        assert_eq!(out, [2.5; 10]);
    }
}
