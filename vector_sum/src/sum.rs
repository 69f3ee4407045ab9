/// Computes the element-wise sum of `x` and `y`.
///
/// # Arguments
/// * `x` - The first addend.
/// * `y` - The second addend, same length as `x`.
///
/// # Returns
/// A new vector `z` with `z[i] = x[i] + y[i]`.
///
/// # Panics
/// If `x` and `y` have different lengths.
pub fn vector_sum(x: &[f64], y: &[f64]) -> Vec<f64> {
    let mut z = vec![0.; x.len()];
    vector_sum_into(x, y, &mut z);
    z
}

/// Computes the element-wise sum of `x` and `y` into `z`.
///
/// # Arguments
/// * `x` - The first addend.
/// * `y` - The second addend.
/// * `z` - Where to write the sum.
///
/// # Panics
/// If the three slices don't have the same length.
pub fn vector_sum_into(x: &[f64], y: &[f64], z: &mut [f64]) {
    assert_eq!(x.len(), y.len(), "addends must have the same length");
    assert_eq!(x.len(), z.len(), "output must match the addends' length");

    for ((zi, xi), yi) in z.iter_mut().zip(x).zip(y) {
        *zi = xi + yi;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        assert!(vector_sum(&[], &[]).is_empty());
    }

    #[test]
    fn elementwise() {
        let x = [1.5, -2., 0.1, 1e300];
        let y = [0.5, 2., 0.2, 1e300];
        let z = vector_sum(&x, &y);

        for i in 0..x.len() {
            assert_eq!(z[i], x[i] + y[i]);
        }
    }

    #[test]
    fn commutative() {
        let x = [0.1, 7.25, -3.5, 99.9];
        let y = [0.7, -1.25, 3.5, 0.1];

        assert_eq!(vector_sum(&x, &y), vector_sum(&y, &x));
    }

    #[test]
    fn zeros_are_identity() {
        let x = [3.25, -0.5, 12., 0.];
        assert_eq!(vector_sum(&x, &[0.; 4]), x);
    }

    #[test]
    fn into_buffer() {
        let mut z = [0.; 3];
        vector_sum_into(&[1., 2., 3.], &[3., 2., 1.], &mut z);
        assert_eq!(z, [4.; 3]);
    }

    #[test]
    #[should_panic]
    fn length_mismatch() {
        vector_sum(&[1., 2.], &[1.]);
    }
}
