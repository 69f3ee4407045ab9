use std::io::{self, Write};

/// How many leading elements `write_part` prints.
pub const PART_LEN: usize = 10;

/// Writes `title` and then the first `PART_LEN` elements of `v` with two decimals.
///
/// # Arguments
/// * `out` - The writer.
/// * `title` - The line printed before the values.
/// * `v` - The vector.
pub fn write_part<W: Write>(out: &mut W, title: &str, v: &[f64]) -> io::Result<()> {
    writeln!(out, "{title}")?;
    for x in v.iter().take(PART_LEN) {
        write!(out, "{x:.2} ")?;
    }
    writeln!(out)
}

/// Writes `title` and then every element of `v` with six decimals.
///
/// # Arguments
/// * `out` - The writer.
/// * `title` - The line printed before the values.
/// * `v` - The vector.
pub fn write_vector<W: Write>(out: &mut W, title: &str, v: &[f64]) -> io::Result<()> {
    writeln!(out, "{title}")?;
    for x in v {
        write!(out, "{x:.6} ")?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part() {
        let v: Vec<f64> = (0..20).map(|i| i as f64 / 4.).collect();
        let mut out = Vec::new();

        write_part(&mut out, "A part of the sum is", &v).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "A part of the sum is\n0.00 0.25 0.50 0.75 1.00 1.25 1.50 1.75 2.00 2.25 \n"
        );
    }

    #[test]
    fn short_part() {
        let mut out = Vec::new();
        write_part(&mut out, "t", &[1.]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "t\n1.00 \n");
    }

    #[test]
    fn full_vector() {
        let mut out = Vec::new();
        write_vector(&mut out, "The sum is", &[9., 0.5]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "The sum is\n9.000000 0.500000 \n"
        );
    }
}
