//! Power sums feeding the normal equations.

/// `sum x^k` for `k = 0..=4` and `sum x^k y` for `k = 0..=2`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct PowerSums {
    /// `x_pow[k] = sum x^k`; `x_pow[0]` is the sample count
    pub x_pow: [f64; 5],
    /// `xy_pow[k] = sum x^k * y`
    pub xy_pow: [f64; 3],
}

impl PowerSums {
    /// Accumulate the sums over paired samples.
    pub fn new(x: &[f64], y: &[f64]) -> Self {
        let mut sums = Self::default();
        for (&xi, &yi) in x.iter().zip(y) {
            let mut p = 1.0;
            for k in 0..5 {
                sums.x_pow[k] += p;
                if k < 3 {
                    sums.xy_pow[k] += p * yi;
                }
                p *= xi;
            }
        }
        sums
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_sums() {
        let sums = PowerSums::new(&[1.0, 2.0], &[3.0, 5.0]);
        assert_eq!(sums.x_pow, [2.0, 3.0, 5.0, 9.0, 17.0]);
        assert_eq!(sums.xy_pow, [8.0, 13.0, 23.0]);
    }
}
