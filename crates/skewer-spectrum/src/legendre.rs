//! Legendre polynomials.

/// Legendre polynomial of the given degree at `x`, by Bonnet's recurrence
/// `(n + 1) P_{n+1} = (2n + 1) x P_n - n P_{n-1}`.
///
/// ```
/// use skewer_spectrum::legendre;
///
/// assert_eq!(legendre(0, 0.3), 1.0);
/// assert_eq!(legendre(1, 0.3), 0.3);
/// assert!((legendre(2, 0.5) - (-0.125)).abs() < 1e-15);
/// ```
pub fn legendre(degree: usize, x: f64) -> f64 {
    match degree {
        0 => 1.0,
        1 => x,
        _ => {
            let mut prev = 1.0;
            let mut curr = x;
            for n in 1..degree {
                let n = n as f64;
                let next = ((2.0 * n + 1.0) * x * curr - n * prev) / (n + 1.0);
                prev = curr;
                curr = next;
            }
            curr
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn closed_forms() {
        for &x in &[-1.0_f64, -0.4, 0.0, 0.25, 0.9, 1.0] {
            let p2 = 0.5 * (3.0 * x * x - 1.0);
            let p3 = 0.5 * (5.0 * x * x * x - 3.0 * x);
            let p4 = (35.0 * x.powi(4) - 30.0 * x * x + 3.0) / 8.0;
            assert!((legendre(2, x) - p2).abs() < 1e-14);
            assert!((legendre(3, x) - p3).abs() < 1e-14);
            assert!((legendre(4, x) - p4).abs() < 1e-14);
        }
    }

    proptest! {
        #[test]
        fn unit_at_one_and_parity_at_minus_one(degree in 0usize..20) {
            prop_assert!((legendre(degree, 1.0) - 1.0).abs() < 1e-12);
            let sign = if degree % 2 == 0 { 1.0 } else { -1.0 };
            prop_assert!((legendre(degree, -1.0) - sign).abs() < 1e-12);
        }

        #[test]
        fn bounded_on_unit_interval(degree in 0usize..20, x in -1.0f64..=1.0) {
            prop_assert!(legendre(degree, x).abs() <= 1.0 + 1e-12);
        }
    }
}
