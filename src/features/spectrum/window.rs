//! Analysis window taper

use crate::config::TaperShape;

/// Taper coefficients for a window of `length` samples
///
/// `LinearRamp` fades in as `j / ramp` over the first `ramp` samples and out as
/// `(length - j) / ramp` once `j > length - ramp`; everything in between is 1.0.
/// The first coefficient is therefore 0.0 and the last `1 / ramp`.
///
/// # Example
///
/// ```
/// use stratum_trig::config::TaperShape;
/// use stratum_trig::features::spectrum::window::taper_coefficients;
///
/// let taper = taper_coefficients(TaperShape::LinearRamp, 32, 4);
/// assert_eq!(&taper[..5], &[0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(&taper[28..], &[1.0, 0.75, 0.5, 0.25]);
/// ```
pub fn taper_coefficients(shape: TaperShape, length: usize, ramp: usize) -> Vec<f32> {
    match shape {
        TaperShape::Rectangular => vec![1.0; length],
        TaperShape::LinearRamp => (0..length)
            .map(|j| {
                if ramp == 0 {
                    1.0
                } else if j < ramp {
                    j as f32 / ramp as f32
                } else if j + ramp > length {
                    (length - j) as f32 / ramp as f32
                } else {
                    1.0
                }
            })
            .collect(),
    }
}

/// Multiply `taper` into `samples` in place
#[inline]
pub fn apply_taper(samples: &mut [f32], taper: &[f32]) {
    debug_assert_eq!(samples.len(), taper.len());
    for (x, &w) in samples.iter_mut().zip(taper) {
        *x *= w;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_ramp_512() {
        let taper = taper_coefficients(TaperShape::LinearRamp, 512, 10);
        assert_eq!(taper.len(), 512);
        assert_eq!(taper[0], 0.0);
        assert!((taper[5] - 0.5).abs() < 1e-6);
        assert_eq!(taper[10], 1.0);
        assert_eq!(taper[502], 1.0);
        assert!((taper[503] - 0.9).abs() < 1e-6);
        assert!((taper[511] - 0.1).abs() < 1e-6);
        assert!(taper[10..=502].iter().all(|&w| w == 1.0));
    }

    #[test]
    fn test_rectangular() {
        let taper = taper_coefficients(TaperShape::Rectangular, 64, 10);
        assert!(taper.iter().all(|&w| w == 1.0));
    }

    #[test]
    fn test_zero_ramp_is_rectangular() {
        let taper = taper_coefficients(TaperShape::LinearRamp, 16, 0);
        assert!(taper.iter().all(|&w| w == 1.0));
    }

    #[test]
    fn test_apply_taper() {
        let mut samples = vec![2.0f32; 8];
        let taper = taper_coefficients(TaperShape::LinearRamp, 8, 2);
        apply_taper(&mut samples, &taper);
        assert_eq!(samples, vec![0.0, 1.0, 2.0, 2.0, 2.0, 2.0, 2.0, 1.0]);
    }
}
