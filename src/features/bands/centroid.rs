//! Spectral centroid over band magnitudes

/// Magnitude-weighted mean of the band centers in Hz
///
/// `Σ center[i] * magnitude[i] / Σ magnitude[i]` over the bands present in
/// `magnitudes`. Returns 0.0 when the total magnitude is not positive (silence)
/// or the quotient is not finite, so no NaN ever reaches the output.
pub fn spectral_centroid(magnitudes: &[f32], centers: &[f32]) -> f32 {
    debug_assert!(centers.len() >= magnitudes.len());

    let mut weighted_sum = 0.0f64;
    let mut magnitude_sum = 0.0f64;
    for (&magnitude, &center) in magnitudes.iter().zip(centers) {
        weighted_sum += center as f64 * magnitude as f64;
        magnitude_sum += magnitude as f64;
    }

    if magnitude_sum <= 0.0 {
        return 0.0;
    }

    let centroid = (weighted_sum / magnitude_sum) as f32;
    if centroid.is_finite() {
        centroid
    } else {
        0.0
    }
}
