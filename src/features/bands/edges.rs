//! Band edge calculation
//!
//! Maps the fixed perceptual edge list onto transform bins for a given sample
//! rate. Runs once per sample-rate change, off the real-time path.
//!
//! Algorithm:
//! 1. Candidate bin per edge: `ceil(f * N / sample_rate)`, keeping a candidate
//!    only if it differs from the previously kept one
//! 2. Drop candidates at or beyond `N / 2`
//! 3. Force one band per bin below `ones_until`, then append every candidate
//!    from `ones_until` upwards
//! 4. Band centers: 0 Hz for the DC band, midpoint of the two edge frequencies
//!    for the inner bands, midpoint of last edge and Nyquist for the trailing band

use super::{BandTable, BARK_EDGE_FREQUENCIES};
use crate::error::AnalysisError;

/// Compute the band table for a sample rate and transform length
///
/// # Arguments
///
/// * `sample_rate` - Sample rate in Hz
/// * `fft_length` - Transform length (power of two)
/// * `ones_until` - Bins below this index each get their own band
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if the sample rate is not a positive
/// finite number, and `AnalysisError::InvalidConfig` if no band boundary falls
/// below Nyquist.
///
/// # Example
///
/// ```
/// use stratum_trig::features::bands::edges::compute_band_table;
///
/// let table = compute_band_table(44100.0, 512, 5)?;
/// assert_eq!(&table.band_bins()[..6], &[1, 2, 3, 4, 5, 6]);
/// # Ok::<(), stratum_trig::AnalysisError>(())
/// ```
pub fn compute_band_table(
    sample_rate: f32,
    fft_length: usize,
    ones_until: usize,
) -> Result<BandTable, AnalysisError> {
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(AnalysisError::InvalidInput(format!(
            "Sample rate must be a positive number, got {}",
            sample_rate
        )));
    }

    let half = fft_length / 2;
    let candidates = candidate_bins(sample_rate, fft_length);

    let forced = 1..ones_until.min(half);
    let band_bins: Vec<usize> = forced
        .chain(candidates.into_iter().skip_while(|&bin| bin < ones_until))
        .collect();

    if band_bins.is_empty() {
        return Err(AnalysisError::InvalidConfig(format!(
            "No band boundary below Nyquist for fft_length {} at {} Hz",
            fft_length, sample_rate
        )));
    }

    let bin_hz = sample_rate as f64 / fft_length as f64;
    let nyquist = sample_rate as f64 / 2.0;

    let mut band_centers = Vec::with_capacity(band_bins.len() + 1);
    band_centers.push(0.0f32);
    for pair in band_bins.windows(2) {
        let lower = pair[0] as f64 * bin_hz;
        let upper = pair[1] as f64 * bin_hz;
        band_centers.push(((lower + upper) / 2.0) as f32);
    }
    let last_edge = band_bins[band_bins.len() - 1] as f64 * bin_hz;
    band_centers.push(((last_edge + nyquist) / 2.0) as f32);

    log::debug!(
        "Band table at {} Hz, N={}: {} boundaries {:?}",
        sample_rate,
        fft_length,
        band_bins.len(),
        band_bins
    );

    Ok(BandTable {
        band_bins,
        band_centers,
        sample_rate,
        fft_length,
    })
}

/// Deduplicated candidate bins below `fft_length / 2`
///
/// Consecutive equal candidates collapse; the comparison starts from bin 0 so
/// the DC bin never becomes a boundary.
fn candidate_bins(sample_rate: f32, fft_length: usize) -> Vec<usize> {
    let half = fft_length / 2;
    let mut bins = Vec::with_capacity(BARK_EDGE_FREQUENCIES.len());
    let mut last = 0usize;

    for &freq in BARK_EDGE_FREQUENCIES.iter() {
        let exact = (freq as f64 * fft_length as f64 / sample_rate as f64).ceil();
        // Edges are ascending, so nothing after this can land below Nyquist either
        if exact >= half as f64 {
            break;
        }
        let bin = exact as usize;
        if bin != last {
            bins.push(bin);
            last = bin;
        }
    }

    bins
}
