//! Band aggregation
//!
//! Folds the magnitude of the first half of the spectrum into the bands of a
//! [`BandTable`], recording the average magnitude per band.

use super::BandTable;

/// Average magnitude per band
///
/// Scans bins `0..real.len() / 2` in order. Whenever the bin index reaches the
/// next boundary the running band is closed with `sum / count` and the
/// accumulator restarts; the trailing band up to Nyquist is closed after the
/// scan. A band that received no bins is recorded as 0.0.
///
/// # Arguments
///
/// * `real` - Real part of the spectrum (transform length)
/// * `imag` - Imaginary part of the spectrum (transform length)
/// * `table` - Band table for the current sample rate
/// * `out` - Destination, at least `table.band_count()` long
///
/// # Returns
///
/// Number of band values written to the front of `out`
pub fn aggregate_bands(real: &[f32], imag: &[f32], table: &BandTable, out: &mut [f32]) -> usize {
    debug_assert_eq!(real.len(), imag.len());
    debug_assert!(out.len() >= table.band_count());

    let half = real.len() / 2;
    let boundaries = table.band_bins();

    let mut next_band = 0;
    let mut running_sum = 0.0f32;
    let mut running_bins = 0usize;

    for (bin, (&re, &im)) in real[..half].iter().zip(&imag[..half]).enumerate() {
        if next_band < boundaries.len() && bin == boundaries[next_band] {
            out[next_band] = band_average(running_sum, running_bins);
            running_sum = 0.0;
            running_bins = 0;
            next_band += 1;
        }

        running_sum += (re * re + im * im).sqrt();
        running_bins += 1;
    }

    out[next_band] = band_average(running_sum, running_bins);
    next_band + 1
}

#[inline]
fn band_average(sum: f32, bins: usize) -> f32 {
    if bins == 0 {
        0.0
    } else {
        sum / bins as f32
    }
}
