//! Bark-like band analysis
//!
//! The first half of the spectrum is partitioned into non-uniform bands, dense at
//! low frequencies and widening towards Nyquist:
//! - Band table construction from the perceptual edge list (setup time)
//! - Per-band average magnitude (per firing)
//! - Spectral centroid over the band magnitudes (per firing)

pub mod aggregation;
pub mod centroid;
pub mod edges;

use crate::config::EngineConfig;
use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};

/// Perceptual band-edge frequencies in Hz (Zwicker's critical band edges)
pub const BARK_EDGE_FREQUENCIES: [f32; 24] = [
    100.0, 200.0, 300.0, 400.0, 510.0, 630.0, 770.0, 920.0, 1080.0, 1270.0, 1480.0, 1720.0,
    2000.0, 2320.0, 2700.0, 3150.0, 3700.0, 4400.0, 5300.0, 6400.0, 7700.0, 9500.0, 12000.0,
    15500.0,
];

/// Band boundaries and centers for one (sample rate, transform length) pair
///
/// Band `0` holds the bins below `band_bins[0]`, band `i` the bins in
/// `band_bins[i-1]..band_bins[i]`, and the trailing band the bins from the last
/// boundary up to Nyquist. There is one more band than there are boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandTable {
    pub(crate) band_bins: Vec<usize>,
    pub(crate) band_centers: Vec<f32>,
    pub(crate) sample_rate: f32,
    pub(crate) fft_length: usize,
}

impl BandTable {
    /// Build the table for an engine configuration
    ///
    /// Runs the edge calculation and checks that the result fits the
    /// preallocated band storage (`band count + 1 <= max_bands`).
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for a non-positive or non-finite sample rate
    /// - `InvalidConfig` if the table does not fit `max_bands`
    pub fn for_config(sample_rate: f32, config: &EngineConfig) -> Result<Self, AnalysisError> {
        let table = edges::compute_band_table(sample_rate, config.fft_length, config.ones_until)?;

        // Boundaries + trailing band + spare slot
        if table.boundary_count() + 2 > config.max_bands {
            return Err(AnalysisError::InvalidConfig(format!(
                "{} band boundaries at {} Hz exceed max_bands ({})",
                table.boundary_count(),
                sample_rate,
                config.max_bands
            )));
        }

        Ok(table)
    }

    /// Bin indices where a new band starts, strictly increasing
    pub fn band_bins(&self) -> &[usize] {
        &self.band_bins
    }

    /// Center frequency of every band in Hz, one more entry than `band_bins`
    pub fn band_centers(&self) -> &[f32] {
        &self.band_centers
    }

    /// Number of band boundaries
    pub fn boundary_count(&self) -> usize {
        self.band_bins.len()
    }

    /// Number of bands produced per firing (boundaries + trailing band)
    pub fn band_count(&self) -> usize {
        self.band_bins.len() + 1
    }

    /// Sample rate the table was computed for
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Transform length the table was computed for
    pub fn fft_length(&self) -> usize {
        self.fft_length
    }

    /// Frequency of a transform bin in Hz
    pub fn bin_frequency(&self, bin: usize) -> f32 {
        bin as f32 * self.sample_rate / self.fft_length as f32
    }

    /// Index of the band a bin is folded into
    pub fn band_of_bin(&self, bin: usize) -> usize {
        self.band_bins.partition_point(|&edge| edge <= bin)
    }
}
