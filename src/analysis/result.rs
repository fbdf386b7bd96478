//! Analysis result types

use serde::{Deserialize, Serialize};

/// Where and at which rate a firing happened
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiringInfo {
    /// Absolute index of the firing sample since the engine was created or reset
    pub sample_index: u64,

    /// Sample rate of the band table in use, in Hz
    pub sample_rate: f32,
}

/// Owned copy of everything one firing produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSnapshot {
    /// Firing position and sample rate
    pub info: FiringInfo,

    /// Real part of the spectrum (transform length)
    pub real: Vec<f32>,

    /// Imaginary part of the spectrum (transform length)
    pub imag: Vec<f32>,

    /// Average magnitude per band (band count of the table in use)
    pub band_magnitudes: Vec<f32>,

    /// Band spectral centroid in Hz (0.0 for silence)
    pub centroid_hz: f32,
}

impl AnalysisSnapshot {
    /// Transform length of the spectrum
    pub fn fft_length(&self) -> usize {
        self.real.len()
    }

    /// Magnitude of one bin
    pub fn magnitude(&self, bin: usize) -> f32 {
        self.real[bin].hypot(self.imag[bin])
    }

    /// Bin with the largest magnitude in `1..fft_length / 2` (DC excluded)
    ///
    /// Returns `None` for a spectrum without such bins.
    pub fn peak_bin(&self) -> Option<usize> {
        let half = self.fft_length() / 2;
        (1..half).max_by(|&a, &b| self.magnitude(a).total_cmp(&self.magnitude(b)))
    }

    /// Band with the largest average magnitude
    pub fn dominant_band(&self) -> Option<usize> {
        self.band_magnitudes
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
    }

    /// Frequency of a bin in Hz
    pub fn bin_frequency(&self, bin: usize) -> f32 {
        bin as f32 * self.info.sample_rate / self.fft_length() as f32
    }
}
