//! Configuration parameters for the triggered analysis engine

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};

/// Taper applied to the analysis window before the transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaperShape {
    /// Linear fade-in over the first `taper_length` samples and fade-out over the
    /// last ones, unity gain in between
    LinearRamp,
    /// No taper (every sample weighted 1.0)
    Rectangular,
}

/// Engine configuration parameters
///
/// `Default` yields the compiled-in constants the engine was tuned with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Capacity of the rolling sample history (default: 2048)
    pub buffer_capacity: usize,

    /// Transform length, must be a power of two (default: 512)
    pub fft_length: usize,

    /// Samples the firing happens before a full window has elapsed since the
    /// trigger (default: 30)
    ///
    /// The analysis window therefore straddles the trigger and keeps some
    /// pre-onset context.
    pub padding_samples: usize,

    /// Every bin below this index gets its own band (default: 5)
    pub ones_until: usize,

    /// Trigger channel level above which a sample counts as a trigger (default: 0.5)
    pub trigger_threshold: f32,

    /// Taper shape (default: LinearRamp)
    pub taper: TaperShape,

    /// Length of each taper ramp in samples (default: 10)
    pub taper_length: usize,

    /// Upper bound for the band table, including the DC and trailing bands
    /// plus one spare slot (default: 60)
    pub max_bands: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: 2048,
            fft_length: 512,
            padding_samples: 30,
            ones_until: 5,
            trigger_threshold: 0.5,
            taper: TaperShape::LinearRamp,
            taper_length: 10,
            max_bands: 60,
        }
    }
}

impl EngineConfig {
    /// Countdown loaded into the trigger state machine on every trigger
    pub fn countdown_length(&self) -> usize {
        self.fft_length - self.padding_samples
    }

    /// Check the setup-time invariants
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidConfig` describing the first violated invariant.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.fft_length < 2 || !self.fft_length.is_power_of_two() {
            return Err(AnalysisError::InvalidConfig(format!(
                "fft_length must be a power of two >= 2, got {}",
                self.fft_length
            )));
        }

        if self.buffer_capacity < self.fft_length {
            return Err(AnalysisError::InvalidConfig(format!(
                "buffer_capacity ({}) must be >= fft_length ({})",
                self.buffer_capacity, self.fft_length
            )));
        }

        if self.padding_samples > self.fft_length {
            return Err(AnalysisError::InvalidConfig(format!(
                "padding_samples ({}) must be <= fft_length ({})",
                self.padding_samples, self.fft_length
            )));
        }

        if self.ones_until == 0 || self.ones_until > self.fft_length / 2 {
            return Err(AnalysisError::InvalidConfig(format!(
                "ones_until must be in [1, {}], got {}",
                self.fft_length / 2,
                self.ones_until
            )));
        }

        if self.taper_length * 2 > self.fft_length {
            return Err(AnalysisError::InvalidConfig(format!(
                "taper_length ({}) must fit twice in fft_length ({})",
                self.taper_length, self.fft_length
            )));
        }

        if !self.trigger_threshold.is_finite() {
            return Err(AnalysisError::InvalidConfig(
                "trigger_threshold must be finite".to_string(),
            ));
        }

        // ones_until - 1 forced bands, the DC band, the trailing band and a spare slot
        if self.max_bands < self.ones_until + 2 {
            return Err(AnalysisError::InvalidConfig(format!(
                "max_bands ({}) too small for ones_until ({})",
                self.max_bands, self.ones_until
            )));
        }

        Ok(())
    }
}
