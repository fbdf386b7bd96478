//! Onset picking for offline trigger generation
//!
//! When a recording has no trigger channel, clicks can be synthesized at the
//! onsets found by energy flux and fed to the engine as its trigger input.

pub mod energy_flux;

use crate::error::AnalysisError;
use crate::preprocessing::channels::impulse_trigger;

/// Build a trigger track with a unit click at every energy-flux onset
///
/// # Arguments
///
/// * `samples` - Mono signal
/// * `frame_size` - RMS frame size in samples
/// * `hop_size` - Hop between frames in samples
/// * `threshold_db` - Onset threshold relative to the strongest flux peak
///
/// # Errors
///
/// Propagates parameter errors from [`energy_flux::detect_energy_flux_onsets`].
pub fn onset_trigger_track(
    samples: &[f32],
    frame_size: usize,
    hop_size: usize,
    threshold_db: f32,
) -> Result<Vec<f32>, AnalysisError> {
    let onsets = energy_flux::detect_energy_flux_onsets(samples, frame_size, hop_size, threshold_db)?;
    log::debug!("Synthesizing trigger track from {} onsets", onsets.len());
    Ok(impulse_trigger(samples.len(), &onsets))
}
