//! Energy flux onset detection
//!
//! Algorithm:
//! 1. Frame the signal (frame_size, hop_size) and take the RMS of each frame
//! 2. Flux is the positive part of the frame-to-frame RMS difference
//! 3. Keep local flux maxima above `max_flux * 10^(threshold_db / 20)`
//!
//! # Reference
//!
//! Bello, J. P., Daudet, L., Abdallah, S., Duxbury, C., Davies, M., & Sandler, M. B. (2005).
//! A Tutorial on Onset Detection in Music Signals.
//! *IEEE Transactions on Speech and Audio Processing*, 13(5), 1035-1047.

use crate::error::AnalysisError;

/// Numerical stability epsilon
const EPSILON: f32 = 1e-10;

/// Detect onsets using energy flux
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `frame_size` - Frame size for RMS (typically 2048)
/// * `hop_size` - Hop size between frames (typically 512)
/// * `threshold_db` - Threshold in dB relative to the maximum flux (typically -20 to -30 dB)
///
/// # Returns
///
/// Onset positions in samples, ascending. A flux peak between frames `i` and
/// `i + 1` is reported at the start of frame `i + 1`.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if `frame_size` or `hop_size` is zero.
///
/// # Example
///
/// ```
/// use stratum_trig::features::onset::energy_flux::detect_energy_flux_onsets;
///
/// let samples = vec![0.0f32; 44100];
/// let onsets = detect_energy_flux_onsets(&samples, 2048, 512, -20.0)?;
/// assert!(onsets.is_empty());
/// # Ok::<(), stratum_trig::AnalysisError>(())
/// ```
pub fn detect_energy_flux_onsets(
    samples: &[f32],
    frame_size: usize,
    hop_size: usize,
    threshold_db: f32,
) -> Result<Vec<usize>, AnalysisError> {
    if frame_size == 0 {
        return Err(AnalysisError::InvalidInput(
            "Frame size must be > 0".to_string(),
        ));
    }

    if hop_size == 0 {
        return Err(AnalysisError::InvalidInput(
            "Hop size must be > 0".to_string(),
        ));
    }

    if samples.len() < frame_size {
        log::debug!(
            "Audio shorter than one frame ({} < {}), no onsets",
            samples.len(),
            frame_size
        );
        return Ok(Vec::new());
    }

    let num_frames = (samples.len() - frame_size) / hop_size + 1;
    let energies: Vec<f32> = (0..num_frames)
        .map(|i| {
            let frame = &samples[i * hop_size..i * hop_size + frame_size];
            (frame.iter().map(|&x| x * x).sum::<f32>() / frame_size as f32).sqrt()
        })
        .collect();

    let flux: Vec<f32> = energies.windows(2).map(|w| (w[1] - w[0]).max(0.0)).collect();
    let max_flux = flux.iter().copied().fold(0.0f32, f32::max);
    if max_flux <= EPSILON {
        return Ok(Vec::new());
    }

    let threshold = max_flux * 10.0_f32.powf(threshold_db / 20.0);

    let onsets: Vec<usize> = (0..flux.len())
        .filter(|&i| {
            let rises = i == 0 || flux[i] > flux[i - 1];
            let holds = i + 1 == flux.len() || flux[i] >= flux[i + 1];
            flux[i] > threshold && rises && holds
        })
        .map(|i| (i + 1) * hop_size)
        .collect();

    log::debug!(
        "Energy flux: {} frames, max flux {:.6}, {} onsets",
        num_frames,
        max_flux,
        onsets.len()
    );

    Ok(onsets)
}
