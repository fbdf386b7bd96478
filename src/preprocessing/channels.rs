//! Channel layout utilities (signal + trigger streams)

use crate::error::AnalysisError;

/// Split an interleaved recording into (signal, trigger)
///
/// Channel 0 is the signal and channel 1 the trigger; further channels are
/// ignored. A trailing partial frame is dropped.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if the recording has fewer than two
/// channels.
pub fn split_signal_and_trigger(
    interleaved: &[f32],
    channels: usize,
) -> Result<(Vec<f32>, Vec<f32>), AnalysisError> {
    if channels < 2 {
        return Err(AnalysisError::InvalidInput(format!(
            "Need a signal and a trigger channel, got {} channel(s)",
            channels
        )));
    }

    let frames = interleaved.len() / channels;
    let mut signal = Vec::with_capacity(frames);
    let mut trigger = Vec::with_capacity(frames);
    for frame in interleaved.chunks_exact(channels) {
        signal.push(frame[0]);
        trigger.push(frame[1]);
    }

    Ok((signal, trigger))
}

/// Trigger track of `len` samples with a 1.0 click at each position
///
/// Positions at or beyond `len` are ignored.
pub fn impulse_trigger(len: usize, positions: &[usize]) -> Vec<f32> {
    let mut track = vec![0.0f32; len];
    for &pos in positions {
        if let Some(slot) = track.get_mut(pos) {
            *slot = 1.0;
        }
    }
    track
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_stereo() {
        let interleaved = [0.1, 0.0, 0.2, 1.0, 0.3, 0.0, 0.4];
        let (signal, trigger) = split_signal_and_trigger(&interleaved, 2).unwrap();
        assert_eq!(signal, vec![0.1, 0.2, 0.3]);
        assert_eq!(trigger, vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_split_ignores_extra_channels() {
        let interleaved = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let (signal, trigger) = split_signal_and_trigger(&interleaved, 3).unwrap();
        assert_eq!(signal, vec![1.0, 4.0]);
        assert_eq!(trigger, vec![2.0, 5.0]);
    }

    #[test]
    fn test_split_rejects_mono() {
        assert!(split_signal_and_trigger(&[0.0; 4], 1).is_err());
        assert!(split_signal_and_trigger(&[0.0; 4], 0).is_err());
    }

    #[test]
    fn test_impulse_trigger() {
        let track = impulse_trigger(6, &[1, 4, 9]);
        assert_eq!(track, vec![0.0, 1.0, 0.0, 0.0, 1.0, 0.0]);
    }
}
