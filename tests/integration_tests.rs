//! Integration tests for the triggered analysis engine

use stratum_trig::preprocessing::channels::{impulse_trigger, split_signal_and_trigger};
use stratum_trig::{
    analyze_self_triggered, analyze_triggered, EngineConfig, SnapshotCollector, TaperShape,
    TriggeredAnalyzer,
};
use std::path::PathBuf;

/// Sine of `freq` Hz over `len` samples
fn sine(freq: f32, sample_rate: f32, len: usize, amplitude: f32) -> Vec<f32> {
    (0..len)
        .map(|i| amplitude * (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate).sin())
        .collect()
}

/// Write a stereo float WAV (signal left, trigger right)
fn write_wav(
    path: &PathBuf,
    signal: &[f32],
    trigger: &[f32],
    sample_rate: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for (&s, &t) in signal.iter().zip(trigger) {
        writer.write_sample(s)?;
        writer.write_sample(t)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Load a WAV file and return (interleaved samples, channels, sample_rate)
fn load_wav(path: &PathBuf) -> Result<(Vec<f32>, usize, u32), Box<dyn std::error::Error>> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            let max_value = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / max_value))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    Ok((samples, spec.channels as usize, spec.sample_rate))
}

fn temp_wav_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("stratum_trig_{}_{}.wav", name, std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_1000hz_at_44100() {
        let sample_rate = 44100.0;
        let signal = sine(1000.0, sample_rate, 4096, 0.8);
        let trigger = impulse_trigger(4096, &[1000]);

        let snapshots =
            analyze_triggered(&signal, &trigger, sample_rate, 64, EngineConfig::default())
                .expect("Analysis should succeed");
        assert_eq!(snapshots.len(), 1);

        let snap = &snapshots[0];
        assert_eq!(snap.info.sample_index, 1482);
        assert_eq!(snap.fft_length(), 512);

        // round(1000 * 512 / 44100) = 12
        assert_eq!(snap.peak_bin(), Some(12));

        let engine = TriggeredAnalyzer::new(EngineConfig::default(), sample_rate).unwrap();
        let table = engine.band_table();
        let band = table.band_of_bin(12);
        assert_eq!(snap.band_magnitudes.len(), table.band_count());
        assert_eq!(snap.dominant_band(), Some(band));

        // Leakage pulls the centroid around, but it stays near the dominant band
        let centroid = snap.centroid_hz;
        assert!(centroid.is_finite());
        assert!(
            centroid > 700.0 && centroid < 2000.0,
            "centroid {:.1} Hz too far from 1000 Hz band (center {:.1} Hz)",
            centroid,
            table.band_centers()[band]
        );
    }

    #[test]
    fn test_sine_follows_sample_rate_change() {
        let mut engine = TriggeredAnalyzer::new(EngineConfig::default(), 44100.0).unwrap();
        engine.on_sample_rate_changed(48000.0).unwrap();

        let signal = sine(1000.0, 48000.0, 2048, 0.5);
        let trigger = impulse_trigger(2048, &[600]);
        let mut sink = SnapshotCollector::new();
        assert_eq!(engine.process_block(&signal, &trigger, &mut sink), Some(1082));

        let snap = sink.last().unwrap();
        assert_eq!(snap.info.sample_rate, 48000.0);
        // 1000 * 512 / 48000 = 10.67
        assert_eq!(snap.peak_bin(), Some(11));
    }

    #[test]
    fn test_silence_scenario() {
        let signal = vec![0.0f32; 2048];
        let trigger = impulse_trigger(2048, &[0, 1024]);

        let snapshots =
            analyze_triggered(&signal, &trigger, 44100.0, 2048, EngineConfig::default()).unwrap();
        // Both triggers fall in one block: only the first one fires
        assert_eq!(snapshots.len(), 1);

        let snap = &snapshots[0];
        assert!(snap.band_magnitudes.iter().all(|&m| m == 0.0));
        assert_eq!(snap.centroid_hz, 0.0);
        assert!(!snap.centroid_hz.is_nan());
    }

    #[test]
    fn test_triggers_in_separate_blocks_each_fire() {
        let signal = sine(440.0, 44100.0, 8192, 0.3);
        let trigger = impulse_trigger(8192, &[100, 3000, 6000]);

        let snapshots =
            analyze_triggered(&signal, &trigger, 44100.0, 256, EngineConfig::default()).unwrap();
        let fired: Vec<u64> = snapshots.iter().map(|s| s.info.sample_index).collect();
        assert_eq!(fired, vec![582, 3482, 6482]);
    }

    #[test]
    fn test_taper_reduces_far_leakage() {
        let sample_rate = 44100.0;
        let signal = sine(1000.0, sample_rate, 2048, 0.8);
        let trigger = impulse_trigger(2048, &[500]);

        let tapered = EngineConfig::default();
        let rectangular = EngineConfig {
            taper: TaperShape::Rectangular,
            ..EngineConfig::default()
        };

        let a = analyze_triggered(&signal, &trigger, sample_rate, 64, tapered).unwrap();
        let b = analyze_triggered(&signal, &trigger, sample_rate, 64, rectangular).unwrap();

        let last = a[0].band_magnitudes.len() - 1;
        assert!(a[0].band_magnitudes[last] < b[0].band_magnitudes[last]);
    }

    #[test]
    fn test_wav_round_trip() {
        let sample_rate = 44100u32;
        let signal = sine(3000.0, sample_rate as f32, 8820, 0.5);
        let trigger = impulse_trigger(8820, &[2000, 6000]);

        let path = temp_wav_path("round_trip");
        write_wav(&path, &signal, &trigger, sample_rate).expect("Failed to write WAV");
        let (interleaved, channels, sr) = load_wav(&path).expect("Failed to load WAV");
        let _ = std::fs::remove_file(&path);

        assert_eq!(channels, 2);
        assert_eq!(sr, sample_rate);

        let (signal_in, trigger_in) = split_signal_and_trigger(&interleaved, channels).unwrap();
        assert_eq!(signal_in, signal);

        let snapshots =
            analyze_triggered(&signal_in, &trigger_in, sr as f32, 512, EngineConfig::default())
                .unwrap();
        assert_eq!(snapshots.len(), 2);

        // 3000 * 512 / 44100 = 34.8
        for snap in &snapshots {
            assert_eq!(snap.peak_bin(), Some(35));
            assert!(snap.centroid_hz > 2000.0 && snap.centroid_hz < 5000.0);
        }
    }

    #[test]
    fn test_self_triggered_bursts() {
        let sample_rate = 44100.0;
        let len = 66150;
        let mut signal = vec![0.0f32; len];
        for &start in &[11025usize, 33075, 55125] {
            for t in 0..4000 {
                let envelope = 0.8 * (-(t as f32) / 4000.0 * 5.0).exp();
                signal[start + t] = envelope
                    * (2.0 * std::f32::consts::PI * 2000.0 * t as f32 / sample_rate).sin();
            }
        }

        let snapshots =
            analyze_self_triggered(&signal, sample_rate, 64, -20.0, EngineConfig::default())
                .unwrap();
        assert_eq!(snapshots.len(), 3, "one firing per burst");
        for snap in &snapshots {
            assert!(snap.centroid_hz > 0.0, "window should overlap its burst");
        }
    }

    #[test]
    fn test_invalid_offline_input() {
        let config = EngineConfig::default();
        assert!(analyze_triggered(&[], &[], 44100.0, 64, config.clone()).is_err());
        assert!(analyze_triggered(&[0.0; 10], &[0.0; 9], 44100.0, 64, config.clone()).is_err());
        assert!(analyze_triggered(&[0.0; 10], &[0.0; 10], 44100.0, 0, config.clone()).is_err());
        assert!(analyze_triggered(&[0.0; 10], &[0.0; 10], 0.0, 64, config).is_err());
    }
}
