//! Triggered analysis engine
//!
//! [`TriggeredAnalyzer`] owns the whole pipeline: rolling history, trigger
//! countdown, band table and every scratch buffer the firing path needs. It is
//! driven from a single audio callback thread through `&mut self`, so no
//! locking is involved.
//!
//! Per sample: the trigger channel may arm the countdown, the signal sample is
//! appended to the history, and the countdown ticks. When it fires, the latest
//! `fft_length` samples are windowed and transformed, the magnitudes are folded
//! into bands and the centroid is computed; the four results go to the sink.
//!
//! At most one firing happens per block. Once a block has fired, the trigger
//! channel is ignored for the rest of that block; its signal samples are still
//! appended so the history stays contiguous.
//!
//! # Example
//!
//! ```
//! use stratum_trig::{EngineConfig, SnapshotCollector, TriggeredAnalyzer};
//!
//! let mut engine = TriggeredAnalyzer::new(EngineConfig::default(), 44100.0)?;
//! let mut sink = SnapshotCollector::new();
//!
//! let signal = vec![0.0f32; 1024];
//! let mut trigger = vec![0.0f32; 1024];
//! trigger[0] = 1.0;
//!
//! let fired_at = engine.process_block(&signal, &trigger, &mut sink);
//! assert_eq!(fired_at, Some(482));
//! assert_eq!(sink.last().unwrap().centroid_hz, 0.0);
//! # Ok::<(), stratum_trig::AnalysisError>(())
//! ```

pub mod countdown;

use crate::analysis::result::FiringInfo;
use crate::analysis::sink::AnalysisSink;
use crate::config::EngineConfig;
use crate::error::AnalysisError;
use crate::features::bands::aggregation::aggregate_bands;
use crate::features::bands::centroid::spectral_centroid;
use crate::features::bands::BandTable;
use crate::features::spectrum::transform::SpectrumAnalyzer;
use crate::io::rolling_buffer::RollingBuffer;
use countdown::TriggerCountdown;

/// Trigger-driven spectral analysis of a streaming signal
#[derive(Debug)]
pub struct TriggeredAnalyzer {
    config: EngineConfig,
    history: RollingBuffer,
    countdown: TriggerCountdown,
    bands: BandTable,
    spectrum: SpectrumAnalyzer,
    /// Band scratch, `max_bands` long
    band_magnitudes: Vec<f32>,
    samples_processed: u64,
    firings: u64,
}

impl TriggeredAnalyzer {
    /// Build an engine for `sample_rate`
    ///
    /// Validates the configuration, computes the band table and allocates
    /// every buffer the engine will ever use.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if the configuration violates a setup-time invariant
    ///   or the band table does not fit `max_bands`
    /// - `InvalidInput` if the sample rate is not a positive finite number
    pub fn new(config: EngineConfig, sample_rate: f32) -> Result<Self, AnalysisError> {
        config.validate()?;
        let bands = BandTable::for_config(sample_rate, &config)?;

        log::debug!(
            "Triggered analyzer: {} Hz, fft_length={}, countdown={}, {} bands",
            sample_rate,
            config.fft_length,
            config.countdown_length(),
            bands.band_count()
        );

        Ok(Self {
            history: RollingBuffer::new(config.buffer_capacity),
            countdown: TriggerCountdown::new(),
            spectrum: SpectrumAnalyzer::new(config.fft_length, config.taper, config.taper_length),
            band_magnitudes: vec![0.0; config.max_bands],
            bands,
            config,
            samples_processed: 0,
            firings: 0,
        })
    }

    /// Setup notification: the host now runs at `sample_rate`
    ///
    /// Rebuilds the band table. Must not overlap with block processing, which
    /// `&mut self` guarantees. On error the previous table stays in place.
    ///
    /// # Errors
    ///
    /// Same as [`BandTable::for_config`].
    pub fn on_sample_rate_changed(&mut self, sample_rate: f32) -> Result<(), AnalysisError> {
        log::debug!("Sample rate changed to {} Hz", sample_rate);
        self.bands = BandTable::for_config(sample_rate, &self.config)?;
        Ok(())
    }

    /// Scalar control message; accepted and currently without effect
    pub fn on_control(&mut self, value: f32) {
        log::trace!("Control value {} ignored", value);
    }

    /// Process one sample pair outside of block processing
    ///
    /// Returns `true` if this sample fired an analysis. The one-firing-per-block
    /// rule does not span separate calls.
    pub fn push_sample<S>(&mut self, signal: f32, trigger: f32, sink: &mut S) -> bool
    where
        S: AnalysisSink + ?Sized,
    {
        self.step(signal, trigger, true, sink)
    }

    /// Process one block of parallel signal and trigger samples
    ///
    /// Returns the index within the block of the sample that fired, if any.
    /// Blocks whose channels differ in length are ignored entirely.
    pub fn process_block<S>(&mut self, signal: &[f32], trigger: &[f32], sink: &mut S) -> Option<usize>
    where
        S: AnalysisSink + ?Sized,
    {
        if signal.len() != trigger.len() {
            return None;
        }

        let mut fired_at = None;
        for (i, (&x, &t)) in signal.iter().zip(trigger).enumerate() {
            if self.step(x, t, fired_at.is_none(), sink) {
                fired_at = Some(i);
            }
        }
        fired_at
    }

    /// Host-shaped entry point: `inputs[0]` is the signal, `inputs[1]` the trigger
    ///
    /// Anything other than exactly two equally long channels is a no-op.
    pub fn process_channels<S>(&mut self, inputs: &[&[f32]], sink: &mut S) -> Option<usize>
    where
        S: AnalysisSink + ?Sized,
    {
        match inputs {
            [signal, trigger] => self.process_block(signal, trigger, sink),
            _ => None,
        }
    }

    /// Forget the history and any pending analysis
    pub fn reset(&mut self) {
        self.history.clear();
        self.countdown.cancel();
        self.samples_processed = 0;
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Band table for the current sample rate
    pub fn band_table(&self) -> &BandTable {
        &self.bands
    }

    /// Samples left until the pending analysis fires, `None` when idle
    pub fn pending_countdown(&self) -> Option<usize> {
        self.countdown.remaining()
    }

    /// Samples processed since construction or the last reset
    pub fn samples_processed(&self) -> u64 {
        self.samples_processed
    }

    /// Number of analyses fired since construction
    pub fn firings(&self) -> u64 {
        self.firings
    }

    #[inline]
    fn step<S>(&mut self, signal: f32, trigger: f32, accept_trigger: bool, sink: &mut S) -> bool
    where
        S: AnalysisSink + ?Sized,
    {
        if accept_trigger && trigger > self.config.trigger_threshold {
            self.countdown.arm(self.config.countdown_length());
        }

        // Non-finite input would poison every later window
        self.history.push(if signal.is_finite() { signal } else { 0.0 });
        self.samples_processed += 1;

        if self.countdown.tick() {
            self.fire(sink);
            true
        } else {
            false
        }
    }

    fn fire<S>(&mut self, sink: &mut S)
    where
        S: AnalysisSink + ?Sized,
    {
        self.spectrum.analyze(&self.history);

        let count = aggregate_bands(
            self.spectrum.real(),
            self.spectrum.imag(),
            &self.bands,
            &mut self.band_magnitudes,
        );
        let magnitudes = &self.band_magnitudes[..count];
        let centroid = spectral_centroid(magnitudes, self.bands.band_centers());

        let info = FiringInfo {
            sample_index: self.samples_processed - 1,
            sample_rate: self.bands.sample_rate(),
        };

        sink.firing(&info);
        sink.real_spectrum(self.spectrum.real());
        sink.imag_spectrum(self.spectrum.imag());
        sink.band_magnitudes(magnitudes);
        sink.centroid(centroid);

        self.firings += 1;
        log::trace!(
            "Fired at sample {}: centroid {:.1} Hz over {} bands",
            info.sample_index,
            centroid,
            count
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::sink::SnapshotCollector;

    fn engine() -> TriggeredAnalyzer {
        TriggeredAnalyzer::new(EngineConfig::default(), 44100.0).unwrap()
    }

    fn click_at(len: usize, positions: &[usize]) -> Vec<f32> {
        crate::preprocessing::channels::impulse_trigger(len, positions)
    }

    #[test]
    fn test_engine_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<TriggeredAnalyzer>();
    }

    #[test]
    fn test_fires_482_samples_after_trigger() {
        let mut engine = engine();
        let mut sink = SnapshotCollector::new();
        let signal = vec![0.0f32; 2048];
        let trigger = click_at(2048, &[100]);

        assert_eq!(engine.process_block(&signal, &trigger, &mut sink), Some(582));
        assert_eq!(sink.snapshots().len(), 1);
        assert_eq!(sink.last().unwrap().info.sample_index, 582);
        assert_eq!(engine.firings(), 1);
        assert!(engine.pending_countdown().is_none());
    }

    #[test]
    fn test_countdown_spans_blocks() {
        let mut engine = engine();
        let mut sink = SnapshotCollector::new();
        let silence = vec![0.0f32; 64];
        let mut first = true;

        let mut fired = None;
        for block in 0..20 {
            let trigger = if first { click_at(64, &[10]) } else { vec![0.0; 64] };
            first = false;
            if let Some(i) = engine.process_block(&silence, &trigger, &mut sink) {
                fired = Some(block * 64 + i);
                break;
            }
        }

        assert_eq!(fired, Some(10 + 482));
    }

    #[test]
    fn test_second_trigger_resets_countdown() {
        let mut engine = engine();
        let mut sink = SnapshotCollector::new();
        let signal = vec![0.0f32; 2048];
        let trigger = click_at(2048, &[100, 400]);

        assert_eq!(engine.process_block(&signal, &trigger, &mut sink), Some(882));
        assert_eq!(sink.snapshots().len(), 1);
    }

    #[test]
    fn test_one_firing_per_block() {
        let mut engine = engine();
        let mut sink = SnapshotCollector::new();
        let signal = vec![0.0f32; 4096];
        // Second trigger lands after the first firing in the same block
        let trigger = click_at(4096, &[0, 1000]);

        assert_eq!(engine.process_block(&signal, &trigger, &mut sink), Some(482));
        assert_eq!(sink.snapshots().len(), 1);
        assert!(engine.pending_countdown().is_none());
        // Every sample still went into the history
        assert_eq!(engine.samples_processed(), 4096);
    }

    #[test]
    fn test_held_trigger_postpones_firing() {
        let mut engine = engine();
        let mut sink = SnapshotCollector::new();
        let signal = vec![0.0f32; 2048];
        let mut trigger = vec![0.0f32; 2048];
        for t in trigger.iter_mut().take(100) {
            *t = 1.0;
        }

        // Every high sample re-arms; the last one at 99 sets the firing
        assert_eq!(engine.process_block(&signal, &trigger, &mut sink), Some(581));
        assert_eq!(sink.snapshots().len(), 1);
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut engine = engine();
        let mut sink = SnapshotCollector::new();
        let signal = vec![0.0f32; 2048];
        let mut trigger = vec![0.0f32; 2048];
        trigger[0] = 0.5;

        assert_eq!(engine.process_block(&signal, &trigger, &mut sink), None);
        assert!(engine.pending_countdown().is_none());
        assert!(sink.snapshots().is_empty());
    }

    #[test]
    fn test_push_sample_fires_per_trigger() {
        let mut engine = engine();
        let mut sink = SnapshotCollector::new();
        let mut fired = Vec::new();
        for i in 0..2000usize {
            let trigger = if i == 0 || i == 1000 { 1.0 } else { 0.0 };
            if engine.push_sample(0.0, trigger, &mut sink) {
                fired.push(i);
            }
        }
        assert_eq!(fired, vec![482, 1482]);
    }

    #[test]
    fn test_mismatched_block_is_noop() {
        let mut engine = engine();
        let mut sink = SnapshotCollector::new();
        let signal = vec![0.0f32; 1024];
        let trigger = vec![1.0f32; 512];

        assert_eq!(engine.process_block(&signal, &trigger, &mut sink), None);
        assert_eq!(engine.samples_processed(), 0);
        assert!(engine.pending_countdown().is_none());
    }

    #[test]
    fn test_process_channels_requires_two_inputs() {
        let mut engine = engine();
        let mut sink = SnapshotCollector::new();
        let signal = vec![0.0f32; 1024];
        let trigger = click_at(1024, &[0]);

        assert_eq!(engine.process_channels(&[signal.as_slice()], &mut sink), None);
        assert_eq!(
            engine.process_channels(
                &[signal.as_slice(), trigger.as_slice(), signal.as_slice()],
                &mut sink
            ),
            None
        );
        assert_eq!(engine.samples_processed(), 0);

        assert_eq!(engine.process_channels(&[signal.as_slice(), trigger.as_slice()], &mut sink), Some(482));
    }

    #[test]
    fn test_silence_outputs() {
        let mut engine = engine();
        let mut sink = SnapshotCollector::new();
        let signal = vec![0.0f32; 1024];
        let trigger = click_at(1024, &[0]);
        engine.process_block(&signal, &trigger, &mut sink);

        let snap = sink.last().unwrap();
        assert_eq!(snap.real.len(), 512);
        assert_eq!(snap.imag.len(), 512);
        assert_eq!(snap.band_magnitudes.len(), engine.band_table().band_count());
        assert!(snap.band_magnitudes.iter().all(|&m| m == 0.0));
        assert_eq!(snap.centroid_hz, 0.0);
    }

    #[test]
    fn test_non_finite_signal_is_zeroed() {
        let mut engine = engine();
        let mut sink = SnapshotCollector::new();
        let mut signal = vec![0.0f32; 1024];
        signal[300] = f32::NAN;
        signal[301] = f32::INFINITY;
        let trigger = click_at(1024, &[0]);
        engine.process_block(&signal, &trigger, &mut sink);

        let snap = sink.last().unwrap();
        assert!(snap.real.iter().all(|x| x.is_finite()));
        assert_eq!(snap.centroid_hz, 0.0);
    }

    #[test]
    fn test_sample_rate_change_rebuilds_table() {
        let mut engine = engine();
        let bins_44k = engine.band_table().band_bins().to_vec();

        engine.on_sample_rate_changed(8000.0).unwrap();
        assert_eq!(engine.band_table().sample_rate(), 8000.0);
        assert_ne!(engine.band_table().band_bins(), bins_44k.as_slice());

        // Failed update keeps the previous table
        assert!(engine.on_sample_rate_changed(0.0).is_err());
        assert_eq!(engine.band_table().sample_rate(), 8000.0);
    }

    #[test]
    fn test_invalid_construction() {
        let config = EngineConfig {
            fft_length: 300,
            ..EngineConfig::default()
        };
        assert!(TriggeredAnalyzer::new(config, 44100.0).is_err());
        assert!(TriggeredAnalyzer::new(EngineConfig::default(), -1.0).is_err());

        // 26 bands at 44.1 kHz do not fit 20 slots
        let config = EngineConfig {
            max_bands: 20,
            ..EngineConfig::default()
        };
        assert!(matches!(
            TriggeredAnalyzer::new(config, 44100.0),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_control_and_reset() {
        let mut engine = engine();
        let mut sink = ();
        engine.on_control(0.75);

        let signal = vec![0.25f32; 100];
        let trigger = click_at(100, &[0]);
        assert_eq!(engine.process_block(&signal, &trigger, &mut sink), None);
        assert_eq!(engine.pending_countdown(), Some(382));

        engine.reset();
        assert!(engine.pending_countdown().is_none());
        assert_eq!(engine.samples_processed(), 0);
    }
}
