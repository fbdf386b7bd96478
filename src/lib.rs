//! # Stratum Trig
//!
//! Triggered spectral analysis for streaming audio: the engine keeps a rolling
//! history of the signal and, a fixed number of samples after each trigger,
//! analyzes the most recent window.
//!
//! ## Features
//!
//! - **Rolling history**: fixed-capacity circular buffer, O(1) per sample
//! - **Trigger countdown**: firing lands so the window straddles the trigger
//! - **Spectrum**: tapered forward FFT of the window (real and imaginary parts)
//! - **Bark-like bands**: average magnitude per perceptual band
//! - **Centroid**: magnitude-weighted mean of the band centers
//!
//! ## Quick Start
//!
//! ```no_run
//! use stratum_trig::{analyze_triggered, EngineConfig};
//!
//! // Signal and trigger channels of equal length
//! let signal: Vec<f32> = vec![]; // Your audio data
//! let trigger: Vec<f32> = vec![]; // 1.0 at each onset, 0.0 elsewhere
//!
//! let snapshots = analyze_triggered(&signal, &trigger, 44100.0, 64, EngineConfig::default())?;
//! for snap in &snapshots {
//!     println!("sample {}: centroid {:.1} Hz", snap.info.sample_index, snap.centroid_hz);
//! }
//! # Ok::<(), stratum_trig::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! (signal, trigger) → Countdown + Rolling Buffer → [fire] → Taper + FFT → Bands → Centroid → Sink
//! ```
//!
//! Real-time hosts drive [`TriggeredAnalyzer`] directly with
//! [`process_block`](TriggeredAnalyzer::process_block) and their own
//! [`AnalysisSink`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod features;
pub mod io;
pub mod preprocessing;

// Re-export main types
pub use analysis::result::{AnalysisSnapshot, FiringInfo};
pub use analysis::sink::{AnalysisSink, SnapshotCollector};
pub use config::{EngineConfig, TaperShape};
pub use engine::TriggeredAnalyzer;
pub use error::AnalysisError;
pub use features::bands::{BandTable, BARK_EDGE_FREQUENCIES};

/// Offline analysis of a recorded signal and trigger track
///
/// Streams both tracks through a fresh [`TriggeredAnalyzer`] in blocks of
/// `block_size` samples, the way a host would, and collects every firing. The
/// one-firing-per-block rule applies, so the block size matters when triggers
/// come closer together than a block.
///
/// # Arguments
///
/// * `signal` - Mono audio samples
/// * `trigger` - Trigger channel, same length as `signal`
/// * `sample_rate` - Sample rate in Hz
/// * `block_size` - Host block size in samples (typically 64-1024)
/// * `config` - Engine configuration
///
/// # Returns
///
/// One snapshot per firing, in stream order
///
/// # Errors
///
/// Returns `AnalysisError` if the input is empty, the tracks differ in length,
/// the block size is zero, or the engine cannot be built.
///
/// # Example
///
/// ```
/// use stratum_trig::{analyze_triggered, EngineConfig};
///
/// let signal = vec![0.0f32; 4096];
/// let mut trigger = vec![0.0f32; 4096];
/// trigger[1000] = 1.0;
///
/// let snapshots = analyze_triggered(&signal, &trigger, 48000.0, 128, EngineConfig::default())?;
/// assert_eq!(snapshots.len(), 1);
/// assert_eq!(snapshots[0].info.sample_index, 1482);
/// # Ok::<(), stratum_trig::AnalysisError>(())
/// ```
pub fn analyze_triggered(
    signal: &[f32],
    trigger: &[f32],
    sample_rate: f32,
    block_size: usize,
    config: EngineConfig,
) -> Result<Vec<AnalysisSnapshot>, AnalysisError> {
    use std::time::Instant;
    let start_time = Instant::now();

    log::debug!(
        "Starting triggered analysis: {} samples at {} Hz, block size {}",
        signal.len(),
        sample_rate,
        block_size
    );

    if signal.is_empty() {
        return Err(AnalysisError::InvalidInput("Empty audio samples".to_string()));
    }

    if signal.len() != trigger.len() {
        return Err(AnalysisError::InvalidInput(format!(
            "Signal and trigger lengths differ: {} vs {}",
            signal.len(),
            trigger.len()
        )));
    }

    if block_size == 0 {
        return Err(AnalysisError::InvalidInput(
            "Block size must be > 0".to_string(),
        ));
    }

    let mut engine = TriggeredAnalyzer::new(config, sample_rate)?;
    let mut sink = SnapshotCollector::new();

    for (signal_block, trigger_block) in signal.chunks(block_size).zip(trigger.chunks(block_size)) {
        engine.process_block(signal_block, trigger_block, &mut sink);
    }

    if let Some(remaining) = engine.pending_countdown() {
        log::warn!(
            "Input ended {} samples before a pending analysis would fire",
            remaining + 1
        );
    }

    let snapshots = sink.into_snapshots();
    log::debug!(
        "Triggered analysis done: {} firings in {:.2} ms",
        snapshots.len(),
        start_time.elapsed().as_secs_f32() * 1000.0
    );

    Ok(snapshots)
}

/// RMS frame size for self-triggering
const ONSET_FRAME_SIZE: usize = 512;

/// Hop between RMS frames for self-triggering
const ONSET_HOP_SIZE: usize = 128;

/// Offline analysis with triggers derived from the signal's own onsets
///
/// Builds a trigger track from energy-flux onsets and runs
/// [`analyze_triggered`] on it. Short onset frames keep each click within a
/// frame of the true onset, so the analysis window overlaps the event.
///
/// # Errors
///
/// Same as [`analyze_triggered`].
pub fn analyze_self_triggered(
    signal: &[f32],
    sample_rate: f32,
    block_size: usize,
    threshold_db: f32,
    config: EngineConfig,
) -> Result<Vec<AnalysisSnapshot>, AnalysisError> {
    let trigger = features::onset::onset_trigger_track(
        signal,
        ONSET_FRAME_SIZE,
        ONSET_HOP_SIZE,
        threshold_db,
    )?;
    analyze_triggered(signal, &trigger, sample_rate, block_size, config)
}
