//! Output sinks for firings
//!
//! The engine hands borrowed slices of its scratch buffers to the sink, in a
//! fixed order: [`firing`](AnalysisSink::firing), real spectrum, imaginary
//! spectrum, band magnitudes, centroid. The slices are only valid for the
//! duration of the call.

use super::result::{AnalysisSnapshot, FiringInfo};

/// Receiver of the four outputs of a firing
///
/// Called on the audio thread; implementations meant for real-time use should
/// copy into preallocated storage rather than allocate.
pub trait AnalysisSink {
    /// A firing is about to be emitted
    fn firing(&mut self, _info: &FiringInfo) {}

    /// Real part of the spectrum, transform length values
    fn real_spectrum(&mut self, values: &[f32]);

    /// Imaginary part of the spectrum, transform length values
    fn imag_spectrum(&mut self, values: &[f32]);

    /// Average magnitude per band, band count values
    fn band_magnitudes(&mut self, values: &[f32]);

    /// Band spectral centroid in Hz
    fn centroid(&mut self, hz: f32);
}

/// Discards every output
impl AnalysisSink for () {
    fn real_spectrum(&mut self, _values: &[f32]) {}
    fn imag_spectrum(&mut self, _values: &[f32]) {}
    fn band_magnitudes(&mut self, _values: &[f32]) {}
    fn centroid(&mut self, _hz: f32) {}
}

/// Sink that keeps an owned [`AnalysisSnapshot`] per firing
///
/// Allocates on every firing; intended for offline analysis and tests.
#[derive(Debug, Default)]
pub struct SnapshotCollector {
    pending: Option<AnalysisSnapshot>,
    snapshots: Vec<AnalysisSnapshot>,
}

impl SnapshotCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots collected so far, oldest first
    pub fn snapshots(&self) -> &[AnalysisSnapshot] {
        &self.snapshots
    }

    /// Most recent snapshot
    pub fn last(&self) -> Option<&AnalysisSnapshot> {
        self.snapshots.last()
    }

    /// Take all collected snapshots
    pub fn into_snapshots(self) -> Vec<AnalysisSnapshot> {
        self.snapshots
    }

    fn pending_mut(&mut self) -> &mut AnalysisSnapshot {
        self.pending.get_or_insert_with(empty_snapshot)
    }
}

fn empty_snapshot() -> AnalysisSnapshot {
    AnalysisSnapshot {
        info: FiringInfo {
            sample_index: 0,
            sample_rate: 0.0,
        },
        real: Vec::new(),
        imag: Vec::new(),
        band_magnitudes: Vec::new(),
        centroid_hz: 0.0,
    }
}

impl AnalysisSink for SnapshotCollector {
    fn firing(&mut self, info: &FiringInfo) {
        self.pending_mut().info = *info;
    }

    fn real_spectrum(&mut self, values: &[f32]) {
        self.pending_mut().real = values.to_vec();
    }

    fn imag_spectrum(&mut self, values: &[f32]) {
        self.pending_mut().imag = values.to_vec();
    }

    fn band_magnitudes(&mut self, values: &[f32]) {
        self.pending_mut().band_magnitudes = values.to_vec();
    }

    fn centroid(&mut self, hz: f32) {
        let mut snapshot = self.pending.take().unwrap_or_else(empty_snapshot);
        snapshot.centroid_hz = hz;
        self.snapshots.push(snapshot);
    }
}
