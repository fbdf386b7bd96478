//! Analysis outputs
//!
//! Each firing produces four outputs (real spectrum, imaginary spectrum, band
//! magnitudes, centroid) that are pushed to an [`sink::AnalysisSink`]:
//! - Sink trait and ready-made sinks
//! - Owned snapshot type for results that outlive a firing

pub mod result;
pub mod sink;
