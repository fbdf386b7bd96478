//! Feature extraction modules
//!
//! This module contains the analysis stages run on each firing:
//! - Windowing and forward transform
//! - Bark-like band table, band aggregation and spectral centroid
//! - Offline onset picking for trigger tracks

pub mod bands;
pub mod onset;
pub mod spectrum;
