//! Error types for the triggered analysis engine

use std::fmt;

/// Errors that can occur while configuring or driving the engine
///
/// None of these are produced on the per-sample path: configuration problems
/// surface when an engine is built or re-tuned to a new sample rate, and
/// malformed blocks are dropped silently.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Invalid input parameters (sample rate, block size, channel layout)
    InvalidInput(String),

    /// Engine configuration violates a setup-time invariant
    InvalidConfig(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AnalysisError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}
