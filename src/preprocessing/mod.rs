//! Input preparation utilities
//!
//! Helpers for turning recordings into the two parallel streams the engine
//! consumes (signal channel, trigger channel).

pub mod channels;
