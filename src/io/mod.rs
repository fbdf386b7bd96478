//! Sample storage
//!
//! Fixed-capacity history of the incoming signal, written once per sample on
//! the real-time path.

pub mod rolling_buffer;
