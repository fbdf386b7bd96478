//! Windowing and forward transform
//!
//! - Taper coefficients, computed once per configuration
//! - Preplanned complex FFT over the most recent window of the rolling buffer

pub mod transform;
pub mod window;
