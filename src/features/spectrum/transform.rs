//! Forward transform of the most recent analysis window
//!
//! The FFT is planned once when the analyzer is built, and every buffer it
//! touches is allocated up front, so [`SpectrumAnalyzer::analyze`] never
//! allocates.
//!
//! Output bin `j` corresponds to `j * sample_rate / fft_length` Hz; only bins
//! `0..=fft_length / 2` carry information for a real input, but the full
//! transform length is kept.

use std::fmt;
use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use super::window::{apply_taper, taper_coefficients};
use crate::config::TaperShape;
use crate::io::rolling_buffer::RollingBuffer;

/// Windowing + FFT stage with preallocated scratch space
pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    taper: Vec<f32>,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
    real: Vec<f32>,
    imag: Vec<f32>,
}

impl SpectrumAnalyzer {
    /// Plan the transform and allocate all buffers
    ///
    /// `fft_length` must be a power of two; the engine configuration
    /// guarantees it.
    pub fn new(fft_length: usize, taper: TaperShape, taper_length: usize) -> Self {
        debug_assert!(fft_length.is_power_of_two());

        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(fft_length);
        let scratch_len = fft.get_inplace_scratch_len();

        Self {
            fft,
            taper: taper_coefficients(taper, fft_length, taper_length),
            window: vec![0.0; fft_length],
            buffer: vec![Complex::new(0.0, 0.0); fft_length],
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
            real: vec![0.0; fft_length],
            imag: vec![0.0; fft_length],
        }
    }

    /// Transform length
    pub fn fft_length(&self) -> usize {
        self.window.len()
    }

    /// Taper coefficients in use
    pub fn taper(&self) -> &[f32] {
        &self.taper
    }

    /// Window the latest `fft_length` samples of `history` and transform them
    ///
    /// The result is available through [`real`](Self::real) and
    /// [`imag`](Self::imag) until the next call.
    pub fn analyze(&mut self, history: &RollingBuffer) {
        history.copy_window_into(&mut self.window);
        self.transform_window();
    }

    /// Window and transform an arbitrary block of `fft_length` samples
    pub fn analyze_samples(&mut self, samples: &[f32]) {
        debug_assert_eq!(samples.len(), self.window.len());
        self.window.copy_from_slice(samples);
        self.transform_window();
    }

    fn transform_window(&mut self) {
        apply_taper(&mut self.window, &self.taper);

        for (slot, &x) in self.buffer.iter_mut().zip(&self.window) {
            *slot = Complex::new(x, 0.0);
        }

        self.fft.process_with_scratch(&mut self.buffer, &mut self.scratch);

        for ((re, im), c) in self.real.iter_mut().zip(self.imag.iter_mut()).zip(&self.buffer) {
            *re = c.re;
            *im = c.im;
        }
    }

    /// Real part of the last spectrum
    pub fn real(&self) -> &[f32] {
        &self.real
    }

    /// Imaginary part of the last spectrum
    pub fn imag(&self) -> &[f32] {
        &self.imag
    }
}

impl fmt::Debug for SpectrumAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpectrumAnalyzer")
            .field("fft_length", &self.fft_length())
            .finish_non_exhaustive()
    }
}
