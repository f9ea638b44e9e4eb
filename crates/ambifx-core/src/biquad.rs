//! Biquad (bi-quadratic) filter structure.
//!
//! A second-order IIR filter configured from a normalized frequency
//! (`f0 / sample_rate`) and a reciprocal Q, so coefficient setup does not
//! need to know the device rate. Effects configure one instance and copy its
//! coefficients to the rest of their channels.
//!
//! Coefficient calculation uses the RBJ Audio EQ Cookbook formulas.

use core::f32::consts::{LN_2, TAU};
use libm::{cosf, sinf, sinhf};

/// Filter response selected by [`BiquadFilter::set_params`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiquadType {
    /// Attenuates below the cutoff.
    HighPass,
}

/// Generic biquad filter coefficients and state.
///
/// Implements the Direct Form I biquad structure:
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BiquadFilter {
    /// Feedforward coefficients
    b0: f32,
    b1: f32,
    b2: f32,

    /// Feedback coefficients, normalized by a0
    a1: f32,
    a2: f32,

    /// Input delay line: x[n-1], x[n-2]
    x1: f32,
    x2: f32,

    /// Output delay line: y[n-1], y[n-2]
    y1: f32,
    y2: f32,
}

impl BiquadFilter {
    /// Creates a new biquad with passthrough coefficients.
    pub const fn new() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Sets the filter response.
    ///
    /// # Arguments
    ///
    /// * `kind` - Response type
    /// * `gain` - Linear gain; pass and cut responses ignore it
    /// * `f0norm` - Cutoff frequency divided by the sample rate, below 0.5
    /// * `rcp_q` - Reciprocal of the filter Q (see [`rcp_q_from_bandwidth`])
    ///
    /// The filter history is left untouched so a running signal does not click.
    pub fn set_params(&mut self, kind: BiquadType, _gain: f32, f0norm: f32, rcp_q: f32) {
        let w0 = TAU * f0norm;
        let sin_w0 = sinf(w0);
        let cos_w0 = cosf(w0);
        let alpha = sin_w0 / 2.0 * rcp_q;

        let (b0, b1, b2, a0, a1, a2) = match kind {
            BiquadType::HighPass => (
                (1.0 + cos_w0) / 2.0,
                -(1.0 + cos_w0),
                (1.0 + cos_w0) / 2.0,
                1.0 + alpha,
                -2.0 * cos_w0,
                1.0 - alpha,
            ),
        };

        let a0_inv = 1.0 / a0;
        self.b0 = b0 * a0_inv;
        self.b1 = b1 * a0_inv;
        self.b2 = b2 * a0_inv;
        self.a1 = a1 * a0_inv;
        self.a2 = a2 * a0_inv;
    }

    /// Copies another filter's coefficients, keeping this filter's history.
    pub fn copy_params_from(&mut self, other: &BiquadFilter) {
        self.b0 = other.b0;
        self.b1 = other.b1;
        self.b2 = other.b2;
        self.a1 = other.a1;
        self.a2 = other.a2;
    }

    /// Processes a single sample through the filter.
    #[inline]
    pub fn process_sample(&mut self, input: f32) -> f32 {
        let output = self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Filters `src` into `dst`. Both slices must have the same length.
    pub fn process(&mut self, dst: &mut [f32], src: &[f32]) {
        debug_assert_eq!(dst.len(), src.len());
        for (out, &input) in dst.iter_mut().zip(src) {
            *out = self.process_sample(input);
        }
    }

    /// Clears the filter state (delay lines) without changing coefficients.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

impl Default for BiquadFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reciprocal Q for a bandwidth given in octaves at normalized frequency `f0norm`.
pub fn rcp_q_from_bandwidth(f0norm: f32, bandwidth: f32) -> f32 {
    let w0 = TAU * f0norm;
    2.0 * sinhf(LN_2 / 2.0 * bandwidth * w0 / sinf(w0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(filter: &mut BiquadFilter, input: f32, samples: usize) -> f32 {
        let mut output = 0.0;
        for _ in 0..samples {
            output = filter.process_sample(input);
        }
        output
    }

    #[test]
    fn test_biquad_passthrough() {
        let mut biquad = BiquadFilter::new();

        for i in 0..10 {
            let input = i as f32 * 0.1;
            let output = biquad.process_sample(input);
            assert!((output - input).abs() < 0.0001);
        }
    }

    #[test]
    fn test_biquad_clear() {
        let mut biquad = BiquadFilter::new();
        biquad.set_params(BiquadType::HighPass, 1.0, 0.05, 1.414);
        settle(&mut biquad, 1.0, 10);

        biquad.clear();

        assert_eq!(biquad.x1, 0.0);
        assert_eq!(biquad.x2, 0.0);
        assert_eq!(biquad.y1, 0.0);
        assert_eq!(biquad.y2, 0.0);
    }

    #[test]
    fn test_highpass_blocks_dc() {
        let mut biquad = BiquadFilter::new();
        biquad.set_params(BiquadType::HighPass, 1.0, 800.0 / 48000.0, 1.414);

        let output = settle(&mut biquad, 1.0, 4000);
        assert!(output.abs() < 0.001, "DC should be removed, got {}", output);
    }

    #[test]
    fn test_highpass_passes_nyquist() {
        let mut biquad = BiquadFilter::new();
        biquad.set_params(BiquadType::HighPass, 1.0, 800.0 / 48000.0, 1.414);

        let mut output = 0.0;
        for i in 0..4000 {
            let input = if i % 2 == 0 { 1.0 } else { -1.0 };
            output = biquad.process_sample(input);
        }
        assert!((output.abs() - 1.0).abs() < 0.01, "Nyquist should pass, got {}", output);
    }

    #[test]
    fn test_highpass_ignores_gain() {
        let mut quiet = BiquadFilter::new();
        quiet.set_params(BiquadType::HighPass, 0.1, 0.02, 1.0);
        let mut loud = BiquadFilter::new();
        loud.set_params(BiquadType::HighPass, 10.0, 0.02, 1.0);

        assert_eq!((quiet.b0, quiet.b1, quiet.b2), (loud.b0, loud.b1, loud.b2));
        assert_eq!((quiet.a1, quiet.a2), (loud.a1, loud.a2));
    }

    #[test]
    fn test_copy_params_keeps_history() {
        let mut a = BiquadFilter::new();
        a.set_params(BiquadType::HighPass, 1.0, 0.01, 1.0);
        let mut b = BiquadFilter::new();
        settle(&mut b, 0.5, 4);

        b.copy_params_from(&a);
        assert_eq!(b.b0, a.b0);
        assert_eq!(b.a2, a.a2);
        assert_eq!(b.x1, 0.5);
    }

    #[test]
    fn test_block_matches_per_sample() {
        let mut a = BiquadFilter::new();
        a.set_params(BiquadType::HighPass, 1.0, 0.02, 0.8);
        let mut b = a.clone();

        let src: [f32; 16] = core::array::from_fn(|i| (i as f32 * 0.3).sin());
        let mut dst = [0.0; 16];
        a.process(&mut dst, &src);

        for (&x, &y) in src.iter().zip(dst.iter()) {
            assert_eq!(b.process_sample(x), y);
        }
    }

    #[test]
    fn test_rcp_q_from_bandwidth_finite() {
        let rq = rcp_q_from_bandwidth(800.0 / 48000.0, 0.75);
        assert!(rq.is_finite() && rq > 0.0);
    }
}
