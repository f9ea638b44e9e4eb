//! Fixed-point phase waveform generators.
//!
//! Phase is an integer index into one cycle of [`WAVEFORM_FRAC_ONE`] steps.
//! Advancing by an integer step and masking with [`WAVEFORM_FRAC_MASK`]
//! wraps exactly, so the phase never drifts no matter how long it runs or how
//! the samples are split across calls.
//!
//! ```text
//! index:  0 ─────────────── FRAC_ONE/2 ─────────────── FRAC_ONE
//! sine:   0 ↗ 1 ↘ 0                     ↘ -1 ↗ 0
//! saw:   -1 ─────────────────── 0 ──────────────────── ↗ 1
//! square:-1 ───────────────────┐ 1 ─────────────────────
//! ```

use core::f32::consts::TAU;
use libm::sinf;

/// Fractional bits of the phase index.
pub const WAVEFORM_FRAC_BITS: u32 = 24;
/// Phase index of one full cycle.
pub const WAVEFORM_FRAC_ONE: u32 = 1 << WAVEFORM_FRAC_BITS;
/// Mask wrapping a phase index into one cycle.
pub const WAVEFORM_FRAC_MASK: u32 = WAVEFORM_FRAC_ONE - 1;

/// User-selectable modulation waveform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Waveform {
    /// Sinusoid.
    #[default]
    Sine = 0,
    /// Rising ramp.
    Sawtooth = 1,
    /// Bipolar square.
    Square = 2,
}

impl Waveform {
    /// All waveforms, ordered by their integer value.
    pub const ALL: [Waveform; 3] = [Waveform::Sine, Waveform::Sawtooth, Waveform::Square];

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            Waveform::Sine => "Sine",
            Waveform::Sawtooth => "Sawtooth",
            Waveform::Square => "Square",
        }
    }

    /// Maps an integer parameter value to a waveform.
    pub const fn from_raw(value: i32) -> Option<Self> {
        match value {
            0 => Some(Waveform::Sine),
            1 => Some(Waveform::Sawtooth),
            2 => Some(Waveform::Square),
            _ => None,
        }
    }
}

/// Sinusoid at phase `index`.
#[inline]
pub fn sine(index: u32) -> f32 {
    sinf(index as f32 * (TAU / WAVEFORM_FRAC_ONE as f32))
}

/// Sawtooth from -1 to 1 over one cycle.
#[inline]
pub fn sawtooth(index: u32) -> f32 {
    index as f32 * (2.0 / WAVEFORM_FRAC_ONE as f32) - 1.0
}

/// -1 for the first half cycle, +1 for the second.
#[inline]
pub fn square(index: u32) -> f32 {
    (((index >> (WAVEFORM_FRAC_BITS - 2)) & 2) as i32 - 1) as f32
}

/// Constant unity.
#[inline]
pub fn one(_index: u32) -> f32 {
    1.0
}

/// Waveform generator selected for a modulation pass.
///
/// [`WaveGenerator::One`] is not user-selectable: it stands in for any
/// waveform whose step rounds to zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WaveGenerator {
    /// [`sine`]
    Sine,
    /// [`sawtooth`]
    Sawtooth,
    /// [`square`]
    Square,
    /// [`one`]
    #[default]
    One,
}

impl WaveGenerator {
    /// Picks the generator for `waveform` at a phase `step`. A zero step always selects [`WaveGenerator::One`].
    pub const fn select(waveform: Waveform, step: u32) -> Self {
        if step == 0 {
            return WaveGenerator::One;
        }
        match waveform {
            Waveform::Sine => WaveGenerator::Sine,
            Waveform::Sawtooth => WaveGenerator::Sawtooth,
            Waveform::Square => WaveGenerator::Square,
        }
    }

    /// Value at phase `index`.
    #[inline]
    pub fn sample(self, index: u32) -> f32 {
        match self {
            WaveGenerator::Sine => sine(index),
            WaveGenerator::Sawtooth => sawtooth(index),
            WaveGenerator::Square => square(index),
            WaveGenerator::One => one(index),
        }
    }

    /// Fills `dst`, advancing the phase by `step` before each sample.
    ///
    /// The first sample is taken at `index + step`. The caller's phase is not
    /// modified; advance it by `step * dst.len()`.
    pub fn fill(self, dst: &mut [f32], index: u32, step: u32) {
        match self {
            WaveGenerator::Sine => modulate(dst, index, step, sine),
            WaveGenerator::Sawtooth => modulate(dst, index, step, sawtooth),
            WaveGenerator::Square => modulate(dst, index, step, square),
            WaveGenerator::One => dst.fill(1.0),
        }
    }
}

#[inline]
fn modulate(dst: &mut [f32], mut index: u32, step: u32, func: fn(u32) -> f32) {
    for out in dst.iter_mut() {
        index = (index + step) & WAVEFORM_FRAC_MASK;
        *out = func(index);
    }
}
