//! Effect parameter blocks.
//!
//! [`EffectProps`] is the plain-value parameter block a host stores per
//! effect object and hands to `EffectState::update`. Each variant carries
//! the documented range and default constants of its parameters; the
//! property tables in `ambifx-effects` enforce them.

use crate::waveform::Waveform;

/// Ring modulator parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModulatorProps {
    /// Carrier frequency in Hz.
    pub frequency: f32,
    /// High-pass cutoff applied to the input before modulation, in Hz.
    pub high_pass_cutoff: f32,
    /// Carrier waveform.
    pub waveform: Waveform,
}

impl ModulatorProps {
    /// Lowest carrier frequency in Hz.
    pub const MIN_FREQUENCY: f32 = 0.0;
    /// Highest carrier frequency in Hz.
    pub const MAX_FREQUENCY: f32 = 8000.0;
    /// Default carrier frequency in Hz.
    pub const DEFAULT_FREQUENCY: f32 = 440.0;

    /// Lowest high-pass cutoff in Hz.
    pub const MIN_HIGHPASS_CUTOFF: f32 = 0.0;
    /// Highest high-pass cutoff in Hz.
    pub const MAX_HIGHPASS_CUTOFF: f32 = 24000.0;
    /// Default high-pass cutoff in Hz.
    pub const DEFAULT_HIGHPASS_CUTOFF: f32 = 800.0;

    /// Lowest waveform value.
    pub const MIN_WAVEFORM: i32 = Waveform::Sine as i32;
    /// Highest waveform value.
    pub const MAX_WAVEFORM: i32 = Waveform::Square as i32;
    /// Default waveform.
    pub const DEFAULT_WAVEFORM: Waveform = Waveform::Sine;
}

impl Default for ModulatorProps {
    fn default() -> Self {
        Self {
            frequency: Self::DEFAULT_FREQUENCY,
            high_pass_cutoff: Self::DEFAULT_HIGHPASS_CUTOFF,
            waveform: Self::DEFAULT_WAVEFORM,
        }
    }
}

/// Compressor parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressorProps {
    /// Whether compression is engaged.
    pub on_off: bool,
}

impl CompressorProps {
    /// Lowest on/off value.
    pub const MIN_ONOFF: i32 = 0;
    /// Highest on/off value.
    pub const MAX_ONOFF: i32 = 1;
    /// Default on/off value.
    pub const DEFAULT_ONOFF: bool = true;
}

impl Default for CompressorProps {
    fn default() -> Self {
        Self {
            on_off: Self::DEFAULT_ONOFF,
        }
    }
}

/// Parameter block of any effect type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EffectProps {
    /// The null effect has no parameters.
    #[default]
    Null,
    /// Ring modulator parameters.
    Modulator(ModulatorProps),
    /// Compressor parameters.
    Compressor(CompressorProps),
}

impl EffectProps {
    /// Modulator parameters, if this block holds them.
    pub fn as_modulator(&self) -> Option<&ModulatorProps> {
        match self {
            EffectProps::Modulator(props) => Some(props),
            _ => None,
        }
    }

    /// Mutable modulator parameters, if this block holds them.
    pub fn as_modulator_mut(&mut self) -> Option<&mut ModulatorProps> {
        match self {
            EffectProps::Modulator(props) => Some(props),
            _ => None,
        }
    }

    /// Compressor parameters, if this block holds them.
    pub fn as_compressor(&self) -> Option<&CompressorProps> {
        match self {
            EffectProps::Compressor(props) => Some(props),
            _ => None,
        }
    }

    /// Mutable compressor parameters, if this block holds them.
    pub fn as_compressor_mut(&mut self) -> Option<&mut CompressorProps> {
        match self {
            EffectProps::Compressor(props) => Some(props),
            _ => None,
        }
    }
}
