//! Effect-state contract and effect type identifiers.
//!
//! The [`EffectState`] trait is the uniform lifecycle the host drives for
//! every effect algorithm, and [`EffectStateFactory`] is how a host obtains
//! states, default parameters and the property table for one effect type.
//!
//! ## Lifecycle
//!
//! ```text
//! create ──► device_update ──► update ──► process ──► process ──► ...
//!                 ▲               │  ▲                   │
//!                 └── rate/layout─┘  └──── parameters ───┘
//! ```
//!
//! ## Design Decisions
//!
//! - **Object-safe**: the host stores `Box<dyn EffectState>` per slot and
//!   swaps algorithms at runtime.
//! - **Additive output**: `process` accumulates into the output bus so slots
//!   can share it; it never clears or overwrites.
//! - **No allocations**: `update` and `process` run without touching the heap.
//!   Only `device_update` may allocate, and it reports failure instead of
//!   aborting.
//! - **Borrowed output**: the output bus is passed to every `process` call and
//!   never retained by the state.

use alloc::boxed::Box;

use crate::MAX_EFFECT_CHANNELS;
use crate::device::Device;
use crate::error::EffectError;
use crate::mixer::ChannelBuffer;
use crate::pan::MixTarget;
use crate::props::EffectProps;
use crate::property::PropertyTable;

/// Effect type identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum EffectType {
    /// Pass-nothing placeholder.
    #[default]
    Null = 0x0000,
    /// Ring modulator with input high-pass.
    RingModulator = 0x0009,
    /// Automatic gain compressor.
    Compressor = 0x000B,
}

impl EffectType {
    /// All effect types, ordered by identifier.
    pub const ALL: [EffectType; 3] = [EffectType::Null, EffectType::RingModulator, EffectType::Compressor];

    /// Numeric identifier.
    pub const fn raw(self) -> i32 {
        self as i32
    }

    /// Maps a numeric identifier to an effect type.
    pub const fn from_raw(value: i32) -> Option<Self> {
        match value {
            0x0000 => Some(EffectType::Null),
            0x0009 => Some(EffectType::RingModulator),
            0x000B => Some(EffectType::Compressor),
            _ => None,
        }
    }

    /// Stable lowercase id used by configuration and the command line.
    pub const fn id(self) -> &'static str {
        match self {
            EffectType::Null => "null",
            EffectType::RingModulator => "modulator",
            EffectType::Compressor => "compressor",
        }
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            EffectType::Null => "Null",
            EffectType::RingModulator => "Ring Modulator",
            EffectType::Compressor => "Compressor",
        }
    }

    /// Looks an effect type up by its [`id`](Self::id) (case-insensitive).
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL.into_iter().find(|t| t.id().eq_ignore_ascii_case(id))
    }
}

/// Per-slot parameters an effect sees on every `update`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotParams {
    /// Slot output gain, 0.0 to 1.0.
    pub gain: f32,
    /// Number of wet channels carrying signal, at most [`MAX_EFFECT_CHANNELS`].
    pub wet_channels: usize,
}

impl SlotParams {
    /// Unity-gain slot with a first-order wet buffer.
    pub const fn new() -> Self {
        Self {
            gain: 1.0,
            wet_channels: MAX_EFFECT_CHANNELS,
        }
    }

    /// Sets the slot gain.
    pub const fn with_gain(mut self, gain: f32) -> Self {
        self.gain = gain;
        self
    }
}

impl Default for SlotParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle trait implemented by every effect algorithm.
///
/// A state is driven by exactly one host thread at a time; `Send` lets the
/// host move it onto the audio thread.
pub trait EffectState: Send {
    /// Recomputes everything that depends on the device's sample rate or layout.
    ///
    /// Clears filter history and current gains. Calling it twice with the same
    /// device leaves the state as one call would. On error the previous state
    /// remains usable.
    fn device_update(&mut self, device: &Device) -> Result<(), EffectError>;

    /// Applies new parameters.
    ///
    /// Recomputes coefficients and target gains for `target`. Current gains are
    /// left alone so the next `process` crossfades to the new targets. Props of
    /// another effect type are treated as that effect's defaults.
    fn update(&mut self, device: &Device, slot: &SlotParams, props: &EffectProps, target: &MixTarget);

    /// Processes `samples_to_do` samples of every `input` channel and adds the
    /// result into `output`.
    ///
    /// `samples_to_do` must not exceed [`BUFFER_SIZE`](crate::BUFFER_SIZE).
    fn process(&mut self, samples_to_do: usize, input: &[ChannelBuffer], output: &mut [ChannelBuffer]);
}

/// Creates states and exposes the parameter metadata of one effect type.
pub trait EffectStateFactory: Send + Sync {
    /// The effect type this factory builds.
    fn effect_type(&self) -> EffectType;

    /// Creates a state in its initial condition. Call `device_update` before use.
    fn create(&self) -> Box<dyn EffectState>;

    /// Parameter block a new effect of this type starts with.
    fn default_props(&self) -> EffectProps;

    /// Property table validating this type's parameters.
    fn property_table(&self) -> &'static dyn PropertyTable;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_ids() {
        assert_eq!(EffectType::Null.raw(), 0x0000);
        assert_eq!(EffectType::RingModulator.raw(), 0x0009);
        assert_eq!(EffectType::Compressor.raw(), 0x000B);
        for t in EffectType::ALL {
            assert_eq!(EffectType::from_raw(t.raw()), Some(t));
        }
        assert_eq!(EffectType::from_raw(0x0001), None);
    }

    #[test]
    fn string_ids() {
        assert_eq!(EffectType::from_id("Modulator"), Some(EffectType::RingModulator));
        assert_eq!(EffectType::from_id(" compressor "), Some(EffectType::Compressor));
        assert_eq!(EffectType::from_id("reverb"), None);
    }

    #[test]
    fn slot_defaults() {
        let slot = SlotParams::default();
        assert_eq!(slot.gain, 1.0);
        assert_eq!(slot.wet_channels, MAX_EFFECT_CHANNELS);
        assert_eq!(slot.with_gain(0.5).gain, 0.5);
    }
}
