//! ambifx Core - effect-state contract and DSP primitives
//!
//! This crate provides the foundation shared by every ambifx effect: the
//! lifecycle contract the host drives, the parameter blocks and their
//! validation tables, and the small set of DSP building blocks the effects
//! are made of. Nothing in the audio path allocates.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`EffectState`] - Object-safe lifecycle trait (`device_update`, `update`, `process`)
//! - [`EffectStateFactory`] - Creates states and exposes defaults and property tables
//! - [`EffectProps`] - Tagged parameter block for every effect type
//! - [`PropertyTable`] - Integer/float get/set dispatch with range validation
//!
//! ## Mixing
//!
//! - [`ChannelGains`] - Current/target gain pair per output channel
//! - [`mix_samples`] - Accumulate a channel into the output bus with a gain ramp
//! - [`compute_pan_gains`] - Gains for one ambisonic coefficient row
//!
//! ## DSP
//!
//! - [`BiquadFilter`] - Second-order IIR filter on normalized frequency
//! - [`WaveGenerator`] - Fixed-point phase waveform synthesis
//! - [`EnvelopeFollower`] - Bounded geometric envelope follower
//!
//! # no_std Support
//!
//! Disable the default `std` feature to build for embedded targets:
//!
//! ```toml
//! [dependencies]
//! ambifx-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use ambifx_core::{EffectState, Device, MixTarget, SlotParams};
//!
//! let device = Device::default();
//! let target = MixTarget::for_device(&device);
//! state.device_update(&device)?;
//! state.update(&device, &SlotParams::default(), &props, &target);
//! state.process(samples, &input, &mut output);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod biquad;
pub mod device;
pub mod effect;
pub mod envelope;
pub mod error;
pub mod mixer;
pub mod pan;
pub mod props;
pub mod property;
pub mod waveform;

/// Maximum number of output (device bus) channels.
pub const MAX_OUTPUT_CHANNELS: usize = 16;

/// Highest supported ambisonic order.
pub const MAX_AMBI_ORDER: usize = 3;

/// Number of ambisonic channels at [`MAX_AMBI_ORDER`].
pub const MAX_AMBI_CHANNELS: usize = (MAX_AMBI_ORDER + 1) * (MAX_AMBI_ORDER + 1);

/// Channels in an effect slot's wet buffer (first-order B-Format).
pub const MAX_EFFECT_CHANNELS: usize = 4;

/// Maximum number of samples a single `process` call may handle.
pub const BUFFER_SIZE: usize = 2048;

/// Gains at or below this level (-100 dB) are treated as silent.
pub const GAIN_SILENCE_THRESHOLD: f32 = 0.00001;

// Re-export main types at crate root
pub use biquad::{BiquadFilter, BiquadType, rcp_q_from_bandwidth};
pub use device::{ChannelLayout, Device};
pub use effect::{EffectState, EffectStateFactory, EffectType, SlotParams};
pub use envelope::EnvelopeFollower;
pub use error::{AlError, EffectError, PropertyError};
pub use mixer::{ChannelBuffer, ChannelGains, mix_samples};
pub use pan::{BFChannelConfig, MixTarget, ambi_identity_row, compute_pan_gains};
pub use props::{CompressorProps, EffectProps, ModulatorProps};
pub use property::{PropertyDescriptor, PropertyKind, PropertyTable, PropertyUnit};
pub use waveform::{
    WAVEFORM_FRAC_BITS, WAVEFORM_FRAC_MASK, WAVEFORM_FRAC_ONE, WaveGenerator, Waveform,
};
