//! ambifx Effects - effect states built on ambifx-core
//!
//! This crate provides the effect algorithms a host can place in a slot:
//!
//! - [`ModulatorState`] - Ring modulator with input high-pass and fixed-point carrier phase
//! - [`CompressorState`] - Automatic gain compressor driven by a geometric envelope
//! - [`NullState`] - Empty slot that outputs nothing
//!
//! Each comes with a property table ([`ModulatorProperties`],
//! [`CompressorProperties`], [`NullProperties`]) and a factory implementing
//! [`EffectStateFactory`](ambifx_core::EffectStateFactory).
//!
//! ## Example
//!
//! ```rust,ignore
//! use ambifx_core::{Device, EffectStateFactory, MixTarget, SlotParams};
//! use ambifx_effects::ModulatorStateFactory;
//!
//! let factory = ModulatorStateFactory;
//! let mut props = factory.default_props();
//! factory.property_table().set_float(&mut props, 0x0001, 220.0)?;
//!
//! let mut state = factory.create();
//! state.device_update(&device)?;
//! state.update(&device, &SlotParams::default(), &props, &MixTarget::for_device(&device));
//! state.process(samples, &input, &mut output);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod compressor;
pub mod modulator;
pub mod null;

// Re-export main types at crate root
pub use compressor::{CompressorProperties, CompressorState, CompressorStateFactory};
pub use modulator::{ModulatorProperties, ModulatorState, ModulatorStateFactory};
pub use null::{NullProperties, NullState, NullStateFactory};
