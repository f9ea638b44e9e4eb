//! Effect registry and host objects for ambifx.
//!
//! This crate is the host side of the effect-state contract. It owns the
//! list of effect factories and provides the objects an application drives:
//!
//! - [`EffectRegistry`] - Factory lookup by type or string id, with metadata
//! - [`Context`] - Output device, its mix bus, and the sticky error latch
//! - [`Effect`] - An effect type plus a validated parameter block
//! - [`EffectSlot`] - Owns one live effect state and feeds it parameters
//!
//! # Example
//!
//! ```rust
//! use ambifx_core::{EffectType, Device};
//! use ambifx_registry::{Context, Effect, EffectRegistry, EffectSlot};
//! use ambifx_effects::ModulatorProperties;
//!
//! let registry = EffectRegistry::new();
//! let mut ctx = Context::new(Device::default());
//!
//! let mut effect = Effect::new();
//! effect.set_type(&mut ctx, &registry, EffectType::RingModulator).unwrap();
//! effect.set_float(&mut ctx, ModulatorProperties::FREQUENCY, 220.0).unwrap();
//!
//! let mut slot = EffectSlot::new();
//! slot.apply_effect(&mut ctx, &registry, &effect).unwrap();
//! slot.update(&ctx);
//! ```

pub mod context;
pub mod effect;
pub mod error;
pub mod slot;

pub use context::Context;
pub use effect::Effect;
pub use error::{Error, Result};
pub use slot::EffectSlot;

use ambifx_core::{EffectState, EffectStateFactory, EffectType};
use ambifx_effects::{CompressorStateFactory, ModulatorStateFactory, NullStateFactory};

/// Category of audio effect for organization and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectCategory {
    /// Dynamics processing (compressor)
    Dynamics,
    /// Modulation effects (ring modulator)
    Modulation,
    /// Utility effects (null)
    Utility,
}

impl EffectCategory {
    /// Returns a human-readable name for the category.
    pub const fn name(&self) -> &'static str {
        match self {
            EffectCategory::Dynamics => "Dynamics",
            EffectCategory::Modulation => "Modulation",
            EffectCategory::Utility => "Utility",
        }
    }

    /// Returns a description of the category.
    pub const fn description(&self) -> &'static str {
        match self {
            EffectCategory::Dynamics => "Compressors and other dynamics processors",
            EffectCategory::Modulation => "Ring modulators and other modulation effects",
            EffectCategory::Utility => "Placeholders and utility processors",
        }
    }
}

/// Describes an effect in the registry.
#[derive(Debug, Clone)]
pub struct EffectDescriptor {
    /// Effect type built by the factory.
    pub effect_type: EffectType,
    /// Unique identifier for the effect (lowercase, no spaces).
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Brief description of the effect.
    pub description: &'static str,
    /// Category for organization.
    pub category: EffectCategory,
}

/// Internal entry in the registry.
struct RegistryEntry {
    descriptor: EffectDescriptor,
    factory: Box<dyn EffectStateFactory>,
}

/// Registry of all available effect factories.
///
/// Built once by the host and only read afterwards; it can be shared
/// between threads by reference.
pub struct EffectRegistry {
    entries: Vec<RegistryEntry>,
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectRegistry {
    /// Create a new registry with all built-in effects registered.
    pub fn new() -> Self {
        let mut registry = Self {
            entries: Vec::with_capacity(3),
        };
        registry.register_builtin_effects();
        registry
    }

    /// Register all built-in effects.
    fn register_builtin_effects(&mut self) {
        // Null
        self.register(
            EffectDescriptor {
                effect_type: EffectType::Null,
                id: EffectType::Null.id(),
                name: EffectType::Null.name(),
                description: "Empty slot that outputs nothing",
                category: EffectCategory::Utility,
            },
            Box::new(NullStateFactory),
        );

        // Ring Modulator
        self.register(
            EffectDescriptor {
                effect_type: EffectType::RingModulator,
                id: EffectType::RingModulator.id(),
                name: EffectType::RingModulator.name(),
                description: "Ring modulator with input high-pass and sine/saw/square carrier",
                category: EffectCategory::Modulation,
            },
            Box::new(ModulatorStateFactory),
        );

        // Compressor
        self.register(
            EffectDescriptor {
                effect_type: EffectType::Compressor,
                id: EffectType::Compressor.id(),
                name: EffectType::Compressor.name(),
                description: "Automatic gain compressor with 100 ms attack and 200 ms release",
                category: EffectCategory::Dynamics,
            },
            Box::new(CompressorStateFactory),
        );
    }

    /// Registers a factory, replacing any earlier factory for the same effect type.
    pub fn register(&mut self, descriptor: EffectDescriptor, factory: Box<dyn EffectStateFactory>) {
        debug_assert_eq!(descriptor.effect_type, factory.effect_type());
        self.entries.retain(|e| e.descriptor.effect_type != descriptor.effect_type);
        self.entries.push(RegistryEntry { descriptor, factory });
    }

    /// Returns descriptors for all registered effects.
    pub fn all_effects(&self) -> Vec<&EffectDescriptor> {
        self.entries.iter().map(|e| &e.descriptor).collect()
    }

    /// Returns descriptors for effects in a specific category.
    pub fn effects_in_category(&self, category: EffectCategory) -> Vec<&EffectDescriptor> {
        self.entries
            .iter()
            .filter(|e| e.descriptor.category == category)
            .map(|e| &e.descriptor)
            .collect()
    }

    /// Looks up a descriptor by string id (case-insensitive).
    pub fn descriptor(&self, id: &str) -> Option<&EffectDescriptor> {
        self.entry_by_id(id).map(|e| &e.descriptor)
    }

    /// Factory for an effect type.
    pub fn factory(&self, effect_type: EffectType) -> Option<&dyn EffectStateFactory> {
        self.entries
            .iter()
            .find(|e| e.descriptor.effect_type == effect_type)
            .map(|e| e.factory.as_ref())
    }

    /// Factory for a string id.
    pub fn factory_by_id(&self, id: &str) -> Result<&dyn EffectStateFactory> {
        self.entry_by_id(id)
            .map(|e| e.factory.as_ref())
            .ok_or_else(|| Error::UnknownEffect(id.to_string()))
    }

    /// Creates a fresh state for an effect type.
    pub fn create(&self, effect_type: EffectType) -> Option<Box<dyn EffectState>> {
        self.factory(effect_type).map(|f| f.create())
    }

    /// Returns the number of registered effects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no effects are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_by_id(&self, id: &str) -> Option<&RegistryEntry> {
        let id = id.trim();
        self.entries.iter().find(|e| e.descriptor.id.eq_ignore_ascii_case(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_effects_registered() {
        let registry = EffectRegistry::new();
        assert_eq!(registry.len(), 3);
        for effect_type in EffectType::ALL {
            let factory = registry.factory(effect_type).unwrap();
            assert_eq!(factory.effect_type(), effect_type);
        }
    }

    #[test]
    fn lookup_by_id() {
        let registry = EffectRegistry::new();
        let desc = registry.descriptor("Modulator").unwrap();
        assert_eq!(desc.effect_type, EffectType::RingModulator);
        assert_eq!(desc.category, EffectCategory::Modulation);
        assert!(registry.descriptor("reverb").is_none());
        assert!(matches!(registry.factory_by_id("reverb"), Err(Error::UnknownEffect(_))));
    }

    #[test]
    fn categories() {
        let registry = EffectRegistry::new();
        let dynamics = registry.effects_in_category(EffectCategory::Dynamics);
        assert_eq!(dynamics.len(), 1);
        assert_eq!(dynamics[0].id, "compressor");
    }

    #[test]
    fn register_replaces_same_type() {
        let mut registry = EffectRegistry::new();
        registry.register(
            EffectDescriptor {
                effect_type: EffectType::Compressor,
                id: "compressor",
                name: "Compressor",
                description: "replacement",
                category: EffectCategory::Dynamics,
            },
            Box::new(CompressorStateFactory),
        );
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.descriptor("compressor").unwrap().description, "replacement");
    }
}
