//! Engine configuration file format and operations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use ambifx_backend::{BackendFactory, NullBackendFactory};
use ambifx_core::{ChannelLayout, Device, PropertyKind};
use ambifx_registry::{Context, Effect, EffectRegistry, EffectSlot};

use crate::error::ConfigError;
use crate::param::{ParamValue, format_param_value, parse_param_value};

/// Output device section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceConfig {
    /// Output sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Channel layout name (mono, stereo, quad, 5.1, 6.1, 7.1, ambi0-3).
    #[serde(default = "default_layout")]
    pub layout: String,

    /// Frames rendered per mixer update.
    #[serde(default = "default_update_size")]
    pub update_size: usize,

    /// Output backend name.
    #[serde(default = "default_backend")]
    pub backend: String,
}

fn default_sample_rate() -> u32 {
    Device::DEFAULT_SAMPLE_RATE
}

fn default_layout() -> String {
    ChannelLayout::default().name().to_string()
}

fn default_update_size() -> usize {
    Device::DEFAULT_UPDATE_SIZE
}

fn default_backend() -> String {
    NullBackendFactory.name().to_string()
}

fn default_gain() -> f32 {
    EffectSlot::DEFAULT_GAIN
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self::from_device(&Device::default())
    }
}

impl DeviceConfig {
    /// Describe `device` on the null backend.
    pub fn from_device(device: &Device) -> Self {
        Self {
            sample_rate: device.sample_rate,
            layout: device.layout.name().to_string(),
            update_size: device.update_size,
            backend: default_backend(),
        }
    }

    /// Resolve the section into a device descriptor.
    pub fn to_device(&self) -> Result<Device, ConfigError> {
        let layout =
            ChannelLayout::from_name(&self.layout).ok_or_else(|| ConfigError::UnknownLayout(self.layout.clone()))?;
        if self.sample_rate == 0 {
            return Err(ConfigError::InvalidDevice {
                field: "sample_rate",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.update_size == 0 {
            return Err(ConfigError::InvalidDevice {
                field: "update_size",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(Device::new(self.sample_rate, layout).with_update_size(self.update_size))
    }

    /// Factory for the configured backend.
    pub fn backend_factory(&self) -> Result<Box<dyn BackendFactory>, ConfigError> {
        let null = NullBackendFactory;
        if self.backend.eq_ignore_ascii_case(null.name()) {
            Ok(Box::new(null))
        } else {
            Err(ConfigError::UnknownBackend(self.backend.clone()))
        }
    }
}

/// One effect slot: an effect id, the slot gain, and parameter values.
///
/// # Example
///
/// ```rust
/// use ambifx_config::SlotConfig;
///
/// let slot = SlotConfig::new("modulator")
///     .with_gain(0.8)
///     .with_param("frequency", "220Hz")
///     .with_param("waveform", "square");
///
/// assert_eq!(slot.get_param("frequency"), Some("220Hz"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotConfig {
    /// Effect id ("null", "modulator", "compressor").
    pub effect: String,

    /// Slot gain, 0.0 to 1.0.
    #[serde(default = "default_gain")]
    pub gain: f32,

    /// Parameter values keyed by property key.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
}

impl SlotConfig {
    /// A unity-gain slot with default parameters.
    pub fn new(effect: impl Into<String>) -> Self {
        Self {
            effect: effect.into(),
            gain: default_gain(),
            params: BTreeMap::new(),
        }
    }

    /// Set the slot gain.
    pub fn with_gain(mut self, gain: f32) -> Self {
        self.gain = gain;
        self
    }

    /// Add a parameter value.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Get a parameter value.
    pub fn get_param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Describe an effect and gain, writing every parameter explicitly.
    pub fn from_effect(effect: &Effect, gain: f32) -> Self {
        let table = effect.property_table();
        let props = effect.props();
        let params = table
            .descriptors()
            .iter()
            .filter_map(|desc| {
                let value = match desc.kind {
                    PropertyKind::Float => table.get_float(props, desc.id).ok()?,
                    _ => table.get_int(props, desc.id).ok()? as f32,
                };
                Some((desc.key.to_string(), format_param_value(desc, value)))
            })
            .collect();

        Self {
            effect: effect.effect_type().id().to_string(),
            gain,
            params,
        }
    }

    /// Build the effect this slot describes.
    ///
    /// Rejected values are also recorded on `ctx`.
    pub fn build_effect(&self, ctx: &mut Context, registry: &EffectRegistry) -> Result<Effect, ConfigError> {
        let factory = registry
            .factory_by_id(&self.effect)
            .map_err(|_| ConfigError::UnknownEffect(self.effect.clone()))?;

        let mut effect = Effect::new();
        effect.set_type(ctx, registry, factory.effect_type())?;

        let table = effect.property_table();
        for (key, value) in &self.params {
            let desc = table.descriptor(key).ok_or_else(|| ConfigError::UnknownParameter {
                effect: self.effect.clone(),
                param: key.clone(),
            })?;
            let parsed =
                parse_param_value(desc, value).map_err(|reason| ConfigError::invalid_parameter(&self.effect, key, reason))?;
            let result = match parsed {
                ParamValue::Int(v) => effect.set_int(ctx, desc.id, v),
                ParamValue::Float(v) => effect.set_float(ctx, desc.id, v),
            };
            result.map_err(|err| {
                let reason = match err {
                    ambifx_registry::Error::Property(ambifx_core::PropertyError::InvalidValue { reason, .. }) => {
                        format!("{reason} ({})", value.trim())
                    }
                    other => other.to_string(),
                };
                ConfigError::invalid_parameter(&self.effect, key, reason)
            })?;
        }

        Ok(effect)
    }

    /// Build a slot holding this effect, prepared for the context's device.
    pub fn build_slot(&self, index: usize, ctx: &mut Context, registry: &EffectRegistry) -> Result<EffectSlot, ConfigError> {
        if !(EffectSlot::MIN_GAIN..=EffectSlot::MAX_GAIN).contains(&self.gain) {
            return Err(ConfigError::InvalidGain { slot: index, gain: self.gain });
        }
        let effect = self.build_effect(ctx, registry)?;

        let mut slot = EffectSlot::new();
        slot.set_gain(ctx, self.gain)?;
        slot.apply_effect(ctx, registry, &effect)?;
        slot.update(ctx);
        Ok(slot)
    }
}

/// Complete engine configuration: one output device and its effect slots.
///
/// # TOML Format
///
/// ```toml
/// [device]
/// sample_rate = 48000
/// layout = "stereo"
/// update_size = 1024
/// backend = "null"
///
/// [[slots]]
/// effect = "modulator"
/// gain = 0.8
/// [slots.params]
/// frequency = "220Hz"
/// highpass_cutoff = "1.2kHz"
/// waveform = "square"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Output device.
    #[serde(default)]
    pub device: DeviceConfig,

    /// Effect slots, in processing order.
    #[serde(default)]
    pub slots: Vec<SlotConfig>,
}

impl EngineConfig {
    /// Create a configuration for `device` with no slots.
    pub fn new(device: &Device) -> Self {
        Self {
            device: DeviceConfig::from_device(device),
            slots: Vec::new(),
        }
    }

    /// Add a slot.
    pub fn with_slot(mut self, slot: SlotConfig) -> Self {
        self.slots.push(slot);
        self
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), slots = config.slots.len(), "loaded engine config");
        Ok(config)
    }

    /// Load a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the configuration to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Context for the configured device.
    pub fn context(&self) -> Result<Context, ConfigError> {
        Ok(Context::new(self.device.to_device()?))
    }

    /// Build every slot, in order, for the context's device.
    pub fn build_slots(&self, ctx: &mut Context, registry: &EffectRegistry) -> Result<Vec<EffectSlot>, ConfigError> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| slot.build_slot(i, ctx, registry))
            .collect()
    }

    /// Check the device, the backend, every effect id, parameter key and value.
    pub fn validate(&self, registry: &EffectRegistry) -> Result<(), ConfigError> {
        self.device.backend_factory()?;
        let mut ctx = self.context()?;
        self.build_slots(&mut ctx, registry)?;
        Ok(())
    }
}
