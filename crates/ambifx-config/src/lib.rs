//! Engine configuration for ambifx.
//!
//! An engine configuration is a TOML file naming the output device and the
//! effect slots to run on it. Parameter values are strings read through the
//! effect's property descriptors, so units (`"1.2kHz"`), switches (`"off"`)
//! and labels (`"square"`) are accepted alongside plain numbers.
//!
//! # Example
//!
//! ```rust
//! use ambifx_config::{EngineConfig, SlotConfig};
//! use ambifx_core::Device;
//! use ambifx_registry::EffectRegistry;
//!
//! let config = EngineConfig::new(&Device::default())
//!     .with_slot(SlotConfig::new("modulator").with_param("frequency", "220Hz"))
//!     .with_slot(SlotConfig::new("compressor").with_gain(0.5));
//!
//! let registry = EffectRegistry::new();
//! config.validate(&registry).unwrap();
//!
//! let text = config.to_toml().unwrap();
//! assert_eq!(EngineConfig::from_toml(&text).unwrap(), config);
//! ```

mod engine;
mod error;
pub mod param;

pub use engine::{DeviceConfig, EngineConfig, SlotConfig};
pub use error::ConfigError;
pub use param::{ParamValue, format_param_value, parse_param_value};
