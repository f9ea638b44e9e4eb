//! Property tables: typed get/set dispatch over an effect's parameters.
//!
//! Hosts address parameters by numeric identifier and choose an integer or
//! float accessor, scalar or vector. Every effect type provides one
//! [`PropertyTable`] that validates the identifier, the accessor type and the
//! value range before touching its [`EffectProps`] variant.
//!
//! # Contract
//!
//! - Unknown identifier, wrong accessor type, or props of another effect type:
//!   [`PropertyError::InvalidEnum`]
//! - Known identifier, value out of range: [`PropertyError::InvalidValue`]
//! - On any error the props are left exactly as they were
//! - Vector accessors forward their first element to the scalar accessor
//!
//! Tables also publish [`PropertyDescriptor`]s so tooling can list, label
//! and parse parameters without knowing the effect type.

use alloc::format;
use alloc::string::String;

use crate::error::PropertyError;
use crate::props::EffectProps;

/// Storage type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// Integer value.
    Int,
    /// Floating-point value; the integer setter converts, the integer getter truncates.
    Float,
    /// Integer 0 or 1.
    Bool,
    /// Integer index into the given labels.
    Enum(&'static [&'static str]),
}

/// Unit used when formatting a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropertyUnit {
    /// Hertz (Hz).
    Hertz,
    /// Dimensionless.
    #[default]
    None,
}

impl PropertyUnit {
    /// Suffix appended to formatted values.
    pub const fn suffix(&self) -> &'static str {
        match self {
            PropertyUnit::Hertz => " Hz",
            PropertyUnit::None => "",
        }
    }
}

/// Metadata describing one property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyDescriptor {
    /// Numeric identifier used by the accessors.
    pub id: i32,
    /// Display name (e.g. "High-Pass Cutoff").
    pub name: &'static str,
    /// Stable lowercase key for configuration files (e.g. "highpass_cutoff").
    pub key: &'static str,
    /// Storage type.
    pub kind: PropertyKind,
    /// Display unit.
    pub unit: PropertyUnit,
    /// Smallest accepted value.
    pub min: f32,
    /// Largest accepted value.
    pub max: f32,
    /// Value a new effect starts with.
    pub default: f32,
}

impl PropertyDescriptor {
    /// Float property.
    pub const fn float(id: i32, name: &'static str, key: &'static str, min: f32, max: f32, default: f32) -> Self {
        Self {
            id,
            name,
            key,
            kind: PropertyKind::Float,
            unit: PropertyUnit::None,
            min,
            max,
            default,
        }
    }

    /// Boolean property stored as 0 or 1.
    pub const fn boolean(id: i32, name: &'static str, key: &'static str, default: bool) -> Self {
        Self {
            id,
            name,
            key,
            kind: PropertyKind::Bool,
            unit: PropertyUnit::None,
            min: 0.0,
            max: 1.0,
            default: if default { 1.0 } else { 0.0 },
        }
    }

    /// Enumerated property over `labels`, values `0..labels.len()`.
    pub const fn enumerated(
        id: i32,
        name: &'static str,
        key: &'static str,
        labels: &'static [&'static str],
        default: i32,
    ) -> Self {
        Self {
            id,
            name,
            key,
            kind: PropertyKind::Enum(labels),
            unit: PropertyUnit::None,
            min: 0.0,
            max: (labels.len() - 1) as f32,
            default: default as f32,
        }
    }

    /// Sets the display unit.
    pub const fn with_unit(mut self, unit: PropertyUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Returns `true` if `value` is inside the accepted range.
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Index of an enum label (case-insensitive), for [`PropertyKind::Enum`] properties.
    pub fn label_index(&self, label: &str) -> Option<i32> {
        match self.kind {
            PropertyKind::Enum(labels) => labels
                .iter()
                .position(|l| l.eq_ignore_ascii_case(label.trim()))
                .map(|i| i as i32),
            _ => None,
        }
    }

    /// Formats a value for display, using labels for enums and on/off for booleans.
    pub fn format_value(&self, value: f32) -> String {
        match self.kind {
            PropertyKind::Enum(labels) => labels
                .get(value as usize)
                .map_or_else(|| format!("{}", value as i32), |l| String::from(*l)),
            PropertyKind::Bool => String::from(if value != 0.0 { "On" } else { "Off" }),
            PropertyKind::Int => format!("{}{}", value as i32, self.unit.suffix()),
            PropertyKind::Float => format!("{:.1}{}", value, self.unit.suffix()),
        }
    }
}

/// Typed get/set dispatch for one effect type's parameters.
pub trait PropertyTable: Sync {
    /// Descriptors of every property, in identifier order.
    fn descriptors(&self) -> &'static [PropertyDescriptor];

    /// Looks a descriptor up by key or display name (case-insensitive).
    fn descriptor(&self, key: &str) -> Option<&'static PropertyDescriptor> {
        let key = key.trim();
        self.descriptors()
            .iter()
            .find(|d| d.key.eq_ignore_ascii_case(key) || d.name.eq_ignore_ascii_case(key))
    }

    /// Sets an integer property.
    fn set_int(&self, props: &mut EffectProps, param: i32, value: i32) -> Result<(), PropertyError>;

    /// Sets an integer property from the first element of `values`.
    fn set_int_v(&self, props: &mut EffectProps, param: i32, values: &[i32]) -> Result<(), PropertyError> {
        match values.first() {
            Some(&value) => self.set_int(props, param, value),
            None => Err(PropertyError::InvalidValue {
                param,
                reason: "empty value list",
            }),
        }
    }

    /// Sets a float property.
    fn set_float(&self, props: &mut EffectProps, param: i32, value: f32) -> Result<(), PropertyError>;

    /// Sets a float property from the first element of `values`.
    fn set_float_v(&self, props: &mut EffectProps, param: i32, values: &[f32]) -> Result<(), PropertyError> {
        match values.first() {
            Some(&value) => self.set_float(props, param, value),
            None => Err(PropertyError::InvalidValue {
                param,
                reason: "empty value list",
            }),
        }
    }

    /// Reads an integer property.
    fn get_int(&self, props: &EffectProps, param: i32) -> Result<i32, PropertyError>;

    /// Reads an integer property into the first element of `values`.
    fn get_int_v(&self, props: &EffectProps, param: i32, values: &mut [i32]) -> Result<(), PropertyError> {
        let value = self.get_int(props, param)?;
        match values.first_mut() {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(PropertyError::InvalidValue {
                param,
                reason: "empty value list",
            }),
        }
    }

    /// Reads a float property.
    fn get_float(&self, props: &EffectProps, param: i32) -> Result<f32, PropertyError>;

    /// Reads a float property into the first element of `values`.
    fn get_float_v(&self, props: &EffectProps, param: i32, values: &mut [f32]) -> Result<(), PropertyError> {
        let value = self.get_float(props, param)?;
        match values.first_mut() {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(PropertyError::InvalidValue {
                param,
                reason: "empty value list",
            }),
        }
    }
}
