//! Parameter value parsing and formatting.
//!
//! Configuration files store every parameter as a string so that units and
//! labels survive a round trip. The property descriptor decides how a
//! string is read:
//!
//! | Kind  | Accepted                                         |
//! |-------|--------------------------------------------------|
//! | Float | `"440"`, `"440Hz"`, `"1.2kHz"`                   |
//! | Int   | `"3"`                                            |
//! | Bool  | `on`/`off`, `true`/`false`, `yes`/`no`, `1`/`0`  |
//! | Enum  | a label (`"square"`) or its index (`"2"`)        |

use ambifx_core::{PropertyDescriptor, PropertyKind};

/// A parsed value, tagged with the accessor it goes through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    /// Set with the integer accessor.
    Int(i32),
    /// Set with the float accessor.
    Float(f32),
}

/// Parse a numeric string into an f32.
///
/// Supports plain numbers (`"0.5"`, `"-3"`), Hertz (`"440Hz"`) and
/// kilohertz (`"1.2kHz"`, converted to Hz).
pub fn parse_number(value: &str) -> Option<f32> {
    let value = value.trim();

    if let Some(khz) = value
        .strip_suffix("kHz")
        .or_else(|| value.strip_suffix("khz"))
    {
        return khz.trim().parse::<f32>().ok().map(|v| v * 1000.0);
    }

    if let Some(hz) = value
        .strip_suffix("Hz")
        .or_else(|| value.strip_suffix("hz"))
    {
        return hz.trim().parse::<f32>().ok();
    }

    value.parse::<f32>().ok()
}

/// Parse a switch value: on/off, true/false, yes/no, 1/0.
pub fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Parse `value` for the property `desc`.
///
/// Only the format is checked here; range checks belong to the property
/// table. On failure returns a short reason.
pub fn parse_param_value(desc: &PropertyDescriptor, value: &str) -> Result<ParamValue, String> {
    match desc.kind {
        PropertyKind::Float => parse_number(value)
            .map(ParamValue::Float)
            .ok_or_else(|| format!("expected a number, got '{value}'")),
        PropertyKind::Int => value
            .trim()
            .parse::<i32>()
            .map(ParamValue::Int)
            .map_err(|_| format!("expected an integer, got '{value}'")),
        PropertyKind::Bool => parse_switch(value)
            .map(|on| ParamValue::Int(i32::from(on)))
            .ok_or_else(|| format!("expected on or off, got '{value}'")),
        PropertyKind::Enum(labels) => desc
            .label_index(value)
            .or_else(|| value.trim().parse::<i32>().ok())
            .map(ParamValue::Int)
            .ok_or_else(|| format!("expected one of {}, got '{value}'", labels.join(", ").to_lowercase())),
    }
}

/// Format a value for a configuration file, the inverse of [`parse_param_value`].
pub fn format_param_value(desc: &PropertyDescriptor, value: f32) -> String {
    match desc.kind {
        PropertyKind::Float => format!("{value}"),
        PropertyKind::Int => format!("{}", value as i32),
        PropertyKind::Bool => if value != 0.0 { "on" } else { "off" }.to_string(),
        PropertyKind::Enum(labels) => labels
            .get(value as usize)
            .map_or_else(|| format!("{}", value as i32), |l| l.to_lowercase()),
    }
}
