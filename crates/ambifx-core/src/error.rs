//! Error types shared by effects and hosts.
//!
//! Parameter validation failures ([`PropertyError`]) and device
//! reconfiguration failures ([`EffectError`]) are distinct types so each
//! call site only handles what it can actually produce. Hosts that report
//! errors through a single latch fold both into [`AlError`].

use thiserror::Error;

/// Rejected property access. The stored parameters are never modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// Unknown property id, or an accessor of the wrong type for the id.
    #[error("invalid property 0x{param:04x}")]
    InvalidEnum {
        /// Identifier passed by the caller.
        param: i32,
    },

    /// Known property, value outside its documented range.
    #[error("{reason} (property 0x{param:04x})")]
    InvalidValue {
        /// Identifier passed by the caller.
        param: i32,
        /// What was wrong with the value.
        reason: &'static str,
    },
}

/// Failure to (re)configure an effect state for a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EffectError {
    /// A resource the state needs could not be allocated.
    #[error("out of memory allocating {what}")]
    OutOfMemory {
        /// The resource that could not be allocated.
        what: &'static str,
    },
}

/// Host-facing error classes with their numeric wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum AlError {
    /// Invalid enumeration value (`0xA002`).
    #[error("invalid enum")]
    InvalidEnum,
    /// Invalid value (`0xA003`).
    #[error("invalid value")]
    InvalidValue,
    /// Invalid operation for the current state (`0xA004`).
    #[error("invalid operation")]
    InvalidOperation,
    /// Allocation failure (`0xA005`).
    #[error("out of memory")]
    OutOfMemory,
}

impl AlError {
    /// Numeric error code.
    pub const fn code(self) -> i32 {
        match self {
            AlError::InvalidEnum => 0xA002,
            AlError::InvalidValue => 0xA003,
            AlError::InvalidOperation => 0xA004,
            AlError::OutOfMemory => 0xA005,
        }
    }
}

impl From<PropertyError> for AlError {
    fn from(err: PropertyError) -> Self {
        match err {
            PropertyError::InvalidEnum { .. } => AlError::InvalidEnum,
            PropertyError::InvalidValue { .. } => AlError::InvalidValue,
        }
    }
}

impl From<EffectError> for AlError {
    fn from(err: EffectError) -> Self {
        match err {
            EffectError::OutOfMemory { .. } => AlError::OutOfMemory,
        }
    }
}
