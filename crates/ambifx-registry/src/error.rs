//! Error types for host operations.

use ambifx_core::{AlError, EffectError, PropertyError};
use thiserror::Error;

/// Result type for host operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Host operation failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// No effect with the given string id is registered.
    #[error("unknown effect '{0}'")]
    UnknownEffect(String),

    /// The effect type is valid but no factory is registered for it.
    #[error("effect type 0x{0:04x} is not supported")]
    UnsupportedType(i32),

    /// A property access was rejected.
    #[error(transparent)]
    Property(#[from] PropertyError),

    /// An effect state could not be configured for the device.
    #[error(transparent)]
    Effect(#[from] EffectError),

    /// Slot gain outside 0.0 to 1.0.
    #[error("effect slot gain {0} out of range")]
    InvalidGain(f32),
}

impl Error {
    /// The error class reported through the context latch.
    pub fn al_error(&self) -> AlError {
        match self {
            Error::UnknownEffect(_) | Error::UnsupportedType(_) | Error::InvalidGain(_) => AlError::InvalidValue,
            Error::Property(err) => (*err).into(),
            Error::Effect(err) => (*err).into(),
        }
    }
}
