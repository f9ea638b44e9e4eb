//! Output backends and WAV I/O for ambifx.
//!
//! This crate defines how the engine reaches an output device:
//!
//! - [`BackendFactory`] - Probes devices and creates backends for one driver
//! - [`Backend`] - Opens a device, negotiates its format, and runs the mixer
//! - [`NullBackendFactory`] / [`NullBackend`] - Discards output at real-time pace
//! - [`wav`] - Reading and writing multichannel WAV files with `hound`
//!
//! # Example
//!
//! ```rust,no_run
//! use ambifx_backend::{BackendFactory, BackendType, NullBackendFactory};
//! use ambifx_core::Device;
//!
//! let factory = NullBackendFactory;
//! assert!(factory.init());
//!
//! let mut device = Device::default();
//! let mut backend = factory.create_backend(&device, BackendType::Playback).unwrap();
//! backend.open(None)?;
//! backend.reset(&mut device)?;
//! backend.start(Box::new(|bus, frames| {
//!     // Mix `frames` samples of every slot into `bus`
//!     let _ = (bus, frames);
//! }))?;
//! backend.stop();
//! # Ok::<(), ambifx_backend::Error>(())
//! ```

pub mod backend;
pub mod null;
pub mod wav;

pub use backend::{Backend, BackendFactory, BackendType, DevProbe, RenderCallback};
pub use null::{NULL_DEVICE_NAME, NullBackend, NullBackendFactory};
pub use wav::{WavInfo, WavSpec, deinterleave, interleave, read_wav, read_wav_info, write_wav};

use thiserror::Error;

/// Errors that can occur in backends and WAV I/O.
#[derive(Debug, Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The requested device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// The backend has no open device.
    #[error("Backend has no open device")]
    NotOpen,

    /// The mixer is already running.
    #[error("Backend is already running")]
    AlreadyRunning,

    /// The mixer thread could not be started.
    #[error("Failed to start mixer thread: {0}")]
    Thread(#[source] std::io::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for backend operations.
pub type Result<T> = std::result::Result<T, Error>;
