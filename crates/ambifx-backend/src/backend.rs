//! Backend factory contract.
//!
//! A [`BackendFactory`] represents one output driver. The engine asks each
//! factory whether it initializes and which backend types it supports,
//! probes it for device names, and creates a [`Backend`] for a device. The
//! backend owns the mixer: once started it repeatedly hands the render
//! callback a cleared output bus to fill.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────┐
//! │   Engine (slots, context)        │
//! └──────────────┬───────────────────┘
//!                │ RenderCallback
//!                ▼
//! ┌──────────────────────────────────┐
//! │   Backend: open/reset/start/stop │
//! └──────────────┬───────────────────┘
//!                │ created by
//!                ▼
//! ┌──────────────────────────────────┐
//! │   BackendFactory: init/probe     │
//! └──────────────────────────────────┘
//! ```
//!
//! Both traits are object-safe so the driver can be chosen at runtime.

use ambifx_core::{ChannelBuffer, Device};

use crate::Result;

/// Kind of stream a backend provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendType {
    /// Output to a device.
    Playback,
    /// Input from a device.
    Capture,
    /// Rendering without a device, driven by the application.
    Loopback,
}

/// Which device names to enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DevProbe {
    /// Playback devices.
    AllDevices,
    /// Capture devices.
    CaptureDevices,
}

/// Mixer callback.
///
/// Called on the backend's mixer thread with the output bus (one cleared
/// buffer per mix channel) and the number of frames to render, at most
/// [`BUFFER_SIZE`](ambifx_core::BUFFER_SIZE). It must not block.
pub type RenderCallback = Box<dyn FnMut(&mut [ChannelBuffer], usize) + Send>;

/// One output driver.
pub trait BackendFactory: Send + Sync {
    /// Driver name (e.g. "null").
    fn name(&self) -> &'static str;

    /// Prepares the driver. Returns `false` if it is unavailable on this system.
    fn init(&self) -> bool;

    /// Whether the driver can create backends of `kind`.
    fn query_support(&self, kind: BackendType) -> bool;

    /// Names of the devices of the probed kind.
    fn probe(&self, probe: DevProbe) -> Vec<String>;

    /// Creates a backend for `device`, or `None` if `kind` is unsupported.
    fn create_backend(&self, device: &Device, kind: BackendType) -> Option<Box<dyn Backend>>;
}

/// A device connection and its mixer.
pub trait Backend: Send {
    /// Opens a device by name, or the default device when `name` is `None`.
    fn open(&mut self, name: Option<&str>) -> Result<()>;

    /// Name of the open device.
    fn device_name(&self) -> Option<&str>;

    /// Negotiates the device format, adjusting `device` to what will be used.
    fn reset(&mut self, device: &mut Device) -> Result<()>;

    /// Starts the mixer.
    fn start(&mut self, callback: RenderCallback) -> Result<()>;

    /// Stops the mixer and waits for it to finish. Does nothing if stopped.
    fn stop(&mut self);

    /// Whether the mixer is running.
    fn is_running(&self) -> bool;
}
