//! Host context: the output device and the error latch.

use ambifx_core::{AlError, Device, MixTarget};

use crate::error::Error;

/// Owns the device description, its main mix bus, and the sticky error state.
///
/// The first recorded error is kept until [`take_error`](Self::take_error)
/// clears it; errors recorded while one is pending are logged and dropped.
#[derive(Debug, Clone)]
pub struct Context {
    device: Device,
    target: MixTarget,
    error: Option<AlError>,
}

impl Context {
    /// Creates a context for `device`.
    pub fn new(device: Device) -> Self {
        Self {
            device,
            target: MixTarget::for_device(&device),
            error: None,
        }
    }

    /// Output device.
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Main mix bus of the device.
    pub fn mix_target(&self) -> &MixTarget {
        &self.target
    }

    /// Replaces the device and rebuilds the mix bus. Slots must be told via `device_changed`.
    pub fn set_device(&mut self, device: Device) {
        tracing::info!(
            sample_rate = device.sample_rate,
            layout = device.layout.name(),
            channels = MixTarget::for_device(&device).channels,
            "context device changed"
        );
        self.device = device;
        self.target = MixTarget::for_device(&device);
    }

    /// Records a failed operation.
    pub fn record(&mut self, err: &Error) {
        let class = err.al_error();
        tracing::warn!(code = class.code(), "{err}");
        if self.error.is_none() {
            self.error = Some(class);
        }
    }

    /// Returns the pending error without clearing it.
    pub fn peek_error(&self) -> Option<AlError> {
        self.error
    }

    /// Returns and clears the pending error.
    pub fn take_error(&mut self) -> Option<AlError> {
        self.error.take()
    }

    /// Passes `result` through, recording its error if it failed.
    pub fn check<T>(&mut self, result: crate::Result<T>) -> crate::Result<T> {
        if let Err(err) = &result {
            self.record(err);
        }
        result
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(Device::default())
    }
}
