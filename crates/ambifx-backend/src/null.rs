//! Null output backend.
//!
//! Renders at the device's real-time rate and discards the result. Useful
//! for running the engine without audio hardware and for timing tests.
//!
//! ## Mixer Timing
//!
//! The mixer thread keeps a count of frames rendered since start and
//! compares it with the frames that should have elapsed on a monotonic
//! clock. It renders whole updates while it is behind and sleeps for half an
//! update period otherwise. If it falls more than a second behind (a
//! suspended process, say) it drops the backlog instead of bursting.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use ambifx_core::{BUFFER_SIZE, ChannelBuffer, Device, MixTarget};

use crate::backend::{Backend, BackendFactory, BackendType, DevProbe, RenderCallback};
use crate::{Error, Result};

/// The only device the null backend offers.
pub const NULL_DEVICE_NAME: &str = "No Output";

/// Factory for [`NullBackend`]. Playback only.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBackendFactory;

impl BackendFactory for NullBackendFactory {
    fn name(&self) -> &'static str {
        "null"
    }

    fn init(&self) -> bool {
        true
    }

    fn query_support(&self, kind: BackendType) -> bool {
        kind == BackendType::Playback
    }

    fn probe(&self, probe: DevProbe) -> Vec<String> {
        match probe {
            DevProbe::AllDevices => vec![NULL_DEVICE_NAME.to_string()],
            DevProbe::CaptureDevices => Vec::new(),
        }
    }

    fn create_backend(&self, device: &Device, kind: BackendType) -> Option<Box<dyn Backend>> {
        (kind == BackendType::Playback).then(|| Box::new(NullBackend::new(*device)) as Box<dyn Backend>)
    }
}

/// Backend that renders into a scratch bus and throws it away.
#[derive(Debug)]
pub struct NullBackend {
    device: Device,
    name: Option<&'static str>,
    kill: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl NullBackend {
    /// Creates an unopened backend for `device`.
    pub fn new(device: Device) -> Self {
        Self {
            device,
            name: None,
            kill: Arc::new(AtomicBool::new(false)),
            thread: None,
        }
    }

    /// The device format the mixer runs at.
    pub fn device(&self) -> &Device {
        &self.device
    }
}

impl Backend for NullBackend {
    fn open(&mut self, name: Option<&str>) -> Result<()> {
        match name {
            None => {}
            Some(name) if name == NULL_DEVICE_NAME => {}
            Some(name) => return Err(Error::DeviceNotFound(name.to_string())),
        }
        self.name = Some(NULL_DEVICE_NAME);
        tracing::debug!(device = NULL_DEVICE_NAME, "null backend opened");
        Ok(())
    }

    fn device_name(&self) -> Option<&str> {
        self.name
    }

    fn reset(&mut self, device: &mut Device) -> Result<()> {
        if self.name.is_none() {
            return Err(Error::NotOpen);
        }
        if device.update_size == 0 {
            device.update_size = Device::DEFAULT_UPDATE_SIZE;
        }
        self.device = *device;
        Ok(())
    }

    fn start(&mut self, callback: RenderCallback) -> Result<()> {
        if self.name.is_none() {
            return Err(Error::NotOpen);
        }
        if self.thread.is_some() {
            return Err(Error::AlreadyRunning);
        }

        self.kill.store(false, Ordering::Release);
        let kill = Arc::clone(&self.kill);
        let device = self.device;
        let handle = thread::Builder::new()
            .name("ambifx-null-mixer".into())
            .spawn(move || mixer_loop(device, &kill, callback))
            .map_err(Error::Thread)?;

        tracing::info!(
            sample_rate = device.sample_rate,
            update_size = device.update_size,
            "null backend started"
        );
        self.thread = Some(handle);
        Ok(())
    }

    fn stop(&mut self) {
        let Some(handle) = self.thread.take() else {
            return;
        };
        self.kill.store(true, Ordering::Release);
        if handle.join().is_err() {
            tracing::error!("null backend mixer thread panicked");
        } else {
            tracing::info!("null backend stopped");
        }
    }

    fn is_running(&self) -> bool {
        self.thread.is_some()
    }
}

impl Drop for NullBackend {
    fn drop(&mut self) {
        self.stop();
    }
}

fn mixer_loop(device: Device, kill: &AtomicBool, mut callback: RenderCallback) {
    let rate = u64::from(device.sample_rate.max(1));
    let update_size = device.update_size.max(1) as u64;
    let rest_time = Duration::from_micros(update_size * 1_000_000 / rate / 2);

    let mut bus: Vec<ChannelBuffer> = vec![[0.0; BUFFER_SIZE]; MixTarget::for_device(&device).channels];
    let mut start = Instant::now();
    let mut done: u64 = 0;

    while !kill.load(Ordering::Acquire) {
        let elapsed = start.elapsed();
        let due = elapsed.as_secs() * rate + u64::from(elapsed.subsec_nanos()) * rate / 1_000_000_000;

        if due.saturating_sub(done) < update_size {
            thread::sleep(rest_time);
            continue;
        }

        while due.saturating_sub(done) >= update_size {
            render_update(&mut bus, update_size as usize, &mut callback);
            done += update_size;
        }

        // Drop the backlog after a stall instead of catching up
        if due - done >= rate {
            tracing::debug!(skipped = due - done, "null backend fell behind");
            start = Instant::now();
            done = 0;
        }
    }
}

fn render_update(bus: &mut [ChannelBuffer], frames: usize, callback: &mut RenderCallback) {
    let mut remaining = frames;
    while remaining > 0 {
        let todo = remaining.min(BUFFER_SIZE);
        for channel in bus.iter_mut() {
            channel[..todo].fill(0.0);
        }
        callback(bus, todo);
        remaining -= todo;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambifx_core::ChannelLayout;

    #[test]
    fn factory_capabilities() {
        let factory = NullBackendFactory;
        assert!(factory.init());
        assert!(factory.query_support(BackendType::Playback));
        assert!(!factory.query_support(BackendType::Capture));
        assert!(!factory.query_support(BackendType::Loopback));
        assert_eq!(factory.probe(DevProbe::AllDevices), vec![NULL_DEVICE_NAME.to_string()]);
        assert!(factory.probe(DevProbe::CaptureDevices).is_empty());

        let device = Device::default();
        assert!(factory.create_backend(&device, BackendType::Capture).is_none());
        assert!(factory.create_backend(&device, BackendType::Playback).is_some());
    }

    #[test]
    fn open_accepts_only_null_device() {
        let mut backend = NullBackend::new(Device::default());
        assert!(matches!(backend.open(Some("Speakers")), Err(Error::DeviceNotFound(_))));
        assert_eq!(backend.device_name(), None);
        backend.open(Some(NULL_DEVICE_NAME)).unwrap();
        assert_eq!(backend.device_name(), Some(NULL_DEVICE_NAME));
        backend.open(None).unwrap();
    }

    #[test]
    fn start_requires_open() {
        let mut backend = NullBackend::new(Device::default());
        assert!(matches!(backend.start(Box::new(|_, _| {})), Err(Error::NotOpen)));
        let mut device = Device::default();
        assert!(matches!(backend.reset(&mut device), Err(Error::NotOpen)));
    }

    #[test]
    fn reset_fills_zero_update_size() {
        let mut backend = NullBackend::new(Device::default());
        backend.open(None).unwrap();
        let mut device = Device::new(22050, ChannelLayout::Mono).with_update_size(0);
        backend.reset(&mut device).unwrap();
        assert_eq!(device.update_size, Device::DEFAULT_UPDATE_SIZE);
        assert_eq!(backend.device().sample_rate, 22050);
    }

    #[test]
    fn render_update_splits_and_clears() {
        use std::sync::Mutex;

        let mut bus = vec![[1.0f32; BUFFER_SIZE]; 2];
        let sizes = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&sizes);
        let mut callback: RenderCallback = Box::new(move |bus: &mut [ChannelBuffer], frames| {
            assert!(bus.iter().all(|ch| ch[..frames].iter().all(|&s| s == 0.0)));
            for ch in bus.iter_mut() {
                ch[..frames].fill(0.5);
            }
            recorded.lock().unwrap().push(frames);
        });
        render_update(&mut bus, BUFFER_SIZE * 2 + 10, &mut callback);
        assert_eq!(*sizes.lock().unwrap(), vec![BUFFER_SIZE, BUFFER_SIZE, 10]);
    }
}
