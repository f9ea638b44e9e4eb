//! Real-time run on an output backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use ambifx_backend::BackendType;
use ambifx_registry::EffectRegistry;
use clap::Args;

use super::common::{SlotArgs, checked_duration, peak};
use crate::engine::{Engine, ToneGenerator};

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    slots: SlotArgs,

    /// Output device name (default device when omitted)
    #[arg(short, long)]
    device: Option<String>,

    /// How long to run, in seconds
    #[arg(long, default_value = "1.0")]
    duration: f32,

    /// Test tone frequency in Hz
    #[arg(long, default_value = "440.0")]
    tone: f32,

    /// Test tone amplitude (0-1)
    #[arg(long, default_value = "0.8")]
    amplitude: f32,
}

pub fn run(args: RunArgs) -> anyhow::Result<()> {
    let duration = checked_duration(args.duration)?;
    let registry = EffectRegistry::new();
    let config = args.slots.engine_config(&registry)?;
    let mut device = config.device.to_device()?;

    let factory = config.device.backend_factory()?;
    if !factory.init() {
        anyhow::bail!("Backend '{}' is unavailable", factory.name());
    }
    let mut backend = factory
        .create_backend(&device, BackendType::Playback)
        .ok_or_else(|| anyhow::anyhow!("Backend '{}' does not support playback", factory.name()))?;
    backend.open(args.device.as_deref())?;
    backend.reset(&mut device)?;

    // Slots are prepared for the format the backend settled on
    let mut engine = Engine::new(&config, &registry, device)?;
    let mut tone = ToneGenerator::new(args.tone, args.amplitude, device.sample_rate);
    let mut scratch = vec![0.0f32; ambifx_core::BUFFER_SIZE];

    let frames = Arc::new(AtomicU64::new(0));
    let level = Arc::new(AtomicU32::new(0));
    let (frames_cb, level_cb) = (Arc::clone(&frames), Arc::clone(&level));

    println!(
        "Running {} slot(s) on '{}' ({} Hz, {}) for {:.1}s...",
        engine.slot_count(),
        backend.device_name().unwrap_or("default"),
        device.sample_rate,
        device.layout.name(),
        args.duration
    );

    backend.start(Box::new(move |bus, todo| {
        tone.fill(&mut scratch[..todo]);
        engine.process(&[&scratch[..todo]], bus);

        let block_peak = bus.iter().map(|ch| peak(&ch[..todo])).fold(0.0f32, f32::max);
        level_cb.fetch_max(block_peak.to_bits(), Ordering::Relaxed);
        frames_cb.fetch_add(todo as u64, Ordering::Relaxed);
    }))?;

    std::thread::sleep(duration);
    backend.stop();

    println!(
        "Rendered {} frames (peak {:.3})",
        frames.load(Ordering::Relaxed),
        f32::from_bits(level.load(Ordering::Relaxed))
    );
    Ok(())
}

