//! Offline rendering command.

use std::path::PathBuf;

use ambifx_backend::{WavSpec, read_wav, write_wav};
use ambifx_core::{BUFFER_SIZE, MAX_EFFECT_CHANNELS};
use ambifx_registry::EffectRegistry;
use clap::Args;

use super::common::{SlotArgs, checked_duration, peak};
use crate::engine::{Engine, ToneGenerator};

#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV file (one channel per ambisonic bus channel)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Input WAV file; a test tone is rendered when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    #[command(flatten)]
    slots: SlotArgs,

    /// Test tone frequency in Hz
    #[arg(long, default_value = "440.0")]
    tone: f32,

    /// Test tone amplitude (0-1)
    #[arg(long, default_value = "0.8")]
    amplitude: f32,

    /// Test tone duration in seconds
    #[arg(long, default_value = "1.0")]
    duration: f32,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    if ![16, 24, 32].contains(&args.bit_depth) {
        anyhow::bail!("Unsupported bit depth: {} (expected 16, 24 or 32)", args.bit_depth);
    }

    let registry = EffectRegistry::new();
    let mut config = args.slots.engine_config(&registry)?;

    let source: Vec<Vec<f32>> = if let Some(path) = &args.input {
        println!("Reading {}...", path.display());
        let (channels, spec) = read_wav(path)?;
        if args.slots.sample_rate.is_none() {
            config.device.sample_rate = spec.sample_rate;
        }
        if channels.len() > MAX_EFFECT_CHANNELS {
            tracing::warn!(
                channels = channels.len(),
                "input has more channels than the wet bus; extra channels are ignored"
            );
        }
        channels.into_iter().take(MAX_EFFECT_CHANNELS).collect()
    } else {
        let secs = checked_duration(args.duration)?.as_secs_f64();
        let frames = (secs * f64::from(config.device.sample_rate)) as usize;
        let mut tone = vec![0.0; frames];
        ToneGenerator::new(args.tone, args.amplitude, config.device.sample_rate).fill(&mut tone);
        vec![tone]
    };

    let device = config.device.to_device()?;
    let mut engine = Engine::new(&config, &registry, device)?;
    let frames = source.first().map_or(0, Vec::len);
    println!(
        "Rendering {} frames at {} Hz through {} slot(s) into {} channels...",
        frames,
        device.sample_rate,
        engine.slot_count(),
        engine.channels()
    );

    let mut output = vec![Vec::with_capacity(frames); engine.channels()];
    let mut bus = vec![[0.0; BUFFER_SIZE]; engine.channels()];
    let block = device.update_size.min(BUFFER_SIZE);

    let mut pos = 0;
    while pos < frames {
        let todo = block.min(frames - pos);
        let input: Vec<&[f32]> = source.iter().map(|ch| &ch[pos..pos + todo]).collect();

        for ch in &mut bus {
            ch[..todo].fill(0.0);
        }
        engine.process(&input, &mut bus);
        for (out, ch) in output.iter_mut().zip(&bus) {
            out.extend_from_slice(&ch[..todo]);
        }
        pos += todo;
    }

    let spec = WavSpec {
        channels: engine.channels() as u16,
        sample_rate: device.sample_rate,
        bits_per_sample: args.bit_depth,
    };
    write_wav(&args.output, &output, spec)?;

    let level = output.iter().map(|ch| peak(ch)).fold(0.0f32, f32::max);
    println!("Wrote {} (peak {:.3})", args.output.display(), level);
    Ok(())
}
