//! Offline and real-time rendering through a list of effect slots.

use ambifx_config::EngineConfig;
use ambifx_core::{BUFFER_SIZE, ChannelBuffer, Device, MAX_EFFECT_CHANNELS};
use ambifx_registry::{Context, EffectRegistry, EffectSlot};

/// Effect slots sharing one wet bus, mixed into the device's output bus.
///
/// Input channel `c` feeds wet channel `c`; a mono source therefore drives
/// the omnidirectional (W) component only.
pub struct Engine {
    ctx: Context,
    slots: Vec<EffectSlot>,
    wet: Vec<ChannelBuffer>,
}

impl Engine {
    /// Builds every configured slot for `device`.
    pub fn new(config: &EngineConfig, registry: &EffectRegistry, device: Device) -> anyhow::Result<Self> {
        let mut ctx = Context::new(device);
        let slots = config.build_slots(&mut ctx, registry)?;
        Ok(Self {
            ctx,
            slots,
            wet: vec![[0.0; BUFFER_SIZE]; MAX_EFFECT_CHANNELS],
        })
    }

    /// Number of output bus channels.
    pub fn channels(&self) -> usize {
        self.ctx.mix_target().channels
    }

    /// Number of slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Loads `input` (one slice per source channel, equal lengths, at most
    /// [`BUFFER_SIZE`] frames) into the wet bus and accumulates every slot
    /// into `output`.
    pub fn process(&mut self, input: &[&[f32]], output: &mut [ChannelBuffer]) {
        let frames = input.first().map_or(0, |ch| ch.len());
        debug_assert!(frames <= BUFFER_SIZE);

        for (c, wet) in self.wet.iter_mut().enumerate() {
            match input.get(c) {
                Some(src) => wet[..frames].copy_from_slice(&src[..frames]),
                None => wet[..frames].fill(0.0),
            }
        }

        for slot in &mut self.slots {
            slot.process(&self.ctx, frames, &self.wet, output);
        }
    }
}

/// Sine test tone with a continuous phase.
#[derive(Debug, Clone, Copy)]
pub struct ToneGenerator {
    phase: f32,
    increment: f32,
    amplitude: f32,
}

impl ToneGenerator {
    /// A tone of `frequency` Hz at `sample_rate`.
    pub fn new(frequency: f32, amplitude: f32, sample_rate: u32) -> Self {
        Self {
            phase: 0.0,
            increment: frequency / sample_rate as f32,
            amplitude,
        }
    }

    /// Fills `out` with the next samples.
    pub fn fill(&mut self, out: &mut [f32]) {
        for s in out {
            *s = (self.phase * std::f32::consts::TAU).sin() * self.amplitude;
            self.phase = (self.phase + self.increment).fract();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambifx_config::SlotConfig;
    use ambifx_core::ChannelLayout;

    #[test]
    fn tone_is_bounded_and_continuous() {
        let mut tone = ToneGenerator::new(1000.0, 0.5, 48000);
        let mut a = [0.0; 100];
        let mut b = [0.0; 100];
        tone.fill(&mut a);
        tone.fill(&mut b);
        assert!(a.iter().chain(&b).all(|s| s.abs() <= 0.5));
        // One sample at 1 kHz / 48 kHz moves the phase by 7.5 degrees
        assert!((b[0] - a[99]).abs() < 0.1);
    }

    #[test]
    fn empty_config_renders_silence() {
        let registry = EffectRegistry::new();
        let config = EngineConfig::default();
        let mut engine = Engine::new(&config, &registry, Device::default()).unwrap();
        assert_eq!(engine.slot_count(), 0);

        let input = [0.5f32; 256];
        let mut output = vec![[0.0; BUFFER_SIZE]; engine.channels()];
        engine.process(&[&input], &mut output);
        assert!(output.iter().all(|ch| ch.iter().all(|&s| s == 0.0)));
    }

    #[test]
    fn modulator_slot_writes_w_channel() {
        let registry = EffectRegistry::new();
        let config = EngineConfig::default().with_slot(SlotConfig::new("modulator").with_param("frequency", "0"));
        let device = Device::new(48000, ChannelLayout::Quad);
        let mut engine = Engine::new(&config, &registry, device).unwrap();
        assert_eq!(engine.channels(), 4);

        let mut input = [0.0f32; 512];
        ToneGenerator::new(2000.0, 1.0, 48000).fill(&mut input);
        let mut output = vec![[0.0; BUFFER_SIZE]; engine.channels()];
        engine.process(&[&input], &mut output);
        engine.process(&[&input], &mut output);

        assert!(output[0][..512].iter().any(|&s| s.abs() > 0.1));
        assert!(output[1..].iter().all(|ch| ch.iter().all(|&s| s == 0.0)));
    }
}
