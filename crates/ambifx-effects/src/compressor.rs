//! Automatic gain compressor.
//!
//! Tracks the amplitude of the first input channel with a bounded geometric
//! envelope and applies its reciprocal to every channel, pulling loud passages
//! down and quiet ones up toward unity.
//!
//! # Signal Flow
//!
//! ```text
//! |Input[0]| → clamp [0.5, 2.0] → Envelope Follower → 1 / env ─┐
//!                                                             ↓
//! Input[c] ──────────────────────────────────────────────────× → Crossfaded pan gains → Output bus
//! ```
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | Envelope range | 0.5 to 2.0 | Gain stays within +6 dB / -6 dB |
//! | Attack | 100 ms | Time to rise across the whole range |
//! | Release | 200 ms | Time to fall across the whole range |
//!
//! When switched off the envelope keeps running toward 1.0 instead of
//! snapping, so toggling the compressor never produces a gain step.

use alloc::boxed::Box;

use ambifx_core::{
    BUFFER_SIZE, ChannelBuffer, ChannelGains, CompressorProps, Device, EffectError, EffectProps,
    EffectState, EffectStateFactory, EffectType, EnvelopeFollower, MAX_AMBI_CHANNELS, MixTarget,
    PropertyDescriptor, PropertyError, PropertyTable, SlotParams, ambi_identity_row,
    compute_pan_gains, mix_samples,
};
use libm::fabsf;

/// Lowest tracked amplitude.
const AMP_ENVELOPE_MIN: f32 = 0.5;
/// Highest tracked amplitude.
const AMP_ENVELOPE_MAX: f32 = 2.0;

/// Seconds to rise from min to max.
const ATTACK_TIME: f32 = 0.1;
/// Seconds to fall from max to min.
const RELEASE_TIME: f32 = 0.2;

/// Samples processed per sub-block.
const MAX_UPDATE_SAMPLES: usize = 256;

/// Automatic gain compressor state.
///
/// ## Parameters
///
/// | Id | Name | Range | Default |
/// |----|------|-------|---------|
/// | 0x0001 | On/Off | 0–1 | 1 (On) |
///
/// ## Output Gains
///
/// Pan gains go through [`mix_samples`] and ramp over one block, instead of
/// being applied as a fixed gain per output channel. [`device_update`]
/// zeroes the current gains, so the first block after a device change fades
/// in from silence.
///
/// [`device_update`]: EffectState::device_update
#[derive(Debug, Clone)]
pub struct CompressorState {
    enabled: bool,
    envelope: EnvelopeFollower,
    out_channels: usize,
    gains: [ChannelGains; MAX_AMBI_CHANNELS],
}

impl CompressorState {
    /// Creates an enabled compressor resting at unity.
    pub fn new() -> Self {
        Self {
            enabled: CompressorProps::DEFAULT_ONOFF,
            envelope: EnvelopeFollower::new(AMP_ENVELOPE_MIN, AMP_ENVELOPE_MAX),
            out_channels: 0,
            gains: [ChannelGains::new(); MAX_AMBI_CHANNELS],
        }
    }

    /// Current envelope level.
    pub fn envelope_level(&self) -> f32 {
        self.envelope.level()
    }

    /// Whether compression is engaged.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Per-sample attack and release multipliers.
    pub fn multipliers(&self) -> (f32, f32) {
        (self.envelope.attack_mult(), self.envelope.release_mult())
    }

    /// Gain pair of input channel `channel`.
    pub fn channel_gains(&self, channel: usize) -> Option<&ChannelGains> {
        self.gains.get(channel)
    }
}

impl Default for CompressorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectState for CompressorState {
    fn device_update(&mut self, device: &Device) -> Result<(), EffectError> {
        self.envelope.set_times(device.sample_rate as f32, ATTACK_TIME, RELEASE_TIME);
        for gains in &mut self.gains {
            gains.reset_current();
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate = device.sample_rate, "compressor device update");
        Ok(())
    }

    fn update(&mut self, _device: &Device, slot: &SlotParams, props: &EffectProps, target: &MixTarget) {
        self.enabled = props.as_compressor().copied().unwrap_or_default().on_off;

        self.out_channels = target.channels;
        let wet_channels = slot.wet_channels.min(MAX_AMBI_CHANNELS);
        for (i, gains) in self.gains.iter_mut().enumerate().take(wet_channels) {
            compute_pan_gains(target, &ambi_identity_row(i), slot.gain, &mut gains.target);
        }
    }

    fn process(&mut self, samples_to_do: usize, input: &[ChannelBuffer], output: &mut [ChannelBuffer]) {
        debug_assert!(samples_to_do <= BUFFER_SIZE);
        let Some(first) = input.first() else {
            return;
        };
        let out_channels = self.out_channels.min(output.len());
        let output = &mut output[..out_channels];

        let mut base = 0;
        while base < samples_to_do {
            let td = (samples_to_do - base).min(MAX_UPDATE_SAMPLES);

            let mut env_gains = [0.0f32; MAX_UPDATE_SAMPLES];
            if self.enabled {
                for (gain, &sample) in env_gains[..td].iter_mut().zip(&first[base..base + td]) {
                    let amplitude = self.envelope.clamp(fabsf(sample));
                    *gain = 1.0 / self.envelope.next(amplitude);
                }
            } else {
                for gain in &mut env_gains[..td] {
                    *gain = 1.0 / self.envelope.next(1.0);
                }
            }

            for (gains, samples) in self.gains.iter_mut().zip(input) {
                let mut temps = [0.0f32; MAX_UPDATE_SAMPLES];
                for ((t, &s), &g) in temps[..td].iter_mut().zip(&samples[base..base + td]).zip(&env_gains[..td]) {
                    *t = s * g;
                }

                mix_samples(&temps[..td], output, gains, samples_to_do - base, base);
            }

            base += td;
        }
    }
}

/// Property table of the compressor.
///
/// The compressor has only integer properties; every float accessor reports
/// [`PropertyError::InvalidEnum`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CompressorProperties;

impl CompressorProperties {
    /// Compression on/off (int bool).
    pub const ONOFF: i32 = 0x0001;
}

static COMPRESSOR_DESCRIPTORS: [PropertyDescriptor; 1] = [PropertyDescriptor::boolean(
    CompressorProperties::ONOFF,
    "On/Off",
    "onoff",
    CompressorProps::DEFAULT_ONOFF,
)];

impl PropertyTable for CompressorProperties {
    fn descriptors(&self) -> &'static [PropertyDescriptor] {
        &COMPRESSOR_DESCRIPTORS
    }

    fn set_int(&self, props: &mut EffectProps, param: i32, value: i32) -> Result<(), PropertyError> {
        match param {
            Self::ONOFF => {
                let props = props.as_compressor_mut().ok_or(PropertyError::InvalidEnum { param })?;
                if !(CompressorProps::MIN_ONOFF..=CompressorProps::MAX_ONOFF).contains(&value) {
                    return Err(PropertyError::InvalidValue {
                        param,
                        reason: "compressor state out of range",
                    });
                }
                props.on_off = value != 0;
                Ok(())
            }
            _ => Err(PropertyError::InvalidEnum { param }),
        }
    }

    fn set_float(&self, _props: &mut EffectProps, param: i32, _value: f32) -> Result<(), PropertyError> {
        Err(PropertyError::InvalidEnum { param })
    }

    fn set_float_v(&self, _props: &mut EffectProps, param: i32, _values: &[f32]) -> Result<(), PropertyError> {
        Err(PropertyError::InvalidEnum { param })
    }

    fn get_int(&self, props: &EffectProps, param: i32) -> Result<i32, PropertyError> {
        match param {
            Self::ONOFF => props
                .as_compressor()
                .map(|p| i32::from(p.on_off))
                .ok_or(PropertyError::InvalidEnum { param }),
            _ => Err(PropertyError::InvalidEnum { param }),
        }
    }

    fn get_float(&self, _props: &EffectProps, param: i32) -> Result<f32, PropertyError> {
        Err(PropertyError::InvalidEnum { param })
    }

    fn get_float_v(&self, _props: &EffectProps, param: i32, _values: &mut [f32]) -> Result<(), PropertyError> {
        Err(PropertyError::InvalidEnum { param })
    }
}

static COMPRESSOR_PROPERTIES: CompressorProperties = CompressorProperties;

/// Factory for [`CompressorState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CompressorStateFactory;

impl EffectStateFactory for CompressorStateFactory {
    fn effect_type(&self) -> EffectType {
        EffectType::Compressor
    }

    fn create(&self) -> Box<dyn EffectState> {
        Box::new(CompressorState::new())
    }

    fn default_props(&self) -> EffectProps {
        EffectProps::Compressor(CompressorProps::default())
    }

    fn property_table(&self) -> &'static dyn PropertyTable {
        &COMPRESSOR_PROPERTIES
    }
}
