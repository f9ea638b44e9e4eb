//! Ring modulator effect.
//!
//! Ring modulation multiplies the input by a bipolar carrier, producing sum
//! and difference frequencies while suppressing the carrier itself. The input
//! is high-passed first so low-frequency content does not turn into audible
//! carrier bleed.
//!
//! ## Signal Flow
//!
//! ```text
//! Input[c] → High-Pass → × Carrier → Crossfaded pan gains → Output bus
//! ```
//!
//! ## Carrier Phase
//!
//! The carrier runs on a 24-bit fixed-point phase (see
//! [`ambifx_core::waveform`]). The per-sample step is
//! `round(frequency / sample_rate * FRAC_ONE)`, clamped to one cycle. A step
//! that rounds to zero selects a constant unity carrier, so very low
//! frequencies pass the high-passed input through unmodulated instead of
//! freezing the waveform at its zero-phase value.
//!
//! Reference: Zölzer, "DAFX: Digital Audio Effects" (2011), Ch. 2
//! (Amplitude Modulation and Ring Modulation).

use alloc::boxed::Box;

use ambifx_core::{
    BiquadFilter, BiquadType, ChannelBuffer, ChannelGains, Device, EffectError, EffectProps,
    EffectState, EffectStateFactory, EffectType, MAX_AMBI_CHANNELS, MixTarget, ModulatorProps,
    PropertyDescriptor, PropertyError, PropertyTable, PropertyUnit, SlotParams, WAVEFORM_FRAC_MASK,
    WAVEFORM_FRAC_ONE, WaveGenerator, Waveform, ambi_identity_row, compute_pan_gains, mix_samples,
    rcp_q_from_bandwidth,
};
use libm::rintf;

/// Samples processed per sub-block.
const MAX_UPDATE_SAMPLES: usize = 128;

/// High-pass bandwidth in octaves.
const HIGHPASS_BANDWIDTH: f32 = 0.75;

/// Lowest normalized high-pass frequency.
const MIN_F0NORM: f32 = 1.0 / 512.0;

/// Highest normalized high-pass frequency.
const MAX_F0NORM: f32 = 0.49;

#[derive(Debug, Clone, Copy)]
struct ModulatorChannel {
    filter: BiquadFilter,
    gains: ChannelGains,
}

impl ModulatorChannel {
    const fn new() -> Self {
        Self {
            filter: BiquadFilter::new(),
            gains: ChannelGains::new(),
        }
    }
}

/// Ring modulator state.
///
/// ## Parameters
///
/// | Id | Name | Range | Default |
/// |----|------|-------|---------|
/// | 0x0001 | Frequency | 0–8000 Hz | 440.0 Hz |
/// | 0x0002 | High-Pass Cutoff | 0–24000 Hz | 800.0 Hz |
/// | 0x0003 | Waveform | 0/1/2 (Sine/Sawtooth/Square) | 0 (Sine) |
///
/// # Example
///
/// ```rust
/// use ambifx_core::{BUFFER_SIZE, Device, EffectProps, EffectState, MixTarget, ModulatorProps, SlotParams};
/// use ambifx_effects::ModulatorState;
///
/// let device = Device::default();
/// let target = MixTarget::for_device(&device);
/// let mut state = ModulatorState::new();
/// state.device_update(&device).unwrap();
/// state.update(&device, &SlotParams::default(), &EffectProps::Modulator(ModulatorProps::default()), &target);
///
/// let input = vec![[0.25f32; BUFFER_SIZE]; 4];
/// let mut output = vec![[0.0f32; BUFFER_SIZE]; target.channels];
/// state.process(256, &input, &mut output);
/// assert!(output[0][..256].iter().all(|s| s.is_finite()));
/// ```
#[derive(Debug, Clone)]
pub struct ModulatorState {
    /// Carrier generator chosen by the last update.
    generator: WaveGenerator,
    /// Carrier phase.
    index: u32,
    /// Phase increment per sample.
    step: u32,
    /// Channel count of the output bus.
    out_channels: usize,
    chans: [ModulatorChannel; MAX_AMBI_CHANNELS],
}

impl ModulatorState {
    /// Creates a modulator with a unity carrier and silent gains.
    pub fn new() -> Self {
        Self {
            generator: WaveGenerator::One,
            index: 0,
            step: 0,
            out_channels: 0,
            chans: [ModulatorChannel::new(); MAX_AMBI_CHANNELS],
        }
    }

    /// Current carrier phase.
    pub fn phase_index(&self) -> u32 {
        self.index
    }

    /// Phase increment per sample.
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Carrier generator in use.
    pub fn generator(&self) -> WaveGenerator {
        self.generator
    }

    /// Gain pair of input channel `channel`.
    pub fn channel_gains(&self, channel: usize) -> Option<&ChannelGains> {
        self.chans.get(channel).map(|c| &c.gains)
    }
}

impl Default for ModulatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectState for ModulatorState {
    fn device_update(&mut self, _device: &Device) -> Result<(), EffectError> {
        for chan in &mut self.chans {
            chan.filter.clear();
            chan.gains.reset_current();
        }
        Ok(())
    }

    fn update(&mut self, device: &Device, slot: &SlotParams, props: &EffectProps, target: &MixTarget) {
        let props = props.as_modulator().copied().unwrap_or_default();
        let rate = device.sample_rate as f32;

        let step = (props.frequency / rate * WAVEFORM_FRAC_ONE as f32).clamp(0.0, (WAVEFORM_FRAC_ONE - 1) as f32);
        self.step = rintf(step) as u32;
        self.generator = WaveGenerator::select(props.waveform, self.step);

        let f0norm = (props.high_pass_cutoff / rate).clamp(MIN_F0NORM, MAX_F0NORM);
        let wet_channels = slot.wet_channels.min(MAX_AMBI_CHANNELS);
        let (first, rest) = self.chans.split_at_mut(1);
        first[0].filter.set_params(
            BiquadType::HighPass,
            1.0,
            f0norm,
            rcp_q_from_bandwidth(f0norm, HIGHPASS_BANDWIDTH),
        );
        for chan in rest.iter_mut().take(wet_channels.saturating_sub(1)) {
            chan.filter.copy_params_from(&first[0].filter);
        }

        self.out_channels = target.channels;
        for (i, chan) in self.chans.iter_mut().enumerate().take(wet_channels) {
            compute_pan_gains(target, &ambi_identity_row(i), slot.gain, &mut chan.gains.target);
        }
    }

    fn process(&mut self, samples_to_do: usize, input: &[ChannelBuffer], output: &mut [ChannelBuffer]) {
        debug_assert!(samples_to_do <= ambifx_core::BUFFER_SIZE);
        let out_channels = self.out_channels.min(output.len());
        let output = &mut output[..out_channels];
        let step = self.step;

        let mut base = 0;
        while base < samples_to_do {
            let td = (samples_to_do - base).min(MAX_UPDATE_SAMPLES);

            let mut mod_samples = [0.0f32; MAX_UPDATE_SAMPLES];
            self.generator.fill(&mut mod_samples[..td], self.index, step);
            self.index = (self.index + ((step * td as u32) & WAVEFORM_FRAC_MASK)) & WAVEFORM_FRAC_MASK;

            for (chan, samples) in self.chans.iter_mut().zip(input) {
                let mut temps = [0.0f32; MAX_UPDATE_SAMPLES];
                chan.filter.process(&mut temps[..td], &samples[base..base + td]);
                for (t, &m) in temps[..td].iter_mut().zip(&mod_samples[..td]) {
                    *t *= m;
                }

                mix_samples(&temps[..td], output, &mut chan.gains, samples_to_do - base, base);
            }

            base += td;
        }
    }
}

/// Property table of the ring modulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModulatorProperties;

impl ModulatorProperties {
    /// Carrier frequency (float, Hz).
    pub const FREQUENCY: i32 = 0x0001;
    /// High-pass cutoff (float, Hz).
    pub const HIGHPASS_CUTOFF: i32 = 0x0002;
    /// Carrier waveform (int enum).
    pub const WAVEFORM: i32 = 0x0003;
}

const WAVEFORM_LABELS: &[&str] = &[
    Waveform::Sine.label(),
    Waveform::Sawtooth.label(),
    Waveform::Square.label(),
];

static MODULATOR_DESCRIPTORS: [PropertyDescriptor; 3] = [
    PropertyDescriptor::float(
        ModulatorProperties::FREQUENCY,
        "Frequency",
        "frequency",
        ModulatorProps::MIN_FREQUENCY,
        ModulatorProps::MAX_FREQUENCY,
        ModulatorProps::DEFAULT_FREQUENCY,
    )
    .with_unit(PropertyUnit::Hertz),
    PropertyDescriptor::float(
        ModulatorProperties::HIGHPASS_CUTOFF,
        "High-Pass Cutoff",
        "highpass_cutoff",
        ModulatorProps::MIN_HIGHPASS_CUTOFF,
        ModulatorProps::MAX_HIGHPASS_CUTOFF,
        ModulatorProps::DEFAULT_HIGHPASS_CUTOFF,
    )
    .with_unit(PropertyUnit::Hertz),
    PropertyDescriptor::enumerated(
        ModulatorProperties::WAVEFORM,
        "Waveform",
        "waveform",
        WAVEFORM_LABELS,
        ModulatorProps::DEFAULT_WAVEFORM as i32,
    ),
];

fn modulator_props(props: &EffectProps, param: i32) -> Result<&ModulatorProps, PropertyError> {
    props.as_modulator().ok_or(PropertyError::InvalidEnum { param })
}

fn modulator_props_mut(props: &mut EffectProps, param: i32) -> Result<&mut ModulatorProps, PropertyError> {
    props.as_modulator_mut().ok_or(PropertyError::InvalidEnum { param })
}

impl PropertyTable for ModulatorProperties {
    fn descriptors(&self) -> &'static [PropertyDescriptor] {
        &MODULATOR_DESCRIPTORS
    }

    fn set_int(&self, props: &mut EffectProps, param: i32, value: i32) -> Result<(), PropertyError> {
        match param {
            Self::FREQUENCY | Self::HIGHPASS_CUTOFF => self.set_float(props, param, value as f32),
            Self::WAVEFORM => {
                let props = modulator_props_mut(props, param)?;
                props.waveform = Waveform::from_raw(value).ok_or(PropertyError::InvalidValue {
                    param,
                    reason: "invalid modulator waveform",
                })?;
                Ok(())
            }
            _ => Err(PropertyError::InvalidEnum { param }),
        }
    }

    fn set_float(&self, props: &mut EffectProps, param: i32, value: f32) -> Result<(), PropertyError> {
        match param {
            Self::FREQUENCY => {
                let props = modulator_props_mut(props, param)?;
                if !(ModulatorProps::MIN_FREQUENCY..=ModulatorProps::MAX_FREQUENCY).contains(&value) {
                    return Err(PropertyError::InvalidValue {
                        param,
                        reason: "modulator frequency out of range",
                    });
                }
                props.frequency = value;
                Ok(())
            }
            Self::HIGHPASS_CUTOFF => {
                let props = modulator_props_mut(props, param)?;
                if !(ModulatorProps::MIN_HIGHPASS_CUTOFF..=ModulatorProps::MAX_HIGHPASS_CUTOFF).contains(&value) {
                    return Err(PropertyError::InvalidValue {
                        param,
                        reason: "modulator high-pass cutoff out of range",
                    });
                }
                props.high_pass_cutoff = value;
                Ok(())
            }
            _ => Err(PropertyError::InvalidEnum { param }),
        }
    }

    fn get_int(&self, props: &EffectProps, param: i32) -> Result<i32, PropertyError> {
        match param {
            Self::FREQUENCY => Ok(modulator_props(props, param)?.frequency as i32),
            Self::HIGHPASS_CUTOFF => Ok(modulator_props(props, param)?.high_pass_cutoff as i32),
            Self::WAVEFORM => Ok(modulator_props(props, param)?.waveform as i32),
            _ => Err(PropertyError::InvalidEnum { param }),
        }
    }

    fn get_float(&self, props: &EffectProps, param: i32) -> Result<f32, PropertyError> {
        match param {
            Self::FREQUENCY => Ok(modulator_props(props, param)?.frequency),
            Self::HIGHPASS_CUTOFF => Ok(modulator_props(props, param)?.high_pass_cutoff),
            _ => Err(PropertyError::InvalidEnum { param }),
        }
    }
}

static MODULATOR_PROPERTIES: ModulatorProperties = ModulatorProperties;

/// Factory for [`ModulatorState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ModulatorStateFactory;

impl EffectStateFactory for ModulatorStateFactory {
    fn effect_type(&self) -> EffectType {
        EffectType::RingModulator
    }

    fn create(&self) -> Box<dyn EffectState> {
        Box::new(ModulatorState::new())
    }

    fn default_props(&self) -> EffectProps {
        EffectProps::Modulator(ModulatorProps::default())
    }

    fn property_table(&self) -> &'static dyn PropertyTable {
        &MODULATOR_PROPERTIES
    }
}
