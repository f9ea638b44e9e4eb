//! Gain crossfading mixer.
//!
//! Every effect keeps, per input channel, a [`ChannelGains`] pair: the gain
//! currently applied to each output channel and the gain the last `update`
//! asked for. Parameter updates only ever touch `target`; [`mix_samples`]
//! walks `current` toward it while accumulating into the output bus, so a
//! gain change becomes a linear ramp instead of a step.
//!
//! ## Ramp length
//!
//! The ramp is spread over `counter` samples, which callers set to the number
//! of samples remaining in the whole `process` call. A call that is split
//! into sub-blocks therefore produces one continuous ramp that lands exactly
//! on the target at the end of the call.

use libm::fabsf;

use crate::{BUFFER_SIZE, GAIN_SILENCE_THRESHOLD, MAX_OUTPUT_CHANNELS};

/// One channel of a mixing bus.
pub type ChannelBuffer = [f32; BUFFER_SIZE];

/// Current and target gain for every output channel of one input channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelGains {
    /// Gains applied by the most recent mix, moved only by [`mix_samples`].
    pub current: [f32; MAX_OUTPUT_CHANNELS],
    /// Gains requested by the most recent `update`.
    pub target: [f32; MAX_OUTPUT_CHANNELS],
}

impl ChannelGains {
    /// All gains silent.
    pub const fn new() -> Self {
        Self {
            current: [0.0; MAX_OUTPUT_CHANNELS],
            target: [0.0; MAX_OUTPUT_CHANNELS],
        }
    }

    /// Silences the current gains so the next mix fades in from zero.
    pub fn reset_current(&mut self) {
        self.current = [0.0; MAX_OUTPUT_CHANNELS];
    }

    /// Jumps the current gains to the targets.
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
    }

    /// Returns `true` when no output channel is still ramping.
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }
}

impl Default for ChannelGains {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulates `data` into every channel of `output`, starting at `out_pos`.
///
/// For each output channel whose current gain differs from its target, the
/// gain moves linearly by `(target - current) / counter` per sample for at
/// most `counter` samples; reaching `counter` snaps the current gain to the
/// target exactly. Channels that end up at or below
/// [`GAIN_SILENCE_THRESHOLD`] are skipped for the rest of the block.
///
/// # Arguments
///
/// * `data` - Samples to mix; its length is the block size
/// * `output` - Output bus, one buffer per channel
/// * `gains` - Gain pair for the channel being mixed
/// * `counter` - Samples left until the ramp must be complete
/// * `out_pos` - Offset of this block inside the output buffers
pub fn mix_samples(
    data: &[f32],
    output: &mut [ChannelBuffer],
    gains: &mut ChannelGains,
    counter: usize,
    out_pos: usize,
) {
    let todo = data.len();
    debug_assert!(out_pos + todo <= BUFFER_SIZE);
    let delta = if counter > 0 {
        1.0 / counter as f32
    } else {
        0.0
    };

    let ChannelGains { current, target } = gains;
    for ((out, current), &target) in output.iter_mut().zip(current.iter_mut()).zip(target.iter()) {
        let dst = &mut out[out_pos..out_pos + todo];
        let mut pos = 0;
        let mut gain = *current;

        let diff = target - gain;
        if fabsf(diff) > f32::EPSILON {
            let ramp_len = todo.min(counter);
            let step = diff * delta;
            let mut step_count = 0.0f32;
            for (o, &d) in dst[..ramp_len].iter_mut().zip(&data[..ramp_len]) {
                *o += d * (gain + step * step_count);
                step_count += 1.0;
            }
            pos = ramp_len;

            gain = if pos == counter {
                target
            } else {
                gain + step * step_count
            };
            *current = gain;
        }

        if !(fabsf(gain) > GAIN_SILENCE_THRESHOLD) {
            continue;
        }
        for (o, &d) in dst[pos..].iter_mut().zip(&data[pos..]) {
            *o += d * gain;
        }
    }
}
