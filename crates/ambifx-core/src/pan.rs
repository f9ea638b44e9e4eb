//! Ambisonic panning gains for the output bus.
//!
//! Effects mix into the device's ambisonic main bus. [`MixTarget`] describes
//! that bus: how many channels it has and which ambisonic component (and
//! scale) each of them carries. Effects pass one coefficient row per input
//! channel to [`compute_pan_gains`] to obtain that channel's target gains.

use crate::device::Device;
use crate::{MAX_AMBI_CHANNELS, MAX_OUTPUT_CHANNELS};

/// Ambisonic component carried by one output channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BFChannelConfig {
    /// Scale applied to the component.
    pub scale: f32,
    /// Ambisonic channel index (ACN).
    pub index: usize,
}

/// Output bus an effect mixes into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixTarget {
    /// Number of channels in the bus, at most [`MAX_OUTPUT_CHANNELS`].
    pub channels: usize,
    /// Ambisonic mapping of each bus channel; entries past `channels` are unused.
    pub ambi_map: [BFChannelConfig; MAX_OUTPUT_CHANNELS],
}

impl MixTarget {
    /// Identity-mapped ambisonic bus of the given order.
    pub fn ambisonic(order: usize) -> Self {
        let channels = ((order + 1) * (order + 1)).min(MAX_OUTPUT_CHANNELS);
        let ambi_map = core::array::from_fn(|index| BFChannelConfig { scale: 1.0, index });
        Self { channels, ambi_map }
    }

    /// The main bus for a device, sized by its layout's mix order.
    pub fn for_device(device: &Device) -> Self {
        Self::ambisonic(device.layout.mix_order())
    }
}

/// Coefficient row that routes input channel `index` to the same ambisonic channel.
pub fn ambi_identity_row(index: usize) -> [f32; MAX_AMBI_CHANNELS] {
    let mut row = [0.0; MAX_AMBI_CHANNELS];
    if let Some(coeff) = row.get_mut(index) {
        *coeff = 1.0;
    }
    row
}

/// Computes per-output-channel gains for a coefficient row.
///
/// Bus channel `i` receives `ambi_map[i].scale * coeffs[ambi_map[i].index] * in_gain`;
/// entries past the bus channel count are zeroed.
pub fn compute_pan_gains(
    target: &MixTarget,
    coeffs: &[f32; MAX_AMBI_CHANNELS],
    in_gain: f32,
    gains: &mut [f32; MAX_OUTPUT_CHANNELS],
) {
    for (i, gain) in gains.iter_mut().enumerate() {
        *gain = if i < target.channels {
            let map = target.ambi_map[i];
            coeffs.get(map.index).map_or(0.0, |&c| map.scale * c * in_gain)
        } else {
            0.0
        };
    }
}
