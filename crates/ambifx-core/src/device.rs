//! Output device descriptor.
//!
//! The effect core only observes a device through this read-only snapshot:
//! its sample rate, its channel layout, and the number of frames it renders
//! per update. Backends fill it in when they open or reset a device.

use crate::MAX_AMBI_ORDER;

/// Output channel configuration of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelLayout {
    /// Single channel.
    Mono,
    /// Left/right pair.
    #[default]
    Stereo,
    /// Four speakers.
    Quad,
    /// 5.1 surround.
    X51,
    /// 6.1 surround.
    X61,
    /// 7.1 surround.
    X71,
    /// Full-sphere ambisonic output of the given order.
    Ambi3D {
        /// Ambisonic order, at most [`MAX_AMBI_ORDER`].
        order: u8,
    },
}

impl ChannelLayout {
    /// Number of physical output channels.
    pub const fn channel_count(&self) -> usize {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::Stereo => 2,
            ChannelLayout::Quad => 4,
            ChannelLayout::X51 => 6,
            ChannelLayout::X61 => 7,
            ChannelLayout::X71 => 8,
            ChannelLayout::Ambi3D { order } => (*order as usize + 1) * (*order as usize + 1),
        }
    }

    /// Ambisonic order of the mixing bus effects write into for this layout.
    pub const fn mix_order(&self) -> usize {
        let order = match self {
            ChannelLayout::Mono => 0,
            ChannelLayout::Stereo | ChannelLayout::Quad => 1,
            ChannelLayout::X51 | ChannelLayout::X61 => 2,
            ChannelLayout::X71 => 3,
            ChannelLayout::Ambi3D { order } => *order as usize,
        };
        if order > MAX_AMBI_ORDER {
            MAX_AMBI_ORDER
        } else {
            order
        }
    }

    /// The layout with any ambisonic order above [`MAX_AMBI_ORDER`] clamped
    /// to it.
    pub const fn clamped(self) -> Self {
        match self {
            ChannelLayout::Ambi3D { order } if order as usize > MAX_AMBI_ORDER => ChannelLayout::Ambi3D {
                order: MAX_AMBI_ORDER as u8,
            },
            layout => layout,
        }
    }

    /// Short lowercase name, as used in configuration files.
    ///
    /// Names the [`clamped`](Self::clamped) layout, so an order above
    /// [`MAX_AMBI_ORDER`] is named as that order.
    pub const fn name(&self) -> &'static str {
        match self {
            ChannelLayout::Mono => "mono",
            ChannelLayout::Stereo => "stereo",
            ChannelLayout::Quad => "quad",
            ChannelLayout::X51 => "5.1",
            ChannelLayout::X61 => "6.1",
            ChannelLayout::X71 => "7.1",
            ChannelLayout::Ambi3D { order: 0 } => "ambi0",
            ChannelLayout::Ambi3D { order: 1 } => "ambi1",
            ChannelLayout::Ambi3D { order: 2 } => "ambi2",
            // 3 and above
            ChannelLayout::Ambi3D { .. } => "ambi3",
        }
    }

    /// Parses a name produced by [`name`](Self::name) (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        const NAMES: [(&str, ChannelLayout); 13] = [
            ("mono", ChannelLayout::Mono),
            ("stereo", ChannelLayout::Stereo),
            ("quad", ChannelLayout::Quad),
            ("5.1", ChannelLayout::X51),
            ("surround51", ChannelLayout::X51),
            ("6.1", ChannelLayout::X61),
            ("surround61", ChannelLayout::X61),
            ("7.1", ChannelLayout::X71),
            ("surround71", ChannelLayout::X71),
            ("ambi0", ChannelLayout::Ambi3D { order: 0 }),
            ("ambi1", ChannelLayout::Ambi3D { order: 1 }),
            ("ambi2", ChannelLayout::Ambi3D { order: 2 }),
            ("ambi3", ChannelLayout::Ambi3D { order: 3 }),
        ];
        let name = name.trim();
        NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, layout)| layout)
    }
}

/// Snapshot of an output device as seen by effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Device {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Output channel configuration.
    pub layout: ChannelLayout,
    /// Frames rendered per mixer update.
    pub update_size: usize,
}

impl Device {
    /// Default output rate in Hz.
    pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
    /// Default frames per update.
    pub const DEFAULT_UPDATE_SIZE: usize = 1024;

    /// Creates a device descriptor. Ambisonic orders above
    /// [`MAX_AMBI_ORDER`] are clamped.
    pub const fn new(sample_rate: u32, layout: ChannelLayout) -> Self {
        Self {
            sample_rate,
            layout: layout.clamped(),
            update_size: Self::DEFAULT_UPDATE_SIZE,
        }
    }

    /// Sets the number of frames per update.
    pub const fn with_update_size(mut self, update_size: usize) -> Self {
        self.update_size = update_size;
        self
    }
}

impl Default for Device {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SAMPLE_RATE, ChannelLayout::Stereo)
    }
}
