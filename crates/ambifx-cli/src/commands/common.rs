//! Shared helpers for CLI commands.

use std::path::PathBuf;
use std::time::Duration;

use ambifx_config::{EngineConfig, SlotConfig};
use ambifx_core::ChannelLayout;
use ambifx_registry::EffectRegistry;
use clap::Args;

/// Where the slots come from: a config file, or a single `--effect`.
#[derive(Args, Debug)]
pub struct SlotArgs {
    /// Engine configuration file (TOML)
    #[arg(short, long, conflicts_with = "effect")]
    pub config: Option<PathBuf>,

    /// Single effect to run (null, modulator, compressor)
    #[arg(short, long)]
    pub effect: Option<String>,

    /// Effect parameters (e.g., "frequency=220Hz")
    #[arg(long, value_parser = parse_key_val, number_of_values = 1, requires = "effect")]
    pub param: Vec<(String, String)>,

    /// Slot gain (0-1) for --effect
    #[arg(long, default_value = "1.0")]
    pub gain: f32,

    /// Override the output sample rate
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Override the output channel layout (mono, stereo, quad, 5.1, 6.1, 7.1, ambi0-3)
    #[arg(long)]
    pub layout: Option<String>,
}

impl SlotArgs {
    /// Loads or assembles the engine configuration and validates it.
    pub fn engine_config(&self, registry: &EffectRegistry) -> anyhow::Result<EngineConfig> {
        let mut config = match (&self.config, &self.effect) {
            (Some(path), _) => EngineConfig::load(path)?,
            (None, Some(effect)) => {
                let slot = self
                    .param
                    .iter()
                    .fold(SlotConfig::new(effect.as_str()).with_gain(self.gain), |slot, (k, v)| {
                        slot.with_param(k.as_str(), v.as_str())
                    });
                EngineConfig::default().with_slot(slot)
            }
            (None, None) => anyhow::bail!("either --config or --effect is required"),
        };

        if let Some(rate) = self.sample_rate {
            config.device.sample_rate = rate;
        }
        if let Some(layout) = &self.layout {
            let layout =
                ChannelLayout::from_name(layout).ok_or_else(|| anyhow::anyhow!("Unknown layout: {}", layout))?;
            config.device.layout = layout.name().to_string();
        }

        config.validate(registry)?;
        Ok(config)
    }
}

/// Parses `key=value`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid parameter format: '{}' (expected key=value)", s))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

/// Converts `--duration` seconds, rejecting negative and non-finite values.
pub fn checked_duration(secs: f32) -> anyhow::Result<Duration> {
    match Duration::try_from_secs_f32(secs) {
        Ok(duration) => Ok(duration),
        Err(_) => anyhow::bail!("Invalid duration: {} (expected a non-negative number of seconds)", secs),
    }
}

/// Largest absolute sample value.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |m, s| m.max(s.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_val() {
        assert_eq!(
            parse_key_val("frequency=1.2kHz"),
            Ok(("frequency".to_string(), "1.2kHz".to_string()))
        );
        assert_eq!(parse_key_val("a = b=c"), Ok(("a".to_string(), "b=c".to_string())));
        assert!(parse_key_val("frequency").is_err());
    }

    #[test]
    fn duration_accepts_finite_non_negative() {
        assert_eq!(checked_duration(0.0).unwrap(), Duration::ZERO);
        assert_eq!(checked_duration(0.25).unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn duration_rejects_infinite_negative_and_nan() {
        for secs in [f32::INFINITY, -1.0, f32::NAN] {
            let err = checked_duration(secs).unwrap_err();
            assert!(err.to_string().contains("Invalid duration"), "{secs}: {err}");
        }
    }

    #[test]
    fn single_effect_config() {
        let args = SlotArgs {
            config: None,
            effect: Some("modulator".to_string()),
            param: vec![("waveform".to_string(), "square".to_string())],
            gain: 0.5,
            sample_rate: Some(22050),
            layout: Some("quad".to_string()),
        };
        let config = args.engine_config(&EffectRegistry::new()).unwrap();
        assert_eq!(config.device.sample_rate, 22050);
        assert_eq!(config.device.layout, "quad");
        assert_eq!(config.slots[0].gain, 0.5);
        assert_eq!(config.slots[0].get_param("waveform"), Some("square"));
    }

    #[test]
    fn missing_source_is_an_error() {
        let args = SlotArgs {
            config: None,
            effect: None,
            param: Vec::new(),
            gain: 1.0,
            sample_rate: None,
            layout: None,
        };
        assert!(args.engine_config(&EffectRegistry::new()).is_err());
    }
}
