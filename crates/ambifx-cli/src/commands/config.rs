//! Engine configuration file command.

use std::path::PathBuf;

use ambifx_config::{EngineConfig, SlotConfig};
use ambifx_core::{Device, EffectType};
use ambifx_registry::{Context, Effect, EffectRegistry};
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Write a configuration with one slot per effect at default settings
    Init {
        /// Output TOML file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },

    /// Validate a configuration file
    Check {
        /// TOML file to check
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    let registry = EffectRegistry::new();

    match args.command {
        ConfigCommand::Init { output } => {
            let mut ctx = Context::default();
            let mut config = EngineConfig::new(&Device::default());
            for descriptor in registry.all_effects() {
                if descriptor.effect_type == EffectType::Null {
                    continue;
                }
                let mut effect = Effect::new();
                effect.set_type(&mut ctx, &registry, descriptor.effect_type)?;
                config.slots.push(SlotConfig::from_effect(&effect, 1.0));
            }
            config.save(&output)?;
            println!("Wrote {} with {} slot(s)", output.display(), config.slots.len());
        }
        ConfigCommand::Check { file } => {
            let config = EngineConfig::load(&file)?;
            config.validate(&registry)?;
            let device = config.device.to_device()?;
            println!(
                "{}: OK ({} Hz, {}, {} slot(s) on '{}')",
                file.display(),
                device.sample_rate,
                device.layout.name(),
                config.slots.len(),
                config.device.backend
            );
        }
    }

    Ok(())
}
