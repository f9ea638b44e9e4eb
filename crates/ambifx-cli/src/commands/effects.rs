//! Effect listing and information command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use ambifx_core::{PropertyDescriptor, PropertyKind};
use ambifx_registry::{EffectDescriptor, EffectRegistry};
use clap::Args;
use serde::Serialize;

#[derive(Args)]
pub struct EffectsArgs {
    /// Show details for a specific effect
    #[arg(value_name = "EFFECT")]
    effect: Option<String>,

    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct EffectInfo {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    description: &'static str,
    type_id: i32,
    parameters: Vec<ParamInfo>,
}

#[derive(Serialize)]
struct ParamInfo {
    id: i32,
    key: &'static str,
    name: &'static str,
    range: String,
    default: String,
}

fn range_text(desc: &PropertyDescriptor) -> String {
    match desc.kind {
        PropertyKind::Enum(labels) => labels.join(" | ").to_lowercase(),
        PropertyKind::Bool => "on | off".to_string(),
        _ => format!("{} .. {}", desc.format_value(desc.min), desc.format_value(desc.max)),
    }
}

fn effect_info(registry: &EffectRegistry, descriptor: &EffectDescriptor) -> anyhow::Result<EffectInfo> {
    let table = registry.factory_by_id(descriptor.id)?.property_table();
    Ok(EffectInfo {
        id: descriptor.id,
        name: descriptor.name,
        category: descriptor.category.name(),
        description: descriptor.description,
        type_id: descriptor.effect_type.raw(),
        parameters: table
            .descriptors()
            .iter()
            .map(|desc| ParamInfo {
                id: desc.id,
                key: desc.key,
                name: desc.name,
                range: range_text(desc),
                default: desc.format_value(desc.default),
            })
            .collect(),
    })
}

pub fn run(args: EffectsArgs) -> anyhow::Result<()> {
    let registry = EffectRegistry::new();

    if let Some(effect_id) = &args.effect {
        let descriptor = registry
            .descriptor(&effect_id.to_lowercase())
            .ok_or_else(|| anyhow::anyhow!("Unknown effect: {}", effect_id))?;
        let info = effect_info(&registry, descriptor)?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&info)?);
            return Ok(());
        }

        println!("{} ({})", info.name, info.id);
        println!("{}", "=".repeat(info.name.len() + info.id.len() + 3));
        println!();
        println!("{}", info.description);
        println!("Category: {}  Type: 0x{:04X}", info.category, info.type_id);
        println!();

        if info.parameters.is_empty() {
            println!("No parameters.");
            return Ok(());
        }

        println!("Parameters:");
        println!();
        println!("  {:16}  {:18}  {:12}  {}", "Key", "Name", "Default", "Range");
        println!("  {:16}  {:18}  {:12}  {}", "---", "----", "-------", "-----");
        for param in &info.parameters {
            println!(
                "  {:16}  {:18}  {:12}  {}",
                param.key, param.name, param.default, param.range
            );
        }

        println!();
        println!("Example usage:");
        println!();
        let params: Vec<String> = info
            .parameters
            .iter()
            .map(|p| format!("--param {}={}", p.key, p.default.replace(' ', "")))
            .collect();
        println!("  ambifx render out.wav --effect {} {}", info.id, params.join(" "));
    } else {
        let infos = registry
            .all_effects()
            .into_iter()
            .map(|descriptor| effect_info(&registry, descriptor))
            .collect::<anyhow::Result<Vec<_>>>()?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&infos)?);
            return Ok(());
        }

        println!("Available Effects");
        println!("=================");
        println!();
        for info in &infos {
            println!("  {:12} {:12} - {}", info.id, info.category, info.description);
        }
        println!();
        println!("Use 'ambifx effects <id>' for detailed parameter info.");
    }

    Ok(())
}
