//! Backend and device listing command.

use ambifx_backend::{BackendFactory, BackendType, DevProbe, NullBackendFactory};
use clap::Args;

#[derive(Args)]
pub struct DevicesArgs {
    /// Also list capture devices
    #[arg(long)]
    capture: bool,
}

pub fn run(args: DevicesArgs) -> anyhow::Result<()> {
    let factories: [&dyn BackendFactory; 1] = [&NullBackendFactory];

    println!("Backends");
    println!("========");
    println!();

    for factory in factories {
        if !factory.init() {
            println!("  {} (unavailable)", factory.name());
            continue;
        }

        let supported: Vec<&str> = [
            (BackendType::Playback, "playback"),
            (BackendType::Capture, "capture"),
            (BackendType::Loopback, "loopback"),
        ]
        .into_iter()
        .filter(|(kind, _)| factory.query_support(*kind))
        .map(|(_, name)| name)
        .collect();
        println!("  {} ({})", factory.name(), supported.join(", "));

        println!("    Playback devices:");
        for name in factory.probe(DevProbe::AllDevices) {
            println!("      {name}");
        }

        if args.capture {
            let devices = factory.probe(DevProbe::CaptureDevices);
            println!("    Capture devices:");
            if devices.is_empty() {
                println!("      (none)");
            }
            for name in devices {
                println!("      {name}");
            }
        }
    }

    Ok(())
}
