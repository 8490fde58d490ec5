//! Configuration check tool: load a stream configuration, resolve every
//! server context, and print the effective tcp_brutal settings.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tcp_brutal::config::load_config;

#[derive(Parser)]
#[command(name = "brutal-check")]
#[command(about = "Validate a stream configuration and print effective tcp_brutal settings", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: PathBuf,

    /// Emit machine-readable JSON instead of aligned text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tcp_brutal=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let resolved = match load_config(&cli.config) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("{}: configuration check failed: {}", cli.config.display(), e);
            std::process::exit(1);
        }
    };

    if cli.json {
        let servers: Vec<_> = resolved.servers().map(|(_, server)| server).collect();
        println!("{}", serde_json::to_string_pretty(&servers)?);
    } else {
        for (id, server) in resolved.servers() {
            println!(
                "{} {:<16} listen={:<20} enable={:<5} rate={} cwnd_gain={}",
                id,
                server.name,
                server.listen,
                server.brutal.enable,
                server.brutal.rate,
                server.brutal.cwnd_gain,
            );
        }
        println!(
            "{}: configuration OK ({} servers)",
            cli.config.display(),
            resolved.len()
        );
    }

    Ok(())
}
