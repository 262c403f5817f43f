mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{cluster, geohash, wkt};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log to stderr at a level chosen by `-v`, unless `RUST_LOG` is set.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match &cli.command {
        Commands::Wkt(args) => wkt::run(&cli, args),
        Commands::Geohash(args) => geohash::run(&cli, args),
        Commands::Cluster(args) => cluster::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
