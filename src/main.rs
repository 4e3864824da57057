//! CLI entry point for the wave function collapse tile solver

use clap::Parser;
use wavetile::io::cli::{Cli, run};

fn main() -> wavetile::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_filter()?)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    run(&cli).map(|_| ())
}
