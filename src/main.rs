//! Command-line interface for record-populator
//!
//! # Usage Examples
//!
//! ```bash
//! # Populate one instance
//! record-populator populate --config people.yaml --type Person
//!
//! # Populate a fixed number of reproducible instances
//! record-populator populate --config people.yaml --type Person --count 10 --seed 42
//!
//! # Populate a randomly sized batch (0 to 128 instances)
//! record-populator populate --config people.yaml --type Person --batch --pretty
//!
//! # Show how every field of every type will be populated
//! record-populator check --config people.yaml
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use clap::Parser;
use record_populator::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    if let Err(e) = run(cli, &mut stdout.lock()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
