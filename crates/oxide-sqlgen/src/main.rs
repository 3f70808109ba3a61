//! oxide-sqlgen CLI
//!
//! Renders JSON migration scripts to dialect-specific SQL.

use clap::Parser;
use tracing_subscriber::FmtSubscriber;

use oxide_sqlgen::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries SQL.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level())
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    oxide_sqlgen::run(&cli)?;
    Ok(())
}
