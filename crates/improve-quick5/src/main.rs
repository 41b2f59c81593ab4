use std::path::PathBuf;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use imtable_variants::Diagnostics;
use improve_quick5::{Config, DEFAULT_INPUT, DEFAULT_OUTPUT, improve};

#[derive(Parser, Debug)]
#[command(name = "improve-quick5", version)]
#[command(
    about = "Give short canonical spellings in quick5.txt weight 900 when the character also has an x-prefixed spelling"
)]
struct Cli {
    /// Input file
    #[arg(short = 'i', long = "inputfilename", default_value = DEFAULT_INPUT)]
    input: PathBuf,
    /// Output file
    #[arg(short = 'o', long = "outputfilename", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Print debugging output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config = Config {
        input: cli.input,
        output: cli.output,
        ..Config::default()
    };
    // No variant classifier ships with this tool.
    let diagnostics = Diagnostics::new();
    debug!("{config:?} {diagnostics:?}");

    improve(&config, &diagnostics)?;
    Ok(())
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .init();
}
