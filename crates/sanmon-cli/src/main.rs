use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use sanmon_check::{render, run_checks};
use sanmon_core::Config;
use sanmon_probe::WireProbe;

#[derive(Parser)]
#[command(
    name = "sanmon",
    about = "Health check plugin for DotHill/AssuredSAN storage arrays",
    version
)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long)]
    config: PathBuf,

    /// Override the per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Log probe detail to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    // The plugin protocol owns stdout: exactly one line, then exit with
    // the matching code. Any fatal error before the run produces
    // components is reported as UNKNOWN.
    match run().await {
        Ok((message, code)) => {
            println!("{message}");
            std::process::exit(code);
        }
        Err(e) => {
            println!("UNKNOWN -- {e}");
            std::process::exit(3);
        }
    }
}

async fn run() -> anyhow::Result<(String, i32)> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("sanmon_probe={level}").parse()?)
                .add_directive(format!("sanmon_check={level}").parse()?),
        )
        .init();

    let mut config = Config::load(&cli.config)?;
    if let Some(secs) = cli.timeout {
        anyhow::ensure!(
            (1..=60).contains(&secs),
            "timeout must be between 1 and 60 seconds, got {secs}"
        );
        config.timeout = Duration::from_secs(secs);
    }

    let mut probe = WireProbe::new(config.credential_hash.clone(), config.timeout);
    let aggregate = run_checks(&config, &mut probe).await;
    Ok(render(&aggregate))
}
