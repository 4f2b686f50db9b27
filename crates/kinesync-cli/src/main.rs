use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;
use tracing_subscriber::EnvFilter;

mod commands;

/// Reconcile a delivery stream against its declared spec.
#[derive(Debug, Parser)]
#[command(name = "kinesync", version)]
struct Cli {
    /// Emit logs as JSON lines instead of human-readable text.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the delta and the calls one pass would make, without making them.
    Plan {
        /// Desired spec (JSON).
        #[arg(long)]
        desired: PathBuf,
        /// `describe-delivery-stream` output (JSON).
        #[arg(long)]
        described: PathBuf,
        /// `list-tags-for-delivery-stream` output (JSON). No tags when omitted.
        #[arg(long)]
        tags: Option<PathBuf>,
    },
    /// Describe the live stream and run one pass against it.
    Apply {
        #[arg(long)]
        desired: PathBuf,
        /// Sync config file. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        profile: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match cli.command {
        Command::Plan {
            desired,
            described,
            tags,
        } => commands::plan(&desired, &described, tags.as_deref()).await,
        Command::Apply {
            desired,
            config,
            region,
            profile,
        } => commands::apply(&desired, config.as_deref(), region, profile).await,
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
