mod cmd;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "turnguard",
    about = "Stop-hook gate — re-injects the principles reminder until the turn confirms it",
    version,
    propagate_version = true
)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run as the stop hook: read the event JSON from stdin, emit the block
    /// payload (if any) on stdout, exit 0
    Hook,

    /// Evaluate the gate against a transcript without the stdin protocol
    Check {
        /// Transcript JSONL file to inspect
        #[arg(long)]
        transcript: PathBuf,

        /// Simulate a re-entrant invocation
        #[arg(long)]
        reentrant: bool,
    },

    /// Link documentation and register the stop hook in the runtime directory
    Install {
        /// Directory containing the documentation to link
        #[arg(long, default_value = "docs")]
        from: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Logging goes to stderr: stdout is the hook protocol channel.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Hook => cmd::hook::run(),
        Commands::Check {
            transcript,
            reentrant,
        } => cmd::check::run(&transcript, reentrant, cli.json),
        Commands::Install { from } => cmd::install::run(&from),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
