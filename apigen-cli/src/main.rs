//! apigen CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use commands::GenerateCommand;

#[derive(Parser)]
#[command(name = "apigen")]
#[command(version)]
#[command(about = "Generate starter API projects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a starter API project
    Generate {
        /// Name of the API project
        #[arg(short, long)]
        name: String,

        /// Override the template archive URL
        #[arg(long, value_name = "URL", conflicts_with_all = ["from_dir", "skeleton"])]
        template_url: Option<String>,

        /// Copy a local template directory instead of downloading
        #[arg(long, value_name = "DIR", conflicts_with = "skeleton")]
        from_dir: Option<PathBuf>,

        /// Generate the built-in offline skeleton
        #[arg(long)]
        skeleton: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let cancel = CancellationToken::new();
    tokio::spawn(shutdown_signal(cancel.clone()));

    match cli.command {
        Commands::Generate {
            name,
            template_url,
            from_dir,
            skeleton,
        } => {
            let cmd = GenerateCommand::new(name, template_url, from_dir, skeleton)?;
            cmd.execute(&cancel).await?;
        }
    }

    Ok(())
}

/// Turn Ctrl+C or SIGTERM into a cancellation of the in-flight generation.
async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    cancel.cancel();
}
