use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rangeline::common::{BoundaryPolicy, DecodePolicy, TrimPolicy};
use rangeline::scan::scan_object;
use rangeline::{LocalStorage, PartitionDescriptor, RangeLineReader, ReaderConfig};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// Clap derives the arg parser from this struct
#[derive(Parser)]
#[command(name = "rangeline")]
#[command(about = "Read line records from byte windows of stored files")]
struct Cli {
    // global flags can go before or after the subcommand
    #[arg(long, global = true, help = "TOML config file")]
    config: Option<PathBuf>,

    // object paths (xpn:///a/b.txt or a/b.txt) resolve under this
    #[arg(long, global = true, default_value = ".", help = "Storage root directory")]
    root: PathBuf,

    #[arg(long, global = true, help = "Keep leading/trailing whitespace")]
    no_trim: bool,

    #[arg(long, global = true, help = "Fail on invalid UTF-8 instead of replacing it")]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the lines of one byte window
    Read {
        path: String,

        #[arg(long, default_value_t = 0)]
        start: u64,

        #[arg(long)]
        length: u64,

        #[arg(long, help = "Attribute edge lines to the window holding their first byte")]
        aligned: bool,
    },

    /// Read a whole object as parallel windows and print every line once
    Scan {
        path: String,

        #[arg(long, default_value_t = 64 * 1024 * 1024)]
        split_size: u64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Reads std::env::args(), exits with usage on bad input
    let cli = Cli::parse();

    // one partition failing is an error for this run, never a panic
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "rangeline failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = ReaderConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    // flags win over file/env
    if cli.no_trim {
        config.trim = TrimPolicy::Keep;
    }
    if cli.strict {
        config.decode = DecodePolicy::Strict;
    }

    // every object path resolves under --root
    let storage = LocalStorage::new(cli.root);
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Commands::Read {
            path,
            start,
            length,
            aligned,
        } => {
            if aligned {
                config.boundary = BoundaryPolicy::LineAligned;
            }

            // lines stream straight from the iterator, nothing is collected
            let partition = PartitionDescriptor::new(path, start, length);
            let reader = RangeLineReader::new(storage, config);
            let lines = reader
                .open(&partition)
                .with_context(|| format!("Failed to read partition {}", partition))?;

            for line in lines {
                writeln!(out, "{}", line)?;
            }
        }

        Commands::Scan { path, split_size } => {
            // windows must not split or repeat lines when stitched back together
            config.boundary = BoundaryPolicy::LineAligned;

            let result = scan_object(Arc::new(storage), config, &path, split_size).await?;
            for line in &result.lines {
                writeln!(out, "{}", line)?;
            }

            tracing::info!(
                path = %path,
                partitions = result.partitions,
                lines = result.lines.len(),
                "Scan complete"
            );
        }
    }

    out.flush()?;
    Ok(())
}
