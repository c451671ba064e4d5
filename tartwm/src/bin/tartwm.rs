//! Starts the TartWM host, or sends it a command.
//!
//! Without positional arguments this process becomes the long-lived host: it
//! binds the command socket for the current display, spawns `tartwm-watcher`,
//! and applies inbound commands until it is signalled to stop. With positional
//! arguments it is a one-shot client that delivers the joined command line to
//! an already-running host.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::io::prelude::*;
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::process::exit;

use tartwm::utils::log::setup_logging;
use tartwm_core::{join_line, CommandSocket, Config, Manager};

#[derive(Debug, Parser)]
#[command(
    version,
    about,
    override_usage = "tartwm [-c config_file] [command [args...]]"
)]
struct Cli {
    /// Read settings from this file instead of the compiled-in defaults
    #[arg(short = 'c', value_name = "config_file")]
    config_file: Option<PathBuf>,

    /// Deliver this command to the running host instead of becoming the host
    #[arg(value_name = "command", trailing_var_arg = true)]
    command: Vec<String>,
}

fn main() -> Result<()> {
    let cli = parse_cli();

    if cli.command.is_empty() {
        run_host(cli.config_file.as_deref())
    } else {
        send_command(&cli.command)
    }
}

/// Parses the process arguments, keeping every diagnostic on stderr.
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            eprint!("{err}");
            exit(0);
        }
        Err(err) => {
            eprint!("{err}");
            exit(1);
        }
    }
}

fn run_host(config_file: Option<&Path>) -> Result<()> {
    setup_logging();
    tracing::info!("tartwm booting...");

    let config = match config_file {
        Some(file) => Config::from_file(file),
        None => Config::default(),
    };

    let rt = tokio::runtime::Runtime::new().context("Couldn't init the tokio runtime")?;
    rt.block_on(Manager::new(config).event_loop())
        .context("Couldn't run the host")?;

    tracing::info!("Completed");
    Ok(())
}

fn send_command(command: &[String]) -> Result<()> {
    let socket_file = CommandSocket::socket_path()?;
    let mut host = UnixStream::connect(&socket_file)
        .with_context(|| format!("Is TartWM running? (no host at {})", socket_file.display()))?;
    writeln!(host, "{}", join_line(command))?;
    Ok(())
}
