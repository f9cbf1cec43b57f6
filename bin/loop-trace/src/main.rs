//! Loop Trace CLI
//!
//! Detects switching loops from broadcast trace dumps, read from a saved
//! file or captured live from a switch over SSH.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use loop_trace::acquire::{AcquisitionConfig, DeviceProfile};
use loop_trace::commands::{display_version, execute_detect, prompt_acquisition, validate_args, DetectArgs};
use loop_trace::parser::LinePolicy;
use loop_trace::utils::config::{DEFAULT_SSH_PORT, DEFAULT_TRACE_FILE};

/// Loop Trace - switching loop detection from switch trace dumps
#[derive(Parser, Debug)]
#[command(name = "loop-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute (interactive menu when omitted)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Skip malformed broadcast lines instead of aborting the run
    #[arg(long, global = true)]
    skip_malformed: bool,

    /// Threshold configuration file (TOML with `multiplier` and `floor`)
    #[arg(long, global = true)]
    thresholds: Option<PathBuf>,

    /// Write the raw trace text to this file
    #[arg(long, global = true)]
    save_trace: Option<PathBuf>,

    /// Write the live session transcript to this file
    #[arg(long, global = true)]
    session_log: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a saved trace file
    File {
        /// Path to the trace dump
        #[arg(short, long, default_value = DEFAULT_TRACE_FILE)]
        path: PathBuf,
    },

    /// Capture a trace from a live device and analyze it
    Live {
        /// Device IP address or hostname
        #[arg(long)]
        host: String,

        /// SSH username
        #[arg(short, long)]
        username: String,

        /// SSH password (prompted for when omitted)
        #[arg(short, long, env = "LOOP_TRACE_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// SSH port
        #[arg(long, default_value_t = DEFAULT_SSH_PORT)]
        port: u16,

        /// Device CLI profile
        #[arg(long, default_value = "extreme_vsp")]
        profile: DeviceProfile,

        /// Seconds the device traces before the dump is collected
        #[arg(long, default_value = "15")]
        capture_secs: u64,

        /// Seconds a single command may take to return to the prompt
        #[arg(long, default_value = "30")]
        command_timeout_secs: u64,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        Env::default().default_filter_or(format!("{},russh=warn", log_level)),
    )
    .init();

    let acquisition = match cli.command {
        Some(Commands::File { path }) => AcquisitionConfig::file(path),

        Some(Commands::Live {
            host,
            username,
            password,
            port,
            profile,
            capture_secs,
            command_timeout_secs,
        }) => {
            let password = match password {
                Some(password) => password,
                None => read_password()?,
            };

            AcquisitionConfig {
                port,
                profile,
                capture_window: Duration::from_secs(capture_secs),
                command_timeout: Duration::from_secs(command_timeout_secs),
                ..AcquisitionConfig::live(host, username, password)
            }
        }

        Some(Commands::Version) => {
            display_version();
            return Ok(());
        }

        None => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut output = io::stdout();
            match prompt_acquisition(&mut input, &mut output)? {
                Some(config) => config,
                None => return Ok(()),
            }
        }
    };

    let args = DetectArgs {
        acquisition,
        line_policy: if cli.skip_malformed {
            LinePolicy::SkipAndWarn
        } else {
            LinePolicy::Strict
        },
        threshold_file: cli.thresholds,
        save_trace: cli.save_trace,
        session_log: cli.session_log,
        ..Default::default()
    };

    // Validate args first
    validate_args(&args)?;

    // Execute detection
    execute_detect(args)?;

    Ok(())
}

/// Read the SSH password from standard input
fn read_password() -> Result<String> {
    print!("Password: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
