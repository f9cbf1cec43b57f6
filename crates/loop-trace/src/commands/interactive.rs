//! Interactive source selection.
//!
//! Used when the binary runs without a subcommand: asks whether to capture
//! from a device or read the default trace file, and collects credentials.

use crate::acquire::AcquisitionConfig;
use crate::utils::config::DEFAULT_TRACE_FILE;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

pub const INVALID_CHOICE_MESSAGE: &str = "Invalid choice. Please enter 1 or 2.";

/// Ask the operator where the trace comes from
///
/// # Returns
/// `None` after printing `INVALID_CHOICE_MESSAGE` for anything but 1 or 2
pub fn prompt_acquisition<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Option<AcquisitionConfig>> {
    let choice = ask(
        input,
        output,
        &format!(
            "Do you want to (1) connect to the device or (2) read from a text file named '{}'? Enter 1 or 2: ",
            DEFAULT_TRACE_FILE
        ),
    )?;

    match choice.as_str() {
        "1" => {
            let host = ask(input, output, "Enter device IP address: ")?;
            let username = ask(input, output, "Enter username: ")?;
            let password = ask_raw(input, output, "Password: ")?;
            Ok(Some(AcquisitionConfig::live(host, username, password)))
        }
        "2" => Ok(Some(AcquisitionConfig::file(DEFAULT_TRACE_FILE))),
        _ => {
            writeln!(output, "{}", INVALID_CHOICE_MESSAGE)?;
            Ok(None)
        }
    }
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    Ok(ask_raw(input, output, prompt)?.trim().to_string())
}

/// Like `ask`, but keeps surrounding spaces; only the line ending is dropped
fn ask_raw<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read from standard input")?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
