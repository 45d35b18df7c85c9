//! Command line front end for the drift diff engine.

use std::fmt::Display;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use drift_core::{diff, DiffResult};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "drift", version, about = "Windowed streaming diff for text files")]
struct Cli {
    /// Left-hand input file
    left: PathBuf,

    /// Right-hand input file
    right: PathBuf,

    /// Diff character by character instead of line by line
    #[arg(long)]
    chars: bool,

    /// Window capacity in lines for line based diffs
    #[arg(long, default_value_t = diff::DEFAULT_LINE_WINDOW, value_parser = parse_window)]
    window: usize,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn parse_window(value: &str) -> Result<usize, String> {
    let window: usize = value.parse().map_err(|e| format!("{e}"))?;
    if window == 0 {
        return Err("window capacity must be at least 1".to_string());
    }
    Ok(window)
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.chars {
        let left = std::fs::read_to_string(&cli.left)
            .with_context(|| format!("failed to read {}", cli.left.display()))?;
        let right = std::fs::read_to_string(&cli.right)
            .with_context(|| format!("failed to read {}", cli.right.display()))?;
        report(&diff::characters(&left, &right), cli.json)
    } else {
        let result = diff::files_with_window(&cli.left, &cli.right, cli.window).with_context(
            || {
                format!(
                    "failed to diff {} and {}",
                    cli.left.display(),
                    cli.right.display()
                )
            },
        )?;
        report(&result, cli.json)
    }
}

fn report<T>(result: &DiffResult<T>, json: bool) -> anyhow::Result<ExitCode>
where
    T: Display + Serialize,
{
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print!("{result}");
    }

    // Diff convention: failure status when the inputs differ.
    Ok(if result.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_window_rejects_zero() {
        assert!(parse_window("0").is_err());
        assert!(parse_window("x").is_err());
        assert_eq!(parse_window("1"), Ok(1));
        assert_eq!(parse_window("500"), Ok(500));
    }

    #[test]
    fn test_cli_rejects_zero_window() {
        let parsed = Cli::try_parse_from(["drift", "a.txt", "b.txt", "--window", "0"]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from(["drift", "a.txt", "b.txt", "--window", "25"]);
        assert_eq!(parsed.unwrap().window, 25);
    }
}

