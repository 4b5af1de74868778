// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// cupskit — command-line front end.
//
// Entry point. Initialises logging, parses arguments, and dispatches to the
// command implementations.

mod commands;
mod paths;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use cupskit_core::{ConfigUpdate, Encryption};

/// Natural model-name sorting, client settings, and PPD default rewriting.
#[derive(Debug, Parser)]
#[command(name = "cupskit", version, about)]
struct Cli {
    /// Client settings file (defaults to $XDG_CONFIG_HOME/cupskit/client.json).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print model names (one per line) in natural order.
    Sort {
        /// Read from this file instead of stdin.
        file: Option<PathBuf>,
    },
    /// Compare two model names; prints -1, 0 or 1.
    Compare { a: String, b: String },
    /// Rewrite a PPD's *Default lines with the given choices.
    Defaults {
        /// PPD file to read.
        ppd: PathBuf,
        /// Choice to make the default, as KEYWORD=CHOICE. Repeatable.
        #[arg(long = "set", value_name = "KEYWORD=CHOICE")]
        marks: Vec<String>,
        /// Write here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Fail unless cupskit is at least VERSION.
    Require { version: String },
    /// Print the effective client settings as JSON, or change and save them.
    Config {
        /// User name to connect as.
        #[arg(long)]
        user: Option<String>,
        /// Print server host name or socket path.
        #[arg(long)]
        server: Option<String>,
        /// IPP port.
        #[arg(long)]
        port: Option<u16>,
        /// IfRequested, Never, Required, Always, or the code 0-3.
        #[arg(long)]
        encryption: Option<Encryption>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    tracing::debug!(command = ?cli.command, "cupskit starting");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("cupskit: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> cupskit_core::error::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Sort { file } => match file {
            Some(path) => {
                let reader = std::io::BufReader::new(std::fs::File::open(path)?);
                commands::sort_lines(reader, &mut out)
            }
            None => commands::sort_lines(std::io::stdin().lock(), &mut out),
        },
        Command::Compare { a, b } => commands::compare(&a, &b, &mut out),
        Command::Defaults { ppd, marks, output } => {
            commands::defaults(&ppd, &marks, output.as_deref(), &mut out)
        }
        Command::Require { version } => cupskit_core::require(&version),
        Command::Config {
            user,
            server,
            port,
            encryption,
        } => {
            let path = cli.config.unwrap_or_else(paths::client_config_path);
            let update = ConfigUpdate {
                user,
                server,
                port,
                encryption,
            };
            if update.is_empty() {
                commands::show_config(&path, |key| std::env::var(key).ok(), &mut out)
            } else {
                commands::update_config(&path, &update, &mut out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_repeated_marks() {
        let cli = Cli::try_parse_from([
            "cupskit", "defaults", "laser.ppd", "--set", "PageSize=A4", "--set", "Duplex=None",
        ])
        .unwrap();
        match cli.command {
            Command::Defaults { marks, output, .. } => {
                assert_eq!(marks, vec!["PageSize=A4", "Duplex=None"]);
                assert!(output.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["cupskit", "config", "--config", "/tmp/c.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.json")));
    }

    #[test]
    fn config_setters_parse() {
        let cli = Cli::try_parse_from([
            "cupskit", "config", "--server", "print.example.org", "--port", "8631",
            "--encryption", "always",
        ])
        .unwrap();
        match cli.command {
            Command::Config {
                user,
                server,
                port,
                encryption,
            } => {
                assert_eq!(user, None);
                assert_eq!(server.as_deref(), Some("print.example.org"));
                assert_eq!(port, Some(8631));
                assert_eq!(encryption, Some(Encryption::Always));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn config_rejects_bad_encryption() {
        assert!(Cli::try_parse_from(["cupskit", "config", "--encryption", "sometimes"]).is_err());
        assert!(Cli::try_parse_from(["cupskit", "config", "--port", "70000"]).is_err());
    }
}
