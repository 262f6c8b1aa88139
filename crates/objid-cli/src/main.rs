// Copyright 2026 objid contributors
// SPDX-License-Identifier: Apache-2.0

//! Object declaration scanner command-line interface.
//!
//! This is the main entry point for the `objid` command.

use clap::{ArgAction, Parser, Subcommand};
use miette::Result;
use objid_cli::commands;
use tracing_subscriber::EnvFilter;

/// objid: find and check the object declarations of an app
#[derive(Debug, Parser)]
#[command(name = "objid")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the object declarations in source files
    Scan {
        /// Source file or directory to scan
        #[arg(default_value = ".")]
        path: String,

        /// Define a preprocessor symbol (repeatable)
        #[arg(short = 'D', long = "define", value_name = "SYMBOL")]
        defines: Vec<String>,

        /// Print JSON instead of one line per declaration
        #[arg(long)]
        json: bool,
    },

    /// Check declared ids against consumption data and the app's id ranges
    Check {
        /// Source file or directory to check
        #[arg(default_value = ".")]
        path: String,

        /// JSON file mapping object kinds to consumed ids
        #[arg(long, value_name = "FILE")]
        consumption: String,

        /// Define a preprocessor symbol (repeatable)
        #[arg(short = 'D', long = "define", value_name = "SYMBOL")]
        defines: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Command::Scan {
            path,
            defines,
            json,
        } => commands::scan::run(&path, &defines, json).map(|()| 0),
        Command::Check {
            path,
            consumption,
            defines,
        } => commands::check::run(&path, &consumption, &defines),
    };

    // Exit with appropriate code
    match result {
        Ok(0) => std::process::exit(0),
        Ok(_) => std::process::exit(1),
        Err(e) => {
            eprintln!("{e:?}");
            std::process::exit(1);
        }
    }
}

fn directive_for_verbosity(v: u8) -> &'static str {
    // Targets are module paths: `objid_cli` and `objid_core`, not `objid`.
    match v {
        0 => "objid_cli=info,objid_core=warn",
        1 => "objid_cli=debug,objid_core=debug",
        _ => "objid_cli=trace,objid_core=trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn directive_defaults() {
        assert_eq!(directive_for_verbosity(0), "objid_cli=info,objid_core=warn");
        assert_eq!(directive_for_verbosity(1), "objid_cli=debug,objid_core=debug");
        assert_eq!(directive_for_verbosity(2), "objid_cli=trace,objid_core=trace");
        assert_eq!(directive_for_verbosity(9), "objid_cli=trace,objid_core=trace");
    }

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_repeated_defines() {
        let cli = Cli::parse_from(["objid", "-vv", "scan", "src", "-D", "CLEAN24", "--define", "DEBUG"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Scan { path, defines, json } => {
                assert_eq!(path, "src");
                assert_eq!(defines, ["CLEAN24", "DEBUG"]);
                assert!(!json);
            }
            Command::Check { .. } => panic!("expected scan"),
        }
    }
}
