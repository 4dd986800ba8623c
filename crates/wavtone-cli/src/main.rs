//! wavtone CLI - command-line front end for the PCM tone transform

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

use wavtone_cli::commands::process::{self, ProcessRequest};
use wavtone_cli::logging;

mod cli_args;
use cli_args::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = cli.overrides().resolve().and_then(|config| {
        process::run(&ProcessRequest {
            input: &cli.input,
            output: &cli.output,
            config,
            show_header: cli.show_header,
            json: cli.json,
        })
    });

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red(), e);
            ExitCode::from(1)
        }
    }
}
