// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Ipscout CLI Entry Point
//!
//! The binary entry point for ipscout.
//!
//! This module bootstraps the application runtime and manages the global
//! lifecycle of the process. It isolates the command-line interface layer
//! from the core library logic.
//!
//! ## Responsibilities
//!
//! 1.  **Runtime Initialization**: The `#[tokio::main]` attribute sets up the
//!     asynchronous runtime used by the public-address fetch.
//! 2.  **Global State Setup**: Initializes the `tracing` subscriber for logging
//!     and configures terminal output modes (verbosity, quiet mode, banner).
//! 3.  **Configuration Mapping**: Converts raw command-line arguments (parsed
//!     via `clap`) into the internal `Config` struct used by the commands.
//! 4.  **Command Dispatch**: Routes execution to the appropriate module in
//!     `commands/`.
//! 5.  **Error Boundary**: Any errors propagated up from subcommands are caught
//!     here, logged to the error stream, and converted into a non-zero
//!     `ExitCode`.

mod commands;
mod terminal;

use std::process::ExitCode;

use ipscout_common::{config::Config, error};

use crate::{
    commands::{CommandLine, Commands, info, inspect, local, public},
    terminal::{logging, print::Print},
};

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();
    logging::init(commands.verbosity);

    let cfg = Config::from(&commands);

    let _ = Print::init(&cfg);
    Print::banner();

    let result = match &commands.command {
        Commands::Info => info::info(&cfg),
        Commands::Local { cidr, guess_cidr } => local::local(cidr.as_deref(), *guess_cidr, &cfg),
        Commands::Public { attempts } => public::public(*attempts, &cfg).await,
        Commands::Parse { text } => inspect::parse(&text.join(" "), &cfg),
        Commands::Check { address, cidr } => inspect::check(address, cidr, &cfg),
        Commands::Classify { address } => inspect::classify(address, &cfg),
        Commands::Mask { mask } => inspect::mask(mask, &cfg),
        Commands::Binary { address, grouped } => inspect::binary(address, *grouped, &cfg),
    };

    let exit_code = match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Critical failure: {e}");
            ExitCode::FAILURE
        }
    };

    Print::end_of_program();

    exit_code
}
