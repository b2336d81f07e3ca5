// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Command Line Interface Definitions
//!
//! This module defines the strict schema for user input.
//!
//! It serves as the single source of truth for the application's command-line
//! interface. While the *execution* logic for each command resides in its own
//! submodule (e.g. `local.rs`), the *definition* of the arguments, flags, and
//! help text is centralized here.
//!
//! Via the `From<&CommandLine> for Config` implementation the external
//! interface (CLI flags) stays decoupled from the internal application state
//! (`Config`), so the core libraries remain agnostic of the user interface
//! layer.

pub mod info;
pub mod inspect;
pub mod local;
pub mod public;

use clap::{ArgAction, Parser, Subcommand};
use ipscout_common::config::Config;

#[derive(Parser)]
#[command(name = "ipscout")]
#[command(about = "IPv4 address parsing, CIDR matching and local-address resolution.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Keep logs and colors but hide the ASCII art
    #[arg(long = "no-banner", global = true)]
    pub no_banner: bool,

    /// Reduce UI visual density (-q: reduce styling, -qq: raw values)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Increase logging detail (-v: debug logs)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display local adapters and their IPv4 assignments
    #[command(alias = "i")]
    Info,

    /// Resolve the local machine address
    #[command(alias = "l")]
    Local {
        /// CIDR hint for the local network, e.g. 192.168.2.0/24
        #[arg(long, value_name = "CIDR")]
        cidr: Option<String>,

        /// Derive the CIDR hint from the single ethernet-like adapter
        #[arg(long, conflicts_with = "cidr")]
        guess_cidr: bool,
    },

    /// Resolve the externally visible address via an IP echo service
    #[command(alias = "p")]
    Public {
        /// Number of independent fetch attempts (no backoff between them)
        #[arg(long, default_value_t = 1)]
        attempts: u32,
    },

    /// Extract every IPv4 address embedded in free text
    Parse {
        #[arg(value_name = "TEXT", num_args(1..))]
        text: Vec<String>,
    },

    /// Test whether an address belongs to a CIDR block
    Check {
        #[arg(value_name = "ADDRESS")]
        address: String,
        #[arg(value_name = "CIDR")]
        cidr: String,
    },

    /// Classify an address as RFC1918-private or public
    Classify {
        #[arg(value_name = "ADDRESS")]
        address: String,
    },

    /// Recover the prefix length of a dotted-decimal subnet mask
    Mask {
        #[arg(value_name = "MASK")]
        mask: String,
    },

    /// Render an address as binary digits
    Binary {
        #[arg(value_name = "ADDRESS")]
        address: String,

        /// Join bytes with a separator for readability
        #[arg(long)]
        grouped: bool,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl From<&CommandLine> for Config {
    fn from(cmd: &CommandLine) -> Self {
        Self {
            no_banner: cmd.no_banner,
            quiet: cmd.quiet,
        }
    }
}
