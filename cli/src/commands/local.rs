// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use colored::*;
use ipscout_common::{config::Config, info};
use ipscout_core::cidr::CidrBlock;
use ipscout_core::classify::{self, AddressClass};
use ipscout_core::resolver::{self, LocalAddressResolver};
use ipscout_core::system::SystemRepo;

use crate::{
    iprint,
    terminal::{
        colors,
        print::{self, GLOBAL_KEY_WIDTH, Print},
    },
};

pub fn local(cidr: Option<&str>, guess_cidr: bool, _cfg: &Config) -> anyhow::Result<()> {
    let hint: Option<CidrBlock> = match (cidr, guess_cidr) {
        (Some(text), _) => Some(text.parse()?),
        (None, true) => {
            let derived =
                resolver::lan_cidr_hint(&SystemRepo, resolver::default_adapter_selector)?;
            info!("derived CIDR hint {derived} from the adapter configuration");
            Some(derived)
        }
        (None, false) => None,
    };

    let local_resolver = LocalAddressResolver::new(Box::new(SystemRepo));
    let addr = local_resolver.resolve(hint.as_ref())?;

    if Print::quiet_level() == 2 {
        iprint!("{addr}");
        return Ok(());
    }

    GLOBAL_KEY_WIDTH.set(10);
    Print::header("local address");
    print::aligned_line("Address", addr.to_string().color(colors::IPV4_ADDR));
    print::aligned_line("Class", class_detail(classify::classify(addr)));
    if let Some(hint) = hint {
        print::aligned_line("Hint", hint.to_string().color(colors::IPV4_PREFIX));
    }

    Ok(())
}

pub fn class_detail(class: AddressClass) -> ColoredString {
    match class {
        AddressClass::Private => "private (RFC1918)".yellow().bold(),
        AddressClass::Public => "public".green().bold(),
    }
}
