// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::env;

use colored::*;
use ipscout_common::config::Config;
use ipscout_common::models::adapter::{AdapterInfo, Netmask};
use ipscout_common::system::AdapterRepository;
use ipscout_core::{mask, system::SystemRepo};

use crate::{
    iprint,
    terminal::{
        colors,
        print::{self, GLOBAL_KEY_WIDTH, Print},
    },
};

pub fn info(_cfg: &Config) -> anyhow::Result<()> {
    GLOBAL_KEY_WIDTH.set(10);

    Print::header("local system");
    let hostname: String = sys_info::hostname()?;
    print::aligned_line("Hostname", hostname);
    let release = sys_info::os_release().unwrap_or_else(|_| String::from(""));
    let os_name = sys_info::os_type()?;
    print::aligned_line("OS", format!("{} {}", os_name, release));
    if let Ok(user) = env::var("USER").or_else(|_| env::var("USERNAME")) {
        print::aligned_line("User", user);
    }

    Print::header("network adapters");
    let adapters = SystemRepo.adapters()?;
    print_adapters(&adapters);

    Ok(())
}

fn print_adapters(adapters: &[AdapterInfo]) {
    for (idx, adapter) in adapters.iter().enumerate() {
        print::tree_head(idx, &adapter.name);

        let mut details: Vec<(String, ColoredString)> = Vec::new();

        if !adapter.description.is_empty() && adapter.description != adapter.name {
            details.push((
                "Description".to_string(),
                adapter.description.color(colors::SECONDARY),
            ));
        }

        for assignment in &adapter.addresses {
            let address: ColoredString = assignment.address.to_string().color(colors::IPV4_ADDR);

            let (prefix_len, mask_addr) = match assignment.netmask {
                Netmask::Prefix(p) => (Some(p), mask::mask_from_prefix(p)),
                Netmask::Mask(m) => (mask::prefix_len_from_mask(m).ok(), m),
            };

            let value: ColoredString = match prefix_len {
                Some(p) => {
                    let prefix = p.to_string().color(colors::IPV4_PREFIX);
                    format!("{address}/{prefix}").color(colors::SEPARATOR)
                }
                None => address,
            };

            details.push(("IPv4".to_string(), value));
            details.push((
                "Mask".to_string(),
                mask_addr.to_string().color(colors::SUBNET_MASK),
            ));
        }

        print::as_tree(details);

        if idx + 1 != adapters.len() {
            iprint!();
        }
    }
}
