// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! OS-backed adapter enumeration.
//!
//! Wraps `pnet::datalink::interfaces()` behind the [`AdapterRepository`]
//! trait so everything above this layer stays testable with canned data.

use ipscout_common::models::adapter::{AdapterAddress, AdapterInfo, Netmask};
use ipscout_common::system::AdapterRepository;
use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::IpNetwork;

pub struct SystemRepo;

impl AdapterRepository for SystemRepo {
    fn adapters(&self) -> anyhow::Result<Vec<AdapterInfo>> {
        Ok(datalink::interfaces().iter().map(to_adapter_info).collect())
    }
}

fn to_adapter_info(interface: &NetworkInterface) -> AdapterInfo {
    let addresses: Vec<AdapterAddress> = interface
        .ips
        .iter()
        .filter_map(|net| match net {
            IpNetwork::V4(v4) => Some(AdapterAddress::new(v4.ip(), Netmask::Prefix(v4.prefix()))),
            IpNetwork::V6(_) => None,
        })
        .collect();

    AdapterInfo::new(
        interface.name.clone(),
        interface.description.clone(),
        addresses,
    )
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
