// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Network Adapter Model
//!
//! A read-only snapshot of a local network adapter as reported by the OS.
//!
//! The engine never mutates these values; they are produced once per query
//! by an [`crate::system::AdapterRepository`] implementation and consumed by
//! the resolution logic.

use std::net::Ipv4Addr;

/// A single network adapter together with its unicast IPv4 assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterInfo {
    pub name: String,
    pub description: String,
    pub addresses: Vec<AdapterAddress>,
}

impl AdapterInfo {
    pub fn new(name: String, description: String, addresses: Vec<AdapterAddress>) -> Self {
        Self {
            name,
            description,
            addresses,
        }
    }

    /// All unicast IPv4 addresses assigned to this adapter.
    pub fn unicast_addrs(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        self.addresses.iter().map(|a| a.address)
    }
}

/// One unicast address assignment on an adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterAddress {
    pub address: Ipv4Addr,
    pub netmask: Netmask,
}

impl AdapterAddress {
    pub fn new(address: Ipv4Addr, netmask: Netmask) -> Self {
        Self { address, netmask }
    }
}

/// The subnet information attached to a unicast address.
///
/// Depending on the platform the OS reports either the prefix length
/// directly or only the raw dotted-decimal subnet mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Netmask {
    Prefix(u8),
    Mask(Ipv4Addr),
}
