// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Address Classifier
//!
//! Private/public classification against the three fixed RFC1918 blocks.
//! The class is derived on demand and never stored; anything outside the
//! private blocks is public.

use std::fmt;
use std::net::Ipv4Addr;

use crate::cidr::CidrBlock;

pub const CIDR_PRIVATE_BLOCK_A: &str = "10.0.0.0/8";
pub const CIDR_PRIVATE_BLOCK_B: &str = "172.16.0.0/12";
pub const CIDR_PRIVATE_BLOCK_C: &str = "192.168.0.0/16";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressClass {
    Private,
    Public,
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressClass::Private => write!(f, "private"),
            AddressClass::Public => write!(f, "public"),
        }
    }
}

// The blocks are disjoint so evaluation order cannot change the result,
// but it is fixed (A, B, C) for determinism.
fn private_blocks() -> [CidrBlock; 3] {
    [
        CidrBlock {
            network: Ipv4Addr::new(10, 0, 0, 0),
            prefix_len: 8,
        },
        CidrBlock {
            network: Ipv4Addr::new(172, 16, 0, 0),
            prefix_len: 12,
        },
        CidrBlock {
            network: Ipv4Addr::new(192, 168, 0, 0),
            prefix_len: 16,
        },
    ]
}

/// True when the address falls inside one of the RFC1918 blocks.
pub fn is_private(addr: Ipv4Addr) -> bool {
    private_blocks().iter().any(|block| block.contains(addr))
}

/// Derives the class of an address: `Private` on the first block match,
/// `Public` when none match.
pub fn classify(addr: Ipv4Addr) -> AddressClass {
    if is_private(addr) {
        AddressClass::Private
    } else {
        AddressClass::Public
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
