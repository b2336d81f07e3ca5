// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Address Codec
//!
//! Conversions between the 4-byte address form and its binary-digit text
//! representation. The binary rendering doubles as the internal form used
//! by the subnet mask analyzer, which is why the unseparated variant is
//! guaranteed to be exactly 32 characters.

use std::fmt;
use std::net::Ipv4Addr;

/// Joiner placed between bytes when `separate_bytes` is requested.
const BYTE_SEPARATOR: &str = " - ";

/// Renders an address as binary digits, most-significant bit first,
/// in address order.
///
/// With `separate_bytes` the four groups are joined with `" - "` for
/// readability; without it the digits are concatenated directly into a
/// 32-character string.
pub fn to_binary_string(addr: Ipv4Addr, separate_bytes: bool) -> String {
    let groups: Vec<String> = addr.octets().iter().map(|b| format!("{b:08b}")).collect();

    if separate_bytes {
        groups.join(BYTE_SEPARATOR)
    } else {
        groups.concat()
    }
}

/// Leading-octet agreement between two addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OctetSimilarity {
    None,
    FirstByte,
    FirstTwoBytes,
    FirstThreeBytes,
    AllBytes,
}

impl fmt::Display for OctetSimilarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            OctetSimilarity::None => "no leading octets",
            OctetSimilarity::FirstByte => "first octet",
            OctetSimilarity::FirstTwoBytes => "first two octets",
            OctetSimilarity::FirstThreeBytes => "first three octets",
            OctetSimilarity::AllBytes => "all four octets",
        };
        write!(f, "{text}")
    }
}

/// Compares two addresses octet by octet from the most significant end.
pub fn similarity(a: Ipv4Addr, b: Ipv4Addr) -> OctetSimilarity {
    let a = a.octets();
    let b = b.octets();

    if a[0] != b[0] {
        return OctetSimilarity::None;
    }
    if a[1] != b[1] {
        return OctetSimilarity::FirstByte;
    }
    if a[2] != b[2] {
        return OctetSimilarity::FirstTwoBytes;
    }

    if a[3] != b[3] {
        OctetSimilarity::FirstThreeBytes
    } else {
        OctetSimilarity::AllBytes
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
