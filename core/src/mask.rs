// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Subnet Mask Analyzer
//!
//! Recovers a prefix length from a raw dotted-decimal subnet mask.
//!
//! A canonical mask is a run of `1` bits followed by a run of `0` bits
//! covering all 32 positions. Counting ones alone is not enough — a mask
//! like `255.0.255.0` has sixteen ones but is not a prefix — so the scan
//! tracks whether the zero run has started and rejects any later `1`.

use std::net::Ipv4Addr;

use thiserror::Error;

use crate::cidr::mask_bits;
use crate::codec;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MaskError {
    /// A `1` bit appeared after the first `0` bit.
    #[error("subnet mask {0} is not a contiguous ones-then-zeros pattern")]
    NonCanonicalMask(Ipv4Addr),
}

/// Recovers the prefix length of a canonical subnet mask.
///
/// The all-zeros mask (prefix 0) and the all-ones mask (prefix 32) are
/// both valid. Non-contiguous masks fail with [`MaskError::NonCanonicalMask`].
pub fn prefix_len_from_mask(mask: Ipv4Addr) -> Result<u8, MaskError> {
    let bits = codec::to_binary_string(mask, false);

    let mut leading_ones: u8 = 0;
    let mut seen_zero = false;

    for bit in bits.chars() {
        match bit {
            '1' if seen_zero => return Err(MaskError::NonCanonicalMask(mask)),
            '1' => leading_ones += 1,
            _ => seen_zero = true,
        }
    }

    Ok(leading_ones)
}

/// Builds the canonical mask for a prefix length.
///
/// Callers must pass a prefix in [0,32]; the CIDR layer enforces this
/// before any mask is constructed.
pub fn mask_from_prefix(prefix_len: u8) -> Ipv4Addr {
    Ipv4Addr::from(mask_bits(prefix_len))
}

/// Zeroes the host bits of `addr`, leaving the network identifier.
pub fn network_id(addr: Ipv4Addr, prefix_len: u8) -> Ipv4Addr {
    Ipv4Addr::from(u32::from(addr) & mask_bits(prefix_len))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
