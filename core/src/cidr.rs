// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # CIDR Matcher
//!
//! Membership testing against `address/prefix` blocks with exact bitwise
//! semantics. Both sides of the comparison are converted to big-endian
//! `u32` form through the same conversion, which keeps the byte-order
//! discipline in one place.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use thiserror::Error;

use crate::parser::{self, ParseError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CidrError {
    /// The string did not have the `a.b.c.d/n` shape (exactly one `/`).
    #[error("CIDR notation must be a.b.c.d/n, got {0:?}")]
    MalformedCidr(String),

    /// The address half failed dotted-decimal parsing.
    #[error("bad network address in CIDR notation: {0}")]
    BadAddress(#[from] ParseError),

    /// The prefix half was not an integer in [0,32].
    #[error("prefix length must be an integer in [0,32], got {0:?}")]
    BadPrefixLength(String),
}

/// A contiguous block of addresses sharing their top `prefix_len` bits.
///
/// Prefix bounds are enforced at construction; there is no implicit
/// default prefix. The network address is stored as given, membership is
/// computed under the mask so normalization is unnecessary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CidrBlock {
    pub(crate) network: Ipv4Addr,
    pub(crate) prefix_len: u8,
}

impl CidrBlock {
    pub fn new(network: Ipv4Addr, prefix_len: u8) -> Result<Self, CidrError> {
        if prefix_len > 32 {
            return Err(CidrError::BadPrefixLength(prefix_len.to_string()));
        }

        Ok(Self {
            network,
            prefix_len,
        })
    }

    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// True when `candidate` shares the top `prefix_len` bits with the
    /// network address.
    ///
    /// Prefix 0 matches every address and prefix 32 matches only exact
    /// equality; both are ordinary cases, not errors.
    pub fn contains(&self, candidate: Ipv4Addr) -> bool {
        let mask = mask_bits(self.prefix_len);
        (u32::from(candidate) & mask) == (u32::from(self.network) & mask)
    }
}

impl FromStr for CidrBlock {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        let (addr_part, prefix_part) = match (parts.next(), parts.next(), parts.next()) {
            (Some(addr), Some(prefix), None) => (addr, prefix),
            _ => return Err(CidrError::MalformedCidr(s.to_string())),
        };

        let network = parser::parse_one(addr_part)?;

        let prefix_len: u8 = prefix_part
            .parse()
            .map_err(|_| CidrError::BadPrefixLength(prefix_part.to_string()))?;

        Self::new(network, prefix_len)
    }
}

impl fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix_len)
    }
}

/// Tests whether `candidate` falls inside the block written in CIDR
/// notation, e.g. `is_in_range(addr, "192.168.2.0/24")`.
pub fn is_in_range(candidate: Ipv4Addr, cidr_text: &str) -> Result<bool, CidrError> {
    let block: CidrBlock = cidr_text.parse()?;
    Ok(block.contains(candidate))
}

/// A 32-bit mask with the top `prefix_len` bits set.
pub(crate) fn mask_bits(prefix_len: u8) -> u32 {
    match prefix_len {
        0 => 0,
        p => u32::MAX << (32 - u32::from(p)),
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

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn contains_basic_membership() {
        assert_eq!(
            is_in_range(Ipv4Addr::new(192, 168, 2, 2), "192.168.2.0/24"),
            Ok(true)
        );
        assert_eq!(
            is_in_range(Ipv4Addr::new(192, 169, 2, 2), "192.168.2.0/24"),
            Ok(false)
        );
        assert_eq!(
            is_in_range(Ipv4Addr::new(10, 2, 0, 2), "10.2.0.0/8"),
            Ok(true)
        );
    }

    #[test]
    fn asymmetric_byte_patterns_pin_byte_order() {
        // 10.0.0.1 and 1.0.0.10 are byte reversals of each other; a mixed
        // endianness convention would make these assertions flip.
        let block: CidrBlock = "10.0.0.0/8".parse().unwrap();
        assert!(block.contains(Ipv4Addr::new(10, 0, 0, 1)));
        assert!(!block.contains(Ipv4Addr::new(1, 0, 0, 10)));

        let reversed: CidrBlock = "1.0.0.0/8".parse().unwrap();
        assert!(reversed.contains(Ipv4Addr::new(1, 0, 0, 10)));
        assert!(!reversed.contains(Ipv4Addr::new(10, 0, 0, 1)));
    }

    #[test]
    fn prefix_zero_matches_everything() {
        let block = CidrBlock::new(Ipv4Addr::new(203, 0, 113, 9), 0).unwrap();
        for addr in [
            Ipv4Addr::new(0, 0, 0, 0),
            Ipv4Addr::new(255, 255, 255, 255),
            Ipv4Addr::new(8, 8, 8, 8),
        ] {
            assert!(block.contains(addr));
        }
    }

    #[test]
    fn prefix_32_matches_only_exact_address() {
        let block = CidrBlock::new(Ipv4Addr::new(192, 168, 2, 3), 32).unwrap();
        assert!(block.contains(Ipv4Addr::new(192, 168, 2, 3)));
        assert!(!block.contains(Ipv4Addr::new(192, 168, 2, 4)));
    }

    #[test]
    fn new_rejects_prefix_over_32() {
        assert!(matches!(
            CidrBlock::new(Ipv4Addr::new(10, 0, 0, 0), 33),
            Err(CidrError::BadPrefixLength(_))
        ));
    }

    #[test]
    fn from_str_rejects_malformed_notation() {
        for bad in ["10.0.0.0", "10.0.0.0/8/8", ""] {
            assert!(matches!(
                bad.parse::<CidrBlock>(),
                Err(CidrError::MalformedCidr(_)) | Err(CidrError::BadAddress(_))
            ));
        }
        assert!(matches!(
            "10.0.0.0".parse::<CidrBlock>(),
            Err(CidrError::MalformedCidr(_))
        ));
    }

    #[test]
    fn from_str_rejects_bad_address_half() {
        assert!(matches!(
            "300.0.0.0/8".parse::<CidrBlock>(),
            Err(CidrError::BadAddress(_))
        ));
    }

    #[test]
    fn from_str_rejects_bad_prefix_half() {
        for bad in ["10.0.0.0/33", "10.0.0.0/-1", "10.0.0.0/x", "10.0.0.0/"] {
            assert!(matches!(
                bad.parse::<CidrBlock>(),
                Err(CidrError::BadPrefixLength(_))
            ));
        }
    }

    #[test]
    fn display_roundtrips_notation() {
        let block: CidrBlock = "172.16.0.0/12".parse().unwrap();
        assert_eq!(block.to_string(), "172.16.0.0/12");
    }

    proptest! {
        #[test]
        fn address_is_in_its_own_block_for_any_prefix(
            a in 0u8..=255, b in 0u8..=255, c in 0u8..=255, d in 0u8..=255,
            prefix in 0u8..=32,
        ) {
            let addr = Ipv4Addr::new(a, b, c, d);
            let block = CidrBlock::new(addr, prefix).unwrap();
            prop_assert!(block.contains(addr));
        }
    }
}
