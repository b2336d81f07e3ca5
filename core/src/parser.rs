// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Address Parser
//!
//! Extraction and validation of dotted-decimal IPv4 addresses.
//!
//! [`parse_one`] validates a string that should be exactly one address.
//! [`find_all`] scans arbitrary free text with a range-aware pattern so
//! that only well-formed octet sequences are even considered candidates.

use std::net::Ipv4Addr;
use std::sync::OnceLock;

use ipscout_common::error;
use regex::Regex;
use thiserror::Error;

/// Matches four dot-separated octets where every octet is range-checked by
/// the pattern itself (255 max). Candidates still go through [`parse_one`]
/// before being returned. `[0-9]` instead of `\d` keeps the scan ASCII-only;
/// `\d` matches Unicode digits that the strict parser rejects.
const IPV4_PATTERN: &str = r"(?:(?:1[0-9][0-9]|2[0-5][0-5]|2[0-4][0-9]|0?[1-9][0-9]|0?0?[0-9])\.){3}(?:1[0-9][0-9]|2[0-5][0-5]|2[0-4][0-9]|0?[1-9][0-9]|0?0?[0-9])";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The input string was null-equivalent: empty or whitespace only.
    #[error("input string was empty")]
    EmptyInput,

    /// The input was not four dot-separated decimal groups in [0,255].
    #[error("not a dotted-decimal IPv4 address: {0:?}")]
    NotAnAddress(String),

    /// The scan found no address-shaped substrings at all.
    #[error("input contained no IPv4 addresses")]
    NoMatches,

    /// A substring accepted by the scan pattern failed strict parsing.
    /// This indicates a bug in the pattern, not bad input.
    #[error("pattern produced an unparsable match: {0:?}")]
    PatternFault(String),
}

/// Parses a string holding exactly one dotted-decimal IPv4 address.
///
/// Groups are taken literally as given (no leading-zero normalization)
/// and must each parse as an integer in [0,255]. Out-of-range groups are
/// a parse failure, never silent truncation.
pub fn parse_one(input: &str) -> Result<Ipv4Addr, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let groups: Vec<&str> = trimmed.split('.').collect();
    if groups.len() != 4 {
        return Err(ParseError::NotAnAddress(input.to_string()));
    }

    let mut octets = [0u8; 4];
    for (octet, group) in octets.iter_mut().zip(&groups) {
        let value: i64 = group
            .parse()
            .map_err(|_| ParseError::NotAnAddress(input.to_string()))?;

        if !(0..=255).contains(&value) {
            return Err(ParseError::NotAnAddress(input.to_string()));
        }

        *octet = value as u8;
    }

    Ok(Ipv4Addr::from(octets))
}

/// Extracts every IPv4 address embedded in arbitrary text.
///
/// Matches are returned in left-to-right order of occurrence; duplicates
/// are preserved. Zero candidates is reported as [`ParseError::NoMatches`].
pub fn find_all(input: &str) -> Result<Vec<Ipv4Addr>, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut addrs: Vec<Ipv4Addr> = Vec::new();
    for m in pattern().find_iter(input) {
        match parse_one(m.as_str()) {
            Ok(addr) => addrs.push(addr),
            Err(e) => {
                // Unreachable as long as the pattern is correct; surfaced
                // loudly because it means the pattern itself is wrong.
                error!("scan pattern matched {:?} but parsing failed: {e}", m.as_str());
                return Err(ParseError::PatternFault(m.as_str().to_string()));
            }
        }
    }

    if addrs.is_empty() {
        return Err(ParseError::NoMatches);
    }

    Ok(addrs)
}

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(IPV4_PATTERN).expect("invalid IPv4 scan pattern"))
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
    fn parse_one_accepts_canonical_addresses() {
        assert_eq!(parse_one("192.168.2.3"), Ok(Ipv4Addr::new(192, 168, 2, 3)));
        assert_eq!(parse_one("0.0.0.0"), Ok(Ipv4Addr::new(0, 0, 0, 0)));
        assert_eq!(
            parse_one("255.255.255.255"),
            Ok(Ipv4Addr::new(255, 255, 255, 255))
        );
    }

    #[test]
    fn parse_one_rejects_empty_input() {
        assert_eq!(parse_one(""), Err(ParseError::EmptyInput));
        assert_eq!(parse_one("   "), Err(ParseError::EmptyInput));
    }

    #[test]
    fn parse_one_rejects_wrong_group_count() {
        for bad in ["10.0.0", "10.0.0.0.0", "10", "10..0.0"] {
            assert!(matches!(parse_one(bad), Err(ParseError::NotAnAddress(_))));
        }
    }

    #[test]
    fn parse_one_rejects_out_of_range_octets() {
        for bad in ["256.0.0.1", "10.0.0.300", "-1.0.0.1", "999.999.999.999"] {
            assert!(matches!(parse_one(bad), Err(ParseError::NotAnAddress(_))));
        }
    }

    #[test]
    fn parse_one_rejects_non_numeric_groups() {
        for bad in ["a.b.c.d", "10.0.x.1", "10.0.0.1a"] {
            assert!(matches!(parse_one(bad), Err(ParseError::NotAnAddress(_))));
        }
    }

    #[test]
    fn find_all_returns_matches_in_occurrence_order() {
        let text = "server at 192.168.2.3 and 10.0.0.1 done";
        assert_eq!(
            find_all(text),
            Ok(vec![
                Ipv4Addr::new(192, 168, 2, 3),
                Ipv4Addr::new(10, 0, 0, 1)
            ])
        );
    }

    #[test]
    fn find_all_preserves_duplicates() {
        let text = "10.0.0.1 then again 10.0.0.1";
        assert_eq!(
            find_all(text),
            Ok(vec![Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 1)])
        );
    }

    #[test]
    fn find_all_skips_non_ascii_digit_sequences() {
        // Arabic-Indic digits form an address-shaped substring; the scan
        // must not consider it a candidate at all.
        let text = "server at 10.0.0.1 and \u{662}.\u{663}.\u{664}.\u{665} done";
        assert_eq!(find_all(text), Ok(vec![Ipv4Addr::new(10, 0, 0, 1)]));
    }

    #[test]
    fn find_all_reports_no_matches() {
        assert_eq!(find_all("nothing to see here"), Err(ParseError::NoMatches));
    }

    #[test]
    fn find_all_reports_empty_input() {
        assert_eq!(find_all(""), Err(ParseError::EmptyInput));
    }

    proptest! {
        #[test]
        fn parse_roundtrips_canonical_text(a in 0u8..=255, b in 0u8..=255, c in 0u8..=255, d in 0u8..=255) {
            let text = format!("{a}.{b}.{c}.{d}");
            let parsed = parse_one(&text).unwrap();
            prop_assert_eq!(parsed.to_string(), text);
        }

        #[test]
        fn find_all_locates_embedded_addresses(a in 0u8..=255, b in 0u8..=255, c in 0u8..=255, d in 0u8..=255) {
            let addr = Ipv4Addr::new(a, b, c, d);
            let text = format!("host {addr} responded");
            let found = find_all(&text).unwrap();
            prop_assert_eq!(found[0], addr);
        }
    }
}
