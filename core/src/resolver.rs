// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Local & Public Address Resolution
//!
//! Resolving "the" machine address through ordered fallback strategies:
//!
//! 1. **Route probe** — connect a datagram socket to a well-known external
//!    address and read back the locally bound endpoint. No packet has to
//!    leave the machine for the kernel to commit to a route.
//! 2. **Single adapter** — when exactly one unicast IPv4 address exists
//!    across all adapters, it wins outright.
//! 3. **CIDR filter** — with multiple candidates a caller-supplied network
//!    hint picks the first member; without a hint the resolver refuses to
//!    guess and fails instead.
//!
//! The externally visible address goes the other way: an HTTP echo service
//! reports it, raced against a hard timeout.

use std::net::{IpAddr, Ipv4Addr, UdpSocket};
use std::time::Duration;

use async_trait::async_trait;
use ipscout_common::models::adapter::{AdapterInfo, Netmask};
use ipscout_common::system::AdapterRepository;
use ipscout_common::{debug, info};
use thiserror::Error;

use crate::cidr::CidrBlock;
use crate::mask;
use crate::parser::{self, ParseError};

/// Echo service returning the caller's public address as plain text.
pub const IP_ECHO_URL: &str = "http://ipv4.icanhazip.com/";

/// Hard cutoff for one echo fetch attempt. A slow response is a failure,
/// not a stall.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(3);

/// Remote endpoint the route probe "connects" to. The port is arbitrary;
/// the kernel only needs a destination to pick a source address.
const PROBE_TARGET: (Ipv4Addr, u16) = (Ipv4Addr::new(8, 8, 8, 8), 65530);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// Zero candidates, multiple candidates without a hint, or no
    /// candidate inside the hint. The caller must narrow the hint rather
    /// than have the resolver guess.
    #[error(
        "unable to determine the local address; supply a CIDR hint matching \
         your LAN (e.g. 192.168.2.0/24 for address 192.168.2.3)"
    )]
    AmbiguousOrNotFound,

    /// The route-probe socket could not be created or connected.
    #[error("route probe failed: {0}")]
    ProbeFailed(String),

    /// The OS adapter enumeration itself errored.
    #[error("adapter enumeration failed: {0}")]
    AdapterEnumeration(String),

    /// An adapter reported subnet information that does not describe a
    /// valid prefix.
    #[error("adapter reported an invalid netmask: {0}")]
    BadAdapterMask(String),

    /// The echo fetch lost the race against the timeout.
    #[error("public address fetch timed out after {0:?}")]
    FetchTimeout(Duration),

    /// The echo fetch completed with a transport or HTTP error.
    #[error("public address fetch failed: {0}")]
    FetchFailed(String),

    /// The echo service answered, but its body held no parsable address.
    #[error("echo service response contained no address: {0}")]
    NoAddressInResponse(#[from] ParseError),
}

/// Resolves the local machine address through the ordered strategies.
///
/// Holds the adapter repository behind a trait object so tests can swap in
/// canned adapter sets.
pub struct LocalAddressResolver {
    adapter_repo: Box<dyn AdapterRepository>,
    use_route_probe: bool,
}

impl LocalAddressResolver {
    pub fn new(adapter_repo: Box<dyn AdapterRepository>) -> Self {
        Self {
            adapter_repo,
            use_route_probe: true,
        }
    }

    /// Skips the route-probe strategy, leaving only adapter enumeration.
    /// Intended for offline resolution and deterministic tests.
    pub fn without_route_probe(mut self) -> Self {
        self.use_route_probe = false;
        self
    }

    /// Commits to exactly one local IPv4 address or fails.
    ///
    /// When multiple adapters match the hint, the first match in adapter
    /// enumeration order wins; that order is OS- and driver-dependent and
    /// is not a stability guarantee.
    pub fn resolve(&self, cidr_hint: Option<&CidrBlock>) -> Result<Ipv4Addr, ResolveError> {
        if self.use_route_probe {
            match route_probe() {
                Ok(addr) => {
                    debug!("route probe selected {addr}");
                    return Ok(addr);
                }
                Err(e) => debug!("route probe unavailable, trying adapters: {e}"),
            }
        }

        let candidates = self.unicast_candidates()?;
        info!(
            "found {} local IPv4 candidate(s) across all adapters",
            candidates.len()
        );

        select_candidate(&candidates, cidr_hint)
    }

    fn unicast_candidates(&self) -> Result<Vec<Ipv4Addr>, ResolveError> {
        let adapters = self
            .adapter_repo
            .adapters()
            .map_err(|e| ResolveError::AdapterEnumeration(e.to_string()))?;

        Ok(adapters
            .iter()
            .flat_map(|adapter| adapter.unicast_addrs())
            .collect())
    }
}

/// Pure selection step shared by the resolver and its tests.
///
/// A single candidate short-circuits; multiple candidates require a hint.
pub fn select_candidate(
    candidates: &[Ipv4Addr],
    cidr_hint: Option<&CidrBlock>,
) -> Result<Ipv4Addr, ResolveError> {
    if candidates.len() == 1 {
        return Ok(candidates[0]);
    }

    if let Some(hint) = cidr_hint
        && let Some(addr) = candidates.iter().copied().find(|a| hint.contains(*a))
    {
        return Ok(addr);
    }

    Err(ResolveError::AmbiguousOrNotFound)
}

/// Reads the local address the kernel would use for outbound traffic.
///
/// Connecting a datagram socket never sends a packet; it only asks the
/// routing table which source address applies.
pub fn route_probe() -> Result<Ipv4Addr, ResolveError> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))
        .map_err(|e| ResolveError::ProbeFailed(e.to_string()))?;

    socket
        .connect(PROBE_TARGET)
        .map_err(|e| ResolveError::ProbeFailed(e.to_string()))?;

    let local = socket
        .local_addr()
        .map_err(|e| ResolveError::ProbeFailed(e.to_string()))?;

    match local.ip() {
        IpAddr::V4(addr) => Ok(addr),
        IpAddr::V6(_) => Err(ResolveError::ProbeFailed(format!(
            "expected an IPv4 local endpoint, got {local}"
        ))),
    }
}

/// Guesses the LAN CIDR block from the single candidate adapter.
///
/// The selector narrows the adapter list (by default an ethernet-name
/// heuristic); the guess only succeeds when exactly one adapter with
/// exactly one IPv4 assignment remains. Anything else is ambiguous by
/// definition and the caller must supply the hint manually.
pub fn lan_cidr_hint(
    repo: &dyn AdapterRepository,
    is_candidate: impl Fn(&AdapterInfo) -> bool,
) -> Result<CidrBlock, ResolveError> {
    let adapters: Vec<AdapterInfo> = repo
        .adapters()
        .map_err(|e| ResolveError::AdapterEnumeration(e.to_string()))?
        .into_iter()
        .filter(|a| is_candidate(a))
        .collect();

    let adapter = match adapters.as_slice() {
        [] => {
            info!("no candidate adapters found, unable to derive a CIDR hint");
            return Err(ResolveError::AmbiguousOrNotFound);
        }
        [one] => one,
        _ => {
            info!(
                "{} candidate adapters found, unable to derive a CIDR hint",
                adapters.len()
            );
            return Err(ResolveError::AmbiguousOrNotFound);
        }
    };

    let assignment = match adapter.addresses.as_slice() {
        [one] => one,
        _ => {
            info!(
                "adapter {} has {} IPv4 assignments, unable to derive a CIDR hint",
                adapter.name,
                adapter.addresses.len()
            );
            return Err(ResolveError::AmbiguousOrNotFound);
        }
    };

    let prefix_len = match assignment.netmask {
        Netmask::Prefix(p) => p,
        Netmask::Mask(m) => {
            mask::prefix_len_from_mask(m).map_err(|e| ResolveError::BadAdapterMask(e.to_string()))?
        }
    };

    let network = mask::network_id(assignment.address, prefix_len);

    CidrBlock::new(network, prefix_len).map_err(|e| ResolveError::BadAdapterMask(e.to_string()))
}

/// Default candidate-adapter heuristic: ethernet-flavored adapter names.
/// Inherently fragile, which is why [`lan_cidr_hint`] takes it as a
/// parameter instead of hardcoding it.
#[cfg(windows)]
pub fn default_adapter_selector(adapter: &AdapterInfo) -> bool {
    let name = adapter.name.to_ascii_lowercase();
    let description = adapter.description.to_ascii_lowercase();
    name.contains("ethernet") || description.contains("ethernet")
}

#[cfg(not(windows))]
pub fn default_adapter_selector(adapter: &AdapterInfo) -> bool {
    adapter.name.starts_with("en")
}

/// Source of the externally visible address, as plain response text.
#[async_trait]
pub trait AddressEcho: Send + Sync {
    async fn fetch(&self) -> anyhow::Result<String>;
}

/// reqwest-backed echo client against [`IP_ECHO_URL`].
pub struct HttpEcho {
    client: reqwest::Client,
    url: String,
}

impl HttpEcho {
    pub fn new() -> Self {
        Self::with_url(IP_ECHO_URL)
    }

    pub fn with_url(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
        }
    }
}

impl Default for HttpEcho {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AddressEcho for HttpEcho {
    async fn fetch(&self) -> anyhow::Result<String> {
        let response = self.client.get(&self.url).send().await?;
        Ok(response.error_for_status()?.text().await?)
    }
}

/// Resolves the externally visible address via the echo service.
///
/// Attempts are independent: immediate retry, no backoff. The last
/// failure is reported when every attempt is exhausted.
pub async fn resolve_public(
    echo: &dyn AddressEcho,
    max_attempts: u32,
) -> Result<Ipv4Addr, ResolveError> {
    resolve_public_with(echo, max_attempts, FETCH_TIMEOUT).await
}

/// [`resolve_public`] with a caller-controlled timeout, used by tests to
/// avoid waiting out the full cutoff.
pub async fn resolve_public_with(
    echo: &dyn AddressEcho,
    max_attempts: u32,
    fetch_timeout: Duration,
) -> Result<Ipv4Addr, ResolveError> {
    let attempts = max_attempts.max(1);
    let mut last_err = ResolveError::FetchTimeout(fetch_timeout);

    for attempt in 1..=attempts {
        debug!("public address fetch, attempt {attempt}/{attempts}");

        // The fetch races the timer; the losing future is dropped and
        // never awaited again.
        match tokio::time::timeout(fetch_timeout, echo.fetch()).await {
            Err(_) => last_err = ResolveError::FetchTimeout(fetch_timeout),
            Ok(Err(e)) => last_err = ResolveError::FetchFailed(e.to_string()),
            Ok(Ok(body)) => match parser::find_all(&body) {
                Ok(addrs) => {
                    if let Some(addr) = addrs.first() {
                        return Ok(*addr);
                    }
                    last_err = ResolveError::NoAddressInResponse(ParseError::NoMatches);
                }
                Err(e) => last_err = ResolveError::NoAddressInResponse(e),
            },
        }
    }

    Err(last_err)
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
    use ipscout_common::models::adapter::AdapterAddress;

    struct FixedAdapters(Vec<AdapterInfo>);

    impl AdapterRepository for FixedAdapters {
        fn adapters(&self) -> anyhow::Result<Vec<AdapterInfo>> {
            Ok(self.0.clone())
        }
    }

    fn adapter(name: &str, addrs: &[(Ipv4Addr, Netmask)]) -> AdapterInfo {
        AdapterInfo::new(
            name.to_string(),
            format!("{name} adapter"),
            addrs
                .iter()
                .map(|(a, m)| AdapterAddress::new(*a, *m))
                .collect(),
        )
    }

    #[test]
    fn single_candidate_wins_without_a_hint() {
        let only = Ipv4Addr::new(192, 168, 1, 50);
        assert_eq!(select_candidate(&[only], None), Ok(only));
    }

    #[test]
    fn multiple_candidates_without_hint_are_ambiguous() {
        let candidates = [Ipv4Addr::new(192, 168, 1, 50), Ipv4Addr::new(10, 0, 0, 7)];
        assert_eq!(
            select_candidate(&candidates, None),
            Err(ResolveError::AmbiguousOrNotFound)
        );
    }

    #[test]
    fn hint_picks_first_member_among_candidates() {
        let candidates = [
            Ipv4Addr::new(10, 0, 0, 7),
            Ipv4Addr::new(192, 168, 2, 3),
            Ipv4Addr::new(192, 168, 2, 9),
        ];
        let hint: CidrBlock = "192.168.2.0/24".parse().unwrap();
        assert_eq!(
            select_candidate(&candidates, Some(&hint)),
            Ok(Ipv4Addr::new(192, 168, 2, 3))
        );
    }

    #[test]
    fn hint_matching_nothing_is_ambiguous() {
        let candidates = [Ipv4Addr::new(10, 0, 0, 7), Ipv4Addr::new(10, 0, 0, 8)];
        let hint: CidrBlock = "192.168.2.0/24".parse().unwrap();
        assert_eq!(
            select_candidate(&candidates, Some(&hint)),
            Err(ResolveError::AmbiguousOrNotFound)
        );
    }

    #[test]
    fn zero_candidates_are_not_found() {
        assert_eq!(
            select_candidate(&[], None),
            Err(ResolveError::AmbiguousOrNotFound)
        );
        let hint: CidrBlock = "0.0.0.0/0".parse().unwrap();
        assert_eq!(
            select_candidate(&[], Some(&hint)),
            Err(ResolveError::AmbiguousOrNotFound)
        );
    }

    #[test]
    fn route_probe_yields_a_usable_address_when_networked() {
        // Depends on the host having any route at all; tolerate failure
        // but validate the success shape.
        if let Ok(addr) = route_probe() {
            assert!(!addr.is_unspecified());
        }
    }

    #[test]
    fn cidr_hint_derived_from_single_adapter_prefix() {
        let repo = FixedAdapters(vec![adapter(
            "en0",
            &[(Ipv4Addr::new(192, 168, 2, 3), Netmask::Prefix(24))],
        )]);

        let hint = lan_cidr_hint(&repo, |a| a.name.starts_with("en")).unwrap();
        assert_eq!(hint.to_string(), "192.168.2.0/24");
    }

    #[test]
    fn cidr_hint_recovers_prefix_from_raw_mask() {
        let repo = FixedAdapters(vec![adapter(
            "en0",
            &[(
                Ipv4Addr::new(10, 1, 2, 3),
                Netmask::Mask(Ipv4Addr::new(255, 255, 0, 0)),
            )],
        )]);

        let hint = lan_cidr_hint(&repo, |a| a.name.starts_with("en")).unwrap();
        assert_eq!(hint.to_string(), "10.1.0.0/16");
    }

    #[test]
    fn cidr_hint_rejects_non_canonical_adapter_mask() {
        let repo = FixedAdapters(vec![adapter(
            "en0",
            &[(
                Ipv4Addr::new(10, 1, 2, 3),
                Netmask::Mask(Ipv4Addr::new(255, 0, 255, 0)),
            )],
        )]);

        assert!(matches!(
            lan_cidr_hint(&repo, |a| a.name.starts_with("en")),
            Err(ResolveError::BadAdapterMask(_))
        ));
    }

    #[test]
    fn cidr_hint_is_ambiguous_with_multiple_candidate_adapters() {
        let repo = FixedAdapters(vec![
            adapter(
                "en0",
                &[(Ipv4Addr::new(192, 168, 2, 3), Netmask::Prefix(24))],
            ),
            adapter(
                "en1",
                &[(Ipv4Addr::new(192, 168, 3, 3), Netmask::Prefix(24))],
            ),
        ]);

        assert_eq!(
            lan_cidr_hint(&repo, |a| a.name.starts_with("en")),
            Err(ResolveError::AmbiguousOrNotFound)
        );
    }

    #[test]
    fn cidr_hint_is_ambiguous_with_multiple_assignments() {
        let repo = FixedAdapters(vec![adapter(
            "en0",
            &[
                (Ipv4Addr::new(192, 168, 2, 3), Netmask::Prefix(24)),
                (Ipv4Addr::new(192, 168, 9, 3), Netmask::Prefix(24)),
            ],
        )]);

        assert_eq!(
            lan_cidr_hint(&repo, |a| a.name.starts_with("en")),
            Err(ResolveError::AmbiguousOrNotFound)
        );
    }

    #[test]
    fn selector_filters_out_unmatched_adapters() {
        let repo = FixedAdapters(vec![
            adapter(
                "lo0",
                &[(Ipv4Addr::new(127, 0, 0, 1), Netmask::Prefix(8))],
            ),
            adapter(
                "en0",
                &[(Ipv4Addr::new(192, 168, 2, 3), Netmask::Prefix(24))],
            ),
        ]);

        let hint = lan_cidr_hint(&repo, |a| a.name.starts_with("en")).unwrap();
        assert_eq!(hint.to_string(), "192.168.2.0/24");
    }
}
