// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use ipscout_common::models::adapter::{AdapterAddress, AdapterInfo, Netmask};
use ipscout_common::system::AdapterRepository;
use ipscout_core::cidr::CidrBlock;
use ipscout_core::resolver::{self, AddressEcho, LocalAddressResolver, ResolveError};

struct CannedAdapters(Vec<AdapterInfo>);

impl AdapterRepository for CannedAdapters {
    fn adapters(&self) -> anyhow::Result<Vec<AdapterInfo>> {
        Ok(self.0.clone())
    }
}

fn adapter(name: &str, addrs: &[(Ipv4Addr, u8)]) -> AdapterInfo {
    AdapterInfo::new(
        name.to_string(),
        String::new(),
        addrs
            .iter()
            .map(|(addr, prefix)| AdapterAddress::new(*addr, Netmask::Prefix(*prefix)))
            .collect(),
    )
}

#[test]
fn test_no_adapters_no_probe_fails() {
    let resolver =
        LocalAddressResolver::new(Box::new(CannedAdapters(vec![]))).without_route_probe();

    assert_eq!(
        resolver.resolve(None),
        Err(ResolveError::AmbiguousOrNotFound)
    );
}

#[test]
fn test_single_adapter_resolves_without_hint() {
    let expected = Ipv4Addr::new(192, 168, 2, 3);
    let resolver = LocalAddressResolver::new(Box::new(CannedAdapters(vec![adapter(
        "en0",
        &[(expected, 24)],
    )])))
    .without_route_probe();

    assert_eq!(resolver.resolve(None), Ok(expected));
}

#[test]
fn test_multiple_adapters_need_a_hint() {
    let adapters = CannedAdapters(vec![
        adapter("en0", &[(Ipv4Addr::new(192, 168, 2, 3), 24)]),
        adapter("utun0", &[(Ipv4Addr::new(10, 8, 0, 2), 16)]),
    ]);
    let resolver = LocalAddressResolver::new(Box::new(adapters)).without_route_probe();

    assert_eq!(
        resolver.resolve(None),
        Err(ResolveError::AmbiguousOrNotFound)
    );
}

#[test]
fn test_hint_disambiguates_multiple_adapters() {
    let adapters = CannedAdapters(vec![
        adapter("en0", &[(Ipv4Addr::new(192, 168, 2, 3), 24)]),
        adapter("utun0", &[(Ipv4Addr::new(10, 8, 0, 2), 16)]),
    ]);
    let resolver = LocalAddressResolver::new(Box::new(adapters)).without_route_probe();

    let hint: CidrBlock = "10.8.0.0/16".parse().unwrap();
    assert_eq!(
        resolver.resolve(Some(&hint)),
        Ok(Ipv4Addr::new(10, 8, 0, 2))
    );
}

#[test]
fn test_guessed_hint_feeds_resolution() {
    let adapters = CannedAdapters(vec![
        adapter("lo0", &[(Ipv4Addr::new(127, 0, 0, 1), 8)]),
        adapter("en0", &[(Ipv4Addr::new(192, 168, 2, 3), 24)]),
    ]);

    let hint = resolver::lan_cidr_hint(&adapters, |a| a.name.starts_with("en")).unwrap();
    assert_eq!(hint.to_string(), "192.168.2.0/24");

    let resolver = LocalAddressResolver::new(Box::new(adapters)).without_route_probe();
    assert_eq!(
        resolver.resolve(Some(&hint)),
        Ok(Ipv4Addr::new(192, 168, 2, 3))
    );
}

struct FixedEcho(&'static str);

#[async_trait]
impl AddressEcho for FixedEcho {
    async fn fetch(&self) -> anyhow::Result<String> {
        Ok(self.0.to_string())
    }
}

struct SlowEcho;

#[async_trait]
impl AddressEcho for SlowEcho {
    async fn fetch(&self) -> anyhow::Result<String> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok("203.0.113.9\n".to_string())
    }
}

/// Fails with a transport error until the configured attempt is reached.
struct FlakyEcho {
    calls: AtomicU32,
    succeed_on: u32,
}

#[async_trait]
impl AddressEcho for FlakyEcho {
    async fn fetch(&self) -> anyhow::Result<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call < self.succeed_on {
            anyhow::bail!("connection reset by peer");
        }
        Ok("203.0.113.9\n".to_string())
    }
}

#[tokio::test]
async fn test_public_address_parsed_from_echo_body() {
    let echo = FixedEcho("93.184.216.34\n");
    let addr = resolver::resolve_public(&echo, 1).await.unwrap();
    assert_eq!(addr, Ipv4Addr::new(93, 184, 216, 34));
}

#[tokio::test]
async fn test_slow_echo_loses_the_timeout_race() {
    let result = resolver::resolve_public_with(&SlowEcho, 1, Duration::from_millis(20)).await;
    assert_eq!(
        result,
        Err(ResolveError::FetchTimeout(Duration::from_millis(20)))
    );
}

#[tokio::test]
async fn test_retries_survive_transient_failures() {
    let echo = FlakyEcho {
        calls: AtomicU32::new(0),
        succeed_on: 3,
    };

    let addr = resolver::resolve_public(&echo, 3).await.unwrap();
    assert_eq!(addr, Ipv4Addr::new(203, 0, 113, 9));
    assert_eq!(echo.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_exhausted_retries_report_last_failure() {
    let echo = FlakyEcho {
        calls: AtomicU32::new(0),
        succeed_on: 10,
    };

    let result = resolver::resolve_public(&echo, 2).await;
    assert!(matches!(result, Err(ResolveError::FetchFailed(_))));
    assert_eq!(echo.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_addressless_body_is_rejected() {
    let echo = FixedEcho("<html>rate limited</html>\n");
    let result = resolver::resolve_public(&echo, 1).await;
    assert!(matches!(result, Err(ResolveError::NoAddressInResponse(_))));
}
