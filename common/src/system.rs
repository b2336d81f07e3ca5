// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use crate::models::adapter::AdapterInfo;

/// Defines the contract for accessing OS-level adapter information.
///
/// This repository abstracts the system calls that enumerate network
/// adapters and their unicast IPv4 assignments, so that resolution logic
/// can be exercised against mock data in tests.
pub trait AdapterRepository {
    /// Returns every local network adapter together with its unicast
    /// IPv4 addresses and subnet information.
    fn adapters(&self) -> anyhow::Result<Vec<AdapterInfo>>;
}
