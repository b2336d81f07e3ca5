// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use colored::*;
use ipscout_common::{config::Config, info, success};
use ipscout_core::classify;
use ipscout_core::resolver::{self, HttpEcho};

use crate::commands::local::class_detail;
use crate::{
    iprint,
    terminal::{
        colors,
        print::{self, GLOBAL_KEY_WIDTH, Print},
    },
};

pub async fn public(attempts: u32, _cfg: &Config) -> anyhow::Result<()> {
    let echo = HttpEcho::new();
    info!(
        "querying {} (up to {} attempt(s))",
        resolver::IP_ECHO_URL,
        attempts.max(1)
    );

    let addr = resolver::resolve_public(&echo, attempts).await?;

    if Print::quiet_level() == 2 {
        iprint!("{addr}");
        return Ok(());
    }

    GLOBAL_KEY_WIDTH.set(10);
    Print::header("public address");
    print::aligned_line("Address", addr.to_string().color(colors::IPV4_ADDR));
    print::aligned_line("Class", class_detail(classify::classify(addr)));

    let summary: String = format!(
        "Echo service reported {}",
        addr.to_string().color(colors::IPV4_ADDR)
    );
    match Print::quiet_level() {
        0 => {
            print::divider();
            print::centerln(&summary);
        }
        _ => success!("{summary}"),
    }

    Ok(())
}
