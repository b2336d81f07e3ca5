// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! One-shot address inspection commands. Each handler parses its input,
//! runs a single core operation and prints the result. With `-qq` only
//! the raw value is emitted so the output can feed a pipeline.

use colored::*;
use ipscout_common::{config::Config, success};
use ipscout_core::cidr::CidrBlock;
use ipscout_core::classify;
use ipscout_core::codec;
use ipscout_core::mask as mask_ops;
use ipscout_core::parser;

use crate::commands::local::class_detail;
use crate::{
    iprint,
    terminal::{
        colors,
        print::{self, GLOBAL_KEY_WIDTH, Print},
    },
};

pub fn parse(text: &str, _cfg: &Config) -> anyhow::Result<()> {
    let addrs = parser::find_all(text)?;

    if Print::quiet_level() == 2 {
        for addr in &addrs {
            iprint!("{addr}");
        }
        return Ok(());
    }

    Print::header("parsed addresses");
    for (idx, addr) in addrs.iter().enumerate() {
        print::tree_head(idx, &addr.to_string());
    }
    success!("{} address(es) found", addrs.len());

    Ok(())
}

pub fn check(address: &str, cidr: &str, _cfg: &Config) -> anyhow::Result<()> {
    let addr = parser::parse_one(address)?;
    let block: CidrBlock = cidr.parse()?;
    let inside = block.contains(addr);

    if Print::quiet_level() == 2 {
        iprint!("{inside}");
        return Ok(());
    }

    GLOBAL_KEY_WIDTH.set(10);
    Print::header("cidr membership");
    print::aligned_line("Address", addr.to_string().color(colors::IPV4_ADDR));
    print::aligned_line("Block", block.to_string().color(colors::IPV4_PREFIX));
    let verdict: ColoredString = if inside {
        "inside".green().bold()
    } else {
        "outside".red().bold()
    };
    print::aligned_line("Verdict", verdict);
    print::aligned_line(
        "Shared",
        codec::similarity(addr, block.network())
            .to_string()
            .color(colors::SECONDARY),
    );

    Ok(())
}

pub fn classify(address: &str, _cfg: &Config) -> anyhow::Result<()> {
    let addr = parser::parse_one(address)?;
    let class = classify::classify(addr);

    if Print::quiet_level() == 2 {
        iprint!("{class}");
        return Ok(());
    }

    GLOBAL_KEY_WIDTH.set(10);
    Print::header("address class");
    print::aligned_line("Address", addr.to_string().color(colors::IPV4_ADDR));
    print::aligned_line("Class", class_detail(class));

    Ok(())
}

pub fn mask(mask_text: &str, _cfg: &Config) -> anyhow::Result<()> {
    let mask_addr = parser::parse_one(mask_text)?;
    let prefix_len = mask_ops::prefix_len_from_mask(mask_addr)?;

    if Print::quiet_level() == 2 {
        iprint!("{prefix_len}");
        return Ok(());
    }

    GLOBAL_KEY_WIDTH.set(10);
    Print::header("subnet mask");
    print::aligned_line("Mask", mask_addr.to_string().color(colors::SUBNET_MASK));
    print::aligned_line("Prefix", format!("/{prefix_len}").color(colors::IPV4_PREFIX));
    print::aligned_line(
        "Binary",
        codec::to_binary_string(mask_addr, true)
            .color(colors::SECONDARY),
    );

    Ok(())
}

pub fn binary(address: &str, grouped: bool, _cfg: &Config) -> anyhow::Result<()> {
    let addr = parser::parse_one(address)?;
    let rendered = codec::to_binary_string(addr, grouped);

    if Print::quiet_level() == 2 {
        iprint!("{rendered}");
        return Ok(());
    }

    GLOBAL_KEY_WIDTH.set(10);
    Print::header("binary form");
    print::aligned_line("Address", addr.to_string().color(colors::IPV4_ADDR));
    print::aligned_line("Binary", rendered.color(colors::SECONDARY));

    Ok(())
}
