// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

/// Global configuration options shared by every command.
///
/// This struct controls the runtime behavior of the application, mainly
/// terminal verbosity and presentation. It is constructed once from the
/// parsed CLI arguments and passed down by reference.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Toggles the display of the startup banner.
    ///
    /// If `true`, the application starts immediately with log output without
    /// printing the stylized branding. Useful for clean logs or frequent
    /// executions.
    pub no_banner: bool,

    /// Controls the visual density and formatting of the terminal output.
    ///
    /// This value is typically mapped from the `-q` or `--quiet` CLI flags.
    ///
    /// # Levels
    /// * **0** (Default): Full UI, including colors, headers and aligned tables.
    /// * **1**: Reduced styling. Minimal colors, no headers.
    /// * **2**: Raw mode. Output is strictly data (e.g. a bare address),
    ///   suitable for piping into other tools.
    pub quiet: u8,
}
