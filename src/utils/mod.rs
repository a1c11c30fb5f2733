// Copyright 2026 Vault Mount Developers
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod log;
#[cfg(target_os = "linux")]
pub mod mount;
pub mod validation;

pub use self::log::*;
