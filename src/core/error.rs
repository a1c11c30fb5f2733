// Copyright 2026 Vault Mount Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{io, path::PathBuf, process::ExitStatus};

use thiserror::Error;

/// Failures surfaced by mount configuration and lifecycle operations.
///
/// Capability probing never produces one of these: probe problems are folded
/// into `Mounter::is_applicable() == false` and logged where they occur.
#[derive(Debug, Error)]
pub enum MountError {
    #[error("invalid mount configuration: {0}")]
    Configuration(String),

    #[error("no applicable fuse provider found on this host")]
    NoProviderAvailable,

    #[error("`{program}` in {} exited with {status}", dir.display())]
    CommandFailed {
        program: String,
        dir: PathBuf,
        status: ExitStatus,
    },

    #[error("failed to spawn `{program}` in {}: {source}", dir.display())]
    CommandSpawn {
        program: String,
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("volume is no longer mounted")]
    AlreadyUnmounted,
}
