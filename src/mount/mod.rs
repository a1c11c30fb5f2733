// Copyright 2026 Vault Mount Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Platform mounters and the lifecycle handles they produce.

pub mod config;
pub mod handle;
pub mod linux;
pub mod macos;

use std::path::Path;

use crate::core::{command::CommandSpec, error::MountError, version::Version};

pub use self::{
    config::{MountConfig, MountConfigBuilder},
    handle::{Mount, MountState},
};
use self::{linux::LinuxMounter, macos::MacMounter};

/// One FUSE provider integration.
///
/// Implementations are stateless; probing is free of side effects and safe
/// to repeat. A [`Mount`] exists only for a directory this trait just
/// successfully attached.
pub trait Mounter {
    /// Short provider label for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Whether this host can mount through this provider. Probe failures are
    /// absorbed into `false`, never raised.
    fn is_applicable(&self) -> bool;

    /// Version of the installed provider, where the platform exposes one.
    fn installed_version(&self) -> Option<Version> {
        None
    }

    /// Attaches the vault volume at the configured mount point.
    fn mount(&self, config: &MountConfig) -> Result<Mount, MountError>;
}

/// The closed, ordered set of supported providers. The order is platform
/// precedence and stays fixed; selection never re-sorts it.
pub fn mounters(mount_program: &str) -> Vec<Box<dyn Mounter>> {
    vec![
        Box::new(MacMounter::new(mount_program)),
        Box::new(LinuxMounter::new(mount_program)),
    ]
}

/// First-applicable selection in registry order.
pub fn select_mounter(mounters: &[Box<dyn Mounter>]) -> Result<&dyn Mounter, MountError> {
    for mounter in mounters {
        if mounter.is_applicable() {
            tracing::debug!("selected {} provider", mounter.name());
            return Ok(mounter.as_ref());
        }
        tracing::debug!("{} provider not applicable on this host", mounter.name());
    }
    Err(MountError::NoProviderAvailable)
}

/// The mount point must already exist as a directory; mounters do not
/// create it.
pub(crate) fn preflight_mount_point(path: &Path) -> Result<(), MountError> {
    if !path.is_dir() {
        return Err(MountError::Configuration(format!(
            "mount point {} is not an existing directory",
            path.display()
        )));
    }
    Ok(())
}

/// Owning uid/gid pair for the ownership-mapping options, read off the
/// user's home directory. The mount cannot proceed without it.
pub(crate) fn owner_ids() -> Result<(u32, u32), MountError> {
    use std::os::unix::fs::MetadataExt;

    let home = std::env::var_os("HOME")
        .ok_or_else(|| MountError::Configuration("HOME is not set".to_string()))?;
    let meta = std::fs::metadata(&home).map_err(|e| {
        MountError::Configuration(format!(
            "cannot stat home directory {}: {e}",
            Path::new(&home).display()
        ))
    })?;

    Ok((meta.uid(), meta.gid()))
}

/// Reveal invocation: the configured override program, or the platform
/// default, opening `.` from inside the mount directory.
pub(crate) fn reveal_spec(
    config: &MountConfig,
    default_program: &str,
    mount_point: &Path,
) -> CommandSpec {
    let program = config.reveal_command().unwrap_or(default_program);
    CommandSpec::new(program, mount_point).arg(".")
}

/// Mount invocation: the provider binary, run from the parent directory,
/// handed the mount point followed by the ordered option list.
pub(crate) fn mount_spec(
    program: &str,
    mount_point: &Path,
    options: &[String],
) -> Result<CommandSpec, MountError> {
    let parent = mount_point.parent().ok_or_else(|| {
        MountError::Configuration(format!(
            "mount point {} has no parent directory",
            mount_point.display()
        ))
    })?;

    Ok(CommandSpec::new(program, parent)
        .arg(mount_point.to_string_lossy())
        .args(options.iter().cloned()))
}
