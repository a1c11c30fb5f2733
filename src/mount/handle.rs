// Copyright 2026 Vault Mount Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::core::{
    command::{CommandRunner, CommandSpec},
    error::MountError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountState {
    Active,
    Unmounted,
}

/// The three commands a mount is torn down and surfaced with, bound to one
/// mount directory at construction time.
#[derive(Debug, Clone)]
pub(crate) struct MountCommands {
    pub reveal: CommandSpec,
    pub unmount: CommandSpec,
    pub unmount_forced: CommandSpec,
}

/// One active attachment of the vault filesystem to a host directory.
///
/// Handed out exclusively by a successful `Mounter::mount`. A successful
/// unmount (graceful or forced) is terminal: every further operation on the
/// handle is rejected. Lifecycle calls are not internally synchronized;
/// `&mut self` on the unmount variants leaves serialization to the owner.
pub struct Mount {
    mount_point: PathBuf,
    state: MountState,
    commands: MountCommands,
    runner: Arc<dyn CommandRunner>,
}

impl Mount {
    pub(crate) fn new(
        mount_point: PathBuf,
        commands: MountCommands,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            mount_point,
            state: MountState::Active,
            commands,
            runner,
        }
    }

    pub fn mount_point(&self) -> &Path {
        &self.mount_point
    }

    pub fn state(&self) -> MountState {
        self.state
    }

    /// Opens the mounted volume in the user's file manager. Never changes
    /// the mount state, failed or not.
    pub fn reveal(&self) -> Result<(), MountError> {
        self.ensure_active()?;
        self.runner.run(&self.commands.reveal)
    }

    /// Graceful detach. On failure the mount stays `Active` and the caller
    /// decides whether to retry or escalate to [`Mount::unmount_forced`].
    pub fn unmount(&mut self) -> Result<(), MountError> {
        self.ensure_active()?;
        self.runner.run(&self.commands.unmount)?;
        self.state = MountState::Unmounted;
        Ok(())
    }

    /// Forced detach. May discard unflushed writes, so it is never run as an
    /// automatic fallback; escalating here is always the caller's call.
    pub fn unmount_forced(&mut self) -> Result<(), MountError> {
        self.ensure_active()?;
        self.runner.run(&self.commands.unmount_forced)?;
        self.state = MountState::Unmounted;
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), MountError> {
        match self.state {
            MountState::Active => Ok(()),
            MountState::Unmounted => Err(MountError::AlreadyUnmounted),
        }
    }
}

/// Builds an unmount invocation addressing the mount by its final path
/// segment, run from the parent directory. The mount directory itself may
/// become unreachable mid-unmount, and some providers only match the active
/// mount table entry by that relative name.
pub(crate) fn unmount_spec(
    mount_point: &Path,
    program: &str,
    flags: &[&str],
) -> Result<CommandSpec, MountError> {
    let parent = mount_point.parent().ok_or_else(|| {
        MountError::Configuration(format!(
            "mount point {} has no parent directory",
            mount_point.display()
        ))
    })?;
    let name = mount_point.file_name().ok_or_else(|| {
        MountError::Configuration(format!(
            "mount point {} has no final path segment",
            mount_point.display()
        ))
    })?;

    Ok(CommandSpec::new(program, parent)
        .args(flags.iter().copied())
        .arg(name.to_string_lossy()))
}
