// Copyright 2026 Vault Mount Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use crate::{core::error::MountError, utils::validation};

/// Immutable per-mount parameters.
///
/// Built once through [`MountConfigBuilder`] and never mutated for the
/// lifetime of the mount. Absent fields stay `None`; an empty string is
/// never used as a stand-in for "not set".
#[derive(Debug, Clone)]
pub struct MountConfig {
    mount_point: PathBuf,
    volume_name: Option<String>,
    reveal_command: Option<String>,
    volume_icon: Option<PathBuf>,
    extra_options: Vec<String>,
}

impl MountConfig {
    pub fn builder() -> MountConfigBuilder {
        MountConfigBuilder::default()
    }

    pub fn mount_point(&self) -> &Path {
        &self.mount_point
    }

    pub fn volume_name(&self) -> Option<&str> {
        self.volume_name.as_deref()
    }

    pub fn reveal_command(&self) -> Option<&str> {
        self.reveal_command.as_deref()
    }

    pub fn volume_icon(&self) -> Option<&Path> {
        self.volume_icon.as_deref()
    }

    /// Raw options handed through to the provider after the platform set.
    pub fn extra_options(&self) -> &[String] {
        &self.extra_options
    }
}

#[derive(Debug, Default)]
pub struct MountConfigBuilder {
    mount_point: Option<PathBuf>,
    volume_name: Option<String>,
    reveal_command: Option<String>,
    volume_icon: Option<PathBuf>,
    extra_options: Vec<String>,
}

impl MountConfigBuilder {
    pub fn mount_point(mut self, path: impl Into<PathBuf>) -> Self {
        self.mount_point = Some(path.into());
        self
    }

    pub fn volume_name(mut self, name: impl Into<String>) -> Self {
        self.volume_name = Some(name.into());
        self
    }

    pub fn reveal_command(mut self, command: impl Into<String>) -> Self {
        self.reveal_command = Some(command.into());
        self
    }

    pub fn volume_icon(mut self, path: impl Into<PathBuf>) -> Self {
        self.volume_icon = Some(path.into());
        self
    }

    pub fn extra_option(mut self, option: impl Into<String>) -> Self {
        self.extra_options.push(option.into());
        self
    }

    pub fn extra_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_options.extend(options.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Result<MountConfig, MountError> {
        let mount_point = self
            .mount_point
            .ok_or_else(|| MountError::Configuration("mount point is not set".to_string()))?;

        if let Some(name) = &self.volume_name {
            validation::validate_volume_name(name)?;
        }

        Ok(MountConfig {
            mount_point,
            volume_name: self.volume_name,
            reveal_command: self.reveal_command,
            volume_icon: self.volume_icon,
            extra_options: self.extra_options,
        })
    }
}
