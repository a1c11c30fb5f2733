// Copyright 2026 Vault Mount Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    conf::cli::MountArgs,
    core::error::MountError,
    defs,
    mount::MountConfig,
};

/// Host-wide settings, loaded from the TOML config file and merged with the
/// command line before a mount attempt.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub mount_point: Option<PathBuf>,
    #[serde(default)]
    pub volume_name: Option<String>,
    #[serde(default)]
    pub volume_icon: Option<PathBuf>,
    #[serde(default)]
    pub reveal_command: Option<String>,
    #[serde(default = "default_mount_program")]
    pub mount_program: String,
    #[serde(default)]
    pub extra_options: Vec<String>,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default)]
    pub verbose: bool,
}

fn default_mount_program() -> String {
    defs::DEFAULT_MOUNT_PROGRAM.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mount_point: None,
            volume_name: None,
            volume_icon: None,
            reveal_command: None,
            mount_program: default_mount_program(),
            extra_options: Vec::new(),
            log_file: None,
            verbose: false,
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).context("failed to read config file")?;

        let config: Config = toml::from_str(&content).context("failed to parse config file")?;

        Ok(config)
    }

    pub fn load_default() -> Result<Self> {
        Self::from_file(defs::CONFIG_FILE)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).context("failed to serialize config")?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).context("failed to create config directory")?;
        }

        fs::write(path.as_ref(), content).context("failed to write config file")?;

        Ok(())
    }

    /// Command-line values win over anything the file carried.
    pub fn merge_with_cli(&mut self, args: &MountArgs, verbose: bool) {
        if let Some(path) = &args.mount_point {
            self.mount_point = Some(path.clone());
        }

        if let Some(name) = &args.volume_name {
            self.volume_name = Some(name.clone());
        }

        if let Some(icon) = &args.volume_icon {
            self.volume_icon = Some(icon.clone());
        }

        if let Some(command) = &args.reveal_command {
            self.reveal_command = Some(command.clone());
        }

        if !args.options.is_empty() {
            self.extra_options = args.options.clone();
        }

        if let Some(log_file) = &args.log_file {
            self.log_file = Some(log_file.clone());
        }

        if verbose {
            self.verbose = true;
        }
    }

    /// Freezes the merged settings into the immutable per-mount
    /// configuration.
    pub fn to_mount_config(&self) -> Result<MountConfig, MountError> {
        let mut builder = MountConfig::builder();

        if let Some(path) = &self.mount_point {
            builder = builder.mount_point(path.clone());
        }
        if let Some(name) = &self.volume_name {
            builder = builder.volume_name(name.clone());
        }
        if let Some(icon) = &self.volume_icon {
            builder = builder.volume_icon(icon.clone());
        }
        if let Some(command) = &self.reveal_command {
            builder = builder.reveal_command(command.clone());
        }

        builder.extra_options(self.extra_options.iter().cloned()).build()
    }
}
