// Copyright 2026 Vault Mount Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::{
    conf::{cli::Cli, config::Config},
    defs, mount,
};

#[derive(Serialize)]
struct ProbeReportJson {
    provider: String,
    applicable: bool,
    installed_version: Option<String>,
}

pub fn load_config(cli: &Cli) -> Result<Config> {
    if let Some(config_path) = &cli.config {
        return Config::from_file(config_path).with_context(|| {
            format!(
                "Failed to load config from custom path: {}",
                config_path.display()
            )
        });
    }

    match Config::load_default() {
        Ok(config) => Ok(config),
        Err(e) => {
            let is_not_found = e
                .root_cause()
                .downcast_ref::<std::io::Error>()
                .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                .unwrap_or(false);

            if is_not_found {
                Ok(Config::default())
            } else {
                Err(e).context(format!(
                    "Failed to load default config from {}",
                    defs::CONFIG_FILE
                ))
            }
        }
    }
}

pub fn handle_gen_config(output: &Path) -> Result<()> {
    Config::default()
        .save_to_file(output)
        .with_context(|| format!("Failed to save generated config to {}", output.display()))
}

pub fn handle_show_config(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    let json = serde_json::to_string(&config).context("Failed to serialize config to JSON")?;

    println!("{}", json);

    Ok(())
}

/// Reports every registered provider in registry order, whether or not it
/// qualifies on this host.
pub fn handle_probe(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    let reports: Vec<ProbeReportJson> = mount::mounters(&config.mount_program)
        .iter()
        .map(|mounter| ProbeReportJson {
            provider: mounter.name().to_string(),
            applicable: mounter.is_applicable(),
            installed_version: mounter.installed_version().map(|v| v.to_string()),
        })
        .collect();

    let json = serde_json::to_string(&reports).context("Failed to serialize probe report")?;

    println!("{}", json);

    Ok(())
}
