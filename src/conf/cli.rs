// Copyright 2026 Vault Mount Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::defs;

#[derive(Parser, Debug)]
#[command(name = "vault-mount", version, about = "Vault filesystem mount manager")]
pub struct Cli {
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Mount(MountArgs),
    Probe,
    GenConfig {
        #[arg(short = 'o', long = "output", default_value = defs::CONFIG_FILE)]
        output: PathBuf,
    },
    ShowConfig,
}

#[derive(Args, Debug, Default)]
pub struct MountArgs {
    #[arg(short = 'p', long = "mount-point")]
    pub mount_point: Option<PathBuf>,
    #[arg(short = 'n', long = "volume-name")]
    pub volume_name: Option<String>,
    #[arg(long = "volume-icon")]
    pub volume_icon: Option<PathBuf>,
    #[arg(long = "reveal-command")]
    pub reveal_command: Option<String>,
    #[arg(short = 'o', long = "option")]
    pub options: Vec<String>,
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
    #[arg(long = "reveal")]
    pub reveal: bool,
    #[arg(short = 'f', long = "force")]
    pub force: bool,
}
