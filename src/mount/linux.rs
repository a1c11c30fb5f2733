// Copyright 2026 Vault Mount Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! libfuse provider.
//!
//! Applicable on Linux hosts exposing `/dev/fuse`. There is no version
//! descriptor to gate on here; the device node either exists or it does not.

use std::{path::Path, sync::Arc};

use crate::{
    core::{
        command::{CommandRunner, SystemRunner},
        error::MountError,
    },
    defs,
    mount::{
        Mounter, mount_spec, owner_ids, preflight_mount_point, reveal_spec,
        config::MountConfig,
        handle::{Mount, MountCommands, unmount_spec},
    },
};

const FUSE_DEVICE: &str = "/dev/fuse";

const REVEAL_PROGRAM: &str = "xdg-open";
const UNMOUNT_PROGRAM: &str = "fusermount";

pub struct LinuxMounter {
    mount_program: String,
    runner: Arc<dyn CommandRunner>,
}

impl LinuxMounter {
    pub fn new(mount_program: impl Into<String>) -> Self {
        Self {
            mount_program: mount_program.into(),
            runner: Arc::new(SystemRunner),
        }
    }
}

impl Mounter for LinuxMounter {
    fn name(&self) -> &'static str {
        "libfuse"
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "linux") && Path::new(FUSE_DEVICE).exists()
    }

    fn mount(&self, config: &MountConfig) -> Result<Mount, MountError> {
        preflight_mount_point(config.mount_point())?;

        #[cfg(target_os = "linux")]
        {
            if crate::utils::mount::is_mounted(config.mount_point()) {
                return Err(MountError::Configuration(format!(
                    "{} already carries a mount",
                    config.mount_point().display()
                )));
            }
        }

        let mount_point = config.mount_point().to_path_buf();
        let options = build_options(config)?;

        let commands = MountCommands {
            reveal: reveal_spec(config, REVEAL_PROGRAM, &mount_point),
            unmount: unmount_spec(&mount_point, UNMOUNT_PROGRAM, &["-u"])?,
            unmount_forced: unmount_spec(&mount_point, UNMOUNT_PROGRAM, &["-u", "-z"])?,
        };
        let mount = mount_spec(&self.mount_program, &mount_point, &options)?;

        self.runner.run(&mount)?;

        tracing::info!("mounted {} via libfuse", mount_point.display());

        Ok(Mount::new(mount_point, commands, Arc::clone(&self.runner)))
    }
}

fn build_options(config: &MountConfig) -> Result<Vec<String>, MountError> {
    let (uid, gid) = owner_ids()?;
    Ok(fuse_options(config, uid, gid))
}

fn fuse_options(config: &MountConfig, uid: u32, gid: u32) -> Vec<String> {
    let mut options = vec![
        format!("-ouid={uid}"),
        format!("-ogid={gid}"),
        // drop the mount table entry when the provider dies
        "-oauto_unmount".to_string(),
        format!(
            "-ofsname={}",
            config.volume_name().unwrap_or(defs::DEFAULT_VOLUME_NAME)
        ),
    ];

    options.extend(config.extra_options().iter().cloned());
    options
}
