// Copyright 2026 Vault Mount Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! macFUSE/osxfuse provider.
//!
//! Applicable on macOS hosts carrying the provider library at least at
//! version 3.8.2. The installed version is read out of the provider's
//! `version.plist`; anything wrong with that file makes this mounter
//! inapplicable rather than failing the probe.

use std::{path::Path, sync::Arc};

use crate::{
    core::{
        command::{CommandRunner, SystemRunner},
        error::MountError,
        version::{self, Version},
    },
    defs,
    mount::{
        Mounter, mount_spec, owner_ids, preflight_mount_point, reveal_spec,
        config::MountConfig,
        handle::{Mount, MountCommands, unmount_spec},
    },
};

const MARKER_LIBRARY: &str = "/usr/local/lib/libosxfuse.2.dylib";
const VERSION_FILE: &str = "/Library/Filesystems/osxfuse.fs/Contents/version.plist";
const VERSION_KEY: &str = "CFBundleShortVersionString";
const MINIMUM_VERSION: &[u32] = &[3, 8, 2];

const REVEAL_PROGRAM: &str = "open";
const UNMOUNT_PROGRAM: &str = "umount";

pub struct MacMounter {
    mount_program: String,
    runner: Arc<dyn CommandRunner>,
}

impl MacMounter {
    pub fn new(mount_program: impl Into<String>) -> Self {
        Self {
            mount_program: mount_program.into(),
            runner: Arc::new(SystemRunner),
        }
    }
}

impl Mounter for MacMounter {
    fn name(&self) -> &'static str {
        "macfuse"
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "macos")
            && Path::new(MARKER_LIBRARY).exists()
            && version::is_supported(self.installed_version().as_ref(), &minimum_version())
    }

    fn installed_version(&self) -> Option<Version> {
        installed_version(Path::new(VERSION_FILE))
    }

    fn mount(&self, config: &MountConfig) -> Result<Mount, MountError> {
        preflight_mount_point(config.mount_point())?;

        let mount_point = config.mount_point().to_path_buf();
        let options = build_options(config)?;

        // resolve every command up front so a malformed mount point cannot
        // leave a volume attached without a working teardown
        let commands = MountCommands {
            reveal: reveal_spec(config, REVEAL_PROGRAM, &mount_point),
            unmount: unmount_spec(&mount_point, UNMOUNT_PROGRAM, &[])?,
            unmount_forced: unmount_spec(&mount_point, UNMOUNT_PROGRAM, &["-f"])?,
        };
        let mount = mount_spec(&self.mount_program, &mount_point, &options)?;

        self.runner.run(&mount)?;

        tracing::info!("mounted {} via macFUSE", mount_point.display());

        Ok(Mount::new(mount_point, commands, Arc::clone(&self.runner)))
    }
}

fn minimum_version() -> Version {
    Version::new(MINIMUM_VERSION)
}

/// Reads the provider version out of its plist descriptor. A missing,
/// unreadable or malformed descriptor yields `None`; the cause is logged
/// here and never escalates past the probe.
fn installed_version(descriptor: &Path) -> Option<Version> {
    let value = match plist::Value::from_file(descriptor) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("could not read {}: {}", descriptor.display(), e);
            return None;
        }
    };

    let Some(raw) = value
        .as_dictionary()
        .and_then(|dict| dict.get(VERSION_KEY))
        .and_then(plist::Value::as_string)
    else {
        tracing::warn!("no {} entry in {}", VERSION_KEY, descriptor.display());
        return None;
    };

    match raw.parse() {
        Ok(version) => Some(version),
        Err(e) => {
            tracing::warn!(
                "unparsable provider version {:?} in {}: {}",
                raw,
                descriptor.display(),
                e
            );
            None
        }
    }
}

fn build_options(config: &MountConfig) -> Result<Vec<String>, MountError> {
    let (uid, gid) = owner_ids()?;
    Ok(fuse_options(config, uid, gid))
}

// see: https://github.com/osxfuse/osxfuse/wiki/Mount-options
fn fuse_options(config: &MountConfig, uid: u32, gid: u32) -> Vec<String> {
    let mut options = vec![
        format!("-ouid={uid}"),
        format!("-ogid={gid}"),
        "-oatomic_o_trunc".to_string(),
        format!(
            "-ovolname={}",
            config.volume_name().unwrap_or(defs::DEFAULT_VOLUME_NAME)
        ),
        "-oauto_cache".to_string(),
        // noappledouble keeps Finder metadata files out of the vault
        "-onoappledouble".to_string(),
        "-odefault_permissions".to_string(),
    ];

    if let Some(icon) = config.volume_icon() {
        options.push("-omodules=iconv:volicon".to_string());
        options.push(format!("-oiconpath={}", icon.display()));
        options.push("-ofrom_code=UTF-8".to_string());
        options.push("-oto_code=UTF-8-MAC".to_string());
    } else {
        // file names still need the NFD conversion without an icon module
        options.push("-omodules=iconv,from_code=UTF-8,to_code=UTF-8-MAC".to_string());
    }

    options.extend(config.extra_options().iter().cloned());
    options
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn plain_config() -> MountConfig {
        MountConfig::builder()
            .mount_point("/vaults/v1")
            .build()
            .unwrap()
    }

    fn icon_config() -> MountConfig {
        MountConfig::builder()
            .mount_point("/vaults/v1")
            .volume_icon("/icons/v1.icns")
            .build()
            .unwrap()
    }

    #[test]
    fn plain_options_in_exact_order() {
        let options = fuse_options(&plain_config(), 501, 20);
        assert_eq!(
            options,
            [
                "-ouid=501",
                "-ogid=20",
                "-oatomic_o_trunc",
                "-ovolname=vault",
                "-oauto_cache",
                "-onoappledouble",
                "-odefault_permissions",
                "-omodules=iconv,from_code=UTF-8,to_code=UTF-8-MAC",
            ]
        );
    }

    #[test]
    fn icon_branch_replaces_the_plain_group() {
        let options = fuse_options(&icon_config(), 501, 20);

        let tail = &options[options.len() - 4..];
        assert_eq!(
            tail,
            [
                "-omodules=iconv:volicon",
                "-oiconpath=/icons/v1.icns",
                "-ofrom_code=UTF-8",
                "-oto_code=UTF-8-MAC",
            ]
        );
        assert!(!options.iter().any(|o| o.starts_with("-omodules=iconv,")));
    }

    #[test]
    fn exactly_one_iconv_group_is_ever_emitted() {
        for config in [plain_config(), icon_config()] {
            let options = fuse_options(&config, 501, 20);
            let groups = options
                .iter()
                .filter(|o| o.starts_with("-omodules="))
                .count();
            assert_eq!(groups, 1);
        }
    }

    #[test]
    fn option_building_is_deterministic() {
        assert_eq!(
            fuse_options(&icon_config(), 501, 20),
            fuse_options(&icon_config(), 501, 20)
        );
    }

    #[test]
    fn configured_volume_name_wins_over_the_default() {
        let config = MountConfig::builder()
            .mount_point("/vaults/v1")
            .volume_name("Tresor")
            .build()
            .unwrap();

        let options = fuse_options(&config, 501, 20);
        assert!(options.contains(&"-ovolname=Tresor".to_string()));
        assert!(!options.iter().any(|o| o == "-ovolname=vault"));
    }

    #[test]
    fn extra_options_land_verbatim_after_the_platform_set() {
        let config = MountConfig::builder()
            .mount_point("/vaults/v1")
            .extra_options(["-odebug", "-onolocalcaches"])
            .build()
            .unwrap();

        let options = fuse_options(&config, 501, 20);
        assert_eq!(
            &options[options.len() - 2..],
            ["-odebug", "-onolocalcaches"]
        );
    }

    fn write_plist(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn version_plist(version: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>CFBundleShortVersionString</key>
    <string>{version}</string>
</dict>
</plist>
"#
        )
    }

    #[test]
    fn reads_the_version_out_of_the_descriptor() {
        let file = write_plist(&version_plist("3.8.2"));
        let version = installed_version(file.path()).unwrap();
        assert_eq!(version.components(), [3, 8, 2]);
    }

    #[test]
    fn four_component_versions_parse_too() {
        let file = write_plist(&version_plist("3.8.2.1"));
        let version = installed_version(file.path()).unwrap();
        assert_eq!(version.components(), [3, 8, 2, 1]);
    }

    #[test]
    fn missing_descriptor_is_absent_not_an_error() {
        assert!(installed_version(Path::new("/definitely/not/version.plist")).is_none());
    }

    #[test]
    fn descriptor_without_the_version_key_is_absent() {
        let file = write_plist(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>CFBundleIdentifier</key>
    <string>com.github.osxfuse.filesystems.osxfusefs</string>
</dict>
</plist>
"#,
        );
        assert!(installed_version(file.path()).is_none());
    }

    #[test]
    fn non_numeric_version_component_is_absent() {
        let file = write_plist(&version_plist("3.8.x"));
        assert!(installed_version(file.path()).is_none());
    }

    #[test]
    fn garbage_descriptor_is_absent() {
        let file = write_plist("not a plist at all");
        assert!(installed_version(file.path()).is_none());
    }

    #[test]
    fn minimum_version_matches_the_provider_floor() {
        assert_eq!(minimum_version().components(), [3, 8, 2]);
    }
}
