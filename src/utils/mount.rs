// Copyright 2026 Vault Mount Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{fs, path::Path};

use procfs::process::Process;

/// Whether `path` already appears as a mount point in this process's mount
/// table. Falls back to scanning `/proc/mounts` when procfs is unreadable.
pub fn is_mounted(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    let search = path_str.trim_end_matches('/');

    if let Ok(process) = Process::myself()
        && let Ok(mountinfo) = process.mountinfo()
    {
        return mountinfo
            .into_iter()
            .any(|m| m.mount_point.to_string_lossy() == search);
    }

    log::debug!("mountinfo unreadable, scanning /proc/mounts for {search}");

    if let Ok(content) = fs::read_to_string("/proc/mounts") {
        for line in content.lines() {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() > 1 && parts[1] == search {
                return true;
            }
        }
    }
    false
}
