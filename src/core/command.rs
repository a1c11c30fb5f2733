// Copyright 2026 Vault Mount Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::core::error::MountError;

/// One external invocation: a program, its ordered arguments and the
/// directory it must run from. Built once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    dir: PathBuf,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            dir: dir.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Narrow seam over "spawn, wait, inspect the exit status" so the lifecycle
/// state machine can be exercised without touching real processes.
pub trait CommandRunner: Send + Sync {
    fn run(&self, spec: &CommandSpec) -> Result<(), MountError>;
}

/// Runs commands on the host and blocks until they exit.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<(), MountError> {
        let output = Command::new(spec.program())
            .args(spec.arguments())
            .current_dir(spec.dir())
            .stdin(Stdio::null())
            .output()
            .map_err(|source| MountError::CommandSpawn {
                program: spec.program().to_string(),
                dir: spec.dir().to_path_buf(),
                source,
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            tracing::debug!("`{}` stderr: {}", spec.program(), stderr.trim());
        }

        Err(MountError::CommandFailed {
            program: spec.program().to_string(),
            dir: spec.dir().to_path_buf(),
            status: output.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn spec_keeps_argument_order() {
        let spec = CommandSpec::new("umount", "/vaults")
            .arg("-f")
            .args(["v1", "v2"]);

        assert_eq!(spec.program(), "umount");
        assert_eq!(spec.arguments(), ["-f", "v1", "v2"]);
        assert_eq!(spec.dir(), Path::new("/vaults"));
    }

    #[test]
    fn zero_exit_is_ok() {
        let spec = CommandSpec::new("true", env::temp_dir());
        assert!(SystemRunner.run(&spec).is_ok());
    }

    #[test]
    fn nonzero_exit_reports_command_and_dir() {
        let spec = CommandSpec::new("false", env::temp_dir());
        match SystemRunner.run(&spec) {
            Err(MountError::CommandFailed { program, dir, status }) => {
                assert_eq!(program, "false");
                assert_eq!(dir, env::temp_dir());
                assert!(!status.success());
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let spec = CommandSpec::new("definitely-not-a-real-binary", env::temp_dir());
        assert!(matches!(
            SystemRunner.run(&spec),
            Err(MountError::CommandSpawn { .. })
        ));
    }
}
