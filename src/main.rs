// Copyright 2026 Vault Mount Developers
// SPDX-License-Identifier: GPL-3.0-or-later
mod conf;
mod core;
mod defs;
mod mount;
mod utils;

use std::{
    io::{self, BufRead, IsTerminal},
    path::Path,
};

use anyhow::{Context, Result};
use clap::Parser;
use conf::{
    cli::{Cli, Commands, MountArgs},
    cli_handlers,
};
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::GenConfig { output } => cli_handlers::handle_gen_config(output),
        Commands::ShowConfig => cli_handlers::handle_show_config(&cli),
        Commands::Probe => cli_handlers::handle_probe(&cli),
        Commands::Mount(args) => run_mount(&cli, args),
    }
}

fn run_mount(cli: &Cli, args: &MountArgs) -> Result<()> {
    let mut config = cli_handlers::load_config(cli)?;

    config.merge_with_cli(args, cli.verbose);

    let _log_guard = utils::init_logging(config.verbose, config.log_file.as_deref())
        .context("Failed to initialize logging")?;

    let mount_config = config
        .to_mount_config()
        .context("Invalid mount configuration")?;

    let mounters = mount::mounters(&config.mount_program);
    let mounter =
        mount::select_mounter(&mounters).context("No usable fuse provider on this host")?;

    tracing::info!(
        ">> Mounting {} via {}",
        mount_config.mount_point().display(),
        mounter.name()
    );

    let mut handle = mounter
        .mount(&mount_config)
        .with_context(|| format!("Failed to mount {}", mount_config.mount_point().display()))?;

    if args.reveal
        && let Err(e) = handle.reveal()
    {
        tracing::warn!("Failed to reveal mounted volume: {e}");
    }

    wait_for_release(handle.mount_point());

    match handle.unmount() {
        Ok(()) => {
            tracing::info!(">> Volume detached cleanly.");
            Ok(())
        }
        Err(e) if args.force => {
            tracing::warn!("Graceful unmount failed ({e}); forcing as requested");

            handle
                .unmount_forced()
                .context("Forced unmount failed; volume is still attached")?;

            tracing::info!(">> Volume detached (forced).");
            Ok(())
        }
        Err(e) => Err(e).context(
            "Unmount failed; volume is still attached (re-run with --force to escalate)",
        ),
    }
}

/// Blocks until the user asks for the volume back. The mount itself is an
/// external daemon, so all there is to do here is wait.
fn wait_for_release(mount_point: &Path) {
    let stdin = io::stdin();

    if stdin.is_terminal() {
        println!(
            "Mounted at {}. Press <enter> to unmount.",
            mount_point.display()
        );
    }

    let mut line = String::new();
    let _ = stdin.lock().read_line(&mut line);
}
