// Copyright 2026 Vault Mount Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{fmt as std_fmt, fs::create_dir_all, io::Write, path::Path};

use anyhow::Result;
use tracing::{Event, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, FmtContext, FormatEvent, FormatFields},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

struct SimpleFormatter;

impl<S, N> FormatEvent<S, N> for SimpleFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: fmt::format::Writer<'_>,
        event: &Event<'_>,
    ) -> std_fmt::Result {
        let level = *event.metadata().level();
        write!(writer, "[{}] ", level)?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

pub fn init_logging(verbose: bool, log_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let mut guard = None;

    let file_layer = if let Some(path) = log_path {
        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }
        let file_name = path
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;
        let directory = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Invalid log directory"))?;

        let file_appender = tracing_appender::rolling::never(directory, file_name);
        let (non_blocking, g) = tracing_appender::non_blocking(file_appender);
        guard = Some(g);

        Some(
            fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .event_format(SimpleFormatter),
        )
    } else {
        None
    };

    // logs go to stderr; stdout is reserved for command output
    let console_layer = fmt::layer()
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing_log::LogTracer::init().ok();

    if let Some(path) = log_path {
        let log_path_buf = path.to_path_buf();
        std::panic::set_hook(Box::new(move |info| {
            let msg = match info.payload().downcast_ref::<&str>() {
                Some(s) => *s,
                None => match info.payload().downcast_ref::<String>() {
                    Some(s) => &s[..],
                    None => "Box<Any>",
                },
            };

            let location = info
                .location()
                .map(|l| format!("{}:{}", l.file(), l.line()))
                .unwrap_or_default();

            let error_msg = format!("\n[ERROR] PANIC: Thread crashed at {}: {}\n", location, msg);

            if let Ok(mut file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path_buf)
            {
                let _ = writeln!(file, "{}", error_msg);
            }

            eprintln!("{}", error_msg);
        }));
    }

    Ok(guard)
}
