// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_FILTER_ENV: &str = "AUTHDESK_LOG";

/// Installs the global subscriber writing to `path`. Nothing is installed
/// without a path, since the terminal belongs to the UI.
pub fn init(path: Option<&Path>, level: &str) -> Result<bool> {
    let Some(path) = path else {
        return Ok(false);
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| {
            format!(
                "open log file {}; fix [log].path or remove it to disable logging",
                path.display()
            )
        })?;

    let filter = build_filter(env::var(LOG_FILTER_ENV).ok().as_deref(), level)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))?;
    Ok(true)
}

fn build_filter(env_value: Option<&str>, level: &str) -> Result<EnvFilter> {
    let directive = env_value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(level);
    EnvFilter::try_new(directive).with_context(|| {
        format!(
            "invalid log filter {directive:?}; set {LOG_FILTER_ENV} to a level like debug or a directive like authdesk_rpc=trace"
        )
    })
}
