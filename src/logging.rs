// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Log output. The terminal belongs to the dashboard, so events go to a file.

use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{LogConfig, DEFAULT_LOG_FILTER};

/// Installs the global subscriber. Returns `false` when one is already installed.
pub fn init(config: &LogConfig) -> io::Result<bool> {
    if let Some(parent) = config.file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(&config.file)?;

    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|err| {
        eprintln!("bms-dashboard: ignoring log filter {:?}: {err}", config.filter);
        EnvFilter::new(DEFAULT_LOG_FILTER)
    });

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok();
    if installed {
        tracing::info!(file = %config.file.display(), filter = %config.filter, "logging started");
    }
    Ok(installed)
}
