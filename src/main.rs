// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! bms-dashboard CLI entrypoint.
//!
//! Runs the terminal dashboard. With a token it polls the equipment service; with `--demo` it
//! polls an in-memory copy of the demo building; with neither it shows the demo building without
//! polling.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use bms_dashboard::config::{ConfigOverrides, DashboardConfig, FeedMode};
use bms_dashboard::feed::{HttpEquipmentSource, MemorySource};
use bms_dashboard::model::{demo_fleet, EquipmentFleet};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--api-url <url>] [--token <token>] [--poll-interval-ms <ms>] [--request-timeout-ms <ms>] [--log-file <path>]\n  {program} --demo [--poll-interval-ms <ms>] [--log-file <path>]\n\nFlags beat the environment: BMS_API_URL, BMS_TOKEN, BMS_POLL_INTERVAL_MS, BMS_REQUEST_TIMEOUT_MS, BMS_LOG.\nWithout a token the demo building is shown without polling.\n--demo polls an in-memory copy of the demo building and cannot be combined with --token."
    );
}

fn parse_millis(raw: &str) -> Result<u64, ()> {
    match raw.parse::<u64>() {
        Ok(0) | Err(_) => Err(()),
        Ok(ms) => Ok(ms),
    }
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<ConfigOverrides, ()> {
    let mut options = ConfigOverrides::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--api-url" => {
                if options.api_url.is_some() {
                    return Err(());
                }
                options.api_url = Some(args.next().ok_or(())?);
            }
            "--token" => {
                if options.token.is_some() {
                    return Err(());
                }
                options.token = Some(args.next().ok_or(())?);
            }
            "--poll-interval-ms" => {
                if options.poll_interval_ms.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.poll_interval_ms = Some(parse_millis(&raw)?);
            }
            "--request-timeout-ms" => {
                if options.request_timeout_ms.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.request_timeout_ms = Some(parse_millis(&raw)?);
            }
            "--log-file" => {
                if options.log_file.is_some() {
                    return Err(());
                }
                options.log_file = Some(PathBuf::from(args.next().ok_or(())?));
            }
            _ => return Err(()),
        }
    }

    if options.demo && options.token.is_some() {
        return Err(());
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "bms-dashboard".to_owned());

        let overrides = match parse_options(args) {
            Ok(overrides) => overrides,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let config = DashboardConfig::from_env(overrides)?;
        bms_dashboard::logging::init(&config.log)?;
        tracing::info!(mode = ?config.feed_mode(), api = %config.api_base_url, "starting dashboard");

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        let handle = runtime.handle().clone();

        let tui_result = match (config.feed_mode(), config.credential.clone()) {
            (FeedMode::Remote, Some(credential)) => {
                let source = HttpEquipmentSource::new(
                    &config.api_base_url,
                    credential.expose(),
                    config.request_timeout,
                )?;
                let source = Some(Arc::new(source));
                runtime.block_on(async move {
                    tokio::task::spawn_blocking(move || {
                        bms_dashboard::tui::run(&config, EquipmentFleet::default(), source, handle)
                            .map_err(|err| err.to_string())
                    })
                    .await
                })
            }
            (FeedMode::Demo, _) => {
                let fleet = demo_fleet();
                let source = Some(Arc::new(MemorySource::from_fleet(&fleet)));
                runtime.block_on(async move {
                    tokio::task::spawn_blocking(move || {
                        bms_dashboard::tui::run(&config, fleet, source, handle)
                            .map_err(|err| err.to_string())
                    })
                    .await
                })
            }
            _ => {
                // no runtime work without a source; the TUI runs on this thread
                Ok(bms_dashboard::tui::run(
                    &config,
                    demo_fleet(),
                    None::<Arc<MemorySource>>,
                    handle,
                )
                .map_err(|err| err.to_string()))
            }
        };

        let tui_result = tui_result.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
        tui_result.map_err(|err| Box::new(std::io::Error::other(err)) as Box<dyn Error>)?;
        tracing::info!("dashboard closed");
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("bms-dashboard: {err}");
        std::process::exit(1);
    }
}
