// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runtime configuration.
//!
//! Values come from command-line flags, then `BMS_*` environment variables, then defaults.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://bms-backend-rust.vercel.app";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_LOG_FILTER: &str = "warn";

pub const ENV_API_URL: &str = "BMS_API_URL";
pub const ENV_TOKEN: &str = "BMS_TOKEN";
pub const ENV_POLL_INTERVAL_MS: &str = "BMS_POLL_INTERVAL_MS";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "BMS_REQUEST_TIMEOUT_MS";
pub const ENV_LOG: &str = "BMS_LOG";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {name}={value}: expected a whole number of milliseconds")]
    InvalidNumber { name: String, value: String },
    #[error("{name} must be greater than zero")]
    Zero { name: String },
    #[error("{name} is not valid unicode")]
    NotUnicode { name: String },
}

/// Bearer credential for the equipment service. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Blank input is no credential at all.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub file: PathBuf,
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: env::temp_dir().join("bms-dashboard.log"),
            filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

/// Values given on the command line. Anything set here beats the environment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub request_timeout_ms: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub demo: bool,
}

/// Where equipment data comes from for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedMode {
    /// Poll the remote service with the configured credential.
    Remote,
    /// Poll an in-process copy of the demo fleet.
    Demo,
    /// No credential: show the demo fleet without polling.
    Offline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub credential: Option<Credential>,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub demo: bool,
    pub log: LogConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_owned(),
            credential: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            demo: false,
            log: LogConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve(overrides, read_env)
    }

    /// Resolves `overrides` against `lookup`, which stands in for the process environment.
    pub fn resolve<F>(overrides: ConfigOverrides, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<Option<String>, ConfigError>,
    {
        let mut config = Self::default();

        if let Some(url) = overrides.api_url.or(non_blank(lookup(ENV_API_URL)?)) {
            config.api_base_url = url.trim_end_matches('/').to_owned();
        }
        config.credential = match overrides.token {
            Some(token) => Credential::new(token),
            None => lookup(ENV_TOKEN)?.and_then(Credential::new),
        };

        let poll_ms = match overrides.poll_interval_ms {
            Some(ms) => Some(ms),
            None => parse_millis(ENV_POLL_INTERVAL_MS, lookup(ENV_POLL_INTERVAL_MS)?)?,
        };
        if let Some(ms) = poll_ms {
            config.poll_interval = non_zero("poll interval", ms)?;
        }

        let timeout_ms = match overrides.request_timeout_ms {
            Some(ms) => Some(ms),
            None => parse_millis(ENV_REQUEST_TIMEOUT_MS, lookup(ENV_REQUEST_TIMEOUT_MS)?)?,
        };
        if let Some(ms) = timeout_ms {
            config.request_timeout = non_zero("request timeout", ms)?;
        }

        if let Some(file) = overrides.log_file {
            config.log.file = file;
        }
        if let Some(filter) = non_blank(lookup(ENV_LOG)?) {
            config.log.filter = filter;
        }
        config.demo = overrides.demo;

        Ok(config)
    }

    pub fn feed_mode(&self) -> FeedMode {
        if self.demo {
            FeedMode::Demo
        } else if self.credential.is_some() {
            FeedMode::Remote
        } else {
            FeedMode::Offline
        }
    }
}

fn read_env(name: &str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            Err(ConfigError::NotUnicode { name: name.to_owned() })
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn parse_millis(name: &str, value: Option<String>) -> Result<Option<u64>, ConfigError> {
    let Some(value) = non_blank(value) else {
        return Ok(None);
    };
    value
        .parse::<u64>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidNumber { name: name.to_owned(), value })
}

fn non_zero(name: &str, ms: u64) -> Result<Duration, ConfigError> {
    if ms == 0 {
        return Err(ConfigError::Zero { name: name.to_owned() });
    }
    Ok(Duration::from_millis(ms))
}
