// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FeedError>;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("credential rejected (HTTP 401)")]
    Unauthorized,

    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("write task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// How a failed feed call is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Drop the credential and tell the user the session expired.
    Unauthorized,
    /// Log and wait for the next tick.
    Transient,
}

impl FeedError {
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        if status == 401 {
            Self::Unauthorized
        } else {
            Self::Status { status }
        }
    }

    #[must_use]
    pub fn class(&self) -> FailureClass {
        match self {
            Self::Unauthorized => FailureClass::Unauthorized,
            Self::Status { .. } | Self::Transport(_) | Self::Decode(_) | Self::Task(_) => {
                FailureClass::Transient
            }
        }
    }
}
