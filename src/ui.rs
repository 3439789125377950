// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Shared UI state outside the panel manager.
//!
//! Transient notices (toasts) and the equipment layer filter.

use std::collections::BTreeSet;
use std::fmt;
use std::time::{Duration, Instant};

use crate::model::EquipmentKind;

pub const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
    expires_at: Instant,
}

impl Notice {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Auto-dismissing notices, newest last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub fn push(&mut self, severity: Severity, message: impl Into<String>, now: Instant) {
        let message = message.into();
        tracing::debug!(severity = %severity, message = %message, "notice");
        self.notices.push(Notice { severity, message, expires_at: now + NOTICE_TTL });
    }

    /// Drops expired notices. Returns `true` if anything was removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.notices.len();
        self.notices.retain(|notice| !notice.is_expired(now));
        self.notices.len() != before
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

/// Which equipment kinds are drawn on the building map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerFilter {
    hidden: BTreeSet<EquipmentKind>,
}

impl LayerFilter {
    pub fn is_visible(&self, kind: EquipmentKind) -> bool {
        !self.hidden.contains(&kind)
    }

    /// Returns the new visibility.
    pub fn toggle(&mut self, kind: EquipmentKind) -> bool {
        if !self.hidden.remove(&kind) {
            self.hidden.insert(kind);
        }
        self.is_visible(kind)
    }
}
