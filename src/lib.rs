// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! bms-dashboard: building-management dashboard with floating, draggable status panels.
//!
//! The window manager in [`panels`] owns panel placement, drags and scroll state. The [`feed`]
//! module polls equipment data in the background and holds results back while a panel is being
//! dragged. [`tui`] hosts both in a terminal.

pub mod config;
pub mod feed;
pub mod logging;
pub mod model;
pub mod panels;
pub mod tui;
pub mod ui;
