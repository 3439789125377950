// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Equipment records as reported by the feed, the per-category fleet the panels render from, and
//! the typed ids shared with the panel layer.

pub mod equipment;
pub mod fixtures;
pub mod fleet;
pub mod ids;

pub use equipment::{
    AccidentKind, EquipmentKind, EquipmentRecord, EquipmentStatus, FaultIndicator,
    ParseEquipmentKindError, Voltage,
};
pub use fixtures::demo_fleet;
pub use fleet::{EquipmentFleet, EvSummary, FaultyUnit};
pub use ids::{EquipmentId, Id, IdError, PanelId};
