// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use crate::model::{EquipmentKind, PanelId};

use super::geometry::{Footprint, Point, Viewport};
use super::placement::compute_position;

pub const UNIT_PANEL_WIDTH: i32 = 260;
const MINIMIZED_MIN_WIDTH: i32 = 120;

/// Static description of a dashboard panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub width: i32,
}

pub const PANEL_CATALOG: [PanelSpec; 11] = [
    PanelSpec { id: "accident", title: "Accident Controls", width: 200 },
    PanelSpec { id: "sidebar", title: "Sidebar", width: 220 },
    PanelSpec { id: "filter", title: "Show Equipment", width: 180 },
    PanelSpec { id: "floors", title: "Floors", width: 220 },
    PanelSpec { id: "equipmentOverview", title: "Equipment Overview", width: 230 },
    PanelSpec { id: "ev", title: "EV Charging Status", width: 380 },
    PanelSpec { id: "chillerPanel", title: "Chiller System", width: 480 },
    PanelSpec { id: "ahuPanel", title: "AHU System", width: 480 },
    PanelSpec { id: "electricalPanel", title: "Electrical Panel", width: 480 },
    PanelSpec { id: "pumpPanel", title: "Water Pump System", width: 480 },
    PanelSpec { id: "firePanel", title: "Fire Alarm System", width: 480 },
];

/// Id of the category overview panel for `kind`.
pub fn category_panel_id(kind: EquipmentKind) -> &'static str {
    match kind {
        EquipmentKind::EvCharger => "ev",
        EquipmentKind::Chiller => "chillerPanel",
        EquipmentKind::Ahu => "ahuPanel",
        EquipmentKind::Electrical => "electricalPanel",
        EquipmentKind::Pump => "pumpPanel",
        EquipmentKind::Fire => "firePanel",
    }
}

pub fn unit_panel_id(kind: EquipmentKind, index: usize) -> PanelId {
    PanelId::indexed(kind.unit_panel_prefix(), index)
}

/// Splits a unit panel id back into its category and index.
pub fn parse_unit_panel_id(panel_id: &PanelId) -> Option<(EquipmentKind, usize)> {
    let (prefix, index) = panel_id.as_str().rsplit_once('-')?;
    let kind = EquipmentKind::ALL.into_iter().find(|kind| kind.unit_panel_prefix() == prefix)?;
    Some((kind, index.parse().ok()?))
}

pub fn minimized_width(title: &str) -> i32 {
    let chars = i32::try_from(title.chars().count()).unwrap_or(i32::MAX / 6);
    MINIMIZED_MIN_WIDTH.max(chars.saturating_mul(6).saturating_add(60))
}

/// One floating panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRecord {
    id: PanelId,
    title: String,
    width: i32,
    open: bool,
    minimized: bool,
    position: Point,
    z_index: u32,
    ever_opened: bool,
    measured_height: Option<i32>,
}

impl PanelRecord {
    pub fn new(id: PanelId, title: impl Into<String>, width: i32) -> Self {
        Self {
            id,
            title: title.into(),
            width,
            open: false,
            minimized: false,
            position: Point::default(),
            z_index: 0,
            ever_opened: false,
            measured_height: None,
        }
    }

    pub fn id(&self) -> &PanelId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Nominal content width.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Width actually drawn: the nominal width, or the title-derived width while minimized.
    pub fn display_width(&self) -> i32 {
        if self.minimized {
            minimized_width(&self.title)
        } else {
            self.width
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn z_index(&self) -> u32 {
        self.z_index
    }

    pub fn ever_opened(&self) -> bool {
        self.ever_opened
    }

    pub fn measured_height(&self) -> Option<i32> {
        self.measured_height
    }

    fn footprint(&self) -> Footprint {
        let footprint = Footprint::new(self.id.clone(), self.position, self.width);
        match self.measured_height {
            Some(height) => footprint.with_height(height),
            None => footprint,
        }
    }
}

/// Outcome of [`PanelRegistry::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// First open; the position came from placement.
    Placed(Point),
    /// Reopened at its stored position.
    Restored(Point),
    AlreadyOpen,
    Unknown,
}

/// All panel records for the session.
///
/// Unknown ids are no-ops everywhere; nothing here panics on caller input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRegistry {
    panels: BTreeMap<PanelId, PanelRecord>,
    viewport: Viewport,
    top_z: u32,
}

impl Default for PanelRegistry {
    fn default() -> Self {
        Self::with_catalog(Viewport::default())
    }
}

impl PanelRegistry {
    pub fn empty(viewport: Viewport) -> Self {
        Self { panels: BTreeMap::new(), viewport, top_z: 0 }
    }

    pub fn with_catalog(viewport: Viewport) -> Self {
        let mut registry = Self::empty(viewport);
        for spec in PANEL_CATALOG {
            if let Ok(id) = PanelId::new(spec.id) {
                registry.register(PanelRecord::new(id, spec.title, spec.width));
            }
        }
        registry
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Adds a panel. An existing record with the same id is kept as is.
    pub fn register(&mut self, record: PanelRecord) -> bool {
        if self.panels.contains_key(record.id()) {
            return false;
        }
        self.panels.insert(record.id.clone(), record);
        true
    }

    /// Registers the detail panel for one equipment unit on first use.
    pub fn ensure_unit_panel(&mut self, kind: EquipmentKind, index: usize, title: &str) -> PanelId {
        let id = unit_panel_id(kind, index);
        if !self.panels.contains_key(&id) {
            self.register(PanelRecord::new(id.clone(), title, UNIT_PANEL_WIDTH));
        }
        id
    }

    pub fn get(&self, id: &PanelId) -> Option<&PanelRecord> {
        self.panels.get(id)
    }

    pub fn contains(&self, id: &PanelId) -> bool {
        self.panels.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PanelRecord> {
        self.panels.values()
    }

    pub fn top_z(&self) -> u32 {
        self.top_z
    }

    /// Open panels, lowest z first.
    pub fn paint_order(&self) -> Vec<&PanelRecord> {
        let mut open: Vec<&PanelRecord> = self.panels.values().filter(|p| p.open).collect();
        open.sort_by_key(|panel| panel.z_index);
        open
    }

    pub fn front_panel(&self) -> Option<&PanelRecord> {
        self.paint_order().last().copied()
    }

    fn visible_footprints(&self, except: &PanelId) -> Vec<Footprint> {
        self.panels
            .values()
            .filter(|panel| panel.open && &panel.id != except)
            .map(PanelRecord::footprint)
            .collect()
    }

    /// Opens a panel, placing it on its first open and restoring the stored position afterwards.
    /// The panel is raised in both cases.
    pub fn open(&mut self, id: &PanelId) -> OpenOutcome {
        let Some(record) = self.panels.get(id) else {
            return OpenOutcome::Unknown;
        };
        if record.open {
            return OpenOutcome::AlreadyOpen;
        }

        let outcome = if record.ever_opened {
            OpenOutcome::Restored(record.position)
        } else {
            let visible = self.visible_footprints(id);
            OpenOutcome::Placed(compute_position(id, record.width, self.viewport, &visible))
        };

        let z = self.next_z();
        if let Some(record) = self.panels.get_mut(id) {
            if let OpenOutcome::Placed(at) = outcome {
                record.position = at;
                record.ever_opened = true;
            }
            record.open = true;
            record.z_index = z;
        }
        outcome
    }

    /// Hides a panel. Position and the first-open flag are kept for the next open.
    pub fn close(&mut self, id: &PanelId) -> bool {
        match self.panels.get_mut(id) {
            Some(record) if record.open => {
                record.open = false;
                record.minimized = false;
                true
            }
            _ => false,
        }
    }

    /// Opens a closed panel or closes an open one. Returns the new open state.
    pub fn toggle(&mut self, id: &PanelId) -> Option<bool> {
        let open = self.panels.get(id)?.open;
        if open {
            self.close(id);
        } else {
            self.open(id);
        }
        Some(!open)
    }

    /// Flips the minimized flag of an open panel. Returns the new flag.
    pub fn toggle_minimize(&mut self, id: &PanelId) -> Option<bool> {
        let record = self.panels.get_mut(id).filter(|record| record.open)?;
        record.minimized = !record.minimized;
        Some(record.minimized)
    }

    /// Unconditional write; the window manager guards it against in-flight drags.
    pub(crate) fn set_position(&mut self, id: &PanelId, position: Point) -> bool {
        let Some(record) = self.panels.get_mut(id) else {
            return false;
        };
        record.position = position;
        true
    }

    pub fn set_measured_height(&mut self, id: &PanelId, height: Option<i32>) -> bool {
        let Some(record) = self.panels.get_mut(id) else {
            return false;
        };
        record.measured_height = height;
        true
    }

    pub fn bring_to_front(&mut self, id: &PanelId) -> Option<u32> {
        if !self.panels.contains_key(id) {
            return None;
        }
        let z = self.next_z();
        let record = self.panels.get_mut(id)?;
        record.z_index = z;
        Some(z)
    }

    fn next_z(&mut self) -> u32 {
        self.top_z = self.top_z.saturating_add(1);
        self.top_z
    }
}

#[cfg(test)]
mod tests;
