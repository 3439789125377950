// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::PanelId;

use super::geometry::Point;

/// State of one pointer drag between grab and release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    panel_id: PanelId,
    grab_offset: Point,
    live: Point,
}

impl DragSession {
    pub fn panel_id(&self) -> &PanelId {
        &self.panel_id
    }

    /// Pointer position relative to the panel's top-left corner at grab time.
    pub fn grab_offset(&self) -> Point {
        self.grab_offset
    }

    /// Uncommitted position shown while the drag is in flight.
    pub fn live_position(&self) -> Point {
        self.live
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Per-panel `Idle -> Dragging -> Idle` machine.
///
/// The controller never writes the committed position itself: [`DragController::finish`] hands
/// the final live position back to the caller, which owns the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragController {
    panel_id: PanelId,
    phase: DragPhase,
}

impl DragController {
    pub fn new(panel_id: PanelId) -> Self {
        Self { panel_id, phase: DragPhase::Idle }
    }

    pub fn panel_id(&self) -> &PanelId {
        &self.panel_id
    }

    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.phase {
            DragPhase::Dragging(session) => Some(session),
            DragPhase::Idle => None,
        }
    }

    /// Enters `Dragging` with the committed position as the first live position.
    ///
    /// Returns `false` and changes nothing when a drag is already in flight.
    pub fn begin(&mut self, committed: Point, pointer: Point) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.phase = DragPhase::Dragging(DragSession {
            panel_id: self.panel_id.clone(),
            grab_offset: pointer.offset_from(committed),
            live: committed,
        });
        true
    }

    /// Moves the live position so the grab point stays under the pointer.
    pub fn move_to(&mut self, pointer: Point) -> Option<Point> {
        let DragPhase::Dragging(session) = &mut self.phase else {
            return None;
        };
        session.live = pointer.minus(session.grab_offset);
        Some(session.live)
    }

    /// Leaves `Dragging` and returns the position to commit.
    pub fn finish(&mut self) -> Option<Point> {
        match std::mem::take(&mut self.phase) {
            DragPhase::Dragging(session) => Some(session.live),
            DragPhase::Idle => None,
        }
    }

    /// What the host should draw: the live position mid-drag, otherwise `committed`.
    pub fn rendered_position(&self, committed: Point) -> Point {
        self.session().map_or(committed, DragSession::live_position)
    }
}
