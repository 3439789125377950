// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use crate::model::{EquipmentKind, PanelId};

use super::aggregator::{DragAggregator, DragBatchEnded, DragSignal};
use super::drag::DragController;
use super::geometry::{Point, Viewport};
use super::registry::{OpenOutcome, PanelRecord, PanelRegistry};
use super::scroll::{ScrollCache, ScrollSurface};

/// A position write refused because the panel is being dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionRejected {
    pub panel_id: PanelId,
}

impl fmt::Display for PositionRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel {} is being dragged; position write rejected", self.panel_id)
    }
}

impl std::error::Error for PositionRejected {}

/// The panel API the rest of the dashboard talks to.
///
/// Owns the registry together with the per-panel drag controllers, the drag aggregator and the
/// scroll cache so the single-writer rule on `position` is enforced in one place. Calls that can
/// end a drag batch return the edge; the caller forwards it to the refresh coordinator.
#[derive(Debug)]
pub struct WindowManager {
    registry: PanelRegistry,
    drags: BTreeMap<PanelId, DragController>,
    aggregator: DragAggregator,
    scroll: ScrollCache,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl WindowManager {
    pub fn new(viewport: Viewport) -> Self {
        Self::with_registry(PanelRegistry::with_catalog(viewport))
    }

    pub fn with_registry(registry: PanelRegistry) -> Self {
        Self {
            registry,
            drags: BTreeMap::new(),
            aggregator: DragAggregator::new(),
            scroll: ScrollCache::default(),
        }
    }

    pub fn registry(&self) -> &PanelRegistry {
        &self.registry
    }

    pub fn panel(&self, panel_id: &PanelId) -> Option<&PanelRecord> {
        self.registry.get(panel_id)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.registry.set_viewport(viewport);
    }

    pub fn ensure_unit_panel(&mut self, kind: EquipmentKind, index: usize, title: &str) -> PanelId {
        self.registry.ensure_unit_panel(kind, index, title)
    }

    pub fn report_height(&mut self, panel_id: &PanelId, height: Option<i32>) -> bool {
        self.registry.set_measured_height(panel_id, height)
    }

    pub fn open_panel(&mut self, panel_id: &PanelId) -> OpenOutcome {
        let outcome = self.registry.open(panel_id);
        match outcome {
            OpenOutcome::Placed(at) => {
                tracing::debug!(panel_id = %panel_id, x = at.x, y = at.y, "panel placed");
            }
            OpenOutcome::Unknown => tracing::debug!(panel_id = %panel_id, "open of unknown panel"),
            OpenOutcome::Restored(_) | OpenOutcome::AlreadyOpen => {}
        }
        outcome
    }

    /// Closes a panel. A drag in flight on it is released first, as if the pointer went up.
    pub fn close_panel(&mut self, panel_id: &PanelId) -> Option<DragBatchEnded> {
        let edge = if self.is_dragging(panel_id) {
            tracing::debug!(panel_id = %panel_id, "panel closed mid-drag; releasing");
            self.end_drag(panel_id)
        } else {
            None
        };
        self.registry.close(panel_id);
        edge
    }

    /// Dock-button behaviour: open if closed, close if open.
    pub fn toggle_panel(&mut self, panel_id: &PanelId) -> Option<DragBatchEnded> {
        match self.registry.get(panel_id).map(PanelRecord::is_open) {
            Some(true) => self.close_panel(panel_id),
            Some(false) => {
                self.open_panel(panel_id);
                None
            }
            None => None,
        }
    }

    pub fn toggle_minimize(&mut self, panel_id: &PanelId) -> Option<bool> {
        self.registry.toggle_minimize(panel_id)
    }

    pub fn bring_to_front(&mut self, panel_id: &PanelId) -> Option<u32> {
        self.registry.bring_to_front(panel_id)
    }

    /// Writes a committed position from outside the drag controller.
    ///
    /// Refused while the panel is being dragged. Unknown ids return `Ok(false)`.
    pub fn set_position(
        &mut self,
        panel_id: &PanelId,
        position: Point,
    ) -> Result<bool, PositionRejected> {
        if self.is_dragging(panel_id) {
            tracing::debug!(panel_id = %panel_id, "position write rejected during drag");
            return Err(PositionRejected { panel_id: panel_id.clone() });
        }
        Ok(self.registry.set_position(panel_id, position))
    }

    /// Pointer-down on the drag handle. Raises the panel and starts a drag session.
    ///
    /// Returns `false` for unknown or closed panels and for a panel already being dragged.
    pub fn begin_drag(&mut self, panel_id: &PanelId, pointer: Point) -> bool {
        let Some(record) = self.registry.get(panel_id).filter(|record| record.is_open()) else {
            return false;
        };
        let committed = record.position();
        let controller = self
            .drags
            .entry(panel_id.clone())
            .or_insert_with(|| DragController::new(panel_id.clone()));
        if !controller.begin(committed, pointer) {
            return false;
        }
        self.registry.bring_to_front(panel_id);
        self.note_drag_start(panel_id);
        true
    }

    /// Pointer-move during a drag. Only the live position changes.
    pub fn drag_to(&mut self, panel_id: &PanelId, pointer: Point) -> Option<Point> {
        self.drags.get_mut(panel_id)?.move_to(pointer)
    }

    /// Pointer-up. Commits the live position and releases the panel's share of the batch.
    pub fn end_drag(&mut self, panel_id: &PanelId) -> Option<DragBatchEnded> {
        let committed = self.drags.get_mut(panel_id)?.finish()?;
        self.registry.set_position(panel_id, committed);
        self.note_drag_end(panel_id)
    }

    /// Releases every drag in flight, for focus loss and pointer-cancel.
    pub fn cancel_all_drags(&mut self) -> Option<DragBatchEnded> {
        let dragging: Vec<PanelId> = self
            .drags
            .values()
            .filter(|controller| controller.is_dragging())
            .map(|controller| controller.panel_id().clone())
            .collect();
        if !dragging.is_empty() {
            tracing::debug!(count = dragging.len(), "force-ending drags");
        }
        let mut edge = None;
        for panel_id in dragging {
            edge = self.end_drag(&panel_id).or(edge);
        }
        edge
    }

    // The aggregator is only fed from `begin_drag` and `end_drag`, so its count always equals the
    // number of controllers in `Dragging`.
    fn note_drag_start(&mut self, panel_id: &PanelId) {
        self.aggregator.on_drag_start();
        tracing::debug!(
            panel_id = %panel_id,
            active = self.aggregator.active_drags(),
            "drag start"
        );
    }

    fn note_drag_end(&mut self, panel_id: &PanelId) -> Option<DragBatchEnded> {
        let edge = self.aggregator.on_drag_end();
        tracing::debug!(
            panel_id = %panel_id,
            active = self.aggregator.active_drags(),
            batch_ended = edge.is_some(),
            "drag end"
        );
        edge
    }

    pub fn is_dragging(&self, panel_id: &PanelId) -> bool {
        self.drags.get(panel_id).is_some_and(DragController::is_dragging)
    }

    pub fn is_any_panel_dragging(&self) -> bool {
        self.aggregator.is_dragging()
    }

    pub fn drag_signal(&self) -> DragSignal {
        self.aggregator.subscribe()
    }

    /// Where the host draws the panel right now.
    pub fn rendered_position(&self, panel_id: &PanelId) -> Option<Point> {
        let committed = self.registry.get(panel_id)?.position();
        Some(match self.drags.get(panel_id) {
            Some(controller) => controller.rendered_position(committed),
            None => committed,
        })
    }

    /// Open panels, lowest z first.
    pub fn paint_order(&self) -> Vec<&PanelRecord> {
        self.registry.paint_order()
    }

    pub fn front_panel(&self) -> Option<&PanelRecord> {
        self.registry.front_panel()
    }

    pub fn scroll_offset(&self, panel_id: &PanelId) -> u32 {
        self.scroll.get(panel_id)
    }

    /// Records a user scroll on the panel's content.
    pub fn record_scroll(&mut self, panel_id: &PanelId, offset: u32) {
        self.scroll.set(panel_id, offset);
    }

    /// Pre-paint scroll restore. Skipped for closed and minimized panels, which have no content
    /// area.
    pub fn restore_scroll<S: ScrollSurface + ?Sized>(
        &self,
        panel_id: &PanelId,
        surface: &mut S,
    ) -> bool {
        let mounted = self
            .registry
            .get(panel_id)
            .is_some_and(|record| record.is_open() && !record.is_minimized());
        mounted && self.scroll.restore(panel_id, surface)
    }
}

#[cfg(test)]
mod tests;
