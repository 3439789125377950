// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! First-open placement.
//!
//! Panels are stacked down a single column anchored at `x = 20`. Candidate rows start at `y = 70`
//! and step by 60 px while they stay above the bottom margin. Every other visible panel is
//! treated as a 300 px tall band unless it carries a measured height.

use crate::model::PanelId;

use super::geometry::{Footprint, Point, Viewport};

pub const ANCHOR_X: i32 = 20;
pub const FIRST_ROW_Y: i32 = 70;
pub const ROW_STEP: i32 = 60;
pub const ASSUMED_HEIGHT: i32 = 300;
pub const BOTTOM_MARGIN: i32 = 200;

/// Candidate rows for a viewport, top to bottom.
pub fn candidate_rows(viewport: Viewport) -> impl Iterator<Item = i32> {
    let limit = viewport.height - BOTTOM_MARGIN;
    (0..)
        .map(|row| FIRST_ROW_Y + row * ROW_STEP)
        .take_while(move |y| *y < limit)
}

fn collides(x: i32, y: i32, width: i32, others: &[&Footprint]) -> bool {
    others.iter().any(|other| {
        other.horizontal_overlap(x, width) && other.vertical_overlap(y, ASSUMED_HEIGHT, ASSUMED_HEIGHT)
    })
}

/// Computes the initial top-left corner for `panel_id`.
///
/// `visible` is a snapshot of the panels currently on screen; an entry for `panel_id` itself is
/// ignored. Returns the first free row; when every row collides the last tested row wins, and a
/// viewport too short for any row yields the anchor.
pub fn compute_position(
    panel_id: &PanelId,
    width: i32,
    viewport: Viewport,
    visible: &[Footprint],
) -> Point {
    let others: Vec<&Footprint> =
        visible.iter().filter(|footprint| &footprint.panel_id != panel_id).collect();
    let anchor = Point::new(ANCHOR_X, FIRST_ROW_Y);
    if others.is_empty() {
        return anchor;
    }

    let mut last_tested = None;
    for y in candidate_rows(viewport) {
        if !collides(ANCHOR_X, y, width, &others) {
            tracing::debug!(panel_id = %panel_id, y, "placement found free row");
            return Point::new(ANCHOR_X, y);
        }
        last_tested = Some(y);
    }

    let y = last_tested.unwrap_or(FIRST_ROW_Y);
    tracing::debug!(panel_id = %panel_id, y, "placement fell back to last candidate row");
    Point::new(ANCHOR_X, y)
}
