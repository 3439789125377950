// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::PanelId;

/// A screen coordinate in logical pixels, relative to the viewport's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset_from(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }

    pub fn minus(self, offset: Point) -> Point {
        Point::new(self.x - offset.x, self.y - offset.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 800)
    }
}

/// The area a visible panel claims for placement purposes.
///
/// `height` is `None` unless the host reported a measured height; placement then falls back to the
/// assumed band height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footprint {
    pub panel_id: PanelId,
    pub position: Point,
    pub width: i32,
    pub height: Option<i32>,
}

impl Footprint {
    pub fn new(panel_id: PanelId, position: Point, width: i32) -> Self {
        Self { panel_id, position, width, height: None }
    }

    pub fn with_height(mut self, height: i32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn horizontal_overlap(&self, x: i32, width: i32) -> bool {
        x < self.position.x + self.width && x + width > self.position.x
    }

    pub fn vertical_overlap(&self, y: i32, height: i32, assumed_height: i32) -> bool {
        let own_height = self.height.unwrap_or(assumed_height);
        y < self.position.y + own_height && y + height > self.position.y
    }
}
