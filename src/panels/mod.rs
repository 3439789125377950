// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Floating panel window manager: placement, z order, drag lifecycle and scroll preservation.

pub mod aggregator;
pub mod drag;
pub mod geometry;
pub mod manager;
pub mod placement;
pub mod registry;
pub mod scroll;

pub use aggregator::{DragAggregator, DragBatchEnded, DragSignal};
pub use drag::{DragController, DragPhase, DragSession};
pub use geometry::{Footprint, Point, Viewport};
pub use manager::{PositionRejected, WindowManager};
pub use placement::compute_position;
pub use registry::{
    category_panel_id, minimized_width, parse_unit_panel_id, unit_panel_id, OpenOutcome,
    PanelRecord, PanelRegistry, PanelSpec, PANEL_CATALOG,
};
pub use scroll::{ScrollCache, ScrollSurface};
