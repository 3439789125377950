// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tokio::sync::watch;

/// Level signal "some panel is being dragged", readable from the poll task.
pub type DragSignal = watch::Receiver<bool>;

/// Edge raised when the active drag count falls back to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a finished drag batch is where buffered feed data gets flushed"]
pub struct DragBatchEnded {
    /// 1-based number of the batch that just ended.
    pub batch: u64,
}

/// Counts active drags across all panels.
///
/// A drag batch lasts while the count stays at one or more; overlapping grabs on different panels
/// belong to the same batch.
#[derive(Debug)]
pub struct DragAggregator {
    active: usize,
    batches: u64,
    signal: watch::Sender<bool>,
}

impl Default for DragAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl DragAggregator {
    pub fn new() -> Self {
        let (signal, _) = watch::channel(false);
        Self { active: 0, batches: 0, signal }
    }

    pub fn subscribe(&self) -> DragSignal {
        self.signal.subscribe()
    }

    pub fn active_drags(&self) -> usize {
        self.active
    }

    pub fn is_dragging(&self) -> bool {
        self.active > 0
    }

    pub fn on_drag_start(&mut self) {
        self.active += 1;
        if self.active == 1 {
            self.signal.send_replace(true);
        }
    }

    /// Decrements the count, clamped at zero.
    ///
    /// Returns the batch edge only on the `1 -> 0` transition; an unmatched end is ignored.
    pub fn on_drag_end(&mut self) -> Option<DragBatchEnded> {
        if self.active == 0 {
            tracing::debug!("drag end without active drag ignored");
            return None;
        }
        self.active -= 1;
        if self.active > 0 {
            return None;
        }
        self.signal.send_replace(false);
        self.batches += 1;
        Some(DragBatchEnded { batch: self.batches })
    }
}
