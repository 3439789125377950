// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use crate::model::PanelId;

/// A scrollable content area as the host sees it.
pub trait ScrollSurface {
    fn scroll_offset(&self) -> u32;
    fn set_scroll_offset(&mut self, offset: u32);
}

/// Scroll offsets by panel id, kept across re-renders, minimize and close.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollCache {
    offsets: HashMap<PanelId, u32>,
}

impl ScrollCache {
    pub fn get(&self, panel_id: &PanelId) -> u32 {
        self.offsets.get(panel_id).copied().unwrap_or(0)
    }

    pub fn set(&mut self, panel_id: &PanelId, offset: u32) {
        self.offsets.insert(panel_id.clone(), offset);
    }

    /// Forces `surface` back to the cached offset. Call before every paint.
    ///
    /// Returns `true` if the surface had drifted.
    pub fn restore<S: ScrollSurface + ?Sized>(&self, panel_id: &PanelId, surface: &mut S) -> bool {
        let cached = self.get(panel_id);
        if surface.scroll_offset() == cached {
            return false;
        }
        surface.set_scroll_offset(cached);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{ScrollCache, ScrollSurface};
    use crate::model::PanelId;

    /// Content area that snaps back to the top whenever its data is replaced.
    #[derive(Default)]
    struct ResettingList {
        offset: u32,
        renders: usize,
    }

    impl ResettingList {
        fn rerender(&mut self) {
            self.offset = 0;
            self.renders += 1;
        }
    }

    impl ScrollSurface for ResettingList {
        fn scroll_offset(&self) -> u32 {
            self.offset
        }

        fn set_scroll_offset(&mut self, offset: u32) {
            self.offset = offset;
        }
    }

    #[test]
    fn offset_survives_ten_rerenders() {
        let id = PanelId::new("chillerPanel").expect("panel id");
        let mut cache = ScrollCache::default();
        let mut list = ResettingList::default();

        list.set_scroll_offset(240);
        cache.set(&id, list.scroll_offset());

        for _ in 0..10 {
            list.rerender();
            assert!(cache.restore(&id, &mut list));
            assert_eq!(list.scroll_offset(), 240);
        }
        assert_eq!(list.renders, 10);
    }

    #[test]
    fn restore_is_a_no_op_when_in_sync() {
        let id = PanelId::new("ev").expect("panel id");
        let cache = ScrollCache::default();
        let mut list = ResettingList::default();
        assert!(!cache.restore(&id, &mut list));
        assert_eq!(cache.get(&id), 0);
    }
}
