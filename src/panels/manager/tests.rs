// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use crate::model::PanelId;
use crate::panels::geometry::{Point, Viewport};
use crate::panels::registry::OpenOutcome;
use crate::panels::scroll::ScrollSurface;

use super::{PositionRejected, WindowManager};

fn pid(raw: &str) -> PanelId {
    PanelId::new(raw).expect("panel id")
}

#[fixture]
fn wm() -> WindowManager {
    WindowManager::new(Viewport::new(1280, 800))
}

fn drag(wm: &mut WindowManager, id: &PanelId, from: Point, to: Point) {
    assert!(wm.begin_drag(id, from));
    wm.drag_to(id, to);
    assert!(wm.end_drag(id).is_some());
}

#[rstest]
fn dragged_position_survives_close_and_reopen(mut wm: WindowManager) {
    let id = pid("accident");
    assert_eq!(wm.open_panel(&id), OpenOutcome::Placed(Point::new(20, 70)));

    drag(&mut wm, &id, Point::new(30, 75), Point::new(510, 405));
    assert_eq!(wm.rendered_position(&id), Some(Point::new(500, 400)));

    assert_eq!(wm.close_panel(&id), None);
    assert_eq!(wm.open_panel(&id), OpenOutcome::Restored(Point::new(500, 400)));
    assert_eq!(wm.rendered_position(&id), Some(Point::new(500, 400)));
}

#[rstest]
fn external_writes_are_rejected_mid_drag(mut wm: WindowManager) {
    let id = pid("ev");
    wm.open_panel(&id);
    assert_eq!(wm.set_position(&id, Point::new(800, 70)), Ok(true));

    assert!(wm.begin_drag(&id, Point::new(810, 75)));
    wm.drag_to(&id, Point::new(410, 305));
    assert_eq!(
        wm.set_position(&id, Point::new(0, 0)),
        Err(PositionRejected { panel_id: id.clone() })
    );
    assert_eq!(wm.rendered_position(&id), Some(Point::new(400, 300)));
    // committed position is untouched until release
    assert_eq!(wm.panel(&id).map(|p| p.position()), Some(Point::new(800, 70)));

    assert!(wm.end_drag(&id).is_some());
    assert_eq!(wm.panel(&id).map(|p| p.position()), Some(Point::new(400, 300)));
    assert_eq!(wm.set_position(&id, Point::new(10, 10)), Ok(true));
}

#[rstest]
fn closing_mid_drag_releases_the_aggregator(mut wm: WindowManager) {
    let id = pid("floors");
    wm.open_panel(&id);
    assert!(wm.begin_drag(&id, Point::new(25, 75)));
    wm.drag_to(&id, Point::new(125, 175));
    assert!(wm.is_any_panel_dragging());

    let edge = wm.close_panel(&id).expect("batch edge");
    assert_eq!(edge.batch, 1);
    assert!(!wm.is_any_panel_dragging());
    assert!(!wm.is_dragging(&id));
    assert_eq!(wm.panel(&id).map(|p| p.position()), Some(Point::new(120, 170)));
}

#[rstest]
fn overlapping_drags_end_in_a_single_edge(mut wm: WindowManager) {
    let a = pid("sidebar");
    let b = pid("ev");
    wm.open_panel(&a);
    wm.open_panel(&b);

    assert!(wm.begin_drag(&a, Point::new(30, 80)));
    assert!(wm.begin_drag(&b, Point::new(30, 380)));
    assert_eq!(wm.end_drag(&a), None);
    assert!(wm.is_any_panel_dragging());
    assert!(wm.end_drag(&b).is_some());
    assert!(!wm.is_any_panel_dragging());
}

fn any_controller_dragging(wm: &WindowManager, ids: &[PanelId]) -> bool {
    ids.iter().any(|id| wm.is_dragging(id))
}

#[rstest]
fn aggregate_flag_tracks_controller_state(mut wm: WindowManager) {
    let ids = [pid("ev"), pid("sidebar"), pid("accident")];
    for id in &ids {
        wm.open_panel(id);
    }
    let [ev, sidebar, accident] = &ids;
    let in_sync = |wm: &WindowManager| {
        assert_eq!(wm.is_any_panel_dragging(), any_controller_dragging(wm, &ids));
    };

    assert!(wm.begin_drag(ev, Point::new(30, 80)));
    in_sync(&wm);
    // a second grab on the same panel is refused and does not count twice
    assert!(!wm.begin_drag(ev, Point::new(40, 90)));
    assert!(wm.begin_drag(sidebar, Point::new(30, 380)));
    in_sync(&wm);

    // releasing a panel that is not being dragged changes nothing
    assert_eq!(wm.end_drag(accident), None);
    in_sync(&wm);
    assert!(wm.is_any_panel_dragging());
    assert_eq!(
        wm.set_position(ev, Point::new(0, 0)),
        Err(PositionRejected { panel_id: ev.clone() })
    );

    assert_eq!(wm.end_drag(sidebar), None);
    in_sync(&wm);
    assert_eq!(wm.end_drag(sidebar), None);
    in_sync(&wm);
    assert!(wm.is_any_panel_dragging());

    // the real release of the last panel raises the edge
    let edge = wm.end_drag(ev).expect("batch edge");
    assert_eq!(edge.batch, 1);
    in_sync(&wm);
    assert!(!wm.is_any_panel_dragging());
    assert_eq!(wm.set_position(ev, Point::new(0, 0)), Ok(true));
}

#[rstest]
fn cancel_all_drags_commits_live_positions(mut wm: WindowManager) {
    let a = pid("sidebar");
    let b = pid("filter");
    wm.open_panel(&a);
    wm.open_panel(&b);
    let signal = wm.drag_signal();

    wm.begin_drag(&a, Point::new(20, 70));
    wm.drag_to(&a, Point::new(300, 100));
    wm.begin_drag(&b, Point::new(20, 370));
    assert!(*signal.borrow());

    let edge = wm.cancel_all_drags().expect("batch edge");
    assert_eq!(edge.batch, 1);
    assert!(!*signal.borrow());
    assert_eq!(wm.panel(&a).map(|p| p.position()), Some(Point::new(300, 100)));
    assert_eq!(wm.panel(&b).map(|p| p.position()), Some(Point::new(20, 370)));
    assert_eq!(wm.cancel_all_drags(), None);
}

#[rstest]
#[case::closed("chillerPanel", false)]
#[case::unknown("boiler", false)]
#[case::open("accident", true)]
fn drags_only_start_on_open_panels(
    mut wm: WindowManager,
    #[case] raw: &str,
    #[case] expected: bool,
) {
    wm.open_panel(&pid("accident"));
    assert_eq!(wm.begin_drag(&pid(raw), Point::new(30, 80)), expected);
    assert_eq!(wm.is_any_panel_dragging(), expected);
}

#[rstest]
fn grabbing_a_panel_raises_it(mut wm: WindowManager) {
    let a = pid("sidebar");
    let b = pid("ev");
    wm.open_panel(&a);
    wm.open_panel(&b);
    assert_eq!(wm.front_panel().map(|p| p.id().as_str()), Some("ev"));

    wm.begin_drag(&a, Point::new(30, 80));
    let order: Vec<_> = wm.paint_order().iter().map(|p| p.id().as_str().to_owned()).collect();
    assert_eq!(order, ["ev", "sidebar"]);
}

#[rstest]
fn toggle_panel_closes_mid_drag(mut wm: WindowManager) {
    let id = pid("pumpPanel");
    assert_eq!(wm.toggle_panel(&id), None);
    wm.begin_drag(&id, Point::new(30, 80));
    assert!(wm.toggle_panel(&id).is_some());
    assert!(!wm.panel(&id).is_some_and(|p| p.is_open()));
}

struct Content {
    offset: u32,
}

impl ScrollSurface for Content {
    fn scroll_offset(&self) -> u32 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: u32) {
        self.offset = offset;
    }
}

#[rstest]
fn scroll_restore_skips_minimized_panels_but_keeps_offset(mut wm: WindowManager) {
    let id = pid("firePanel");
    wm.open_panel(&id);
    wm.record_scroll(&id, 240);

    let mut content = Content { offset: 0 };
    assert!(wm.restore_scroll(&id, &mut content));
    assert_eq!(content.offset, 240);

    wm.toggle_minimize(&id);
    let mut collapsed = Content { offset: 0 };
    assert!(!wm.restore_scroll(&id, &mut collapsed));

    wm.toggle_minimize(&id);
    wm.close_panel(&id);
    wm.open_panel(&id);
    let mut reopened = Content { offset: 0 };
    assert!(wm.restore_scroll(&id, &mut reopened));
    assert_eq!(reopened.offset, 240);
}
