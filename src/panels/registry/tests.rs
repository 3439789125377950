// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use crate::model::{EquipmentKind, PanelId};
use crate::panels::geometry::{Point, Viewport};

use super::{
    minimized_width, parse_unit_panel_id, unit_panel_id, OpenOutcome, PanelRecord, PanelRegistry,
};

fn pid(raw: &str) -> PanelId {
    PanelId::new(raw).expect("panel id")
}

#[fixture]
fn registry() -> PanelRegistry {
    PanelRegistry::with_catalog(Viewport::new(1280, 800))
}

#[rstest]
fn catalog_panels_start_closed(registry: PanelRegistry) {
    assert_eq!(registry.iter().count(), 11);
    assert!(registry.iter().all(|panel| !panel.is_open() && !panel.ever_opened()));
    assert_eq!(registry.get(&pid("ev")).map(PanelRecord::width), Some(380));
}

#[rstest]
fn first_open_places_and_marks_ever_opened(mut registry: PanelRegistry) {
    assert_eq!(registry.open(&pid("sidebar")), OpenOutcome::Placed(Point::new(20, 70)));
    assert_eq!(registry.open(&pid("filter")), OpenOutcome::Placed(Point::new(20, 370)));

    let filter = registry.get(&pid("filter")).expect("filter");
    assert!(filter.is_open());
    assert!(filter.ever_opened());
}

#[rstest]
fn reopen_restores_stored_position_without_placement(mut registry: PanelRegistry) {
    registry.open(&pid("sidebar"));
    registry.set_position(&pid("sidebar"), Point::new(640, 400));
    assert!(registry.close(&pid("sidebar")));

    // the anchor row is free again, but the stored position wins
    assert_eq!(registry.open(&pid("sidebar")), OpenOutcome::Restored(Point::new(640, 400)));
}

#[rstest]
fn closed_panels_do_not_block_placement(mut registry: PanelRegistry) {
    registry.open(&pid("sidebar"));
    registry.close(&pid("sidebar"));
    assert_eq!(registry.open(&pid("floors")), OpenOutcome::Placed(Point::new(20, 70)));
}

#[rstest]
fn minimized_panels_still_block_placement(mut registry: PanelRegistry) {
    registry.open(&pid("sidebar"));
    assert_eq!(registry.toggle_minimize(&pid("sidebar")), Some(true));
    assert_eq!(registry.open(&pid("floors")), OpenOutcome::Placed(Point::new(20, 370)));
}

#[rstest]
#[case("missing")]
#[case("ev-99")]
fn unknown_ids_are_no_ops(mut registry: PanelRegistry, #[case] raw: &str) {
    let id = pid(raw);
    let before = registry.clone();
    assert_eq!(registry.open(&id), OpenOutcome::Unknown);
    assert!(!registry.close(&id));
    assert_eq!(registry.toggle(&id), None);
    assert_eq!(registry.toggle_minimize(&id), None);
    assert_eq!(registry.bring_to_front(&id), None);
    assert!(!registry.set_position(&id, Point::new(1, 1)));
    assert_eq!(registry, before);
}

#[rstest]
fn open_and_bring_to_front_raise_above_current_max(mut registry: PanelRegistry) {
    registry.open(&pid("sidebar"));
    registry.open(&pid("filter"));
    registry.open(&pid("ev"));
    let order: Vec<_> = registry.paint_order().iter().map(|p| p.id().to_string()).collect();
    assert_eq!(order, ["sidebar", "filter", "ev"]);

    let z = registry.bring_to_front(&pid("sidebar")).expect("z");
    assert_eq!(z, registry.top_z());
    assert_eq!(registry.front_panel().map(|p| p.id().as_str()), Some("sidebar"));
}

#[rstest]
fn toggle_flips_open_state(mut registry: PanelRegistry) {
    assert_eq!(registry.toggle(&pid("accident")), Some(true));
    assert_eq!(registry.toggle(&pid("accident")), Some(false));
    assert!(!registry.get(&pid("accident")).expect("accident").is_open());
}

#[rstest]
fn minimize_needs_an_open_panel_and_resets_on_close(mut registry: PanelRegistry) {
    let id = pid("ahuPanel");
    assert_eq!(registry.toggle_minimize(&id), None);
    registry.open(&id);
    assert_eq!(registry.toggle_minimize(&id), Some(true));
    registry.close(&id);
    registry.open(&id);
    assert!(!registry.get(&id).expect("ahu").is_minimized());
}

#[rstest]
fn unit_panels_register_once_and_use_placement(mut registry: PanelRegistry) {
    let id = registry.ensure_unit_panel(EquipmentKind::EvCharger, 3, "EV-04");
    assert_eq!(id.as_str(), "ev-3");
    assert_eq!(registry.ensure_unit_panel(EquipmentKind::EvCharger, 3, "renamed"), id);
    assert_eq!(registry.get(&id).map(PanelRecord::title), Some("EV-04"));
    assert_eq!(registry.open(&id), OpenOutcome::Placed(Point::new(20, 70)));
}

#[rstest]
#[case("Sidebar", 120)]
#[case("Accident Controls", 162)]
#[case("Fire Alarm System", 162)]
#[case("Equipment Overview", 168)]
fn minimized_width_follows_title_length(#[case] title: &str, #[case] expected: i32) {
    assert_eq!(minimized_width(title), expected);
}

#[test]
fn display_width_switches_when_minimized() {
    let mut registry = PanelRegistry::with_catalog(Viewport::new(1280, 800));
    let id = pid("ev");
    registry.open(&id);
    assert_eq!(registry.get(&id).map(PanelRecord::display_width), Some(380));
    registry.toggle_minimize(&id);
    assert_eq!(registry.get(&id).map(PanelRecord::display_width), Some(168));
}

#[test]
fn unit_panel_ids_round_trip() {
    let id = unit_panel_id(EquipmentKind::Chiller, 0);
    assert_eq!(id.as_str(), "chiller-0");
    assert_eq!(parse_unit_panel_id(&id), Some((EquipmentKind::Chiller, 0)));
    assert_eq!(parse_unit_panel_id(&pid("chillerPanel")), None);
}
