// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

use super::theme::TuiTheme;
use super::{draw, App, FeedStatus, PanelFrame, PanelHit, OFFLINE_NOTICE, SESSION_EXPIRED};
use crate::feed::{
    feed_channel, FeedError, FeedEvent, FeedSender, FleetSnapshot, MemorySource, PollMessage,
};
use crate::model::{demo_fleet, EquipmentKind, EquipmentRecord, EquipmentStatus, PanelId};
use crate::panels::{unit_panel_id, Point};
use crate::ui::Severity;

const WIDTH: u16 = 120;
const HEIGHT: u16 = 40;

fn app() -> (App<MemorySource>, FeedSender) {
    let (tx, rx) = feed_channel();
    let app = App::new(demo_fleet(), TuiTheme::default(), rx, StdRng::seed_from_u64(7));
    (app, tx)
}

fn render(app: &mut App<MemorySource>) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).expect("terminal");
    terminal.draw(|frame| draw(frame, app)).expect("draw");
    terminal.backend().buffer().clone()
}

fn cells(buffer: &Buffer, y: u16, from: u16, to: u16) -> String {
    (from..to).map(|x| buffer[(x, y)].symbol()).collect()
}

fn row_text(buffer: &Buffer, y: u16) -> String {
    cells(buffer, y, 0, buffer.area.width)
}

fn screen_text(buffer: &Buffer) -> String {
    (0..buffer.area.height).map(|y| row_text(buffer, y)).collect::<Vec<_>>().join("\n")
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE })
}

fn id(value: &str) -> PanelId {
    PanelId::new(value).expect("panel id")
}

/// Opens the EV panel at the anchor and lays it out: title row 3, columns 2..40.
fn app_with_ev_open() -> (App<MemorySource>, FeedSender) {
    let (mut app, tx) = app();
    assert!(!app.handle_key_code(KeyCode::Char('1')));
    render(&mut app);
    (app, tx)
}

#[test]
fn open_panel_is_painted_at_its_placed_cell() {
    let (mut app, _tx) = app_with_ev_open();
    let ev = app.manager.panel(&id("ev")).expect("ev");
    assert_eq!(ev.position(), Point::new(20, 70));

    let buffer = render(&mut app);
    let title_row = row_text(&buffer, 3);
    assert!(title_row.contains("EV Charging Status"), "{title_row}");
    assert_eq!(cells(&buffer, 3, 33, 39), "[_][x]");
    assert!(row_text(&buffer, 4).contains("Total 30"));

    let painted = app.manager.panel(&id("ev")).and_then(|ev| ev.measured_height());
    assert_eq!(painted, Some(18 * 20));
}

#[test]
fn title_bar_drag_moves_live_then_commits_on_release() {
    let (mut app, _tx) = app_with_ev_open();
    let ev = id("ev");

    app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 5, 3));
    assert!(app.manager.is_dragging(&ev));
    app.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 25, 8));
    assert_eq!(app.manager.rendered_position(&ev), Some(Point::new(220, 170)));
    assert_eq!(app.manager.panel(&ev).map(|p| p.position()), Some(Point::new(20, 70)));

    let buffer = render(&mut app);
    assert!(row_text(&buffer, 8).contains("EV Charging Status"));

    app.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 25, 8));
    assert!(!app.manager.is_any_panel_dragging());
    assert_eq!(app.manager.panel(&ev).map(|p| p.position()), Some(Point::new(220, 170)));
}

#[test]
fn poll_during_drag_is_applied_on_release() {
    let (mut app, tx) = app_with_ev_open();
    let chillers = vec![
        EquipmentRecord::new(1, "Chiller-01", EquipmentStatus::Fault).with_alert("System failure"),
    ];
    let mut snapshot = FleetSnapshot::default();
    snapshot.insert(EquipmentKind::Chiller, chillers);

    app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 5, 3));
    tx.send(FeedEvent::PollStarted { epoch: 0 }).expect("send");
    tx.send(FeedEvent::Polled(PollMessage { epoch: 0, result: Ok(snapshot) })).expect("send");
    app.tick(Instant::now());

    assert_eq!(app.fleet.records(EquipmentKind::Chiller).len(), 3);
    assert!(app.coordinator.has_pending());
    assert!(app.coordinator.is_fetching());

    app.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 6, 3));
    assert!(!app.coordinator.has_pending());
    assert_eq!(app.fleet.records(EquipmentKind::Chiller).len(), 1);
    assert_eq!(app.fleet.records(EquipmentKind::Chiller)[0].status, EquipmentStatus::Fault);
}

#[test]
fn title_buttons_minimize_and_close() {
    let (mut app, _tx) = app_with_ev_open();
    let ev = id("ev");

    app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 34, 3));
    app.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 34, 3));
    assert!(!app.manager.is_any_panel_dragging());
    assert!(app.manager.panel(&ev).is_some_and(|p| p.is_minimized()));

    // minimized bar is 168 px wide, so its buttons start at column 2 + 16 - 7
    let buffer = render(&mut app);
    assert_eq!(cells(&buffer, 3, 11, 17), "[+][x]");

    app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 15, 3));
    assert!(app.manager.panel(&ev).is_some_and(|p| !p.is_open() && !p.is_minimized()));
}

#[test]
fn focus_loss_force_ends_the_drag_at_its_live_position() {
    let (mut app, _tx) = app_with_ev_open();
    let ev = id("ev");

    app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 5, 3));
    app.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 15, 5));
    app.handle_event(Event::FocusLost);

    assert!(!app.manager.is_any_panel_dragging());
    assert!(app.grabbed.is_none());
    assert_eq!(app.manager.panel(&ev).map(|p| p.position()), Some(Point::new(120, 110)));

    // a late release is ignored
    app.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 40, 20));
    assert_eq!(app.manager.panel(&ev).map(|p| p.position()), Some(Point::new(120, 110)));
}

#[test]
fn wheel_scroll_is_kept_across_repaints() {
    let (mut app, _tx) = app_with_ev_open();
    let ev = id("ev");

    for _ in 0..3 {
        app.handle_event(mouse(MouseEventKind::ScrollDown, 10, 8));
    }
    assert_eq!(app.manager.scroll_offset(&ev), 3);

    for _ in 0..5 {
        let buffer = render(&mut app);
        // body rows start at 4: summary, blank, EV-01 are scrolled away
        assert!(row_text(&buffer, 4).contains("EV-02"), "{}", row_text(&buffer, 4));
    }

    app.handle_event(mouse(MouseEventKind::ScrollUp, 10, 8));
    assert_eq!(app.manager.scroll_offset(&ev), 2);
}

#[test]
fn scrolling_is_clamped_to_the_content() {
    let (mut app, _tx) = app_with_ev_open();
    let ev = id("ev");
    for _ in 0..100 {
        app.handle_event(mouse(MouseEventKind::ScrollDown, 10, 8));
    }
    // 32 lines in 16 visible rows
    assert_eq!(app.manager.scroll_offset(&ev), 16);
    app.handle_key_code(KeyCode::PageUp);
    assert_eq!(app.manager.scroll_offset(&ev), 0);
}

#[test]
fn panel_keys_toggle_and_tab_cycles_the_front_panel() {
    let (mut app, _tx) = app();
    app.handle_key_code(KeyCode::Char('a'));
    app.handle_key_code(KeyCode::Char('o'));
    assert_eq!(app.front_panel_id(), Some(id("equipmentOverview")));

    app.handle_key_code(KeyCode::Tab);
    assert_eq!(app.front_panel_id(), Some(id("accident")));

    app.handle_key_code(KeyCode::Char('m'));
    assert!(app.manager.panel(&id("accident")).is_some_and(|p| p.is_minimized()));

    app.handle_key_code(KeyCode::Char('x'));
    assert!(app.manager.panel(&id("accident")).is_some_and(|p| !p.is_open()));

    app.handle_key_code(KeyCode::Char('o'));
    assert!(app.manager.panel(&id("equipmentOverview")).is_some_and(|p| !p.is_open()));
}

#[test]
fn arrow_keys_move_the_front_panel_by_one_cell() {
    let (mut app, _tx) = app_with_ev_open();
    app.handle_key_code(KeyCode::Right);
    app.handle_key_code(KeyCode::Down);
    assert_eq!(app.manager.panel(&id("ev")).map(|p| p.position()), Some(Point::new(30, 90)));
}

#[test]
fn accident_triggers_apply_locally_when_offline() {
    let (mut app, _tx) = app();

    app.handle_key_code(KeyCode::Char('X'));
    assert!(app.fleet.faulty_equipment().is_empty());
    let notice = app.notices.latest().expect("notice");
    assert_eq!((notice.severity, notice.message.as_str()), (Severity::Success, "All accidents fixed"));

    app.handle_key_code(KeyCode::Char('F'));
    assert_eq!(app.fleet.ev_summary().fault, 1);
    let notice = app.notices.latest().expect("notice");
    assert_eq!(notice.severity, Severity::Warning);
    assert!(notice.message.ends_with(": Fuse Dropped (V1 = 0V)"));

    app.handle_key_code(KeyCode::Char('R'));
    assert_eq!(app.notices.latest().map(|n| n.severity), Some(Severity::Danger));
    assert_eq!(app.fleet.faulty_equipment().len(), 2);
}

#[test]
fn unauthorized_poll_ends_the_session_once() {
    let (mut app, tx) = app();
    tx.send(FeedEvent::Polled(PollMessage { epoch: 0, result: Err(FeedError::Unauthorized) }))
        .expect("send");
    app.tick(Instant::now());

    assert_eq!(app.status, FeedStatus::Expired);
    assert_eq!(app.coordinator.epoch(), 1);
    let notice = app.notices.latest().expect("notice");
    assert_eq!((notice.severity, notice.message.as_str()), (Severity::Warning, SESSION_EXPIRED));

    let before = app.notices.iter().count();
    tx.send(FeedEvent::Polled(PollMessage { epoch: 0, result: Err(FeedError::Unauthorized) }))
        .expect("send");
    app.tick(Instant::now());
    assert_eq!(app.notices.iter().count(), before);
}

#[test]
fn bang_opens_the_first_faulty_unit() {
    let (mut app, _tx) = app();
    app.handle_key_code(KeyCode::Char('!'));

    let panel_id = unit_panel_id(EquipmentKind::Chiller, 2);
    let panel = app.manager.panel(&panel_id).expect("unit panel");
    assert!(panel.is_open());
    assert_eq!(panel.title(), "Chiller-03");
    assert_eq!(app.front_panel_id(), Some(panel_id));

    let buffer = render(&mut app);
    assert!(screen_text(&buffer).contains("Alert:  Overheat"));
}

#[test]
fn layer_filter_hides_markers_on_the_map() {
    let (mut app, _tx) = app();
    let buffer = render(&mut app);
    assert!(screen_text(&buffer).contains("EV Charging Station"));

    app.handle_key_code(KeyCode::F(1));
    assert!(!app.layers.is_visible(EquipmentKind::EvCharger));
    let buffer = render(&mut app);
    assert!(!screen_text(&buffer).contains("EV Charging Station"));
}

#[test]
fn footer_reports_feed_state_and_help_overlay_toggles() {
    let (mut app, _tx) = app();
    app.notify(Severity::Warning, OFFLINE_NOTICE);
    let buffer = render(&mut app);
    let footer = row_text(&buffer, HEIGHT - 1);
    assert!(footer.starts_with("Feed:offline"), "{footer}");
    assert!(footer.contains("Faults:3"));

    assert!(!app.handle_key_code(KeyCode::Char('?')));
    assert!(screen_text(&render(&mut app)).contains("--- Panels ---"));
    app.handle_key_code(KeyCode::Esc);
    assert!(!app.show_help);
    assert!(app.handle_key_code(KeyCode::Char('q')));
}

#[test]
fn hit_zones_follow_the_title_bar_layout() {
    let frame = PanelFrame {
        id: id("ev"),
        title: "EV Charging Status".to_owned(),
        x: 2,
        y: 3,
        width: 38,
        height: 18,
        minimized: false,
        lines: Vec::new(),
        max_scroll: 0,
    };
    assert_eq!(frame.hit(2, 3), Some(PanelHit::TitleBar));
    assert_eq!(frame.hit(33, 3), Some(PanelHit::Minimize));
    assert_eq!(frame.hit(36, 3), Some(PanelHit::Close));
    assert_eq!(frame.hit(39, 3), Some(PanelHit::TitleBar));
    assert_eq!(frame.hit(10, 20), Some(PanelHit::Body));
    assert_eq!(frame.hit(40, 3), None);
    assert_eq!(frame.hit(10, 21), None);
}

#[tokio::test(start_paused = true)]
async fn connected_feed_polls_and_confirms_writes() {
    let (mut app, _) = app();
    let (tx, rx) = feed_channel();
    app.events = rx;
    let source = Arc::new(MemorySource::from_fleet(&demo_fleet()));
    app.connect(
        Arc::clone(&source),
        tokio::runtime::Handle::current(),
        tx,
        Duration::from_secs(5),
        FeedStatus::Demo,
    );

    tokio::time::sleep(Duration::from_millis(10)).await;
    app.tick(Instant::now());
    assert_eq!(source.fetch_count(), 1);
    assert!(!app.coordinator.is_fetching());

    app.handle_key_code(KeyCode::Char('X'));
    tokio::time::sleep(Duration::from_millis(10)).await;
    app.tick(Instant::now());
    assert_eq!(app.notices.latest().map(|n| n.message.as_str()), Some("All accidents fixed"));
    assert!(!source.writes().is_empty());

    app.disconnect();
    assert!(app.feed.is_none());
}
