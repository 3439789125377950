// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Hosts the building map and the floating panels (ratatui + crossterm). Panel geometry stays in
//! logical pixels; one cell is [`PX_PER_COL`] by [`PX_PER_ROW`] pixels.

use std::{
    error::Error,
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
        KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tokio::runtime::Handle;

use crate::config::{DashboardConfig, FeedMode};
use crate::feed::{
    dispatch, feed_channel, plan_fix_all, plan_fuse_drop, plan_random_accident, AccidentAction,
    ActionPlan, EquipmentSource, FeedEvent, FeedReceiver, FeedSender, PollHandle, PollLoop,
    PollOutcome, RefreshCoordinator,
};
use crate::model::{EquipmentFleet, EquipmentKind, PanelId};
use crate::panels::{DragBatchEnded, Point, ScrollSurface, Viewport, WindowManager};
use crate::ui::{LayerFilter, NoticeBoard, Severity};

mod content;
mod theme;

use content::PanelContext;
use theme::TuiTheme;

pub const PX_PER_COL: i32 = 10;
pub const PX_PER_ROW: i32 = 20;

const INPUT_WAIT: Duration = Duration::from_millis(50);
const MIN_PANEL_COLS: i32 = 12;
const MAX_PANEL_ROWS: i32 = 18;
const TITLE_BUTTONS_INSET: i32 = 7;
const FLOOR_COUNT: u8 = 5;
const SESSION_EXPIRED: &str = "Session expired. Please log in again.";
const OFFLINE_NOTICE: &str = "No credential configured: showing demo data without polling.";

/// Panel toggle keys, in sidebar order.
const PANEL_KEYS: [(char, &str); 11] = [
    ('a', "accident"),
    ('s', "sidebar"),
    ('v', "filter"),
    ('l', "floors"),
    ('o', "equipmentOverview"),
    ('1', "ev"),
    ('2', "chillerPanel"),
    ('3', "ahuPanel"),
    ('4', "electricalPanel"),
    ('5', "pumpPanel"),
    ('6', "firePanel"),
];

/// Where the equipment data on screen comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeedStatus {
    Live,
    Demo,
    Offline,
    Expired,
}

impl FeedStatus {
    fn from_mode(mode: FeedMode) -> Self {
        match mode {
            FeedMode::Remote => Self::Live,
            FeedMode::Demo => Self::Demo,
            FeedMode::Offline => Self::Offline,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Demo => "demo",
            Self::Offline => "offline",
            Self::Expired => "expired",
        }
    }
}

/// Runs the dashboard until the user quits.
///
/// With a `source`, polling and accident writes run on `runtime`; the caller keeps that runtime
/// driven while this blocks. Without one the dashboard shows `fleet` as-is.
pub fn run<S: EquipmentSource>(
    config: &DashboardConfig,
    fleet: EquipmentFleet,
    source: Option<Arc<S>>,
    runtime: Handle,
) -> Result<(), Box<dyn Error>> {
    let theme = TuiTheme::from_env()?;
    let (events_tx, events_rx) = feed_channel();
    let mut app = App::new(fleet, theme, events_rx, StdRng::from_rng(&mut rand::rng()));
    match source {
        Some(source) => {
            let status = FeedStatus::from_mode(config.feed_mode());
            app.connect(source, runtime, events_tx, config.poll_interval, status);
        }
        None => app.notify(Severity::Warning, OFFLINE_NOTICE),
    }

    let mut terminal = TerminalSession::new()?;
    while !app.should_quit {
        app.tick(Instant::now());
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(INPUT_WAIT)? {
            app.handle_event(event::read()?);
        }
    }
    app.disconnect();

    Ok(())
}

fn viewport_for(area: Rect) -> Viewport {
    Viewport::new(i32::from(area.width) * PX_PER_COL, i32::from(area.height) * PX_PER_ROW)
}

/// Connection to a running feed.
struct FeedLink<S> {
    source: Arc<S>,
    runtime: Handle,
    events: FeedSender,
    poll: PollHandle,
}

impl<S: EquipmentSource> FeedLink<S> {
    fn dispatch(&self, plan: ActionPlan) {
        let source = Arc::clone(&self.source);
        let events = self.events.clone();
        self.runtime.spawn(async move {
            let report = dispatch(source, &plan).await;
            let _ = events.send(FeedEvent::ActionFinished(report));
        });
    }
}

/// Where a pointer landed on a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanelHit {
    Minimize,
    Close,
    TitleBar,
    Body,
}

/// One laid-out panel for the current frame, in cells. May extend past the map area.
#[derive(Debug, Clone)]
struct PanelFrame {
    id: PanelId,
    title: String,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    minimized: bool,
    lines: Vec<Line<'static>>,
    max_scroll: u32,
}

impl PanelFrame {
    fn hit(&self, col: i32, row: i32) -> Option<PanelHit> {
        if col < self.x || col >= self.x + self.width || row < self.y || row >= self.y + self.height
        {
            return None;
        }
        if row > self.y {
            return Some(PanelHit::Body);
        }
        match col - (self.x + self.width - TITLE_BUTTONS_INSET) {
            0..=2 => Some(PanelHit::Minimize),
            3..=5 => Some(PanelHit::Close),
            _ => Some(PanelHit::TitleBar),
        }
    }

    fn clip(&self, area: Rect) -> Option<Rect> {
        let left = self.x.max(i32::from(area.x));
        let top = self.y.max(i32::from(area.y));
        let right = (self.x + self.width).min(i32::from(area.right()));
        let bottom = (self.y + self.height).min(i32::from(area.bottom()));
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect::new(
            u16::try_from(left).ok()?,
            u16::try_from(top).ok()?,
            u16::try_from(right - left).ok()?,
            u16::try_from(bottom - top).ok()?,
        ))
    }

    fn visible_rows(&self) -> u32 {
        u32::try_from(self.height - 2).unwrap_or(0)
    }
}

/// Scroll position of a panel body as painted this frame. Starts at the top, like any freshly
/// built widget.
#[derive(Debug, Default)]
struct BodyScroll {
    offset: u32,
    max: u32,
}

impl ScrollSurface for BodyScroll {
    fn scroll_offset(&self) -> u32 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: u32) {
        self.offset = offset.min(self.max);
    }
}

struct App<S> {
    manager: WindowManager,
    fleet: EquipmentFleet,
    coordinator: RefreshCoordinator,
    notices: NoticeBoard,
    layers: LayerFilter,
    theme: TuiTheme,
    events: FeedReceiver,
    feed: Option<FeedLink<S>>,
    status: FeedStatus,
    rng: StdRng,
    map_area: Rect,
    frames: Vec<PanelFrame>,
    grabbed: Option<PanelId>,
    floor: u8,
    show_help: bool,
    help_scroll: u16,
    should_quit: bool,
}

impl<S: EquipmentSource> App<S> {
    fn new(fleet: EquipmentFleet, theme: TuiTheme, events: FeedReceiver, rng: StdRng) -> Self {
        Self {
            manager: WindowManager::default(),
            fleet,
            coordinator: RefreshCoordinator::new(),
            notices: NoticeBoard::default(),
            layers: LayerFilter::default(),
            theme,
            events,
            feed: None,
            status: FeedStatus::Offline,
            rng,
            map_area: Rect::default(),
            frames: Vec::new(),
            grabbed: None,
            floor: 1,
            show_help: false,
            help_scroll: 0,
            should_quit: false,
        }
    }

    fn connect(
        &mut self,
        source: Arc<S>,
        runtime: Handle,
        events: FeedSender,
        interval: Duration,
        status: FeedStatus,
    ) {
        let poll = {
            let _entered = runtime.enter();
            PollLoop::new(
                Arc::clone(&source),
                interval,
                self.manager.drag_signal(),
                events.clone(),
                self.coordinator.epoch(),
            )
            .spawn()
        };
        tracing::info!(status = status.label(), ?interval, "feed connected");
        self.feed = Some(FeedLink { source, runtime, events, poll });
        self.status = status;
    }

    fn disconnect(&mut self) {
        if let Some(link) = self.feed.take() {
            link.poll.stop();
        }
    }

    /// Credential rejected: stop polling, invalidate in-flight results and drop the source that
    /// holds the credential.
    fn end_session(&mut self) {
        if self.status == FeedStatus::Expired {
            return;
        }
        self.disconnect();
        let epoch = self.coordinator.end_session();
        self.status = FeedStatus::Expired;
        tracing::warn!(epoch, "session ended after credential rejection");
        self.notify(Severity::Warning, SESSION_EXPIRED);
    }

    fn notify(&mut self, severity: Severity, message: impl Into<String>) {
        self.notices.push(severity, message, Instant::now());
    }

    fn tick(&mut self, now: Instant) {
        self.drain_feed();
        self.notices.expire(now);
    }

    fn drain_feed(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.handle_feed_event(event);
        }
    }

    fn handle_feed_event(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::PollStarted { epoch } => self.coordinator.on_poll_started(epoch),
            FeedEvent::Polled(message) => {
                let dragging = self.manager.is_any_panel_dragging();
                let outcome = self.coordinator.on_poll_result(message, dragging, &mut self.fleet);
                if outcome == PollOutcome::AuthExpired {
                    self.end_session();
                }
            }
            FeedEvent::ActionFinished(report) => {
                if report.is_unauthorized() {
                    self.end_session();
                    return;
                }
                let (severity, message) = report.notice();
                let message = message.to_owned();
                self.notify(severity, message);
            }
        }
    }

    /// Hands a finished drag batch to the coordinator.
    fn settle(&mut self, edge: Option<DragBatchEnded>) {
        if let Some(edge) = edge {
            self.coordinator.on_drag_batch_ended(edge, &mut self.fleet);
        }
    }

    fn release_all(&mut self) {
        self.grabbed = None;
        let edge = self.manager.cancel_all_drags();
        self.settle(edge);
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if self.handle_key_code(key.code) {
                    self.should_quit = true;
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::FocusLost => self.release_all(),
            _ => {}
        }
    }

    fn pointer_px(&self, col: u16, row: u16) -> Point {
        Point::new(
            (i32::from(col) - i32::from(self.map_area.x)) * PX_PER_COL,
            (i32::from(row) - i32::from(self.map_area.y)) * PX_PER_ROW,
        )
    }

    /// Topmost panel under the cell.
    fn panel_at(&self, col: u16, row: u16) -> Option<(PanelId, PanelHit)> {
        let (col, row) = (i32::from(col), i32::from(row));
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.hit(col, row).map(|hit| (frame.id.clone(), hit)))
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let pointer = self.pointer_px(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.grabbed.is_some() {
                    // the matching release never arrived
                    self.release_all();
                }
                match self.panel_at(mouse.column, mouse.row) {
                    Some((id, PanelHit::Close)) => {
                        let edge = self.manager.close_panel(&id);
                        self.settle(edge);
                    }
                    Some((id, PanelHit::Minimize)) => {
                        self.manager.bring_to_front(&id);
                        self.manager.toggle_minimize(&id);
                    }
                    Some((id, PanelHit::TitleBar)) => {
                        if self.manager.begin_drag(&id, pointer) {
                            self.grabbed = Some(id);
                        }
                    }
                    Some((id, PanelHit::Body)) => {
                        self.manager.bring_to_front(&id);
                    }
                    None => {}
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(id) = &self.grabbed {
                    self.manager.drag_to(id, pointer);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(id) = self.grabbed.take() {
                    self.manager.drag_to(&id, pointer);
                    let edge = self.manager.end_drag(&id);
                    self.settle(edge);
                }
            }
            MouseEventKind::ScrollDown => self.scroll_at(mouse.column, mouse.row, 1),
            MouseEventKind::ScrollUp => self.scroll_at(mouse.column, mouse.row, -1),
            _ => {}
        }
    }

    fn scroll_at(&mut self, col: u16, row: u16, delta: i64) {
        if let Some((id, PanelHit::Body)) = self.panel_at(col, row) {
            self.scroll_panel(&id, delta);
        }
    }

    fn scroll_panel(&mut self, id: &PanelId, delta: i64) {
        let Some(max) = self.frames.iter().find(|frame| &frame.id == id).map(|f| f.max_scroll)
        else {
            return;
        };
        let current = i64::from(self.manager.scroll_offset(id));
        let next = (current + delta).clamp(0, i64::from(max));
        self.manager.record_scroll(id, u32::try_from(next).unwrap_or(0));
    }

    fn front_panel_id(&self) -> Option<PanelId> {
        self.manager.front_panel().map(|panel| panel.id().clone())
    }

    fn toggle_panel(&mut self, panel_id: &str) {
        let Ok(id) = PanelId::new(panel_id) else {
            return;
        };
        let edge = self.manager.toggle_panel(&id);
        self.settle(edge);
    }

    fn close_front(&mut self) {
        if let Some(id) = self.front_panel_id() {
            let edge = self.manager.close_panel(&id);
            self.settle(edge);
        }
    }

    fn minimize_front(&mut self) {
        if let Some(id) = self.front_panel_id() {
            self.manager.toggle_minimize(&id);
        }
    }

    /// Raises the lowest open panel, cycling through all of them.
    fn cycle_front(&mut self) {
        let lowest = self.manager.paint_order().first().map(|panel| panel.id().clone());
        if let Some(id) = lowest {
            self.manager.bring_to_front(&id);
        }
    }

    fn nudge_front(&mut self, cols: i32, rows: i32) {
        let Some(id) = self.front_panel_id() else {
            return;
        };
        let Some(position) = self.manager.panel(&id).map(|panel| panel.position()) else {
            return;
        };
        let next = Point::new(position.x + cols * PX_PER_COL, position.y + rows * PX_PER_ROW);
        if self.manager.set_position(&id, next).is_err() {
            self.notify(Severity::Info, "Panel is being dragged");
        }
    }

    fn scroll_front(&mut self, pages: i64) {
        let Some(id) = self.front_panel_id() else {
            return;
        };
        let rows = self
            .frames
            .iter()
            .find(|frame| frame.id == id)
            .map(|frame| i64::from(frame.visible_rows().max(1)))
            .unwrap_or(1);
        self.scroll_panel(&id, pages * rows);
    }

    fn open_first_faulty(&mut self) {
        let Some(unit) = self.fleet.faulty_equipment().into_iter().next() else {
            self.notify(Severity::Info, "All systems normal");
            return;
        };
        let title = if unit.name.is_empty() {
            format!("{} {}", unit.kind.label(), unit.index + 1)
        } else {
            unit.name.clone()
        };
        let id = self.manager.ensure_unit_panel(unit.kind, unit.index, &title);
        self.manager.open_panel(&id);
        self.manager.bring_to_front(&id);
    }

    fn toggle_layer(&mut self, index: u8) {
        let Some(kind) = EquipmentKind::ALL.get(usize::from(index).wrapping_sub(1)).copied() else {
            return;
        };
        self.layers.toggle(kind);
    }

    fn trigger(&mut self, action: AccidentAction) {
        let plan = match action {
            AccidentAction::RandomAccident => plan_random_accident(&self.fleet, &mut self.rng),
            AccidentAction::FuseDrop => plan_fuse_drop(&self.fleet, &mut self.rng),
            AccidentAction::FixAll => Some(plan_fix_all(&self.fleet)),
        };
        let Some(plan) = plan else {
            tracing::debug!(?action, "no eligible equipment for accident trigger");
            return;
        };

        plan.apply_locally(&mut self.fleet);
        if let Some(link) = &self.feed {
            link.dispatch(plan);
        } else {
            self.notify(plan.severity, plan.message);
        }
    }

    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if self.show_help {
            match code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => return true,
                KeyCode::Down | KeyCode::Char('j') => {
                    self.help_scroll = self.help_scroll.saturating_add(1);
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.help_scroll = self.help_scroll.saturating_sub(1);
                }
                KeyCode::Home => self.help_scroll = 0,
                _ => {}
            }
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => {
                self.show_help = true;
                self.help_scroll = 0;
            }
            KeyCode::Char(ch) => self.handle_char(ch),
            KeyCode::F(n) => self.toggle_layer(n),
            KeyCode::Tab => self.cycle_front(),
            KeyCode::Esc => self.release_all(),
            KeyCode::Left => self.nudge_front(-1, 0),
            KeyCode::Right => self.nudge_front(1, 0),
            KeyCode::Up => self.nudge_front(0, -1),
            KeyCode::Down => self.nudge_front(0, 1),
            KeyCode::PageDown => self.scroll_front(1),
            KeyCode::PageUp => self.scroll_front(-1),
            _ => {}
        }
        false
    }

    fn handle_char(&mut self, ch: char) {
        if let Some((_, panel_id)) = PANEL_KEYS.iter().find(|(key, _)| *key == ch) {
            self.toggle_panel(panel_id);
            return;
        }
        match ch {
            'x' => self.close_front(),
            'm' => self.minimize_front(),
            'R' => self.trigger(AccidentAction::RandomAccident),
            'F' => self.trigger(AccidentAction::FuseDrop),
            'X' => self.trigger(AccidentAction::FixAll),
            '!' => self.open_first_faulty(),
            '[' => self.floor = self.floor.saturating_sub(1).max(1),
            ']' => self.floor = (self.floor + 1).min(FLOOR_COUNT),
            _ => {}
        }
    }

    /// Lays out open panels for `area` and reports their painted heights back to placement.
    fn layout_panels(&mut self, area: Rect) {
        self.map_area = area;
        let viewport = viewport_for(area);
        if viewport != self.manager.registry().viewport() {
            self.manager.set_viewport(viewport);
        }
        let max_rows = i32::from(area.height).clamp(3, MAX_PANEL_ROWS);

        let frames: Vec<PanelFrame> = {
            let ctx = PanelContext {
                fleet: &self.fleet,
                registry: self.manager.registry(),
                layers: &self.layers,
                theme: &self.theme,
                floor: self.floor,
                feed: self.status,
            };
            self.manager
                .paint_order()
                .into_iter()
                .filter_map(|panel| {
                    let position = self.manager.rendered_position(panel.id())?;
                    let minimized = panel.is_minimized();
                    let lines =
                        if minimized { Vec::new() } else { content::panel_lines(panel, &ctx) };
                    let line_count = i32::try_from(lines.len()).unwrap_or(i32::MAX);
                    let height =
                        if minimized { 1 } else { line_count.saturating_add(2).clamp(3, max_rows) };
                    let max_scroll = u32::try_from(line_count - (height - 2)).unwrap_or(0);
                    Some(PanelFrame {
                        id: panel.id().clone(),
                        title: panel.title().to_owned(),
                        x: i32::from(area.x) + position.x.div_euclid(PX_PER_COL),
                        y: i32::from(area.y) + position.y.div_euclid(PX_PER_ROW),
                        width: (panel.display_width() / PX_PER_COL).max(MIN_PANEL_COLS),
                        height,
                        minimized,
                        lines,
                        max_scroll,
                    })
                })
                .collect()
        };

        for frame in &frames {
            self.manager.report_height(&frame.id, Some(frame.height * PX_PER_ROW));
        }
        self.frames = frames;
    }
}

fn draw<S: EquipmentSource>(frame: &mut Frame<'_>, app: &mut App<S>) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = layout[0];
    let status_area = layout[1];

    app.layout_panels(main_area);
    render_map(frame, app, main_area);
    render_panels(frame, app, main_area);

    let status = Paragraph::new(footer_line(app, Instant::now())).style(app.theme.base_style());
    frame.render_widget(status, status_area);

    if app.show_help {
        render_help(frame, app, main_area);
    }
}

fn render_map<S>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let left = area.width * 2 / 5;
    let map_area = Rect::new(area.x + left, area.y, area.width - left, area.height);

    let mut lines = vec![Line::styled("Building", app.theme.header_style()), Line::default()];
    for floor in (1..=FLOOR_COUNT).rev() {
        let label = format!("  ┃ Floor {floor} ┃");
        if floor == app.floor {
            lines.push(Line::styled(label, app.theme.selection_style()));
        } else {
            lines.push(Line::styled(label, app.theme.dim_style()));
        }
    }
    lines.push(Line::default());

    for kind in EquipmentKind::ALL {
        if !app.layers.is_visible(kind) {
            continue;
        }
        let mut spans = vec![Span::raw(format!("{:<20}", kind.label()))];
        for indicator in app.fleet.indicators(kind) {
            spans.push(Span::styled("●", app.theme.indicator_style(indicator)));
        }
        lines.push(Line::from(spans));
    }

    let map = Paragraph::new(Text::from(lines))
        .style(app.theme.base_style())
        .wrap(Wrap { trim: false });
    frame.render_widget(map, map_area);
}

fn render_panels<S>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let front = app.manager.front_panel().map(|panel| panel.id().clone());
    for panel in &app.frames {
        let Some(rect) = panel.clip(area) else {
            continue;
        };
        let is_front = front.as_ref() == Some(&panel.id);
        frame.render_widget(Clear, rect);

        if panel.minimized {
            let bar = Paragraph::new(Line::from(format!(" {} ", panel.title)))
                .style(app.theme.minimized_style(is_front));
            frame.render_widget(bar, rect);
        } else {
            let mut body = BodyScroll { offset: 0, max: panel.max_scroll };
            app.manager.restore_scroll(&panel.id, &mut body);
            let dragging = app.manager.is_dragging(&panel.id);
            let block = Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", panel.title))
                .border_style(app.theme.panel_border_style(is_front, dragging))
                .style(app.theme.base_style());
            let paragraph = Paragraph::new(Text::from(panel.lines.clone()))
                .block(block)
                .scroll((u16::try_from(body.offset).unwrap_or(u16::MAX), 0));
            frame.render_widget(paragraph, rect);
        }

        render_title_buttons(frame, panel, area, &app.theme);
    }
}

fn render_title_buttons(frame: &mut Frame<'_>, panel: &PanelFrame, area: Rect, theme: &TuiTheme) {
    let label = if panel.minimized { "[+][x]" } else { "[_][x]" };
    let x = panel.x + panel.width - TITLE_BUTTONS_INSET;
    let fits = x >= i32::from(area.x)
        && x + 6 <= i32::from(area.right())
        && panel.y >= i32::from(area.y)
        && panel.y < i32::from(area.bottom());
    if !fits {
        return;
    }
    let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(panel.y)) else {
        return;
    };
    frame.buffer_mut().set_string(x, y, label, theme.button_style());
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange).map_err(
            |err| {
                teardown_terminal();
                err
            },
        )?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableFocusChange, DisableMouseCapture, LeaveAlternateScreen);
}

// Footer and help overlay.
include!("chrome.rs");

#[cfg(test)]
mod tests;
