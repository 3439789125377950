// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Footer and help overlay used by TUI rendering.
fn footer_line<S>(app: &App<S>, now: Instant) -> Line<'static> {
    let theme = &app.theme;
    let mut spans = Vec::<Span<'static>>::new();

    let feed = if app.coordinator.is_fetching() {
        format!("{} ⟳", app.status.label())
    } else {
        app.status.label().to_owned()
    };
    push_footer_entry(&mut spans, theme, "FEED", &feed);

    let faults = app.fleet.faulty_equipment().len();
    push_footer_entry(&mut spans, theme, "FAULTS", &faults.to_string());

    let ev = app.fleet.ev_summary();
    push_footer_entry(&mut spans, theme, "EV", &format!("{}/{}", ev.charging, ev.total));

    if app.manager.is_any_panel_dragging() {
        push_footer_entry(&mut spans, theme, "DRAG", "◼");
    }
    push_footer_entry(&mut spans, theme, "HELP", "?");
    push_footer_entry(&mut spans, theme, "QUIT", "q");

    if let Some(notice) = app.notices.latest().filter(|notice| !notice.is_expired(now)) {
        spans.push(Span::styled(" | ".to_owned(), theme.dim_style()));
        spans.push(Span::styled(notice.message.clone(), theme.severity_style(notice.severity)));
    }

    Line::from(spans)
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, theme: &TuiTheme, label: &str, value: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ".to_owned(), theme.dim_style()));
    }
    spans.push(Span::styled(format!("{}:", footer_label_ucfirst(label)), theme.dim_style()));
    spans.push(Span::styled(value.to_owned(), theme.key_style()));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>width$}", width = key_width), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

fn help_lines(theme: &TuiTheme) -> Vec<Line<'static>> {
    let key_style = theme.key_style();
    let header_style = theme.header_style();
    let key_width = "drag title".len();

    let mut lines = Vec::<Line<'static>>::new();
    lines.push(Line::from(Span::styled("--- Panels ---", header_style)));
    for (key, panel_id) in PANEL_KEYS {
        let title = crate::panels::PANEL_CATALOG
            .iter()
            .find(|spec| spec.id == panel_id)
            .map_or(panel_id, |spec| spec.title);
        lines.push(help_kv(&key.to_string(), &format!("Toggle {title}"), key_width, key_style));
    }
    lines.push(help_kv("Tab", "Raise the next panel", key_width, key_style));
    lines.push(help_kv("m / x", "Minimize / close front panel", key_width, key_style));
    lines.push(help_kv("arrows", "Move front panel", key_width, key_style));
    lines.push(help_kv("PgUp/PgDn", "Scroll front panel", key_width, key_style));
    lines.push(help_kv("drag title", "Move a panel", key_width, key_style));
    lines.push(help_kv("wheel", "Scroll the panel under the pointer", key_width, key_style));
    lines.push(help_kv("Esc", "Release every drag", key_width, key_style));
    lines.push(Line::default());

    lines.push(Line::from(Span::styled("--- Equipment ---", header_style)));
    lines.push(help_kv("R", "Random accident", key_width, key_style));
    lines.push(help_kv("F", "EV fuse drop", key_width, key_style));
    lines.push(help_kv("X", "Fix all accidents", key_width, key_style));
    lines.push(help_kv("!", "Open the first faulty unit", key_width, key_style));
    lines.push(help_kv("F1..F6", "Show/hide equipment kind on the map", key_width, key_style));
    lines.push(help_kv("[ / ]", "Select floor", key_width, key_style));
    lines.push(Line::default());

    lines.push(Line::from(Span::styled("--- Global ---", header_style)));
    lines.push(help_kv("?", "Help (toggle)", key_width, key_style));
    lines.push(help_kv("q", "Quit", key_width, key_style));
    lines
}

fn render_help<S>(frame: &mut Frame<'_>, app: &App<S>, main_area: Rect) {
    let area = centered_rect(70, 84, main_area);
    frame.render_widget(Clear, area);

    let paragraph = Paragraph::new(Text::from(help_lines(&app.theme)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .border_style(app.theme.panel_border_style(true, false)),
        )
        .style(app.theme.base_style())
        .wrap(Wrap { trim: false })
        .scroll((app.help_scroll, 0));
    frame.render_widget(paragraph, area);
}
