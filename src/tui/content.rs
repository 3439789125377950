// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Panel bodies.

use ratatui::prelude::*;

use crate::model::{EquipmentFleet, EquipmentKind, EquipmentRecord, FaultIndicator};
use crate::panels::{category_panel_id, parse_unit_panel_id, PanelRecord, PanelRegistry};
use crate::ui::LayerFilter;

use super::theme::TuiTheme;
use super::{FeedStatus, FLOOR_COUNT, PANEL_KEYS};

const MARKER: &str = "●";
const CHECKED: &str = "◼";
const UNCHECKED: &str = "◻";

/// Everything a panel body may show.
pub(super) struct PanelContext<'a> {
    pub(super) fleet: &'a EquipmentFleet,
    pub(super) registry: &'a PanelRegistry,
    pub(super) layers: &'a LayerFilter,
    pub(super) theme: &'a TuiTheme,
    pub(super) floor: u8,
    pub(super) feed: FeedStatus,
}

pub(super) fn panel_lines(panel: &PanelRecord, ctx: &PanelContext<'_>) -> Vec<Line<'static>> {
    if let Some((kind, index)) = parse_unit_panel_id(panel.id()) {
        return unit_lines(kind, index, ctx);
    }
    match panel.id().as_str() {
        "accident" => accident_lines(ctx),
        "sidebar" => sidebar_lines(ctx),
        "filter" => filter_lines(ctx),
        "floors" => floor_lines(ctx),
        "equipmentOverview" => overview_lines(ctx),
        "ev" => ev_lines(ctx),
        other => match category_kind(other) {
            Some(kind) => category_lines(kind, ctx),
            None => Vec::new(),
        },
    }
}

fn category_kind(panel_id: &str) -> Option<EquipmentKind> {
    EquipmentKind::ALL.into_iter().find(|kind| category_panel_id(*kind) == panel_id)
}

fn key_line(ctx: &PanelContext<'_>, key: &str, label: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>3} "), ctx.theme.key_style()),
        Span::raw(label.to_owned()),
    ])
}

fn check(on: bool) -> &'static str {
    if on {
        CHECKED
    } else {
        UNCHECKED
    }
}

fn marker(ctx: &PanelContext<'_>, indicator: FaultIndicator) -> Span<'static> {
    Span::styled(MARKER, ctx.theme.indicator_style(indicator))
}

fn accident_lines(ctx: &PanelContext<'_>) -> Vec<Line<'static>> {
    let mut lines = vec![
        key_line(ctx, "R", "Random accident"),
        key_line(ctx, "F", "EV fuse drop"),
        key_line(ctx, "X", "Fix all accidents"),
        Line::default(),
    ];
    let note = match ctx.feed {
        FeedStatus::Live => "Writes go to the equipment service.",
        FeedStatus::Demo => "Demo feed: writes stay in memory.",
        FeedStatus::Offline | FeedStatus::Expired => "Not connected: changes stay local.",
    };
    lines.push(Line::styled(note, ctx.theme.dim_style()));
    lines
}

fn sidebar_lines(ctx: &PanelContext<'_>) -> Vec<Line<'static>> {
    PANEL_KEYS
        .iter()
        .filter_map(|(key, panel_id)| {
            let record = ctx.registry.iter().find(|record| record.id().as_str() == *panel_id)?;
            let label = format!("{} {}", check(record.is_open()), record.title());
            Some(key_line(ctx, &key.to_string(), &label))
        })
        .collect()
}

fn filter_lines(ctx: &PanelContext<'_>) -> Vec<Line<'static>> {
    EquipmentKind::ALL
        .iter()
        .enumerate()
        .map(|(idx, kind)| {
            let label = format!("{} {}", check(ctx.layers.is_visible(*kind)), kind.label());
            key_line(ctx, &format!("F{}", idx + 1), &label)
        })
        .collect()
}

fn floor_lines(ctx: &PanelContext<'_>) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = (1..=FLOOR_COUNT)
        .rev()
        .map(|floor| {
            let label = format!(" Floor {floor} ");
            if floor == ctx.floor {
                Line::styled(label, ctx.theme.selection_style())
            } else {
                Line::raw(label)
            }
        })
        .collect();
    lines.push(Line::styled("[ ] select floor", ctx.theme.dim_style()));
    lines
}

fn overview_lines(ctx: &PanelContext<'_>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for kind in EquipmentKind::ALL {
        let records = ctx.fleet.records(kind);
        let faults = records.iter().filter(|record| record.is_faulty()).count();
        let indicator =
            if faults > 0 { FaultIndicator::Fault } else { FaultIndicator::Normal };
        lines.push(Line::from(vec![
            marker(ctx, indicator),
            Span::raw(format!(" {:<20}{:>3} units", kind.label(), records.len())),
            Span::styled(format!("{faults:>3} faulty"), ctx.theme.dim_style()),
        ]));
    }

    lines.push(Line::default());
    let faulty = ctx.fleet.faulty_equipment();
    if faulty.is_empty() {
        lines.push(Line::styled("All systems normal", ctx.theme.dim_style()));
        return lines;
    }
    lines.push(Line::styled("Faulty equipment", ctx.theme.header_style()));
    for unit in faulty {
        let alert = unit.alert.as_deref().unwrap_or("-");
        lines.push(Line::from(vec![
            marker(ctx, FaultIndicator::Fault),
            Span::raw(format!(
                " {} {}: {} ({}) {alert}",
                unit.kind.label(),
                unit.index + 1,
                unit.name,
                unit.status
            )),
        ]));
    }
    lines.push(Line::styled("! opens the first one", ctx.theme.dim_style()));
    lines
}

fn ev_lines(ctx: &PanelContext<'_>) -> Vec<Line<'static>> {
    let summary = ctx.fleet.ev_summary();
    let mut lines = vec![
        Line::from(format!(
            "Total {}  Charging {}  Available {}  Fault {}",
            summary.total, summary.charging, summary.available, summary.fault
        )),
        Line::default(),
    ];
    for record in ctx.fleet.records(EquipmentKind::EvCharger) {
        let mut spans = vec![
            marker(ctx, record.fault_indicator()),
            Span::raw(format!(" {:<8}{:<12}", record.name, record.status)),
        ];
        if let Some(voltage) = record.voltage {
            spans.push(Span::styled(
                format!(
                    "{:>4.0}/{:>4.0}/{:>4.0} V  avg {:.0}",
                    voltage.v1, voltage.v2, voltage.v3, voltage.average
                ),
                ctx.theme.dim_style(),
            ));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn category_lines(kind: EquipmentKind, ctx: &PanelContext<'_>) -> Vec<Line<'static>> {
    let records = ctx.fleet.records(kind);
    if records.is_empty() {
        return vec![Line::styled("Loading...", ctx.theme.dim_style())];
    }
    let faults = records.iter().filter(|record| record.is_faulty()).count();
    let mut lines = vec![Line::from(format!("{} units, {faults} faulty", records.len()))];
    for record in records {
        let alert = record.active_alert().unwrap_or("");
        let power = record.reading_text("power").unwrap_or_default();
        lines.push(Line::from(vec![
            marker(ctx, record.fault_indicator()),
            Span::raw(format!(" {:<15}{:<9}{:>10}  ", record.name, record.status, power)),
            Span::styled(alert.to_owned(), ctx.theme.indicator_style(FaultIndicator::Fault)),
        ]));
    }
    lines
}

fn unit_lines(kind: EquipmentKind, index: usize, ctx: &PanelContext<'_>) -> Vec<Line<'static>> {
    let Some(record) = ctx.fleet.record(kind, index) else {
        return vec![Line::styled("No data for this unit", ctx.theme.dim_style())];
    };
    record_lines(kind, record, ctx)
}

fn record_lines(
    kind: EquipmentKind,
    record: &EquipmentRecord,
    ctx: &PanelContext<'_>,
) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled(format!("{} {}", kind.label(), record.name), ctx.theme.header_style()),
        Line::from(vec![
            Span::raw("Status: "),
            Span::styled(
                record.status.to_string(),
                ctx.theme.indicator_style(record.fault_indicator()),
            ),
        ]),
        Line::from(format!("Alert:  {}", record.active_alert().unwrap_or("None"))),
    ];
    if let Some(accident) = record.accident_type {
        lines.push(Line::from(format!("Accident: {accident:?}")));
    }
    if let Some(voltage) = record.voltage {
        lines.push(Line::from(format!(
            "Voltage: {:.0} / {:.0} / {:.0} V (avg {:.0})",
            voltage.v1, voltage.v2, voltage.v3, voltage.average
        )));
    }
    for key in record.readings.keys() {
        if let Some(value) = record.reading_text(key) {
            lines.push(Line::from(format!("{key}: {value}")));
        }
    }
    lines
}
