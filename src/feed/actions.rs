// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Accident triggers.
//!
//! Each trigger is planned against the local fleet, applied to it at once, and pushed to the feed.
//! The next poll confirms or replaces the local state.

use std::sync::Arc;

use rand::seq::IndexedRandom;
use rand::Rng;
use tokio::task::JoinSet;

use crate::model::{
    AccidentKind, EquipmentFleet, EquipmentId, EquipmentKind, EquipmentRecord, EquipmentStatus,
    Voltage,
};
use crate::ui::Severity;

use super::client::EquipmentSource;
use super::error::{FailureClass, FeedError, Result};
use super::wire::EquipmentWrite;

const RESTORED_PHASE_VOLTAGE: f64 = 230.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccidentAction {
    RandomAccident,
    FuseDrop,
    FixAll,
}

impl AccidentAction {
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::RandomAccident => "Failed to trigger accident",
            Self::FuseDrop => "Failed to trigger fuse drop",
            Self::FixAll => "Failed to fix accidents",
        }
    }
}

/// One unit update: where it lands locally and what is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedUpdate {
    pub kind: EquipmentKind,
    pub index: usize,
    pub record: EquipmentRecord,
    pub write: EquipmentWrite,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionPlan {
    pub action: AccidentAction,
    pub updates: Vec<PlannedUpdate>,
    pub severity: Severity,
    pub message: String,
}

impl ActionPlan {
    /// Speculatively applies every planned record. Returns how many landed.
    pub fn apply_locally(&self, fleet: &mut EquipmentFleet) -> usize {
        self.updates
            .iter()
            .filter(|update| fleet.apply_record(update.kind, update.index, update.record.clone()))
            .count()
    }

    pub fn writes(&self) -> Vec<EquipmentWrite> {
        self.updates.iter().map(|update| update.write.clone()).collect()
    }
}

/// Result of pushing a plan, as delivered back to the UI thread.
#[derive(Debug)]
pub struct ActionReport {
    pub action: AccidentAction,
    pub severity: Severity,
    pub message: String,
    pub result: Result<()>,
}

impl ActionReport {
    pub fn is_unauthorized(&self) -> bool {
        matches!(&self.result, Err(err) if err.class() == FailureClass::Unauthorized)
    }

    /// Notice to show for this report.
    pub fn notice(&self) -> (Severity, &str) {
        match &self.result {
            Ok(()) => (self.severity, self.message.as_str()),
            Err(_) => (Severity::Danger, self.action.failure_message()),
        }
    }
}

/// Id used for writes: the station name for EV chargers, `<Prefix>-<NN>` otherwise.
pub fn write_id(kind: EquipmentKind, index: usize, record: &EquipmentRecord) -> Option<EquipmentId> {
    let raw = match kind.id_prefix() {
        Some(prefix) => format!("{prefix}-{:02}", index + 1),
        None => record.name.clone(),
    };
    EquipmentId::new(raw).ok()
}

fn planned(kind: EquipmentKind, index: usize, record: EquipmentRecord) -> Option<PlannedUpdate> {
    let id = write_id(kind, index, &record)?;
    let write = EquipmentWrite::new(kind, &id, &record);
    Some(PlannedUpdate { kind, index, record, write })
}

fn pick_index<R, F>(rng: &mut R, records: &[EquipmentRecord], eligible: F) -> Option<usize>
where
    R: Rng + ?Sized,
    F: Fn(&EquipmentRecord) -> bool,
{
    let candidates: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| eligible(record))
        .map(|(index, _)| index)
        .collect();
    candidates.choose(rng).copied()
}

/// Faults one random unit of a random category.
///
/// EV stations not already faulted are eligible; other kinds only pick units in `normal` state.
/// Returns `None` when the drawn category has no eligible unit.
pub fn plan_random_accident<R: Rng + ?Sized>(
    fleet: &EquipmentFleet,
    rng: &mut R,
) -> Option<ActionPlan> {
    let kind = *EquipmentKind::ALL.choose(rng)?;
    let records = fleet.records(kind);

    let (index, record, message) = match kind.accident_alert() {
        None => {
            let index = pick_index(rng, records, |r| r.status != EquipmentStatus::Fault)?;
            let mut record = records[index].clone();
            record.status = EquipmentStatus::Fault;
            record.accident_type = Some(AccidentKind::Fault);
            let message = format!("{}: Accident occurred", record.name);
            (index, record, message)
        }
        Some(alert) => {
            let index = pick_index(rng, records, |r| r.status == EquipmentStatus::Normal)?;
            let mut record = records[index].clone();
            record.status = EquipmentStatus::Fault;
            record.alert = Some(alert.to_owned());
            let message =
                format!("{} {}: Accident occurred", kind.wire_name().to_uppercase(), index + 1);
            (index, record, message)
        }
    };

    Some(ActionPlan {
        action: AccidentAction::RandomAccident,
        updates: vec![planned(kind, index, record)?],
        severity: Severity::Danger,
        message,
    })
}

/// Drops phase 1 of a random EV station.
pub fn plan_fuse_drop<R: Rng + ?Sized>(fleet: &EquipmentFleet, rng: &mut R) -> Option<ActionPlan> {
    let stations = fleet.records(EquipmentKind::EvCharger);
    let index = pick_index(rng, stations, |r| r.voltage.is_some())?;
    let mut record = stations[index].clone();
    let voltage = record.voltage?;

    record.status = EquipmentStatus::Fault;
    record.accident_type = Some(AccidentKind::FuseDrop);
    record.voltage = Some(Voltage {
        v1: 0.0,
        average: ((voltage.v2 + voltage.v3) / 2.0).round(),
        ..voltage
    });
    let message = format!("{}: Fuse Dropped (V1 = 0V)", record.name);

    Some(ActionPlan {
        action: AccidentAction::FuseDrop,
        updates: vec![planned(EquipmentKind::EvCharger, index, record)?],
        severity: Severity::Warning,
        message,
    })
}

fn fixed(kind: EquipmentKind, record: &EquipmentRecord) -> EquipmentRecord {
    let mut record = record.clone();
    if kind == EquipmentKind::EvCharger {
        if let Some(voltage) = record.voltage {
            let v1 = if voltage.v1 == 0.0 { RESTORED_PHASE_VOLTAGE } else { voltage.v1 };
            record.voltage = Some(Voltage::new(v1, voltage.v2, voltage.v3));
        }
        if record.status == EquipmentStatus::Fault {
            record.status = EquipmentStatus::Available;
        }
        record.accident_type = None;
    } else {
        record.status = EquipmentStatus::Normal;
        record.alert = Some("None".to_owned());
    }
    record
}

/// Restores every unit of every category.
pub fn plan_fix_all(fleet: &EquipmentFleet) -> ActionPlan {
    let updates = EquipmentKind::ALL
        .into_iter()
        .flat_map(|kind| {
            fleet
                .records(kind)
                .iter()
                .enumerate()
                .filter_map(move |(index, record)| planned(kind, index, fixed(kind, record)))
        })
        .collect();

    ActionPlan {
        action: AccidentAction::FixAll,
        updates,
        severity: Severity::Success,
        message: "All accidents fixed".to_owned(),
    }
}

/// Pushes all writes concurrently. An unauthorized response wins over other failures.
pub async fn push_all<S: EquipmentSource>(
    source: Arc<S>,
    writes: Vec<EquipmentWrite>,
) -> Result<()> {
    let mut set = JoinSet::new();
    for write in writes {
        let source = Arc::clone(&source);
        set.spawn(async move { source.push(&write).await });
    }

    let mut failure: Option<FeedError> = None;
    while let Some(joined) = set.join_next().await {
        let Err(err) = joined.map_err(FeedError::from).and_then(|pushed| pushed) else {
            continue;
        };
        tracing::error!(error = %err, "equipment write failed");
        let keep_existing =
            failure.as_ref().is_some_and(|f| f.class() == FailureClass::Unauthorized);
        if !keep_existing {
            failure = Some(err);
        }
    }
    failure.map_or(Ok(()), Err)
}

/// Pushes a plan and wraps the outcome for the UI thread.
pub async fn dispatch<S: EquipmentSource>(source: Arc<S>, plan: &ActionPlan) -> ActionReport {
    let result = push_all(source, plan.writes()).await;
    ActionReport {
        action: plan.action,
        severity: plan.severity,
        message: plan.message.clone(),
        result,
    }
}
