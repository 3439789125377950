// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! `/equipment-data` payloads.
//!
//! A poll returns every reading ever stored, so a category is rebuilt by keeping the newest
//! reading per equipment id and ordering units by the numeric suffix of their id.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{EquipmentId, EquipmentKind, EquipmentRecord};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PollResponse {
    #[serde(default)]
    pub data: Option<Vec<WireReading>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireReading {
    pub equipment_type: String,
    pub equipment_id: String,
    #[serde(default)]
    pub sensor_data: serde_json::Value,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Body of `POST /equipment-data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentWrite {
    pub equipment_type: &'static str,
    pub equipment_id: String,
    pub sensor_data: serde_json::Value,
}

impl EquipmentWrite {
    pub fn new(kind: EquipmentKind, equipment_id: &EquipmentId, record: &EquipmentRecord) -> Self {
        Self {
            equipment_type: kind.wire_name(),
            equipment_id: equipment_id.to_string(),
            sensor_data: serde_json::to_value(record).unwrap_or_default(),
        }
    }
}

/// Decoded result of one poll: only categories that came back non-empty and well formed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FleetSnapshot {
    categories: BTreeMap<EquipmentKind, Vec<EquipmentRecord>>,
}

impl FleetSnapshot {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn get(&self, kind: EquipmentKind) -> Option<&[EquipmentRecord]> {
        self.categories.get(&kind).map(Vec::as_slice)
    }

    pub fn insert(&mut self, kind: EquipmentKind, records: Vec<EquipmentRecord>) {
        self.categories.insert(kind, records);
    }

    pub fn into_categories(self) -> impl Iterator<Item = (EquipmentKind, Vec<EquipmentRecord>)> {
        self.categories.into_iter()
    }
}

/// Parses a reading timestamp. Zone-less values are taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// `true` only when both stamps parse and `candidate` is strictly newer.
fn is_newer(candidate: Option<&str>, current: Option<&str>) -> bool {
    match (candidate.and_then(parse_timestamp), current.and_then(parse_timestamp)) {
        (Some(candidate), Some(current)) => candidate > current,
        _ => false,
    }
}

fn decode_reading(reading: WireReading) -> Result<EquipmentRecord, serde_json::Error> {
    let mut sensor_data = reading.sensor_data;
    if let Some(fields) = sensor_data.as_object_mut() {
        fields.remove("id");
        fields.remove("name");
    }
    let mut record: EquipmentRecord = serde_json::from_value(sensor_data)?;
    record.id = reading
        .equipment_id
        .parse::<EquipmentId>()
        .ok()
        .and_then(|id| id.numeric_suffix())
        .unwrap_or(0);
    record.name = reading.equipment_id;
    Ok(record)
}

fn unit_order(record: &EquipmentRecord) -> (u32, &str) {
    (record.id, record.name.as_str())
}

/// Groups, deduplicates and orders the readings of one poll.
///
/// Unknown equipment types are ignored. A category with a reading that does not decode is left
/// out of the snapshot for this cycle.
pub fn decode_snapshot(response: PollResponse) -> FleetSnapshot {
    let mut latest: BTreeMap<EquipmentKind, BTreeMap<String, WireReading>> = BTreeMap::new();
    for reading in response.data.unwrap_or_default() {
        let Ok(kind) = reading.equipment_type.parse::<EquipmentKind>() else {
            tracing::debug!(equipment_type = %reading.equipment_type, "unknown equipment type");
            continue;
        };
        match latest.entry(kind).or_default().entry(reading.equipment_id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(reading);
            }
            Entry::Occupied(mut slot) => {
                if is_newer(reading.timestamp.as_deref(), slot.get().timestamp.as_deref()) {
                    slot.insert(reading);
                }
            }
        }
    }

    let mut snapshot = FleetSnapshot::default();
    for (kind, readings) in latest {
        let decoded: Result<Vec<_>, _> = readings.into_values().map(decode_reading).collect();
        match decoded {
            Ok(mut records) if !records.is_empty() => {
                records.sort_by(|a, b| unit_order(a).cmp(&unit_order(b)));
                snapshot.insert(kind, records);
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(
                    category = kind.wire_name(),
                    error = %err,
                    "malformed category skipped"
                );
            }
        }
    }
    snapshot
}
