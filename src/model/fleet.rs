// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::equipment::{EquipmentKind, EquipmentRecord, EquipmentStatus, FaultIndicator};

/// Local equipment state the panels render from.
///
/// Categories are replaced wholesale; `rev` bumps once per applied category so callers can tell
/// how many state updates actually happened.
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentFleet {
    categories: BTreeMap<EquipmentKind, Vec<EquipmentRecord>>,
    rev: u64,
}

impl Default for EquipmentFleet {
    fn default() -> Self {
        Self {
            categories: EquipmentKind::ALL.into_iter().map(|kind| (kind, Vec::new())).collect(),
            rev: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvSummary {
    pub total: usize,
    pub charging: usize,
    pub available: usize,
    pub fault: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultyUnit {
    pub kind: EquipmentKind,
    pub index: usize,
    pub name: String,
    pub status: EquipmentStatus,
    pub alert: Option<String>,
}

impl EquipmentFleet {
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn records(&self, kind: EquipmentKind) -> &[EquipmentRecord] {
        self.categories.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn record(&self, kind: EquipmentKind, index: usize) -> Option<&EquipmentRecord> {
        self.records(kind).get(index)
    }

    pub fn replace_category(&mut self, kind: EquipmentKind, records: Vec<EquipmentRecord>) {
        self.categories.insert(kind, records);
        self.rev = self.rev.wrapping_add(1);
    }

    /// Overwrites one unit in place. Returns `false` if the index is out of range.
    pub fn apply_record(
        &mut self,
        kind: EquipmentKind,
        index: usize,
        record: EquipmentRecord,
    ) -> bool {
        let Some(slot) = self.categories.get_mut(&kind).and_then(|records| records.get_mut(index))
        else {
            return false;
        };
        *slot = record;
        self.rev = self.rev.wrapping_add(1);
        true
    }

    pub fn indicators(&self, kind: EquipmentKind) -> Vec<FaultIndicator> {
        self.records(kind).iter().map(EquipmentRecord::fault_indicator).collect()
    }

    pub fn has_fault(&self, kind: EquipmentKind) -> bool {
        self.records(kind).iter().any(EquipmentRecord::is_faulty)
    }

    pub fn ev_summary(&self) -> EvSummary {
        let stations = self.records(EquipmentKind::EvCharger);
        let count = |status| stations.iter().filter(|s| s.status == status).count();
        EvSummary {
            total: stations.len(),
            charging: count(EquipmentStatus::Charging),
            available: count(EquipmentStatus::Available),
            fault: count(EquipmentStatus::Fault),
        }
    }

    pub fn faulty_equipment(&self) -> Vec<FaultyUnit> {
        let mut out = Vec::new();
        for kind in EquipmentKind::ALL {
            for (index, record) in self.records(kind).iter().enumerate() {
                if !record.is_faulty() {
                    continue;
                }
                out.push(FaultyUnit {
                    kind,
                    index,
                    name: record.name.clone(),
                    status: record.status,
                    alert: record.active_alert().map(str::to_owned),
                });
            }
        }
        out
    }
}
