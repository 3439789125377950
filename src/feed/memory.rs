// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::model::{EquipmentFleet, EquipmentKind, EquipmentRecord};

use super::client::EquipmentSource;
use super::error::{FeedError, Result};
use super::wire::{EquipmentWrite, FleetSnapshot};

/// In-process equipment feed.
///
/// Serves `--demo` sessions and tests. Writes are folded into the served snapshot so the next
/// fetch confirms them, like the remote service does.
#[derive(Debug, Default)]
pub struct MemorySource {
    state: Mutex<MemoryState>,
    latency: Duration,
}

#[derive(Debug, Default)]
struct MemoryState {
    snapshot: FleetSnapshot,
    fetch_failures: VecDeque<FeedError>,
    push_failures: VecDeque<FeedError>,
    fetches: usize,
    writes: Vec<EquipmentWrite>,
}

impl MemorySource {
    pub fn new(snapshot: FleetSnapshot) -> Self {
        Self {
            state: Mutex::new(MemoryState { snapshot, ..MemoryState::default() }),
            latency: Duration::ZERO,
        }
    }

    pub fn from_fleet(fleet: &EquipmentFleet) -> Self {
        let mut snapshot = FleetSnapshot::default();
        for kind in EquipmentKind::ALL {
            let records = fleet.records(kind);
            if !records.is_empty() {
                snapshot.insert(kind, records.to_vec());
            }
        }
        Self::new(snapshot)
    }

    /// Every fetch and push sleeps this long before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_snapshot(&self, snapshot: FleetSnapshot) {
        self.state().snapshot = snapshot;
    }

    pub fn set_category(&self, kind: EquipmentKind, records: Vec<EquipmentRecord>) {
        self.state().snapshot.insert(kind, records);
    }

    /// Queues an error for the next fetch.
    pub fn fail_next_fetch(&self, err: FeedError) {
        self.state().fetch_failures.push_back(err);
    }

    /// Queues an error for the next push.
    pub fn fail_next_push(&self, err: FeedError) {
        self.state().push_failures.push_back(err);
    }

    pub fn fetch_count(&self) -> usize {
        self.state().fetches
    }

    pub fn writes(&self) -> Vec<EquipmentWrite> {
        self.state().writes.clone()
    }

    fn fold_write(state: &mut MemoryState, write: &EquipmentWrite) -> Result<()> {
        let kind: EquipmentKind = write
            .equipment_type
            .parse()
            .map_err(|_| FeedError::Status { status: 400 })?;
        let record: EquipmentRecord = serde_json::from_value(write.sensor_data.clone())?;
        let mut records = state.snapshot.get(kind).map(<[_]>::to_vec).unwrap_or_default();
        match records.iter().position(|r| r.name == write.equipment_id) {
            Some(slot) => records[slot] = record,
            None => records.push(record),
        }
        state.snapshot.insert(kind, records);
        Ok(())
    }
}

impl EquipmentSource for MemorySource {
    async fn fetch(&self) -> Result<FleetSnapshot> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let mut state = self.state();
        state.fetches += 1;
        match state.fetch_failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(state.snapshot.clone()),
        }
    }

    async fn push(&self, write: &EquipmentWrite) -> Result<()> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let mut state = self.state();
        if let Some(err) = state.push_failures.pop_front() {
            return Err(err);
        }
        Self::fold_write(&mut state, write)?;
        state.writes.push(write.clone());
        Ok(())
    }
}
