// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Background refresh.
//!
//! [`PollLoop`] runs on the runtime and only fetches; it never touches UI state. Results travel
//! over a channel to the UI thread, where [`RefreshCoordinator`] applies them to the fleet or
//! buffers them until the current drag batch ends.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::model::{EquipmentFleet, EquipmentKind, EquipmentRecord};
use crate::panels::{DragBatchEnded, DragSignal};

use super::actions::ActionReport;
use super::client::EquipmentSource;
use super::error::{FailureClass, Result};
use super::wire::FleetSnapshot;

/// Poll results tagged with the session epoch they were requested under.
#[derive(Debug)]
pub struct PollMessage {
    pub epoch: u64,
    pub result: Result<FleetSnapshot>,
}

/// Everything the runtime side reports to the UI thread.
#[derive(Debug)]
pub enum FeedEvent {
    PollStarted { epoch: u64 },
    Polled(PollMessage),
    ActionFinished(ActionReport),
}

pub type FeedSender = mpsc::UnboundedSender<FeedEvent>;
pub type FeedReceiver = mpsc::UnboundedReceiver<FeedEvent>;

pub fn feed_channel() -> (FeedSender, FeedReceiver) {
    mpsc::unbounded_channel()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Applied to the fleet, one update per category.
    Applied { categories: usize },
    /// Held back because a drag is in flight.
    Buffered { categories: usize },
    /// From an ended session.
    Discarded,
    /// The credential was rejected; the session must end.
    AuthExpired,
    /// Transient failure; logged only.
    Failed,
}

/// UI-thread side of the refresh pipeline.
///
/// Owns the pending buffer. Only [`RefreshCoordinator::on_poll_result`] fills it and only
/// [`RefreshCoordinator::on_drag_batch_ended`] drains it.
#[derive(Debug, Default)]
pub struct RefreshCoordinator {
    epoch: u64,
    pending: BTreeMap<EquipmentKind, Vec<EquipmentRecord>>,
    fetching: bool,
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_categories(&self) -> usize {
        self.pending.len()
    }

    pub fn on_poll_started(&mut self, epoch: u64) {
        if epoch == self.epoch {
            self.fetching = true;
        }
    }

    pub fn on_poll_result(
        &mut self,
        message: PollMessage,
        dragging: bool,
        fleet: &mut EquipmentFleet,
    ) -> PollOutcome {
        if message.epoch != self.epoch {
            tracing::debug!(epoch = message.epoch, current = self.epoch, "stale poll discarded");
            return PollOutcome::Discarded;
        }

        let snapshot = match message.result {
            Ok(snapshot) => snapshot,
            Err(err) => {
                self.fetching = false;
                return match err.class() {
                    FailureClass::Unauthorized => {
                        tracing::warn!(epoch = self.epoch, "equipment feed rejected credential");
                        PollOutcome::AuthExpired
                    }
                    FailureClass::Transient => {
                        tracing::warn!(error = %err, "equipment poll failed");
                        PollOutcome::Failed
                    }
                };
            }
        };

        let categories = snapshot.len();
        if dragging {
            // the fetching flag stays up until the flush so the footer does not redraw mid-drag
            self.pending.extend(snapshot.into_categories());
            tracing::debug!(categories, pending = self.pending.len(), "poll buffered during drag");
            return PollOutcome::Buffered { categories };
        }

        // anything still buffered is older than this snapshot
        let stale: Vec<_> = std::mem::take(&mut self.pending)
            .into_iter()
            .filter(|(kind, _)| snapshot.get(*kind).is_none())
            .collect();
        for (kind, records) in stale.into_iter().chain(snapshot.into_categories()) {
            fleet.replace_category(kind, records);
        }
        self.fetching = false;
        PollOutcome::Applied { categories }
    }

    /// Applies everything buffered during the batch, once. Returns the categories applied.
    pub fn on_drag_batch_ended(
        &mut self,
        edge: DragBatchEnded,
        fleet: &mut EquipmentFleet,
    ) -> usize {
        let pending = std::mem::take(&mut self.pending);
        let flushed = pending.len();
        for (kind, records) in pending {
            fleet.replace_category(kind, records);
        }
        self.fetching = false;
        if flushed > 0 {
            tracing::debug!(batch = edge.batch, categories = flushed, "flushed buffered poll data");
        }
        flushed
    }

    /// Invalidates in-flight results and drops anything buffered. Returns the new epoch.
    pub fn end_session(&mut self) -> u64 {
        self.epoch = self.epoch.wrapping_add(1);
        self.pending.clear();
        self.fetching = false;
        self.epoch
    }
}

/// Fixed-interval fetch loop.
///
/// The first tick fires at once. A tick that finds a drag in flight is skipped without fetching;
/// the next fetch waits for the next tick. Fetches never overlap.
pub struct PollLoop<S> {
    source: Arc<S>,
    interval: Duration,
    drag: DragSignal,
    events: FeedSender,
    epoch: u64,
}

impl<S: EquipmentSource> PollLoop<S> {
    pub fn new(
        source: Arc<S>,
        interval: Duration,
        drag: DragSignal,
        events: FeedSender,
        epoch: u64,
    ) -> Self {
        Self { source, interval, drag, events, epoch }
    }

    /// Spawns the loop on the current runtime.
    pub fn spawn(self) -> PollHandle {
        let (shutdown, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(shutdown_rx));
        PollHandle { shutdown, task }
    }

    async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = shutdown.changed() => break,
            }
            if *shutdown.borrow() {
                break;
            }
            if *self.drag.borrow() {
                tracing::debug!(epoch = self.epoch, "poll skipped while dragging");
                continue;
            }

            if self.events.send(FeedEvent::PollStarted { epoch: self.epoch }).is_err() {
                break;
            }
            let result = self.source.fetch().await;
            let message = PollMessage { epoch: self.epoch, result };
            if self.events.send(FeedEvent::Polled(message)).is_err() {
                break;
            }
        }
        tracing::debug!(epoch = self.epoch, "poll loop stopped");
    }
}

/// Stops the poll loop. A fetch in flight still completes and reports; its epoch marks it stale.
#[derive(Debug)]
pub struct PollHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn stop(&self) {
        self.shutdown.send_replace(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub async fn join(self) {
        self.stop();
        if let Err(err) = self.task.await {
            tracing::error!(error = %err, "poll loop task failed");
        }
    }
}
