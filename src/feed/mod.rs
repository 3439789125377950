// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Equipment data feed: wire format, sources, the poll loop and accident writes.

pub mod actions;
pub mod client;
pub mod coordinator;
pub mod error;
pub mod memory;
pub mod wire;

pub use actions::{
    dispatch, plan_fix_all, plan_fuse_drop, plan_random_accident, AccidentAction, ActionPlan,
    ActionReport,
};
pub use client::{EquipmentSource, HttpEquipmentSource};
pub use coordinator::{
    feed_channel, FeedEvent, FeedReceiver, FeedSender, PollHandle, PollLoop, PollMessage,
    PollOutcome, RefreshCoordinator,
};
pub use error::{FailureClass, FeedError};
pub use memory::MemorySource;
pub use wire::{decode_snapshot, EquipmentWrite, FleetSnapshot, PollResponse};
