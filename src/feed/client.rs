// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;

use super::error::{FeedError, Result};
use super::wire::{decode_snapshot, EquipmentWrite, FleetSnapshot, PollResponse};

const EQUIPMENT_DATA_PATH: &str = "/equipment-data";

/// Where equipment readings come from and accident writes go to.
pub trait EquipmentSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<FleetSnapshot>> + Send;

    fn push(&self, write: &EquipmentWrite) -> impl Future<Output = Result<()>> + Send;
}

/// The remote equipment-data service.
#[derive(Debug, Clone)]
pub struct HttpEquipmentSource {
    client: Client,
    endpoint: String,
    token: String,
}

impl HttpEquipmentSource {
    pub fn new(base_url: &str, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(timeout.min(Duration::from_secs(2)))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{}{EQUIPMENT_DATA_PATH}", base_url.trim_end_matches('/')),
            token: token.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn check(status: reqwest::StatusCode) -> Result<()> {
        if status.is_success() {
            Ok(())
        } else {
            Err(FeedError::from_status(status.as_u16()))
        }
    }
}

impl EquipmentSource for HttpEquipmentSource {
    async fn fetch(&self) -> Result<FleetSnapshot> {
        let response = self.client.get(&self.endpoint).bearer_auth(&self.token).send().await?;
        Self::check(response.status())?;
        let body = response.bytes().await?;
        let parsed: PollResponse = serde_json::from_slice(&body)?;
        Ok(decode_snapshot(parsed))
    }

    async fn push(&self, write: &EquipmentWrite) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(write)
            .send()
            .await?;
        Self::check(response.status())
    }
}
