// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Equipment categories monitored by the dashboard.
///
/// Each category is polled, buffered and flushed as one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EquipmentKind {
    EvCharger,
    Chiller,
    Ahu,
    Electrical,
    Pump,
    Fire,
}

impl EquipmentKind {
    pub const ALL: [Self; 6] = [
        Self::EvCharger,
        Self::Chiller,
        Self::Ahu,
        Self::Electrical,
        Self::Pump,
        Self::Fire,
    ];

    /// The `equipment_type` value used on the wire.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::EvCharger => "evcharger",
            Self::Chiller => "chiller",
            Self::Ahu => "ahu",
            Self::Electrical => "electrical",
            Self::Pump => "pump",
            Self::Fire => "fire",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::EvCharger => "EV Charging Station",
            Self::Chiller => "Chiller",
            Self::Ahu => "AHU",
            Self::Electrical => "Electrical Panel",
            Self::Pump => "Water Pump",
            Self::Fire => "Fire Alarm",
        }
    }

    /// Prefix of `<Prefix>-<NN>` equipment ids. EV stations are addressed by their name instead.
    pub fn id_prefix(self) -> Option<&'static str> {
        match self {
            Self::EvCharger => None,
            Self::Chiller => Some("Chiller"),
            Self::Ahu => Some("AHU"),
            Self::Electrical => Some("Electrical"),
            Self::Pump => Some("Pump"),
            Self::Fire => Some("Fire"),
        }
    }

    /// Prefix of per-unit detail panel ids (`ev-3`, `chiller-0`).
    pub fn unit_panel_prefix(self) -> &'static str {
        match self {
            Self::EvCharger => "ev",
            Self::Chiller => "chiller",
            Self::Ahu => "ahu",
            Self::Electrical => "electrical",
            Self::Pump => "pump",
            Self::Fire => "fire",
        }
    }

    /// Alert text written when a random accident hits this category.
    pub fn accident_alert(self) -> Option<&'static str> {
        match self {
            Self::EvCharger => None,
            Self::Chiller => Some("System failure"),
            Self::Ahu => Some("Fan malfunction"),
            Self::Electrical => Some("Overload"),
            Self::Pump => Some("Motor failure"),
            Self::Fire => Some("Sensor error"),
        }
    }
}

impl fmt::Display for EquipmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEquipmentKindError {
    value: String,
}

impl fmt::Display for ParseEquipmentKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown equipment type: {}", self.value)
    }
}

impl std::error::Error for ParseEquipmentKindError {}

impl FromStr for EquipmentKind {
    type Err = ParseEquipmentKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.wire_name() == s)
            .ok_or_else(|| ParseEquipmentKindError { value: s.to_owned() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentStatus {
    Normal,
    Fault,
    Charging,
    Available,
    Unavailable,
}

impl EquipmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Fault => "fault",
            Self::Charging => "charging",
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marks how an EV station was faulted by an accident trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccidentKind {
    #[serde(rename = "fault")]
    Fault,
    #[serde(rename = "fuseDrop")]
    FuseDrop,
}

/// Per-phase supply voltage of an EV station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Voltage {
    pub v1: f64,
    pub v2: f64,
    pub v3: f64,
    pub average: f64,
}

impl Voltage {
    pub fn new(v1: f64, v2: f64, v3: f64) -> Self {
        let mut voltage = Self { v1, v2, v3, average: 0.0 };
        voltage.average = voltage.three_phase_average();
        voltage
    }

    pub fn three_phase_average(&self) -> f64 {
        ((self.v1 + self.v2 + self.v3) / 3.0).round()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultIndicator {
    Normal,
    Fault,
}

/// One equipment unit as reported by the feed.
///
/// Only the fields the dashboard reasons about are typed; every other sensor value is kept in
/// `readings` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub status: EquipmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
    #[serde(default, rename = "accidentType", skip_serializing_if = "Option::is_none")]
    pub accident_type: Option<AccidentKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voltage: Option<Voltage>,
    #[serde(flatten)]
    pub readings: serde_json::Map<String, serde_json::Value>,
}

impl EquipmentRecord {
    pub fn new(id: u32, name: impl Into<String>, status: EquipmentStatus) -> Self {
        Self {
            id,
            name: name.into(),
            status,
            alert: None,
            accident_type: None,
            voltage: None,
            readings: serde_json::Map::new(),
        }
    }

    pub fn with_alert(mut self, alert: impl Into<String>) -> Self {
        self.alert = Some(alert.into());
        self
    }

    pub fn with_voltage(mut self, voltage: Voltage) -> Self {
        self.voltage = Some(voltage);
        self
    }

    pub fn with_reading(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.readings.insert(key.to_owned(), value.into());
        self
    }

    pub fn reading_text(&self, key: &str) -> Option<String> {
        match self.readings.get(key)? {
            serde_json::Value::String(text) => Some(text.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// The alert text, if it describes an active condition.
    pub fn active_alert(&self) -> Option<&str> {
        let alert = self.alert.as_deref()?;
        if alert.trim().is_empty() || alert == "None" || alert == "Loading..." {
            return None;
        }
        Some(alert)
    }

    pub fn fault_indicator(&self) -> FaultIndicator {
        if self.status == EquipmentStatus::Fault || self.active_alert().is_some() {
            FaultIndicator::Fault
        } else {
            FaultIndicator::Normal
        }
    }

    pub fn is_faulty(&self) -> bool {
        self.fault_indicator() == FaultIndicator::Fault
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AccidentKind, EquipmentKind, EquipmentRecord, EquipmentStatus, FaultIndicator, Voltage,
    };

    #[test]
    fn kind_round_trips_wire_names() {
        for kind in EquipmentKind::ALL {
            assert_eq!(kind.wire_name().parse::<EquipmentKind>(), Ok(kind));
        }
        assert!("boiler".parse::<EquipmentKind>().is_err());
    }

    #[test]
    fn fault_indicator_follows_status_and_alert() {
        let normal = EquipmentRecord::new(1, "AHU-01", EquipmentStatus::Normal).with_alert("None");
        assert_eq!(normal.fault_indicator(), FaultIndicator::Normal);

        let loading =
            EquipmentRecord::new(1, "AHU-01", EquipmentStatus::Normal).with_alert("Loading...");
        assert_eq!(loading.fault_indicator(), FaultIndicator::Normal);

        let blank = EquipmentRecord::new(1, "AHU-01", EquipmentStatus::Normal).with_alert("   ");
        assert_eq!(blank.fault_indicator(), FaultIndicator::Normal);

        let alerted =
            EquipmentRecord::new(1, "AHU-01", EquipmentStatus::Normal).with_alert("High pressure");
        assert_eq!(alerted.fault_indicator(), FaultIndicator::Fault);

        let faulted = EquipmentRecord::new(1, "EV-01", EquipmentStatus::Fault);
        assert_eq!(faulted.fault_indicator(), FaultIndicator::Fault);
    }

    #[test]
    fn record_keeps_untyped_readings() {
        let raw = serde_json::json!({
            "status": "charging",
            "accidentType": "fuseDrop",
            "voltage": { "v1": 0, "v2": 229, "v3": 231, "average": 230 },
            "power": "7.2 kW"
        });
        let record: EquipmentRecord = serde_json::from_value(raw).expect("record");

        assert_eq!(record.status, EquipmentStatus::Charging);
        assert_eq!(record.accident_type, Some(AccidentKind::FuseDrop));
        assert_eq!(record.voltage.map(|v| v.v1), Some(0.0));
        assert_eq!(record.reading_text("power").as_deref(), Some("7.2 kW"));

        let back = serde_json::to_value(&record).expect("serialize");
        assert_eq!(back["power"], "7.2 kW");
        assert_eq!(back["accidentType"], "fuseDrop");
    }

    #[test]
    fn voltage_average_is_rounded() {
        let voltage = Voltage::new(230.0, 229.0, 232.0);
        assert_eq!(voltage.average, 230.0);
    }
}
