// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-BmsDashboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of bms-dashboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::equipment::{EquipmentKind, EquipmentRecord, EquipmentStatus, Voltage};
use super::fleet::EquipmentFleet;

const EV_STATIONS: u32 = 30;
const CHILLERS: u32 = 3;
const AHUS: u32 = 12;
const ELECTRICALS: u32 = 8;
const PUMPS: u32 = 6;
const FIRES: u32 = 15;

fn unit_name(prefix: &str, n: u32) -> String {
    format!("{prefix}-{n:02}")
}

/// Small deterministic jitter so demo readings are not all identical.
fn wobble(n: u32, spread: u32) -> f64 {
    f64::from((n * 7 + 3) % (spread * 10 + 1)) / 10.0
}

fn ev_station(n: u32) -> EquipmentRecord {
    let status = match n % 5 {
        0 => EquipmentStatus::Unavailable,
        1 | 3 => EquipmentStatus::Charging,
        _ => EquipmentStatus::Available,
    };
    let voltage = Voltage::new(
        (228.0 + wobble(n, 4)).round(),
        (229.0 + wobble(n + 1, 3)).round(),
        (230.0 + wobble(n + 2, 2)).round(),
    );
    EquipmentRecord::new(n, unit_name("EV", n), status)
        .with_voltage(voltage)
        .with_reading("power", format!("{:.1} kW", 7.0 + wobble(n, 4)))
}

fn plant_unit(kind: EquipmentKind, n: u32, fault_at: Option<(u32, &str)>) -> EquipmentRecord {
    let prefix = kind.id_prefix().unwrap_or("Unit");
    let (status, alert) = match fault_at {
        Some((at, alert)) if at == n => (EquipmentStatus::Fault, alert),
        _ => (EquipmentStatus::Normal, "None"),
    };
    let record = EquipmentRecord::new(n, unit_name(prefix, n), status).with_alert(alert);
    match kind {
        EquipmentKind::Chiller => record
            .with_reading("temp", format!("{:.1} °C", 7.0 + wobble(n, 2)))
            .with_reading("pressure", format!("{:.1} Bar", 4.0 + wobble(n, 1)))
            .with_reading("power", format!("{:.1} kW", 45.0 + wobble(n, 3)))
            .with_reading("runtime", "1,248 h"),
        EquipmentKind::Ahu => record
            .with_reading("temp", format!("{:.1} °C", 22.0 + wobble(n, 2)))
            .with_reading("pressure", format!("{:.1} Bar", 1.5 + wobble(n, 1)))
            .with_reading("power", format!("{:.1} kW", 10.0 + wobble(n, 5)))
            .with_reading("runtime", "1,248 h"),
        EquipmentKind::Electrical => record
            .with_reading("temp", format!("{:.1} °C", 30.0 + wobble(n, 9)))
            .with_reading("pressure", "N/A")
            .with_reading("power", format!("{:.1} kW", 200.0 + wobble(n, 9)))
            .with_reading("runtime", "Continuous"),
        EquipmentKind::Pump => record
            .with_reading("temp", format!("{:.1} °C", 8.0 + wobble(n, 2)))
            .with_reading("pressure", format!("{:.1} Bar", 3.0 + wobble(n, 1)))
            .with_reading("power", format!("{:.1} kW", 8.0 + wobble(n, 1)))
            .with_reading("runtime", "1,248 h"),
        EquipmentKind::Fire | EquipmentKind::EvCharger => record
            .with_reading("temp", "N/A")
            .with_reading("pressure", "N/A")
            .with_reading("power", "0.5 kW")
            .with_reading("runtime", "Continuous"),
    }
}

/// Fleet used by `--demo` and whenever no feed credential is configured.
pub fn demo_fleet() -> EquipmentFleet {
    let mut fleet = EquipmentFleet::default();
    fleet.replace_category(EquipmentKind::EvCharger, (1..=EV_STATIONS).map(ev_station).collect());

    let plant = [
        (EquipmentKind::Chiller, CHILLERS, Some((3, "Overheat"))),
        (EquipmentKind::Ahu, AHUS, Some((6, "High pressure"))),
        (EquipmentKind::Electrical, ELECTRICALS, None),
        (EquipmentKind::Pump, PUMPS, None),
        (EquipmentKind::Fire, FIRES, Some((8, "Sensor failure"))),
    ];
    for (kind, count, fault_at) in plant {
        let records = (1..=count).map(|n| plant_unit(kind, n, fault_at)).collect();
        fleet.replace_category(kind, records);
    }
    fleet
}

#[cfg(test)]
mod tests {
    use super::demo_fleet;
    use crate::model::EquipmentKind;

    #[test]
    fn demo_fleet_has_expected_sizes_and_faults() {
        let fleet = demo_fleet();
        assert_eq!(fleet.records(EquipmentKind::EvCharger).len(), 30);
        assert_eq!(fleet.records(EquipmentKind::Chiller).len(), 3);
        assert_eq!(fleet.records(EquipmentKind::Ahu).len(), 12);
        assert_eq!(fleet.records(EquipmentKind::Electrical).len(), 8);
        assert_eq!(fleet.records(EquipmentKind::Pump).len(), 6);
        assert_eq!(fleet.records(EquipmentKind::Fire).len(), 15);

        let faulty: Vec<_> = fleet.faulty_equipment().into_iter().map(|u| u.name).collect();
        assert_eq!(faulty, ["Chiller-03", "AHU-06", "Fire-08"]);
    }
}
