// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Battery level from a divided-down pack voltage.

use crate::config::BatteryCalibration;

/// Linear raw-ADC → percent map between the calibrated empty and full readings.
#[derive(Copy, Clone, Debug)]
pub struct BatteryGauge {
    cal: BatteryCalibration,
}

impl BatteryGauge {
    pub const fn new(cal: BatteryCalibration) -> Self {
        Self { cal }
    }

    /// Map a raw reading to 0–100 %. A calibration with `raw_full <= raw_empty` reads 0 %.
    pub fn percent(&self, raw: u16) -> u8 {
        let empty = self.cal.raw_empty as i32;
        let full = self.cal.raw_full as i32;
        if full <= empty {
            return 0;
        }

        let pct = (raw as i32 - empty) * 100 / (full - empty);
        pct.clamp(0, 100) as u8
    }
}
