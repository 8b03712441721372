// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Node configuration.
//!
//! Everything the core needs as a tunable lives here. Pin and channel assignments are board data
//! and live in `hw::pins` instead.
//!
//! ```
//! use argus_node::config::{BatteryCalibration, NodeConfig};
//!
//! let cfg = NodeConfig::DEFAULT
//!     .with_battery(BatteryCalibration::new(600, 850))
//!     .with_poll_interval_ms(50);
//! ```

/// Raw ADC readings that correspond to an empty and a full battery.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BatteryCalibration {
    pub raw_empty: u16,
    pub raw_full: u16,
}

impl BatteryCalibration {
    pub const fn new(raw_empty: u16, raw_full: u16) -> Self {
        Self {
            raw_empty,
            raw_full,
        }
    }
}

/// Duty cycles (0–255) for each drive command.
///
/// Forward and reverse are tuned separately because the gearboxes do not behave the same in both
/// directions. Turns spin the sides against each other at `turn_duty`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DriveTuning {
    pub forward_duty: u8,
    pub reverse_duty: u8,
    pub turn_duty: u8,
}

/// Full node configuration, loaded once at startup.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NodeConfig {
    pub battery: BatteryCalibration,
    pub drive: DriveTuning,
    /// Delay between poll iterations.
    pub poll_interval_ms: u32,
    /// Longest wait for the echo before the reading is reported as 0 cm.
    pub echo_timeout_us: u32,
    /// Width of the high trigger pulse.
    pub trigger_pulse_us: u32,
}

impl NodeConfig {
    /// Defaults for the 2S pack on the divider into a 12-bit ADC.
    pub const DEFAULT: Self = Self {
        battery: BatteryCalibration::new(2480, 3470),
        drive: DriveTuning {
            forward_duty: 200,
            reverse_duty: 180,
            turn_duty: 150,
        },
        poll_interval_ms: 100,
        echo_timeout_us: 25_000,
        trigger_pulse_us: 10,
    };

    /// Replace the battery calibration pair.
    pub const fn with_battery(mut self, battery: BatteryCalibration) -> Self {
        self.battery = battery;
        self
    }

    /// Replace the drive duty table.
    pub const fn with_drive(mut self, drive: DriveTuning) -> Self {
        self.drive = drive;
        self
    }

    /// Set the delay between poll iterations.
    pub const fn with_poll_interval_ms(mut self, ms: u32) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Set the echo timeout.
    pub const fn with_echo_timeout_us(mut self, us: u32) -> Self {
        self.echo_timeout_us = us;
        self
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
