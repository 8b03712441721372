// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! One-shot sampling of every sensor the node reports.

use crate::config::NodeConfig;
use crate::sensors::battery::BatteryGauge;
use crate::sensors::range::{measure_cm, RangeSensor};
use crate::state::TelemetrySnapshot;

/// Samples distance and battery into a [`TelemetrySnapshot`].
///
/// `ReadBattery` is a closure that returns the raw ADC reading of the battery divider, e.g. one
/// built with `Adc::make_reader`.
pub struct Sampler<R, ReadBattery> {
    range: R,
    read_battery: ReadBattery,
    gauge: BatteryGauge,
    echo_timeout_us: u32,
}

impl<R, ReadBattery> Sampler<R, ReadBattery>
where
    R: RangeSensor,
    ReadBattery: FnMut() -> u16,
{
    pub fn new(range: R, read_battery: ReadBattery, cfg: &NodeConfig) -> Self {
        Self {
            range,
            read_battery,
            gauge: BatteryGauge::new(cfg.battery),
            echo_timeout_us: cfg.echo_timeout_us,
        }
    }

    /// Take one reading of each sensor. Blocks for at most the echo timeout plus one ADC
    /// conversion.
    pub fn sample(&mut self) -> TelemetrySnapshot {
        let distance_cm = measure_cm(&mut self.range, self.echo_timeout_us);
        let raw = (self.read_battery)();

        TelemetrySnapshot {
            distance_cm,
            battery_pct: self.gauge.percent(raw),
        }
    }

    /// Access the range sensor.
    pub fn range(&mut self) -> &mut R {
        &mut self.range
    }
}
