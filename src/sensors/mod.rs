// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Sensors
//!
//! Hardware-independent sensor logic. The actual pins and timers sit behind [`RangeSensor`] and a
//! raw-ADC closure so the math can run on the host.
//!
//! ## Modules
//!
//! - [`range`] - Echo time → distance conversion and the `RangeSensor` trait.
//! - [`battery`] - Raw ADC → percent battery gauge.
//! - [`sampler`] - Takes one telemetry snapshot per call.

pub mod battery;
pub mod range;
pub mod sampler;

pub use battery::BatteryGauge;
pub use range::{echo_to_cm, RangeSensor};
pub use sampler::Sampler;
