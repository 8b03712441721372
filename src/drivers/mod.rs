// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific drivers that sit above the raw `hw/` layer and below the
//! application logic. They are written against `embedded-hal` traits so they build and test on the
//! host.
//!
//! ## Existing drivers
//!
//! - [`hcsr04`] – HC-SR04 ultrasonic ranger (trigger/echo, tick-counter timed)
//! - [`hbridge`] – L298N-style dual H-bridge with PWM enables

pub mod hbridge;
pub mod hcsr04;

pub use hbridge::{DualHBridge, HBridge};
pub use hcsr04::Hcsr04;
