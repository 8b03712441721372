// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Drive Abstractions
//!
//! This module sits above the motor driver in `drivers` and decides what the two drive sides should
//! be doing for each command.
//!
//! ## Modules
//!
//! - [`profile`] - Per-command direction/duty table.
//! - [`executor`] - Applies latched command codes to a `DriveOutputs` implementation.

pub mod executor;
pub mod profile;

pub use executor::{DriveOutputs, Executor};
pub use profile::{Direction, MotorProfile, SideDrive};
