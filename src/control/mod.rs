// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control
//!
//! The node's background task.
//!
//! ## Modules
//!
//! - [`poll_loop`] - Sample, apply latched command, clear latch, sleep, repeat.

pub mod poll_loop;

pub use poll_loop::{CycleReport, PollLoop};
