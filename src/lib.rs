// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Argus Node Firmware
//!
//! Firmware for the Argus mobile robot node, written in Rust, targeting an STM32F777 MCU. The node
//! is an SPI slave to a host controller: it takes single-byte drive commands, answers telemetry
//! requests with the latest range and battery readings, and runs a fixed-rate poll loop that
//! samples sensors and drives two H-bridge channels.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`protocol`] | Bus messages, telemetry framing, and the interrupt-side responder |
//! | [`state`] | Lock-free command latch and telemetry shared between interrupt and loop |
//! | [`sensors`] | Ranging math, battery gauge, and the per-cycle sampler |
//! | [`motors`] | Command-to-drive mapping and the executor |
//! | [`control`] | The poll loop |
//! | [`drivers`] | Device-level drivers (HC-SR04, dual H-bridge) |
//! | [`config`] | Calibration and timing constants |
//! | `hw` | MCU-level wrappers around USART, SPI, ADC, LEDs, and pins (target only) |
//!
//! Everything except `hw` builds on the host, so `cargo test` runs there.
//!
//! ## Getting Started
//!
//! Build docs:
//!
//! ```bash
//! cargo doc --no-deps --open
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![no_std]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod control;
pub mod drivers;
pub mod motors;
pub mod protocol;
pub mod sensors;
pub mod state;

#[cfg(target_os = "none")]
pub mod hw;
