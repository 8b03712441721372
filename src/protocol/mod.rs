// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

pub mod frame;
pub mod handler;
pub mod messages;

pub use frame::{
    command_transfer, decode_telemetry_transfer, pack_telemetry, telemetry_transfer,
    unpack_telemetry,
};
pub use handler::{BusHandler, BusPort, Responder, Stage};
pub use messages::Command;
