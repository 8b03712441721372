// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Wire codes for the controller ↔ node bus protocol.
//!
//! Every exchange is one byte in, one byte out. Command bytes are acknowledged with [`ACK`];
//! [`MSG_TELEMETRY_REQUEST`] starts a three-exchange telemetry reply instead.

use core::fmt;

/// Response byte staged for every command exchange.
pub const ACK: u8 = 0xFF;

// Message IDs
pub const MSG_STOP: u8 = 0x00;
pub const MSG_FORWARD: u8 = 0x01;
pub const MSG_REVERSE: u8 = 0x02;
pub const MSG_TURN_LEFT: u8 = 0x03;
pub const MSG_TURN_RIGHT: u8 = 0x04;
pub const MSG_TELEMETRY_REQUEST: u8 = 0x10;

/// Latch value meaning "nothing pending". Not a valid command on the wire.
pub const NO_OP: u8 = 0xFF;

/// Drive commands the controller can latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Stop,
    Forward,
    Reverse,
    TurnLeft,
    TurnRight,
}

impl Command {
    pub const ALL: [Command; 5] = [
        Command::Stop,
        Command::Forward,
        Command::Reverse,
        Command::TurnLeft,
        Command::TurnRight,
    ];

    /// Decode a command byte. Anything outside the command table (including the telemetry
    /// request) is `None`.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            MSG_STOP => Some(Command::Stop),
            MSG_FORWARD => Some(Command::Forward),
            MSG_REVERSE => Some(Command::Reverse),
            MSG_TURN_LEFT => Some(Command::TurnLeft),
            MSG_TURN_RIGHT => Some(Command::TurnRight),
            _ => None,
        }
    }

    pub const fn code(self) -> u8 {
        match self {
            Command::Stop => MSG_STOP,
            Command::Forward => MSG_FORWARD,
            Command::Reverse => MSG_REVERSE,
            Command::TurnLeft => MSG_TURN_LEFT,
            Command::TurnRight => MSG_TURN_RIGHT,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::Stop => "STOP",
            Command::Forward => "FORWARD",
            Command::Reverse => "REVERSE",
            Command::TurnLeft => "TURN_LEFT",
            Command::TurnRight => "TURN_RIGHT",
        };
        f.write_str(name)
    }
}
