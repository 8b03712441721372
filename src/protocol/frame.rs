// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Telemetry wire format and controller-side transfer layouts.
//!
//! Telemetry is three bytes, independent of any in-memory layout:
//!
//! | Byte | Content |
//! | ---- | ------- |
//! | 0 | distance, bits 15..8 (signed 16-bit cm, big-endian) |
//! | 1 | distance, bits 7..0 |
//! | 2 | battery percent (0–100) |
//!
//! The node replies to the request byte itself with whatever was staged before it (the ack), so a
//! controller clocks four bytes for one telemetry read and drops the first response byte.

use crate::protocol::messages::{Command, MSG_TELEMETRY_REQUEST};
use crate::state::TelemetrySnapshot;

/// Telemetry reply length in bytes.
pub const TELEMETRY_LEN: usize = 3;

/// Bytes a controller clocks for one telemetry read: the request plus one filler per reply byte.
pub const TELEMETRY_TRANSFER_LEN: usize = TELEMETRY_LEN + 1;

/// Filler clocked by the controller while the node streams telemetry.
pub const FILLER: u8 = 0x00;

/// Encode a snapshot into its 3-byte wire form.
pub fn pack_telemetry(snapshot: TelemetrySnapshot) -> [u8; TELEMETRY_LEN] {
    let [hi, lo] = snapshot.distance_cm.to_be_bytes();
    [hi, lo, snapshot.battery_pct]
}

/// Decode the 3-byte wire form.
pub fn unpack_telemetry(bytes: [u8; TELEMETRY_LEN]) -> TelemetrySnapshot {
    TelemetrySnapshot {
        distance_cm: i16::from_be_bytes([bytes[0], bytes[1]]),
        battery_pct: bytes[2],
    }
}

/// Controller side: the single-byte transfer that latches `cmd`.
pub const fn command_transfer(cmd: Command) -> [u8; 1] {
    [cmd.code()]
}

/// Controller side: the transfer that reads one telemetry snapshot.
pub const fn telemetry_transfer() -> [u8; TELEMETRY_TRANSFER_LEN] {
    [MSG_TELEMETRY_REQUEST, FILLER, FILLER, FILLER]
}

/// Controller side: decode the bytes received during a [`telemetry_transfer`].
///
/// Returns `None` if the transfer was cut short.
pub fn decode_telemetry_transfer(response: &[u8]) -> Option<TelemetrySnapshot> {
    match response {
        [_ack, hi, lo, batt] => Some(unpack_telemetry([*hi, *lo, *batt])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::messages::ACK;

    #[test]
    fn distance_is_big_endian() {
        let snap = TelemetrySnapshot {
            distance_cm: 0x0132,
            battery_pct: 90,
        };
        assert_eq!(pack_telemetry(snap), [0x01, 0x32, 90]);
    }

    #[test]
    fn negative_distance_keeps_sign_bits() {
        let snap = TelemetrySnapshot {
            distance_cm: -2,
            battery_pct: 0,
        };
        let bytes = pack_telemetry(snap);
        assert_eq!(bytes, [0xFF, 0xFE, 0]);
        assert_eq!(unpack_telemetry(bytes), snap);
    }

    #[test]
    fn telemetry_transfer_layout() {
        assert_eq!(telemetry_transfer(), [0x10, 0x00, 0x00, 0x00]);
        assert_eq!(command_transfer(Command::TurnRight), [0x04]);
    }

    #[test]
    fn decode_skips_the_ack_byte() {
        let resp = [ACK, 0x00, 0x32, 0x5A];
        assert_eq!(
            decode_telemetry_transfer(&resp),
            Some(TelemetrySnapshot {
                distance_cm: 50,
                battery_pct: 90,
            })
        );
    }

    #[test]
    fn decode_rejects_short_transfers() {
        assert_eq!(decode_telemetry_transfer(&[ACK, 0x00, 0x32]), None);
        assert_eq!(decode_telemetry_transfer(&[]), None);
    }
}
