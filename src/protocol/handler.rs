// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Node-side bus protocol handler.
//!
//! [`Responder`] is the byte-level state machine: feed it the byte received on each completed
//! exchange and it returns the byte to stage for the next one. [`BusHandler`] drives a
//! [`BusPort`] from the receive interrupt, spinning on the port between telemetry stages so the
//! whole reply goes out inside one interrupt.
//!
//! Bytes clocked in while a telemetry reply is streaming are filler and never reach the command
//! latch. If the controller releases chip-select mid-reply, the bytes already staged are all it
//! gets: the reply is dropped, nothing is resent, and the next transaction starts from idle.

use crate::protocol::frame::{pack_telemetry, TELEMETRY_LEN};
use crate::protocol::messages::{ACK, MSG_TELEMETRY_REQUEST};
use crate::state::SharedState;

/// Byte-synchronous slave bus.
pub trait BusPort {
    /// Load the byte shifted out on the next exchange.
    fn stage(&mut self, byte: u8);

    /// Spin until the in-flight exchange completes and return the byte clocked in.
    ///
    /// Returns `None` if the controller ended the transaction instead. The port should discard
    /// anything still queued for transmit before returning.
    fn wait_exchange(&mut self) -> Option<u8>;
}

/// Which reply byte is currently staged.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Waiting for a command or telemetry request. The ack is staged.
    Idle,
    DistanceHigh,
    DistanceLow,
    Battery,
}

pub struct Responder {
    stage: Stage,
    frame: [u8; TELEMETRY_LEN],
}

impl Responder {
    pub const fn new() -> Self {
        Self {
            stage: Stage::Idle,
            frame: [0; TELEMETRY_LEN],
        }
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[inline]
    pub fn is_streaming(&self) -> bool {
        self.stage != Stage::Idle
    }

    /// Handle the byte received on a completed exchange. Returns the byte to stage next.
    pub fn exchange(&mut self, received: u8, shared: &SharedState) -> u8 {
        match self.stage {
            Stage::Idle => {
                if received == MSG_TELEMETRY_REQUEST {
                    // Snapshot now so all three bytes describe the same reading.
                    self.frame = pack_telemetry(shared.telemetry.load());
                    self.stage = Stage::DistanceHigh;
                    self.frame[0]
                } else {
                    shared.command.post(received);
                    ACK
                }
            }
            Stage::DistanceHigh => {
                self.stage = Stage::DistanceLow;
                self.frame[1]
            }
            Stage::DistanceLow => {
                self.stage = Stage::Battery;
                self.frame[2]
            }
            Stage::Battery => {
                self.stage = Stage::Idle;
                ACK
            }
        }
    }

    /// Drop any reply in progress.
    pub fn abort(&mut self) {
        self.stage = Stage::Idle;
    }
}

impl Default for Responder {
    fn default() -> Self {
        Self::new()
    }
}

/// Receive-interrupt entry point.
pub struct BusHandler<'a> {
    shared: &'a SharedState,
    responder: Responder,
}

impl<'a> BusHandler<'a> {
    pub const fn new(shared: &'a SharedState) -> Self {
        Self {
            shared,
            responder: Responder::new(),
        }
    }

    /// Handle one inbound byte. Returns once the reply for it has been fully staged.
    pub fn on_byte<P: BusPort>(&mut self, byte: u8, port: &mut P) {
        let reply = self.responder.exchange(byte, self.shared);
        port.stage(reply);

        while self.responder.is_streaming() {
            let reply = match port.wait_exchange() {
                Some(filler) => self.responder.exchange(filler, self.shared),
                None => {
                    self.responder.abort();
                    ACK
                }
            };
            port.stage(reply);
        }
    }

    pub fn responder(&self) -> &Responder {
        &self.responder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::frame::{decode_telemetry_transfer, unpack_telemetry, FILLER};
    use crate::protocol::messages::{Command, MSG_FORWARD, MSG_STOP, MSG_TURN_LEFT};
    use crate::state::TelemetrySnapshot;
    use std::collections::VecDeque;
    use std::vec::Vec;

    /// Records staged bytes and feeds filler on every wait, up to `clocked` exchanges.
    struct MockPort {
        staged: Vec<u8>,
        waits: usize,
        clocked: usize,
    }

    impl MockPort {
        fn new() -> Self {
            Self::cut_after(usize::MAX)
        }

        fn cut_after(clocked: usize) -> Self {
            Self {
                staged: Vec::new(),
                waits: 0,
                clocked,
            }
        }
    }

    impl BusPort for MockPort {
        fn stage(&mut self, byte: u8) {
            self.staged.push(byte);
        }

        fn wait_exchange(&mut self) -> Option<u8> {
            self.waits += 1;
            (self.waits <= self.clocked).then_some(FILLER)
        }
    }

    /// Models the slave TX FIFO: staged bytes queue up and go out one per exchange. A deselect
    /// empties the queue, as the SPI reset does on target.
    struct FifoPort {
        tx: VecDeque<u8>,
        sent: Vec<u8>,
        clocked: usize,
    }

    impl FifoPort {
        fn new(clocked: usize) -> Self {
            Self {
                tx: VecDeque::from([ACK]),
                sent: Vec::new(),
                clocked,
            }
        }

        /// One exchange started by the controller.
        fn clock(&mut self, mosi: u8) -> u8 {
            self.sent.push(self.tx.pop_front().unwrap_or(FILLER));
            mosi
        }
    }

    impl BusPort for FifoPort {
        fn stage(&mut self, byte: u8) {
            self.tx.push_back(byte);
        }

        fn wait_exchange(&mut self) -> Option<u8> {
            if self.clocked == 0 {
                self.tx.clear();
                return None;
            }
            self.clocked -= 1;
            Some(self.clock(FILLER))
        }
    }

    fn shared_with(distance_cm: i16, battery_pct: u8) -> SharedState {
        let shared = SharedState::new();
        shared.telemetry.store(TelemetrySnapshot {
            distance_cm,
            battery_pct,
        });
        shared
    }

    #[test]
    fn command_byte_is_latched_and_acked() {
        let shared = SharedState::new();
        let mut handler = BusHandler::new(&shared);
        let mut port = MockPort::new();

        handler.on_byte(MSG_FORWARD, &mut port);

        assert_eq!(port.staged, [ACK]);
        assert_eq!(port.waits, 0);
        assert_eq!(shared.command.peek(), Some(Command::Forward));
    }

    #[test]
    fn unknown_byte_is_acked_as_no_op() {
        let shared = SharedState::new();
        let mut handler = BusHandler::new(&shared);
        let mut port = MockPort::new();

        handler.on_byte(MSG_FORWARD, &mut port);
        handler.on_byte(0x99, &mut port);

        assert_eq!(port.staged, [ACK, ACK]);
        assert_eq!(shared.command.peek(), None);
    }

    #[test]
    fn telemetry_request_streams_three_bytes() {
        let shared = shared_with(0x0123, 64);
        let mut handler = BusHandler::new(&shared);
        let mut port = MockPort::new();

        handler.on_byte(MSG_TELEMETRY_REQUEST, &mut port);

        assert_eq!(port.waits, 3);
        assert_eq!(port.staged.len(), 4);
        let reply = [port.staged[0], port.staged[1], port.staged[2]];
        assert_eq!(i16::from_be_bytes([reply[0], reply[1]]), 0x0123);
        assert_eq!(reply[2], 64);
        assert_eq!(unpack_telemetry(reply), shared.telemetry.load());
        // back to idle with the ack staged for the next command
        assert_eq!(port.staged[3], ACK);
        assert_eq!(handler.responder().stage(), Stage::Idle);
    }

    #[test]
    fn filler_bytes_never_latch_stop() {
        let shared = shared_with(50, 90);
        shared.command.post(MSG_TURN_LEFT);
        let mut handler = BusHandler::new(&shared);
        let mut port = MockPort::new();

        // filler is 0x00, which is also the STOP code
        assert_eq!(FILLER, MSG_STOP);
        handler.on_byte(MSG_TELEMETRY_REQUEST, &mut port);

        assert_eq!(shared.command.peek(), Some(Command::TurnLeft));
    }

    #[test]
    fn reply_uses_snapshot_taken_at_request() {
        let shared = shared_with(100, 50);
        let mut responder = Responder::new();

        let hi = responder.exchange(MSG_TELEMETRY_REQUEST, &shared);
        // sampler overwrites telemetry mid-reply
        shared.telemetry.store(TelemetrySnapshot {
            distance_cm: 7,
            battery_pct: 1,
        });
        let lo = responder.exchange(FILLER, &shared);
        let batt = responder.exchange(FILLER, &shared);

        assert_eq!(unpack_telemetry([hi, lo, batt]).distance_cm, 100);
        assert_eq!(batt, 50);
    }

    #[test]
    fn state_machine_walks_all_stages() {
        let shared = shared_with(1, 2);
        let mut responder = Responder::new();

        assert_eq!(responder.stage(), Stage::Idle);
        responder.exchange(MSG_TELEMETRY_REQUEST, &shared);
        assert_eq!(responder.stage(), Stage::DistanceHigh);
        responder.exchange(FILLER, &shared);
        assert_eq!(responder.stage(), Stage::DistanceLow);
        responder.exchange(FILLER, &shared);
        assert_eq!(responder.stage(), Stage::Battery);
        assert_eq!(responder.exchange(FILLER, &shared), ACK);
        assert_eq!(responder.stage(), Stage::Idle);
    }

    #[test]
    fn deselect_mid_reply_drops_the_rest() {
        let shared = shared_with(0x0A0B, 33);
        let mut handler = BusHandler::new(&shared);
        let mut port = MockPort::cut_after(1);

        handler.on_byte(MSG_TELEMETRY_REQUEST, &mut port);

        // distance-high and distance-low were staged, battery never was
        assert_eq!(port.staged, [0x0A, 0x0B, ACK]);
        assert_eq!(handler.responder().stage(), Stage::Idle);

        let mut port = MockPort::new();
        handler.on_byte(MSG_FORWARD, &mut port);
        assert_eq!(shared.command.peek(), Some(Command::Forward));
    }

    #[test]
    fn deselect_leaves_only_the_ack_queued() {
        let shared = shared_with(0x0A0B, 33);
        let mut handler = BusHandler::new(&shared);
        let mut port = FifoPort::new(1);

        let byte = port.clock(MSG_TELEMETRY_REQUEST);
        handler.on_byte(byte, &mut port);
        assert_eq!(port.tx, [ACK]);

        // the next command gets the ack, not the dropped distance-low byte
        let byte = port.clock(MSG_FORWARD);
        handler.on_byte(byte, &mut port);
        assert_eq!(port.sent, [ACK, 0x0A, ACK]);
        assert_eq!(port.tx, [ACK]);
        assert_eq!(shared.command.peek(), Some(Command::Forward));

        // and a full telemetry read afterwards is framed correctly
        let mut port = FifoPort { clocked: 3, ..port };
        port.sent.clear();
        let byte = port.clock(MSG_TELEMETRY_REQUEST);
        handler.on_byte(byte, &mut port);
        assert_eq!(
            decode_telemetry_transfer(&port.sent),
            Some(TelemetrySnapshot {
                distance_cm: 0x0A0B,
                battery_pct: 33,
            })
        );
    }

    #[test]
    fn abort_mid_reply_resumes_command_framing() {
        let shared = shared_with(1, 2);
        let mut responder = Responder::new();

        responder.exchange(MSG_TELEMETRY_REQUEST, &shared);
        responder.exchange(FILLER, &shared);
        responder.abort();

        assert_eq!(responder.exchange(MSG_FORWARD, &shared), ACK);
        assert_eq!(shared.command.peek(), Some(Command::Forward));
    }
}
