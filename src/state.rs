// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! State shared between the bus interrupt and the poll loop.
//!
//! Nothing here takes a lock. The bus handler is the only producer of commands and the only reader
//! of telemetry; the poll loop is the only consumer of commands and the only writer of telemetry.
//!
//! - [`CommandLatch`] is a single byte. A new command overwrites whatever is still pending.
//! - [`TelemetryCell`] stores distance and battery in two separate atomics. A telemetry request
//!   that preempts the sampler between the two stores sees a new distance with the previous
//!   battery level. That mix is accepted: each field is valid on its own and the next request
//!   sees a consistent pair.

use core::sync::atomic::{AtomicI16, AtomicU8, Ordering};

use crate::protocol::messages::{Command, NO_OP};

/// Most recent sensor readings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TelemetrySnapshot {
    /// Centimeters to the nearest obstacle, 0 when no echo came back.
    pub distance_cm: i16,
    /// Battery charge, 0–100 %.
    pub battery_pct: u8,
}

/// Single-slot, last-write-wins command storage.
pub struct CommandLatch {
    code: AtomicU8,
}

impl CommandLatch {
    pub const fn new() -> Self {
        Self {
            code: AtomicU8::new(NO_OP),
        }
    }

    /// Latch a byte received from the bus. Unknown codes latch as no-op, so an unknown byte still
    /// replaces an unconsumed command.
    pub fn post(&self, byte: u8) {
        let code = match Command::from_code(byte) {
            Some(cmd) => cmd.code(),
            None => NO_OP,
        };
        self.code.store(code, Ordering::Release);
    }

    /// Raw latch contents: a command code or [`NO_OP`].
    #[inline]
    pub fn raw(&self) -> u8 {
        self.code.load(Ordering::Acquire)
    }

    /// Pending command, if any.
    #[inline]
    pub fn peek(&self) -> Option<Command> {
        Command::from_code(self.raw())
    }

    /// Reset the latch to no-op after `seen` has been executed.
    ///
    /// Only clears if the latch still holds `seen`. A command posted by the bus after `seen` was
    /// read stays pending for the next iteration. Returns whether the latch was cleared.
    pub fn consume(&self, seen: u8) -> bool {
        self.code
            .compare_exchange(seen, NO_OP, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl Default for CommandLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Telemetry fields, each individually atomic.
pub struct TelemetryCell {
    distance_cm: AtomicI16,
    battery_pct: AtomicU8,
}

impl TelemetryCell {
    pub const fn new() -> Self {
        Self {
            distance_cm: AtomicI16::new(0),
            battery_pct: AtomicU8::new(0),
        }
    }

    /// Overwrite both fields. Distance is written first.
    pub fn store(&self, snapshot: TelemetrySnapshot) {
        self.distance_cm
            .store(snapshot.distance_cm, Ordering::Relaxed);
        self.battery_pct
            .store(snapshot.battery_pct, Ordering::Relaxed);
    }

    /// Read both fields. See the module docs for the torn-read tolerance.
    pub fn load(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            distance_cm: self.distance_cm.load(Ordering::Relaxed),
            battery_pct: self.battery_pct.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything both execution contexts touch. Lives in a `static` on target.
pub struct SharedState {
    pub command: CommandLatch,
    pub telemetry: TelemetryCell,
}

impl SharedState {
    pub const fn new() -> Self {
        Self {
            command: CommandLatch::new(),
            telemetry: TelemetryCell::new(),
        }
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
