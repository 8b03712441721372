// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Cooperative poll loop that owns sensing and actuation.
//!
//! Each iteration samples the sensors into shared telemetry, applies whatever command the bus
//! handler latched, then clears the latch. The bus interrupt can fire at any point in between.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! let mut poll = PollLoop::new(sampler, executor, &SHARED, &cfg);
//!
//! poll.run(|ms| delay.delay_ms(ms), |report| {
//!     let _ = writeln!(usart, "{}\r", report);
//! });
//! ```

use core::fmt;

use crate::config::NodeConfig;
use crate::motors::{DriveOutputs, Executor, MotorProfile};
use crate::protocol::Command;
use crate::sensors::{RangeSensor, Sampler};
use crate::state::{SharedState, TelemetrySnapshot};

/// What happened during one iteration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CycleReport {
    pub snapshot: TelemetrySnapshot,
    /// Command applied this iteration, `None` if the latch was empty.
    pub applied: Option<Command>,
    /// Profile on the outputs after this iteration.
    pub profile: MotorProfile,
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.applied {
            Some(cmd) => write!(f, "cmd={}", cmd)?,
            None => f.write_str("cmd=-")?,
        }
        write!(
            f,
            " dist={}cm batt={}% L={}/{} R={}/{}",
            self.snapshot.distance_cm,
            self.snapshot.battery_pct,
            self.profile.left.direction,
            self.profile.left.duty,
            self.profile.right.direction,
            self.profile.right.duty,
        )
    }
}

pub struct PollLoop<'a, R, ReadBattery, O> {
    sampler: Sampler<R, ReadBattery>,
    executor: Executor<O>,
    shared: &'a SharedState,
    interval_ms: u32,
}

impl<'a, R, ReadBattery, O> PollLoop<'a, R, ReadBattery, O>
where
    R: RangeSensor,
    ReadBattery: FnMut() -> u16,
    O: DriveOutputs,
{
    pub fn new(
        sampler: Sampler<R, ReadBattery>,
        executor: Executor<O>,
        shared: &'a SharedState,
        cfg: &NodeConfig,
    ) -> Self {
        Self {
            sampler,
            executor,
            shared,
            interval_ms: cfg.poll_interval_ms,
        }
    }

    /// Run one iteration without sleeping.
    pub fn step(&mut self) -> CycleReport {
        let snapshot = self.sampler.sample();
        self.shared.telemetry.store(snapshot);

        let seen = self.shared.command.raw();
        let applied = self.executor.apply(seen);
        // Cleared only after execution. A newer byte latched since `seen` was read survives.
        self.shared.command.consume(seen);

        CycleReport {
            snapshot,
            applied,
            profile: self.executor.profile(),
        }
    }

    /// Run forever, sleeping the configured interval between iterations.
    pub fn run<Sleep, Report>(&mut self, mut sleep_ms: Sleep, mut report: Report) -> !
    where
        Sleep: FnMut(u32),
        Report: FnMut(&CycleReport),
    {
        loop {
            let cycle = self.step();
            report(&cycle);
            sleep_ms(self.interval_ms);
        }
    }

    pub fn executor(&self) -> &Executor<O> {
        &self.executor
    }
}
