// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command executor: turns latched command codes into motor outputs.
//!
//! The executor starts in STOP and drives that profile to the outputs on construction. A code
//! outside the command table leaves the outputs exactly as they were; only STOP stops.

use crate::config::DriveTuning;
use crate::motors::profile::MotorProfile;
use crate::protocol::Command;

/// Something that can put a [`MotorProfile`] on the motor driver pins.
pub trait DriveOutputs {
    fn set_profile(&mut self, profile: &MotorProfile);
}

pub struct Executor<O> {
    outputs: O,
    tuning: DriveTuning,
    current: MotorProfile,
}

impl<O: DriveOutputs> Executor<O> {
    /// Take ownership of the outputs and force them to STOP.
    pub fn new(mut outputs: O, tuning: DriveTuning) -> Self {
        outputs.set_profile(&MotorProfile::STOP);
        Self {
            outputs,
            tuning,
            current: MotorProfile::STOP,
        }
    }

    /// Apply a raw command code. Returns the command if it was recognized.
    pub fn apply(&mut self, code: u8) -> Option<Command> {
        let cmd = Command::from_code(code)?;
        self.apply_command(cmd);
        Some(cmd)
    }

    pub fn apply_command(&mut self, cmd: Command) {
        let profile = MotorProfile::for_command(cmd, &self.tuning);
        self.outputs.set_profile(&profile);
        self.current = profile;
    }

    /// Convenience for `apply_command(Command::Stop)`.
    #[inline]
    pub fn stop(&mut self) {
        self.apply_command(Command::Stop);
    }

    /// Profile last written to the outputs.
    #[inline]
    pub fn profile(&self) -> MotorProfile {
        self.current
    }

    pub fn outputs(&self) -> &O {
        &self.outputs
    }
}
