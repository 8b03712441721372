// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Drive profiles: which way each side turns and how hard.

use core::fmt;

use crate::config::DriveTuning;
use crate::protocol::Command;

/// Logical drive direction for one side of the chassis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
    /// Both bridge inputs low; the side coasts.
    Neutral,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Forward => "fwd",
            Direction::Reverse => "rev",
            Direction::Neutral => "neutral",
        })
    }
}

/// Direction and duty (0–255) for one side.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SideDrive {
    pub direction: Direction,
    pub duty: u8,
}

impl SideDrive {
    pub const NEUTRAL: Self = Self {
        direction: Direction::Neutral,
        duty: 0,
    };

    pub const fn new(direction: Direction, duty: u8) -> Self {
        Self { direction, duty }
    }
}

/// Output state for both sides.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MotorProfile {
    pub left: SideDrive,
    pub right: SideDrive,
}

impl MotorProfile {
    /// Both sides neutral, zero duty.
    pub const STOP: Self = Self {
        left: SideDrive::NEUTRAL,
        right: SideDrive::NEUTRAL,
    };

    /// Profile for `cmd` under `tuning`.
    pub fn for_command(cmd: Command, tuning: &DriveTuning) -> Self {
        use Direction::{Forward, Reverse};

        match cmd {
            Command::Stop => Self::STOP,
            Command::Forward => Self::both(Forward, tuning.forward_duty),
            Command::Reverse => Self::both(Reverse, tuning.reverse_duty),
            Command::TurnLeft => Self {
                left: SideDrive::new(Reverse, tuning.turn_duty),
                right: SideDrive::new(Forward, tuning.turn_duty),
            },
            Command::TurnRight => Self {
                left: SideDrive::new(Forward, tuning.turn_duty),
                right: SideDrive::new(Reverse, tuning.turn_duty),
            },
        }
    }

    const fn both(direction: Direction, duty: u8) -> Self {
        Self {
            left: SideDrive::new(direction, duty),
            right: SideDrive::new(direction, duty),
        }
    }

    /// Whether either side is being driven.
    pub fn is_moving(&self) -> bool {
        *self != Self::STOP
    }
}

impl Default for MotorProfile {
    fn default() -> Self {
        Self::STOP
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NodeConfig;

    const TUNING: DriveTuning = NodeConfig::DEFAULT.drive;

    #[test]
    fn stop_is_neutral_zero_duty() {
        let p = MotorProfile::for_command(Command::Stop, &TUNING);
        assert_eq!(p, MotorProfile::STOP);
        assert_eq!(p.left, SideDrive::new(Direction::Neutral, 0));
        assert!(!p.is_moving());
    }

    #[test]
    fn straight_line_uses_per_direction_duty() {
        let fwd = MotorProfile::for_command(Command::Forward, &TUNING);
        assert_eq!(fwd.left, SideDrive::new(Direction::Forward, TUNING.forward_duty));
        assert_eq!(fwd.right, fwd.left);

        let rev = MotorProfile::for_command(Command::Reverse, &TUNING);
        assert_eq!(rev.left, SideDrive::new(Direction::Reverse, TUNING.reverse_duty));
        assert_eq!(rev.right, rev.left);
    }

    #[test]
    fn turns_counter_rotate_at_equal_duty() {
        for cmd in [Command::TurnLeft, Command::TurnRight] {
            let p = MotorProfile::for_command(cmd, &TUNING);
            assert_ne!(p.left.direction, p.right.direction);
            assert_eq!(p.left.duty, TUNING.turn_duty);
            assert_eq!(p.right.duty, TUNING.turn_duty);
        }

        let left = MotorProfile::for_command(Command::TurnLeft, &TUNING);
        assert_eq!(left.left.direction, Direction::Reverse);
        assert_eq!(left.right.direction, Direction::Forward);
    }

    #[test]
    fn tuning_is_not_hardcoded() {
        let custom = DriveTuning {
            forward_duty: 255,
            reverse_duty: 10,
            turn_duty: 42,
        };
        assert_eq!(
            MotorProfile::for_command(Command::Forward, &custom).left.duty,
            255
        );
        assert_eq!(
            MotorProfile::for_command(Command::TurnRight, &custom).right.duty,
            42
        );
    }
}
