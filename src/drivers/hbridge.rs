// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Dual-channel H-bridge (L298N-style) drive for the two chassis sides.
//!
//! Each channel has two direction inputs and a PWM enable:
//!
//! | IN1 | IN2 | Bridge |
//! | --- | --- | ------ |
//! | H | L | forward |
//! | L | H | reverse |
//! | L | L | coast (neutral) |
//!
//! Duty is given as 0–255 and scaled onto the timer's full range.

use embedded_hal::digital::v2::OutputPin;
use embedded_hal::PwmPin;

use crate::motors::{Direction, DriveOutputs, MotorProfile, SideDrive};

/// One bridge channel.
pub struct HBridge<In1, In2, En> {
    in1: In1,
    in2: In2,
    en: En,
    inverted: bool,
}

impl<In1, In2, En> HBridge<In1, In2, En>
where
    In1: OutputPin,
    In2: OutputPin,
    En: PwmPin<Duty = u16>,
{
    /// Construct a channel in coast with zero duty.
    pub fn new(in1: In1, in2: In2, mut en: En) -> Self {
        en.set_duty(0);
        en.enable();

        let mut bridge = Self {
            in1,
            in2,
            en,
            inverted: false,
        };
        bridge.set_direction(Direction::Neutral);
        bridge
    }

    /// Swap forward/reverse for a motor mounted mirrored.
    pub fn inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    pub fn set_direction(&mut self, dir: Direction) {
        let dir = match (dir, self.inverted) {
            (Direction::Forward, true) => Direction::Reverse,
            (Direction::Reverse, true) => Direction::Forward,
            (d, _) => d,
        };

        match dir {
            Direction::Forward => {
                self.in1.set_high().ok();
                self.in2.set_low().ok();
            }
            Direction::Reverse => {
                self.in1.set_low().ok();
                self.in2.set_high().ok();
            }
            Direction::Neutral => {
                self.in1.set_low().ok();
                self.in2.set_low().ok();
            }
        }
    }

    /// Set the enable duty from a 0–255 value.
    pub fn set_duty(&mut self, duty: u8) {
        let max = self.en.get_max_duty() as u32;
        let scaled = (duty as u32 * max) / u8::MAX as u32;
        self.en.set_duty(scaled as u16);
    }

    /// Apply direction and duty together. Duty is zeroed before a direction change so the bridge
    /// never flips polarity at speed.
    pub fn drive(&mut self, side: SideDrive) {
        self.en.set_duty(0);
        self.set_direction(side.direction);
        if side.direction != Direction::Neutral {
            self.set_duty(side.duty);
        }
    }
}

/// Left and right channels driven together.
pub struct DualHBridge<Left, Right> {
    pub left: Left,
    pub right: Right,
}

impl<L1, L2, LEn, R1, R2, REn> DualHBridge<HBridge<L1, L2, LEn>, HBridge<R1, R2, REn>>
where
    L1: OutputPin,
    L2: OutputPin,
    LEn: PwmPin<Duty = u16>,
    R1: OutputPin,
    R2: OutputPin,
    REn: PwmPin<Duty = u16>,
{
    pub fn new(left: HBridge<L1, L2, LEn>, right: HBridge<R1, R2, REn>) -> Self {
        Self { left, right }
    }
}

impl<L1, L2, LEn, R1, R2, REn> DriveOutputs
    for DualHBridge<HBridge<L1, L2, LEn>, HBridge<R1, R2, REn>>
where
    L1: OutputPin,
    L2: OutputPin,
    LEn: PwmPin<Duty = u16>,
    R1: OutputPin,
    R2: OutputPin,
    REn: PwmPin<Duty = u16>,
{
    fn set_profile(&mut self, profile: &MotorProfile) {
        self.left.drive(profile.left);
        self.right.drive(profile.right);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    #[derive(Default)]
    struct Pin {
        high: bool,
    }

    impl OutputPin for Pin {
        type Error = Infallible;

        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    struct Pwm {
        duty: u16,
        max: u16,
        enabled: bool,
    }

    impl Pwm {
        fn new(max: u16) -> Self {
            Self {
                duty: 0xBEEF,
                max,
                enabled: false,
            }
        }
    }

    impl PwmPin for Pwm {
        type Duty = u16;

        fn disable(&mut self) {
            self.enabled = false;
        }

        fn enable(&mut self) {
            self.enabled = true;
        }

        fn get_duty(&self) -> u16 {
            self.duty
        }

        fn get_max_duty(&self) -> u16 {
            self.max
        }

        fn set_duty(&mut self, duty: u16) {
            self.duty = duty;
        }
    }

    fn bridge() -> HBridge<Pin, Pin, Pwm> {
        HBridge::new(Pin::default(), Pin::default(), Pwm::new(1000))
    }

    fn pins(b: &HBridge<Pin, Pin, Pwm>) -> (bool, bool, u16) {
        (b.in1.high, b.in2.high, b.en.duty)
    }

    #[test]
    fn starts_coasting_with_zero_duty() {
        let b = bridge();
        assert_eq!(pins(&b), (false, false, 0));
        assert!(b.en.enabled);
    }

    #[test]
    fn direction_truth_table() {
        let mut b = bridge();
        b.drive(SideDrive::new(Direction::Forward, 255));
        assert_eq!(pins(&b), (true, false, 1000));

        b.drive(SideDrive::new(Direction::Reverse, 51));
        assert_eq!(pins(&b), (false, true, 200));

        b.drive(SideDrive::new(Direction::Neutral, 200));
        assert_eq!(pins(&b), (false, false, 0));
    }

    #[test]
    fn inverted_channel_swaps_polarity() {
        let mut b = bridge().inverted(true);
        b.drive(SideDrive::new(Direction::Forward, 255));
        assert_eq!(pins(&b), (false, true, 1000));
    }

    #[test]
    fn dual_bridge_applies_both_sides() {
        let mut dual = DualHBridge::new(bridge(), bridge());
        dual.set_profile(&MotorProfile {
            left: SideDrive::new(Direction::Reverse, 255),
            right: SideDrive::new(Direction::Forward, 255),
        });
        assert_eq!(pins(&dual.left), (false, true, 1000));
        assert_eq!(pins(&dual.right), (true, false, 1000));

        dual.set_profile(&MotorProfile::STOP);
        assert_eq!(pins(&dual.left), (false, false, 0));
        assert_eq!(pins(&dual.right), (false, false, 0));
    }
}
