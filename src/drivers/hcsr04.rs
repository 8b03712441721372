// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! HC-SR04 ultrasonic ranger.
//!
//! Wiring:
//! - TRIG: push-pull output. A 10 µs high pulse starts a measurement.
//! - ECHO: input (5V-tolerant pin). Held high for the round-trip time of the burst.
//!
//! Timing uses a free-running tick counter supplied as a closure (the DWT cycle counter on
//! target), so the driver does not hold the SysTick delay the poll loop sleeps on.

use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::sensors::RangeSensor;

/// Settle time with TRIG low before the pulse.
const TRIG_SETTLE_US: u32 = 2;

/// Driver for one HC-SR04.
///
/// `Clock` returns a wrapping tick count that advances `ticks_per_us` times per microsecond.
pub struct Hcsr04<Trig, Echo, Clock> {
    trig: Trig,
    echo: Echo,
    clock: Clock,
    ticks_per_us: u32,
    pulse_us: u32,
}

impl<Trig, Echo, Clock> Hcsr04<Trig, Echo, Clock>
where
    Trig: OutputPin,
    Echo: InputPin,
    Clock: FnMut() -> u32,
{
    /// Construct the driver and park TRIG low.
    pub fn new(mut trig: Trig, echo: Echo, clock: Clock, ticks_per_us: u32, pulse_us: u32) -> Self {
        trig.set_low().ok();
        Self {
            trig,
            echo,
            clock,
            ticks_per_us: ticks_per_us.max(1),
            pulse_us,
        }
    }

    #[inline]
    fn elapsed_us(&mut self, since: u32) -> u32 {
        (self.clock)().wrapping_sub(since) / self.ticks_per_us
    }

    fn spin_us(&mut self, us: u32) {
        let start = (self.clock)();
        while self.elapsed_us(start) < us {}
    }

    /// A read error counts as "no echo".
    #[inline]
    fn echo_high(&self) -> bool {
        self.echo.is_high().unwrap_or(false)
    }

    /// Drive TRIG low, high for the pulse width, then low again.
    fn trigger(&mut self) {
        self.trig.set_low().ok();
        self.spin_us(TRIG_SETTLE_US);
        self.trig.set_high().ok();
        self.spin_us(self.pulse_us);
        self.trig.set_low().ok();
    }
}

impl<Trig, Echo, Clock> RangeSensor for Hcsr04<Trig, Echo, Clock>
where
    Trig: OutputPin,
    Echo: InputPin,
    Clock: FnMut() -> u32,
{
    fn echo_us(&mut self, timeout_us: u32) -> Option<u32> {
        self.trigger();

        // One deadline for both edges, so the whole ping is bounded by `timeout_us`.
        let start = (self.clock)();
        while !self.echo_high() {
            if self.elapsed_us(start) > timeout_us {
                return None;
            }
        }

        let rise = (self.clock)();
        while self.echo_high() {
            if self.elapsed_us(start) > timeout_us {
                return None;
            }
        }

        Some(self.elapsed_us(rise))
    }
}
