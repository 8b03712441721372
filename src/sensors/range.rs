// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Time-of-flight distance measurement.

/// Speed of sound at ~20 °C in centimeters per microsecond.
pub const SPEED_OF_SOUND_CM_PER_US: f32 = 0.0343;

/// Distance reported when no echo arrives before the timeout.
pub const NO_ECHO_CM: i16 = 0;

/// An ultrasonic ranger that can be pinged.
pub trait RangeSensor {
    /// Fire one trigger pulse and return the echo high time in microseconds.
    ///
    /// Returns `None` if the echo did not start and finish within `timeout_us`.
    fn echo_us(&mut self, timeout_us: u32) -> Option<u32>;
}

/// Convert a round-trip echo time into a one-way distance, truncated to whole centimeters.
pub fn echo_to_cm(echo_us: u32) -> i16 {
    // `as` saturates, so absurd echo times clamp to i16::MAX instead of wrapping.
    (echo_us as f32 * SPEED_OF_SOUND_CM_PER_US / 2.0) as i16
}

/// Ping `sensor` and convert the result, falling back to [`NO_ECHO_CM`] on timeout.
pub fn measure_cm<R: RangeSensor>(sensor: &mut R, timeout_us: u32) -> i16 {
    sensor
        .echo_us(timeout_us)
        .map(echo_to_cm)
        .unwrap_or(NO_ECHO_CM)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedEcho(Option<u32>);

    impl RangeSensor for FixedEcho {
        fn echo_us(&mut self, timeout_us: u32) -> Option<u32> {
            self.0.filter(|&us| us <= timeout_us)
        }
    }

    #[test]
    fn one_millisecond_echo_is_seventeen_cm() {
        assert_eq!(echo_to_cm(1000), 17);
    }

    #[test]
    fn conversion_truncates() {
        // 58 µs * 0.0343 / 2 = 0.9947 cm
        assert_eq!(echo_to_cm(58), 0);
        // 117 µs -> 2.006 cm, the sensor's lower limit
        assert_eq!(echo_to_cm(117), 2);
    }

    #[test]
    fn far_echo_stays_in_range() {
        // ~400 cm is the top of the HC-SR04 range
        assert_eq!(echo_to_cm(23_300), 399);
        assert_eq!(echo_to_cm(u32::MAX), i16::MAX);
    }

    #[test]
    fn timeout_reads_as_zero() {
        let mut sensor = FixedEcho(None);
        assert_eq!(measure_cm(&mut sensor, 25_000), NO_ECHO_CM);

        let mut late = FixedEcho(Some(30_000));
        assert_eq!(measure_cm(&mut late, 25_000), NO_ECHO_CM);
    }

    #[test]
    fn echo_within_timeout_is_converted() {
        let mut sensor = FixedEcho(Some(2915));
        assert_eq!(measure_cm(&mut sensor, 25_000), 49);
    }
}
