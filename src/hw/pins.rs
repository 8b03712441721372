// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for STM32F777 MCU for the Argus node.

use stm32f7xx_hal::{
    gpio::{gpioa, gpiob, gpiod, gpioe, Alternate, Analog, Floating, Input, Output, PushPull},
    pac,
    prelude::*,
};

/// ADC1 channel wired to the battery divider (PA3 = ADC1_IN3).
pub const BATTERY_ADC_CHANNEL: u8 = 3;

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD, dp.GPIOE);
/// ```
pub struct BoardPins {
    pub leds: LedPins,
    pub usart1: Usart1Pins,
    pub spi4: Spi4Pins,
    pub ranger: RangerPins,
    pub battery: gpioa::PA3<Analog>,
    pub left: LeftMotorPins,
    pub right: RightMotorPins,
}

pub struct LedPins {
    pub yellow: gpiod::PD9<Output<PushPull>>,
    pub green: gpiod::PD10<Output<PushPull>>,
}

pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// SPI4 slave SCK/MISO/MOSI and hardware NSS
pub struct Spi4Pins {
    pub sck: gpioe::PE12<Alternate<5>>,
    pub miso: gpioe::PE13<Alternate<5>>,
    pub mosi: gpioe::PE14<Alternate<5>>,
    pub nss: gpioe::PE11<Alternate<5>>,
}

/// HC-SR04 ultrasonic ranger
pub struct RangerPins {
    pub trig: gpiob::PB0<Output<PushPull>>,
    pub echo: gpiob::PB1<Input<Floating>>,
}

/// One H-bridge side: two direction inputs and an enable driven by PWM.
pub struct MotorPins<IN1, IN2, EN> {
    pub in1: IN1,
    pub in2: IN2,
    pub en: EN,
}

pub type LeftMotorPins = MotorPins<
    gpiod::PD0<Output<PushPull>>,
    gpiod::PD1<Output<PushPull>>,
    gpiod::PD12<Alternate<2>>,
>;

pub type RightMotorPins = MotorPins<
    gpiod::PD2<Output<PushPull>>,
    gpiod::PD3<Output<PushPull>>,
    gpiod::PD14<Alternate<2>>,
>;

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpiob: pac::GPIOB, gpiod: pac::GPIOD, gpioe: pac::GPIOE) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();

        Self {
            leds: LedPins {
                yellow: gpiod.pd9.into_push_pull_output(),
                green: gpiod.pd10.into_push_pull_output(),
            },

            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            spi4: Spi4Pins {
                sck: gpioe.pe12.into_alternate::<5>(),
                miso: gpioe.pe13.into_alternate::<5>(),
                mosi: gpioe.pe14.into_alternate::<5>(),
                nss: gpioe.pe11.into_alternate::<5>(),
            },

            ranger: RangerPins {
                trig: gpiob.pb0.into_push_pull_output(),
                echo: gpiob.pb1.into_floating_input(),
            },

            battery: gpioa.pa3.into_analog(),

            left: MotorPins {
                in1: gpiod.pd0.into_push_pull_output(),
                in2: gpiod.pd1.into_push_pull_output(),
                en: gpiod.pd12.into_alternate::<2>(), // TIM4_CH1 (PWM)
            },

            right: MotorPins {
                in1: gpiod.pd2.into_push_pull_output(),
                in2: gpiod.pd3.into_push_pull_output(),
                en: gpiod.pd14.into_alternate::<2>(), // TIM4_CH3 (PWM)
            },
        }
    }
}
