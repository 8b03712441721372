// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Argus node entry point.
//!
//! The SPI4 receive interrupt owns the bus: it latches commands and streams telemetry. Everything
//! else runs in the poll loop on the main thread.

#![cfg_attr(target_os = "none", no_std, no_main)]

#[cfg(target_os = "none")]
mod firmware {
    use core::cell::RefCell;

    use cortex_m::delay::Delay;
    use cortex_m::interrupt::Mutex;
    use cortex_m::peripheral::{DWT, NVIC};
    use cortex_m_rt::entry;
    use panic_halt as _;

    use hal::{
        pac::{self, interrupt},
        prelude::*,
        serial::{Config, Serial},
    };
    use stm32f7xx_hal as hal;

    use argus_node::config::NodeConfig;
    use argus_node::control::PollLoop;
    use argus_node::drivers::{DualHBridge, HBridge, Hcsr04};
    use argus_node::hw::{pins, Adc, BoardPins, Led, SpiSlave, Usart};
    use argus_node::motors::Executor;
    use argus_node::protocol::BusHandler;
    use argus_node::sensors::Sampler;
    use argus_node::state::SharedState;

    const CONFIG: NodeConfig = NodeConfig::DEFAULT;

    static SHARED: SharedState = SharedState::new();

    static BUS: Mutex<RefCell<Option<(SpiSlave, BusHandler<'static>)>>> =
        Mutex::new(RefCell::new(None));

    #[entry]
    fn main() -> ! {
        // Peripherals
        let dp = pac::Peripherals::take().unwrap();
        let mut cp = cortex_m::Peripherals::take().unwrap();

        // Clocks
        let rcc = dp.RCC.constrain();
        let clocks = rcc.cfgr.freeze();
        let sysclk_hz = clocks.sysclk().raw();

        // Cycle counter for echo timing
        cp.DCB.enable_trace();
        DWT::unlock();
        cp.DWT.enable_cycle_counter();

        let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD, dp.GPIOE);

        // LED
        let mut led_yellow = Led::active_low(pins.leds.yellow);
        let mut led_green = Led::active_low(pins.leds.green);

        // USART1 (DBG)
        let usart_cfg = Config {
            baud_rate: 115_200.bps(),
            ..Default::default()
        };
        let serial = Serial::new(dp.USART1, (pins.usart1.tx, pins.usart1.rx), &clocks, usart_cfg);
        let mut usart = Usart::new(serial);

        usart.startup(&CONFIG);

        // Drive: TIM4 CH1 (left EN) and CH3 (right EN)
        let (left_en, right_en) = dp
            .TIM4
            .pwm_hz((pins.left.en, pins.right.en), 20.kHz(), &clocks)
            .split();
        let left = HBridge::new(pins.left.in1, pins.left.in2, left_en);
        let right = HBridge::new(pins.right.in1, pins.right.in2, right_en);
        // Motors come up stopped before the bus is live.
        let executor = Executor::new(DualHBridge::new(left, right), CONFIG.drive);

        // Sensors
        let ranger = Hcsr04::new(
            pins.ranger.trig,
            pins.ranger.echo,
            DWT::cycle_count,
            sysclk_hz / 1_000_000,
            CONFIG.trigger_pulse_us,
        );
        let _battery_pin = pins.battery;
        let adc1 = RefCell::new(Adc::adc1(dp.ADC1));
        let read_battery = Adc::make_reader(&adc1, pins::BATTERY_ADC_CHANNEL);
        let sampler = Sampler::new(ranger, read_battery, &CONFIG);

        // SPI4 slave
        let _spi4_pins = pins.spi4;
        let mut slave = SpiSlave::spi4(dp.SPI4);
        slave.listen();
        cortex_m::interrupt::free(|cs| {
            BUS.borrow(cs)
                .replace(Some((slave, BusHandler::new(&SHARED))));
        });
        unsafe { NVIC::unmask(pac::Interrupt::SPI4) };

        usart.println("bus ready");

        // SysTick delay
        let mut delay = Delay::new(cp.SYST, sysclk_hz);

        let mut poll = PollLoop::new(sampler, executor, &SHARED, &CONFIG);
        poll.run(
            |ms| delay.delay_ms(ms),
            |report| {
                usart.report(report);
                led_green.toggle();
                led_yellow.set(report.profile.is_moving());
            },
        )
    }

    #[interrupt]
    fn SPI4() {
        cortex_m::interrupt::free(|cs| {
            if let Some((slave, handler)) = BUS.borrow(cs).borrow_mut().as_mut() {
                if let Some(byte) = slave.read() {
                    handler.on_byte(byte, slave);
                }
            }
        });
    }
}

#[cfg(not(target_os = "none"))]
fn main() {}
