// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! MCU-level wrappers. Only built for the STM32 target.

pub mod adc;
pub mod led;
pub mod pins;
pub mod spi_slave;
pub mod usart;

pub use adc::Adc;
pub use led::Led;
pub use pins::BoardPins;
pub use spi_slave::SpiSlave;
pub use usart::Usart;
