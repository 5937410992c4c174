// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Hardware Boundaries
//!
//! [`traits`] defines the sensor bus, serial, USB, and delay boundaries the rest of the crate is
//! written against. With the `board` feature, the remaining modules implement them for the
//! STM32F767 HAL.

pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(feature = "board")]
pub mod i2c;
#[cfg(feature = "board")]
pub mod led;
#[cfg(feature = "board")]
pub mod pins;
#[cfg(feature = "board")]
pub mod usart;
#[cfg(feature = "board")]
pub mod usb;

pub use traits::{ByteSource, Delay, HostTransport, PointerReport, SensorBus};

#[cfg(feature = "board")]
pub use i2c::I2cBus;
#[cfg(feature = "board")]
pub use led::Led;
#[cfg(feature = "board")]
pub use usart::{SerialRx, Usart};
#[cfg(feature = "board")]
pub use usb::UsbMouse;

#[cfg(feature = "board")]
impl Delay for cortex_m::delay::Delay {
    #[inline]
    fn delay_ms(&mut self, ms: u32) {
        cortex_m::delay::Delay::delay_ms(self, ms);
    }
}
