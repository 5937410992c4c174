// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the NUCLEO-F767ZI board.
//!
//! | Function | Pins |
//! | -------- | ---- |
//! | User LEDs | PB0 (green), PB7 (blue), PB14 (red) |
//! | USART3 debug console (ST-LINK VCP) | PD8 TX, PD9 RX |
//! | USART2 LD2450 radar | PD5 TX, PD6 RX |
//! | I2C1 MPU-6050 / DRV2605L | PB8 SCL, PB9 SDA |
//! | USB OTG FS | PA11 DM, PA12 DP |

use stm32f7xx_hal::{
    gpio::{gpioa, gpiob, gpiod, Alternate, OpenDrain, Output, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD);
/// ```
pub struct BoardPins {
    pub leds: LedPins,
    pub usart3: Usart3Pins,
    pub usart2: Usart2Pins,
    pub i2c1: I2c1Pins,
    pub usb: UsbPins,
}

pub struct LedPins {
    pub green: gpiob::PB0<Output<PushPull>>,
    pub blue: gpiob::PB7<Output<PushPull>>,
    pub red: gpiob::PB14<Output<PushPull>>,
}

pub struct Usart3Pins {
    pub tx: gpiod::PD8<Alternate<7>>,
    pub rx: gpiod::PD9<Alternate<7>>,
}

pub struct Usart2Pins {
    pub tx: gpiod::PD5<Alternate<7>>,
    pub rx: gpiod::PD6<Alternate<7>>,
}

/// I2C1 SCL/SDA. External 4.7k pull-ups are on the sensor breakout.
pub struct I2c1Pins {
    pub scl: gpiob::PB8<Alternate<4, OpenDrain>>,
    pub sda: gpiob::PB9<Alternate<4, OpenDrain>>,
}

pub struct UsbPins {
    pub dm: gpioa::PA11<Alternate<10>>,
    pub dp: gpioa::PA12<Alternate<10>>,
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpiob: pac::GPIOB, gpiod: pac::GPIOD) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpiod = gpiod.split();

        Self {
            leds: LedPins {
                green: gpiob.pb0.into_push_pull_output(),
                blue: gpiob.pb7.into_push_pull_output(),
                red: gpiob.pb14.into_push_pull_output(),
            },

            usart3: Usart3Pins {
                tx: gpiod.pd8.into_alternate::<7>(),
                rx: gpiod.pd9.into_alternate::<7>(),
            },

            usart2: Usart2Pins {
                tx: gpiod.pd5.into_alternate::<7>(),
                rx: gpiod.pd6.into_alternate::<7>(),
            },

            i2c1: I2c1Pins {
                scl: gpiob.pb8.into_alternate_open_drain::<4>(),
                sda: gpiob.pb9.into_alternate_open_drain::<4>(),
            },

            usb: UsbPins {
                dm: gpioa.pa11.into_alternate::<10>(),
                dp: gpioa.pa12.into_alternate::<10>(),
            },
        }
    }
}
