// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific drivers that sit above the [`SensorBus`] boundary and
//! below the application logic.
//!
//! ## Existing drivers
//!
//! - [`mpu6050`] – InvenSense MPU-6050 gyro/accelerometer
//! - [`drv2605`] – TI DRV2605L haptic driver (LRA)
//!
//! [`SensorBus`]: crate::hw::SensorBus

use crate::error::BusError;
use crate::sample::RawSample;

pub mod drv2605;
pub mod mpu6050;

pub use drv2605::Drv2605;
pub use mpu6050::Mpu6050;

/// Pull-based source of angular-rate samples.
pub trait GyroSource {
    /// Take one reading. A failed transaction is an error, never an all-zero sample.
    fn read_rate(&mut self) -> Result<RawSample, BusError>;
}

impl<T: GyroSource + ?Sized> GyroSource for &mut T {
    fn read_rate(&mut self) -> Result<RawSample, BusError> {
        (**self).read_rate()
    }
}
