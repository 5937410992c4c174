// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! InvenSense MPU-6050 6-axis IMU over I2C.
//!
//! Only what the pointer needs: wake the part, check its identity, and read the gyro block. The
//! full 14-byte motion block (accel, temperature, gyro) is available for boot diagnostics.

use crate::drivers::GyroSource;
use crate::error::BusError;
use crate::hw::SensorBus;
use crate::sample::RawSample;

/// Default 7-bit address (AD0 tied low).
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// Value of WHO_AM_I regardless of the AD0 strap.
pub const WHO_AM_I_VALUE: u8 = 0x68;

// Register addresses
pub mod reg {
    pub const ACCEL_XOUT_H: u8 = 0x3B;
    pub const GYRO_XOUT_H: u8 = 0x43;
    pub const PWR_MGMT_1: u8 = 0x6B;
    pub const WHO_AM_I: u8 = 0x75;
}

/// Accelerometer, die temperature, and gyro read in one burst.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MotionBlock {
    pub accel: RawSample,
    pub temp_raw: i16,
    pub gyro: RawSample,
}

impl MotionBlock {
    pub const SIZE: usize = 14;

    pub fn from_be_bytes(data: [u8; Self::SIZE]) -> Self {
        let mut accel = [0u8; RawSample::SIZE];
        let mut gyro = [0u8; RawSample::SIZE];
        accel.copy_from_slice(&data[0..6]);
        gyro.copy_from_slice(&data[8..14]);
        Self {
            accel: RawSample::from_be_bytes(accel),
            temp_raw: i16::from_be_bytes([data[6], data[7]]),
            gyro: RawSample::from_be_bytes(gyro),
        }
    }

    /// Die temperature in degrees Celsius.
    #[inline]
    pub fn temperature_c(&self) -> f32 {
        self.temp_raw as f32 / 340.0 + 36.53
    }
}

pub struct Mpu6050<B: SensorBus> {
    bus: B,
    address: u8,
}

impl<B: SensorBus> Mpu6050<B> {
    pub fn new(bus: B, address: u8) -> Self {
        Self { bus, address }
    }

    #[inline]
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Read WHO_AM_I and make sure an MPU-6050 answered.
    pub fn probe(&mut self) -> Result<(), BusError> {
        let mut id = [0u8; 1];
        self.bus.read_registers(self.address, reg::WHO_AM_I, &mut id)?;
        if id[0] != WHO_AM_I_VALUE {
            return Err(BusError::UnexpectedDevice {
                expected: WHO_AM_I_VALUE,
                found: id[0],
            });
        }
        Ok(())
    }

    /// Clear the sleep bit. The part powers up asleep and reads all zeros until woken.
    pub fn wake(&mut self) -> Result<(), BusError> {
        self.bus.write_register(self.address, reg::PWR_MGMT_1, &[0x00])
    }

    /// Read the three gyro axes.
    pub fn read_gyro(&mut self) -> Result<RawSample, BusError> {
        let mut buf = [0u8; RawSample::SIZE];
        self.bus.read_registers(self.address, reg::GYRO_XOUT_H, &mut buf)?;
        Ok(RawSample::from_be_bytes(buf))
    }

    /// Read accel, temperature, and gyro in one burst.
    pub fn read_motion(&mut self) -> Result<MotionBlock, BusError> {
        let mut buf = [0u8; MotionBlock::SIZE];
        self.bus.read_registers(self.address, reg::ACCEL_XOUT_H, &mut buf)?;
        Ok(MotionBlock::from_be_bytes(buf))
    }

    pub fn free(self) -> B {
        self.bus
    }
}

impl<B: SensorBus> GyroSource for Mpu6050<B> {
    fn read_rate(&mut self) -> Result<RawSample, BusError> {
        self.read_gyro()
    }
}
