// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Inter-Integrated Circuit (I2C) abstraction layer.
//!
//! `I2cBus` wraps a configured blocking I2C master (the HAL's `BlockingI2c`) and exposes
//! register-style access. Transactions time out inside the HAL, so a stuck device costs at most
//! the configured data timeout.

use embedded_hal::blocking::i2c::{Write, WriteRead};

use crate::error::BusError;
use crate::hw::SensorBus;

/// Longest register burst written in one transaction (register address included).
const MAX_WRITE: usize = 8;

/// Wrapper around a blocking I2C master.
pub struct I2cBus<I2C> {
    i2c: I2C,
}

impl<I2C> I2cBus<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    pub fn free(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> SensorBus for I2cBus<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    fn write_register(&mut self, addr: u8, reg: u8, bytes: &[u8]) -> Result<(), BusError> {
        let len = bytes.len() + 1;
        if len > MAX_WRITE {
            return Err(BusError::I2c);
        }
        let mut frame = [0u8; MAX_WRITE];
        frame[0] = reg;
        frame[1..len].copy_from_slice(bytes);
        self.i2c.write(addr, &frame[..len]).map_err(|_| BusError::I2c)
    }

    fn read_registers(&mut self, addr: u8, reg: u8, buf: &mut [u8]) -> Result<(), BusError> {
        self.i2c
            .write_read(addr, &[reg], buf)
            .map_err(|_| BusError::I2c)
    }
}
