// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! TI DRV2605L haptic driver, configured for an LRA.
//!
//! Used to give a short buzz when the pointer is ready. Effects are played from the ROM waveform
//! library; see the DRV2605L datasheet, table 11.2, for effect IDs.

use crate::error::BusError;
use crate::hw::SensorBus;

/// Fixed 7-bit address.
pub const ADDRESS: u8 = 0x5A;

// Register addresses
pub mod reg {
    pub const STATUS: u8 = 0x00;
    pub const MODE: u8 = 0x01;
    pub const LIBRARY: u8 = 0x03;
    pub const WAVESEQ1: u8 = 0x04;
    pub const WAVESEQ2: u8 = 0x05;
    pub const GO: u8 = 0x0C;
    pub const FEEDBACK: u8 = 0x1A;
}

/// MODE: internal trigger, standby bit clear.
const MODE_INTERNAL_TRIGGER: u8 = 0x00;
/// FEEDBACK: LRA mode, 4x braking, medium loop gain.
const FEEDBACK_LRA: u8 = 0xB6;
/// Waveform library tuned for LRAs.
const LIBRARY_LRA: u8 = 0x06;

/// Well-known ROM effects.
pub mod effect {
    pub const STRONG_CLICK: u8 = 1;
    pub const TRIPLE_CLICK: u8 = 12;
}

pub struct Drv2605<B: SensorBus> {
    bus: B,
}

impl<B: SensorBus> Drv2605<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Check that something acknowledges at the DRV2605 address.
    pub fn probe(&mut self) -> Result<(), BusError> {
        let mut status = [0u8; 1];
        self.bus.read_registers(ADDRESS, reg::STATUS, &mut status)
    }

    /// Put the part into LRA closed-loop mode with the LRA waveform library.
    pub fn init_lra(&mut self) -> Result<(), BusError> {
        self.probe()?;
        self.write(reg::MODE, MODE_INTERNAL_TRIGGER)?;
        self.write(reg::FEEDBACK, FEEDBACK_LRA)?;
        self.write(reg::LIBRARY, LIBRARY_LRA)?;
        self.write(reg::MODE, MODE_INTERNAL_TRIGGER)
    }

    /// Queue a single ROM effect and fire it.
    pub fn play_effect(&mut self, id: u8) -> Result<(), BusError> {
        self.write(reg::WAVESEQ1, id)?;
        // End of sequence
        self.write(reg::WAVESEQ2, 0x00)?;
        self.write(reg::GO, 0x01)
    }

    pub fn free(self) -> B {
        self.bus
    }

    #[inline]
    fn write(&mut self, reg: u8, value: u8) -> Result<(), BusError> {
        self.bus.write_register(ADDRESS, reg, &[value])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hw::mock::{BusTransaction, MockBus};

    fn writes(bus: &MockBus) -> Vec<(u8, u8)> {
        bus.transactions()
            .into_iter()
            .filter_map(|t| match t {
                BusTransaction::Write { reg, data, .. } => Some((reg, data[0])),
                BusTransaction::Read { .. } => None,
            })
            .collect()
    }

    #[test]
    fn lra_init_sequence() {
        let mut haptic = Drv2605::new(MockBus::new());
        haptic.init_lra().unwrap();
        assert_eq!(
            writes(&haptic.free()),
            vec![(0x01, 0x00), (0x1A, 0xB6), (0x03, 0x06), (0x01, 0x00)]
        );
    }

    #[test]
    fn play_effect_fires_go() {
        let mut haptic = Drv2605::new(MockBus::new());
        haptic.play_effect(effect::TRIPLE_CLICK).unwrap();
        assert_eq!(
            writes(&haptic.free()),
            vec![(0x04, 12), (0x05, 0x00), (0x0C, 0x01)]
        );
    }

    #[test]
    fn missing_part_fails_init() {
        let mut bus = MockBus::new();
        bus.push_error(BusError::Nack);
        let mut haptic = Drv2605::new(bus);
        assert_eq!(haptic.init_lra(), Err(BusError::Nack));
        assert!(writes(&haptic.free()).is_empty());
    }

    #[test]
    fn failed_write_stops_init() {
        let mut bus = MockBus::new();
        bus.fail_writes(BusError::I2c);
        let mut haptic = Drv2605::new(bus);
        assert_eq!(haptic.init_lra(), Err(BusError::I2c));
        assert_eq!(writes(&haptic.free()), vec![(0x01, 0x00)]);
    }
}
