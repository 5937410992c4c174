// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Plain data carried between the sensor, the calibrator, and the mapper.

/// Sensor axis selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// One angular-rate reading straight off the bus, in sensor LSB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl RawSample {
    pub const SIZE: usize = 6;

    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Decode the big-endian X/Y/Z register block.
    pub fn from_be_bytes(data: [u8; Self::SIZE]) -> Self {
        Self {
            x: i16::from_be_bytes([data[0], data[1]]),
            y: i16::from_be_bytes([data[2], data[3]]),
            z: i16::from_be_bytes([data[4], data[5]]),
        }
    }
}

/// Per-axis zero-rate offset measured at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BiasOffset {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BiasOffset {
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Subtract this offset from a raw reading.
    #[inline]
    pub fn correct(&self, raw: RawSample) -> CorrectedSample {
        CorrectedSample {
            x: i32::from(raw.x) - self.x,
            y: i32::from(raw.y) - self.y,
            z: i32::from(raw.z) - self.z,
        }
    }
}

/// Bias-corrected reading, widened so the subtraction cannot overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CorrectedSample {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CorrectedSample {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn axis(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

/// Relative pointer motion for one report. Both axes stay within [-127, 127].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Displacement {
    pub dx: i8,
    pub dy: i8,
}

impl Displacement {
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    pub const fn new(dx: i8, dy: i8) -> Self {
        Self { dx, dy }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_sample_decodes_big_endian() {
        let s = RawSample::from_be_bytes([0x13, 0x88, 0x00, 0x00, 0xEC, 0x78]);
        assert_eq!(s, RawSample::new(5000, 0, -5000));
    }

    #[test]
    fn correction_is_widened() {
        let bias = BiasOffset::new(-100, 0, 100);
        let c = bias.correct(RawSample::new(i16::MAX, 0, i16::MIN));
        assert_eq!(c.x, i32::from(i16::MAX) + 100);
        assert_eq!(c.z, i32::from(i16::MIN) - 100);
    }
}
