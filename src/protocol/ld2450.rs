// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! HLK-LD2450 radar target report format.
//!
//! The module streams fixed 30-byte frames at 256000 baud:
//!
//! ```text
//! | AA FF 03 00 | target 1 (8) | target 2 (8) | target 3 (8) | 55 CC |
//! ```
//!
//! Each target is `x: i16, y: i16, speed: i16, resolution: u16`, little-endian, positions in mm
//! and speed in cm/s. Only the first target is used.

/// Sync byte that opens every frame.
pub const MARKER: u8 = 0xAA;

/// Total frame length, marker included.
pub const FRAME_LEN: usize = 30;

/// Full header of a target report.
pub const HEADER: [u8; 4] = [0xAA, 0xFF, 0x03, 0x00];

/// Frame trailer.
pub const TAIL: [u8; 2] = [0x55, 0xCC];

/// Offset of the first target record.
const TARGET1: usize = 4;

/// How strictly a captured frame is validated before it is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameCheck {
    /// Accept any 30 bytes that start with [`MARKER`].
    MarkerOnly,
    /// Also require the full [`HEADER`] and [`TAIL`].
    HeaderAndTail,
}

impl FrameCheck {
    pub fn accepts(&self, frame: &[u8; FRAME_LEN]) -> bool {
        match self {
            FrameCheck::MarkerOnly => frame[0] == MARKER,
            FrameCheck::HeaderAndTail => {
                frame[..HEADER.len()] == HEADER && frame[FRAME_LEN - TAIL.len()..] == TAIL
            }
        }
    }
}

/// First target of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RadarTarget {
    /// Lateral offset (mm).
    pub x: i16,
    /// Distance from the sensor (mm).
    pub y: i16,
    /// Radial speed (cm/s).
    pub speed: i16,
    /// Distance gate resolution (mm).
    pub resolution: u16,
}

/// One complete frame as received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadarFrame {
    bytes: [u8; FRAME_LEN],
}

impl RadarFrame {
    pub fn from_bytes(bytes: [u8; FRAME_LEN]) -> Self {
        Self { bytes }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.bytes
    }

    pub fn first_target(&self) -> RadarTarget {
        RadarTarget {
            x: self.i16_at(TARGET1),
            y: self.i16_at(TARGET1 + 2),
            speed: self.i16_at(TARGET1 + 4),
            resolution: u16::from_le_bytes([self.bytes[TARGET1 + 6], self.bytes[TARGET1 + 7]]),
        }
    }

    #[inline]
    fn i16_at(&self, i: usize) -> i16 {
        i16::from_le_bytes([self.bytes[i], self.bytes[i + 1]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_target_is_little_endian() {
        let mut b = [0u8; FRAME_LEN];
        b[..4].copy_from_slice(&HEADER);
        b[4..12].copy_from_slice(&[0x2C, 0x01, 0x18, 0xFC, 0xF6, 0xFF, 0x68, 0x01]);
        let t = RadarFrame::from_bytes(b).first_target();

        assert_eq!(t.x, 300);
        assert_eq!(t.y, -1000);
        assert_eq!(t.speed, -10);
        assert_eq!(t.resolution, 360);
    }

    #[test]
    fn header_and_tail_check() {
        let mut b = [0u8; FRAME_LEN];
        b[0] = MARKER;
        assert!(FrameCheck::MarkerOnly.accepts(&b));
        assert!(!FrameCheck::HeaderAndTail.accepts(&b));

        b[..4].copy_from_slice(&HEADER);
        b[28..].copy_from_slice(&TAIL);
        assert!(FrameCheck::HeaderAndTail.accepts(&b));
    }
}
