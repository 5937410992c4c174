// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pointer sources: the two sensing paths, each producing at most one reading per poll.

use crate::config::{RadarConfig, RadarMode};
use crate::control::MotionMapper;
use crate::drivers::GyroSource;
use crate::error::BusError;
use crate::hw::ByteSource;
use crate::protocol::{FrameSynchronizer, RadarTarget};
use crate::sample::Displacement;

/// Result of polling a pointer source once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    /// Nothing new yet (radar frame still incomplete).
    Nothing,
    /// Pointer motion to report.
    Motion(Displacement),
    /// Raw radar target for the telemetry console.
    Target(RadarTarget),
}

/// Anything the scheduler can poll for pointer input.
pub trait PointerSource {
    /// Do a bounded amount of work and return what it produced.
    fn poll(&mut self) -> Result<Reading, BusError>;
}

/// Gyro path: one bus read per poll, bias-corrected and mapped.
pub struct GyroPointer<S: GyroSource> {
    source: S,
    mapper: MotionMapper,
}

impl<S: GyroSource> GyroPointer<S> {
    pub fn new(source: S, mapper: MotionMapper) -> Self {
        Self { source, mapper }
    }

    #[inline]
    pub fn mapper(&self) -> &MotionMapper {
        &self.mapper
    }

    pub fn free(self) -> S {
        self.source
    }
}

impl<S: GyroSource> PointerSource for GyroPointer<S> {
    fn poll(&mut self) -> Result<Reading, BusError> {
        let raw = self.source.read_rate()?;
        Ok(Reading::Motion(self.mapper.map_raw(raw)))
    }
}

/// Radar path: feeds up to `bytes_per_tick` buffered UART bytes into the frame synchronizer.
pub struct RadarPointer<B: ByteSource> {
    port: B,
    sync: FrameSynchronizer,
    mapper: MotionMapper,
    mode: RadarMode,
    bytes_per_tick: u16,
}

impl<B: ByteSource> RadarPointer<B> {
    pub fn new(port: B, config: &RadarConfig) -> Self {
        Self {
            port,
            sync: FrameSynchronizer::new(config.frame_check),
            mapper: MotionMapper::uncorrected(config.mapper),
            mode: config.mode,
            bytes_per_tick: config.bytes_per_tick.max(1),
        }
    }

    #[inline]
    pub fn synchronizer(&self) -> &FrameSynchronizer {
        &self.sync
    }

    pub fn free(self) -> B {
        self.port
    }
}

impl<B: ByteSource> PointerSource for RadarPointer<B> {
    fn poll(&mut self) -> Result<Reading, BusError> {
        for _ in 0..self.bytes_per_tick {
            if !self.port.is_byte_available() {
                break;
            }
            let byte = match self.port.read_byte() {
                Ok(b) => b,
                Err(e) => {
                    // A lost byte misaligns whatever was being captured.
                    self.sync.reset();
                    return Err(e);
                }
            };
            if let Some(frame) = self.sync.push(byte) {
                let target = frame.first_target();
                return Ok(match self.mode {
                    RadarMode::Telemetry => Reading::Target(target),
                    RadarMode::Pointer => Reading::Motion(self.mapper.map_position(target)),
                });
            }
        }
        Ok(Reading::Nothing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::drivers::Mpu6050;
    use crate::hw::mock::{MockBus, MockSerial};
    use crate::sample::BiasOffset;
    use crate::protocol::ld2450::{FRAME_LEN, HEADER, TAIL};

    fn frame(x: i16, y: i16) -> [u8; FRAME_LEN] {
        let mut b = [0u8; FRAME_LEN];
        b[..4].copy_from_slice(&HEADER);
        b[4..6].copy_from_slice(&x.to_le_bytes());
        b[6..8].copy_from_slice(&y.to_le_bytes());
        b[28..].copy_from_slice(&TAIL);
        b
    }

    #[test]
    fn one_byte_per_poll_by_default() {
        let mut port = MockSerial::new();
        port.inject(&frame(100, 2000));
        let mut radar = RadarPointer::new(port, &Config::DEFAULT.radar);

        for _ in 0..FRAME_LEN - 1 {
            assert_eq!(radar.poll(), Ok(Reading::Nothing));
        }
        match radar.poll() {
            Ok(Reading::Target(t)) => assert_eq!((t.x, t.y), (100, 2000)),
            other => panic!("expected target, got {other:?}"),
        }
        assert_eq!(radar.free().reads(), FRAME_LEN);
    }

    #[test]
    fn stops_at_end_of_frame() {
        let mut port = MockSerial::new();
        port.inject(&frame(1, 1));
        port.inject(&frame(2, 2));
        let cfg = RadarConfig {
            bytes_per_tick: 64,
            ..Config::DEFAULT.radar
        };
        let mut radar = RadarPointer::new(port, &cfg);

        assert!(matches!(radar.poll(), Ok(Reading::Target(t)) if t.x == 1));
        assert!(matches!(radar.poll(), Ok(Reading::Target(t)) if t.x == 2));
        assert_eq!(radar.poll(), Ok(Reading::Nothing));
    }

    #[test]
    fn next_frame_stays_buffered() {
        let mut port = MockSerial::new();
        port.inject(&frame(1, 1));
        port.inject(&frame(2, 2));
        let cfg = RadarConfig {
            bytes_per_tick: 64,
            ..Config::DEFAULT.radar
        };
        let mut radar = RadarPointer::new(port, &cfg);

        assert!(matches!(radar.poll(), Ok(Reading::Target(_))));
        assert_eq!(radar.free().pending(), FRAME_LEN);
    }

    #[test]
    fn gyro_poll_applies_bias() {
        let mut bus = MockBus::new();
        // (0, 0, 1100) big-endian
        bus.push_response(&[0x00, 0x00, 0x00, 0x00, 0x04, 0x4C]);
        let bias = BiasOffset::new(0, 0, 100);
        let mut gyro = GyroPointer::new(
            Mpu6050::new(bus, 0x68),
            MotionMapper::new(bias, Config::DEFAULT.mapper),
        );

        assert_eq!(gyro.mapper().bias(), bias);
        assert_eq!(gyro.poll(), Ok(Reading::Motion(Displacement::new(1, 0))));
    }

    #[test]
    fn serial_error_drops_partial_frame() {
        let f = frame(9, 9);
        let mut port = MockSerial::new();
        port.inject(&f[..10]);
        port.inject_error(BusError::Serial);
        port.inject(&f);
        let cfg = RadarConfig {
            bytes_per_tick: 64,
            ..Config::DEFAULT.radar
        };
        let mut radar = RadarPointer::new(port, &cfg);

        assert_eq!(radar.poll(), Err(BusError::Serial));
        assert!(!radar.synchronizer().in_frame());
        assert!(matches!(radar.poll(), Ok(Reading::Target(t)) if t.x == 9));
    }

    #[test]
    fn pointer_mode_maps_position() {
        let mut port = MockSerial::new();
        port.inject(&frame(-500, 250));
        let cfg = RadarConfig {
            mode: RadarMode::Pointer,
            bytes_per_tick: 30,
            ..Config::DEFAULT.radar
        };
        let mut radar = RadarPointer::new(port, &cfg);

        assert_eq!(
            radar.poll(),
            Ok(Reading::Motion(Displacement::new(-10, 5)))
        );
    }
}
