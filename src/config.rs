// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Compile-time tuning for the pointer firmware.
//!
//! Everything the firmware can be tuned with lives in [`Config`]. The binary uses
//! [`Config::DEFAULT`]; change the constants here (or build a variant with the `with_*` helpers)
//! to match a different sensor mounting or feel.

use crate::protocol::ld2450::FrameCheck;
use crate::sample::Axis;

/// Which sensor axis drives a pointer axis, and whether it is negated first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSource {
    pub axis: Axis,
    pub invert: bool,
}

impl AxisSource {
    pub const fn direct(axis: Axis) -> Self {
        Self { axis, invert: false }
    }

    pub const fn inverted(axis: Axis) -> Self {
        Self { axis, invert: true }
    }
}

/// Assignment of sensor axes to the two reported pointer axes.
///
/// This depends on how the sensor board is mounted, so it is configuration rather than code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisMap {
    pub x: AxisSource,
    pub y: AxisSource,
}

impl AxisMap {
    /// Sensor flat on the back of the hand: yaw (Z) moves left/right, roll (X) moves up/down.
    pub const GYRO_FLAT: Self = Self {
        x: AxisSource::direct(Axis::Z),
        y: AxisSource::direct(Axis::X),
    };

    /// Same as [`AxisMap::GYRO_FLAT`] with the board mounted upside down.
    pub const GYRO_FLIPPED: Self = Self {
        x: AxisSource::inverted(Axis::Z),
        y: AxisSource::inverted(Axis::X),
    };

    /// Radar target position: X drives X, Y drives Y.
    pub const PLANAR: Self = Self {
        x: AxisSource::direct(Axis::X),
        y: AxisSource::direct(Axis::Y),
    };
}

/// What to do with a displacement of (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPolicy {
    /// Only send a report when at least one axis moved.
    SkipIdle,
    /// Send a report every ready tick, even if it carries no motion.
    Always,
}

/// Dead-zone and sensitivity constants for one mapping pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapperConfig {
    /// Divisor applied to the corrected value. Larger is slower. Values below 1 act as 1.
    pub sensitivity: i32,
    /// Magnitudes at or below this are treated as noise.
    pub deadzone: i32,
    pub axes: AxisMap,
}

/// Startup calibration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationConfig {
    pub sample_count: u32,
    /// Wait before the first sample so the sensor output can settle.
    pub settle_ms: u32,
    /// Spacing between consecutive samples.
    pub sample_interval_ms: u32,
}

/// How radar targets are turned into output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadarMode {
    /// Print the first target's coordinates to the debug console.
    Telemetry,
    /// Use the first target's position as pointer motion.
    Pointer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadarConfig {
    pub baud_rate: u32,
    pub frame_check: FrameCheck,
    pub mode: RadarMode,
    /// Upper bound on serial bytes consumed per scheduler tick.
    pub bytes_per_tick: u16,
    pub mapper: MapperConfig,
}

/// Complete firmware configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// 7-bit I2C address of the gyro (0x68 with AD0 low, 0x69 with AD0 high).
    pub gyro_address: u8,
    /// I2C bus clock.
    pub i2c_frequency_hz: u32,
    pub mapper: MapperConfig,
    pub calibration: CalibrationConfig,
    /// Sleep at the end of every scheduler tick.
    pub poll_interval_ms: u32,
    pub report_policy: ReportPolicy,
    pub radar: RadarConfig,
}

impl Config {
    pub const DEFAULT: Self = Self {
        gyro_address: 0x68,
        i2c_frequency_hz: 400_000,
        mapper: MapperConfig {
            sensitivity: 600,
            deadzone: 10,
            axes: AxisMap::GYRO_FLAT,
        },
        calibration: CalibrationConfig {
            sample_count: 500,
            settle_ms: 100,
            sample_interval_ms: 2,
        },
        poll_interval_ms: 10,
        report_policy: ReportPolicy::SkipIdle,
        radar: RadarConfig {
            baud_rate: 256_000,
            frame_check: FrameCheck::MarkerOnly,
            mode: RadarMode::Telemetry,
            bytes_per_tick: 1,
            mapper: MapperConfig {
                sensitivity: 50,
                deadzone: 20,
                axes: AxisMap::PLANAR,
            },
        },
    };

    pub const fn with_mapper(mut self, mapper: MapperConfig) -> Self {
        self.mapper = mapper;
        self
    }

    pub const fn with_calibration(mut self, calibration: CalibrationConfig) -> Self {
        self.calibration = calibration;
        self
    }

    pub const fn with_report_policy(mut self, policy: ReportPolicy) -> Self {
        self.report_policy = policy;
        self
    }

    pub const fn with_radar(mut self, radar: RadarConfig) -> Self {
        self.radar = radar;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_replace_one_section() {
        let mapper = MapperConfig {
            sensitivity: 500,
            ..Config::DEFAULT.mapper
        };
        let calibration = CalibrationConfig {
            sample_count: 50,
            ..Config::DEFAULT.calibration
        };
        let radar = RadarConfig {
            mode: RadarMode::Pointer,
            bytes_per_tick: 32,
            ..Config::DEFAULT.radar
        };

        let cfg = Config::DEFAULT
            .with_mapper(mapper)
            .with_calibration(calibration)
            .with_radar(radar);

        assert_eq!(cfg.mapper, mapper);
        assert_eq!(cfg.calibration, calibration);
        assert_eq!(cfg.radar, radar);
        assert_eq!(cfg.gyro_address, 0x68);
        assert_eq!(cfg.report_policy, ReportPolicy::SkipIdle);
    }

    #[test]
    fn default_matches_const() {
        assert_eq!(Config::default(), Config::DEFAULT);
        assert_eq!(Config::DEFAULT.mapper.sensitivity, 600);
        assert_eq!(Config::DEFAULT.radar.bytes_per_tick, 1);
    }
}
