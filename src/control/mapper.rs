// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Dead-zone and sensitivity mapping from corrected sensor values to pointer deltas.
//!
//! Per axis: values whose magnitude is at or below the dead zone become 0, everything else is
//! divided by the sensitivity (truncating) and clamped to [-127, 127]. The dead zone is applied
//! before the division so that it can be tuned independently of the sensitivity.

use crate::config::{AxisSource, MapperConfig};
use crate::protocol::RadarTarget;
use crate::sample::{BiasOffset, CorrectedSample, Displacement, RawSample};

/// Largest magnitude a relative pointer axis can carry.
pub const AXIS_LIMIT: i32 = 127;

/// Map one corrected value to one pointer axis.
///
/// A `sensitivity` below 1 is treated as 1.
#[inline]
pub fn map_axis(value: i32, sensitivity: i32, deadzone: i32) -> i8 {
    if value.unsigned_abs() <= deadzone.unsigned_abs() {
        return 0;
    }
    let sensitivity = sensitivity.max(1);
    // Fits in i8 after the clamp.
    (value / sensitivity).clamp(-AXIS_LIMIT, AXIS_LIMIT) as i8
}

/// Map a corrected sample through an axis assignment, dead zone, and sensitivity.
pub fn map(sample: CorrectedSample, config: &MapperConfig) -> Displacement {
    let pick = |src: AxisSource| {
        let v = sample.axis(src.axis);
        let v = if src.invert { v.saturating_neg() } else { v };
        map_axis(v, config.sensitivity, config.deadzone)
    };
    Displacement::new(pick(config.axes.x), pick(config.axes.y))
}

/// Mapping pipeline that owns the calibration result.
#[derive(Debug, Clone, Copy)]
pub struct MotionMapper {
    bias: BiasOffset,
    config: MapperConfig,
}

impl MotionMapper {
    /// `config.sensitivity` is forced to at least 1.
    pub fn new(bias: BiasOffset, config: MapperConfig) -> Self {
        let config = MapperConfig {
            sensitivity: config.sensitivity.max(1),
            ..config
        };
        Self { bias, config }
    }

    /// Mapper for inputs that need no bias correction (radar positions).
    pub fn uncorrected(config: MapperConfig) -> Self {
        Self::new(BiasOffset::ZERO, config)
    }

    #[inline]
    pub fn bias(&self) -> BiasOffset {
        self.bias
    }

    #[inline]
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Correct a raw gyro reading and map it.
    #[inline]
    pub fn map_raw(&self, raw: RawSample) -> Displacement {
        map(self.bias.correct(raw), &self.config)
    }

    /// Treat a radar target's (x, y) position as the input.
    pub fn map_position(&self, target: RadarTarget) -> Displacement {
        let raw = RawSample::new(target.x, target.y, 0);
        self.map_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AxisMap;
    use crate::sample::Axis;
    use proptest::prelude::*;

    const FLAT: MapperConfig = MapperConfig {
        sensitivity: 500,
        deadzone: 10,
        axes: AxisMap::GYRO_FLAT,
    };

    #[test]
    fn dead_zone_is_inclusive() {
        assert_eq!(map_axis(10, 1, 10), 0);
        assert_eq!(map_axis(-10, 1, 10), 0);
        assert_eq!(map_axis(11, 1, 10), 11);
        assert_eq!(map_axis(-11, 1, 10), -11);
    }

    #[test]
    fn just_outside_dead_zone_truncates_to_zero() {
        assert_eq!(map_axis(11, 500, 10), 0);
        assert_eq!(map_axis(999, 500, 10), 1);
        assert_eq!(map_axis(-999, 500, 10), -1);
    }

    #[test]
    fn large_values_clamp() {
        assert_eq!(map_axis(64_000, 500, 10), 127);
        assert_eq!(map_axis(-64_000, 500, 10), -127);
        assert_eq!(map_axis(i32::MIN, 1, 0), -127);
    }

    #[test]
    fn full_scale_gyro_reaches_the_clamp() {
        // Corrected Z = 32767 + 32768 = 65535, X = -32768 - 32767 = -65535.
        let m = MotionMapper::new(BiasOffset::new(32767, 0, -32768), FLAT);
        assert_eq!(m.bias(), BiasOffset::new(32767, 0, -32768));
        assert_eq!(
            m.map_raw(RawSample::new(i16::MIN, 0, i16::MAX)),
            Displacement::new(127, -127)
        );
    }

    #[test]
    fn gyro_scenario_cross_axis() {
        let m = MotionMapper::new(BiasOffset::ZERO, FLAT);
        assert_eq!(
            m.map_raw(RawSample::new(5000, 0, -5000)),
            Displacement::new(-10, 10)
        );
    }

    #[test]
    fn flipped_mount_inverts_both_axes() {
        let cfg = MapperConfig {
            axes: AxisMap::GYRO_FLIPPED,
            ..FLAT
        };
        let m = MotionMapper::new(BiasOffset::ZERO, cfg);
        assert_eq!(
            m.map_raw(RawSample::new(5000, 0, -5000)),
            Displacement::new(10, -10)
        );
    }

    #[test]
    fn bias_is_subtracted_before_dead_zone() {
        let m = MotionMapper::new(BiasOffset::new(-30, 0, 25), FLAT);
        // Corrected (5030, 7, -25): Z is just outside the dead zone but rounds to 0.
        assert_eq!(
            m.map_raw(RawSample::new(5000, 7, 0)),
            Displacement::new(0, 10)
        );
    }

    #[test]
    fn radar_position_uses_planar_axes() {
        let cfg = MapperConfig {
            sensitivity: 50,
            deadzone: 20,
            axes: AxisMap::PLANAR,
        };
        let m = MotionMapper::uncorrected(cfg);
        let t = RadarTarget {
            x: -300,
            y: 15,
            ..RadarTarget::default()
        };
        assert_eq!(m.map_position(t), Displacement::new(-6, 0));
    }

    #[test]
    fn unused_axis_has_no_effect() {
        let cfg = MapperConfig {
            axes: AxisMap {
                x: AxisSource::direct(Axis::Y),
                y: AxisSource::direct(Axis::Y),
            },
            ..FLAT
        };
        let m = MotionMapper::new(BiasOffset::ZERO, cfg);
        assert_eq!(
            m.map_raw(RawSample::new(i16::MAX, 1000, i16::MIN)),
            Displacement::new(2, 2)
        );
    }

    #[test]
    fn zero_sensitivity_does_not_divide_by_zero() {
        let cfg = MapperConfig {
            sensitivity: 0,
            ..FLAT
        };
        let m = MotionMapper::new(BiasOffset::ZERO, cfg);
        assert_eq!(m.config().sensitivity, 1);
        assert_eq!(m.map_raw(RawSample::new(0, 0, 50)), Displacement::new(50, 0));
        assert_eq!(map(CorrectedSample::new(0, 0, 50), &cfg), Displacement::new(50, 0));
    }

    #[test]
    fn negative_sensitivity_does_not_reverse_axes() {
        let cfg = MapperConfig {
            sensitivity: -1,
            ..FLAT
        };
        let m = MotionMapper::new(BiasOffset::ZERO, cfg);
        assert_eq!(m.config().sensitivity, 1);
        assert_eq!(
            m.map_raw(RawSample::new(1000, 0, 1000)),
            Displacement::new(127, 127)
        );
        assert_eq!(map_axis(i32::MIN, -1, 0), -127);
        assert_eq!(map_axis(600, -5, 10), 127);
    }

    proptest! {
        #[test]
        fn inside_dead_zone_is_zero(v in -10_000i32..=10_000, dz in 0i32..=10_000, s in 1i32..=2_000) {
            prop_assume!(v.abs() <= dz);
            prop_assert_eq!(map_axis(v, s, dz), 0);
        }

        #[test]
        fn outside_dead_zone_is_clamped_quotient(v in any::<i32>(), dz in 0i32..=1_000, s in 1i32..=2_000) {
            prop_assume!(v.unsigned_abs() > dz.unsigned_abs());
            let expected = (i64::from(v) / i64::from(s)).clamp(-127, 127);
            prop_assert_eq!(i64::from(map_axis(v, s, dz)), expected);
        }

        #[test]
        fn mapping_is_pure(x in any::<i16>(), y in any::<i16>(), z in any::<i16>(),
                           bx in -2_000i32..2_000, by in -2_000i32..2_000, bz in -2_000i32..2_000) {
            let m = MotionMapper::new(BiasOffset::new(bx, by, bz), FLAT);
            let raw = RawSample::new(x, y, z);
            let first = m.map_raw(raw);
            prop_assert_eq!(first, m.map_raw(raw));
            prop_assert!(first.dx != -128 && first.dy != -128);
        }
    }
}
