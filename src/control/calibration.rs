// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Startup zero-rate calibration for the gyro.
//!
//! The device must be held still while this runs. Nothing checks for motion during the run, so a
//! disturbed calibration silently shifts every later reading by a constant.
//!
//! The run takes several hundred milliseconds, which is far longer than the USB stack may go
//! unserviced, so the calibrator services the transport between every sample and between slices
//! of the settle wait.

use crate::config::CalibrationConfig;
use crate::drivers::GyroSource;
use crate::error::CalibrationError;
use crate::hw::{Delay, HostTransport};
use crate::sample::{BiasOffset, RawSample};

/// Longest single wait during the settle period.
pub const SETTLE_SLICE_MS: u32 = 5;

/// Running per-axis sums of a calibration run.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalibrationRun {
    sum_x: i64,
    sum_y: i64,
    sum_z: i64,
    count: u32,
}

impl CalibrationRun {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, s: RawSample) {
        self.sum_x += i64::from(s.x);
        self.sum_y += i64::from(s.y);
        self.sum_z += i64::from(s.z);
        self.count += 1;
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Integer mean per axis, truncated toward zero. `None` if no samples were added.
    pub fn finish(self) -> Option<BiasOffset> {
        if self.count == 0 {
            return None;
        }
        let n = i64::from(self.count);
        // The mean of i16 values always fits in i32.
        Some(BiasOffset::new(
            (self.sum_x / n) as i32,
            (self.sum_y / n) as i32,
            (self.sum_z / n) as i32,
        ))
    }
}

pub struct BiasCalibrator {
    config: CalibrationConfig,
}

impl BiasCalibrator {
    pub fn new(config: CalibrationConfig) -> Self {
        Self { config }
    }

    /// Settle, then average `sample_count` consecutive readings from `source`.
    ///
    /// `transport` is serviced throughout; no reports are submitted.
    pub fn calibrate<S, T, D>(
        &self,
        source: &mut S,
        transport: &mut T,
        delay: &mut D,
    ) -> Result<BiasOffset, CalibrationError>
    where
        S: GyroSource,
        T: HostTransport,
        D: Delay,
    {
        if self.config.sample_count == 0 {
            return Err(CalibrationError::EmptyRun);
        }

        self.settle(transport, delay);

        let mut run = CalibrationRun::new();
        for _ in 0..self.config.sample_count {
            run.add(source.read_rate()?);
            delay.delay_ms(self.config.sample_interval_ms);
            transport.service();
        }

        run.finish().ok_or(CalibrationError::EmptyRun)
    }

    fn settle<T: HostTransport, D: Delay>(&self, transport: &mut T, delay: &mut D) {
        let mut remaining = self.config.settle_ms;
        while remaining > 0 {
            let slice = remaining.min(SETTLE_SLICE_MS);
            delay.delay_ms(slice);
            transport.service();
            remaining -= slice;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::Mpu6050;
    use crate::error::BusError;
    use crate::hw::mock::{MockBus, MockClock, MockDelay, MockTransport};
    use proptest::prelude::*;

    /// Replays a fixed list of samples.
    struct Replay(std::vec::IntoIter<RawSample>);

    impl GyroSource for Replay {
        fn read_rate(&mut self) -> Result<RawSample, BusError> {
            self.0.next().ok_or(BusError::I2c)
        }
    }

    fn config(sample_count: u32) -> CalibrationConfig {
        CalibrationConfig {
            sample_count,
            settle_ms: 100,
            sample_interval_ms: 2,
        }
    }

    fn rig() -> (MockTransport, MockDelay) {
        let clock = MockClock::new();
        (MockTransport::new(clock.clone()), MockDelay::new(clock))
    }

    #[test]
    fn constant_input_gives_that_offset() {
        let (mut transport, mut delay) = rig();
        let mut src = Replay(vec![RawSample::new(100, 100, 100); 500].into_iter());

        let bias = BiasCalibrator::new(config(500))
            .calibrate(&mut src, &mut transport, &mut delay)
            .unwrap();

        assert_eq!(bias, BiasOffset::new(100, 100, 100));
    }

    #[test]
    fn mean_truncates_toward_zero() {
        let mut run = CalibrationRun::new();
        run.add(RawSample::new(1, -1, 3));
        run.add(RawSample::new(2, -2, 3));
        assert_eq!(run.count(), 2);
        assert_eq!(run.finish(), Some(BiasOffset::new(1, -1, 3)));
    }

    #[test]
    fn transport_serviced_throughout() {
        let (mut transport, mut delay) = rig();
        let mut src = Replay(vec![RawSample::default(); 500].into_iter());

        BiasCalibrator::new(config(500))
            .calibrate(&mut src, &mut transport, &mut delay)
            .unwrap();

        // 100 ms settle = 20 slices, then one service per sample.
        assert_eq!(transport.services(), 20 + 500);
        transport.assert_serviced_within(u64::from(SETTLE_SLICE_MS));
        assert!(transport.reports().is_empty());
    }

    #[test]
    fn reads_from_the_gyro_driver() {
        let (mut transport, mut delay) = rig();
        let mut bus = MockBus::new();
        // (-40, 12, 7) big-endian
        bus.push_response(&[0xFF, 0xD8, 0x00, 0x0C, 0x00, 0x07]);
        let mut imu = Mpu6050::new(bus, 0x68);

        let bias = BiasCalibrator::new(config(50))
            .calibrate(&mut imu, &mut transport, &mut delay)
            .unwrap();

        assert_eq!(bias, BiasOffset::new(-40, 12, 7));
    }

    #[test]
    fn bus_error_aborts_run() {
        let (mut transport, mut delay) = rig();
        let mut src = Replay(vec![RawSample::default(); 10].into_iter());

        let err = BiasCalibrator::new(config(11))
            .calibrate(&mut src, &mut transport, &mut delay)
            .unwrap_err();

        assert_eq!(err, CalibrationError::Bus(BusError::I2c));
    }

    #[test]
    fn zero_samples_rejected() {
        let (mut transport, mut delay) = rig();
        let mut src = Replay(Vec::new().into_iter());

        let err = BiasCalibrator::new(config(0))
            .calibrate(&mut src, &mut transport, &mut delay)
            .unwrap_err();

        assert_eq!(err, CalibrationError::EmptyRun);
        assert_eq!(delay.calls(), 0);
    }

    proptest! {
        #[test]
        fn offset_is_integer_mean(samples in prop::collection::vec(any::<(i16, i16, i16)>(), 1..600)) {
            let mut run = CalibrationRun::new();
            let mut sums = [0i64; 3];
            for &(x, y, z) in &samples {
                run.add(RawSample::new(x, y, z));
                sums[0] += i64::from(x);
                sums[1] += i64::from(y);
                sums[2] += i64::from(z);
            }
            let n = samples.len() as i64;

            prop_assert_eq!(
                run.finish(),
                Some(BiasOffset::new(
                    (sums[0] / n) as i32,
                    (sums[1] / n) as i32,
                    (sums[2] / n) as i32,
                ))
            );
        }
    }
}
