// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Pointer Pipeline
//!
//! Everything between a raw sensor reading and a HID report.
//!
//! ## Modules
//!
//! - [`calibration`] - Startup zero-rate bias measurement.
//! - [`mapper`] - Dead-zone and sensitivity mapping to bounded pointer deltas.
//! - [`pointer`] - Gyro and radar pointer sources.
//! - [`scheduler`] - Cooperative loop that services the transport and sends reports.

pub mod calibration;
pub mod mapper;
pub mod pointer;
pub mod scheduler;

pub use calibration::{BiasCalibrator, CalibrationRun};
pub use mapper::MotionMapper;
pub use pointer::{GyroPointer, PointerSource, RadarPointer, Reading};
pub use scheduler::{LoopStats, ReportScheduler, TickOutcome};
