// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # airpointer Firmware
//!
//! Turns hand motion into mouse movement. An MPU-6050 gyro on I2C (or an LD2450 radar on a
//! UART) is sampled on an STM32F767 and the result is sent to the host as a USB HID relative
//! pointer.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`hw`] | Bus, serial, USB, and delay boundaries plus their STM32F7 implementations |
//! | [`drivers`] | Device-level drivers (MPU-6050, DRV2605L) |
//! | [`protocol`] | LD2450 frame layout and the byte-stream synchronizer |
//! | [`control`] | Calibration, motion mapping, and the report loop |
//! | [`config`] | Compile-time tunables |
//!
//! Everything outside `hw`'s board modules is portable and unit-tested on the host:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board (gyro build, or add `--features radar`):
//!
//! ```bash
//! cargo run --release --features board
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod hw;
pub mod protocol;
pub mod sample;
