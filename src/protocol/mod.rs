// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

pub mod frame_sync;
pub mod ld2450;

pub use frame_sync::FrameSynchronizer;
pub use ld2450::{FrameCheck, RadarFrame, RadarTarget};
