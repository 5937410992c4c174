// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Byte-wise frame synchronizer for the LD2450 radar stream.
//!
//! Bytes are pushed one at a time as they arrive on the UART. While seeking, anything other than
//! the marker is dropped. Once the marker is seen the next `FRAME_LEN - 1` bytes are captured
//! unconditionally and the frame is emitted.
//!
//! There is no checksum on the wire. A marker value inside a corrupted payload can put the parser
//! off by some bytes until a real marker lines up again; [`FrameCheck::HeaderAndTail`] narrows that
//! window but cannot close it.

use crate::protocol::ld2450::{FrameCheck, RadarFrame, FRAME_LEN, MARKER};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Seek,
    Capture { len: usize },
}

pub struct FrameSynchronizer {
    state: State,
    buf: [u8; FRAME_LEN],
    check: FrameCheck,
    frames: u32,
    rejected: u32,
}

impl FrameSynchronizer {
    pub fn new(check: FrameCheck) -> Self {
        Self {
            state: State::Seek,
            buf: [0; FRAME_LEN],
            check,
            frames: 0,
            rejected: 0,
        }
    }

    /// Process a single incoming byte. Returns `Some(frame)` when a frame completes.
    pub fn push(&mut self, byte: u8) -> Option<RadarFrame> {
        match self.state {
            State::Seek => {
                if byte == MARKER {
                    self.buf[0] = byte;
                    self.state = State::Capture { len: 1 };
                }
                None
            }
            State::Capture { len } => {
                self.buf[len] = byte;
                let len = len + 1;
                if len < FRAME_LEN {
                    self.state = State::Capture { len };
                    return None;
                }

                if self.check.accepts(&self.buf) {
                    self.state = State::Seek;
                    self.frames = self.frames.wrapping_add(1);
                    Some(RadarFrame::from_bytes(self.buf))
                } else {
                    self.rejected = self.rejected.wrapping_add(1);
                    self.resync();
                    None
                }
            }
        }
    }

    /// True while part of a frame has been captured.
    #[inline]
    pub fn in_frame(&self) -> bool {
        matches!(self.state, State::Capture { .. })
    }

    /// Frames emitted so far.
    #[inline]
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Captured frames that failed the frame check.
    #[inline]
    pub fn rejected(&self) -> u32 {
        self.rejected
    }

    /// Drop any partial frame and go back to seeking.
    pub fn reset(&mut self) {
        self.state = State::Seek;
    }

    /// Rescan a rejected frame starting one byte after its marker.
    fn resync(&mut self) {
        match self.buf[1..].iter().position(|&b| b == MARKER) {
            Some(i) => {
                let start = i + 1;
                self.buf.copy_within(start.., 0);
                self.state = State::Capture {
                    len: FRAME_LEN - start,
                };
            }
            None => self.state = State::Seek,
        }
    }
}

impl Default for FrameSynchronizer {
    fn default() -> Self {
        Self::new(FrameCheck::MarkerOnly)
    }
}
