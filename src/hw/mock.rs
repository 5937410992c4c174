// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! In-memory peripherals for host tests.
//!
//! [`MockClock`] is shared between [`MockDelay`] and [`MockTransport`] so the transport can check
//! how long the firmware went without servicing it.

extern crate std;

use core::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use crate::error::{BusError, TransportError};
use crate::hw::traits::{ByteSource, Delay, HostTransport, PointerReport, SensorBus};

/// Monotonic fake time in milliseconds.
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    now_ms: Rc<Cell<u64>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    pub fn advance(&self, ms: u32) {
        self.now_ms.set(self.now_ms.get() + u64::from(ms));
    }
}

/// Delay that only advances the shared clock.
#[derive(Debug, Clone)]
pub struct MockDelay {
    clock: MockClock,
    calls: u32,
}

impl MockDelay {
    pub fn new(clock: MockClock) -> Self {
        Self { clock, calls: 0 }
    }

    pub fn calls(&self) -> u32 {
        self.calls
    }
}

impl Delay for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.calls += 1;
        self.clock.advance(ms);
    }
}

/// Recorded bus transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusTransaction {
    Write { addr: u8, reg: u8, data: Vec<u8> },
    Read { addr: u8, reg: u8, len: usize },
}

/// Register-level I2C fake.
///
/// Reads are answered from a queue of canned responses; once the queue is empty the last
/// response repeats. A queued `Err` fails that one transaction.
#[derive(Debug, Default)]
pub struct MockBus {
    transactions: RefCell<Vec<BusTransaction>>,
    responses: VecDeque<Result<Vec<u8>, BusError>>,
    last: Vec<u8>,
    fail_writes: Option<BusError>,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&mut self, data: &[u8]) {
        self.responses.push_back(Ok(data.to_vec()));
    }

    pub fn push_error(&mut self, err: BusError) {
        self.responses.push_back(Err(err));
    }

    pub fn fail_writes(&mut self, err: BusError) {
        self.fail_writes = Some(err);
    }

    pub fn transactions(&self) -> Vec<BusTransaction> {
        self.transactions.borrow().clone()
    }
}

impl SensorBus for MockBus {
    fn write_register(&mut self, addr: u8, reg: u8, bytes: &[u8]) -> Result<(), BusError> {
        self.transactions.borrow_mut().push(BusTransaction::Write {
            addr,
            reg,
            data: bytes.to_vec(),
        });
        match self.fail_writes {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn read_registers(&mut self, addr: u8, reg: u8, buf: &mut [u8]) -> Result<(), BusError> {
        self.transactions.borrow_mut().push(BusTransaction::Read {
            addr,
            reg,
            len: buf.len(),
        });
        if let Some(next) = self.responses.pop_front() {
            self.last = next?;
        }
        let n = core::cmp::min(buf.len(), self.last.len());
        buf[..n].copy_from_slice(&self.last[..n]);
        buf[n..].fill(0);
        Ok(())
    }
}

/// Serial receiver fed from an in-memory buffer.
#[derive(Debug, Default)]
pub struct MockSerial {
    rx: VecDeque<Result<u8, BusError>>,
    reads: usize,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inject(&mut self, data: &[u8]) {
        self.rx.extend(data.iter().copied().map(Ok));
    }

    pub fn inject_error(&mut self, err: BusError) {
        self.rx.push_back(Err(err));
    }

    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl ByteSource for MockSerial {
    fn is_byte_available(&mut self) -> bool {
        !self.rx.is_empty()
    }

    fn read_byte(&mut self) -> Result<u8, BusError> {
        self.reads += 1;
        self.rx.pop_front().unwrap_or(Err(BusError::Serial))
    }
}

/// HID transport that records reports and the longest gap between `service` calls.
#[derive(Debug)]
pub struct MockTransport {
    clock: MockClock,
    ready: bool,
    busy: bool,
    services: u32,
    last_service_ms: u64,
    max_gap_ms: u64,
    reports: Vec<PointerReport>,
}

impl MockTransport {
    pub fn new(clock: MockClock) -> Self {
        let now = clock.now_ms();
        Self {
            clock,
            ready: true,
            busy: false,
            services: 0,
            last_service_ms: now,
            max_gap_ms: 0,
            reports: Vec::new(),
        }
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    /// Make every submission fail with [`TransportError::Busy`].
    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub fn services(&self) -> u32 {
        self.services
    }

    pub fn reports(&self) -> &[PointerReport] {
        &self.reports
    }

    /// Longest stretch of fake time without a `service` call, including the one still open.
    pub fn max_service_gap_ms(&self) -> u64 {
        let open = self.clock.now_ms() - self.last_service_ms;
        core::cmp::max(self.max_gap_ms, open)
    }

    /// Fail the test if the device stack went unserviced for longer than `budget_ms`.
    pub fn assert_serviced_within(&self, budget_ms: u64) {
        let gap = self.max_service_gap_ms();
        assert!(
            gap <= budget_ms,
            "transport went {gap} ms without service (budget {budget_ms} ms)"
        );
    }
}

impl HostTransport for MockTransport {
    fn service(&mut self) {
        let now = self.clock.now_ms();
        self.max_gap_ms = core::cmp::max(self.max_gap_ms, now - self.last_service_ms);
        self.last_service_ms = now;
        self.services += 1;
    }

    fn is_ready(&mut self) -> bool {
        self.ready
    }

    fn submit_pointer_report(&mut self, report: PointerReport) -> Result<(), TransportError> {
        if self.busy {
            return Err(TransportError::Busy);
        }
        self.reports.push(report);
        Ok(())
    }
}
