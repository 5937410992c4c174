// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Cooperative report loop.
//!
//! One tick services the host transport, polls the pointer source if the transport can take a
//! report, forwards the result, then sleeps for the poll interval. The transport is serviced on
//! every tick whether or not anything is sent, which bounds the gap between service calls to one
//! poll interval plus one tick's worth of bus work.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! let mut scheduler = ReportScheduler::new(usb, delay, console, &Config::DEFAULT);
//! scheduler.run(&mut pointer);
//! ```

use core::fmt::Write;

use crate::config::{Config, ReportPolicy};
use crate::control::pointer::{PointerSource, Reading};
use crate::error::{BusError, TransportError};
use crate::hw::{Delay, HostTransport, PointerReport};
use crate::protocol::RadarTarget;
use crate::sample::Displacement;

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Transport not ready; the source was not polled.
    NotReady,
    /// Source had nothing new.
    Idle,
    /// Zero motion, not sent under [`ReportPolicy::SkipIdle`].
    Suppressed,
    /// A report was accepted by the transport.
    Reported(Displacement),
    /// A radar target was written to the console.
    Telemetry(RadarTarget),
    /// The source failed; this tick was skipped.
    BusFault(BusError),
    /// The transport refused the report.
    Dropped(TransportError),
}

/// Loop counters, mostly for the debug console.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub ticks: u32,
    pub reports: u32,
    pub bus_faults: u32,
    pub dropped: u32,
}

pub struct ReportScheduler<T, D, W>
where
    T: HostTransport,
    D: Delay,
    W: Write,
{
    transport: T,
    delay: D,
    console: W,
    poll_interval_ms: u32,
    policy: ReportPolicy,
    stats: LoopStats,
}

impl<T, D, W> ReportScheduler<T, D, W>
where
    T: HostTransport,
    D: Delay,
    W: Write,
{
    pub fn new(transport: T, delay: D, console: W, config: &Config) -> Self {
        Self {
            transport,
            delay,
            console,
            poll_interval_ms: config.poll_interval_ms,
            policy: config.report_policy,
            stats: LoopStats::default(),
        }
    }

    /// Run one tick.
    pub fn tick<P: PointerSource>(&mut self, source: &mut P) -> TickOutcome {
        self.transport.service();
        self.stats.ticks = self.stats.ticks.wrapping_add(1);

        let outcome = if self.transport.is_ready() {
            self.poll_once(source)
        } else {
            TickOutcome::NotReady
        };

        self.delay.delay_ms(self.poll_interval_ms);
        outcome
    }

    /// Tick forever.
    pub fn run<P: PointerSource>(&mut self, source: &mut P) -> ! {
        loop {
            self.tick(source);
        }
    }

    #[inline]
    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    #[inline]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[inline]
    pub fn console(&self) -> &W {
        &self.console
    }

    pub fn free(self) -> (T, D, W) {
        (self.transport, self.delay, self.console)
    }

    fn poll_once<P: PointerSource>(&mut self, source: &mut P) -> TickOutcome {
        match source.poll() {
            Ok(Reading::Nothing) => TickOutcome::Idle,
            Ok(Reading::Motion(d)) => self.report(d),
            Ok(Reading::Target(t)) => {
                let _ = writeln!(
                    self.console,
                    "target x={} mm y={} mm speed={} cm/s\r",
                    t.x, t.y, t.speed
                );
                TickOutcome::Telemetry(t)
            }
            Err(e) => {
                self.stats.bus_faults = self.stats.bus_faults.wrapping_add(1);
                let _ = writeln!(self.console, "bus fault: {e}\r");
                TickOutcome::BusFault(e)
            }
        }
    }

    fn report(&mut self, d: Displacement) -> TickOutcome {
        if d.is_zero() && self.policy == ReportPolicy::SkipIdle {
            return TickOutcome::Suppressed;
        }
        match self
            .transport
            .submit_pointer_report(PointerReport::motion(d.dx, d.dy))
        {
            Ok(()) => {
                self.stats.reports = self.stats.reports.wrapping_add(1);
                TickOutcome::Reported(d)
            }
            Err(e) => {
                self.stats.dropped = self.stats.dropped.wrapping_add(1);
                TickOutcome::Dropped(e)
            }
        }
    }
}
