//! Countdown state machine.
//!
//! The engine never sleeps or spawns anything itself. Entering `Running`
//! acquires a lease from its [`Cadence`]; the lease is dropped on every way out
//! of `Running` (pause, expiry, reset), which is what stops the source. Each
//! lease has an id, and [`CountdownEngine::on_second`] only ticks for the live
//! one, so a second already in flight from a released source is ignored.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

pub type LeaseId = u64;

/// A source of one-second beats that can be switched on per lease
pub trait Cadence {
    /// Held while the source is live; dropping it cancels the source
    type Guard;

    fn acquire(&mut self, lease: LeaseId) -> Self::Guard;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Idle { remaining: u32 },
    Running { remaining: u32 },
    Expired,
}

struct Lease<G> {
    id: LeaseId,
    _guard: G,
}

pub struct CountdownEngine<C: Cadence> {
    duration: u32,
    state: CountdownState,
    cadence: C,
    lease: Option<Lease<C::Guard>>,
    next_lease: LeaseId,
}

impl<C: Cadence> fmt::Debug for CountdownEngine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountdownEngine")
            .field("duration", &self.duration)
            .field("state", &self.state)
            .field("lease", &self.lease_id())
            .finish()
    }
}

impl<C: Cadence> CountdownEngine<C> {
    pub fn new(duration: u32, cadence: C) -> Self {
        Self {
            duration,
            state: CountdownState::Idle {
                remaining: duration,
            },
            cadence,
            lease: None,
            next_lease: 0,
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn remaining_secs(&self) -> u32 {
        match self.state {
            CountdownState::Idle { remaining } | CountdownState::Running { remaining } => remaining,
            CountdownState::Expired => 0,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, CountdownState::Running { .. })
    }

    pub fn is_expired(&self) -> bool {
        self.state == CountdownState::Expired
    }

    /// Id of the live cadence lease, if the countdown is running
    pub fn lease_id(&self) -> Option<LeaseId> {
        self.lease.as_ref().map(|l| l.id)
    }

    pub fn start(&mut self) {
        if let CountdownState::Idle { remaining } = self.state {
            if remaining == 0 {
                return;
            }
            let id = self.next_lease;
            self.next_lease += 1;
            self.lease = Some(Lease {
                id,
                _guard: self.cadence.acquire(id),
            });
            self.state = CountdownState::Running { remaining };
            debug!(remaining, lease = id, "countdown started");
        }
    }

    pub fn pause(&mut self) {
        if let CountdownState::Running { remaining } = self.state {
            self.release();
            self.state = CountdownState::Idle { remaining };
            debug!(remaining, "countdown paused");
        }
    }

    pub fn toggle(&mut self) {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    pub fn tick(&mut self) {
        if let CountdownState::Running { remaining } = self.state {
            if remaining > 1 {
                self.state = CountdownState::Running {
                    remaining: remaining - 1,
                };
            } else {
                self.release();
                self.state = CountdownState::Expired;
                debug!(duration = self.duration, "countdown expired");
            }
        }
    }

    /// Tick on behalf of cadence lease `id`. Returns whether it counted.
    pub fn on_second(&mut self, id: LeaseId) -> bool {
        if self.lease_id() == Some(id) {
            self.tick();
            true
        } else {
            false
        }
    }

    /// Back to `Idle(new_duration)` from any state
    pub fn reset(&mut self, new_duration: u32) {
        self.release();
        self.duration = new_duration;
        self.state = CountdownState::Idle {
            remaining: new_duration,
        };
        debug!(duration = new_duration, "countdown reset");
    }

    /// Fraction of the duration already elapsed, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.duration == 0 {
            return 0.0;
        }
        1.0 - self.remaining_secs() as f64 / self.duration as f64
    }

    pub fn clock(&self) -> String {
        format_clock(self.remaining_secs())
    }

    fn release(&mut self) {
        // Dropping the guard cancels the source; a missing lease is fine.
        self.lease = None;
    }
}

/// Format seconds as zero-padded "MM:SS"
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Cadence that never beats on its own; ticks are driven by the caller.
/// Clones share a counter of live leases.
#[derive(Debug, Clone, Default)]
pub struct ManualCadence {
    live: Rc<Cell<usize>>,
    acquired: Rc<Cell<usize>>,
}

impl ManualCadence {
    /// Leases acquired and not yet dropped
    pub fn live_leases(&self) -> usize {
        self.live.get()
    }

    /// Leases acquired since creation
    pub fn acquired_leases(&self) -> usize {
        self.acquired.get()
    }
}

#[derive(Debug)]
pub struct ManualGuard {
    live: Rc<Cell<usize>>,
}

impl Drop for ManualGuard {
    fn drop(&mut self) {
        self.live.set(self.live.get().saturating_sub(1));
    }
}

impl Cadence for ManualCadence {
    type Guard = ManualGuard;

    fn acquire(&mut self, _lease: LeaseId) -> ManualGuard {
        self.live.set(self.live.get() + 1);
        self.acquired.set(self.acquired.get() + 1);
        ManualGuard {
            live: Rc::clone(&self.live),
        }
    }
}
