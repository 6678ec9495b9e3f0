use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, Thread};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};
use tracing::{debug, trace};

use crate::countdown::{Cadence, LeaseId};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum PomoEvent {
    Key(KeyEvent),
    Resize,
    /// One second elapsed for the given cadence lease
    Second(LeaseId),
    /// Nothing arrived within the runner's interval
    Tick,
}

/// Source of app events (keyboard, resize, cadence seconds)
pub trait PomoEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<PomoEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    tx: Sender<PomoEvent>,
    rx: Receiver<PomoEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let key_tx = tx.clone();

        thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if key_tx.send(PomoEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if key_tx.send(PomoEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { tx, rx }
    }

    /// Sender feeding the same queue, for cadence threads
    pub fn sender(&self) -> Sender<PomoEvent> {
        self.tx.clone()
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PomoEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<PomoEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<PomoEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<PomoEvent>) -> Self {
        Self { rx }
    }
}

impl PomoEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<PomoEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: PomoEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: PomoEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> PomoEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => PomoEvent::Tick,
        }
    }
}

/// Cadence backed by one thread per lease, posting `PomoEvent::Second` into
/// the app's event queue every `period`
#[derive(Debug, Clone)]
pub struct ThreadCadence {
    tx: Sender<PomoEvent>,
    period: Duration,
}

impl ThreadCadence {
    pub fn new(tx: Sender<PomoEvent>, period: Duration) -> Self {
        Self { tx, period }
    }
}

/// Stops its cadence thread when dropped
#[derive(Debug)]
pub struct ThreadGuard {
    stop: Arc<AtomicBool>,
    thread: Thread,
}

impl Drop for ThreadGuard {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        self.thread.unpark();
    }
}

impl Cadence for ThreadCadence {
    type Guard = ThreadGuard;

    fn acquire(&mut self, lease: LeaseId) -> ThreadGuard {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);
        let tx = self.tx.clone();
        let period = self.period;

        let handle = thread::spawn(move || {
            let mut next = Instant::now() + period;
            loop {
                let now = Instant::now();
                if now < next {
                    thread::park_timeout(next - now);
                }
                if thread_stop.load(Ordering::SeqCst) {
                    break;
                }
                // woken early without a stop request
                if Instant::now() < next {
                    continue;
                }
                trace!(lease, "cadence beat");
                if tx.send(PomoEvent::Second(lease)).is_err() {
                    break;
                }
                next += period;
            }
            debug!(lease, "cadence stopped");
        });

        ThreadGuard {
            stop,
            thread: handle.thread().clone(),
        }
    }
}
