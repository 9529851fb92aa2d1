//! Time source and sleeper used by the backoff policy and the retry loop.
//!
//! Production code uses [`SystemClock`]. [`ManualClock`] keeps virtual time so
//! tests can exercise multi-hour budgets without waiting.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of "now" for elapsed-time accounting.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Blocks the current thread between attempts.
pub trait Sleeper {
    fn sleep(&self, d: Duration);
}

/// Wall clock: `Instant::now` and `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl Sleeper for SystemClock {
    fn sleep(&self, d: Duration) {
        std::thread::sleep(d);
    }
}

/// Virtual clock. Cloned handles share the same time line, so one handle can
/// live in the policy while another is the driver's sleeper.
///
/// Not `Send`: the retry loop is single-threaded.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Rc<Cell<Duration>>,
    sleeps: Rc<RefCell<Vec<Duration>>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
            sleeps: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Move virtual time forward without recording a sleep (e.g. to model
    /// how long an attempt ran).
    pub fn advance(&self, d: Duration) {
        self.offset.set(self.offset.get().saturating_add(d));
    }

    /// Virtual time since the clock was created.
    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }

    /// Every duration passed to [`Sleeper::sleep`], in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}

impl Sleeper for ManualClock {
    fn sleep(&self, d: Duration) {
        self.sleeps.borrow_mut().push(d);
        self.advance(d);
    }
}
