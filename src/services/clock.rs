//! Wall clock abstraction so range resolution can be frozen in tests

use chrono::{Local, NaiveDateTime};

pub trait Clock: Send + Sync {
    /// Current server local time
    fn now(&self) -> NaiveDateTime;
}

/// The server's local clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stopped at a given instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
