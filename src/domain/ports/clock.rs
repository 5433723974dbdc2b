//! Clock port - time source for confirmation polling
//!
//! Lets tests simulate elapsed time without sleeping.

use std::time::{Duration, Instant};

pub trait Clock {
    fn now(&self) -> Instant;

    fn sleep(&self, duration: Duration);
}
