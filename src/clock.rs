// Breathalyzer - Time Source
//
// Every deadline in the firmware is computed from milliseconds since boot.
// The controller reads the clock once per loop iteration.

use std::time::Instant;

pub trait Clock {
    fn now_ms(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// Milliseconds since this clock was created (i.e. since boot).
///
/// `Instant` is backed by `esp_timer` under ESP-IDF, so the same clock works
/// on the device and on the host.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    boot: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            boot: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.boot.elapsed().as_millis() as u64
    }
}
