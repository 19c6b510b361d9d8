use core::sync::atomic::{AtomicU32, Ordering};

/// Monotonic link counters, bumped by the controllers and read by the HTTP
/// status page.
pub struct LinkCounters {
    connect_attempts: AtomicU32,
    retries: AtomicU32,
    retries_refused: AtomicU32,
    disconnects: AtomicU32,
    addresses_acquired: AtomicU32,
    addresses_lost: AtomicU32,
    credential_erasures: AtomicU32,
    foreign_events: AtomicU32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinkCountersSnapshot {
    pub connect_attempts: u32,
    pub retries: u32,
    pub retries_refused: u32,
    pub disconnects: u32,
    pub addresses_acquired: u32,
    pub addresses_lost: u32,
    pub credential_erasures: u32,
    pub foreign_events: u32,
}

impl LinkCounters {
    pub const fn new() -> Self {
        Self {
            connect_attempts: AtomicU32::new(0),
            retries: AtomicU32::new(0),
            retries_refused: AtomicU32::new(0),
            disconnects: AtomicU32::new(0),
            addresses_acquired: AtomicU32::new(0),
            addresses_lost: AtomicU32::new(0),
            credential_erasures: AtomicU32::new(0),
            foreign_events: AtomicU32::new(0),
        }
    }

    pub(crate) fn record_connect_attempt(&self) {
        bump(&self.connect_attempts);
    }

    pub(crate) fn record_retry(&self) {
        bump(&self.retries);
    }

    pub(crate) fn record_retry_refused(&self) {
        bump(&self.retries_refused);
    }

    pub(crate) fn record_disconnect(&self) {
        bump(&self.disconnects);
    }

    pub(crate) fn record_address_acquired(&self) {
        bump(&self.addresses_acquired);
    }

    pub(crate) fn record_address_lost(&self) {
        bump(&self.addresses_lost);
    }

    pub(crate) fn record_credential_erasure(&self) {
        bump(&self.credential_erasures);
    }

    pub(crate) fn record_foreign_event(&self) {
        bump(&self.foreign_events);
    }

    pub fn snapshot(&self) -> LinkCountersSnapshot {
        LinkCountersSnapshot {
            connect_attempts: self.connect_attempts.load(Ordering::Relaxed),
            retries: self.retries.load(Ordering::Relaxed),
            retries_refused: self.retries_refused.load(Ordering::Relaxed),
            disconnects: self.disconnects.load(Ordering::Relaxed),
            addresses_acquired: self.addresses_acquired.load(Ordering::Relaxed),
            addresses_lost: self.addresses_lost.load(Ordering::Relaxed),
            credential_erasures: self.credential_erasures.load(Ordering::Relaxed),
            foreign_events: self.foreign_events.load(Ordering::Relaxed),
        }
    }
}

impl Default for LinkCounters {
    fn default() -> Self {
        Self::new()
    }
}

fn bump(counter: &AtomicU32) {
    counter.fetch_add(1, Ordering::Relaxed);
}
