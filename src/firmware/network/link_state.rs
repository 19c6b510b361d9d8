use core::cell::Cell;

use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

use crate::firmware::{telemetry::LinkCounters, types::IpInfo};

/// Status of one link. `address` keeps the last lease after the link drops;
/// only `connected` says whether it is still valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkState {
    pub connected: bool,
    pub address: IpInfo,
    pub retry_count: u32,
}

impl LinkState {
    pub const DOWN: Self = Self {
        connected: false,
        address: IpInfo::UNSPECIFIED,
        retry_count: 0,
    };

    pub fn ip(&self) -> Option<IpInfo> {
        self.connected.then_some(self.address)
    }
}

impl Default for LinkState {
    fn default() -> Self {
        Self::DOWN
    }
}

/// Published copy of a controller's [`LinkState`].
///
/// The owning controller is the only writer; readers on other tasks always
/// see a whole state, never a half-updated one.
pub struct SharedLinkState {
    inner: Mutex<CriticalSectionRawMutex, Cell<LinkState>>,
}

impl SharedLinkState {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(LinkState::DOWN)),
        }
    }

    pub fn snapshot(&self) -> LinkState {
        self.inner.lock(Cell::get)
    }

    pub fn ip(&self) -> Option<IpInfo> {
        self.snapshot().ip()
    }

    pub(crate) fn publish(&self, state: LinkState) {
        self.inner.lock(|cell| cell.set(state));
    }
}

impl Default for SharedLinkState {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the connectivity manager publishes for other tasks.
pub struct SharedNetworkState {
    pub wired: SharedLinkState,
    pub wireless: SharedLinkState,
    pub counters: LinkCounters,
}

impl SharedNetworkState {
    pub const fn new() -> Self {
        Self {
            wired: SharedLinkState::new(),
            wireless: SharedLinkState::new(),
            counters: LinkCounters::new(),
        }
    }

    pub fn reader(&self) -> IpStatusReader<'_> {
        IpStatusReader { shared: self }
    }
}

impl Default for SharedNetworkState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub struct IpStatusReader<'a> {
    shared: &'a SharedNetworkState,
}

impl<'a> IpStatusReader<'a> {
    /// Wired wins whenever both links hold a lease.
    pub fn current_ip(&self) -> Option<IpInfo> {
        self.shared.wired.ip().or_else(|| self.shared.wireless.ip())
    }

    pub fn wired(&self) -> LinkState {
        self.shared.wired.snapshot()
    }

    pub fn wireless(&self) -> LinkState {
        self.shared.wireless.snapshot()
    }

    pub fn counters(&self) -> &'a LinkCounters {
        &self.shared.counters
    }
}
