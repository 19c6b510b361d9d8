use core::net::Ipv4Addr;

use super::{
    save_credentials, ConnectivityManager, InitReport, InterfaceStateQuery, SharedNetworkState,
    StationCredentials, StationRadio, WiredLink,
};
use crate::firmware::{
    config::{NetworkConfig, RECOVERY_NAMESPACE, RESTART_COUNTER_KEY},
    storage::{ram_flash::RamFlash, FlashKvStore, KeyValueStore},
    types::{IpInfo, LinkEvent, ResetCause},
};

pub(super) type TestStore = FlashKvStore<RamFlash>;
pub(super) type TestManager<'a> = ConnectivityManager<'a, FakeRadio, TestStore, FakeWired>;

#[derive(Debug, Default)]
pub(super) struct FakeRadio {
    pub(super) configured: Option<Option<StationCredentials>>,
    pub(super) starts: u32,
    pub(super) connects: u32,
    pub(super) restores: u32,
    pub(super) fail_start: bool,
}

impl StationRadio for FakeRadio {
    type Error = &'static str;

    fn configure(&mut self, credentials: Option<&StationCredentials>) -> Result<(), Self::Error> {
        self.configured = Some(credentials.cloned());
        Ok(())
    }

    fn start(&mut self) -> Result<(), Self::Error> {
        if self.fail_start {
            return Err("radio offline");
        }
        self.starts += 1;
        Ok(())
    }

    fn connect(&mut self) -> Result<(), Self::Error> {
        self.connects += 1;
        Ok(())
    }

    fn restore_factory_defaults(&mut self) -> Result<(), Self::Error> {
        self.restores += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub(super) struct FakeWired {
    pub(super) starts: u32,
    pub(super) fail_start: bool,
}

impl WiredLink for FakeWired {
    type Error = &'static str;

    fn start(&mut self) -> Result<(), Self::Error> {
        if self.fail_start {
            return Err("no phy");
        }
        self.starts += 1;
        Ok(())
    }
}

pub(super) struct UpSet<'a>(pub(super) &'a [&'a str]);

impl InterfaceStateQuery for UpSet<'_> {
    fn is_up(&self, descriptor: &str) -> bool {
        self.0.iter().any(|up| *up == descriptor)
    }
}

pub(super) fn credentials() -> StationCredentials {
    StationCredentials::new("studio", "hunter22").unwrap()
}

pub(super) fn fresh_store() -> TestStore {
    FlashKvStore::open(RamFlash::new(), 0)
}

pub(super) fn provisioned_store() -> TestStore {
    let mut store = fresh_store();
    save_credentials(&mut store, &credentials()).unwrap();
    store
}

/// Power cycle: anything not committed is gone.
pub(super) fn reopen(store: TestStore) -> TestStore {
    FlashKvStore::open(store.into_inner(), 0)
}

/// Power cycle with the flash tweaked while the device is off.
pub(super) fn reopen_with(store: TestStore, tweak: impl FnOnce(&mut RamFlash)) -> TestStore {
    let mut flash = store.into_inner();
    tweak(&mut flash);
    FlashKvStore::open(flash, 0)
}

pub(super) fn with_counter(mut store: TestStore, counter: &[u8]) -> TestStore {
    store
        .set(RECOVERY_NAMESPACE, RESTART_COUNTER_KEY, counter)
        .unwrap();
    store.commit().unwrap();
    store
}

pub(super) fn restart_counter(store: &mut TestStore) -> Option<u8> {
    store.get_u8(RECOVERY_NAMESPACE, RESTART_COUNTER_KEY).unwrap()
}

pub(super) fn wired_config() -> NetworkConfig {
    NetworkConfig {
        wired_enabled: true,
        ..NetworkConfig::defaults()
    }
}

pub(super) fn lease(last_octet: u8) -> IpInfo {
    IpInfo::new(
        Ipv4Addr::new(192, 168, 1, last_octet),
        Ipv4Addr::new(255, 255, 255, 0),
        Ipv4Addr::new(192, 168, 1, 1),
    )
}

pub(super) fn acquired(interface: &str, info: IpInfo) -> LinkEvent {
    LinkEvent::address_acquired(interface, info).unwrap()
}

pub(super) fn lost(interface: &str) -> LinkEvent {
    LinkEvent::address_lost(interface).unwrap()
}

pub(super) fn started_manager<'a>(
    config: &NetworkConfig,
    shared: &'a SharedNetworkState,
    store: TestStore,
) -> TestManager<'a> {
    let mut manager =
        ConnectivityManager::new(config, shared, FakeRadio::default(), store, Some(FakeWired::default()));
    manager.init(&ResetCause::Software).unwrap();
    manager
}

/// One full boot with a fresh radio; the store is reopened first.
pub(super) fn boot_once(
    config: &NetworkConfig,
    store: TestStore,
    cause: ResetCause,
) -> (InitReport, FakeRadio, TestStore) {
    let shared = SharedNetworkState::new();
    let mut manager: TestManager<'_> =
        ConnectivityManager::new(config, &shared, FakeRadio::default(), reopen(store), None);
    let report = manager.init(&cause).unwrap();
    let (radio, store) = manager.into_parts();
    (report, radio, store)
}
