use embassy_futures::select::{select, Either};
use embassy_net::Stack;
use embassy_time::{Instant, Timer};
use esp_storage::FlashStorage;

use super::radio::EspStationRadio;
use crate::firmware::{
    config::{channels::LINK_EVENTS, STATION_DESCRIPTOR},
    network::{ConnectivityManager, InterfaceStateQuery, NoWiredLink},
    storage::FlashKvStore,
    types::{IpInfo, LinkEvent},
};

pub(super) type RuntimeStore = FlashKvStore<FlashStorage<'static>>;
pub(super) type RuntimeManager =
    ConnectivityManager<'static, EspStationRadio, RuntimeStore, NoWiredLink>;

/// Live link status of the station netif. Wired never exists on this target.
pub(super) struct StackLinkQuery {
    stack: Stack<'static>,
}

impl StackLinkQuery {
    pub(super) const fn new(stack: Stack<'static>) -> Self {
        Self { stack }
    }
}

impl InterfaceStateQuery for StackLinkQuery {
    fn is_up(&self, descriptor: &str) -> bool {
        descriptor == STATION_DESCRIPTOR && self.stack.is_link_up()
    }
}

/// Sole owner of the manager. Also waits out the restart-recovery grace
/// period, counted from boot.
#[embassy_executor::task]
pub(super) async fn link_task(mut manager: RuntimeManager, stack: Stack<'static>) {
    let query = StackLinkQuery::new(stack);
    let station = manager.find_interface(STATION_DESCRIPTOR).cloned();
    let mut grace_deadline = manager
        .recovery_grace()
        .map(|grace| Instant::from_ticks(0) + grace);

    loop {
        let event = match grace_deadline {
            Some(deadline) => match select(LINK_EVENTS.receive(), Timer::at(deadline)).await {
                Either::First(event) => event,
                Either::Second(()) => {
                    manager.on_recovery_grace_elapsed();
                    grace_deadline = None;
                    continue;
                }
            },
            None => LINK_EVENTS.receive().await,
        };
        manager.dispatch(&event);

        if let Some(station) = station.as_ref() {
            match manager.is_up(station, &query) {
                Ok(up) => log::debug!(
                    "link: {} up={} phase={:?}",
                    station.descriptor(),
                    up,
                    manager.wireless_phase()
                ),
                Err(err) => log::warn!("link: state query failed err={}", err),
            }
        }
    }
}

/// Turns DHCP lease changes of the station stack into Ip events.
#[embassy_executor::task]
pub(super) async fn address_watch_task(stack: Stack<'static>) {
    loop {
        stack.wait_config_up().await;
        if let Some(config) = stack.config_v4() {
            let info = IpInfo::from_prefix(
                config.address.address(),
                config.address.prefix_len(),
                config.gateway,
            );
            if let Some(event) = LinkEvent::address_acquired(STATION_DESCRIPTOR, info) {
                LINK_EVENTS.send(event).await;
            }
        }

        stack.wait_config_down().await;
        if let Some(event) = LinkEvent::address_lost(STATION_DESCRIPTOR) {
            LINK_EVENTS.send(event).await;
        }
    }
}
