use super::{
    bus::{EventBus, Subscriber},
    error::NetError,
    link_state::{LinkState, SharedLinkState},
    ports::WiredLink,
    registry::InterfaceRegistry,
};
use crate::firmware::{
    config::WIRED_DESCRIPTOR,
    telemetry::LinkCounters,
    types::{EventClass, EventId, InterfaceKind, IpInfo, LinkEvent},
};

/// Tracks the Ethernet lease. Link-layer events are only logged; the lease
/// alone decides whether wired is usable.
pub struct WiredLinkController<'a, W> {
    link: W,
    state: LinkState,
    shared: &'a SharedLinkState,
}

impl<'a, W: WiredLink> WiredLinkController<'a, W> {
    pub fn new(link: W, shared: &'a SharedLinkState) -> Self {
        Self {
            link,
            state: LinkState::DOWN,
            shared,
        }
    }

    pub fn start(
        &mut self,
        registry: &mut InterfaceRegistry,
        bus: &mut EventBus,
    ) -> Result<(), NetError> {
        registry.register(WIRED_DESCRIPTOR, InterfaceKind::Wired)?;
        bus.subscribe(EventClass::Ethernet, None, Subscriber::Wired)?;
        bus.subscribe(
            EventClass::Ip,
            Some(EventId::AddressAcquired),
            Subscriber::Wired,
        )?;
        bus.subscribe(EventClass::Ip, Some(EventId::AddressLost), Subscriber::Wired)?;

        self.link.start().map_err(|err| {
            log::error!("eth_link: driver start failed err={:?}", err);
            NetError::DriverStart {
                kind: InterfaceKind::Wired,
            }
        })?;
        self.shared.publish(self.state);
        log::info!("eth_link: started");
        Ok(())
    }

    pub fn handle_event(
        &mut self,
        registry: &InterfaceRegistry,
        event: &LinkEvent,
        counters: &LinkCounters,
    ) {
        match event {
            LinkEvent::EthernetStarted => log::info!("eth_link: link negotiating"),
            LinkEvent::EthernetDisconnected => log::info!("eth_link: cable disconnected"),
            LinkEvent::AddressAcquired { interface, info } => {
                if !registry.owned_by(WIRED_DESCRIPTOR, interface) {
                    counters.record_foreign_event();
                    return;
                }
                self.state.address = *info;
                self.state.connected = true;
                counters.record_address_acquired();
                log::info!("eth_link: got {}", info);
            }
            LinkEvent::AddressLost { interface } => {
                if !registry.owned_by(WIRED_DESCRIPTOR, interface) {
                    counters.record_foreign_event();
                    return;
                }
                self.state.connected = false;
                counters.record_address_lost();
                log::info!("eth_link: address lost");
            }
            LinkEvent::StationStarted | LinkEvent::StationDisconnected { .. } => return,
        }
        self.shared.publish(self.state);
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn ip(&self) -> Option<IpInfo> {
        self.state.ip()
    }
}
