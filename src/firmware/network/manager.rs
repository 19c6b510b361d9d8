use embassy_time::Duration;

use super::{
    bus::{EventBus, Subscriber},
    error::NetError,
    link_state::{IpStatusReader, SharedNetworkState},
    ports::{InterfaceStateQuery, ResetCauseSource, StationRadio, WiredLink},
    registry::{InterfaceHandle, InterfaceRegistry},
    wired::WiredLinkController,
    wireless::{RecoveryOutcome, WirelessLinkController, WirelessPhase},
};
use crate::firmware::{
    config::NetworkConfig,
    storage::KeyValueStore,
    types::{IpInfo, LinkEvent},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitReport {
    pub wired_started: bool,
    pub recovery: RecoveryOutcome,
    pub needs_provisioning: bool,
}

/// Single entry point for bring-up and the "which address do we have" query.
pub struct ConnectivityManager<'a, R, S, W> {
    registry: InterfaceRegistry,
    bus: EventBus,
    wired: Option<WiredLinkController<'a, W>>,
    wireless: WirelessLinkController<'a, R, S>,
    shared: &'a SharedNetworkState,
    initialized: bool,
}

impl<'a, R, S, W> ConnectivityManager<'a, R, S, W>
where
    R: StationRadio,
    S: KeyValueStore,
    W: WiredLink,
{
    /// `wired` is ignored unless the config enables it.
    pub fn new(
        config: &NetworkConfig,
        shared: &'a SharedNetworkState,
        radio: R,
        store: S,
        wired: Option<W>,
    ) -> Self {
        let wired = match (config.wired_enabled, wired) {
            (true, Some(link)) => Some(WiredLinkController::new(link, &shared.wired)),
            (true, None) => {
                log::warn!("net: wired enabled without a driver; wireless only");
                None
            }
            (false, _) => None,
        };
        Self {
            registry: InterfaceRegistry::new(config.ownership),
            bus: EventBus::new(),
            wired,
            wireless: WirelessLinkController::new(radio, store, &shared.wireless, config),
            shared,
            initialized: false,
        }
    }

    /// Brings up the event loop, then wired (when configured), then the
    /// station. Runs once per boot. A wired failure only drops wired; the
    /// station is started regardless.
    pub fn init(&mut self, reset: &impl ResetCauseSource) -> Result<InitReport, NetError> {
        if self.initialized {
            return Err(NetError::AlreadyInitialized);
        }
        self.bus.start()?;
        self.initialized = true;

        let wired_result = self
            .wired
            .as_mut()
            .map(|wired| wired.start(&mut self.registry, &mut self.bus));
        let wired_started = match wired_result {
            Some(Ok(())) => true,
            Some(Err(err)) => {
                log::error!("net: wired bring-up failed err={}; wireless only", err);
                self.wired = None;
                false
            }
            None => false,
        };
        let recovery = self.wireless.start(
            reset.reset_cause(),
            &mut self.registry,
            &mut self.bus,
            &self.shared.counters,
        )?;

        let report = InitReport {
            wired_started,
            recovery,
            needs_provisioning: self.wireless.needs_provisioning(),
        };
        log::info!(
            "net: init done wired={} provisioning={}",
            report.wired_started,
            report.needs_provisioning
        );
        Ok(report)
    }

    /// Routes one platform event to every controller subscribed to it.
    pub fn dispatch(&mut self, event: &LinkEvent) {
        let counters = &self.shared.counters;
        let mut delivered = false;
        for subscriber in self.bus.subscribers(event) {
            delivered = true;
            match subscriber {
                Subscriber::Wired => {
                    if let Some(wired) = self.wired.as_mut() {
                        wired.handle_event(&self.registry, event, counters);
                    }
                }
                Subscriber::Wireless => self.wireless.handle_event(&self.registry, event, counters),
            }
        }
        if !delivered {
            log::debug!("net: no subscriber for {:?}", event);
        }
    }

    pub fn current_ip(&self) -> Option<IpInfo> {
        self.status().current_ip()
    }

    pub fn status(&self) -> IpStatusReader<'a> {
        self.shared.reader()
    }

    pub fn is_our_interface(&self, prefix: &str, interface: &str) -> bool {
        self.registry.owned_by(prefix, interface)
    }

    pub fn find_interface(&self, descriptor: &str) -> Option<&InterfaceHandle> {
        self.registry.find_by_descriptor(descriptor)
    }

    pub fn is_up(
        &self,
        handle: &InterfaceHandle,
        query: &impl InterfaceStateQuery,
    ) -> Result<bool, NetError> {
        self.registry.is_up(handle, query)
    }

    pub fn needs_provisioning(&self) -> bool {
        self.wireless.needs_provisioning()
    }

    pub fn wireless_phase(&self) -> WirelessPhase {
        self.wireless.phase()
    }

    /// Delay until the boot counts as healthy, if a counter reset is pending.
    pub fn recovery_grace(&self) -> Option<Duration> {
        self.wireless.recovery_grace()
    }

    pub fn on_recovery_grace_elapsed(&mut self) -> bool {
        self.wireless.on_recovery_grace_elapsed()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn wireless(&self) -> &WirelessLinkController<'a, R, S> {
        &self.wireless
    }

    pub fn wired(&self) -> Option<&WiredLinkController<'a, W>> {
        self.wired.as_ref()
    }

    pub fn into_parts(self) -> (R, S) {
        self.wireless.into_parts()
    }
}
