mod credentials;
mod machine;
mod recovery;

use embassy_time::Duration;
use statig::blocking::IntoStateMachineExt as _;

pub use credentials::{save_credentials, StationCredentials};
pub use machine::WirelessPhase;
pub use recovery::{DeferredReset, RecoveryOutcome};

use self::credentials::{erase_credentials, load_credentials};
use self::machine::{DispatchContext, StationAction, StationEvent, StationMachine};
use self::recovery::RestartRecovery;
use super::{
    bus::{EventBus, Subscriber},
    error::NetError,
    link_state::{LinkState, SharedLinkState},
    ports::StationRadio,
    registry::InterfaceRegistry,
};
use crate::firmware::{
    config::{NetworkConfig, RetryPolicy, STATION_DESCRIPTOR},
    storage::KeyValueStore,
    telemetry::LinkCounters,
    types::{EventClass, EventId, InterfaceKind, IpInfo, LinkEvent, ResetCause},
};

/// Drives the station radio: connect on start, bounded reconnects on
/// disconnect, and lease tracking for the station interface.
pub struct WirelessLinkController<'a, R, S> {
    radio: R,
    store: S,
    machine: statig::blocking::StateMachine<StationMachine>,
    retry: RetryPolicy,
    recovery: RestartRecovery,
    compiled_credentials: Option<StationCredentials>,
    credentials_present: bool,
    shared: &'a SharedLinkState,
}

impl<'a, R: StationRadio, S: KeyValueStore> WirelessLinkController<'a, R, S> {
    pub fn new(radio: R, store: S, shared: &'a SharedLinkState, config: &NetworkConfig) -> Self {
        Self {
            radio,
            store,
            machine: StationMachine::new(config.retry).state_machine(),
            retry: config.retry,
            recovery: RestartRecovery::new(config.recovery),
            compiled_credentials: config.compiled_credentials.clone(),
            credentials_present: false,
            shared,
        }
    }

    /// Restart recovery runs first, so an erase already shows in what the
    /// radio gets configured with.
    pub fn start(
        &mut self,
        cause: ResetCause,
        registry: &mut InterfaceRegistry,
        bus: &mut EventBus,
        counters: &LinkCounters,
    ) -> Result<RecoveryOutcome, NetError> {
        let outcome = self.recovery.on_boot(cause, &mut self.store);
        if matches!(outcome, RecoveryOutcome::CredentialsErased { .. }) {
            self.erase_provisioning(counters);
        }

        registry.register(STATION_DESCRIPTOR, InterfaceKind::WirelessStation)?;
        for (class, id) in [
            (EventClass::Wifi, EventId::Started),
            (EventClass::Wifi, EventId::Disconnected),
            (EventClass::Ip, EventId::AddressAcquired),
            (EventClass::Ip, EventId::AddressLost),
        ] {
            bus.subscribe(class, Some(id), Subscriber::Wireless)?;
        }

        let credentials = self.active_credentials();
        self.credentials_present = credentials.is_some();
        match credentials.as_ref() {
            Some(credentials) => log::info!("wifi_link: station ssid={}", credentials.ssid()),
            None => log::info!("wifi_link: no credentials; waiting for provisioning"),
        }
        if let Err(err) = self.radio.configure(credentials.as_ref()) {
            log::warn!("wifi_link: configure failed err={:?}", err);
        }
        self.radio.start().map_err(|err| {
            log::error!("wifi_link: radio start failed err={:?}", err);
            NetError::DriverStart {
                kind: InterfaceKind::WirelessStation,
            }
        })?;

        self.publish();
        log::info!(
            "wifi_link: started max_retry={} recovery={:?}",
            self.retry.max_retries,
            outcome
        );
        Ok(outcome)
    }

    pub fn handle_event(
        &mut self,
        registry: &InterfaceRegistry,
        event: &LinkEvent,
        counters: &LinkCounters,
    ) {
        let station_event = match event {
            LinkEvent::StationStarted => StationEvent::Started,
            LinkEvent::StationDisconnected { reason } => {
                counters.record_disconnect();
                StationEvent::Disconnected { reason: *reason }
            }
            LinkEvent::AddressAcquired { interface, info } => {
                if !registry.owned_by(STATION_DESCRIPTOR, interface) {
                    counters.record_foreign_event();
                    return;
                }
                counters.record_address_acquired();
                log::info!("wifi_link: got {}", info);
                StationEvent::AddressAcquired(*info)
            }
            LinkEvent::AddressLost { interface } => {
                if !registry.owned_by(STATION_DESCRIPTOR, interface) {
                    counters.record_foreign_event();
                    return;
                }
                counters.record_address_lost();
                log::info!("wifi_link: address lost");
                StationEvent::AddressLost
            }
            LinkEvent::EthernetStarted | LinkEvent::EthernetDisconnected => return,
        };

        let mut context = DispatchContext::default();
        self.machine
            .handle_with_context(&station_event, &mut context);
        self.perform(context.action, counters);
        self.publish();
    }

    fn perform(&mut self, action: StationAction, counters: &LinkCounters) {
        match action {
            StationAction::None => {}
            StationAction::Connect => self.issue_connect(counters),
            StationAction::Retry { attempt } => {
                counters.record_retry();
                log::info!(
                    "wifi_link: retry to connect to the AP attempt={} max={}",
                    attempt,
                    self.retry.max_retries
                );
                self.issue_connect(counters);
            }
            StationAction::RetriesExhausted { reason } => {
                counters.record_retry_refused();
                log::warn!("wifi_link: connect to the AP failed reason={}", reason);
            }
        }
    }

    fn issue_connect(&mut self, counters: &LinkCounters) {
        if !self.credentials_present {
            log::debug!("wifi_link: connect skipped; not provisioned");
            return;
        }
        counters.record_connect_attempt();
        if let Err(err) = self.radio.connect() {
            log::warn!("wifi_link: connect request failed err={:?}", err);
        }
    }

    fn active_credentials(&mut self) -> Option<StationCredentials> {
        if let Some(credentials) = self.compiled_credentials.clone() {
            return Some(credentials);
        }
        match load_credentials(&mut self.store) {
            Ok(credentials) => credentials,
            Err(err) => {
                log::warn!("wifi_link: credential load failed err={}", err);
                None
            }
        }
    }

    fn erase_provisioning(&mut self, counters: &LinkCounters) {
        log::warn!("wifi_link: restart threshold exceeded; erasing credentials");
        if let Err(err) = erase_credentials(&mut self.store) {
            log::warn!("wifi_link: credential erase failed err={}", err);
        }
        if let Err(err) = self.radio.restore_factory_defaults() {
            log::warn!("wifi_link: radio restore failed err={:?}", err);
        }
        counters.record_credential_erasure();
        self.recovery.clear_counter(&mut self.store);
    }

    fn publish(&self) {
        self.shared.publish(self.state());
    }

    pub fn state(&self) -> LinkState {
        self.machine.inner().link
    }

    pub fn phase(&self) -> WirelessPhase {
        self.machine.state().phase()
    }

    pub fn ip(&self) -> Option<IpInfo> {
        self.state().ip()
    }

    pub fn needs_provisioning(&self) -> bool {
        !self.credentials_present
    }

    pub fn recovery_grace(&self) -> Option<Duration> {
        self.recovery.pending_grace()
    }

    pub fn deferred_reset(&self) -> DeferredReset {
        self.recovery.deferred()
    }

    pub fn on_recovery_grace_elapsed(&mut self) -> bool {
        self.recovery.on_grace_elapsed(&mut self.store)
    }

    pub fn radio(&self) -> &R {
        &self.radio
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_parts(self) -> (R, S) {
        (self.radio, self.store)
    }
}
