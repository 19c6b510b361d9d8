use statig::prelude::*;

use crate::firmware::{config::RetryPolicy, network::LinkState, types::IpInfo};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WirelessPhase {
    Idle,
    Connecting,
    Connected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum StationEvent {
    Started,
    Disconnected { reason: u8 },
    AddressAcquired(IpInfo),
    AddressLost,
}

/// Radio call the controller owes the machine after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum StationAction {
    None,
    Connect,
    Retry { attempt: u32 },
    RetriesExhausted { reason: u8 },
}

#[derive(Clone, Copy, Debug)]
pub(super) struct DispatchContext {
    pub(super) action: StationAction,
}

impl Default for DispatchContext {
    fn default() -> Self {
        Self {
            action: StationAction::None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(super) struct StationMachine {
    pub(super) link: LinkState,
    retry: RetryPolicy,
}

impl StationMachine {
    pub(super) fn new(retry: RetryPolicy) -> Self {
        Self {
            link: LinkState::DOWN,
            retry,
        }
    }

    /// `connected` is left alone; only a lost address clears it.
    fn on_disconnected(&mut self, reason: u8) -> StationAction {
        if self.retry.allows(self.link.retry_count) {
            self.link.retry_count = self.link.retry_count.saturating_add(1);
            StationAction::Retry {
                attempt: self.link.retry_count,
            }
        } else {
            StationAction::RetriesExhausted { reason }
        }
    }

    fn on_address_acquired(&mut self, info: IpInfo) {
        self.link.address = info;
        self.link.connected = true;
        self.link.retry_count = 0;
    }
}

impl State {
    pub(super) fn phase(&self) -> WirelessPhase {
        match self {
            State::Idle {} => WirelessPhase::Idle,
            State::Connecting {} => WirelessPhase::Connecting,
            State::Connected {} => WirelessPhase::Connected,
        }
    }
}

#[state_machine(initial = "State::idle()")]
impl StationMachine {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &StationEvent) -> Outcome<State> {
        match *event {
            StationEvent::Started => {
                context.action = StationAction::Connect;
                Transition(State::connecting())
            }
            StationEvent::Disconnected { reason } => {
                context.action = self.on_disconnected(reason);
                if matches!(context.action, StationAction::Retry { .. }) {
                    return Transition(State::connecting());
                }
                Handled
            }
            StationEvent::AddressAcquired(info) => {
                self.on_address_acquired(info);
                Transition(State::connected())
            }
            StationEvent::AddressLost => {
                self.link.connected = false;
                Handled
            }
        }
    }

    #[state]
    fn connecting(
        &mut self,
        context: &mut DispatchContext,
        event: &StationEvent,
    ) -> Outcome<State> {
        match *event {
            StationEvent::Started => {
                context.action = StationAction::Connect;
                Handled
            }
            StationEvent::Disconnected { reason } => {
                context.action = self.on_disconnected(reason);
                Handled
            }
            StationEvent::AddressAcquired(info) => {
                self.on_address_acquired(info);
                Transition(State::connected())
            }
            StationEvent::AddressLost => {
                self.link.connected = false;
                Handled
            }
        }
    }

    #[state]
    fn connected(
        &mut self,
        context: &mut DispatchContext,
        event: &StationEvent,
    ) -> Outcome<State> {
        match *event {
            StationEvent::Started => Handled,
            StationEvent::Disconnected { reason } => {
                context.action = self.on_disconnected(reason);
                Transition(State::connecting())
            }
            StationEvent::AddressAcquired(info) => {
                self.on_address_acquired(info);
                Handled
            }
            StationEvent::AddressLost => {
                self.link.connected = false;
                Transition(State::connecting())
            }
        }
    }
}
