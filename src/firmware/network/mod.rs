//! Link lifecycle for the wired and wireless interfaces, reconciled into one
//! "are we online" answer.

mod bus;
mod error;
mod link_state;
mod manager;
mod ports;
mod registry;
#[cfg(test)]
mod test_support;
mod wired;
mod wireless;

pub use bus::{EventBus, Subscriber};
pub use error::NetError;
pub use link_state::{IpStatusReader, LinkState, SharedLinkState, SharedNetworkState};
pub use manager::{ConnectivityManager, InitReport};
pub use ports::{InterfaceStateQuery, NoWiredLink, ResetCauseSource, StationRadio, WiredLink};
pub use registry::{is_our_interface, InterfaceHandle, InterfaceRegistry};
pub use wired::WiredLinkController;
pub use wireless::{
    save_credentials, DeferredReset, RecoveryOutcome, StationCredentials, WirelessLinkController,
    WirelessPhase,
};
