use core::{convert::Infallible, fmt::Debug};

use super::wireless::StationCredentials;
use crate::firmware::types::ResetCause;

/// Station-mode radio driver as seen by the wireless controller.
///
/// Every call is fire-and-forget: the outcome arrives later as a
/// [`LinkEvent`](crate::firmware::types::LinkEvent).
pub trait StationRadio {
    type Error: Debug;

    /// `None` leaves the radio unconfigured, waiting for provisioning.
    fn configure(&mut self, credentials: Option<&StationCredentials>) -> Result<(), Self::Error>;
    fn start(&mut self) -> Result<(), Self::Error>;
    fn connect(&mut self) -> Result<(), Self::Error>;
    /// Drops any radio configuration persisted by the driver itself.
    fn restore_factory_defaults(&mut self) -> Result<(), Self::Error>;
}

pub trait WiredLink {
    type Error: Debug;

    fn start(&mut self) -> Result<(), Self::Error>;
}

/// Stand-in for boards without an Ethernet MAC.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoWiredLink;

impl WiredLink for NoWiredLink {
    type Error = Infallible;

    fn start(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub trait ResetCauseSource {
    fn reset_cause(&self) -> ResetCause;
}

impl ResetCauseSource for ResetCause {
    fn reset_cause(&self) -> ResetCause {
        *self
    }
}

/// Live link status lookup by interface descriptor.
pub trait InterfaceStateQuery {
    fn is_up(&self, descriptor: &str) -> bool;
}
