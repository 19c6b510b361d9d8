use thiserror::Error;

use crate::firmware::types::InterfaceKind;

/// Programming-time and bring-up failures. Link-level trouble never shows up
/// here; it only ever turns into `connected == false`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum NetError {
    #[error("connectivity manager already initialized")]
    AlreadyInitialized,
    #[error("interface descriptor already registered")]
    DuplicateDescriptor,
    #[error("unknown interface")]
    UnknownInterface,
    #[error("interface descriptor too long")]
    DescriptorTooLong,
    #[error("interface registry full")]
    RegistryFull,
    #[error("event handler already registered")]
    DuplicateSubscription,
    #[error("event subscription table full")]
    SubscriptionsFull,
    #[error("{} driver failed to start", .kind.as_str())]
    DriverStart { kind: InterfaceKind },
}
