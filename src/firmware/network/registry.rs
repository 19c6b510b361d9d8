use heapless::Vec;

use super::{error::NetError, ports::InterfaceStateQuery};
use crate::firmware::{
    config::OwnershipMatch,
    types::{Descriptor, InterfaceKind},
};

const REGISTRY_CAPACITY: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceHandle {
    id: u8,
    descriptor: Descriptor,
    kind: InterfaceKind,
}

impl InterfaceHandle {
    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn descriptor(&self) -> &str {
        self.descriptor.as_str()
    }

    pub fn kind(&self) -> InterfaceKind {
        self.kind
    }
}

pub struct InterfaceRegistry {
    interfaces: Vec<InterfaceHandle, REGISTRY_CAPACITY>,
    ownership: OwnershipMatch,
}

impl InterfaceRegistry {
    pub const fn new(ownership: OwnershipMatch) -> Self {
        Self {
            interfaces: Vec::new(),
            ownership,
        }
    }

    pub fn register(
        &mut self,
        descriptor: &str,
        kind: InterfaceKind,
    ) -> Result<InterfaceHandle, NetError> {
        if self.find_by_descriptor(descriptor).is_some() {
            return Err(NetError::DuplicateDescriptor);
        }
        let handle = InterfaceHandle {
            id: self.interfaces.len() as u8,
            descriptor: Descriptor::try_from(descriptor).map_err(|_| NetError::DescriptorTooLong)?,
            kind,
        };
        self.interfaces
            .push(handle.clone())
            .map_err(|_| NetError::RegistryFull)?;
        log::debug!(
            "net_if: registered desc={} kind={} id={}",
            descriptor,
            kind.as_str(),
            handle.id
        );
        Ok(handle)
    }

    pub fn find_by_descriptor(&self, descriptor: &str) -> Option<&InterfaceHandle> {
        self.interfaces
            .iter()
            .find(|handle| handle.descriptor() == descriptor)
    }

    /// Whether an event raised on `interface` belongs to the controller owning `prefix`.
    pub fn owned_by(&self, prefix: &str, interface: &str) -> bool {
        is_our_interface(self.ownership, prefix, interface)
    }

    /// Live query; never cached.
    pub fn is_up(
        &self,
        handle: &InterfaceHandle,
        query: &impl InterfaceStateQuery,
    ) -> Result<bool, NetError> {
        if !self.interfaces.iter().any(|known| known == handle) {
            return Err(NetError::UnknownInterface);
        }
        Ok(query.is_up(handle.descriptor()))
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.interfaces.len()
    }
}

/// Prefix ownership check. Numeric suffixes are accepted, so "wired" owns
/// "wired0" and "wired1".
pub fn is_our_interface(mode: OwnershipMatch, prefix: &str, interface: &str) -> bool {
    match mode {
        OwnershipMatch::Exact => interface.starts_with(prefix),
        OwnershipMatch::LegacyTruncated => {
            let compared = prefix.len().saturating_sub(1);
            interface.as_bytes().get(..compared) == prefix.as_bytes().get(..compared)
        }
    }
}
