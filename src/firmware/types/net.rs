use core::{fmt, net::Ipv4Addr};

use heapless::String;

/// Interface descriptors follow the NVS-style short-name limit.
pub const DESCRIPTOR_MAX: usize = 16;

pub type Descriptor = String<DESCRIPTOR_MAX>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterfaceKind {
    Wired,
    WirelessStation,
}

impl InterfaceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wired => "wired",
            Self::WirelessStation => "wireless_station",
        }
    }
}

/// IPv4 configuration of one interface. All-zero while no lease was ever seen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IpInfo {
    pub ip: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub gateway: Ipv4Addr,
}

impl IpInfo {
    pub const UNSPECIFIED: Self = Self {
        ip: Ipv4Addr::UNSPECIFIED,
        netmask: Ipv4Addr::UNSPECIFIED,
        gateway: Ipv4Addr::UNSPECIFIED,
    };

    pub const fn new(ip: Ipv4Addr, netmask: Ipv4Addr, gateway: Ipv4Addr) -> Self {
        Self {
            ip,
            netmask,
            gateway,
        }
    }

    /// Builds the info from a CIDR lease as handed out by DHCP.
    pub fn from_prefix(ip: Ipv4Addr, prefix_len: u8, gateway: Option<Ipv4Addr>) -> Self {
        let prefix_len = u32::from(prefix_len.min(32));
        let mask_bits = if prefix_len == 0 {
            0
        } else {
            u32::MAX << (32 - prefix_len)
        };
        Self {
            ip,
            netmask: Ipv4Addr::from(mask_bits),
            gateway: gateway.unwrap_or(Ipv4Addr::UNSPECIFIED),
        }
    }

    pub fn is_unspecified(&self) -> bool {
        *self == Self::UNSPECIFIED
    }
}

impl Default for IpInfo {
    fn default() -> Self {
        Self::UNSPECIFIED
    }
}

impl fmt::Display for IpInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ip={} mask={} gw={}",
            self.ip, self.netmask, self.gateway
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventClass {
    Wifi,
    Ethernet,
    Ip,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventId {
    Started,
    Disconnected,
    AddressAcquired,
    AddressLost,
}

/// Notification delivered by the platform event loop.
///
/// Ip-class events carry the descriptor of the interface they concern; the
/// controllers use it to drop events that belong to somebody else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkEvent {
    StationStarted,
    StationDisconnected { reason: u8 },
    EthernetStarted,
    EthernetDisconnected,
    AddressAcquired { interface: Descriptor, info: IpInfo },
    AddressLost { interface: Descriptor },
}

impl LinkEvent {
    pub fn address_acquired(interface: &str, info: IpInfo) -> Option<Self> {
        let interface = Descriptor::try_from(interface).ok()?;
        Some(Self::AddressAcquired { interface, info })
    }

    pub fn address_lost(interface: &str) -> Option<Self> {
        let interface = Descriptor::try_from(interface).ok()?;
        Some(Self::AddressLost { interface })
    }

    pub const fn class(&self) -> EventClass {
        match self {
            Self::StationStarted | Self::StationDisconnected { .. } => EventClass::Wifi,
            Self::EthernetStarted | Self::EthernetDisconnected => EventClass::Ethernet,
            Self::AddressAcquired { .. } | Self::AddressLost { .. } => EventClass::Ip,
        }
    }

    pub const fn id(&self) -> EventId {
        match self {
            Self::StationStarted | Self::EthernetStarted => EventId::Started,
            Self::StationDisconnected { .. } | Self::EthernetDisconnected => {
                EventId::Disconnected
            }
            Self::AddressAcquired { .. } => EventId::AddressAcquired,
            Self::AddressLost { .. } => EventId::AddressLost,
        }
    }

    pub fn interface(&self) -> Option<&str> {
        match self {
            Self::AddressAcquired { interface, .. } | Self::AddressLost { interface } => {
                Some(interface.as_str())
            }
            _ => None,
        }
    }
}
