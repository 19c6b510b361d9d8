mod boot;
mod control;
mod net;

pub use boot::ResetCause;
pub use control::{DspFlow, FilterParams, GainUpdate};
pub use net::{
    Descriptor, EventClass, EventId, InterfaceKind, IpInfo, LinkEvent, DESCRIPTOR_MAX,
};
