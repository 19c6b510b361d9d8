use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};

use super::{CONTROL_QUEUE_DEPTH, LINK_EVENT_QUEUE_DEPTH};
use crate::firmware::{
    network::SharedNetworkState,
    types::{GainUpdate, LinkEvent},
};

pub(crate) static LINK_EVENTS: Channel<CriticalSectionRawMutex, LinkEvent, LINK_EVENT_QUEUE_DEPTH> =
    Channel::new();
pub(crate) static GAIN_UPDATES: Channel<CriticalSectionRawMutex, GainUpdate, CONTROL_QUEUE_DEPTH> =
    Channel::new();
pub(crate) static NETWORK_STATE: SharedNetworkState = SharedNetworkState::new();
