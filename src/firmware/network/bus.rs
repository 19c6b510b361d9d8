use heapless::Vec;

use super::error::NetError;
use crate::firmware::types::{EventClass, EventId, LinkEvent};

const SUBSCRIPTION_CAPACITY: usize = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Subscriber {
    Wired,
    Wireless,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Subscription {
    class: EventClass,
    /// `None` subscribes to every id of the class.
    id: Option<EventId>,
    subscriber: Subscriber,
}

impl Subscription {
    fn overlaps(&self, other: &Self) -> bool {
        self.class == other.class
            && self.subscriber == other.subscriber
            && match (self.id, other.id) {
                (Some(lhs), Some(rhs)) => lhs == rhs,
                _ => true,
            }
    }

    fn matches(&self, event: &LinkEvent) -> bool {
        self.class == event.class() && self.id.is_none_or(|id| id == event.id())
    }
}

/// Routing table from platform events to the controllers that asked for them.
pub struct EventBus {
    subscriptions: Vec<Subscription, SUBSCRIPTION_CAPACITY>,
    started: bool,
}

impl EventBus {
    pub const fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
            started: false,
        }
    }

    pub fn start(&mut self) -> Result<(), NetError> {
        if self.started {
            return Err(NetError::AlreadyInitialized);
        }
        self.started = true;
        Ok(())
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn subscribe(
        &mut self,
        class: EventClass,
        id: Option<EventId>,
        subscriber: Subscriber,
    ) -> Result<(), NetError> {
        let subscription = Subscription {
            class,
            id,
            subscriber,
        };
        if self
            .subscriptions
            .iter()
            .any(|existing| existing.overlaps(&subscription))
        {
            return Err(NetError::DuplicateSubscription);
        }
        self.subscriptions
            .push(subscription)
            .map_err(|_| NetError::SubscriptionsFull)
    }

    /// Each subscriber shows up at most once per event.
    pub fn subscribers<'a>(&'a self, event: &'a LinkEvent) -> impl Iterator<Item = Subscriber> + 'a {
        self.subscriptions
            .iter()
            .filter(move |entry| entry.matches(event))
            .map(|entry| entry.subscriber)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
