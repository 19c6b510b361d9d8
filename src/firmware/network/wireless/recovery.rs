use embassy_time::Duration;

use crate::firmware::{
    config::{RecoveryPolicy, RECOVERY_NAMESPACE, RESTART_COUNTER_KEY},
    storage::{KeyValueStore, StoreError},
    types::ResetCause,
};

/// What the boot-time half of the restart recovery did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecoveryOutcome {
    Disabled,
    /// Only power-on resets are counted.
    NotPowerOn(ResetCause),
    StoreUnavailable,
    /// Counter bumped; it is cleared again once the grace period passes.
    Armed { counter: u8 },
    /// Too many quick power cycles: credentials wiped, counter back to 0.
    CredentialsErased { counter: u8 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredReset {
    Idle,
    Armed,
    Cancelled,
    Fired,
}

/// Counts power-on boots that die before the grace period. Users power-cycle
/// the device a few times in a row to get back into provisioning.
pub(crate) struct RestartRecovery {
    policy: RecoveryPolicy,
    deferred: DeferredReset,
}

impl RestartRecovery {
    pub(crate) const fn new(policy: RecoveryPolicy) -> Self {
        Self {
            policy,
            deferred: DeferredReset::Idle,
        }
    }

    /// Bumps and persists the counter immediately, so a power loss before the
    /// grace period is still counted on the next boot.
    pub(crate) fn on_boot<S: KeyValueStore>(
        &mut self,
        cause: ResetCause,
        store: &mut S,
    ) -> RecoveryOutcome {
        if !self.policy.enabled {
            return RecoveryOutcome::Disabled;
        }
        if !cause.is_power_on() {
            log::info!("recovery: reset cause={} not counted", cause.as_str());
            return RecoveryOutcome::NotPowerOn(cause);
        }

        let previous = match store.get_u8(RECOVERY_NAMESPACE, RESTART_COUNTER_KEY) {
            Ok(counter) => counter.unwrap_or(0),
            Err(StoreError::Corrupt) => {
                log::warn!("recovery: restart counter malformed; starting over");
                0
            }
            Err(err) => {
                log::warn!("recovery: store unavailable err={}", err);
                return RecoveryOutcome::StoreUnavailable;
            }
        };
        let counter = previous.saturating_add(1);
        if let Err(err) = write_counter(store, counter) {
            log::warn!("recovery: counter write failed err={}", err);
            return RecoveryOutcome::StoreUnavailable;
        }
        log::info!("recovery: restart counter={}", counter);

        if counter > self.policy.threshold {
            self.deferred = DeferredReset::Cancelled;
            return RecoveryOutcome::CredentialsErased { counter };
        }
        self.deferred = DeferredReset::Armed;
        RecoveryOutcome::Armed { counter }
    }

    /// Second half of an erase: the counter starts over.
    pub(crate) fn clear_counter<S: KeyValueStore>(&mut self, store: &mut S) {
        if let Err(err) = write_counter(store, 0) {
            log::warn!("recovery: counter reset failed err={}", err);
        }
    }

    pub(crate) fn pending_grace(&self) -> Option<Duration> {
        matches!(self.deferred, DeferredReset::Armed).then_some(self.policy.grace)
    }

    /// Returns whether the counter was cleared. No-op unless armed.
    pub(crate) fn on_grace_elapsed<S: KeyValueStore>(&mut self, store: &mut S) -> bool {
        if !matches!(self.deferred, DeferredReset::Armed) {
            return false;
        }
        self.deferred = DeferredReset::Fired;
        match write_counter(store, 0) {
            Ok(()) => {
                log::info!("recovery: boot healthy; restart counter cleared");
                true
            }
            Err(err) => {
                log::warn!("recovery: counter reset failed err={}", err);
                false
            }
        }
    }

    pub(crate) fn deferred(&self) -> DeferredReset {
        self.deferred
    }
}

fn write_counter<S: KeyValueStore>(store: &mut S, counter: u8) -> Result<(), StoreError> {
    store.set_u8(RECOVERY_NAMESPACE, RESTART_COUNTER_KEY, counter)?;
    store.commit()
}
