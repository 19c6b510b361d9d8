use core::str::FromStr;

use embassy_time::Duration;

use super::{
    RESTART_COUNTER_GRACE_MS, RESTART_COUNTER_THRESHOLD, WEB_PORT_DEFAULT,
    WIFI_MAXIMUM_RETRY_DEFAULT,
};
use crate::firmware::network::StationCredentials;

/// Bound on back-to-back reconnect attempts after a station disconnect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 0 means unlimited.
    pub max_retries: u32,
}

impl RetryPolicy {
    pub const UNLIMITED: Self = Self { max_retries: 0 };

    pub const fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    pub const fn is_unlimited(self) -> bool {
        self.max_retries == 0
    }

    pub const fn allows(self, retries_so_far: u32) -> bool {
        self.is_unlimited() || retries_so_far < self.max_retries
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoveryPolicy {
    pub enabled: bool,
    /// Credentials are wiped once the power-on counter goes above this value.
    pub threshold: u8,
    /// Uptime after which the boot counts as healthy and the counter is cleared.
    pub grace: Duration,
}

impl RecoveryPolicy {
    pub const fn defaults() -> Self {
        Self {
            enabled: true,
            threshold: RESTART_COUNTER_THRESHOLD,
            grace: Duration::from_millis(RESTART_COUNTER_GRACE_MS),
        }
    }

    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::defaults()
        }
    }
}

/// How Ip-event descriptors are matched against a controller prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OwnershipMatch {
    /// Descriptor must start with the whole prefix ("wired" owns "wired1").
    Exact,
    /// Compares only the first `len(prefix) - 1` bytes, as older multi-adapter
    /// firmware did. With the stock descriptors this lets "wired" claim
    /// "wireless-station", so it is opt-in only.
    LegacyTruncated,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkConfig {
    pub wired_enabled: bool,
    pub retry: RetryPolicy,
    pub recovery: RecoveryPolicy,
    pub ownership: OwnershipMatch,
    /// Credentials baked in at build time. When present, the station never
    /// reads provisioned credentials and the restart recovery is off.
    pub compiled_credentials: Option<StationCredentials>,
}

impl NetworkConfig {
    pub const fn defaults() -> Self {
        Self {
            wired_enabled: false,
            retry: RetryPolicy::new(WIFI_MAXIMUM_RETRY_DEFAULT),
            recovery: RecoveryPolicy::defaults(),
            ownership: OwnershipMatch::Exact,
            compiled_credentials: None,
        }
    }

    pub fn from_build_env() -> Self {
        let compiled_credentials = compiled_station_credentials();
        let max_retries = parse_build_value(
            option_env!("AUDIONET_WIFI_MAXIMUM_RETRY"),
            "AUDIONET_WIFI_MAXIMUM_RETRY",
            WIFI_MAXIMUM_RETRY_DEFAULT,
        );
        let recovery = if compiled_credentials.is_some() {
            RecoveryPolicy::disabled()
        } else {
            RecoveryPolicy::defaults()
        };

        Self {
            wired_enabled: cfg!(feature = "wired-ethernet"),
            retry: RetryPolicy::new(max_retries),
            recovery,
            ownership: OwnershipMatch::Exact,
            compiled_credentials,
        }
    }

    pub fn provisioning_mode(&self) -> bool {
        self.compiled_credentials.is_none()
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

pub fn web_port() -> u16 {
    parse_build_value(
        option_env!("AUDIONET_WEB_PORT"),
        "AUDIONET_WEB_PORT",
        WEB_PORT_DEFAULT,
    )
}

fn compiled_station_credentials() -> Option<StationCredentials> {
    let ssid = option_env!("AUDIONET_WIFI_SSID")?;
    let password = option_env!("AUDIONET_WIFI_PASSWORD").unwrap_or("");
    match StationCredentials::new(ssid, password) {
        Some(credentials) => Some(credentials),
        None => {
            log::warn!("config: compiled wifi credentials too long; ignoring");
            None
        }
    }
}

pub(crate) fn parse_build_value<T: FromStr + Copy>(
    raw: Option<&str>,
    name: &str,
    default: T,
) -> T {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            log::warn!("config: {}={:?} unparseable; using default", name, raw);
            default
        }
    }
}
