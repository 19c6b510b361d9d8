#[cfg(feature = "esp-hal-runtime")]
pub(crate) mod channels;
mod network;
#[cfg(test)]
mod tests;

pub use network::{web_port, NetworkConfig, OwnershipMatch, RecoveryPolicy, RetryPolicy};

pub const WIRED_DESCRIPTOR: &str = "wired";
pub const STATION_DESCRIPTOR: &str = "wireless-station";

pub const RECOVERY_NAMESPACE: &str = "storage";
pub const RESTART_COUNTER_KEY: &str = "restart_counter";
pub const RESTART_COUNTER_THRESHOLD: u8 = 3;
pub const RESTART_COUNTER_GRACE_MS: u64 = 5_000;

pub const CREDENTIALS_NAMESPACE: &str = "wifi";
pub const CREDENTIALS_SSID_KEY: &str = "ssid";
pub const CREDENTIALS_PASSWORD_KEY: &str = "password";
pub const WIFI_SSID_MAX: usize = 32;
pub const WIFI_PASSWORD_MAX: usize = 64;

pub const WIFI_MAXIMUM_RETRY_DEFAULT: u32 = 5;
pub const WEB_PORT_DEFAULT: u16 = 8000;

pub const LINK_EVENT_QUEUE_DEPTH: usize = 8;
pub const CONTROL_QUEUE_DEPTH: usize = 10;

pub(crate) const KV_STORE_MAGIC: u32 = 0x4B56_4E41;
pub(crate) const KV_STORE_VERSION: u8 = 1;
pub(crate) const KV_STORE_MAX_ENTRIES: usize = 8;
pub(crate) const KV_NAME_MAX: usize = 15;
pub(crate) const KV_VALUE_MAX: usize = 64;
