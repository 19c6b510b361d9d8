use core::fmt;

use heapless::String;

use crate::firmware::{
    config::{
        CREDENTIALS_NAMESPACE, CREDENTIALS_PASSWORD_KEY, CREDENTIALS_SSID_KEY, WIFI_PASSWORD_MAX,
        WIFI_SSID_MAX,
    },
    storage::{KeyValueStore, StoreError},
};

#[derive(Clone, PartialEq, Eq)]
pub struct StationCredentials {
    ssid: String<WIFI_SSID_MAX>,
    password: String<WIFI_PASSWORD_MAX>,
}

impl StationCredentials {
    /// `None` for an empty SSID or fields over the 802.11 limits.
    pub fn new(ssid: &str, password: &str) -> Option<Self> {
        if ssid.is_empty() {
            return None;
        }
        Some(Self {
            ssid: String::try_from(ssid).ok()?,
            password: String::try_from(password).ok()?,
        })
    }

    pub fn ssid(&self) -> &str {
        self.ssid.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn is_open(&self) -> bool {
        self.password.is_empty()
    }
}

impl fmt::Debug for StationCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StationCredentials")
            .field("ssid", &self.ssid)
            .field("password_len", &self.password.len())
            .finish()
    }
}

/// Reads provisioned credentials. A missing SSID means "not provisioned".
pub(crate) fn load_credentials<S: KeyValueStore>(
    store: &mut S,
) -> Result<Option<StationCredentials>, StoreError> {
    let mut ssid = [0u8; WIFI_SSID_MAX];
    let Some(ssid_len) = store.get(CREDENTIALS_NAMESPACE, CREDENTIALS_SSID_KEY, &mut ssid)? else {
        return Ok(None);
    };
    let mut password = [0u8; WIFI_PASSWORD_MAX];
    let password_len = store
        .get(CREDENTIALS_NAMESPACE, CREDENTIALS_PASSWORD_KEY, &mut password)?
        .unwrap_or(0);

    let ssid = core::str::from_utf8(&ssid[..ssid_len]).map_err(|_| StoreError::Corrupt)?;
    let password =
        core::str::from_utf8(&password[..password_len]).map_err(|_| StoreError::Corrupt)?;
    StationCredentials::new(ssid, password)
        .map(Some)
        .ok_or(StoreError::Corrupt)
}

/// Persists credentials the way the provisioning flow hands them over.
pub fn save_credentials<S: KeyValueStore>(
    store: &mut S,
    credentials: &StationCredentials,
) -> Result<(), StoreError> {
    store.set(
        CREDENTIALS_NAMESPACE,
        CREDENTIALS_SSID_KEY,
        credentials.ssid().as_bytes(),
    )?;
    store.set(
        CREDENTIALS_NAMESPACE,
        CREDENTIALS_PASSWORD_KEY,
        credentials.password().as_bytes(),
    )?;
    store.commit()
}

pub(crate) fn erase_credentials<S: KeyValueStore>(store: &mut S) -> Result<(), StoreError> {
    store.erase(CREDENTIALS_NAMESPACE, CREDENTIALS_SSID_KEY)?;
    store.erase(CREDENTIALS_NAMESPACE, CREDENTIALS_PASSWORD_KEY)?;
    store.commit()
}
