use embedded_storage::{ReadStorage, Storage};
use heapless::{String, Vec};
use thiserror::Error;

use crate::firmware::config::{
    KV_NAME_MAX, KV_STORE_MAGIC, KV_STORE_MAX_ENTRIES, KV_STORE_VERSION, KV_VALUE_MAX,
};

const HEADER_LEN: usize = 6;
const ENTRY_LEN: usize = 1 + KV_NAME_MAX + 1 + KV_NAME_MAX + 1 + KV_VALUE_MAX;
pub(crate) const RECORD_LEN: usize = HEADER_LEN + KV_STORE_MAX_ENTRIES * ENTRY_LEN + 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("flash access failed")]
    Flash,
    #[error("namespace or key longer than 15 bytes")]
    KeyTooLong,
    #[error("value does not fit")]
    ValueTooLong,
    #[error("no free entries left")]
    Full,
    #[error("stored value has unexpected shape")]
    Corrupt,
}

/// Durable namespaced key/value storage.
///
/// `set` and `erase` are staged; nothing reaches flash until `commit`.
pub trait KeyValueStore {
    /// Copies the value into `out` and returns its length, or `None` if unset.
    fn get(&mut self, namespace: &str, key: &str, out: &mut [u8])
        -> Result<Option<usize>, StoreError>;

    fn set(&mut self, namespace: &str, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Returns whether the key existed.
    fn erase(&mut self, namespace: &str, key: &str) -> Result<bool, StoreError>;

    fn commit(&mut self) -> Result<(), StoreError>;

    fn get_u8(&mut self, namespace: &str, key: &str) -> Result<Option<u8>, StoreError> {
        let mut buf = [0u8; 2];
        match self.get(namespace, key, &mut buf) {
            Ok(Some(1)) => Ok(Some(buf[0])),
            Ok(Some(_)) | Err(StoreError::ValueTooLong) => Err(StoreError::Corrupt),
            Ok(None) => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn set_u8(&mut self, namespace: &str, key: &str, value: u8) -> Result<(), StoreError> {
        self.set(namespace, key, &[value])
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Entry {
    namespace: String<KV_NAME_MAX>,
    key: String<KV_NAME_MAX>,
    value: Vec<u8, KV_VALUE_MAX>,
}

impl Entry {
    fn matches(&self, namespace: &str, key: &str) -> bool {
        self.namespace.as_str() == namespace && self.key.as_str() == key
    }
}

/// Key/value table kept as one checksummed record at a fixed flash offset.
pub struct FlashKvStore<F> {
    flash: F,
    offset: u32,
    entries: Vec<Entry, KV_STORE_MAX_ENTRIES>,
    dirty: bool,
    readable: bool,
}

impl<F: Storage> FlashKvStore<F> {
    pub fn open(mut flash: F, offset: u32) -> Self {
        let mut record = [0u8; RECORD_LEN];
        let (entries, readable) = match flash.read(offset, &mut record) {
            Ok(()) => (decode_record(&record).unwrap_or_default(), true),
            Err(_) => {
                log::error!("kv_store: flash read failed offset={:#x}", offset);
                (Vec::new(), false)
            }
        };
        log::debug!("kv_store: opened entries={}", entries.len());
        Self {
            flash,
            offset,
            entries,
            dirty: false,
            readable,
        }
    }

    pub fn into_inner(self) -> F {
        self.flash
    }

    fn ensure_readable(&self) -> Result<(), StoreError> {
        if self.readable {
            Ok(())
        } else {
            Err(StoreError::Flash)
        }
    }
}

impl<F: Storage> KeyValueStore for FlashKvStore<F> {
    fn get(
        &mut self,
        namespace: &str,
        key: &str,
        out: &mut [u8],
    ) -> Result<Option<usize>, StoreError> {
        self.ensure_readable()?;
        let Some(entry) = self.entries.iter().find(|entry| entry.matches(namespace, key)) else {
            return Ok(None);
        };
        let value = entry.value.as_slice();
        let target = out.get_mut(..value.len()).ok_or(StoreError::ValueTooLong)?;
        target.copy_from_slice(value);
        Ok(Some(value.len()))
    }

    fn set(&mut self, namespace: &str, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.ensure_readable()?;
        let value = Vec::from_slice(value).map_err(|_| StoreError::ValueTooLong)?;
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.matches(namespace, key))
        {
            if entry.value != value {
                entry.value = value;
                self.dirty = true;
            }
            return Ok(());
        }

        let entry = Entry {
            namespace: String::try_from(namespace).map_err(|_| StoreError::KeyTooLong)?,
            key: String::try_from(key).map_err(|_| StoreError::KeyTooLong)?,
            value,
        };
        self.entries.push(entry).map_err(|_| StoreError::Full)?;
        self.dirty = true;
        Ok(())
    }

    fn erase(&mut self, namespace: &str, key: &str) -> Result<bool, StoreError> {
        self.ensure_readable()?;
        let Some(index) = self
            .entries
            .iter()
            .position(|entry| entry.matches(namespace, key))
        else {
            return Ok(false);
        };
        self.entries.swap_remove(index);
        self.dirty = true;
        Ok(true)
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        self.ensure_readable()?;
        if !self.dirty {
            return Ok(());
        }
        let record = encode_record(&self.entries);
        self.flash
            .write(self.offset, &record)
            .map_err(|_| StoreError::Flash)?;
        self.dirty = false;
        Ok(())
    }
}

fn encode_record(entries: &[Entry]) -> [u8; RECORD_LEN] {
    let mut record = [0xFFu8; RECORD_LEN];
    record[0..4].copy_from_slice(&KV_STORE_MAGIC.to_le_bytes());
    record[4] = KV_STORE_VERSION;
    record[5] = entries.len() as u8;
    for (slot, entry) in record[HEADER_LEN..RECORD_LEN - 1]
        .chunks_exact_mut(ENTRY_LEN)
        .zip(entries)
    {
        let (namespace, rest) = slot.split_at_mut(1 + KV_NAME_MAX);
        let (key, value) = rest.split_at_mut(1 + KV_NAME_MAX);
        write_field(namespace, entry.namespace.as_bytes());
        write_field(key, entry.key.as_bytes());
        write_field(value, &entry.value);
    }
    record[RECORD_LEN - 1] = checksum8(&record[..RECORD_LEN - 1]);
    record
}

fn decode_record(record: &[u8; RECORD_LEN]) -> Option<Vec<Entry, KV_STORE_MAX_ENTRIES>> {
    if record.iter().all(|&byte| byte == 0xFF) {
        return None;
    }
    if u32::from_le_bytes([record[0], record[1], record[2], record[3]]) != KV_STORE_MAGIC {
        log::warn!("kv_store: bad magic; starting empty");
        return None;
    }
    if record[4] != KV_STORE_VERSION {
        log::warn!("kv_store: unknown version={}; starting empty", record[4]);
        return None;
    }
    if record[RECORD_LEN - 1] != checksum8(&record[..RECORD_LEN - 1]) {
        log::warn!("kv_store: checksum mismatch; starting empty");
        return None;
    }

    let count = usize::from(record[5]);
    if count > KV_STORE_MAX_ENTRIES {
        return None;
    }
    let mut entries = Vec::new();
    for slot in record[HEADER_LEN..RECORD_LEN - 1]
        .chunks_exact(ENTRY_LEN)
        .take(count)
    {
        let (namespace, rest) = slot.split_at(1 + KV_NAME_MAX);
        let (key, value) = rest.split_at(1 + KV_NAME_MAX);
        let namespace = core::str::from_utf8(read_field(namespace)?).ok()?;
        let key = core::str::from_utf8(read_field(key)?).ok()?;
        let entry = Entry {
            namespace: String::try_from(namespace).ok()?,
            key: String::try_from(key).ok()?,
            value: Vec::from_slice(read_field(value)?).ok()?,
        };
        entries.push(entry).ok()?;
    }
    Some(entries)
}

fn write_field(slot: &mut [u8], bytes: &[u8]) {
    slot[0] = bytes.len() as u8;
    slot[1..1 + bytes.len()].copy_from_slice(bytes);
}

fn read_field(slot: &[u8]) -> Option<&[u8]> {
    let len = usize::from(slot[0]);
    slot.get(1..1 + len)
}

fn checksum8(bytes: &[u8]) -> u8 {
    let mut acc = 0x5Au8;
    for &byte in bytes {
        acc ^= byte.rotate_left(1);
    }
    acc
}
