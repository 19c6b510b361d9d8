mod kv_store;
#[cfg(test)]
pub(crate) mod ram_flash;
#[cfg(test)]
mod tests;

pub use kv_store::{FlashKvStore, KeyValueStore, StoreError};
