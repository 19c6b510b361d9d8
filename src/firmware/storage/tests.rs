use super::kv_store::RECORD_LEN;
use super::ram_flash::RamFlash;
use super::{FlashKvStore, KeyValueStore, StoreError};

const OFFSET: u32 = 0;

#[test]
fn erased_flash_opens_empty() {
    let mut store = FlashKvStore::open(RamFlash::new(), OFFSET);
    assert_eq!(store.get_u8("storage", "restart_counter"), Ok(None));
}

#[test]
fn committed_values_survive_reopen() {
    let mut store = FlashKvStore::open(RamFlash::new(), OFFSET);
    store.set_u8("storage", "restart_counter", 2).unwrap();
    store.set("wifi", "ssid", b"studio").unwrap();
    store.commit().unwrap();

    let mut reopened = FlashKvStore::open(store.into_inner(), OFFSET);
    assert_eq!(reopened.get_u8("storage", "restart_counter"), Ok(Some(2)));
    let mut buf = [0u8; 32];
    let len = reopened.get("wifi", "ssid", &mut buf).unwrap().unwrap();
    assert_eq!(&buf[..len], b"studio");
}

#[test]
fn uncommitted_values_are_lost_on_reopen() {
    let mut store = FlashKvStore::open(RamFlash::new(), OFFSET);
    store.set_u8("storage", "restart_counter", 1).unwrap();
    assert_eq!(store.get_u8("storage", "restart_counter"), Ok(Some(1)));

    let mut reopened = FlashKvStore::open(store.into_inner(), OFFSET);
    assert_eq!(reopened.get_u8("storage", "restart_counter"), Ok(None));
}

#[test]
fn namespaces_keep_equal_keys_apart() {
    let mut store = FlashKvStore::open(RamFlash::new(), OFFSET);
    store.set_u8("storage", "k", 1).unwrap();
    store.set_u8("wifi", "k", 2).unwrap();
    assert_eq!(store.get_u8("storage", "k"), Ok(Some(1)));
    assert_eq!(store.get_u8("wifi", "k"), Ok(Some(2)));
}

#[test]
fn erase_removes_key_after_commit() {
    let mut store = FlashKvStore::open(RamFlash::new(), OFFSET);
    store.set("wifi", "password", b"hunter22").unwrap();
    store.commit().unwrap();
    assert_eq!(store.erase("wifi", "password"), Ok(true));
    assert_eq!(store.erase("wifi", "password"), Ok(false));
    store.commit().unwrap();

    let mut reopened = FlashKvStore::open(store.into_inner(), OFFSET);
    let mut buf = [0u8; 64];
    assert_eq!(reopened.get("wifi", "password", &mut buf), Ok(None));
}

#[test]
fn commit_without_changes_does_not_write() {
    let mut store = FlashKvStore::open(RamFlash::new(), OFFSET);
    store.set_u8("storage", "restart_counter", 0).unwrap();
    store.commit().unwrap();
    store.set_u8("storage", "restart_counter", 0).unwrap();
    store.commit().unwrap();
    assert_eq!(store.into_inner().writes, 1);
}

#[test]
fn oversized_names_and_values_are_rejected() {
    let mut store = FlashKvStore::open(RamFlash::new(), OFFSET);
    assert_eq!(
        store.set_u8("storage", "a_key_that_is_way_too_long", 1),
        Err(StoreError::KeyTooLong)
    );
    assert_eq!(
        store.set("wifi", "password", &[b'x'; 65]),
        Err(StoreError::ValueTooLong)
    );
}

#[test]
fn table_full_is_reported() {
    let mut store = FlashKvStore::open(RamFlash::new(), OFFSET);
    let keys = ["k0", "k1", "k2", "k3", "k4", "k5", "k6", "k7"];
    for key in keys {
        store.set_u8("ns", key, 1).unwrap();
    }
    assert_eq!(store.set_u8("ns", "k8", 1), Err(StoreError::Full));
}

#[test]
fn checksum_mismatch_loads_empty() {
    let mut store = FlashKvStore::open(RamFlash::new(), OFFSET);
    store.set_u8("storage", "restart_counter", 3).unwrap();
    store.commit().unwrap();
    let mut flash = store.into_inner();
    flash.corrupt_byte(RECORD_LEN / 2);

    let mut reopened = FlashKvStore::open(flash, OFFSET);
    assert_eq!(reopened.get_u8("storage", "restart_counter"), Ok(None));
}

#[test]
fn unreadable_flash_reports_errors() {
    let mut flash = RamFlash::new();
    flash.fail_reads = true;
    let mut store = FlashKvStore::open(flash, OFFSET);
    assert_eq!(
        store.get_u8("storage", "restart_counter"),
        Err(StoreError::Flash)
    );
    assert_eq!(
        store.set_u8("storage", "restart_counter", 1),
        Err(StoreError::Flash)
    );
}

#[test]
fn failed_write_surfaces_on_commit() {
    let mut flash = RamFlash::new();
    flash.fail_writes = true;
    let mut store = FlashKvStore::open(flash, OFFSET);
    store.set_u8("storage", "restart_counter", 1).unwrap();
    assert_eq!(store.commit(), Err(StoreError::Flash));
}

#[test]
fn wrong_width_counter_is_corrupt() {
    let mut store = FlashKvStore::open(RamFlash::new(), OFFSET);
    for value in [&[][..], &[1, 2], &[1, 2, 3, 4]] {
        store.set("storage", "restart_counter", value).unwrap();
        assert_eq!(
            store.get_u8("storage", "restart_counter"),
            Err(StoreError::Corrupt)
        );
    }
}
