//! On-target checks for the pieces that only exist on the ESP32: real flash
//! behind the key/value store and the embassy timer used for the recovery grace.

#![no_std]
#![no_main]

#[cfg(test)]
#[embedded_test::tests(executor = esp_rtos::embassy::Executor::new())]
mod tests {
    use audionet::firmware::{
        config::{RECOVERY_NAMESPACE, RESTART_COUNTER_KEY},
        storage::{FlashKvStore, KeyValueStore},
    };
    use embedded_storage::ReadStorage;
    use esp_storage::FlashStorage;

    struct Context {
        flash: FlashStorage<'static>,
    }

    #[init]
    fn init() -> Context {
        let peripherals = esp_hal::init(esp_hal::Config::default());
        let timg0 = esp_hal::timer::timg::TimerGroup::new(peripherals.TIMG0);
        esp_rtos::start(timg0.timer0);
        Context {
            flash: FlashStorage::new(peripherals.FLASH).multicore_auto_park(),
        }
    }

    #[test]
    async fn restart_counter_survives_reopen(context: Context) {
        let offset = (context.flash.capacity() as u32).saturating_sub(FlashStorage::SECTOR_SIZE);
        let mut store = FlashKvStore::open(context.flash, offset);
        let previous = store
            .get_u8(RECOVERY_NAMESPACE, RESTART_COUNTER_KEY)
            .unwrap()
            .unwrap_or(0);
        store
            .set_u8(RECOVERY_NAMESPACE, RESTART_COUNTER_KEY, previous.wrapping_add(1))
            .unwrap();
        store.commit().unwrap();

        let mut reopened = FlashKvStore::open(store.into_inner(), offset);
        assert_eq!(
            reopened.get_u8(RECOVERY_NAMESPACE, RESTART_COUNTER_KEY),
            Ok(Some(previous.wrapping_add(1)))
        );

        reopened
            .set_u8(RECOVERY_NAMESPACE, RESTART_COUNTER_KEY, previous)
            .unwrap();
        reopened.commit().unwrap();
    }

    #[test]
    async fn timer_runs() {
        let started = embassy_time::Instant::now();
        embassy_time::Timer::after(embassy_time::Duration::from_millis(10)).await;
        assert!(started.elapsed() >= embassy_time::Duration::from_millis(10));
    }
}
