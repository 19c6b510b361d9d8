use embedded_storage::ReadStorage;
use esp_hal::timer::timg::TimerGroup;
use esp_rtos::embassy::Executor;
use esp_storage::FlashStorage;
use log::LevelFilter;
use static_cell::StaticCell;

use super::{
    filter_task::filter_task,
    http::http_server_task,
    link_task::{address_watch_task, link_task, RuntimeManager, RuntimeStore},
    radio::{install_event_forwarders, net_task, setup},
    reset::boot_reset_cause,
};
use crate::firmware::{
    config::{channels::NETWORK_STATE, web_port, NetworkConfig},
    network::{ConnectivityManager, NoWiredLink},
    storage::FlashKvStore,
};

const HEAP_BYTES: usize = 72 * 1024;

pub fn run() -> ! {
    esp_println::logger::init_logger(LevelFilter::Info);
    let peripherals = esp_hal::init(esp_hal::Config::default());
    let reset_cause = boot_reset_cause();
    log::info!("boot: audionet reset_cause={}", reset_cause.as_str());

    // esp-radio needs an allocator.
    esp_alloc::heap_allocator!(size: HEAP_BYTES);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let store = open_store(peripherals.FLASH);
    let config = NetworkConfig::from_build_env();
    if config.wired_enabled {
        log::warn!("eth_link: no Ethernet MAC on this board; running wireless only");
    }

    install_event_forwarders();
    let radio = match setup(peripherals.WIFI) {
        Ok(radio) => radio,
        Err(err) => {
            log::error!("{}", err);
            halt_forever();
        }
    };

    let mut manager: RuntimeManager =
        ConnectivityManager::new(&config, &NETWORK_STATE, radio.radio, store, None::<NoWiredLink>);
    match manager.init(&reset_cause) {
        Ok(report) => log::info!(
            "boot: network up recovery={:?} provisioning={}",
            report.recovery,
            report.needs_provisioning
        ),
        Err(err) => {
            log::error!("boot: network init failed err={}", err);
            halt_forever();
        }
    }

    let port = web_port();
    let net_runner = radio.net_runner;
    let stack = radio.stack;

    static EXECUTOR: StaticCell<Executor> = StaticCell::new();
    let executor = EXECUTOR.init(Executor::new());
    executor.run(move |spawner| {
        spawner.must_spawn(net_task(net_runner));
        spawner.must_spawn(link_task(manager, stack));
        spawner.must_spawn(address_watch_task(stack));
        spawner.must_spawn(http_server_task(stack, port));
        spawner.must_spawn(filter_task());
    });
}

/// Last flash sector holds the key/value record.
fn open_store(flash: esp_hal::peripherals::FLASH<'static>) -> RuntimeStore {
    let flash = FlashStorage::new(flash).multicore_auto_park();
    let capacity = flash.capacity() as u32;
    let offset = capacity.saturating_sub(FlashStorage::SECTOR_SIZE);
    FlashKvStore::open(flash, offset)
}

fn halt_forever() -> ! {
    loop {
        core::hint::spin_loop();
    }
}
