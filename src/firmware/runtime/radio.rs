use embassy_net::{Runner, Stack, StackResources};
use esp_hal::rng::Rng;
use esp_radio::wifi::{
    event::{self, EventExt},
    AuthMethod, ClientConfig, Config as WifiRuntimeConfig, InternalWifiError, ModeConfig,
    ScanMethod, WifiController, WifiDevice, WifiError,
};
use static_cell::StaticCell;

use crate::firmware::{
    config::channels::LINK_EVENTS,
    network::{StationCredentials, StationRadio},
    types::LinkEvent,
};

const WIFI_RX_QUEUE_SIZE: usize = 3;
const WIFI_TX_QUEUE_SIZE: usize = 2;
const WIFI_STATIC_RX_BUF_NUM: u8 = 4;
const WIFI_DYNAMIC_RX_BUF_NUM: u16 = 8;
const WIFI_DYNAMIC_TX_BUF_NUM: u16 = 8;
const STACK_SOCKETS: usize = 3;

/// `WifiController` behind the station port. All calls return immediately;
/// outcomes come back through the event forwarders.
pub(super) struct EspStationRadio {
    controller: WifiController<'static>,
}

impl StationRadio for EspStationRadio {
    type Error = WifiError;

    fn configure(&mut self, credentials: Option<&StationCredentials>) -> Result<(), Self::Error> {
        let client = match credentials {
            Some(credentials) => client_config(credentials),
            None => ClientConfig::default(),
        };
        self.controller.set_config(&ModeConfig::Client(client))
    }

    fn start(&mut self) -> Result<(), Self::Error> {
        self.controller.start()
    }

    fn connect(&mut self) -> Result<(), Self::Error> {
        self.controller.connect()
    }

    fn restore_factory_defaults(&mut self) -> Result<(), Self::Error> {
        self.controller
            .set_config(&ModeConfig::Client(ClientConfig::default()))
    }
}

pub(super) struct RadioRuntime {
    pub(super) radio: EspStationRadio,
    pub(super) net_runner: Runner<'static, WifiDevice<'static>>,
    pub(super) stack: Stack<'static>,
}

pub(super) fn setup(wifi: esp_hal::peripherals::WIFI<'static>) -> Result<RadioRuntime, &'static str> {
    static RADIO_CTRL: StaticCell<esp_radio::Controller<'static>> = StaticCell::new();
    static STACK_RESOURCES: StaticCell<StackResources<STACK_SOCKETS>> = StaticCell::new();

    let radio_ctrl = esp_radio::init().map_err(|err| {
        log::error!("wifi_link: esp_radio::init err={:?}", err);
        "wifi_link: esp_radio::init failed"
    })?;
    let radio_ctrl = RADIO_CTRL.init(radio_ctrl);
    let (controller, ifaces) =
        esp_radio::wifi::new(radio_ctrl, wifi, wifi_runtime_config()).map_err(|err| match err {
            WifiError::InternalError(InternalWifiError::NoMem) => "wifi_link: wifi init no_mem",
            WifiError::Unsupported => "wifi_link: wifi init unsupported",
            _ => "wifi_link: wifi init failed",
        })?;

    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;
    let (stack, net_runner) = embassy_net::new(
        ifaces.sta,
        embassy_net::Config::dhcpv4(Default::default()),
        STACK_RESOURCES.init(StackResources::<STACK_SOCKETS>::new()),
        seed,
    );

    Ok(RadioRuntime {
        radio: EspStationRadio { controller },
        net_runner,
        stack,
    })
}

/// Radio callbacks run outside the executor; they only enqueue.
pub(super) fn install_event_forwarders() {
    event::StaStart::update_handler(|_| forward(LinkEvent::StationStarted));
    event::StaDisconnected::update_handler(|event| {
        forward(LinkEvent::StationDisconnected {
            reason: event.reason(),
        })
    });
}

fn forward(event: LinkEvent) {
    if LINK_EVENTS.try_send(event).is_err() {
        log::warn!("wifi_link: link event queue full; event dropped");
    }
}

fn wifi_runtime_config() -> WifiRuntimeConfig {
    WifiRuntimeConfig::default()
        .with_rx_queue_size(WIFI_RX_QUEUE_SIZE)
        .with_tx_queue_size(WIFI_TX_QUEUE_SIZE)
        .with_static_rx_buf_num(WIFI_STATIC_RX_BUF_NUM)
        .with_dynamic_rx_buf_num(WIFI_DYNAMIC_RX_BUF_NUM)
        .with_dynamic_tx_buf_num(WIFI_DYNAMIC_TX_BUF_NUM)
}

fn client_config(credentials: &StationCredentials) -> ClientConfig {
    let auth_method = if credentials.is_open() {
        AuthMethod::None
    } else {
        AuthMethod::Wpa2Personal
    };
    ClientConfig::default()
        .with_ssid(credentials.ssid().into())
        .with_password(credentials.password().into())
        .with_auth_method(auth_method)
        .with_scan_method(ScanMethod::AllChannels)
}

#[embassy_executor::task]
pub(super) async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await
}
