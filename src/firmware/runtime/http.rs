use core::fmt::Write as _;

use embassy_net::{tcp::TcpSocket, IpListenEndpoint, Stack};
use embassy_time::{with_timeout, Duration};
use embedded_io_async::Write;
use heapless::String;
use static_cell::StaticCell;

use crate::firmware::{
    config::channels::{GAIN_UPDATES, NETWORK_STATE},
    control::{find_header_end, parse_request_line, render_status, resolve_route, Route},
};

const HTTP_HEADER_MAX: usize = 1024;
const HTTP_RW_BUF: usize = 1536;

#[embassy_executor::task]
pub(super) async fn http_server_task(stack: Stack<'static>, port: u16) {
    static RX_BUFFER: StaticCell<[u8; HTTP_RW_BUF]> = StaticCell::new();
    static TX_BUFFER: StaticCell<[u8; HTTP_RW_BUF]> = StaticCell::new();

    let rx_buffer = RX_BUFFER.init([0u8; HTTP_RW_BUF]);
    let tx_buffer = TX_BUFFER.init([0u8; HTTP_RW_BUF]);

    stack.wait_config_up().await;
    if let Some(cfg) = stack.config_v4() {
        log::info!("ui_http: listening on {}:{}", cfg.address.address(), port);
    }

    loop {
        let mut socket = TcpSocket::new(stack, &mut rx_buffer[..], &mut tx_buffer[..]);
        socket.set_timeout(Some(Duration::from_secs(10)));

        if let Err(err) = socket.accept(IpListenEndpoint { addr: None, port }).await {
            log::warn!("ui_http: accept err={:?}", err);
            continue;
        }

        if let Err(err) = handle_connection(&mut socket).await {
            log::warn!("ui_http: request err={}", err);
        }

        let _ = with_timeout(Duration::from_millis(250), socket.flush()).await;
        socket.close();
    }
}

async fn handle_connection(socket: &mut TcpSocket<'_>) -> Result<(), &'static str> {
    let mut header_buf = [0u8; HTTP_HEADER_MAX];
    let mut filled = 0usize;
    let header_end = loop {
        if filled == header_buf.len() {
            write_response(socket, "431 Request Header Fields Too Large", "", b"").await;
            return Err("header too large");
        }
        let n = socket
            .read(&mut header_buf[filled..])
            .await
            .map_err(|_| "read")?;
        if n == 0 {
            return Err("eof");
        }
        filled += n;
        if let Some(end) = find_header_end(&header_buf[..filled]) {
            break end;
        }
    };

    let header = core::str::from_utf8(&header_buf[..header_end]).map_err(|_| "header utf8")?;
    let (method, target) = parse_request_line(header).ok_or("bad request line")?;
    log::debug!("ui_http: {} {}", method, target);

    match resolve_route(method, target) {
        Route::Status => {
            let body = render_status(&NETWORK_STATE.reader());
            write_response(socket, "200 OK", "Content-Type: text/plain\r\n", body.as_bytes()).await;
        }
        Route::PostGains(update) => {
            if let Some(update) = update {
                GAIN_UPDATES.send(update).await;
            }
            write_response(socket, "303 See Other", "Location: /\r\n", b"post successfully").await;
        }
        Route::Favicon => write_response(socket, "200 OK", "", b"").await,
        Route::NotFound => write_response(socket, "404 Not Found", "", b"not found").await,
    }
    Ok(())
}

async fn write_response(socket: &mut TcpSocket<'_>, status: &str, extra_headers: &str, body: &[u8]) {
    let mut head: String<160> = String::new();
    if write!(
        head,
        "HTTP/1.0 {}\r\nConnection: close\r\n{}Content-Length: {}\r\n\r\n",
        status,
        extra_headers,
        body.len()
    )
    .is_err()
    {
        log::warn!("ui_http: response head overflow status={}", status);
        return;
    }
    let _ = socket.write_all(head.as_bytes()).await;
    let _ = socket.write_all(body).await;
}
