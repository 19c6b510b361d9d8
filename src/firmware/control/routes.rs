use core::fmt::Write as _;

use heapless::String;

use crate::firmware::{network::IpStatusReader, types::GainUpdate};

use super::query::parse_gain_query;

const STATUS_BODY_MAX: usize = 512;

pub type StatusBody = String<STATUS_BODY_MAX>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Route {
    Status,
    /// `None` when the target carried no gain key; nothing gets queued then.
    PostGains(Option<GainUpdate>),
    Favicon,
    NotFound,
}

pub fn resolve_route(method: &str, target: &str) -> Route {
    match (method, target_path(target)) {
        ("GET", "/") => Route::Status,
        ("POST", "/post") => Route::PostGains(parse_gain_query(target)),
        ("GET", "/favicon.ico") => Route::Favicon,
        _ => Route::NotFound,
    }
}

pub fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|window| window == b"\r\n\r\n")
}

pub fn parse_request_line(header: &str) -> Option<(&str, &str)> {
    let first_line = header.lines().next()?;
    let mut parts = first_line.split_ascii_whitespace();
    let method = parts.next()?;
    let target = parts.next()?;
    let _version = parts.next()?;
    Some((method, target))
}

pub fn target_path(target: &str) -> &str {
    target.split('?').next().unwrap_or(target)
}

/// Plain-text status page. Truncated rather than failing if it ever outgrows
/// the buffer.
pub fn render_status(status: &IpStatusReader<'_>) -> StatusBody {
    let mut body = StatusBody::new();
    let wired = status.wired();
    let wireless = status.wireless();
    let counters = status.counters().snapshot();

    let _ = match status.current_ip() {
        Some(info) => writeln!(body, "online {}", info),
        None => writeln!(body, "offline"),
    };
    let _ = writeln!(
        body,
        "wired connected={} ip={}",
        wired.connected, wired.address.ip
    );
    let _ = writeln!(
        body,
        "wireless connected={} ip={} retries={}",
        wireless.connected, wireless.address.ip, wireless.retry_count
    );
    let _ = writeln!(
        body,
        "connects={} retries={} refused={} disconnects={} erasures={}",
        counters.connect_attempts,
        counters.retries,
        counters.retries_refused,
        counters.disconnects,
        counters.credential_erasures
    );
    body
}
