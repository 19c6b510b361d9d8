use core::net::Ipv4Addr;

use super::*;
use crate::firmware::{
    network::SharedNetworkState,
    types::{DspFlow, FilterParams, GainUpdate, IpInfo},
};

#[derive(Default)]
struct RecordingSink {
    applied: Vec<FilterParams>,
}

impl FilterSink for RecordingSink {
    fn update_filter_params(&mut self, params: &FilterParams) {
        self.applied.push(*params);
    }
}

#[test]
fn all_three_gains_are_parsed() {
    let update = parse_gain_query("/post?gain_1=3.5&gain_2=-1&gain_3=12").unwrap();
    assert_eq!(
        update,
        GainUpdate {
            gain_1: 3.5,
            gain_2: -1.0,
            gain_3: 12.0
        }
    );
}

#[test]
fn missing_keys_default_to_zero() {
    let update = parse_gain_query("/post?gain_3=6").unwrap();
    assert_eq!(update.gain_1, 0.0);
    assert_eq!(update.gain_2, 0.0);
    assert_eq!(update.gain_3, 6.0);
}

#[test]
fn no_gain_key_means_no_update() {
    assert_eq!(parse_gain_query("/post"), None);
    assert_eq!(parse_gain_query("/post?volume=3"), None);
    assert_eq!(parse_gain_query("/post?gain_1=&gain_2="), None);
}

#[test]
fn values_parse_like_a_numeric_prefix() {
    let update = parse_gain_query("/post?gain_1=4dB&gain_2=abc&gain_3=.5e1x").unwrap();
    assert_eq!(update.gain_1, 4.0);
    assert_eq!(update.gain_2, 0.0);
    assert_eq!(update.gain_3, 5.0);

    let update = parse_gain_query("/post?gain_1=-2.&gain_3=1e").unwrap();
    assert_eq!(update.gain_1, -2.0);
    assert_eq!(update.gain_3, 1.0);
}

#[test]
fn bass_treble_drops_the_middle_band() {
    let params = FilterParams::bass_treble(GainUpdate {
        gain_1: 2.0,
        gain_2: 9.0,
        gain_3: -4.0,
    });
    assert_eq!(params.flow, DspFlow::EqBassTreble);
    assert_eq!(params.fc_1, 300.0);
    assert_eq!(params.gain_1, 2.0);
    assert_eq!(params.fc_3, 4_000.0);
    assert_eq!(params.gain_3, -4.0);
}

#[test]
fn gain_update_reaches_the_sink() {
    let mut sink = RecordingSink::default();
    let params = apply_gain_update(
        &mut sink,
        GainUpdate {
            gain_1: 1.0,
            gain_2: 0.0,
            gain_3: 2.0,
        },
    );
    assert_eq!(sink.applied, [params]);
}

#[test]
fn routes_follow_method_and_path() {
    assert_eq!(resolve_route("GET", "/"), Route::Status);
    assert_eq!(resolve_route("GET", "/favicon.ico"), Route::Favicon);
    assert_eq!(resolve_route("POST", "/post"), Route::PostGains(None));
    assert_eq!(
        resolve_route("POST", "/post?gain_1=1"),
        Route::PostGains(Some(GainUpdate {
            gain_1: 1.0,
            ..GainUpdate::default()
        }))
    );
    assert_eq!(resolve_route("GET", "/post"), Route::NotFound);
    assert_eq!(resolve_route("DELETE", "/"), Route::NotFound);
}

#[test]
fn request_line_needs_three_parts() {
    let header = "POST /post?gain_1=1 HTTP/1.1\r\nHost: x\r\n";
    assert_eq!(parse_request_line(header), Some(("POST", "/post?gain_1=1")));
    assert_eq!(parse_request_line("GET /\r\n"), None);
    assert_eq!(find_header_end(b"GET / HTTP/1.1\r\n\r\nbody"), Some(14));
    assert_eq!(find_header_end(b"GET / HTTP/1.1\r\n"), None);
}

#[test]
fn status_page_reports_offline_then_address() {
    let shared = SharedNetworkState::new();
    let body = render_status(&shared.reader());
    assert!(body.starts_with("offline\n"));

    let info = IpInfo::new(
        Ipv4Addr::new(10, 0, 0, 7),
        Ipv4Addr::new(255, 0, 0, 0),
        Ipv4Addr::new(10, 0, 0, 1),
    );
    shared.wireless.publish(crate::firmware::network::LinkState {
        connected: true,
        address: info,
        retry_count: 0,
    });
    let body = render_status(&shared.reader());
    assert!(body.starts_with("online ip=10.0.0.7 mask=255.0.0.0 gw=10.0.0.1\n"));
    assert!(body.contains("wireless connected=true ip=10.0.0.7 retries=0"));
}
