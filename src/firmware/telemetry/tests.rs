use super::*;

#[test]
fn fresh_counters_are_zero() {
    assert_eq!(LinkCounters::new().snapshot(), LinkCountersSnapshot::default());
}

#[test]
fn records_land_in_their_own_slot() {
    let counters = LinkCounters::new();
    counters.record_connect_attempt();
    counters.record_connect_attempt();
    counters.record_retry();
    counters.record_foreign_event();

    let snapshot = counters.snapshot();
    assert_eq!(snapshot.connect_attempts, 2);
    assert_eq!(snapshot.retries, 1);
    assert_eq!(snapshot.foreign_events, 1);
    assert_eq!(snapshot.disconnects, 0);
    assert_eq!(snapshot.retries_refused, 0);
}
