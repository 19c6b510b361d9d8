use super::network::parse_build_value;
use super::{NetworkConfig, RecoveryPolicy, RetryPolicy};

#[test]
fn retry_policy_zero_is_unlimited() {
    let policy = RetryPolicy::UNLIMITED;
    assert!(policy.is_unlimited());
    assert!(policy.allows(0));
    assert!(policy.allows(u32::MAX));
}

#[test]
fn retry_policy_bounds_attempts() {
    let policy = RetryPolicy::new(3);
    assert!(policy.allows(2));
    assert!(!policy.allows(3));
    assert!(!policy.allows(4));
}

#[test]
fn build_value_falls_back_on_garbage() {
    assert_eq!(parse_build_value(Some("12"), "X", 5u32), 12);
    assert_eq!(parse_build_value(Some(" 7 "), "X", 5u32), 7);
    assert_eq!(parse_build_value(Some("many"), "X", 5u32), 5);
    assert_eq!(parse_build_value::<u16>(None, "X", 8000), 8000);
}

#[test]
fn defaults_run_in_provisioning_mode_with_recovery() {
    let config = NetworkConfig::defaults();
    assert!(config.provisioning_mode());
    assert_eq!(config.recovery, RecoveryPolicy::defaults());
    assert_eq!(config.recovery.threshold, 3);
    assert_eq!(config.recovery.grace.as_millis(), 5_000);
}
