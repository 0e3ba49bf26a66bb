use ixmon_math::{floored_avg, floored_pct, round_whole, share_pct};

#[test]
fn given_no_executions_when_success_rate_is_requested_then_zero_is_returned() {
    let got = floored_pct(0, 0);
    assert_eq!(got, 0);
}

#[test]
fn given_nine_of_ten_when_rate_is_computed_then_ninety_is_returned() {
    let got = floored_pct(9, 10);
    assert_eq!(got, 90);
}

#[test]
fn given_no_samples_when_average_is_requested_then_zero_is_returned() {
    let got = floored_avg(0, 0);
    assert_eq!(got, 0);
}

#[test]
fn given_zero_failures_when_share_is_requested_then_nothing_is_returned() {
    let got = share_pct(4, 0);
    assert_eq!(got, None);
}

#[test]
fn given_exact_half_when_rounding_then_value_goes_up() {
    let got = round_whole(2.5);
    assert_eq!(got, 3);
}
