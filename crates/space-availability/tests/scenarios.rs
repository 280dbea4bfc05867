use chrono::{DateTime, TimeZone, Utc};
use space_availability::{fetch_availability, AvailabilityError, OpeningTimes, Space, Time};

fn t(hour: u32, minute: u32) -> Time {
    Time::new(hour, minute).unwrap()
}

fn available(open: Time, close: Time) -> OpeningTimes {
    OpeningTimes::Available { open, close }
}

fn no_notice_space() -> Space {
    Space::from_json(include_str!("fixtures/space-with-no-advance-notice.json")).unwrap()
}

fn thirty_minute_notice_space() -> Space {
    Space::from_json(include_str!("fixtures/space-with-30-minutes-advance-notice.json")).unwrap()
}

fn monday_afternoon_utc() -> DateTime<Utc> {
    // Monday, September 7, 2020, 15:22 UTC
    Utc.with_ymd_and_hms(2020, 9, 7, 15, 22, 0).unwrap()
}

// ── a space with no advance notice (Europe/London, 16:22 local) ─────────────

#[test]
fn no_notice_single_day_rounds_to_next_slot() {
    let availability = fetch_availability(&no_notice_space(), 1, monday_afternoon_utc()).unwrap();

    assert_eq!(availability.len(), 1);
    assert_eq!(availability["2020-9-7"], available(t(16, 30), t(17, 0)));
}

#[test]
fn no_notice_second_day_opens_at_schedule_open() {
    let availability = fetch_availability(&no_notice_space(), 2, monday_afternoon_utc()).unwrap();

    assert_eq!(availability.len(), 2);
    assert_eq!(availability["2020-9-7"], available(t(16, 30), t(17, 0)));
    assert_eq!(availability["2020-9-8"], available(t(9, 0), t(17, 0)));
}

#[test]
fn no_notice_queried_exactly_at_open() {
    // 08:00Z = 09:00 BST
    let at_open = Utc.with_ymd_and_hms(2020, 9, 7, 8, 0, 0).unwrap();
    let availability = fetch_availability(&no_notice_space(), 1, at_open).unwrap();
    assert_eq!(availability["2020-9-7"], available(t(9, 0), t(17, 0)));
}

#[test]
fn no_notice_after_close_is_unavailable() {
    // 16:50Z = 17:50 BST
    let evening = Utc.with_ymd_and_hms(2020, 9, 7, 16, 50, 0).unwrap();
    let availability = fetch_availability(&no_notice_space(), 2, evening).unwrap();
    assert_eq!(availability["2020-9-7"], OpeningTimes::Unavailable);
    assert_eq!(availability["2020-9-8"], available(t(9, 0), t(17, 0)));
}

// ── a space with 30 minutes advance notice (America/New_York, 11:22 local) ──

#[test]
fn thirty_minute_notice_pushes_past_threshold() {
    let availability =
        fetch_availability(&thirty_minute_notice_space(), 1, monday_afternoon_utc()).unwrap();
    assert_eq!(availability["2020-9-7"], available(t(12, 0), t(17, 0)));
}

#[test]
fn thirty_minute_notice_second_day_from_midnight() {
    let availability =
        fetch_availability(&thirty_minute_notice_space(), 2, monday_afternoon_utc()).unwrap();
    assert_eq!(availability["2020-9-7"], available(t(12, 0), t(17, 0)));
    assert_eq!(availability["2020-9-8"], available(t(9, 0), t(17, 0)));
}

#[test]
fn notice_beyond_close_leaves_day_unavailable() {
    let space = thirty_minute_notice_space().with_minimum_notice(6 * 60);
    let availability = fetch_availability(&space, 2, monday_afternoon_utc()).unwrap();
    // 11:22 + 6h = 17:22, past close
    assert_eq!(availability["2020-9-7"], OpeningTimes::Unavailable);
    // midnight + 6h = 06:00, before open
    assert_eq!(availability["2020-9-8"], available(t(9, 0), t(17, 0)));
}

#[test]
fn notice_longer_than_a_day_closes_every_day() {
    let space = no_notice_space().with_minimum_notice(24 * 60);
    let availability = fetch_availability(&space, 5, monday_afternoon_utc()).unwrap();
    assert_eq!(availability.len(), 5);
    assert!(availability.values().all(|day| !day.is_available()));
}

// ── partially configured week ───────────────────────────────────────────────

#[test]
fn partial_week_closed_and_incomplete_days() {
    let space = Space::from_json(include_str!("fixtures/space-with-partial-week.json")).unwrap();
    // 07:00Z = 08:00 BST Monday
    let now = Utc.with_ymd_and_hms(2020, 9, 7, 7, 0, 0).unwrap();
    let availability = fetch_availability(&space, 7, now).unwrap();

    let expected = [
        ("2020-9-7", OpeningTimes::Unavailable),
        ("2020-9-8", OpeningTimes::Unavailable),
        ("2020-9-9", available(t(10, 10), t(14, 0))),
        ("2020-9-10", OpeningTimes::Unavailable),
        ("2020-9-11", OpeningTimes::Unavailable),
        ("2020-9-12", available(t(8, 0), t(12, 30))),
        ("2020-9-13", OpeningTimes::Unavailable),
    ];
    let actual: Vec<(&str, OpeningTimes)> = availability
        .iter()
        .map(|(key, times)| (key.as_str(), *times))
        .collect();
    assert_eq!(actual, expected);
}

// ── DST transitions ─────────────────────────────────────────────────────────

fn seven_day_london_space() -> Space {
    let mut json: serde_json::Value =
        serde_json::from_str(include_str!("fixtures/space-with-no-advance-notice.json")).unwrap();
    for code in ["6", "7"] {
        json["openingTimes"][code] = json["openingTimes"]["1"].clone();
    }
    serde_json::from_value(json).unwrap()
}

#[test]
fn spring_forward_does_not_skip_a_day() {
    // Saturday 27 March 2021, 23:30 GMT; clocks go forward overnight
    let now = Utc.with_ymd_and_hms(2021, 3, 27, 23, 30, 0).unwrap();
    let availability = fetch_availability(&seven_day_london_space(), 3, now).unwrap();

    let keys: Vec<&str> = availability.keys().map(String::as_str).collect();
    assert_eq!(keys, ["2021-3-27", "2021-3-28", "2021-3-29"]);
    assert_eq!(availability["2021-3-27"], OpeningTimes::Unavailable);
    assert_eq!(availability["2021-3-28"], available(t(9, 0), t(17, 0)));
}

#[test]
fn fall_back_does_not_repeat_a_day() {
    // Sunday 31 October 2021, 00:30 BST; clocks go back at 02:00 BST
    let now = Utc.with_ymd_and_hms(2021, 10, 30, 23, 30, 0).unwrap();
    let availability = fetch_availability(&seven_day_london_space(), 3, now).unwrap();

    let keys: Vec<&str> = availability.keys().map(String::as_str).collect();
    assert_eq!(keys, ["2021-10-31", "2021-11-1", "2021-11-2"]);
    assert_eq!(availability["2021-10-31"], available(t(9, 0), t(17, 0)));
}

// ── errors and output shape ─────────────────────────────────────────────────

#[test]
fn unknown_timezone_fails_without_partial_result() {
    let mut space = no_notice_space();
    space.time_zone = "Europe/Atlantis".to_string();
    let err = fetch_availability(&space, 3, monday_afternoon_utc()).unwrap_err();
    assert_eq!(
        err,
        AvailabilityError::InvalidTimezone("'Europe/Atlantis'".to_string())
    );
}

#[test]
fn result_serializes_in_day_order() {
    let now = Utc.with_ymd_and_hms(2020, 9, 11, 15, 22, 0).unwrap();
    let availability = fetch_availability(&no_notice_space(), 3, now).unwrap();
    let json = serde_json::to_string(&availability).unwrap();
    assert_eq!(
        json,
        concat!(
            r#"{"2020-9-11":{"open":{"hour":16,"minute":30},"close":{"hour":17,"minute":0}},"#,
            r#""2020-9-12":{},"#,
            r#""2020-9-13":{}}"#
        )
    );
}
