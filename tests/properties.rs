//! Property-based tests for the attendance and SLA calculators.
//!
//! Properties covered:
//! 1. Identical inputs give identical outputs
//! 2. Hour figures are never negative and carry at most 2 decimal places
//! 3. Lunch is deducted only for field engineers past the threshold
//! 4. Regular and overtime hours always add back to effective hours
//! 5. The SLA verdict follows the inclusive threshold
//! 6. Pauses never push the SLA count negative or past 2 decimal places

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use sla_engine::calculation::{compute_attendance_duration, compute_sla, hours_from_seconds};
use sla_engine::config::{SlaPolicy, WorkdayPolicy};
use sla_engine::models::{AttendanceRecord, DerivedDuration, Severity, SlaStatus, TicketSlaInput};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

fn clock() -> NaiveDateTime {
    day().and_hms_opt(23, 59, 0).unwrap() + Duration::days(3)
}

fn minutes_record(minutes: i64, field_engineer: bool) -> AttendanceRecord {
    AttendanceRecord {
        id: None,
        date: day(),
        time_in: None,
        time_out: None,
        total_minutes_raw: Some(minutes),
        total_minutes_final: None,
        is_field_engineer: field_engineer,
    }
}

fn clocked_record(start_secs: i64, length_secs: i64, field_engineer: bool) -> AttendanceRecord {
    let time_in = day().and_hms_opt(0, 0, 0).unwrap() + Duration::seconds(start_secs);
    AttendanceRecord {
        id: None,
        date: day(),
        time_in: Some(time_in),
        time_out: Some(time_in + Duration::seconds(length_secs)),
        total_minutes_raw: None,
        total_minutes_final: None,
        is_field_engineer: field_engineer,
    }
}

fn assert_well_formed(duration: &DerivedDuration) {
    for value in [
        duration.raw_hours,
        duration.lunch_deduction_hours,
        duration.effective_hours,
        duration.regular_hours,
        duration.overtime_hours,
    ] {
        assert!(value >= Decimal::ZERO, "negative figure in {:?}", duration);
        assert!(value.scale() <= 2, "more than 2 dp in {:?}", duration);
    }
}

fn severity_for(index: u8) -> Severity {
    match index {
        0 => Severity::Sev1,
        1 => Severity::Sev2,
        2 => Severity::Sev3,
        _ => Severity::Sev4,
    }
}

fn ticket(severity: Severity, ack: NaiveDateTime, done: NaiveDateTime) -> TicketSlaInput {
    TicketSlaInput {
        ticket_id: Some("INC-P".to_string()),
        severity: Some(severity.to_string()),
        date_acknowledged: Some(ack.format("%Y-%m-%d").to_string()),
        time_acknowledged: Some(ack.format("%H:%M:%S").to_string()),
        date_attended: Some(done.format("%Y-%m-%d").to_string()),
        work_end: Some(done.format("%H:%M:%S").to_string()),
        ..TicketSlaInput::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_attendance_is_deterministic(
        minutes in -600i64..2000,
        field_engineer in any::<bool>(),
    ) {
        let record = minutes_record(minutes, field_engineer);
        let policy = WorkdayPolicy::default();

        let first = compute_attendance_duration(&record, clock(), &policy);
        let second = compute_attendance_duration(&record, clock(), &policy);

        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_attendance_figures_well_formed(
        start_secs in 0i64..86_400,
        length_secs in -3_600i64..60_000,
        field_engineer in any::<bool>(),
    ) {
        let record = clocked_record(start_secs, length_secs, field_engineer);
        let duration = compute_attendance_duration(&record, clock(), &WorkdayPolicy::default());

        assert_well_formed(&duration);
    }

    #[test]
    fn prop_regular_plus_overtime_is_effective(
        minutes in 0i64..2000,
        field_engineer in any::<bool>(),
    ) {
        let policy = WorkdayPolicy::default();
        let duration = compute_attendance_duration(&minutes_record(minutes, field_engineer), clock(), &policy);

        prop_assert_eq!(duration.regular_hours + duration.overtime_hours, duration.effective_hours);
        prop_assert!(duration.regular_hours <= policy.standard_hours);
        prop_assert_eq!(
            duration.effective_hours,
            duration.raw_hours - duration.lunch_deduction_hours
        );
    }

    #[test]
    fn prop_lunch_only_for_field_engineers_past_threshold(
        minutes in 0i64..2000,
        field_engineer in any::<bool>(),
    ) {
        let policy = WorkdayPolicy::default();
        let duration = compute_attendance_duration(&minutes_record(minutes, field_engineer), clock(), &policy);

        let expected = if field_engineer && duration.raw_hours > policy.lunch_threshold_hours {
            policy.lunch_deduction_hours
        } else {
            Decimal::ZERO
        };
        prop_assert_eq!(duration.lunch_deduction_hours, expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_sla_count_is_elapsed_hours(
        ack_secs in 0i64..86_400,
        elapsed_secs in 0i64..400_000,
        severity_index in 0u8..4,
    ) {
        let ack = day().and_hms_opt(0, 0, 0).unwrap() + Duration::seconds(ack_secs);
        let done = ack + Duration::seconds(elapsed_secs);
        let input = ticket(severity_for(severity_index), ack, done);

        let result = compute_sla(&input, &SlaPolicy::default()).unwrap();
        let count = result.sla_count_hours.unwrap();

        prop_assert_eq!(count, hours_from_seconds(elapsed_secs));
        prop_assert!(count >= Decimal::ZERO);
        prop_assert!(count.scale() <= 2);
    }

    #[test]
    fn prop_sla_verdict_follows_inclusive_threshold(
        ack_secs in 0i64..86_400,
        elapsed_secs in 0i64..400_000,
        severity_index in 0u8..4,
    ) {
        let policy = SlaPolicy::default();
        let severity = severity_for(severity_index);
        let ack = day().and_hms_opt(0, 0, 0).unwrap() + Duration::seconds(ack_secs);
        let input = ticket(severity, ack, ack + Duration::seconds(elapsed_secs));

        let first = compute_sla(&input, &policy).unwrap();
        let second = compute_sla(&input, &policy).unwrap();
        prop_assert_eq!(&first, &second);

        let expected = if first.sla_count_hours.unwrap() <= policy.threshold(severity) {
            SlaStatus::Passed
        } else {
            SlaStatus::Failed
        };
        prop_assert_eq!(first.sla_status, Some(expected));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_sla_with_pauses_stays_well_formed(
        ack_secs in 0i64..86_400,
        elapsed_secs in 172_800i64..400_000,
        pause_starts in (0i64..86_400, 0i64..86_400),
        pause_lengths in (1i64..86_400, 1i64..86_400),
        severity_index in 0u8..4,
    ) {
        // Each pause is under a day and the elapsed span is at least two,
        // so both always fit in what remains.
        let midnight = day().and_hms_opt(0, 0, 0).unwrap();
        let ack = midnight + Duration::seconds(ack_secs);
        let mut input = ticket(severity_for(severity_index), ack, ack + Duration::seconds(elapsed_secs));

        let pause = |start: i64, length: i64| {
            let from = midnight + Duration::seconds(start);
            let to = from + Duration::seconds(length);
            (
                Some(from.format("%H:%M:%S").to_string()),
                Some(to.format("%H:%M:%S").to_string()),
            )
        };
        (input.pause_start, input.pause_end) = pause(pause_starts.0, pause_lengths.0);
        (input.pause_start2, input.pause_end2) = pause(pause_starts.1, pause_lengths.1);

        let result = compute_sla(&input, &SlaPolicy::default()).unwrap();
        let count = result.sla_count_hours.unwrap();

        prop_assert!(count >= Decimal::ZERO);
        prop_assert!(count.scale() <= 2);
        prop_assert_eq!(
            count,
            hours_from_seconds(elapsed_secs - pause_lengths.0 - pause_lengths.1)
        );
        prop_assert!(result.pause_hours.unwrap().scale() <= 2);
    }
}

#[test]
fn test_sla_exactly_at_threshold_passes_for_every_severity() {
    let policy = SlaPolicy::default();
    let ack = day().and_hms_opt(8, 0, 0).unwrap();

    for index in 0..4 {
        let severity = severity_for(index);
        let threshold = policy.threshold(severity);
        let seconds = (threshold * Decimal::from(3600)).to_i64().unwrap();

        let result = compute_sla(&ticket(severity, ack, ack + Duration::seconds(seconds)), &policy)
            .unwrap();
        assert_eq!(result.sla_status, Some(SlaStatus::Passed), "{}", severity);

        let result = compute_sla(
            &ticket(severity, ack, ack + Duration::seconds(seconds + 36)),
            &policy,
        )
        .unwrap();
        assert_eq!(result.sla_status, Some(SlaStatus::Failed), "{}", severity);
    }
}
