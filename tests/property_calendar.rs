use chrono::{Datelike, NaiveDate, Weekday};
use proptest::prelude::*;
use weekcast::{
    app::window::{Layout, ShiftOutcome, decide_shift},
    domain::calendar::{CalendarDate, day_jump_to, shift_week},
};

fn any_date() -> impl Strategy<Value = CalendarDate> {
    // 1900-01-01 through roughly 2199.
    (0i64..110_000).prop_map(|offset| {
        let base = NaiveDate::from_ymd_opt(1900, 1, 1).expect("valid base date");
        CalendarDate::from(base).add_days(offset)
    })
}

fn any_weekday() -> impl Strategy<Value = Weekday> {
    prop::sample::select(vec![
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ])
}

proptest! {
    #[test]
    fn week_shifts_are_inverse(date in any_date(), forward in any::<bool>()) {
        prop_assert_eq!(shift_week(!forward, shift_week(forward, date)), date);
    }

    #[test]
    fn week_shift_keeps_weekday_and_spans_seven_days(date in any_date(), forward in any::<bool>()) {
        let shifted = shift_week(forward, date);
        prop_assert_eq!(shifted.weekday(), date.weekday());
        let days = (shifted.naive() - date.naive()).num_days();
        prop_assert_eq!(days, if forward { 7 } else { -7 });
    }

    #[test]
    fn day_jump_lands_on_the_requested_weekday(date in any_date(), target in any_weekday()) {
        let jump = day_jump_to(date.weekday(), target);
        prop_assert!((0..7).contains(&jump));
        prop_assert_eq!(date.add_days(jump).naive().weekday(), target);
    }

    #[test]
    fn unusable_primary_never_moves_the_window(
        date in any_date(),
        secondary_ok in any::<bool>(),
        narrow in any::<bool>(),
    ) {
        let layout = if narrow { Layout::Narrow } else { Layout::Wide };
        let outcome = decide_shift((date, false), Some((date.add_days(7), secondary_ok)), layout);
        prop_assert_eq!(outcome, ShiftOutcome::Frozen);
    }
}
