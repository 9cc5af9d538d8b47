//! A date-range picker assembled from the calendar and the selection rules,
//! driven end to end the way a host application would.

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};

use calgrid_picker::{Calendar, CalendarArgs, RangeFocus, RangeSelection};
use chrono::{NaiveDate, Weekday};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

#[test]
fn range_selection_flows_through_day_clicks() {
    let range = Arc::new(Mutex::new(RangeSelection::new(None, None)));
    range.lock().expect("range lock").set_focus(RangeFocus::Start);

    let sink = Arc::clone(&range);
    let mut calendar = Calendar::new(
        CalendarArgs::default()
            .month(date(2020, 3, 1))
            .week_start(Weekday::Mon)
            .on_day_click(move |day| sink.lock().expect("range lock").select(day)),
    );
    calendar.resize(420.0, Instant::now());

    // Picking a start hands focus to the end date.
    calendar.click_day(date(2020, 3, 10));
    {
        let range = range.lock().expect("range lock");
        assert_eq!(range.start(), Some(date(2020, 3, 10)));
        assert_eq!(range.focus(), RangeFocus::End);
    }

    // Hovering previews the incomplete edge.
    range.lock().expect("range lock").hover(Some(date(2020, 3, 14)));
    {
        let range = range.lock().expect("range lock");
        let days = calendar.days_with(|day, flags| flags.merge(&range.day_flags(day)));
        assert!(
            days.iter()
                .find(|cell| cell.date == date(2020, 3, 12))
                .is_some_and(|cell| cell.flags.selected_middle)
        );
    }

    // Picking the end completes the range and drops the focus.
    calendar.click_day(date(2020, 3, 14));
    {
        let range = range.lock().expect("range lock");
        assert_eq!(range.end(), Some(date(2020, 3, 14)));
        assert_eq!(range.focus(), RangeFocus::None);
        assert_eq!(range.start(), Some(date(2020, 3, 10)));
    }
}

#[test]
fn picking_an_earlier_end_restarts_the_range() {
    let range = Arc::new(Mutex::new(RangeSelection::new(None, None)));
    range.lock().expect("range lock").set_focus(RangeFocus::Start);

    let sink = Arc::clone(&range);
    let mut calendar = Calendar::new(
        CalendarArgs::default()
            .month(date(2020, 3, 1))
            .week_start(Weekday::Mon)
            .on_day_click(move |day| sink.lock().expect("range lock").select(day)),
    );
    calendar.resize(420.0, Instant::now());

    calendar.click_day(date(2020, 3, 10));
    calendar.click_day(date(2020, 3, 8));

    let range = range.lock().expect("range lock");
    assert_eq!(range.start(), None);
    assert_eq!(range.end(), Some(date(2020, 3, 8)));
    assert_eq!(range.focus(), RangeFocus::Start);
}

#[test]
fn bounds_keep_unselectable_clicks_out_of_the_range() {
    let range = Arc::new(Mutex::new(RangeSelection::new(
        Some(date(2020, 3, 5)),
        None,
    )));
    range.lock().expect("range lock").set_focus(RangeFocus::Start);

    let sink = Arc::clone(&range);
    let mut calendar = Calendar::new(
        CalendarArgs::default()
            .month(date(2020, 3, 1))
            .week_start(Weekday::Mon)
            .minimum_date(date(2020, 3, 5))
            .on_day_click(move |day| sink.lock().expect("range lock").select(day)),
    );
    calendar.resize(420.0, Instant::now());

    // The click lands before the minimum date and is dropped.
    calendar.click_day(date(2020, 3, 2));
    assert_eq!(range.lock().expect("range lock").start(), None);

    calendar.click_day(date(2020, 3, 6));
    assert_eq!(
        range.lock().expect("range lock").start(),
        Some(date(2020, 3, 6))
    );
}
