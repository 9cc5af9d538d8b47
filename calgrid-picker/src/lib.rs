//! Picker toolkit for [`calgrid`] month grids.
//!
//! The grid engine knows how to navigate; this crate layers the picking on
//! top: which days are selectable, how single dates and date ranges are
//! chosen, how navigation clamps at bounds, and how typed date entry
//! commits. Everything stays headless; day cells come back as classified
//! snapshots for a presentation layer to draw.
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//!
//! use calgrid_picker::{Calendar, CalendarArgs, RangeFocus, RangeSelection};
//! use chrono::{NaiveDate, Weekday};
//!
//! let march = NaiveDate::from_ymd_opt(2020, 3, 1).expect("valid date");
//!
//! let mut calendar = Calendar::new(
//!     CalendarArgs::default()
//!         .month(march)
//!         .week_start(Weekday::Mon),
//! );
//! calendar.resize(490.0, Instant::now());
//!
//! let mut range = RangeSelection::new(None, None);
//! range.set_focus(RangeFocus::Start);
//! range.select(NaiveDate::from_ymd_opt(2020, 3, 10).expect("valid date"));
//! range.select(NaiveDate::from_ymd_opt(2020, 3, 14).expect("valid date"));
//!
//! let days = calendar.days_with(|day, flags| flags.merge(&range.day_flags(day)));
//! assert_eq!(days.iter().filter(|cell| cell.flags.selected).count(), 5);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod calendar;
pub mod controllable;
pub mod input;
pub mod modifiers;
pub mod navigation;
pub mod selection;

pub use crate::{
    calendar::{Calendar, CalendarArgs, DateCallback, HoverCallback},
    controllable::Controllable,
    input::{DateInput, DateInputError},
    modifiers::{DayCell, DayFlags, ModifierFn, ModifierSet, is_selectable},
    selection::{RangeFocus, RangeSelection, SingleSelection},
};
