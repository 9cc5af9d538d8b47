//! Headless month-grid navigation for calendar UIs.
//!
//! A month calendar that slides between months needs more state than it
//! first appears to: the visible window extends past the rendered six weeks
//! during a transition, programmatic navigation competes with touch
//! dragging, and a timer collapses everything back to the canonical window
//! once the animation ends. This crate owns exactly that state and nothing
//! else. It renders nothing and parses nothing; it turns month changes,
//! touch samples, resize widths and clock ticks into a render model
//! (visible date range, cell geometry, pixel offset, animation flags) that
//! any presentation layer can apply.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//!
//! use calgrid::{MonthGrid, MonthGridArgs};
//! use chrono::{NaiveDate, Weekday};
//!
//! let march = NaiveDate::from_ymd_opt(2020, 3, 1).expect("valid date");
//! let april = NaiveDate::from_ymd_opt(2020, 4, 1).expect("valid date");
//!
//! let mut grid = MonthGrid::new(
//!     MonthGridArgs::default()
//!         .month(march)
//!         .week_start(Weekday::Mon),
//! );
//!
//! let now = Instant::now();
//! grid.resize(490.0, now);
//! assert!(grid.state().is_wide);
//!
//! // Navigating one month forward slides the content up by five rows.
//! grid.set_month(april, now);
//! assert!(grid.state().transition);
//! assert!(grid.state().offset < 0.0);
//!
//! // Once the transition duration elapses, the grid settles back to the
//! // canonical six-week window for April.
//! grid.tick(now + Duration::from_millis(500));
//! assert_eq!(grid.state().offset, 0.0);
//! assert!(!grid.state().transition);
//! assert_eq!(grid.days().count(), 42);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod callback;
pub mod drag;
pub mod event;
pub mod grid;
pub mod metrics;
pub mod state;
pub mod timer;
pub mod week;

pub use crate::{
    callback::MonthCallback,
    drag::{DragSession, TAP_SLOP},
    event::{TouchEvent, TouchPhase},
    grid::{MonthGrid, MonthGridArgs},
    metrics::{CellMetrics, WIDE_BREAKPOINT},
    state::{
        Effect, GridAction, GridState, MAX_ANIMATED_MONTH_DELTA, Origin, ReduceCtx, Transition,
        reduce,
    },
    timer::SettleTimer,
};
