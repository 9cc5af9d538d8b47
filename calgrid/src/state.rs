//! The grid navigation state machine.
//!
//! All navigation state lives in a [`GridState`] snapshot that is only ever
//! replaced through [`reduce`], a pure transition function over a closed
//! action alphabet. Side effects (timer arming, month-change requests, drag
//! session bookkeeping) are returned as [`Effect`] values for the controller
//! to interpret, which keeps every transition testable without a clock, a
//! renderer or a gesture source.

use chrono::{NaiveDate, Weekday};
use smallvec::{SmallVec, smallvec};

use crate::{drag, metrics::CellMetrics, week};

/// Calendar-month distance up to which an external month change animates.
///
/// Larger jumps snap straight to the target month's canonical window.
pub const MAX_ANIMATED_MONTH_DELTA: i32 = 3;

/// Anchor edge held visually fixed while the grid extends during a slide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Origin {
    /// The top edge stays fixed; content extends and slides upward.
    #[default]
    Top,
    /// The bottom edge stays fixed; content extends and slides downward.
    Bottom,
}

/// Snapshot of the grid's navigation state.
///
/// This doubles as the render model: a presentation layer applies `offset`
/// as a vertical translation, `origin` as the transform anchor, and the
/// `transition`/`moving` flags as animation hints, then renders one cell of
/// `cell_height` for every day in `start_date..=end_date`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridState {
    /// First visible day. Always the start of a week.
    pub start_date: NaiveDate,
    /// Last visible day, inclusive. Always the end of a week.
    pub end_date: NaiveDate,
    /// Height of one grid row in pixels. Zero before the first measurement.
    pub cell_height: f32,
    /// Whether the wide cell layout is active.
    pub is_wide: bool,
    /// Month cursor the state was last reconciled against.
    pub last_current_month: NaiveDate,
    /// Signed vertical translation of the rendered window, zero at rest.
    pub offset: f32,
    /// Anchor edge for the in-flight slide.
    pub origin: Origin,
    /// Whether an animated transition is in flight.
    pub transition: bool,
    /// Whether a drag gesture currently owns the offset.
    pub moving: bool,
}

impl GridState {
    /// Canonical at-rest state for `month`: a six-week window fully
    /// containing it, no offset, no transition, unmeasured geometry.
    pub fn initial(month: NaiveDate, week_start: Weekday) -> Self {
        let month = week::month_start(month);
        Self {
            start_date: week::canonical_start(week_start, month),
            end_date: week::canonical_end(week_start, month),
            cell_height: 0.0,
            is_wide: false,
            last_current_month: month,
            offset: 0.0,
            origin: Origin::Top,
            transition: false,
            moving: false,
        }
    }

    /// Total height of the six visible rows in pixels.
    pub fn grid_height(&self) -> f32 {
        self.cell_height * week::CANONICAL_ROWS as f32
    }

    /// Iterates every materialized day, `start_date` through `end_date`.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end_date;
        self.start_date.iter_days().take_while(move |day| *day <= end)
    }
}

/// The action alphabet driving the state machine.
///
/// Dispatching an action that is impossible in the current phase (a drag
/// action without a matching session, or vice versa) is a caller bug and
/// panics rather than being silently ignored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GridAction {
    /// The external month cursor changed while no drag was active.
    MonthChanged(NaiveDate),
    /// First touch movement of a gesture; opens the drag session.
    DragStarted {
        /// Screen-Y coordinate of the touch.
        touch_y: f32,
    },
    /// Subsequent touch movement within an open drag session.
    DragMoved {
        /// Screen-Y coordinate of the touch.
        touch_y: f32,
    },
    /// The touch was released, closing the drag session.
    DragEnded {
        /// Screen-Y coordinate of the release.
        touch_y: f32,
    },
    /// The container was (re)measured.
    MetricsChanged(CellMetrics),
    /// The settle deadline fired; collapse to the canonical window.
    Settle(NaiveDate),
}

/// Side effects requested by a transition, interpreted by the controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    /// Drop any pending settle deadline.
    CancelSettle,
    /// Schedule a settle to the given month after the transition duration.
    ArmSettle(NaiveDate),
    /// The drag crossed a commit threshold; request this month cursor.
    RequestMonth(NaiveDate),
    /// Open a drag session with this baseline position.
    SeedDrag(f32),
    /// Shift the open drag session's baseline to keep the view continuous.
    ShiftDrag(f32),
    /// Close the drag session. `moved` is false for taps within the slop.
    EndDrag {
        /// Whether the gesture travelled past the tap slop.
        moved: bool,
    },
}

/// Read-only context the reducer needs besides the state itself.
#[derive(Clone, Copy, Debug)]
pub struct ReduceCtx {
    /// Week start day of the active locale.
    pub week_start: Weekday,
    /// Current month cursor (first of month).
    pub month: NaiveDate,
    /// Baseline of the open drag session, if any.
    pub drag_start: Option<f32>,
}

/// Result of one reduction step.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// The next state snapshot.
    pub state: GridState,
    /// Side effects to apply, in order.
    pub effects: SmallVec<[Effect; 2]>,
}

impl Transition {
    fn unchanged(state: &GridState) -> Self {
        Self {
            state: *state,
            effects: smallvec![],
        }
    }
}

/// Applies one action to the state, returning the next state and effects.
pub fn reduce(state: &GridState, ctx: ReduceCtx, action: GridAction) -> Transition {
    match action {
        GridAction::MonthChanged(month) => {
            assert!(
                ctx.drag_start.is_none(),
                "month changes must not be dispatched while a drag session is active"
            );
            month_changed(state, ctx, month)
        }
        GridAction::DragStarted { touch_y } => {
            assert!(
                ctx.drag_start.is_none(),
                "drag started while a drag session is already active"
            );
            drag::start(state, ctx, touch_y)
        }
        GridAction::DragMoved { touch_y } => {
            let baseline = ctx
                .drag_start
                .expect("drag movement dispatched without an active drag session");
            drag::movement(state, ctx, baseline, touch_y)
        }
        GridAction::DragEnded { touch_y } => {
            let baseline = ctx
                .drag_start
                .expect("drag end dispatched without an active drag session");
            drag::finish(state, ctx, baseline, touch_y)
        }
        GridAction::MetricsChanged(metrics) => {
            let mut next = *state;
            next.cell_height = metrics.cell_height;
            next.is_wide = metrics.is_wide;
            // An in-flight transition keeps its previously computed offset;
            // the error is bounded by one resize and vanishes at settle.
            Transition {
                state: next,
                effects: smallvec![],
            }
        }
        GridAction::Settle(month) => {
            let mut next = GridState::initial(month, ctx.week_start);
            next.cell_height = state.cell_height;
            next.is_wide = state.is_wide;
            Transition {
                state: next,
                effects: smallvec![],
            }
        }
    }
}

fn month_changed(state: &GridState, ctx: ReduceCtx, month: NaiveDate) -> Transition {
    if week::same_month(month, state.last_current_month) {
        return Transition::unchanged(state);
    }

    let delta = week::months_between(month, state.last_current_month);
    if delta.abs() > MAX_ANIMATED_MONTH_DELTA {
        // Too far to animate meaningfully: jump straight to the target.
        let mut next = GridState::initial(month, ctx.week_start);
        next.cell_height = state.cell_height;
        next.is_wide = state.is_wide;
        return Transition {
            state: next,
            effects: smallvec![Effect::CancelSettle],
        };
    }

    let mut next = *state;
    next.last_current_month = month;
    next.transition = true;

    if month > state.last_current_month {
        // Extend the bottom edge and slide the content up to the new month.
        let rows = week::rows_between(ctx.week_start, state.start_date, month);
        next.end_date = week::canonical_end(ctx.week_start, month);
        next.offset = -((rows - 1) as f32) * state.cell_height;
        next.origin = Origin::Top;
    } else {
        // Extend the top edge and slide the content down to the new month.
        let rows = week::rows_between(ctx.week_start, month, state.end_date);
        next.start_date = week::canonical_start(ctx.week_start, month);
        next.offset = rows as f32 * state.cell_height - state.grid_height();
        next.origin = Origin::Bottom;
    }

    Transition {
        state: next,
        effects: smallvec![Effect::CancelSettle, Effect::ArmSettle(month)],
    }
}
