//! Drag gesture math.
//!
//! A drag session owns the machine for its whole lifetime: the baseline
//! captured at the first movement turns every later touch sample into an
//! absolute translation of the extended window, and the three neighboring
//! month positions decide both range extension and commit thresholds.

use chrono::{NaiveDate, Weekday};
use smallvec::{SmallVec, smallvec};

use crate::{
    state::{Effect, GridState, ReduceCtx, Transition},
    week,
};

/// Total touch travel below which a release still counts as a tap.
pub const TAP_SLOP: f32 = 10.0;

/// Ephemeral per-gesture record, absent when no gesture is active.
///
/// Its presence gates month-cursor handling: while a session exists, cursor
/// changes are recorded but never animated, since the gesture owns the view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub(crate) baseline: f32,
    pub(crate) committed: Option<NaiveDate>,
}

impl DragSession {
    pub(crate) fn new(baseline: f32) -> Self {
        Self {
            baseline,
            committed: None,
        }
    }

    /// Reference position all drag offsets are measured from.
    pub fn baseline(&self) -> f32 {
        self.baseline
    }
}

/// Pixel row offset of `month`'s first row relative to `start_date`.
pub fn month_position(
    week_start: Weekday,
    start_date: NaiveDate,
    month: NaiveDate,
    cell_height: f32,
) -> f32 {
    (week::rows_between(week_start, start_date, month) - 1) as f32 * cell_height
}

/// Opens a drag session: materializes both neighbor months and seeds the
/// baseline so the first movement continues from the rendered position.
pub(crate) fn start(state: &GridState, ctx: ReduceCtx, touch_y: f32) -> Transition {
    let rendered = state.offset;
    let previous = week::add_months(ctx.month, -1);
    let next_month = week::add_months(ctx.month, 1);
    let new_start = week::canonical_start(ctx.week_start, previous);
    let current_position = month_position(ctx.week_start, new_start, ctx.month, state.cell_height);

    let mut next = *state;
    next.start_date = new_start;
    next.end_date = week::canonical_end(ctx.week_start, next_month);
    // A grid at rest shows the cursor month, so the translation snaps to its
    // position; mid-transition the committed offset is carried over instead.
    next.offset = if rendered != 0.0 {
        rendered
    } else {
        -current_position
    };
    next.transition = false;
    next.moving = true;

    let baseline = touch_y
        + if rendered != 0.0 {
            -rendered
        } else {
            current_position
        };

    Transition {
        state: next,
        effects: smallvec![Effect::CancelSettle, Effect::SeedDrag(baseline)],
    }
}

/// Applies one movement sample to an open session.
pub(crate) fn movement(
    state: &GridState,
    ctx: ReduceCtx,
    baseline: f32,
    touch_y: f32,
) -> Transition {
    let cell_height = state.cell_height;
    let half_grid = state.grid_height() / 2.0;
    let drag_offset = touch_y - baseline;

    let previous = week::add_months(ctx.month, -1);
    let next_month = week::add_months(ctx.month, 1);
    let previous_position = month_position(ctx.week_start, state.start_date, previous, cell_height);
    let current_position = month_position(ctx.week_start, state.start_date, ctx.month, cell_height);
    let next_position = month_position(ctx.week_start, state.start_date, next_month, cell_height);

    let mut next = *state;
    let mut effects: SmallVec<[Effect; 2]> = SmallVec::new();

    if drag_offset < 0.0 {
        // Heading toward the next month: materialize one more canonical
        // window once the view passes the cursor month, capped at two
        // months ahead.
        let two_ahead = week::month_start(week::add_months(ctx.month, 2));
        if drag_offset.abs() > current_position && next.end_date < two_ahead {
            next.end_date = week::canonical_end(ctx.week_start, next_month);
        }
    } else if drag_offset > 0.0 {
        // The view ran past the materialized start: extend one month back
        // and shift the baseline so the rendered position stays continuous.
        let new_start = week::canonical_start(ctx.week_start, previous);
        let rebased = month_position(ctx.week_start, new_start, ctx.month, cell_height);
        effects.push(Effect::ShiftDrag(rebased));
        next.start_date = new_start;
    }

    // Commit once the view passes the half-grid midpoint into a neighbor.
    // The thresholds use this sample's offset even when the baseline was
    // just shifted; the next sample sees the rebased coordinates.
    let to_next = drag_offset.abs() > next_position - half_grid;
    let to_previous = drag_offset.abs() > previous_position - half_grid
        && drag_offset.abs() < current_position - half_grid;
    if to_next {
        effects.push(Effect::RequestMonth(next_month));
    } else if to_previous {
        effects.push(Effect::RequestMonth(previous));
    }

    next.offset = drag_offset;

    Transition {
        state: next,
        effects,
    }
}

/// Closes the session: snaps back to the cursor month with a transition and
/// schedules the canonical reset.
pub(crate) fn finish(state: &GridState, ctx: ReduceCtx, baseline: f32, touch_y: f32) -> Transition {
    let current_position =
        month_position(ctx.week_start, state.start_date, ctx.month, state.cell_height);

    let mut next = *state;
    next.offset = -current_position;
    next.transition = true;
    next.moving = false;

    let moved = (baseline - current_position - touch_y).abs() > TAP_SLOP;

    Transition {
        state: next,
        effects: smallvec![
            Effect::ArmSettle(ctx.month),
            Effect::EndDrag { moved }
        ],
    }
}
