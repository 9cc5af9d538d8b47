//! The month grid controller.
//!
//! [`MonthGrid`] owns the authoritative [`GridState`] plus the two resources
//! the pure reducer cannot hold: the open drag session and the pending settle
//! deadline. Hosts feed it cursor changes, touch samples, resize widths and
//! clock ticks; it hands back state snapshots to render.

use std::time::{Duration, Instant};

use chrono::{NaiveDate, Utc, Weekday};
use derive_setters::Setters;
use tracing::{debug, trace, warn};

use crate::{
    callback::MonthCallback,
    drag::DragSession,
    event::{TouchEvent, TouchPhase},
    metrics::CellMetrics,
    state::{Effect, GridAction, GridState, ReduceCtx, reduce},
    timer::SettleTimer,
    week,
};

const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(500);

/// Configuration for [`MonthGrid`].
#[derive(Clone, Debug, PartialEq, Setters)]
pub struct MonthGridArgs {
    /// Month shown initially. Any day of the month works.
    pub month: NaiveDate,
    /// First day of the week for the active locale.
    pub week_start: Weekday,
    /// How long slide transitions run before settling.
    pub transition_duration: Duration,
    /// Month-change requests go here when set; see
    /// [`MonthGridArgs::on_month_change`].
    #[setters(skip)]
    pub on_month_change: Option<MonthCallback>,
}

impl Default for MonthGridArgs {
    fn default() -> Self {
        Self {
            month: Utc::now().date_naive(),
            week_start: Weekday::Mon,
            transition_duration: DEFAULT_TRANSITION_DURATION,
            on_month_change: None,
        }
    }
}

impl MonthGridArgs {
    /// Routes month-change requests to the host instead of applying them.
    ///
    /// With a callback set the grid is controlled: it only ever changes
    /// months when the host calls [`MonthGrid::set_month`], typically after
    /// honoring a request received here. Without one the grid applies its
    /// own requests.
    pub fn on_month_change<F>(mut self, on_month_change: F) -> Self
    where
        F: Fn(NaiveDate) + Send + Sync + 'static,
    {
        self.on_month_change = Some(MonthCallback::new(on_month_change));
        self
    }

    /// Sets the month-change target using a shared callback.
    pub fn on_month_change_shared(mut self, on_month_change: impl Into<MonthCallback>) -> Self {
        self.on_month_change = Some(on_month_change.into());
        self
    }
}

/// Controller for one mounted month grid.
#[derive(Clone, Debug)]
pub struct MonthGrid {
    state: GridState,
    cursor: NaiveDate,
    week_start: Weekday,
    transition_duration: Duration,
    timer: SettleTimer,
    drag: Option<DragSession>,
    on_month_change: Option<MonthCallback>,
}

impl MonthGrid {
    /// Creates a grid seeded with the canonical window of the configured
    /// month. Geometry stays zero until the first [`MonthGrid::resize`].
    pub fn new(args: MonthGridArgs) -> Self {
        let cursor = week::month_start(args.month);
        Self {
            state: GridState::initial(cursor, args.week_start),
            cursor,
            week_start: args.week_start,
            transition_duration: args.transition_duration,
            timer: SettleTimer::new(),
            drag: None,
            on_month_change: args.on_month_change,
        }
    }

    /// The current state snapshot, which is also the render model.
    pub fn state(&self) -> &GridState {
        &self.state
    }

    /// The month cursor the grid currently follows (first of month).
    pub fn month(&self) -> NaiveDate {
        self.cursor
    }

    /// Week start day the grid was configured with.
    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Whether a drag session is open.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether an animated transition is in flight.
    pub fn is_transitioning(&self) -> bool {
        self.state.transition
    }

    /// Total grid height in pixels.
    pub fn grid_height(&self) -> f32 {
        self.state.grid_height()
    }

    /// Iterates every materialized day of the visible range.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.state.days()
    }

    /// Reconciles the grid against an externally changed month cursor.
    ///
    /// While a drag session is open the cursor is recorded but nothing else
    /// happens; the gesture owns the view and the new cursor is picked up by
    /// the drag math and reconciled at settle. Otherwise a nearby month
    /// starts a slide transition and a distant one jumps directly.
    pub fn set_month(&mut self, month: NaiveDate, now: Instant) {
        let month = week::month_start(month);
        self.cursor = month;

        if self.drag.is_some() {
            trace!(%month, "cursor change during drag, reconciled at settle");
            return;
        }
        if week::same_month(month, self.state.last_current_month) {
            return;
        }

        debug!(%month, from = %self.state.last_current_month, "navigating grid");
        self.dispatch(GridAction::MonthChanged(month), now);
    }

    /// Feeds one touch sample to the grid.
    ///
    /// Returns whether the host should suppress its default handling: `true`
    /// for every movement of an open drag (prevents scrolling underneath)
    /// and for a release whose total travel exceeded the tap slop (prevents
    /// the synthetic click from selecting a day).
    pub fn handle_touch(&mut self, event: TouchEvent, now: Instant) -> bool {
        match event.phase {
            TouchPhase::Start => false,
            TouchPhase::Move => {
                if self.state.cell_height <= 0.0 {
                    warn!("touch movement before the container was measured, deferring");
                    return false;
                }
                if self.drag.is_none() {
                    self.dispatch(GridAction::DragStarted { touch_y: event.y }, now);
                    false
                } else {
                    self.dispatch(GridAction::DragMoved { touch_y: event.y }, now);
                    true
                }
            }
            TouchPhase::End => {
                if self.drag.is_some() {
                    self.dispatch(GridAction::DragEnded { touch_y: event.y }, now)
                } else {
                    false
                }
            }
        }
    }

    /// Updates cell geometry from a new container width.
    pub fn resize(&mut self, container_width: f32, now: Instant) {
        let metrics = CellMetrics::measure(container_width);
        trace!(
            cell_height = metrics.cell_height,
            is_wide = metrics.is_wide,
            "container measured"
        );
        self.dispatch(GridAction::MetricsChanged(metrics), now);
    }

    /// Drives time forward, settling an elapsed transition.
    ///
    /// Hosts call this from their frame loop or timer wheel; between
    /// deadlines it is free.
    pub fn tick(&mut self, now: Instant) {
        if let Some(month) = self.timer.poll(now) {
            debug!(%month, "settling to canonical window");
            self.dispatch(GridAction::Settle(month), now);
        }
    }

    fn ctx(&self) -> ReduceCtx {
        ReduceCtx {
            week_start: self.week_start,
            month: self.cursor,
            drag_start: self.drag.as_ref().map(DragSession::baseline),
        }
    }

    /// Runs one action through the reducer and interprets its effects.
    /// Returns whether a released gesture travelled past the tap slop.
    fn dispatch(&mut self, action: GridAction, now: Instant) -> bool {
        let transition = reduce(&self.state, self.ctx(), action);
        self.state = transition.state;

        let mut requested = None;
        let mut moved = false;
        for effect in transition.effects {
            match effect {
                Effect::CancelSettle => self.timer.cancel(),
                Effect::ArmSettle(month) => {
                    self.timer.arm(now + self.transition_duration, month);
                }
                Effect::SeedDrag(baseline) => self.drag = Some(DragSession::new(baseline)),
                Effect::ShiftDrag(delta) => {
                    if let Some(drag) = self.drag.as_mut() {
                        drag.baseline += delta;
                    }
                }
                Effect::RequestMonth(month) => requested = Some(month),
                Effect::EndDrag { moved: travelled } => {
                    self.drag = None;
                    moved = travelled;
                }
            }
        }

        // Commit requests are level-triggered by the drag math; turn them
        // into edges so each threshold crossing requests a month exactly
        // once, and a re-crossing can request it again.
        if matches!(action, GridAction::DragMoved { .. }) {
            match requested {
                Some(month) => {
                    let repeat = self
                        .drag
                        .as_ref()
                        .is_some_and(|drag| drag.committed == Some(month));
                    if !repeat {
                        if let Some(drag) = self.drag.as_mut() {
                            drag.committed = Some(month);
                        }
                        self.commit_month(month, now);
                    }
                }
                None => {
                    if let Some(drag) = self.drag.as_mut() {
                        drag.committed = None;
                    }
                }
            }
        }

        moved
    }

    fn commit_month(&mut self, month: NaiveDate, now: Instant) {
        debug!(%month, "drag crossed commit threshold");
        match self.on_month_change.clone() {
            Some(callback) => callback.call(month),
            None => self.set_month(month, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    fn grid_at(month: NaiveDate) -> (MonthGrid, Instant) {
        let mut grid = MonthGrid::new(
            MonthGridArgs::default()
                .month(month)
                .week_start(Weekday::Mon),
        );
        let now = Instant::now();
        // 420 px wide: exactly 60 px cells, compact layout, 61 px rows.
        grid.resize(420.0, now);
        (grid, now)
    }

    #[test]
    fn seeds_canonical_window_for_initial_month() {
        let (grid, _) = grid_at(date(2020, 3, 14));
        assert_eq!(grid.month(), date(2020, 3, 1));
        assert_eq!(grid.state().start_date, date(2020, 2, 24));
        assert_eq!(grid.state().end_date, date(2020, 4, 5));
        assert_eq!(grid.days().count(), 42);
        assert_eq!(grid.grid_height(), 6.0 * 61.0);
    }

    #[test]
    fn cursor_change_during_drag_is_deferred() {
        let (mut grid, now) = grid_at(date(2020, 3, 1));
        grid.handle_touch(TouchEvent::start(800.0), now);
        grid.handle_touch(TouchEvent::moved(800.0), now);
        assert!(grid.is_dragging());

        grid.set_month(date(2020, 4, 1), now);
        assert_eq!(grid.month(), date(2020, 4, 1));
        // The transition logic stayed out of it.
        assert!(!grid.state().transition);
        assert_eq!(grid.state().last_current_month, date(2020, 3, 1));
    }

    #[test]
    fn touch_before_measurement_is_deferred() {
        let mut grid = MonthGrid::new(
            MonthGridArgs::default()
                .month(date(2020, 3, 1))
                .week_start(Weekday::Mon),
        );
        let now = Instant::now();
        assert!(!grid.handle_touch(TouchEvent::moved(100.0), now));
        assert!(!grid.is_dragging());
    }

    #[test]
    fn tap_without_movement_changes_nothing() {
        let (mut grid, now) = grid_at(date(2020, 3, 1));
        let before = *grid.state();
        grid.handle_touch(TouchEvent::start(500.0), now);
        let suppressed = grid.handle_touch(TouchEvent::end(500.0), now);
        assert!(!suppressed);
        assert_eq!(*grid.state(), before);
    }

    #[test]
    fn uncontrolled_grid_applies_its_own_commits() {
        let (mut grid, now) = grid_at(date(2020, 3, 1));
        grid.handle_touch(TouchEvent::start(1000.0), now);
        grid.handle_touch(TouchEvent::moved(1000.0), now);
        // Past the half-grid midpoint toward April.
        grid.handle_touch(TouchEvent::moved(1000.0 - 6.5 * 61.0), now);
        assert_eq!(grid.month(), date(2020, 4, 1));
    }
}
