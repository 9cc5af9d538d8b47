//! The calendar composition root.
//!
//! [`Calendar`] wires a [`MonthGrid`] to a month cell, selectability bounds
//! and day modifiers, producing ready-to-render day cells and clamped
//! navigation. Selection state stays outside (see [`crate::selection`]) and
//! decorates the day cells through [`Calendar::days_with`].

use std::{
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

use calgrid::{GridState, MonthCallback, MonthGrid, MonthGridArgs, TouchEvent, week};
use chrono::{NaiveDate, Utc, Weekday};
use derive_setters::Setters;
use tracing::trace;

use crate::{
    controllable::Controllable,
    modifiers::{DayCell, DayFlags, ModifierSet, is_selectable},
    navigation,
};

const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(500);

/// A cloneable day-click callback.
#[derive(Clone)]
pub struct DateCallback(Arc<dyn Fn(NaiveDate) + Send + Sync>);

impl DateCallback {
    /// Wraps a closure in a shared callback.
    pub fn new(callback: impl Fn(NaiveDate) + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    /// Invokes the callback.
    pub fn call(&self, date: NaiveDate) {
        (self.0)(date);
    }
}

impl fmt::Debug for DateCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DateCallback")
    }
}

/// A cloneable day-hover callback; `None` reports the pointer leaving.
#[derive(Clone)]
pub struct HoverCallback(Arc<dyn Fn(Option<NaiveDate>) + Send + Sync>);

impl HoverCallback {
    /// Wraps a closure in a shared callback.
    pub fn new(callback: impl Fn(Option<NaiveDate>) + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    /// Invokes the callback.
    pub fn call(&self, date: Option<NaiveDate>) {
        (self.0)(date);
    }
}

impl fmt::Debug for HoverCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HoverCallback")
    }
}

/// Configuration for [`Calendar`].
#[derive(Clone, Debug, Setters)]
pub struct CalendarArgs {
    /// Month shown initially; defaults to the current month.
    #[setters(strip_option)]
    pub month: Option<NaiveDate>,
    /// First day of the week for the active locale.
    pub week_start: Weekday,
    /// Earliest selectable day.
    #[setters(strip_option)]
    pub minimum_date: Option<NaiveDate>,
    /// Latest selectable day.
    #[setters(strip_option)]
    pub maximum_date: Option<NaiveDate>,
    /// How long slide transitions run before settling.
    pub transition_duration: Duration,
    /// Custom day modifiers merged over the built-in ones.
    #[setters(skip)]
    pub modifiers: ModifierSet,
    /// Observer for month changes, programmatic and gesture-driven alike.
    #[setters(skip)]
    pub on_month_change: Option<MonthCallback>,
    /// Receiver for clicks on selectable days.
    #[setters(skip)]
    pub on_day_click: Option<DateCallback>,
    /// Receiver for hover changes.
    #[setters(skip)]
    pub on_day_hover: Option<HoverCallback>,
}

impl Default for CalendarArgs {
    fn default() -> Self {
        Self {
            month: None,
            week_start: Weekday::Mon,
            minimum_date: None,
            maximum_date: None,
            transition_duration: DEFAULT_TRANSITION_DURATION,
            modifiers: ModifierSet::new(),
            on_month_change: None,
            on_day_click: None,
            on_day_hover: None,
        }
    }
}

impl CalendarArgs {
    /// Sets the custom day modifiers.
    pub fn modifiers(mut self, modifiers: ModifierSet) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Sets the month-change observer.
    pub fn on_month_change<F>(mut self, on_month_change: F) -> Self
    where
        F: Fn(NaiveDate) + Send + Sync + 'static,
    {
        self.on_month_change = Some(MonthCallback::new(on_month_change));
        self
    }

    /// Sets the day-click receiver.
    pub fn on_day_click<F>(mut self, on_day_click: F) -> Self
    where
        F: Fn(NaiveDate) + Send + Sync + 'static,
    {
        self.on_day_click = Some(DateCallback::new(on_day_click));
        self
    }

    /// Sets the hover receiver.
    pub fn on_day_hover<F>(mut self, on_day_hover: F) -> Self
    where
        F: Fn(Option<NaiveDate>) + Send + Sync + 'static,
    {
        self.on_day_hover = Some(HoverCallback::new(on_day_hover));
        self
    }
}

/// A navigable month calendar with classified day cells.
#[derive(Debug)]
pub struct Calendar {
    grid: MonthGrid,
    month: Controllable<NaiveDate>,
    modifiers: ModifierSet,
    minimum: Option<NaiveDate>,
    maximum: Option<NaiveDate>,
    on_day_click: Option<DateCallback>,
    on_day_hover: Option<HoverCallback>,
}

impl Calendar {
    /// Builds the calendar and its grid from the configuration.
    pub fn new(args: CalendarArgs) -> Self {
        let initial = week::month_start(
            args.month.unwrap_or_else(|| Utc::now().date_naive()),
        );

        let month = Controllable::uncontrolled(initial);
        let month = match args.on_month_change {
            Some(observer) => month.on_change(move |value| observer.call(*value)),
            None => month,
        };

        // Grid commits flow into the month cell; the next entry point
        // reconciles the grid against it, closing the loop.
        let commits = month.clone();
        let grid = MonthGrid::new(
            MonthGridArgs::default()
                .month(initial)
                .week_start(args.week_start)
                .transition_duration(args.transition_duration)
                .on_month_change(move |requested| commits.request(requested)),
        );

        Self {
            grid,
            month,
            modifiers: args.modifiers,
            minimum: args.minimum_date,
            maximum: args.maximum_date,
            on_day_click: args.on_day_click,
            on_day_hover: args.on_day_hover,
        }
    }

    /// The month cursor (first of month).
    pub fn month(&self) -> NaiveDate {
        self.month.get()
    }

    /// The grid's current render model.
    pub fn state(&self) -> &GridState {
        self.grid.state()
    }

    /// The underlying grid controller.
    pub fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    /// Whether stepping one month back is allowed.
    pub fn can_navigate_previous(&self) -> bool {
        navigation::can_navigate_previous(self.month.get(), self.minimum)
    }

    /// Whether stepping one month forward is allowed.
    pub fn can_navigate_next(&self) -> bool {
        navigation::can_navigate_next(self.month.get(), self.maximum)
    }

    /// Steps one month back unless clamped.
    pub fn navigate_previous(&mut self, now: Instant) {
        if !self.can_navigate_previous() {
            return;
        }
        let month = navigation::previous_month(self.month.get());
        self.month.request(month);
        self.grid.set_month(month, now);
    }

    /// Steps one month forward unless clamped.
    pub fn navigate_next(&mut self, now: Instant) {
        if !self.can_navigate_next() {
            return;
        }
        let month = navigation::next_month(self.month.get());
        self.month.request(month);
        self.grid.set_month(month, now);
    }

    /// Jumps to an arbitrary month on the host's behalf.
    pub fn set_month(&mut self, month: NaiveDate, now: Instant) {
        let month = week::month_start(month);
        self.month.force(month);
        self.grid.set_month(month, now);
    }

    /// Feeds one touch sample through; see [`MonthGrid::handle_touch`].
    pub fn handle_touch(&mut self, event: TouchEvent, now: Instant) -> bool {
        let consumed = self.grid.handle_touch(event, now);
        self.reconcile(now);
        consumed
    }

    /// Updates cell geometry from a new container width.
    pub fn resize(&mut self, container_width: f32, now: Instant) {
        self.grid.resize(container_width, now);
    }

    /// Drives time forward, settling elapsed transitions.
    pub fn tick(&mut self, now: Instant) {
        self.reconcile(now);
        self.grid.tick(now);
    }

    /// Reports a click on a day cell, filtered by selectability.
    pub fn click_day(&mut self, date: NaiveDate) {
        if !is_selectable(date, self.minimum, self.maximum) {
            trace!(%date, "click on unselectable day ignored");
            return;
        }
        if let Some(on_day_click) = &self.on_day_click {
            on_day_click.call(date);
        }
    }

    /// Reports the hovered day, `None` when the pointer leaves the grid.
    pub fn hover_day(&mut self, date: Option<NaiveDate>) {
        if let Some(on_day_hover) = &self.on_day_hover {
            on_day_hover.call(date);
        }
    }

    /// Classified render snapshots for every visible day.
    pub fn days(&self) -> Vec<DayCell> {
        self.days_with(|_, _| {})
    }

    /// Like [`Calendar::days`], with a decorator that can fold additional
    /// classification (typically selection state) into each day.
    pub fn days_with(&self, decorate: impl Fn(NaiveDate, &mut DayFlags)) -> Vec<DayCell> {
        let state = self.grid.state();
        let month = self.month.get();
        let today = Utc::now().date_naive();

        state
            .days()
            .map(|date| {
                let mut flags = DayFlags {
                    today: date == today,
                    ..DayFlags::default()
                };
                self.modifiers.apply(date, &mut flags);
                decorate(date, &mut flags);
                flags.outside = !week::same_month(date, month);
                flags.wide = state.is_wide;
                flags.disabled |= !is_selectable(date, self.minimum, self.maximum);
                DayCell {
                    date,
                    height: state.cell_height,
                    flags,
                }
            })
            .collect()
    }

    fn reconcile(&mut self, now: Instant) {
        self.grid.set_month(self.month.get(), now);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    fn calendar_at(month: NaiveDate) -> (Calendar, Instant) {
        let mut calendar = Calendar::new(
            CalendarArgs::default()
                .month(month)
                .week_start(Weekday::Mon),
        );
        let now = Instant::now();
        calendar.resize(420.0, now);
        (calendar, now)
    }

    #[test]
    fn navigation_steps_and_notifies() {
        let seen: Arc<Mutex<Vec<NaiveDate>>> = Arc::default();
        let sink = Arc::clone(&seen);
        let mut calendar = Calendar::new(
            CalendarArgs::default()
                .month(date(2020, 3, 1))
                .week_start(Weekday::Mon)
                .on_month_change(move |month| sink.lock().expect("sink lock").push(month)),
        );
        let now = Instant::now();

        calendar.navigate_next(now);
        assert_eq!(calendar.month(), date(2020, 4, 1));
        calendar.navigate_previous(now);
        assert_eq!(calendar.month(), date(2020, 3, 1));
        assert_eq!(
            seen.lock().expect("sink lock").as_slice(),
            &[date(2020, 4, 1), date(2020, 3, 1)]
        );
    }

    #[test]
    fn navigation_clamps_at_the_bounds() {
        let mut calendar = Calendar::new(
            CalendarArgs::default()
                .month(date(2020, 3, 1))
                .minimum_date(date(2020, 3, 5))
                .maximum_date(date(2020, 4, 20)),
        );
        let now = Instant::now();

        assert!(!calendar.can_navigate_previous());
        calendar.navigate_previous(now);
        assert_eq!(calendar.month(), date(2020, 3, 1));

        assert!(calendar.can_navigate_next());
        calendar.navigate_next(now);
        assert_eq!(calendar.month(), date(2020, 4, 1));
        assert!(!calendar.can_navigate_next());
    }

    #[test]
    fn drag_commits_reach_the_month_cell() {
        let (mut calendar, now) = calendar_at(date(2020, 3, 1));

        calendar.handle_touch(TouchEvent::start(1000.0), now);
        calendar.handle_touch(TouchEvent::moved(1000.0), now);
        let baseline = 1000.0 + 4.0 * 61.0;
        calendar.handle_touch(TouchEvent::moved(baseline - 6.5 * 61.0), now);

        assert_eq!(calendar.month(), date(2020, 4, 1));
        assert_eq!(calendar.grid().month(), date(2020, 4, 1));
    }

    #[test]
    fn days_classify_outside_and_disabled() {
        let (mut calendar, now) = calendar_at(date(2020, 3, 1));
        calendar.set_month(date(2020, 3, 1), now);

        let days = calendar.days();
        assert_eq!(days.len(), 42);
        let outside = days.iter().filter(|cell| cell.flags.outside).count();
        // February 24-29 and April 1-5 pad the March window.
        assert_eq!(outside, 11);
        assert!(days.iter().all(|cell| cell.height == 61.0));
    }

    #[test]
    fn bounds_disable_days_without_hiding_them() {
        let mut calendar = Calendar::new(
            CalendarArgs::default()
                .month(date(2020, 3, 1))
                .week_start(Weekday::Mon)
                .minimum_date(date(2020, 3, 10))
                .maximum_date(date(2020, 3, 20)),
        );
        let now = Instant::now();
        calendar.resize(420.0, now);

        let days = calendar.days();
        let enabled = days.iter().filter(|cell| !cell.flags.disabled).count();
        assert_eq!(enabled, 11);
    }

    #[test]
    fn clicks_on_unselectable_days_are_dropped() {
        let clicked: Arc<Mutex<Vec<NaiveDate>>> = Arc::default();
        let sink = Arc::clone(&clicked);
        let mut calendar = Calendar::new(
            CalendarArgs::default()
                .month(date(2020, 3, 1))
                .minimum_date(date(2020, 3, 10))
                .on_day_click(move |day| sink.lock().expect("sink lock").push(day)),
        );

        calendar.click_day(date(2020, 3, 5));
        calendar.click_day(date(2020, 3, 12));
        assert_eq!(
            clicked.lock().expect("sink lock").as_slice(),
            &[date(2020, 3, 12)]
        );
    }

    #[test]
    fn custom_modifiers_decorate_days() {
        let modifiers = ModifierSet::new().with("booked", |day: NaiveDate| day == date(2020, 3, 14));
        let mut calendar = Calendar::new(
            CalendarArgs::default()
                .month(date(2020, 3, 1))
                .week_start(Weekday::Mon)
                .modifiers(modifiers),
        );
        calendar.resize(420.0, Instant::now());

        let days = calendar.days();
        let booked: Vec<_> = days
            .iter()
            .filter(|cell| cell.flags.custom.contains(&"booked".to_string()))
            .collect();
        assert_eq!(booked.len(), 1);
        assert_eq!(booked[0].date, date(2020, 3, 14));
    }

    #[test]
    fn decorator_folds_selection_flags() {
        use crate::selection::RangeSelection;

        let (calendar, _) = calendar_at(date(2020, 3, 1));
        let mut range = RangeSelection::new(None, None);
        range.set_start(Some(date(2020, 3, 10)));
        range.set_end(Some(date(2020, 3, 14)));

        let days = calendar.days_with(|day, flags| flags.merge(&range.day_flags(day)));
        let selected: Vec<_> = days.iter().filter(|cell| cell.flags.selected).collect();
        assert_eq!(selected.len(), 5);
        assert!(
            days.iter()
                .find(|cell| cell.date == date(2020, 3, 10))
                .is_some_and(|cell| cell.flags.selected_start)
        );
        assert!(
            days.iter()
                .find(|cell| cell.date == date(2020, 3, 14))
                .is_some_and(|cell| cell.flags.selected_end)
        );
    }
}
