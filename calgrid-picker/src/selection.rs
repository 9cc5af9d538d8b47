//! Single-date and date-range selection rules.

use chrono::NaiveDate;

use crate::modifiers::{DayFlags, is_selectable};

/// Which edge of a range the next selection fills.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RangeFocus {
    /// No edge is being edited; selections are ignored.
    #[default]
    None,
    /// The next selection sets the start date.
    Start,
    /// The next selection sets the end date.
    End,
}

/// Selection state for a single-date picker.
///
/// A day is reported selected only while it is also selectable, so a date
/// that fell out of the bounds stops highlighting without being cleared.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SingleSelection {
    selected: Option<NaiveDate>,
    minimum: Option<NaiveDate>,
    maximum: Option<NaiveDate>,
}

impl SingleSelection {
    /// An empty selection with optional selectability bounds.
    pub fn new(minimum: Option<NaiveDate>, maximum: Option<NaiveDate>) -> Self {
        Self {
            selected: None,
            minimum,
            maximum,
        }
    }

    /// The selected date, if any.
    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    /// Replaces the selection.
    pub fn select(&mut self, date: NaiveDate) {
        self.selected = Some(date);
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Whether `date` renders as selected.
    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.selected == Some(date) && is_selectable(date, self.minimum, self.maximum)
    }

    /// Day classification for this selection.
    ///
    /// The selected day is also disabled: re-clicking it is a no-op.
    pub fn day_flags(&self, date: NaiveDate) -> DayFlags {
        let selected = self.is_selected(date);
        DayFlags {
            selected,
            disabled: selected,
            ..DayFlags::default()
        }
    }
}

/// Selection state for a date-range picker.
///
/// Mirrors the two-step flow of picking a range: focus decides which edge
/// the next click fills, and the hovered day previews the missing edge while
/// only one is set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RangeSelection {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    focus: RangeFocus,
    hovered: Option<NaiveDate>,
    minimum: Option<NaiveDate>,
    maximum: Option<NaiveDate>,
}

impl RangeSelection {
    /// An empty range with optional selectability bounds.
    pub fn new(minimum: Option<NaiveDate>, maximum: Option<NaiveDate>) -> Self {
        Self {
            minimum,
            maximum,
            ..Self::default()
        }
    }

    /// The committed start date.
    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    /// The committed end date.
    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// The edge the next selection fills.
    pub fn focus(&self) -> RangeFocus {
        self.focus
    }

    /// Moves focus to the given edge.
    pub fn set_focus(&mut self, focus: RangeFocus) {
        self.focus = focus;
    }

    /// Seeds the start date without running the selection flow.
    pub fn set_start(&mut self, start: Option<NaiveDate>) {
        self.start = start;
    }

    /// Seeds the end date without running the selection flow.
    pub fn set_end(&mut self, end: Option<NaiveDate>) {
        self.end = end;
    }

    /// Records the day the pointer is over, or `None` when it left the grid.
    pub fn hover(&mut self, date: Option<NaiveDate>) {
        self.hovered = date;
    }

    /// Applies one selection according to the focused edge.
    ///
    /// Selecting a start at or after the current end clears the end;
    /// selecting an end at or before the current start clears the start and
    /// sends focus back to it. A completed range drops the focus.
    pub fn select(&mut self, date: NaiveDate) {
        match self.focus {
            RangeFocus::Start => {
                if self.end.is_some_and(|end| end <= date) {
                    self.end = None;
                }
                self.start = Some(date);
                self.focus = RangeFocus::End;
            }
            RangeFocus::End => {
                let invalid_start = self.start.is_some_and(|start| start >= date);
                if invalid_start {
                    self.start = None;
                }
                self.end = Some(date);
                self.focus = if invalid_start {
                    RangeFocus::Start
                } else {
                    RangeFocus::None
                };
            }
            RangeFocus::None => {}
        }
    }

    /// Start edge as rendered: the hovered day stands in while the start is
    /// still missing.
    pub fn displayed_start(&self) -> Option<NaiveDate> {
        if self.focus == RangeFocus::Start && self.start.is_none() {
            if let (Some(end), Some(hovered)) = (self.end, self.hovered) {
                if hovered != end {
                    return Some(hovered);
                }
            }
        }
        self.start
    }

    /// End edge as rendered: the hovered day stands in while the end is
    /// still missing.
    pub fn displayed_end(&self) -> Option<NaiveDate> {
        if self.focus == RangeFocus::End && self.end.is_none() {
            if let (Some(start), Some(hovered)) = (self.start, self.hovered) {
                if hovered != start {
                    return Some(hovered);
                }
            }
        }
        self.end
    }

    /// Whether `date` starts the displayed range.
    pub fn is_range_start(&self, date: NaiveDate) -> bool {
        match (self.displayed_start(), self.displayed_end()) {
            (Some(start), Some(end)) => date == start && date < end,
            _ => false,
        }
    }

    /// Whether `date` sits strictly inside the displayed range.
    pub fn is_range_middle(&self, date: NaiveDate) -> bool {
        match (self.displayed_start(), self.displayed_end()) {
            (Some(start), Some(end)) => start < date && date < end,
            _ => false,
        }
    }

    /// Whether `date` ends the displayed range.
    pub fn is_range_end(&self, date: NaiveDate) -> bool {
        match (self.displayed_start(), self.displayed_end()) {
            (Some(start), Some(end)) => start < date && date == end,
            _ => false,
        }
    }

    /// Day classification for this selection.
    ///
    /// The opposite edge of the one being edited is disabled so a range
    /// cannot collapse onto itself.
    pub fn day_flags(&self, date: NaiveDate) -> DayFlags {
        let start = self.is_range_start(date);
        let middle = self.is_range_middle(date);
        let end = self.is_range_end(date);
        let selected = is_selectable(date, self.minimum, self.maximum)
            && (start
                || middle
                || end
                || self.start == Some(date)
                || self.end == Some(date));
        let disabled = (self.focus == RangeFocus::Start && end)
            || (self.focus == RangeFocus::End && start);
        DayFlags {
            selected,
            selected_start: start,
            selected_middle: middle,
            selected_end: end,
            disabled,
            ..DayFlags::default()
        }
    }
}
