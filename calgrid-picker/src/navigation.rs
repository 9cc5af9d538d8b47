//! Month-stepping helpers for navigation controls.

use calgrid::week;
use chrono::NaiveDate;

/// First day of the month before the one containing `month`.
pub fn previous_month(month: NaiveDate) -> NaiveDate {
    week::month_start(week::add_months(month, -1))
}

/// First day of the month after the one containing `month`.
pub fn next_month(month: NaiveDate) -> NaiveDate {
    week::month_start(week::add_months(month, 1))
}

/// Whether stepping back from `month` is allowed.
///
/// Navigation stops once the cursor reaches the minimum date's month.
pub fn can_navigate_previous(month: NaiveDate, minimum: Option<NaiveDate>) -> bool {
    !minimum.is_some_and(|min| week::same_month(min, month))
}

/// Whether stepping forward from `month` is allowed.
pub fn can_navigate_next(month: NaiveDate, maximum: Option<NaiveDate>) -> bool {
    !maximum.is_some_and(|max| week::same_month(max, month))
}
