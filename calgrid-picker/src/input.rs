//! Typed date entry backing a text input.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use crate::modifiers::is_selectable;

const DEFAULT_FORMAT: &str = "%Y-%m-%d";

/// Why a typed value was not committed.
#[derive(Debug, Error)]
pub enum DateInputError {
    /// The text does not parse under the configured format.
    #[error("text does not parse as a date: {0}")]
    Unparseable(#[from] chrono::ParseError),
    /// The date parsed but falls outside the selectable bounds.
    #[error("date is outside the selectable range")]
    OutOfRange,
    /// The date parsed but the custom validator rejected it.
    #[error("date was rejected by the validator")]
    Rejected,
}

/// State machine for a free-text date field.
///
/// Every edit is parsed eagerly and committed as the selected date the
/// moment it becomes valid; leaving the field normalizes the text back to
/// the committed value. The format string uses chrono's strftime syntax and
/// must describe a full calendar date.
#[derive(Clone)]
pub struct DateInput {
    format: String,
    value: String,
    focused: bool,
    selected: Option<NaiveDate>,
    minimum: Option<NaiveDate>,
    maximum: Option<NaiveDate>,
    validator: Option<Arc<dyn Fn(NaiveDate) -> bool + Send + Sync>>,
}

impl DateInput {
    /// An empty input using the given format string.
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            value: String::new(),
            focused: false,
            selected: None,
            minimum: None,
            maximum: None,
            validator: None,
        }
    }

    /// Sets the earliest committable date.
    pub fn minimum(mut self, minimum: NaiveDate) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Sets the latest committable date.
    pub fn maximum(mut self, maximum: NaiveDate) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Adds a custom validation step on top of the bounds.
    pub fn validator(mut self, validator: impl Fn(NaiveDate) -> bool + Send + Sync + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Seeds the committed date, refreshing the text.
    pub fn selected(mut self, selected: Option<NaiveDate>) -> Self {
        self.sync(selected);
        self
    }

    /// The text as currently typed.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The committed date, if any.
    pub fn date(&self) -> Option<NaiveDate> {
        self.selected
    }

    /// Whether the field has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Placeholder text derived from the format string.
    pub fn placeholder(&self) -> String {
        self.format.to_lowercase()
    }

    /// Marks the field focused.
    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Applies one edit, committing the parsed date when it is acceptable.
    ///
    /// The text is kept either way so the user can continue typing through
    /// invalid intermediate states.
    pub fn change(&mut self, text: &str) -> Result<NaiveDate, DateInputError> {
        self.value = text.to_string();
        let date = self.accept(text)?;
        self.selected = Some(date);
        Ok(date)
    }

    /// Ends editing, normalizing the text.
    ///
    /// Valid text is reformatted, invalid text falls back to the committed
    /// date or clears. Emptying the field clears the committed date; the
    /// return value reports that clear.
    pub fn blur(&mut self) -> bool {
        self.focused = false;

        if !self.value.is_empty() {
            match self.accept(&self.value) {
                Ok(date) => self.value = self.format_date(date),
                Err(_) => match self.committed_acceptable() {
                    Some(date) => self.value = self.format_date(date),
                    None => self.value.clear(),
                },
            }
            false
        } else {
            self.selected.take().is_some()
        }
    }

    /// Adopts an externally changed date, refreshing the text unless the
    /// user is mid-edit.
    pub fn sync(&mut self, selected: Option<NaiveDate>) {
        self.selected = selected;
        if !self.focused {
            self.value = match self.committed_acceptable() {
                Some(date) => self.format_date(date),
                None => String::new(),
            };
        }
    }

    fn accept(&self, text: &str) -> Result<NaiveDate, DateInputError> {
        let date = NaiveDate::parse_from_str(text, &self.format)?;
        if !is_selectable(date, self.minimum, self.maximum) {
            return Err(DateInputError::OutOfRange);
        }
        if self.validator.as_ref().is_some_and(|validate| !validate(date)) {
            return Err(DateInputError::Rejected);
        }
        Ok(date)
    }

    fn committed_acceptable(&self) -> Option<NaiveDate> {
        self.selected.filter(|date| self.accept(&self.format_date(*date)).is_ok())
    }

    fn format_date(&self, date: NaiveDate) -> String {
        date.format(&self.format).to_string()
    }
}

impl Default for DateInput {
    fn default() -> Self {
        Self::new(DEFAULT_FORMAT)
    }
}

impl std::fmt::Debug for DateInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateInput")
            .field("format", &self.format)
            .field("value", &self.value)
            .field("focused", &self.focused)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    #[test]
    fn valid_text_commits_immediately() {
        let mut input = DateInput::default();
        input.focus();
        let committed = input.change("2020-03-05").expect("valid input");
        assert_eq!(committed, date(2020, 3, 5));
        assert_eq!(input.date(), Some(date(2020, 3, 5)));
        assert_eq!(input.value(), "2020-03-05");
    }

    #[test]
    fn partial_text_keeps_the_previous_date() {
        let mut input = DateInput::default();
        input.focus();
        input.change("2020-03-05").expect("valid input");

        let result = input.change("2020-03-");
        assert!(matches!(result, Err(DateInputError::Unparseable(_))));
        assert_eq!(input.date(), Some(date(2020, 3, 5)));
        assert_eq!(input.value(), "2020-03-");
    }

    #[test]
    fn out_of_range_dates_are_rejected() {
        let mut input = DateInput::default().minimum(date(2020, 3, 1));
        input.focus();
        let result = input.change("2020-02-28");
        assert!(matches!(result, Err(DateInputError::OutOfRange)));
        assert_eq!(input.date(), None);
    }

    #[test]
    fn validator_runs_after_the_bounds() {
        let mut input = DateInput::default().validator(|d| d.format("%u").to_string() != "6");
        input.focus();
        // 2020-03-07 is a Saturday.
        let result = input.change("2020-03-07");
        assert!(matches!(result, Err(DateInputError::Rejected)));
        input.change("2020-03-09").expect("monday is accepted");
    }

    #[test]
    fn blur_normalizes_invalid_text_to_the_committed_date() {
        let mut input = DateInput::default();
        input.focus();
        input.change("2020-03-05").expect("valid input");
        input.change("garbage").expect_err("does not parse");

        assert!(!input.blur());
        assert_eq!(input.value(), "2020-03-05");
        assert!(!input.is_focused());
    }

    #[test]
    fn blurring_an_emptied_field_clears_the_date() {
        let mut input = DateInput::default();
        input.focus();
        input.change("2020-03-05").expect("valid input");
        input.change("").expect_err("empty does not parse");

        assert!(input.blur());
        assert_eq!(input.date(), None);
        assert_eq!(input.value(), "");
    }

    #[test]
    fn sync_refreshes_only_while_unfocused() {
        let mut input = DateInput::default();
        input.sync(Some(date(2020, 3, 5)));
        assert_eq!(input.value(), "2020-03-05");

        input.focus();
        input.change("2020-0").expect_err("mid-edit");
        input.sync(Some(date(2020, 4, 1)));
        assert_eq!(input.value(), "2020-0");
        assert_eq!(input.date(), Some(date(2020, 4, 1)));

        assert!(!input.blur());
        assert_eq!(input.value(), "2020-04-01");
    }
}
