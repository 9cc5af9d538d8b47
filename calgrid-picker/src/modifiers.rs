//! Day classification: selectability bounds and named modifier predicates.

use std::sync::Arc;

use chrono::NaiveDate;

/// A shared predicate classifying a single day.
pub type ModifierFn = Arc<dyn Fn(NaiveDate) -> bool + Send + Sync>;

/// Built-in modifier names recognized by [`DayFlags`].
pub const BUILT_IN_MODIFIERS: [&str; 8] = [
    "today",
    "outside",
    "wide",
    "disabled",
    "selected",
    "selected_start",
    "selected_middle",
    "selected_end",
];

/// Whether a day can be picked given optional inclusive bounds.
pub fn is_selectable(
    date: NaiveDate,
    minimum: Option<NaiveDate>,
    maximum: Option<NaiveDate>,
) -> bool {
    minimum.is_none_or(|min| date >= min) && maximum.is_none_or(|max| date <= max)
}

/// An ordered collection of named day predicates.
///
/// Merging two sets combines predicates sharing a name with a logical OR, so
/// a picker's built-in `selected` rule and a caller's custom one both apply.
#[derive(Clone, Default)]
pub struct ModifierSet {
    entries: Vec<(String, ModifierFn)>,
}

impl ModifierSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a predicate under `name`, OR-combining with an existing one.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        modifier: impl Fn(NaiveDate) -> bool + Send + Sync + 'static,
    ) {
        self.insert_shared(name, Arc::new(modifier));
    }

    /// Adds a shared predicate under `name`, OR-combining with an existing
    /// one.
    pub fn insert_shared(&mut self, name: impl Into<String>, modifier: ModifierFn) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing)) => {
                let left = Arc::clone(existing);
                let right = modifier;
                *existing = Arc::new(move |date| left(date) || right(date));
            }
            None => self.entries.push((name, modifier)),
        }
    }

    /// Builder form of [`ModifierSet::insert`].
    pub fn with(
        mut self,
        name: impl Into<String>,
        modifier: impl Fn(NaiveDate) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.insert(name, modifier);
        self
    }

    /// Merges another set into this one, OR-combining shared names.
    pub fn merge(&mut self, other: &ModifierSet) {
        for (name, modifier) in &other.entries {
            self.insert_shared(name.clone(), Arc::clone(modifier));
        }
    }

    /// Whether no predicates are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evaluates every predicate for `date` onto `flags`.
    ///
    /// Built-in names assign their field (so a caller-provided `today` rule
    /// replaces the default computation); unknown names that evaluate true
    /// are collected as custom flags.
    pub fn apply(&self, date: NaiveDate, flags: &mut DayFlags) {
        for (name, modifier) in &self.entries {
            let value = modifier(date);
            match name.as_str() {
                "today" => flags.today = value,
                "outside" => flags.outside = value,
                "wide" => flags.wide = value,
                "disabled" => flags.disabled = value,
                "selected" => flags.selected = value,
                "selected_start" => flags.selected_start = value,
                "selected_middle" => flags.selected_middle = value,
                "selected_end" => flags.selected_end = value,
                _ => {
                    if value {
                        flags.custom.push(name.clone());
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for ModifierSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(name, _)| name))
            .finish()
    }
}

/// Computed classification of one rendered day.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DayFlags {
    /// The day is today.
    pub today: bool,
    /// The day falls outside the cursor month.
    pub outside: bool,
    /// The wide cell layout is active.
    pub wide: bool,
    /// The day cannot be picked.
    pub disabled: bool,
    /// The day is part of the current selection.
    pub selected: bool,
    /// The day starts a selected range.
    pub selected_start: bool,
    /// The day sits inside a selected range.
    pub selected_middle: bool,
    /// The day ends a selected range.
    pub selected_end: bool,
    /// Custom modifier names that evaluated true for this day.
    pub custom: Vec<String>,
}

impl DayFlags {
    /// Folds another classification into this one.
    ///
    /// Boolean flags combine with a logical OR, custom names accumulate.
    pub fn merge(&mut self, other: &DayFlags) {
        self.today |= other.today;
        self.outside |= other.outside;
        self.wide |= other.wide;
        self.disabled |= other.disabled;
        self.selected |= other.selected;
        self.selected_start |= other.selected_start;
        self.selected_middle |= other.selected_middle;
        self.selected_end |= other.selected_end;
        self.custom.extend(other.custom.iter().cloned());
    }

    /// Presentation class names for the active flags.
    ///
    /// Built-in flags map to their conventional class names; custom flags
    /// are returned under their registered names.
    pub fn class_names(&self) -> Vec<String> {
        let mut classes = Vec::new();
        for (active, class) in [
            (self.today, "-today"),
            (self.outside, "-outside"),
            (self.wide, "-wide"),
            (self.disabled, "-disabled"),
            (self.selected, "-selected"),
            (self.selected_start, "-selected-start"),
            (self.selected_middle, "-selected-middle"),
            (self.selected_end, "-selected-end"),
        ] {
            if active {
                classes.push(class.to_string());
            }
        }
        classes.extend(self.custom.iter().cloned());
        classes
    }
}

/// Render snapshot of a single day cell.
#[derive(Clone, Debug, PartialEq)]
pub struct DayCell {
    /// The calendar day this cell shows.
    pub date: NaiveDate,
    /// Cell height in pixels.
    pub height: f32,
    /// Computed classification.
    pub flags: DayFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    #[test]
    fn selectable_bounds_are_inclusive() {
        let min = Some(date(2020, 3, 10));
        let max = Some(date(2020, 3, 20));
        assert!(!is_selectable(date(2020, 3, 9), min, max));
        assert!(is_selectable(date(2020, 3, 10), min, max));
        assert!(is_selectable(date(2020, 3, 20), min, max));
        assert!(!is_selectable(date(2020, 3, 21), min, max));
        assert!(is_selectable(date(1999, 1, 1), None, None));
    }

    #[test]
    fn merging_ors_predicates_with_the_same_name() {
        let mut set = ModifierSet::new().with("selected", |d: NaiveDate| d == date(2020, 3, 1));
        let other = ModifierSet::new().with("selected", |d: NaiveDate| d == date(2020, 3, 2));
        set.merge(&other);

        let mut flags = DayFlags::default();
        set.apply(date(2020, 3, 1), &mut flags);
        assert!(flags.selected);

        let mut flags = DayFlags::default();
        set.apply(date(2020, 3, 2), &mut flags);
        assert!(flags.selected);

        let mut flags = DayFlags::default();
        set.apply(date(2020, 3, 3), &mut flags);
        assert!(!flags.selected);
    }

    #[test]
    fn custom_modifiers_surface_by_name() {
        let set = ModifierSet::new().with("holiday", |d: NaiveDate| d == date(2020, 12, 25));

        let mut flags = DayFlags::default();
        set.apply(date(2020, 12, 25), &mut flags);
        assert_eq!(flags.custom, vec!["holiday".to_string()]);
        assert_eq!(flags.class_names(), vec!["holiday".to_string()]);
    }

    #[test]
    fn class_names_follow_the_flag_order() {
        let flags = DayFlags {
            today: true,
            selected: true,
            selected_start: true,
            ..DayFlags::default()
        };
        assert_eq!(
            flags.class_names(),
            vec!["-today", "-selected", "-selected-start"]
        );
    }
}
