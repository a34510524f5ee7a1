use std::fmt;

use crate::widgets::text_edit::TextEditState;

/// One of the stepper's three offset fields.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StepperField {
    Days,
    Hours,
    Minutes,
}

impl StepperField {
    pub const ALL: [StepperField; 3] = [StepperField::Days, StepperField::Hours, StepperField::Minutes];

    pub fn label(self) -> &'static str {
        match self {
            StepperField::Days => "Days",
            StepperField::Hours => "Hours",
            StepperField::Minutes => "Minutes",
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// The offset triple delivered to the change listener.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct StepperValue {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl fmt::Display for StepperValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d {}h {}m", self.days, self.hours, self.minutes)
    }
}

/// Field text as an integer. Empty or malformed text counts as zero.
pub fn parse_value(text: &str) -> i64 {
    text.trim().parse().unwrap_or(0)
}

/// Insert filter for the numeric fields: digits anywhere, and a single '-'
/// only at the very start.
pub fn integer_filter(text: &str, at: usize, insert: &str) -> String {
    let has_sign = text.starts_with('-');
    // Nothing may go in front of an existing sign.
    if has_sign && at == 0 {
        return String::new();
    }
    let mut out = String::with_capacity(insert.len());
    for (i, c) in insert.chars().enumerate() {
        if c.is_ascii_digit() {
            out.push(c);
        } else if c == '-' && i == 0 && at == 0 && !has_sign {
            out.push(c);
        }
    }
    out
}

type ChangeListener = Box<dyn FnMut(StepperValue)>;

/// Text and edit state of the days / hours / minutes fields.
///
/// Every change of a field's text (button, typing, reset) is reported to the
/// listener with the full triple. Focus normalisation ("0" ↔ "") leaves the
/// value as it was and stays silent.
pub struct StepperModel {
    fields: [TextEditState; 3],
    listener: Option<ChangeListener>,
}

impl StepperModel {
    pub fn new() -> Self {
        let field = || TextEditState::new("0").with_filter(integer_filter);
        Self { fields: [field(), field(), field()], listener: None }
    }

    /// Registers the single change listener, replacing any previous one.
    pub fn on_change(&mut self, f: impl FnMut(StepperValue) + 'static) {
        self.listener = Some(Box::new(f));
    }

    pub fn text(&self, field: StepperField) -> &str {
        self.fields[field.index()].text()
    }

    pub fn state(&self, field: StepperField) -> &TextEditState {
        &self.fields[field.index()]
    }

    pub fn value(&self, field: StepperField) -> i64 {
        parse_value(self.text(field))
    }

    pub fn values(&self) -> StepperValue {
        StepperValue {
            days: self.value(StepperField::Days),
            hours: self.value(StepperField::Hours),
            minutes: self.value(StepperField::Minutes),
        }
    }

    pub fn increment(&mut self, field: StepperField) {
        self.step(field, 1);
    }

    pub fn decrement(&mut self, field: StepperField) {
        self.step(field, -1);
    }

    /// Replaces the field's text outright. Emits if it differs.
    pub fn edit(&mut self, field: StepperField, text: &str) {
        let state = &mut self.fields[field.index()];
        if state.text() == text {
            return;
        }
        state.set_text(text);
        self.emit();
    }

    /// Runs `f` against the field's edit state and emits if the text changed.
    pub fn apply_edit<R>(&mut self, field: StepperField, f: impl FnOnce(&mut TextEditState) -> R) -> R {
        let state = &mut self.fields[field.index()];
        let before = state.text().to_string();
        let out = f(state);
        if state.text() != before {
            self.emit();
        }
        out
    }

    /// A field showing "0" is cleared when it takes focus.
    pub fn focus_gained(&mut self, field: StepperField) {
        let state = &mut self.fields[field.index()];
        if state.text() == "0" {
            state.set_text("");
        }
    }

    /// An empty field shows "0" again when it loses focus.
    pub fn focus_lost(&mut self, field: StepperField) {
        let state = &mut self.fields[field.index()];
        if state.text().is_empty() {
            state.set_text("0");
        }
    }

    /// All fields back to "0". Emits once.
    pub fn reset(&mut self) {
        for state in &mut self.fields {
            state.set_text("0");
        }
        self.emit();
    }

    fn step(&mut self, field: StepperField, by: i64) {
        let next = self.value(field).saturating_add(by);
        self.fields[field.index()].set_text(next.to_string());
        self.emit();
    }

    fn emit(&mut self) {
        let value = self.values();
        log::debug!("stepper changed: {value}");
        if let Some(listener) = self.listener.as_mut() {
            listener(value);
        }
    }
}

impl Default for StepperModel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StepperModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepperModel")
            .field("fields", &self.fields.iter().map(TextEditState::text).collect::<Vec<_>>())
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn recorded() -> (StepperModel, Rc<RefCell<Vec<StepperValue>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut model = StepperModel::new();
        let sink = seen.clone();
        model.on_change(move |v| sink.borrow_mut().push(v));
        (model, seen)
    }

    #[test]
    fn plus_on_five_gives_six_and_emits() {
        let (mut m, seen) = recorded();
        m.edit(StepperField::Hours, "5");
        m.increment(StepperField::Hours);
        assert_eq!(m.text(StepperField::Hours), "6");
        assert_eq!(m.state(StepperField::Hours).cursor, 1);
        assert_eq!(seen.borrow().last(), Some(&StepperValue { days: 0, hours: 6, minutes: 0 }));
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn minus_on_zero_goes_negative() {
        let (mut m, seen) = recorded();
        m.decrement(StepperField::Days);
        assert_eq!(m.text(StepperField::Days), "-1");
        assert_eq!(seen.borrow()[0], StepperValue { days: -1, hours: 0, minutes: 0 });
    }

    #[test]
    fn steps_from_empty_or_garbage_start_at_zero() {
        let (mut m, _) = recorded();
        m.edit(StepperField::Minutes, "");
        m.increment(StepperField::Minutes);
        assert_eq!(m.text(StepperField::Minutes), "1");
        m.edit(StepperField::Minutes, "-");
        m.increment(StepperField::Minutes);
        assert_eq!(m.text(StepperField::Minutes), "1");
    }

    #[test]
    fn focus_normalisation_is_silent() {
        let (mut m, seen) = recorded();
        m.focus_gained(StepperField::Days);
        assert_eq!(m.text(StepperField::Days), "");
        m.focus_lost(StepperField::Days);
        assert_eq!(m.text(StepperField::Days), "0");
        assert_eq!(m.state(StepperField::Days).cursor, 1);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn focus_keeps_non_zero_text() {
        let (mut m, _) = recorded();
        m.edit(StepperField::Days, "3");
        m.focus_gained(StepperField::Days);
        assert_eq!(m.text(StepperField::Days), "3");
        m.focus_lost(StepperField::Days);
        assert_eq!(m.text(StepperField::Days), "3");
    }

    #[test]
    fn unchanged_edit_does_not_emit() {
        let (mut m, seen) = recorded();
        m.edit(StepperField::Hours, "0");
        let moved = m.apply_edit(StepperField::Hours, |st| {
            st.move_home(false);
            st.cursor
        });
        assert_eq!(moved, 0);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn typed_edits_emit_the_full_triple() {
        let (mut m, seen) = recorded();
        m.edit(StepperField::Days, "2");
        m.focus_gained(StepperField::Minutes);
        assert_eq!(m.text(StepperField::Minutes), "");
        m.apply_edit(StepperField::Minutes, |st| st.insert_str("5"));
        assert_eq!(m.text(StepperField::Minutes), "5");
        assert_eq!(seen.borrow().last(), Some(&StepperValue { days: 2, hours: 0, minutes: 5 }));
    }

    #[test]
    fn reset_zeroes_and_emits_once() {
        let (mut m, seen) = recorded();
        m.edit(StepperField::Days, "4");
        m.edit(StepperField::Hours, "-2");
        seen.borrow_mut().clear();
        m.reset();
        for f in StepperField::ALL {
            assert_eq!(m.text(f), "0");
        }
        assert_eq!(*seen.borrow(), vec![StepperValue::default()]);
    }

    #[test]
    fn parse_treats_bad_text_as_zero() {
        assert_eq!(parse_value(""), 0);
        assert_eq!(parse_value("-"), 0);
        assert_eq!(parse_value("12"), 12);
        assert_eq!(parse_value("-7"), -7);
        assert_eq!(parse_value("99999999999999999999"), 0);
    }

    #[test]
    fn filter_allows_digits_and_one_leading_sign() {
        assert_eq!(integer_filter("", 0, "-12"), "-12");
        assert_eq!(integer_filter("12", 2, "3a"), "3");
        assert_eq!(integer_filter("12", 1, "-"), "");
        assert_eq!(integer_filter("-1", 0, "5"), "");
        assert_eq!(integer_filter("-1", 1, "-"), "");
        assert_eq!(integer_filter("1", 0, "-"), "-");
    }
}
