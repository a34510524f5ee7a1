//! Time arithmetic behind the demo screen.

use anyhow::Context;
use chrono::{Local, NaiveDateTime, TimeDelta};
use horologe_ui::stepper::StepperValue;

/// Date label shown above the clock, e.g. `"07 Mar 13:45"`.
pub const LABEL_FORMAT: &str = "%d %b %H:%M";

/// Today at 00:00 local time; the clock's 12 o'clock.
pub fn reference_now() -> anyhow::Result<NaiveDateTime> {
    Local::now()
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .context("local midnight is not representable")
}

/// `now` moved by the stepper offset, or `None` if that leaves chrono's range.
pub fn target_time(now: NaiveDateTime, offset: StepperValue) -> Option<NaiveDateTime> {
    let delta = TimeDelta::try_days(offset.days)?
        .checked_add(&TimeDelta::try_hours(offset.hours)?)?
        .checked_add(&TimeDelta::try_minutes(offset.minutes)?)?;
    now.checked_add_signed(delta)
}

pub fn format_label(t: NaiveDateTime) -> String {
    t.format(LABEL_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn midnight() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2016, 3, 7)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid test timestamp")
    }

    #[test]
    fn offset_adds_days_hours_and_minutes() {
        let t = target_time(midnight(), StepperValue { days: 1, hours: 13, minutes: 45 });
        assert_eq!(t.map(format_label).as_deref(), Some("08 Mar 13:45"));
    }

    #[test]
    fn negative_offsets_go_back_in_time() {
        let t = target_time(midnight(), StepperValue { days: 0, hours: 0, minutes: -1 });
        assert_eq!(t.map(format_label).as_deref(), Some("06 Mar 23:59"));
    }

    #[test]
    fn zero_offset_is_the_reference() {
        assert_eq!(target_time(midnight(), StepperValue::default()), Some(midnight()));
        assert_eq!(format_label(midnight()), "07 Mar 00:00");
    }

    #[test]
    fn absurd_offsets_are_rejected_not_panicking() {
        let huge = StepperValue { days: i64::MAX, hours: 0, minutes: 0 };
        assert_eq!(target_time(midnight(), huge), None);
        let huge = StepperValue { days: 0, hours: 0, minutes: i64::MAX };
        assert_eq!(target_time(midnight(), huge), None);
    }

    #[test]
    fn reference_is_midnight() {
        let now = reference_now().expect("local midnight");
        assert_eq!(format_label(now).get(7..), Some("00:00"));
    }
}
