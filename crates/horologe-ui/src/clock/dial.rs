use std::time::Duration;

use chrono::NaiveDateTime;

use super::animator::{AnimPhase, AnimatorConfig, HandAngles, RotationAnimator};
use super::delta::{minutes_between, RotationDelta};

/// Clock state a host drives with timestamps.
///
/// Remembers the last timestamp it was started with and turns each new one
/// into a hand rotation relative to it.
#[derive(Debug, Clone)]
pub struct ClockDial {
    animator: RotationAnimator,
    previous_time: NaiveDateTime,
    count_days: bool,
}

impl ClockDial {
    /// Dial showing `reference`'s position as 12:00 with hands at rest.
    pub fn new(reference: NaiveDateTime) -> Self {
        Self::with_config(reference, AnimatorConfig::default())
    }

    pub fn with_config(reference: NaiveDateTime, config: AnimatorConfig) -> Self {
        Self { animator: RotationAnimator::new(config), previous_time: reference, count_days: true }
    }

    /// When `false`, only the time of day matters: moving by whole days
    /// leaves the hands where they are.
    pub fn set_count_days(&mut self, count_days: bool) {
        self.count_days = count_days;
    }

    #[inline]
    pub fn count_days(&self) -> bool {
        self.count_days
    }

    #[inline]
    pub fn previous_time(&self) -> NaiveDateTime {
        self.previous_time
    }

    /// Animate the hands from wherever they are to show `new_time`.
    pub fn start(&mut self, new_time: NaiveDateTime) {
        let minutes = minutes_between(self.previous_time, new_time, self.count_days);
        let delta = RotationDelta::from_minutes(minutes);

        self.animator.retarget(delta);
        let owed = self.animator.remaining();
        log::debug!(
            "clock start: {} -> {} ({minutes} min); owed hour {:.1}°, minute {:.1}°",
            self.previous_time,
            new_time,
            owed.hour,
            owed.minute,
        );
        self.previous_time = new_time;
    }

    pub fn stop(&mut self) {
        self.animator.stop();
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.animator.is_running()
    }

    #[inline]
    pub fn phase(&self) -> AnimPhase {
        self.animator.phase()
    }

    /// Advances the animation. Returns `true` while another frame is wanted.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.animator.tick(dt)
    }

    #[inline]
    pub fn angles(&self) -> HandAngles {
        self.animator.angles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2016, 7, day)
            .and_then(|d| d.and_hms_opt(h, m, 0))
            .expect("valid test timestamp")
    }

    fn settle(dial: &mut ClockDial) {
        while dial.tick(Duration::from_millis(16)) {}
    }

    #[test]
    fn ninety_minutes_after_midnight() {
        let mut dial = ClockDial::new(at(15, 0, 0));
        dial.start(at(15, 1, 30));
        assert!(dial.is_running());
        settle(&mut dial);

        assert_eq!(dial.phase(), AnimPhase::Completed);
        assert_eq!(dial.angles(), HandAngles { hour: 45.0, minute: 180.0 });
        assert_eq!(dial.previous_time(), at(15, 1, 30));
    }

    #[test]
    fn successive_starts_are_relative_to_the_last_one() {
        let mut dial = ClockDial::new(at(15, 0, 0));
        dial.start(at(15, 1, 0));
        settle(&mut dial);
        dial.start(at(15, 3, 15));
        settle(&mut dial);
        assert_eq!(dial.angles(), HandAngles { hour: 97.5, minute: 90.0 });
    }

    #[test]
    fn whole_days_do_not_move_hands_without_day_counting() {
        let mut dial = ClockDial::new(at(15, 0, 0));
        dial.set_count_days(false);
        dial.start(at(17, 0, 0));
        settle(&mut dial);
        assert_eq!(dial.angles(), HandAngles::default());
    }

    #[test]
    fn interrupted_start_reaches_combined_target() {
        let mut dial = ClockDial::new(at(15, 0, 0));
        dial.start(at(15, 1, 0));
        dial.tick(Duration::from_millis(200));
        let mid = dial.angles();

        dial.start(at(15, 2, 0));
        assert_eq!(dial.angles(), mid);
        settle(&mut dial);
        assert!((dial.angles().hour - 60.0).abs() < 1e-3);
    }

    #[test]
    fn stop_halts_where_it_is() {
        let mut dial = ClockDial::new(at(15, 0, 0));
        dial.start(at(15, 0, 30));
        dial.tick(Duration::from_millis(100));
        dial.stop();
        let held = dial.angles();
        assert!(!dial.is_running());
        assert!(!dial.tick(Duration::from_millis(100)));
        assert_eq!(dial.angles(), held);
    }
}
