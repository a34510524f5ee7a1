use std::f32::consts::PI;
use std::time::Duration;

use super::delta::RotationDelta;

/// Default run length of one hand animation.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AnimatorConfig {
    pub duration: Duration,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self { duration: DEFAULT_DURATION }
    }
}

/// Lifecycle of the current (or last) run.
///
/// `Completed` and `Interrupted` describe how the last run ended; the next
/// [`RotationAnimator::retarget`] moves to `Running` from either.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum AnimPhase {
    #[default]
    Idle,
    Running,
    Completed,
    Interrupted,
}

/// Hand angles in degrees, clockwise from 12 o'clock, reduced to `[0, 360)`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct HandAngles {
    pub hour: f32,
    pub minute: f32,
}

/// Accelerate/decelerate pacing: slow start, fast middle, slow end.
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    ((t + 1.0) * PI).cos() / 2.0 + 0.5
}

/// Reduces `deg` to `[0, 360)`.
#[inline]
pub fn wrap_degrees(deg: f32) -> f32 {
    let r = deg.rem_euclid(360.0);
    // A tiny negative input rounds up to exactly 360 in f32.
    if r >= 360.0 { 0.0 } else { r }
}

/// One hand's rotation. Angles are unbounded here; only display wraps.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
struct HandTrack {
    from: f32,
    current: f32,
    target: f32,
    /// Rotation still owed: `target - current` while running, 0 after completion.
    remaining: f32,
}

impl HandTrack {
    /// Queue `delta` on top of what is still owed and aim from the current angle.
    fn retarget(&mut self, delta: f32) {
        self.remaining += delta;
        self.from = self.current;
        self.target = self.current + self.remaining;
    }

    fn advance(&mut self, fraction: f32) {
        self.current = self.from + (self.target - self.from) * fraction;
        self.remaining = self.target - self.current;
    }

    fn finish(&mut self) {
        self.current = self.target;
        self.remaining = 0.0;
    }
}

/// Eases both hands from their current angle toward a moving target.
///
/// Interrupting a run never makes a hand jump: the next run starts from the
/// angle the hand had reached and carries the rotation it still owed.
#[derive(Debug, Clone, Default)]
pub struct RotationAnimator {
    config: AnimatorConfig,
    phase: AnimPhase,
    elapsed: Duration,
    hour: HandTrack,
    minute: HandTrack,
}

impl RotationAnimator {
    pub fn new(config: AnimatorConfig) -> Self {
        Self { config, ..Self::default() }
    }

    #[inline]
    pub fn phase(&self) -> AnimPhase {
        self.phase
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == AnimPhase::Running
    }

    /// Adds `delta` to the rotation each hand still owes and starts a fresh run
    /// toward `current + remaining`. A running animation is stopped first.
    pub fn retarget(&mut self, delta: RotationDelta) {
        if self.is_running() {
            self.stop();
        }
        self.hour.retarget(delta.hour);
        self.minute.retarget(delta.minute);
        self.elapsed = Duration::ZERO;
        self.phase = AnimPhase::Running;
    }

    /// Cancels the run where it is. Owed rotation is kept for the next retarget.
    pub fn stop(&mut self) {
        if self.is_running() {
            self.phase = AnimPhase::Interrupted;
        }
    }

    /// Advances the run by `dt`. Returns `true` while another frame is wanted.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.is_running() {
            return false;
        }

        self.elapsed += dt;
        let duration = self.config.duration;
        let t = if duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
        };

        if t >= 1.0 {
            self.hour.finish();
            self.minute.finish();
            self.phase = AnimPhase::Completed;
            return false;
        }

        let fraction = ease_in_out(t);
        self.hour.advance(fraction);
        self.minute.advance(fraction);
        true
    }

    /// Angles to paint this frame.
    pub fn angles(&self) -> HandAngles {
        HandAngles {
            hour: wrap_degrees(self.hour.current),
            minute: wrap_degrees(self.minute.current),
        }
    }

    /// Rotation still owed by each hand, unreduced.
    pub fn remaining(&self) -> RotationDelta {
        RotationDelta { hour: self.hour.remaining, minute: self.minute.remaining }
    }

    /// Total rotation applied so far, unreduced.
    #[cfg(test)]
    pub(crate) fn unwrapped(&self) -> RotationDelta {
        RotationDelta { hour: self.hour.current, minute: self.minute.current }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn easing_endpoints_and_midpoint() {
        assert!(close(ease_in_out(0.0), 0.0));
        assert!(close(ease_in_out(0.5), 0.5));
        assert!(close(ease_in_out(1.0), 1.0));
        assert!(ease_in_out(0.1) < 0.1);
        assert!(ease_in_out(0.9) > 0.9);
    }

    #[test]
    fn wrap_never_returns_full_turn() {
        assert_eq!(wrap_degrees(-1e-6), 0.0);
        assert_eq!(wrap_degrees(720.0), 0.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
    }

    #[test]
    fn full_run_lands_on_target_and_completes() {
        let mut a = RotationAnimator::default();
        a.retarget(RotationDelta::from_minutes(90));
        assert_eq!(a.phase(), AnimPhase::Running);

        assert!(a.tick(ms(250)));
        let mid = a.unwrapped();
        assert!(close(mid.minute, 270.0), "{mid:?}");

        assert!(!a.tick(ms(250)));
        assert_eq!(a.phase(), AnimPhase::Completed);
        assert_eq!(a.unwrapped(), RotationDelta { hour: 45.0, minute: 540.0 });
        assert_eq!(a.angles(), HandAngles { hour: 45.0, minute: 180.0 });
        assert_eq!(a.remaining(), RotationDelta::default());
    }

    #[test]
    fn tick_when_idle_does_nothing() {
        let mut a = RotationAnimator::default();
        assert!(!a.tick(ms(16)));
        assert_eq!(a.phase(), AnimPhase::Idle);
        assert_eq!(a.angles(), HandAngles::default());
    }

    #[test]
    fn retarget_mid_run_is_continuous() {
        let mut a = RotationAnimator::default();
        a.retarget(RotationDelta::from_minutes(90));
        a.tick(ms(100));
        let before = a.angles();

        a.retarget(RotationDelta::from_minutes(30));
        assert_eq!(a.angles(), before);
        assert!(a.is_running());

        // One small step moves only a little away from the interruption angle.
        a.tick(ms(1));
        assert!((a.angles().minute - before.minute).abs() < 1.0);

        a.tick(ms(500));
        // Old target plus the new delta: 540 + 180.
        assert!(close(a.unwrapped().minute, 720.0));
        assert!(close(a.unwrapped().hour, 60.0));
    }

    #[test]
    fn stop_keeps_owed_rotation() {
        let mut a = RotationAnimator::default();
        a.retarget(RotationDelta::from_minutes(60));
        a.tick(ms(250));
        a.stop();
        assert_eq!(a.phase(), AnimPhase::Interrupted);
        assert!(!a.tick(ms(100)));

        let owed = a.remaining().minute;
        assert!(close(owed + a.unwrapped().minute, 360.0));

        a.retarget(RotationDelta::default());
        a.tick(ms(500));
        assert!(close(a.unwrapped().minute, 360.0));
    }

    #[test]
    fn negative_delta_turns_backwards_and_wraps_for_display() {
        let mut a = RotationAnimator::default();
        a.retarget(RotationDelta::from_minutes(-15));
        a.tick(ms(500));
        assert!(close(a.unwrapped().minute, -90.0));
        assert!(close(a.angles().minute, 270.0));
        assert!(close(a.angles().hour, 352.5));
    }

    #[test]
    fn zero_duration_completes_on_first_tick() {
        let mut a = RotationAnimator::new(AnimatorConfig { duration: Duration::ZERO });
        a.retarget(RotationDelta::from_minutes(10));
        assert!(!a.tick(Duration::ZERO));
        assert_eq!(a.phase(), AnimPhase::Completed);
        assert!(close(a.angles().minute, 60.0));
    }

    #[test]
    fn angles_stay_in_range_for_large_spans() {
        let mut a = RotationAnimator::default();
        a.retarget(RotationDelta::from_minutes(100_000));
        for _ in 0..40 {
            a.tick(ms(16));
            let ang = a.angles();
            assert!((0.0..360.0).contains(&ang.minute));
            assert!((0.0..360.0).contains(&ang.hour));
        }
    }
}
