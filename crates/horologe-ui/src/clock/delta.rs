use chrono::NaiveDateTime;

/// Minute hand: one turn per 60 minutes.
pub const MINUTE_HAND_DEG_PER_MIN: f32 = 360.0 / 60.0;
/// Hour hand: one turn per 12 hours (720 minutes).
pub const HOUR_HAND_DEG_PER_MIN: f32 = 360.0 / 720.0;

/// Whole minutes from `previous` to `next`, truncated toward zero.
///
/// Negative when `next` is earlier. With `count_days == false`, `next` is
/// first moved onto `previous`'s calendar date (time of day kept), so only
/// the wall-clock difference within one day counts.
pub fn minutes_between(previous: NaiveDateTime, next: NaiveDateTime, count_days: bool) -> i64 {
    let next = if count_days { next } else { previous.date().and_time(next.time()) };
    (next - previous).num_minutes()
}

/// Angular distance each hand has to sweep, in degrees (clockwise positive).
///
/// Not reduced modulo 360: a 90 minute span turns the minute hand 540°.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct RotationDelta {
    pub hour: f32,
    pub minute: f32,
}

impl RotationDelta {
    pub fn from_minutes(minutes: i64) -> Self {
        let m = minutes as f32;
        Self { hour: m * HOUR_HAND_DEG_PER_MIN, minute: m * MINUTE_HAND_DEG_PER_MIN }
    }

    pub fn between(previous: NaiveDateTime, next: NaiveDateTime, count_days: bool) -> Self {
        Self::from_minutes(minutes_between(previous, next, count_days))
    }
}
