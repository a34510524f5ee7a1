use std::cell::RefCell;
use std::rc::Rc;

use horologe_engine::coords::{Rect, Vec2};

use crate::clock::{paint_clock, ClockDial, ClockStyle};
use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;

/// Square analog clock driven by a shared [`ClockDial`].
///
/// The host keeps a clone of the dial and calls [`ClockDial::start`] on it;
/// this widget advances the animation on every `Tick` and paints the hands.
pub struct ClockFace {
    dial: Rc<RefCell<ClockDial>>,
    style: ClockStyle,
    size: f32,
}

impl ClockFace {
    pub fn new(dial: Rc<RefCell<ClockDial>>) -> Self {
        Self { dial, style: ClockStyle::default(), size: 200.0 }
    }

    pub fn style(mut self, style: ClockStyle) -> Self {
        self.style = style;
        self
    }

    /// Preferred edge length in logical pixels.
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

impl Widget for ClockFace {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        constraints.constrain(Vec2::new(self.size, self.size))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let dial = self.dial.borrow();
        paint_clock(painter, rect, dial.angles(), &self.style);
        // A start() issued after this frame's tick still needs frames.
        if dial.is_running() {
            painter.request_redraw();
        }
    }

    fn on_event(&mut self, event: &UiEvent, _rect: Rect, ctx: &LayoutCtx) -> EventResult {
        match event {
            UiEvent::Tick { dt } => {
                if self.dial.borrow_mut().tick(*dt) {
                    ctx.request_redraw();
                }
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::time::Duration;

    use chrono::{NaiveDate, TimeDelta};
    use horologe_engine::scene::DrawList;
    use horologe_engine::text::FontSystem;

    use super::*;

    fn dial() -> Rc<RefCell<ClockDial>> {
        let midnight = NaiveDate::from_ymd_opt(2016, 7, 15)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid test timestamp");
        Rc::new(RefCell::new(ClockDial::new(midnight)))
    }

    fn tick(face: &mut ClockFace, ms: u64) -> bool {
        let fonts = FontSystem::new();
        let flag = Cell::new(false);
        let ctx = LayoutCtx { fonts: &fonts, scale: 1.0, focus: None, redraw: Some(&flag) };
        face.on_event(&UiEvent::Tick { dt: Duration::from_millis(ms) }, Rect::default(), &ctx);
        flag.get()
    }

    #[test]
    fn ticks_request_frames_only_while_running() {
        let dial = dial();
        let mut face = ClockFace::new(dial.clone());
        assert!(!tick(&mut face, 16));

        let target = dial.borrow().previous_time() + TimeDelta::minutes(90);
        dial.borrow_mut().start(target);
        assert!(tick(&mut face, 100));
        assert!(!tick(&mut face, 500));
        assert_eq!(dial.borrow().angles().minute, 180.0);
    }

    #[test]
    fn paint_keeps_frames_coming_after_a_late_start() {
        let dial = dial();
        let face = ClockFace::new(dial.clone());
        let target = dial.borrow().previous_time() + TimeDelta::minutes(5);
        dial.borrow_mut().start(target);

        let fonts = FontSystem::new();
        let flag = Cell::new(false);
        let mut list = DrawList::new();
        {
            let mut p = Painter::new(&mut list, &fonts, None, Some(&flag), Vec2::zero(), false, 1.0);
            face.paint(&mut p, Rect::new(0.0, 0.0, 200.0, 200.0));
        }
        assert!(flag.get());
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn measures_square_within_constraints() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx::measure_only(&fonts, 1.0);
        let face = ClockFace::new(dial()).size(240.0);
        assert_eq!(face.measure(Constraints::loose(Vec2::new(500.0, 180.0)), &ctx), Vec2::new(240.0, 180.0));
    }
}
