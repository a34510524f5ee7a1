use horologe_engine::coords::{Rect, Vec2};

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{is_broadcast, Element, Widget};

// ── Align ─────────────────────────────────────────────────────────────────

/// Cross-axis alignment inside a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Children fill the full cross-axis extent (default).
    #[default]
    Stretch,
    Start,
    Center,
    End,
}

impl Align {
    fn offset(self, available: f32, size: f32) -> f32 {
        match self {
            Align::Stretch | Align::Start => 0.0,
            Align::Center => (available - size) * 0.5,
            Align::End => available - size,
        }
    }
}

/// A zero-size child in a [`Row`] soaks up leftover width.
#[inline]
fn is_spacer(size: Vec2) -> bool {
    size.x == 0.0 && size.y == 0.0
}

/// Sends `event` to each child in turn. Broadcast events reach every child;
/// anything else stops at the first child that consumes it.
fn route(children: &mut [Element], rects: &[Rect], event: &UiEvent, ctx: &LayoutCtx) -> EventResult {
    let broadcast = is_broadcast(event);
    let mut result = EventResult::Ignored;
    for (child, rect) in children.iter_mut().zip(rects) {
        if child.on_event(event, *rect, ctx).is_consumed() {
            result = EventResult::Consumed;
            if !broadcast {
                break;
            }
        }
    }
    result
}

// ── Column ────────────────────────────────────────────────────────────────

/// Vertical flex container. Children are stacked top to bottom.
///
/// # Example
/// ```rust,ignore
/// Column::new()
///     .spacing(6.0)
///     .cross_align(Align::Center)
///     .child(Text::new("Hours", font, 14.0, grey))
///     .child(plus_button)
/// ```
pub struct Column {
    children: Vec<Element>,
    spacing: f32,
    padding: Edges,
    cross_align: Align,
}

impl Column {
    pub fn new() -> Self {
        Self { children: Vec::new(), spacing: 0.0, padding: Edges::default(), cross_align: Align::Stretch }
    }

    pub fn spacing(mut self, v: f32) -> Self {
        self.spacing = v;
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn padding_all(mut self, v: f32) -> Self {
        self.padding = Edges::all(v);
        self
    }

    pub fn cross_align(mut self, align: Align) -> Self {
        self.cross_align = align;
        self
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, iter: impl IntoIterator<Item = impl Into<Element>>) -> Self {
        self.children.extend(iter.into_iter().map(Into::into));
        self
    }

    fn child_constraints(&self, inner_w: f32) -> Constraints {
        match self.cross_align {
            Align::Stretch => {
                // An unbounded width (Column inside a Row) lets children size naturally.
                let min_x = if inner_w.is_finite() { inner_w } else { 0.0 };
                Constraints { min: Vec2::new(min_x, 0.0), max: Vec2::new(inner_w, f32::INFINITY) }
            }
            _ => Constraints::loose(Vec2::new(inner_w, f32::INFINITY)),
        }
    }

    /// Child rectangles for a column occupying `rect`.
    fn layout(&self, rect: Rect, ctx: &LayoutCtx) -> Vec<Rect> {
        let inner = inset_rect(rect, self.padding);
        let child_c = self.child_constraints(inner.size.x);

        let mut y = inner.origin.y;
        self.children
            .iter()
            .map(|child| {
                let s = child.measure(child_c, ctx);
                let x = inner.origin.x + self.cross_align.offset(inner.size.x, s.x);
                let r = Rect::new(x, y, s.x, s.y);
                y += s.y + self.spacing;
                r
            })
            .collect()
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Column {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let inner_w = (constraints.max.x - self.padding.h()).max(0.0);
        let child_c = self.child_constraints(inner_w);

        let mut total_h = self.padding.v();
        let mut max_child_w: f32 = 0.0;
        for (i, child) in self.children.iter().enumerate() {
            let s = child.measure(child_c, ctx);
            total_h += s.y;
            if i + 1 < self.children.len() {
                total_h += self.spacing;
            }
            max_child_w = max_child_w.max(s.x);
        }

        let content_w = (max_child_w + self.padding.h()).max(0.0);
        let w = match self.cross_align {
            Align::Stretch if constraints.max.x.is_finite() => constraints.max.x,
            _ => content_w,
        };
        constraints.constrain(Vec2::new(w, total_h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let rects = self.layout(rect, &painter.layout_ctx());
        for (child, r) in self.children.iter().zip(rects) {
            child.paint(painter, r);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        let rects = self.layout(rect, ctx);
        route(&mut self.children, &rects, event, ctx)
    }
}

// ── Row ───────────────────────────────────────────────────────────────────

/// Horizontal flex container. Children are placed left to right.
///
/// A child that measures to zero size is a spacer and shares out whatever
/// width is left.
pub struct Row {
    children: Vec<Element>,
    spacing: f32,
    padding: Edges,
    cross_align: Align,
}

impl Row {
    pub fn new() -> Self {
        Self { children: Vec::new(), spacing: 0.0, padding: Edges::default(), cross_align: Align::Stretch }
    }

    pub fn spacing(mut self, v: f32) -> Self {
        self.spacing = v;
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn padding_all(mut self, v: f32) -> Self {
        self.padding = Edges::all(v);
        self
    }

    pub fn cross_align(mut self, align: Align) -> Self {
        self.cross_align = align;
        self
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, iter: impl IntoIterator<Item = impl Into<Element>>) -> Self {
        self.children.extend(iter.into_iter().map(Into::into));
        self
    }

    fn child_constraints(&self, inner_h: f32) -> Constraints {
        match self.cross_align {
            Align::Stretch => {
                let min_h = if inner_h.is_finite() { inner_h } else { 0.0 };
                Constraints { min: Vec2::new(0.0, min_h), max: Vec2::new(f32::INFINITY, inner_h) }
            }
            _ => Constraints::loose(Vec2::new(f32::INFINITY, inner_h)),
        }
    }

    fn spacing_total(&self) -> f32 {
        self.children.len().saturating_sub(1) as f32 * self.spacing
    }

    fn layout(&self, rect: Rect, ctx: &LayoutCtx) -> Vec<Rect> {
        let inner = inset_rect(rect, self.padding);
        let child_c = self.child_constraints(inner.size.y);

        let mut sizes: Vec<Vec2> = self.children.iter().map(|c| c.measure(child_c, ctx)).collect();

        let spacer_count = sizes.iter().filter(|s| is_spacer(**s)).count();
        if spacer_count > 0 {
            let fixed_w: f32 = sizes.iter().map(|s| s.x).sum();
            let remaining = (inner.size.x - fixed_w - self.spacing_total()).max(0.0);
            let spacer_w = remaining / spacer_count as f32;
            for s in sizes.iter_mut().filter(|s| is_spacer(**s)) {
                s.x = spacer_w;
            }
        }

        let mut x = inner.origin.x;
        sizes
            .into_iter()
            .map(|s| {
                let y = inner.origin.y + self.cross_align.offset(inner.size.y, s.y);
                let r = Rect::new(x, y, s.x, s.y);
                x += s.x + self.spacing;
                r
            })
            .collect()
    }
}

impl Default for Row {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Row {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let inner_h = (constraints.max.y - self.padding.v()).max(0.0);
        let child_c = self.child_constraints(inner_h);

        let sizes: Vec<Vec2> = self.children.iter().map(|c| c.measure(child_c, ctx)).collect();
        let has_spacer = sizes.iter().any(|s| is_spacer(*s));
        let fixed_w: f32 = sizes.iter().map(|s| s.x).sum();
        let max_child_h: f32 = sizes.iter().map(|s| s.y).fold(0.0, f32::max);

        let total_w = if has_spacer && constraints.max.x.is_finite() {
            constraints.max.x
        } else {
            fixed_w + self.spacing_total() + self.padding.h()
        };

        let content_h = (max_child_h + self.padding.v()).max(0.0);
        let h = match self.cross_align {
            Align::Stretch if constraints.max.y.is_finite() => constraints.max.y,
            _ => content_h,
        };
        constraints.constrain(Vec2::new(total_w, h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let rects = self.layout(rect, &painter.layout_ctx());
        for (child, r) in self.children.iter().zip(rects) {
            child.paint(painter, r);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        let rects = self.layout(rect, ctx);
        route(&mut self.children, &rects, event, ctx)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use horologe_engine::text::FontSystem;

    use super::*;

    /// Fixed-size leaf; zero size acts as a row spacer.
    struct Block(Vec2);

    impl Widget for Block {
        fn measure(&self, c: Constraints, _ctx: &LayoutCtx) -> Vec2 {
            c.constrain(self.0)
        }

        fn paint(&self, _painter: &mut Painter, _rect: Rect) {}
    }

    /// Fixed-size box that records which events reached it.
    struct Tally {
        name: &'static str,
        seen: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Widget for Tally {
        fn measure(&self, c: Constraints, _ctx: &LayoutCtx) -> Vec2 {
            c.constrain(Vec2::new(20.0, 10.0))
        }

        fn paint(&self, _painter: &mut Painter, _rect: Rect) {}

        fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx) -> EventResult {
            match event {
                UiEvent::Click { pos } if !rect.contains(*pos) => EventResult::Ignored,
                _ => {
                    self.seen.borrow_mut().push(self.name);
                    EventResult::Consumed
                }
            }
        }
    }

    fn pair(seen: &Rc<RefCell<Vec<&'static str>>>) -> Row {
        Row::new()
            .spacing(5.0)
            .cross_align(Align::Start)
            .child(Tally { name: "a", seen: seen.clone() })
            .child(Tally { name: "b", seen: seen.clone() })
    }

    #[test]
    fn column_stacks_children_with_spacing() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx::measure_only(&fonts, 1.0);
        let col = Column::new()
            .spacing(4.0)
            .cross_align(Align::Center)
            .child(Block(Vec2::new(10.0, 10.0)))
            .child(Block(Vec2::new(30.0, 20.0)));

        let size = col.measure(Constraints::loose(Vec2::new(100.0, 100.0)), &ctx);
        assert_eq!(size, Vec2::new(30.0, 34.0));

        let rects = col.layout(Rect::new(0.0, 0.0, 30.0, 34.0), &ctx);
        assert_eq!(rects[0], Rect::new(10.0, 0.0, 10.0, 10.0));
        assert_eq!(rects[1], Rect::new(0.0, 14.0, 30.0, 20.0));
    }

    #[test]
    fn row_spacer_takes_remaining_width() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx::measure_only(&fonts, 1.0);
        let row = Row::new()
            .cross_align(Align::Start)
            .child(Block(Vec2::new(10.0, 10.0)))
            .child(Block(Vec2::zero()))
            .child(Block(Vec2::new(10.0, 10.0)));
        let rects = row.layout(Rect::new(0.0, 0.0, 100.0, 10.0), &ctx);
        assert_eq!(rects[1].size.x, 80.0);
        assert_eq!(rects[2].origin.x, 90.0);
    }

    #[test]
    fn clicks_stop_at_first_consumer_but_ticks_reach_everyone() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx::measure_only(&fonts, 1.0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut row = pair(&seen);
        let rect = Rect::new(0.0, 0.0, 100.0, 10.0);

        let click = UiEvent::Click { pos: Vec2::new(30.0, 5.0) };
        assert!(row.on_event(&click, rect, &ctx).is_consumed());
        assert_eq!(*seen.borrow(), vec!["b"]);

        seen.borrow_mut().clear();
        row.on_event(&UiEvent::Tick { dt: Duration::from_millis(16) }, rect, &ctx);
        assert_eq!(*seen.borrow(), vec!["a", "b"]);
    }
}
