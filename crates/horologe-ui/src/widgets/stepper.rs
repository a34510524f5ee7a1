use std::cell::RefCell;
use std::rc::Rc;

use horologe_engine::coords::{Rect, Vec2};
use horologe_engine::paint::Color;
use horologe_engine::scene::Stroke;
use horologe_engine::text::FontId;

use crate::constraints::{Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::focus::FocusId;
use crate::painter::Painter;
use crate::stepper::{StepperField, StepperModel};
use crate::widget::{Element, Widget};
use crate::widgets::button::Button;
use crate::widgets::flex::{Align, Column, Row};
use crate::widgets::text::Text;

/// Colors and metrics shared by the stepper's buttons and fields.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StepperStyle {
    pub font_size: f32,
    pub text_color: Color,
    pub caption_color: Color,
    pub accent: Color,
    /// Label color on the accent buttons.
    pub on_accent: Color,
    pub field_background: Color,
    pub field_border: Color,
    pub selection: Color,
    pub field_width: f32,
    pub corner_radius: f32,
}

impl Default for StepperStyle {
    fn default() -> Self {
        let accent = Color::from_rgb_hex(0xFF4081);
        Self {
            font_size: 16.0,
            text_color: Color::from_rgb_hex(0x212121),
            caption_color: Color::from_rgb_hex(0x757575),
            accent,
            on_accent: Color::WHITE,
            field_background: Color::WHITE,
            field_border: Color::from_rgb_hex(0xBDBDBD),
            selection: accent.with_alpha_factor(0.25),
            field_width: 72.0,
            corner_radius: 4.0,
        }
    }
}

// ── NumberField ───────────────────────────────────────────────────────────

const FIELD_PADDING: Edges = Edges { top: 6.0, right: 8.0, bottom: 6.0, left: 8.0 };
const CARET_WIDTH: f32 = 1.5;

/// Focusable single-line field editing one stepper value.
pub struct NumberField {
    id: FocusId,
    model: Rc<RefCell<StepperModel>>,
    field: StepperField,
    font: FontId,
    style: StepperStyle,
}

impl NumberField {
    pub fn new(model: Rc<RefCell<StepperModel>>, field: StepperField, font: FontId, style: StepperStyle) -> Self {
        Self { id: FocusId::new(), model, field, font, style }
    }

    pub fn focus_id(&self) -> FocusId {
        self.id
    }

    fn text_origin(&self, rect: Rect) -> Vec2 {
        Vec2::new(rect.origin.x + FIELD_PADDING.left, rect.origin.y + FIELD_PADDING.top)
    }
}

impl Widget for NumberField {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let line = ctx.fonts.line_height(self.font, self.style.font_size);
        constraints.constrain(Vec2::new(self.style.field_width, line + FIELD_PADDING.v()))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        painter.register_focusable(self.id);
        let focused = painter.is_focused(self.id);
        let style = &self.style;

        let border = if focused {
            Stroke::new(2.0, style.accent)
        } else {
            Stroke::new(1.0, style.field_border)
        };
        painter.rounded_rect(rect, style.corner_radius, Some(style.field_background), Some(border));

        let model = self.model.borrow();
        let state = model.state(self.field);
        let origin = self.text_origin(rect);
        let line = painter.font_system.line_height(self.font, style.font_size);
        let inner_w = (rect.size.x - FIELD_PADDING.h()).max(0.0);

        painter.push_clip(Rect::new(origin.x, rect.origin.y, inner_w, rect.size.y));
        if focused {
            let fonts = painter.font_system;
            let scale = painter.scale;
            let caret_x = state.cursor_x(self.font, style.font_size, fonts, scale);
            if state.has_selection() {
                let anchor_x = state.anchor_x(self.font, style.font_size, fonts, scale);
                let (lo, hi) = (caret_x.min(anchor_x), caret_x.max(anchor_x));
                painter.rounded_rect(
                    Rect::new(origin.x + lo, origin.y, hi - lo, line),
                    0.0,
                    Some(style.selection),
                    None,
                );
            }
            let x = origin.x + caret_x;
            painter.segment(Vec2::new(x, origin.y), Vec2::new(x, origin.y + line), CARET_WIDTH, style.text_color);
        }
        if !state.text().is_empty() {
            painter.text(state.text(), self.font, style.font_size, style.text_color, origin, None);
        }
        painter.pop_clip();
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        match event {
            UiEvent::Click { pos } if rect.contains(*pos) => {
                ctx.request_focus(self.id);
                let x = pos.x - self.text_origin(rect).x;
                let (font, size) = (self.font, self.style.font_size);
                self.model.borrow_mut().apply_edit(self.field, |st| {
                    let at = st.x_to_cursor(x, font, size, ctx.fonts, ctx.scale);
                    st.cursor = at;
                    st.anchor = at;
                });
                EventResult::Consumed
            }
            UiEvent::FocusGained { id } if *id == self.id => {
                self.model.borrow_mut().focus_gained(self.field);
                EventResult::Consumed
            }
            UiEvent::FocusLost { id } if *id == self.id => {
                self.model.borrow_mut().focus_lost(self.field);
                EventResult::Consumed
            }
            UiEvent::TextInput { .. } | UiEvent::KeyPress { .. } if ctx.is_focused(self.id) => {
                let (consumed, _) = self.model.borrow_mut().apply_edit(self.field, |st| st.on_event(event));
                if consumed { EventResult::Consumed } else { EventResult::Ignored }
            }
            _ => EventResult::Ignored,
        }
    }
}

// ── Stepper ───────────────────────────────────────────────────────────────

/// Days / hours / minutes offset control: for each field a caption, a "+"
/// button, the editable value and a "−" button.
///
/// The model is shared; register the change listener on it. The listener runs
/// while the model is mutably borrowed, so it must not touch the model.
///
/// # Example
/// ```rust,ignore
/// let model = Rc::new(RefCell::new(StepperModel::new()));
/// model.borrow_mut().on_change(move |v| log::info!("offset {v}"));
/// Stepper::new(model.clone(), font)
/// ```
pub struct Stepper {
    root: Element,
}

impl Stepper {
    pub fn new(model: Rc<RefCell<StepperModel>>, font: FontId) -> Self {
        Self::with_style(model, font, StepperStyle::default())
    }

    pub fn with_style(model: Rc<RefCell<StepperModel>>, font: FontId, style: StepperStyle) -> Self {
        let columns = StepperField::ALL.map(|field| column(&model, field, font, style));
        let root = Row::new().spacing(16.0).cross_align(Align::Start).children(columns);
        Self { root: root.into() }
    }
}

fn column(model: &Rc<RefCell<StepperModel>>, field: StepperField, font: FontId, style: StepperStyle) -> Column {
    let step = |label: &str, up: bool| {
        let model = model.clone();
        Button::new(Text::new(label, font, style.font_size, style.on_accent))
            .background(style.accent)
            .hover_background(style.accent.with_alpha_factor(0.85))
            .press_background(style.accent.with_alpha_factor(0.7))
            .corner_radius(style.corner_radius)
            .padding(Edges::symmetric(4.0, 8.0))
            .min_size(style.field_width, 0.0)
            .on_click(move || {
                let mut m = model.borrow_mut();
                if up { m.increment(field) } else { m.decrement(field) }
            })
    };

    Column::new()
        .spacing(6.0)
        .cross_align(Align::Center)
        .child(Text::new(field.label(), font, style.font_size * 0.85, style.caption_color))
        .child(step("+", true))
        .child(NumberField::new(model.clone(), field, font, style))
        .child(step("\u{2212}", false))
}

impl Widget for Stepper {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        self.root.measure(constraints, ctx)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        self.root.paint(painter, rect);
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        self.root.on_event(event, rect, ctx)
    }
}
