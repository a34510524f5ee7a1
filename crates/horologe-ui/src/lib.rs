//! Horologe UI: a retained widget tree on top of `horologe-engine`, plus the
//! animated analog clock and the days / hours / minutes offset stepper.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use horologe_ui::prelude::*;
//!
//! Application::new()
//!     .title("Clock")
//!     .font("body", std::fs::read(font_path)?)
//!     .run_widget(|fonts| {
//!         let font = fonts.get("body").context("font missing")?;
//!         let dial = Rc::new(RefCell::new(ClockDial::new(reference)));
//!         Ok(Column::new()
//!             .child(ClockFace::new(dial.clone()))
//!             .child(Text::new("Hello", font, 16.0, Color::BLACK))
//!             .into())
//!     })
//! ```
//!
//! # Extending with custom widgets
//!
//! Implement [`Widget`](widget::Widget) for any type, then use it anywhere an
//! [`Element`](widget::Element) is accepted. Animating widgets advance on
//! [`UiEvent::Tick`](event::UiEvent::Tick) and call
//! [`LayoutCtx::request_redraw`](constraints::LayoutCtx::request_redraw) while
//! they still need frames.

pub mod app;
pub mod clock;
pub mod constraints;
pub mod event;
pub mod focus;
pub mod painter;
pub mod scene;
pub mod stepper;
pub mod widget;
pub mod widgets;

pub use app::Application;

/// Everything needed to build and extend UI.
pub mod prelude {
    pub use crate::app::{Application, FontMap};
    pub use crate::clock::{ClockDial, ClockStyle, HandAngles};
    pub use crate::constraints::{Constraints, Edges, LayoutCtx};
    pub use crate::event::{EventResult, UiEvent};
    pub use crate::focus::FocusId;
    pub use crate::painter::Painter;
    pub use crate::scene::{UiInput, UiScene};
    pub use crate::stepper::{StepperField, StepperModel, StepperValue};
    pub use crate::widget::{Element, Widget};
    pub use crate::widgets::{
        button::Button,
        clock_face::ClockFace,
        flex::{Align, Column, Row},
        stepper::{Stepper, StepperStyle},
        text::Text,
    };

    pub use horologe_engine::coords::{Rect, Vec2};
    pub use horologe_engine::logging::LoggingConfig;
    pub use horologe_engine::paint::Color;
    pub use horologe_engine::scene::Stroke;
    pub use horologe_engine::text::FontId;
}
