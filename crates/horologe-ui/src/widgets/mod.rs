//! Built-in widgets.

pub mod button;
pub mod clock_face;
pub mod flex;
pub mod stepper;
pub mod text;
pub mod text_edit;
