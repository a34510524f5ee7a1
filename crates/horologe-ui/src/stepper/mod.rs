//! Days / hours / minutes offset stepper: field text, parsing and the change
//! listener. The widget lives in [`crate::widgets::stepper`].

pub mod model;

pub use model::{integer_filter, parse_value, StepperField, StepperModel, StepperValue};
