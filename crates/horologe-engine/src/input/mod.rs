//! Input subsystem.
//!
//! The public types do not expose winit. `platform::winit` turns window
//! events into [`InputEvent`]s; [`InputState`] folds them into "what is held
//! right now" and [`InputFrame`] keeps what happened since the last frame.

mod frame;
pub mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{
    InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, PointerButtonEvent,
    PointerMoveEvent, TextEvent,
};
