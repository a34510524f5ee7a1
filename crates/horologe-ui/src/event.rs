use std::time::Duration;

use horologe_engine::coords::Vec2;
use horologe_engine::input::Key;

use crate::focus::FocusId;

pub use horologe_engine::input::Modifiers;

/// Input and lifecycle events routed through the widget tree.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Frame tick; `dt` is the clamped time since the previous frame.
    ///
    /// Delivered to the whole tree before anything else in a frame.
    Tick { dt: Duration },
    /// Primary mouse button pressed and released at `pos`.
    Click { pos: Vec2 },
    /// Mouse moved to `pos` (fired every frame).
    Hover { pos: Vec2 },
    /// Committed text input (one or more characters).
    TextInput { text: String },
    /// Key pressed (including auto-repeat) while the window has focus.
    KeyPress { key: Key, modifiers: Modifiers },
    /// `id` became the focused widget at the end of the previous event pass.
    FocusGained { id: FocusId },
    /// `id` stopped being the focused widget.
    FocusLost { id: FocusId },
}

/// Result returned by [`crate::widget::Widget::on_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled; stop routing to siblings / parents.
    Consumed,
    /// Event was not handled; keep routing.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}
