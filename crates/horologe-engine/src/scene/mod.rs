//! Draw stream recorded by the widget layer and consumed by the renderers.
//!
//! Items carry a [`SortKey`] (z layer, then insertion order) and the clip
//! rect active when they were pushed. Shape payloads and their `push_*`
//! helpers live one per file under [`shapes`].

mod cmd;
mod key;
mod list;

pub mod shapes;

pub use cmd::DrawCmd;
pub use key::{SortKey, ZIndex};
pub use list::{DrawItem, DrawList};
pub use shapes::{CircleCmd, RoundedRectCmd, SegmentCmd, Stroke, TextCmd};
