use super::shapes::{CircleCmd, RoundedRectCmd, SegmentCmd, TextCmd};

/// Renderer-agnostic draw command.
///
/// Each variant has a payload under `scene::shapes` and a matching renderer
/// under `render::shapes`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Circle(CircleCmd),
    RoundedRect(RoundedRectCmd),
    Segment(SegmentCmd),
    Text(TextCmd),
}
