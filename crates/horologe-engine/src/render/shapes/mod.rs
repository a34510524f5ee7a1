//! One renderer per scene shape kind.

mod common;

pub mod circle;
pub mod rounded_rect;
pub mod segment;
pub mod text;
