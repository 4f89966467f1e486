//! Core geometry types for the design canvas
//!
//! Every rectangle stored in the model is expressed in design units on a
//! fixed 1200x675 canvas. Only the viewer's transform maps them to pixels.

mod vec2;
mod rect;
mod size;

pub use vec2::Vec2;
pub use rect::Rect;
pub use size::Size;

/// Design canvas width in design units
pub const DESIGN_WIDTH: f32 = 1200.0;

/// Design canvas height in design units
pub const DESIGN_HEIGHT: f32 = 675.0;

/// Design canvas size
pub const DESIGN_SIZE: Size = Size::new(DESIGN_WIDTH, DESIGN_HEIGHT);

/// Round to two decimal places
#[inline]
pub fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
