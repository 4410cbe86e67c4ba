//! Face rendering.

mod face;

pub use face::draw_face;
