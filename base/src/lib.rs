//! Base types shared by the expedite crates: geometry and colors.

pub mod color;
pub mod geom;

pub use color::ColorU8;
