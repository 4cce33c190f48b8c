use crate::geom;

pub const PAREN_SCALE: f32 = 25.0;
pub const FONT_SIZE: f32 = 16.0;
pub const PADDING: geom::Padding = geom::Padding::Even(4.0);
pub const NUMBER_MIN_WIDTH: f32 = 8.0;

pub const INFIX_OPERATORS: [&str; 13] = [
    "=", "≠", "≥", ">", "≤", "<", "+", "-", "×", "/", "and", "or", "xor",
];
pub const PREFIX_OPERATORS: [&str; 2] = ["-", "not"];
pub const CHOOSER_GRID: usize = 6;
