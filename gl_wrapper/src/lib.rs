/// Full-viewport quad as a 4-vertex triangle strip.
#[rustfmt::skip]
pub const QUAD: [f32; 8] = [
    -1.0, -1.0,
    -1.0, 1.0,
    1.0, -1.0,
    1.0, 1.0,
];

pub mod geometry;
pub mod program;
pub mod renderer;
