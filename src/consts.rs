// Floating point comparisons
pub const FEQ_EPSILON: f64 = 0.00001;

// Runtime defaults for the built-in scene
pub const CANVAS_WIDTH: usize = 100;
pub const CANVAS_HEIGHT: usize = 100;
pub const OUT_FILE: &'static str = "./out.ppm";

// Where the virtual wall sits, and how large it is
pub const WALL_Z: f64 = 10.0;
pub const WALL_SIZE: f64 = 7.0;

// PPM output
pub const PPM_MAX_COLOR: usize = 255;
pub const PPM_LINE_WIDTH: usize = 70;
