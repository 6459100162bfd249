// Floating point comparisons
pub const FEQ_EPSILON: f64 = 0.0001;

// A hit must be closer than the current best by more than this margin to
// replace it. Tuned empirically against self-intersection jitter.
pub const HIT_EPSILON: f64 = 0.0001;

// Maximum recursion depth; depths 0..=MAX_DEPTH are shaded
pub const MAX_DEPTH: usize = 3;

// Output parameters
pub const DEFAULT_OUTPUT: &str = "out.ppm";
pub const MAX_COLOR_VALUE: u8 = 255;
