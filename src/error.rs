// error.rs - Scene loading errors
//
// The tick itself cannot fail. Only turning outside input (JSON, equation
// strings) into a scene can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("reaction '{equation}' has no '->' or '<=>' arrow")]
    MissingArrow { equation: String },

    #[error("reaction '{equation}' has an empty side")]
    EmptySide { equation: String },

    #[error("term '{term}' in reaction '{equation}' is not a coefficient followed by a formula")]
    BadTerm { term: String, equation: String },

    #[error("term '{term}' in reaction '{equation}' has a zero coefficient")]
    ZeroCoefficient { term: String, equation: String },

    #[error("container {width}x{height} cannot hold particles of radius {radius}")]
    Container { width: f32, height: f32, radius: f32 },

    #[error("palette is full ({limit} species), cannot add '{formula}'")]
    PaletteFull { formula: String, limit: usize },

    #[error("{name} must be a finite, non-negative number (got {value})")]
    InvalidConstant { name: &'static str, value: f32 },
}
