//! Startup errors
//!
//! Only configuration can fail. Rejected moves and unknown keys are ordinary
//! outcomes and never show up here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Cell size missing, non-numeric or not positive
    #[error("invalid cell size {raw:?}: expected a positive integer")]
    InvalidCellSize { raw: String },

    /// A required style variable was not defined on the document root
    #[error("style variable `{0}` is not defined")]
    MissingVariable(String),

    /// Viewport has a zero-sized axis (after any inset)
    #[error("invalid viewport {width}x{height}: both axes must be positive")]
    InvalidViewport { width: i64, height: i64 },

    /// Viewport is valid but the bound mode leaves no room for a single cell
    #[error("viewport {width}x{height} has no room for a {cell_size}px cell")]
    ViewportTooSmall {
        width: u32,
        height: u32,
        cell_size: u32,
    },

    /// Settings document could not be parsed
    #[error("malformed settings: {0}")]
    MalformedSettings(#[from] serde_json::Error),

    /// Browser globals (window, document, ...) are unavailable
    #[error("host unavailable: {0}")]
    HostUnavailable(String),
}
