//! Tile Walk - a tile-grid movement demo
//!
//! Core modules:
//! - `sim`: Grid generation and the discrete movement state machine
//! - `input`: Raw key codes to movement intents
//! - `config`: Cell size / viewport providers and runtime settings
//! - `renderer`: Renderer seam plus a text renderer for native builds
//! - `error`: Startup configuration errors

pub mod config;
pub mod error;
pub mod input;
pub mod renderer;
pub mod sim;

pub use config::{ConfigProvider, GameConfig, Settings, StaticConfig};
pub use error::ConfigError;
pub use input::{InputController, PreventDefault};
pub use sim::{Direction, Entity, GameState, Grid, MoveResult, Position};

/// Game configuration constants
pub mod consts {
    /// Cell size used when no style value overrides it (pixels)
    pub const DEFAULT_CELL_SIZE: u32 = 64;
    /// Play area used by the native build (pixels)
    pub const DEFAULT_VIEWPORT: (u32, u32) = (512, 512);
    /// Id of the single player entity
    pub const PLAYER_ID: u32 = 1;

    /// CSS custom property holding the cell size
    pub const CSS_CELL_SIZE_VAR: &str = "--game-core-size-cell";
    /// Settings document fetched at startup in the browser
    pub const SETTINGS_URL: &str = "config.json";
}
