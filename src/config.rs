//! Startup configuration
//!
//! Two layers: `GameConfig` holds the measured values (cell size and
//! viewport) and comes from a `ConfigProvider`; `Settings` holds behaviour
//! switches read from `config.json`.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CELL_SIZE, DEFAULT_VIEWPORT};
use crate::error::ConfigError;
use crate::input::{InputController, PreventDefault};
use crate::sim::{DirectionPolicy, Rules, UpperBound};

/// Measured values the grid is generated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub cell_size: u32,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            viewport_width: DEFAULT_VIEWPORT.0,
            viewport_height: DEFAULT_VIEWPORT.1,
        }
    }
}

/// Source of `GameConfig`, read once at startup
pub trait ConfigProvider {
    fn load(&self) -> Result<GameConfig, ConfigError>;
}

/// Fixed values, for native runs and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticConfig(pub GameConfig);

impl ConfigProvider for StaticConfig {
    fn load(&self) -> Result<GameConfig, ConfigError> {
        Ok(self.0)
    }
}

/// Parse a style value the way `parseInt` reads it: leading whitespace is
/// skipped, then the leading digits are taken and the rest (`px`, `.5`) is
/// ignored. Missing digits, zero and negative values are rejected.
pub fn parse_cell_size(raw: &str) -> Result<u32, ConfigError> {
    let invalid = || ConfigError::InvalidCellSize {
        raw: raw.to_string(),
    };

    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    let value: u32 = unsigned[..digits_end].parse().map_err(|_| invalid())?;
    if value == 0 || value > i32::MAX as u32 {
        return Err(invalid());
    }
    Ok(value)
}

/// Behaviour settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Deployment environment; `"dev"` turns on the grid overlay
    pub env: String,
    pub upper_bound: UpperBound,
    pub direction_policy: DirectionPolicy,
    pub prevent_default: PreventDefault,
    /// Rebuild the grid on window resize
    pub regenerate_on_resize: bool,
    /// Pixels trimmed from each viewport axis
    pub viewport_inset: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env: "prod".to_string(),
            upper_bound: UpperBound::Exclusive,
            direction_policy: DirectionPolicy::OnAccept,
            prevent_default: PreventDefault::All,
            regenerate_on_resize: false,
            viewport_inset: 0,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_dev(&self) -> bool {
        self.env == "dev"
    }

    pub fn rules(&self) -> Rules {
        Rules {
            upper_bound: self.upper_bound,
            direction_policy: self.direction_policy,
            regenerate_on_resize: self.regenerate_on_resize,
            viewport_inset: self.viewport_inset,
        }
    }

    pub fn input_controller(&self) -> InputController {
        InputController::new(self.prevent_default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell_size() {
        assert_eq!(parse_cell_size("64").unwrap(), 64);
        assert_eq!(parse_cell_size(" 32px").unwrap(), 32);
        assert_eq!(parse_cell_size("48.5px").unwrap(), 48);
        assert_eq!(parse_cell_size("+16").unwrap(), 16);
    }

    #[test]
    fn test_parse_cell_size_rejects_bad_values() {
        for raw in ["", "   ", "px", "abc", "0", "-64", "0px", "99999999999"] {
            let err = parse_cell_size(raw).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidCellSize { .. }),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_static_provider() {
        let config = StaticConfig::default().load().unwrap();
        assert_eq!(config.cell_size, 64);
        assert_eq!((config.viewport_width, config.viewport_height), (512, 512));
    }

    #[test]
    fn test_settings_defaults_from_empty_document() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!settings.is_dev());
        assert_eq!(settings.rules(), Rules::default());
    }

    #[test]
    fn test_settings_from_json() {
        let settings = Settings::from_json(
            r#"{
                "env": "dev",
                "upper_bound": "inclusive",
                "direction_policy": "always",
                "prevent_default": "arrows",
                "regenerate_on_resize": true,
                "viewport_inset": 150
            }"#,
        )
        .unwrap();
        assert!(settings.is_dev());
        let rules = settings.rules();
        assert_eq!(rules.upper_bound, UpperBound::Inclusive);
        assert_eq!(rules.direction_policy, DirectionPolicy::Always);
        assert!(rules.regenerate_on_resize);
        assert_eq!(rules.viewport_inset, 150);
        assert_eq!(settings.input_controller().policy(), PreventDefault::Arrows);
    }

    #[test]
    fn test_settings_rejects_unknown_fields() {
        let err = Settings::from_json(r#"{"cell_size": 64}"#).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedSettings(_)));
    }
}
