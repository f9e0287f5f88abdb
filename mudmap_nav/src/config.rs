// Data-driven navigation configuration.
//
// All tunable parameters for map rendering live in `NavConfig`, loaded from
// JSON by the host. Missing fields fall back to `Default`, so a host only
// has to spell out what it changes.
//
// `max_map_paths` is the hard cap on simple-path enumeration during map
// rendering. The hop cutoff alone does not bound the work on dense or
// cyclic neighborhoods, so the cap is always enforced.
//
// See also: `minimap.rs` which reads the viewport defaults and the path cap,
// `topography.rs` which owns the config.

use crate::error::{NavError, NavResult};
use serde::{Deserialize, Serialize};

/// Navigation and minimap parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Viewport width in display characters when a request leaves it unset.
    pub default_width: u32,
    /// Viewport height in rows when a request leaves it unset.
    pub default_height: u32,
    /// Map radius and grid size when a request leaves it unset.
    pub default_ttl: u32,
    /// Largest ttl a request may ask for. The grid holds `ttl * ttl` cells.
    pub max_ttl: u32,
    /// Upper bound on simple paths enumerated for one map render.
    pub max_map_paths: usize,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            default_width: 78,
            default_height: 45,
            default_ttl: 14,
            max_ttl: 64,
            max_map_paths: 4096,
        }
    }
}

impl NavConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> NavResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(NavError::ConfigParse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> NavResult<()> {
        if self.default_width == 0 || self.default_height == 0 {
            return Err(NavError::InvalidConfig {
                reason: format!(
                    "default viewport must be non-empty, got {}x{}",
                    self.default_width, self.default_height
                ),
            });
        }
        if self.default_ttl == 0 {
            return Err(NavError::InvalidConfig {
                reason: "default_ttl must be at least 1".into(),
            });
        }
        if self.max_ttl < self.default_ttl {
            return Err(NavError::InvalidConfig {
                reason: format!(
                    "max_ttl ({}) must be at least default_ttl ({})",
                    self.max_ttl, self.default_ttl
                ),
            });
        }
        if self.max_map_paths == 0 {
            return Err(NavError::InvalidConfig {
                reason: "max_map_paths must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(NavConfig::default().validate().is_ok());
    }

    #[test]
    fn default_config_serializes() {
        let config = NavConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let restored = NavConfig::from_json(&json).unwrap();
        assert_eq!(config, restored);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config = NavConfig::from_json(r#"{ "default_ttl": 8 }"#).unwrap();
        assert_eq!(config.default_ttl, 8);
        assert_eq!(config.default_width, NavConfig::default().default_width);
        assert_eq!(config.max_map_paths, NavConfig::default().max_map_paths);
    }

    #[test]
    fn zero_path_cap_is_rejected() {
        let err = NavConfig::from_json(r#"{ "max_map_paths": 0 }"#).unwrap_err();
        assert!(matches!(err, NavError::InvalidConfig { .. }));
    }

    #[test]
    fn zero_viewport_is_rejected() {
        let config = NavConfig {
            default_height: 0,
            ..NavConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn ttl_cap_below_default_is_rejected() {
        let err = NavConfig::from_json(r#"{ "default_ttl": 20, "max_ttl": 10 }"#).unwrap_err();
        assert!(matches!(err, NavError::InvalidConfig { .. }));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = NavConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, NavError::ConfigParse(_)));
    }
}
