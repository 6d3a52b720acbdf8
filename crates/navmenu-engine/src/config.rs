use std::path::Path;

use navmenu_error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Sections kept when nothing is configured.
pub const DEFAULT_MAX_SECTIONS: usize = 10;

/// Environment variable overriding the configured cache capacity.
pub const MAX_SECTIONS_ENV: &str = "NAVMENU_MAX_SECTIONS";

/// Engine settings, usually read from a `navmenu.toml`:
///
/// ```toml
/// max_sections = 16
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Soft bound on cached sections. Sections still loading are never evicted, so the
    /// cache can briefly hold more.
    pub max_sections: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_sections: DEFAULT_MAX_SECTIONS,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            DomainError::Config {
                message: format!("invalid engine config: {e}"),
            }
            .into()
        })
    }

    /// Load configuration from the specified path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DomainError::Config {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }
}

/// Effective cache capacity.
/// Precedence: builder override > env override > config file > default. Never below 1.
pub(crate) fn compute_max_sections_from_inputs(
    builder_override: Option<usize>,
    env_override: Option<usize>,
    config: Option<&EngineConfig>,
) -> usize {
    let chosen = builder_override
        .or(env_override)
        .or(config.map(|c| c.max_sections))
        .unwrap_or(DEFAULT_MAX_SECTIONS);
    chosen.max(1)
}

pub(crate) fn max_sections_from_env() -> Option<usize> {
    std::env::var(MAX_SECTIONS_ENV)
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
}
