use std::path::Path;

use navmenu_error::Result;

use crate::config::{compute_max_sections_from_inputs, max_sections_from_env, EngineConfig};
use crate::engine::{MenuEngine, Presenter, SectionLoader};

/// Assembles a [`MenuEngine`].
///
/// Cache capacity precedence: [`with_max_sections`](Self::with_max_sections) >
/// `NAVMENU_MAX_SECTIONS` > config file > default.
#[derive(Default, Debug, Clone)]
pub struct MenuEngineBuilder {
    max_sections: Option<usize>,
    config: Option<EngineConfig>,
}

impl MenuEngineBuilder {
    /// Set an explicit capacity, overriding the environment and any config.
    pub fn with_max_sections(mut self, max_sections: usize) -> Self {
        self.max_sections = Some(max_sections);
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Reads the config from a TOML file.
    pub fn with_config_file(self, path: &Path) -> Result<Self> {
        let config = EngineConfig::load(path)?;
        Ok(self.with_config(config))
    }

    /// Capacity the built engine will use.
    pub fn effective_max_sections(&self) -> usize {
        compute_max_sections_from_inputs(self.max_sections, max_sections_from_env(), self.config.as_ref())
    }

    pub fn build<L, P>(self, loader: L, presenter: P) -> MenuEngine<L, P>
    where
        L: SectionLoader,
        P: Presenter,
    {
        let max_sections = self.effective_max_sections();
        tracing::debug!(max_sections, "menu engine built");
        MenuEngine::new(loader, presenter, max_sections)
    }
}
