use std::io;

use serde::Deserialize;

/// Options recognized by the list transformer.
///
/// Values are trusted as provided by the caller; absent fields fall back to
/// the documented defaults (tasks disabled, strict sub-list indentation, no
/// enhanced styling).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Render GitHub-style task-list checkboxes `- [ ]` / `- [x]`.
    pub task_lists: bool,
    /// Use the legacy sub-list indentation policy: an item ends only at a
    /// marker line whose leading whitespace exactly matches the current
    /// item's indentation, reproducing pre-4-space-rule behavior.
    pub legacy_sublist_indentation: bool,
    /// Add a completed-task class to checked task items.
    pub enhanced_styling: bool,
}

impl Config {
    /// Parse configuration from a TOML fragment.
    pub fn from_toml(s: &str) -> io::Result<Config> {
        toml::from_str::<Config>(s)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("invalid config: {e}")))
    }
}

#[derive(Default, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn task_lists(mut self, enabled: bool) -> Self {
        self.config.task_lists = enabled;
        self
    }

    pub fn legacy_sublist_indentation(mut self, enabled: bool) -> Self {
        self.config.legacy_sublist_indentation = enabled;
        self
    }

    pub fn enhanced_styling(mut self, enabled: bool) -> Self {
        self.config.enhanced_styling = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
