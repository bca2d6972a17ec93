//! Rules configuration.
//!
//! Tunable policy lives here rather than in the executors:
//! - `SearchPolicy`: how many deck cards a search offers for selection
//! - `ViewPolicy`: how masked cards are labelled in projected views
//! - `RulesConfig`: combines all configuration
//!
//! Configuration can be built in code with the `with_*` builders or read
//! from TOML. Missing keys fall back to the defaults.
//!
//! ```
//! use duel_rules::core::RulesConfig;
//!
//! let config = RulesConfig::from_toml_str(r#"
//!     [search]
//!     pool_multiplier = 2
//! "#).unwrap();
//!
//! assert_eq!(config.search.pool_size(3), 6);
//! assert_eq!(config.view.hidden_label, "hidden");
//! ```

use serde::{Deserialize, Serialize};

use super::error::Result;

/// Default number of search candidates offered per card to be chosen.
pub const DEFAULT_POOL_MULTIPLIER: usize = 3;

/// Default prefix of opaque placeholder IDs.
pub const DEFAULT_HIDDEN_LABEL: &str = "hidden";

/// How large a search candidate pool may be.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPolicy {
    /// Candidates offered per card the effect picks.
    pub pool_multiplier: usize,

    /// Hard cap on the pool regardless of target count. `None` for no cap.
    pub absolute_cap: Option<usize>,
}

impl SearchPolicy {
    /// Pool size for an effect that picks `target_count` cards.
    ///
    /// A target count of zero is treated as one.
    #[must_use]
    pub fn pool_size(&self, target_count: u32) -> usize {
        let wanted = self
            .pool_multiplier
            .saturating_mul(target_count.max(1) as usize);
        match self.absolute_cap {
            Some(cap) => wanted.min(cap),
            None => wanted,
        }
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            pool_multiplier: DEFAULT_POOL_MULTIPLIER,
            absolute_cap: None,
        }
    }
}

/// How projected views present masked cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewPolicy {
    /// Prefix of generated opaque IDs (`<label>-<seat>-<zone>-<index>`).
    pub hidden_label: String,
}

impl Default for ViewPolicy {
    fn default() -> Self {
        Self {
            hidden_label: DEFAULT_HIDDEN_LABEL.to_string(),
        }
    }
}

/// Complete rules configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Search executor policy.
    pub search: SearchPolicy,

    /// View projection policy.
    pub view: ViewPolicy,
}

impl RulesConfig {
    /// Create a configuration with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: RulesConfig = toml::from_str(text)?;
        Ok(config)
    }

    /// Set the search pool multiplier.
    #[must_use]
    pub fn with_pool_multiplier(mut self, multiplier: usize) -> Self {
        self.search.pool_multiplier = multiplier;
        self
    }

    /// Set an absolute cap on search pools.
    #[must_use]
    pub fn with_pool_cap(mut self, cap: usize) -> Self {
        self.search.absolute_cap = Some(cap);
        self
    }

    /// Set the placeholder label used in projected views.
    #[must_use]
    pub fn with_hidden_label(mut self, label: impl Into<String>) -> Self {
        self.view.hidden_label = label.into();
        self
    }
}
