// crates/locodb-core/src/config.rs
use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: usize = 10;
pub const DEFAULT_MAX_EDIT_DISTANCE: u32 = 2;
pub const DEFAULT_MIN_FUZZY_TOKEN_CHARS: usize = 3;
pub const DEFAULT_MAX_QUERY_CHARS: usize = 512;

/// Knobs for a single search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of distinct locations returned. Must be at least 1.
    pub limit: usize,
    /// Per-token Levenshtein budget.
    pub max_edit_distance: u32,
    /// Tokens shorter than this (on either side) only match exactly.
    pub min_fuzzy_token_chars: usize,
    /// Longer query text is rejected.
    pub max_query_chars: usize,
    /// English stop words only match exactly and never make up a match on
    /// their own, nor are they tried as codes.
    pub stop_words: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            min_fuzzy_token_chars: DEFAULT_MIN_FUZZY_TOKEN_CHARS,
            max_query_chars: DEFAULT_MAX_QUERY_CHARS,
            stop_words: true,
        }
    }
}

impl SearchConfig {
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::new()
    }
}

/// Builder for creating search configurations with ergonomic defaults
#[derive(Debug, Clone, Default)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    /// Exact matches only.
    pub fn exact() -> Self {
        Self::new().max_edit_distance(0)
    }

    /// Set the maximum number of results to return
    pub fn limit(mut self, limit: usize) -> Self {
        self.config.limit = limit;
        self
    }

    pub fn max_edit_distance(mut self, distance: u32) -> Self {
        self.config.max_edit_distance = distance;
        self
    }

    pub fn min_fuzzy_token_chars(mut self, chars: usize) -> Self {
        self.config.min_fuzzy_token_chars = chars;
        self
    }

    pub fn max_query_chars(mut self, chars: usize) -> Self {
        self.config.max_query_chars = chars;
        self
    }

    pub fn stop_words(mut self, enabled: bool) -> Self {
        self.config.stop_words = enabled;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> SearchConfig {
        self.config
    }
}
