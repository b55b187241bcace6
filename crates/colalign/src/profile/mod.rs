//! Column profiling: a fixed-shape summary of one column's values.
//!
//! Profiles are computed from non-missing cells only; missing cells are never
//! imputed. An empty column yields NaN statistics rather than an error.

mod numeric;
mod text;

use serde::{Deserialize, Serialize};

pub use numeric::NumericProfile;
pub use text::{TextProfile, TokenCount};

use crate::error::{AlignError, Result};
use crate::model::{Column, ColumnKind};

/// Default number of top tokens kept in a text profile.
pub const DEFAULT_TOP_K: usize = 8;

/// Profiler configuration.
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    /// Number of most frequent tokens kept for text columns.
    pub top_k: usize,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl ProfileConfig {
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(AlignError::Config("top_k must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Kind-specific part of a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProfileStats {
    Text(TextProfile),
    Numeric(NumericProfile),
}

/// Profile of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    /// Total cells, missing included.
    pub count: usize,
    /// Missing cells.
    pub missing: usize,
    pub stats: ProfileStats,
}

impl ColumnProfile {
    pub fn kind(&self) -> ColumnKind {
        match self.stats {
            ProfileStats::Text(_) => ColumnKind::Text,
            ProfileStats::Numeric(_) => ColumnKind::Numeric,
        }
    }

    /// True when the column had no non-missing cells.
    pub fn is_empty(&self) -> bool {
        self.count == self.missing
    }

    pub fn numeric(&self) -> Option<&NumericProfile> {
        match &self.stats {
            ProfileStats::Numeric(p) => Some(p),
            ProfileStats::Text(_) => None,
        }
    }

    pub fn text(&self) -> Option<&TextProfile> {
        match &self.stats {
            ProfileStats::Text(p) => Some(p),
            ProfileStats::Numeric(_) => None,
        }
    }
}

/// Computes column profiles.
#[derive(Debug, Clone, Default)]
pub struct Profiler {
    config: ProfileConfig,
}

impl Profiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProfileConfig) -> Self {
        Self { config }
    }

    pub fn profile(&self, column: &Column) -> ColumnProfile {
        let stats = match column.kind() {
            ColumnKind::Text => {
                ProfileStats::Text(TextProfile::from_cells(column.text_values(), self.config.top_k))
            }
            ColumnKind::Numeric => {
                ProfileStats::Numeric(NumericProfile::from_values(column.numeric_values()))
            }
        };

        ColumnProfile {
            name: column.name().to_string(),
            count: column.len(),
            missing: column.missing_count(),
            stats,
        }
    }
}

/// Profile a column with the default configuration.
pub fn profile(column: &Column) -> ColumnProfile {
    Profiler::new().profile(column)
}
