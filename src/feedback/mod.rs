//! Structured Feedback Module
//!
//! Machine-readable summary of a resolving pass:
//! - counters per outcome
//! - the references that stayed unresolved, by name and symbol

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::Project;
use crate::resolve::ResolveStats;
use crate::types::SymbolId;
use crate::utils::Result;

// ==================== Resolve Report ====================

/// Report of one resolving pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveReport {
    /// Project name
    pub project: String,

    /// Counters from the pass
    pub stats: ResolveStats,

    /// Distinct references still rendering their written name
    pub unresolved: Vec<UnresolvedReference>,
}

/// A reference with no documented target
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnresolvedReference {
    pub name: String,
    #[serde(rename = "symbolID")]
    pub symbol_id: SymbolId,
}

impl ResolveReport {
    /// Build the report after the resolving pass has run
    pub fn new(project: &Project, stats: ResolveStats) -> Self {
        let unresolved: BTreeSet<UnresolvedReference> = project
            .references()
            .into_iter()
            .filter(|reference| !reference.is_resolved())
            .map(|reference| UnresolvedReference {
                name: reference.name().to_string(),
                symbol_id: reference.symbol_id(),
            })
            .collect();

        Self {
            project: project.name().to_string(),
            stats,
            unresolved: unresolved.into_iter().collect(),
        }
    }

    /// Whether every reference found its target
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Output as JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Output as compact JSON (for programmatic use)
    pub fn to_json_compact(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
