//! Symbol dump: declarations and type expressions as exported by the
//! compiler front-end.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::ReflectionKind;
use crate::types::{SymbolId, TypeObject};
use crate::utils::Result;

/// One front-end export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolDump {
    /// Project name
    pub name: String,
    /// Declarations in traversal order
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

/// A declaration found by the front-end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub kind: ReflectionKind,
    /// Absent for declarations nothing can refer to
    #[serde(rename = "symbolID", default, skip_serializing_if = "Option::is_none")]
    pub symbol_id: Option<SymbolId>,
    /// Index of an earlier declaration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<usize>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeObject>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<TypeObject>,
}

impl SymbolDump {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a dump from disk
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
