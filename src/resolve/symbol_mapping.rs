//! Symbol id → reflection table
//!
//! Filled while the program is traversed, then frozen. Lookups are only
//! available on the frozen [`SymbolMapping`], so no reference can be resolved
//! against a half-built table.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use log::warn;

use crate::model::{Reflection, ReflectionId};
use crate::types::SymbolId;
use crate::utils::{Error, Result};

/// Table under construction
#[derive(Debug, Default)]
pub struct SymbolMappingBuilder {
    entries: HashMap<SymbolId, Arc<Reflection>>,
}

impl SymbolMappingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the reflection created for a symbol.
    ///
    /// The first registration of a symbol wins.
    pub fn register(&mut self, symbol_id: SymbolId, reflection: &Arc<Reflection>) -> Result<()> {
        if symbol_id.is_none() {
            return Err(Error::SentinelSymbol {
                reflection: reflection.id,
            });
        }
        if let Some(existing) = self.entries.get(&symbol_id) {
            warn!(
                "symbol {} already maps to {} ({}), ignoring {} ({})",
                symbol_id, existing.id, existing.name, reflection.id, reflection.name
            );
            return Err(Error::DuplicateSymbol {
                symbol_id,
                existing: existing.id,
            });
        }
        self.entries.insert(symbol_id, Arc::clone(reflection));
        Ok(())
    }

    /// Reflection registered so far for a symbol.
    ///
    /// Only a hit is meaningful here: a miss may still be registered later.
    pub fn get(&self, symbol_id: SymbolId) -> Option<&Arc<Reflection>> {
        self.entries.get(&symbol_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze the table
    pub fn finish(self) -> SymbolMapping {
        SymbolMapping {
            entries: self.entries,
        }
    }
}

/// Read-only table consulted by the resolving pass
#[derive(Debug, Default)]
pub struct SymbolMapping {
    entries: HashMap<SymbolId, Arc<Reflection>>,
}

impl SymbolMapping {
    pub fn lookup(&self, symbol_id: SymbolId) -> Option<&Arc<Reflection>> {
        self.entries.get(&symbol_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Symbol → reflection id pairs, ordered by symbol
    pub fn entries(&self) -> BTreeMap<SymbolId, ReflectionId> {
        self.entries
            .iter()
            .map(|(symbol_id, reflection)| (*symbol_id, reflection.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReflectionKind;
    use pretty_assertions::assert_eq;

    fn reflection(id: usize, name: &str) -> Arc<Reflection> {
        Arc::new(Reflection::new(ReflectionId(id), name, ReflectionKind::Class))
    }

    #[test]
    fn test_register_and_lookup() {
        let foo = reflection(0, "Foo");
        let mut builder = SymbolMappingBuilder::new();
        builder.register(SymbolId(42), &foo).unwrap();
        assert_eq!(builder.get(SymbolId(42)).map(|r| r.id), Some(ReflectionId(0)));

        let mapping = builder.finish();
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.lookup(SymbolId(42)).map(|r| r.name.as_str()), Some("Foo"));
        assert!(mapping.lookup(SymbolId(43)).is_none());
    }

    #[test]
    fn test_duplicate_registration_keeps_first() {
        let mut builder = SymbolMappingBuilder::new();
        builder.register(SymbolId(1), &reflection(0, "First")).unwrap();
        let err = builder.register(SymbolId(1), &reflection(1, "Second")).unwrap_err();

        assert!(matches!(
            err,
            Error::DuplicateSymbol { symbol_id: SymbolId(1), existing: ReflectionId(0) }
        ));
        assert!(err.is_recoverable());
        let mapping = builder.finish();
        assert_eq!(mapping.lookup(SymbolId(1)).map(|r| r.name.as_str()), Some("First"));
    }

    #[test]
    fn test_sentinel_is_never_registered() {
        let mut builder = SymbolMappingBuilder::new();
        let err = builder.register(SymbolId::NONE, &reflection(0, "Foo")).unwrap_err();
        assert!(matches!(err, Error::SentinelSymbol { reflection: ReflectionId(0) }));
        assert!(builder.is_empty());
        assert!(builder.finish().lookup(SymbolId::NONE).is_none());
    }

    #[test]
    fn test_entries_are_ordered() {
        let mut builder = SymbolMappingBuilder::new();
        builder.register(SymbolId(9), &reflection(0, "A")).unwrap();
        builder.register(SymbolId(3), &reflection(1, "B")).unwrap();
        let entries: Vec<_> = builder.finish().entries().into_iter().collect();
        assert_eq!(
            entries,
            vec![(SymbolId(3), ReflectionId(1)), (SymbolId(9), ReflectionId(0))]
        );
    }
}
