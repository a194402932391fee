//! Reference resolution
//!
//! Two stages: traversal registers reflections in a
//! [`SymbolMappingBuilder`]; after [`SymbolMappingBuilder::finish`] the
//! [`Resolver`] binds every reference type against the frozen table.

mod resolver;
mod symbol_mapping;

pub use resolver::{Outcome, ResolveStats, Resolver};
pub use symbol_mapping::{SymbolMapping, SymbolMappingBuilder};
