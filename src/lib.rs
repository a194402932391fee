//! refdoc
//!
//! Reference types and symbol resolution for API documentation.
//!
//! A run has two stages. Traversal turns the front-end's declarations into
//! reflections and registers their symbols; every type reference it meets
//! becomes a [`types::ReferenceType`] carrying only a symbol id. Once the
//! whole program is known, the resolving pass binds each reference it can
//! to its reflection. References that cannot be bound keep rendering the
//! name they were written with.

pub mod config;
pub mod feedback;
pub mod frontend;
pub mod model;
pub mod resolve;
pub mod types;
pub mod utils;

pub use utils::{Error, Result};

use config::Options;
use frontend::{Converter, SymbolDump};
use model::Project;
use resolve::{ResolveStats, Resolver};

/// Convert a dump and run the resolving pass over it
pub fn document(dump: &SymbolDump, options: &Options) -> Result<(Project, ResolveStats)> {
    let project = Converter::convert(dump)?.finish();
    let resolver = Resolver::new(project.symbol_mapping());
    let stats = if options.parallel {
        resolver.par_resolve_project(&project)
    } else {
        resolver.resolve_project(&project)
    };
    Ok((project, stats))
}
