//! Resolving pass
//!
//! Runs once the whole program has been traversed and the symbol table is
//! frozen. Each reference type is looked up by symbol id and, on a hit,
//! bound to its reflection. A miss is not an error: the reference keeps
//! rendering its written name.

use log::{debug, info, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::SymbolMapping;
use crate::model::Project;
use crate::types::ReferenceType;

/// Result of one binding attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Bound by this attempt
    Resolved,
    /// Target was already set; left untouched
    AlreadyResolved,
    /// Symbol not in the table
    Unresolved,
    /// Sentinel id, no lookup possible
    NoSymbol,
}

/// Counters for a resolving pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveStats {
    pub resolved: usize,
    pub already_resolved: usize,
    pub unresolved: usize,
    pub no_symbol: usize,
}

impl ResolveStats {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Resolved => self.resolved += 1,
            Outcome::AlreadyResolved => self.already_resolved += 1,
            Outcome::Unresolved => self.unresolved += 1,
            Outcome::NoSymbol => self.no_symbol += 1,
        }
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            resolved: self.resolved + other.resolved,
            already_resolved: self.already_resolved + other.already_resolved,
            unresolved: self.unresolved + other.unresolved,
            no_symbol: self.no_symbol + other.no_symbol,
        }
    }

    /// Number of references visited
    pub fn total(&self) -> usize {
        self.resolved + self.already_resolved + self.unresolved + self.no_symbol
    }

    /// References left pointing nowhere after the pass
    pub fn dangling(&self) -> usize {
        self.unresolved + self.no_symbol
    }
}

/// Binds reference types against a frozen symbol table
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    symbols: &'a SymbolMapping,
}

impl<'a> Resolver<'a> {
    pub fn new(symbols: &'a SymbolMapping) -> Self {
        Self { symbols }
    }

    /// One binding attempt. Safe to repeat: a bound target never changes
    /// and a miss stays a miss.
    pub fn resolve(&self, reference: &ReferenceType) -> Outcome {
        if reference.is_resolved() {
            return Outcome::AlreadyResolved;
        }
        let symbol_id = reference.symbol_id();
        if symbol_id.is_none() {
            trace!("{}: no symbol id, keeping written name", reference.name());
            return Outcome::NoSymbol;
        }
        match self.symbols.lookup(symbol_id) {
            Some(reflection) => {
                if reference.bind(reflection) {
                    if !reflection.kind.is_type_declaration() {
                        debug!(
                            "{}: bound to a {:?}, not a type declaration",
                            reference.name(),
                            reflection.kind
                        );
                    }
                    debug!(
                        "{} (symbol {}) -> {} {}",
                        reference.name(),
                        symbol_id,
                        reflection.id,
                        reflection.name
                    );
                    Outcome::Resolved
                } else {
                    Outcome::AlreadyResolved
                }
            }
            None => {
                trace!("{}: symbol {} is not documented", reference.name(), symbol_id);
                Outcome::Unresolved
            }
        }
    }

    pub fn resolve_all<'r, I>(&self, references: I) -> ResolveStats
    where
        I: IntoIterator<Item = &'r ReferenceType>,
    {
        let mut stats = ResolveStats::default();
        for reference in references {
            stats.record(self.resolve(reference));
        }
        stats
    }

    /// Resolve every reference in the project
    pub fn resolve_project(&self, project: &Project) -> ResolveStats {
        let stats = self.resolve_all(project.references());
        log_summary(project, &stats);
        stats
    }

    /// Same as [`Resolver::resolve_project`], spread over the rayon pool.
    /// Each reference appears once in the work list and its slot is
    /// write-once, so workers never contend for a binding.
    pub fn par_resolve_project(&self, project: &Project) -> ResolveStats {
        let stats = project
            .references()
            .par_iter()
            .map(|reference| self.resolve(reference))
            .fold(ResolveStats::default, |mut stats, outcome| {
                stats.record(outcome);
                stats
            })
            .reduce(ResolveStats::default, ResolveStats::merge);
        log_summary(project, &stats);
        stats
    }
}

fn log_summary(project: &Project, stats: &ResolveStats) {
    info!(
        "{}: resolved {} of {} references ({} already bound, {} undocumented, {} without symbol)",
        project.name(),
        stats.resolved,
        stats.total(),
        stats.already_resolved,
        stats.unresolved,
        stats.no_symbol
    );
}
