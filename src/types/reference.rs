//! Reference types
//!
//! A reference type names another declaration (class, interface, enum or
//! alias) instead of describing structure inline:
//!
//! ```text
//! let value: MyClass;
//! ```
//!
//! The compiler front-end only hands us a symbol id for `MyClass` when the
//! reference is seen. The documentation object for it may not exist yet, or
//! may never exist (external libraries), so the target is bound later by the
//! resolving pass and rendering falls back to the written name.

use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use super::Type;
use crate::model::{Reflection, ReflectionRef};

/// Symbol id assigned by the compiler front-end.
///
/// Only meaningful within one compilation run. Negative values are
/// sentinels for references that cannot be resolved by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub i64);

impl SymbolId {
    /// No symbol was available for the reference (built-ins, externals).
    pub const NONE: Self = Self(-1);

    /// Check if this is a sentinel rather than a real symbol
    pub fn is_none(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Binding state of a reference type.
#[derive(Debug, Clone)]
pub enum Resolution {
    Unresolved,
    Resolved(Arc<Reflection>),
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// A type that refers to another reflection.
#[derive(Debug, Clone)]
pub struct ReferenceType {
    /// Name as written at the reference site. Used verbatim when the target
    /// is not part of the documentation.
    name: String,

    symbol_id: SymbolId,

    /// Generic arguments applied at the reference site, in order.
    type_arguments: Vec<Type>,

    /// Set at most once, by the resolving pass or at construction.
    target: OnceLock<ReflectionRef>,
}

impl ReferenceType {
    /// Create an unresolved reference
    pub fn new(name: impl Into<String>, symbol_id: SymbolId) -> Self {
        Self {
            name: name.into(),
            symbol_id,
            type_arguments: Vec::new(),
            target: OnceLock::new(),
        }
    }

    /// Create a reference whose target already exists.
    pub fn with_reflection(
        name: impl Into<String>,
        symbol_id: SymbolId,
        reflection: &Arc<Reflection>,
    ) -> Self {
        let reference = Self::new(name, symbol_id);
        reference.bind(reflection);
        reference
    }

    pub fn with_type_arguments(mut self, type_arguments: Vec<Type>) -> Self {
        self.type_arguments = type_arguments;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol_id(&self) -> SymbolId {
        self.symbol_id
    }

    pub fn type_arguments(&self) -> &[Type] {
        &self.type_arguments
    }

    /// Whether a live target is bound. Agrees with [`Self::resolution`].
    pub fn is_resolved(&self) -> bool {
        self.resolution().is_resolved()
    }

    /// Current binding state.
    ///
    /// A target whose project has already been dropped reads as unresolved,
    /// and the slot stays written, so the reference can never be rebound.
    pub fn resolution(&self) -> Resolution {
        match self.target.get().and_then(ReflectionRef::upgrade) {
            Some(reflection) => Resolution::Resolved(reflection),
            None => Resolution::Unresolved,
        }
    }

    /// Raw slot contents. Stays written after the target is dropped.
    pub fn target(&self) -> Option<&ReflectionRef> {
        self.target.get()
    }

    /// Bind the target. Returns `false` and leaves the existing target in
    /// place if the slot was already written.
    pub fn bind(&self, reflection: &Arc<Reflection>) -> bool {
        self.target.set(ReflectionRef::new(reflection)).is_ok()
    }

    /// Display name without the array suffix: the target's name if bound,
    /// otherwise the written name.
    pub fn display_name(&self) -> Cow<'_, str> {
        match self.resolution() {
            Resolution::Resolved(reflection) => Cow::Owned(reflection.name.clone()),
            Resolution::Unresolved => Cow::Borrowed(&self.name),
        }
    }
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}
