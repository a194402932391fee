//! Type model for refdoc
//!
//! [`Type`] is the envelope every type expression shares; [`ReferenceType`]
//! is the variant that points to another declaration and is bound late by
//! the resolving pass.

mod object;
mod reference;
mod type_system;

pub use object::{SerializeOptions, TypeKindObject, TypeObject};
pub use reference::{ReferenceType, Resolution, SymbolId};
pub use type_system::{Type, TypeKind};
