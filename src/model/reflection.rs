//! Reflections: the documentation objects for analyzed declarations

use std::fmt;
use std::sync::{Arc, Weak};

use serde::{Deserialize, Serialize};

use crate::types::{SerializeOptions, Type, TypeObject};

/// Index of a reflection in its project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReflectionId(pub usize);

impl fmt::Display for ReflectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of declaration a reflection documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReflectionKind {
    Module,
    Class,
    Interface,
    Enum,
    TypeAlias,
    Function,
    Variable,
    Property,
    Method,
}

impl ReflectionKind {
    /// Check if a reference type may point at this kind
    pub fn is_type_declaration(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Interface | Self::Enum | Self::TypeAlias
        )
    }
}

/// Documentation object for one declaration.
///
/// Immutable once added to a project. The reference types it holds are
/// bound through their own write-once slots.
#[derive(Debug)]
pub struct Reflection {
    pub id: ReflectionId,
    /// Display name
    pub name: String,
    pub kind: ReflectionKind,
    pub parent: Option<ReflectionId>,
    /// Declared type (variables, properties, aliases)
    pub ty: Option<Type>,
    /// Heritage clause types (`extends`, `implements`)
    pub extended_types: Vec<Type>,
}

impl Reflection {
    pub fn new(id: ReflectionId, name: impl Into<String>, kind: ReflectionKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            parent: None,
            ty: None,
            extended_types: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent: Option<ReflectionId>) -> Self {
        self.parent = parent;
        self
    }

    pub fn with_type(mut self, ty: Option<Type>) -> Self {
        self.ty = ty;
        self
    }

    pub fn with_extended_types(mut self, extended_types: Vec<Type>) -> Self {
        self.extended_types = extended_types;
        self
    }

    /// All type expressions held directly by this reflection
    pub fn types(&self) -> impl Iterator<Item = &Type> {
        self.ty.iter().chain(self.extended_types.iter())
    }

    pub fn to_object(&self, options: &SerializeOptions) -> ReflectionObject {
        ReflectionObject {
            id: self.id,
            name: self.name.clone(),
            kind: self.kind,
            parent: self.parent,
            ty: self.ty.as_ref().map(|ty| ty.to_object_with(options)),
            extended_types: self
                .extended_types
                .iter()
                .map(|ty| ty.to_object_with(options))
                .collect(),
        }
    }
}

/// Serialized form of a reflection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionObject {
    pub id: ReflectionId,
    pub name: String,
    pub kind: ReflectionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ReflectionId>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeObject>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extended_types: Vec<TypeObject>,
}

/// Non-owning handle to a bound target.
///
/// Reflections own their types, so an owning handle would form a cycle for
/// every self-referencing declaration.
#[derive(Debug, Clone)]
pub struct ReflectionRef {
    id: ReflectionId,
    reflection: Weak<Reflection>,
}

impl ReflectionRef {
    pub fn new(reflection: &Arc<Reflection>) -> Self {
        Self {
            id: reflection.id,
            reflection: Arc::downgrade(reflection),
        }
    }

    pub fn id(&self) -> ReflectionId {
        self.id
    }

    /// The target, if its project is still alive
    pub fn upgrade(&self) -> Option<Arc<Reflection>> {
        self.reflection.upgrade()
    }
}
