//! Type expressions of the documentation model

use std::fmt;

use super::ReferenceType;

/// A type expression as it appears in a declaration.
///
/// `is_array` belongs to the envelope rather than to the variants, so every
/// variant renders and serializes it the same way.
#[derive(Debug, Clone)]
pub struct Type {
    /// Whether the expression denotes an array of the described type
    pub is_array: bool,
    pub kind: TypeKind,
}

/// The variants of a type expression
#[derive(Debug, Clone)]
pub enum TypeKind {
    /// Built-in type such as `string`, `number` or `void`
    Intrinsic { name: String },
    /// Points to another declaration
    Reference(ReferenceType),
    /// `A | B`
    Union(Vec<Type>),
    /// `[A, B]`
    Tuple(Vec<Type>),
    /// Text the front-end could not classify
    Unknown { name: String },
}

impl Type {
    pub fn new(kind: TypeKind) -> Self {
        Self { is_array: false, kind }
    }

    pub fn intrinsic(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Intrinsic { name: name.into() })
    }

    pub fn reference(reference: ReferenceType) -> Self {
        Self::new(TypeKind::Reference(reference))
    }

    pub fn union(types: Vec<Type>) -> Self {
        Self::new(TypeKind::Union(types))
    }

    pub fn tuple(elements: Vec<Type>) -> Self {
        Self::new(TypeKind::Tuple(elements))
    }

    pub fn unknown(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Unknown { name: name.into() })
    }

    /// Mark as an array of this type
    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    pub fn as_reference(&self) -> Option<&ReferenceType> {
        match &self.kind {
            TypeKind::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    /// Visit every reference type reachable from this expression, including
    /// type arguments and union/tuple members.
    pub fn for_each_reference<'a, F>(&'a self, f: &mut F)
    where
        F: FnMut(&'a ReferenceType),
    {
        match &self.kind {
            TypeKind::Reference(reference) => {
                f(reference);
                for argument in reference.type_arguments() {
                    argument.for_each_reference(f);
                }
            }
            TypeKind::Union(types) | TypeKind::Tuple(types) => {
                for ty in types {
                    ty.for_each_reference(f);
                }
            }
            TypeKind::Intrinsic { .. } | TypeKind::Unknown { .. } => {}
        }
    }

    /// Collect every reachable reference type
    pub fn references(&self) -> Vec<&ReferenceType> {
        let mut references = Vec::new();
        self.for_each_reference(&mut |reference| references.push(reference));
        references
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intrinsic { name } | Self::Unknown { name } => f.write_str(name),
            Self::Reference(reference) => write!(f, "{}", reference),
            Self::Union(types) => write_joined(f, types, " | "),
            Self::Tuple(elements) => {
                f.write_str("[")?;
                write_joined(f, elements, ", ")?;
                f.write_str("]")
            }
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_array {
            return write!(f, "{}", self.kind);
        }
        match self.kind {
            TypeKind::Union(_) => write!(f, "({})[]", self.kind),
            _ => write!(f, "{}[]", self.kind),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, types: &[Type], separator: &str) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", ty)?;
    }
    Ok(())
}
