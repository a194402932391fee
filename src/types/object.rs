//! Serialized form of type expressions
//!
//! The record for a reference type is
//! `{ "isArray": false, "type": "reference", "name": "Foo", "symbolID": 7 }`.
//! `type` is the discriminant shared by all variants, so decoding is a plain
//! match over [`TypeKindObject`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{ReferenceType, Resolution, SymbolId, Type, TypeKind};
use crate::model::{Reflection, ReflectionId};

/// Optional extras for the serialized form.
///
/// By default a reference record carries only its identifying fields.
/// Consumers recover cross-links through the project's symbol mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct SerializeOptions {
    /// Emit `typeArguments` on reference records
    pub type_arguments: bool,
    /// Emit the bound reflection's id as `target`
    pub targets: bool,
}

/// Common envelope of every serialized type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeObject {
    #[serde(rename = "isArray", default)]
    pub is_array: bool,
    #[serde(flatten)]
    pub kind: TypeKindObject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TypeKindObject {
    Intrinsic {
        name: String,
    },
    Reference {
        name: String,
        #[serde(rename = "symbolID")]
        symbol_id: SymbolId,
        #[serde(rename = "typeArguments", default, skip_serializing_if = "Option::is_none")]
        type_arguments: Option<Vec<TypeObject>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<ReflectionId>,
    },
    Union {
        types: Vec<TypeObject>,
    },
    Tuple {
        elements: Vec<TypeObject>,
    },
    Unknown {
        name: String,
    },
}

impl TypeObject {
    /// Discriminant of this record
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            TypeKindObject::Intrinsic { .. } => "intrinsic",
            TypeKindObject::Reference { .. } => "reference",
            TypeKindObject::Union { .. } => "union",
            TypeKindObject::Tuple { .. } => "tuple",
            TypeKindObject::Unknown { .. } => "unknown",
        }
    }
}

impl Type {
    /// Serialize with the default record shape
    pub fn to_object(&self) -> TypeObject {
        self.to_object_with(&SerializeOptions::default())
    }

    pub fn to_object_with(&self, options: &SerializeOptions) -> TypeObject {
        TypeObject {
            is_array: self.is_array,
            kind: self.kind.to_object_with(options),
        }
    }

    /// Rebuild an unresolved type from its record. A `target` in the record
    /// is ignored; binding is the resolving pass's job.
    pub fn from_object(object: &TypeObject) -> Self {
        Self::from_object_with(object, &mut |_| None)
    }

    /// Rebuild a type, binding references whose symbol `known` can already
    /// supply.
    pub fn from_object_with<F>(object: &TypeObject, known: &mut F) -> Self
    where
        F: FnMut(SymbolId) -> Option<Arc<Reflection>>,
    {
        let kind = match &object.kind {
            TypeKindObject::Intrinsic { name } => TypeKind::Intrinsic { name: name.clone() },
            TypeKindObject::Reference {
                name,
                symbol_id,
                type_arguments,
                ..
            } => {
                let arguments = type_arguments
                    .iter()
                    .flatten()
                    .map(|argument| Self::from_object_with(argument, known))
                    .collect();
                let reference = match known(*symbol_id) {
                    Some(reflection) => {
                        ReferenceType::with_reflection(name.clone(), *symbol_id, &reflection)
                    }
                    None => ReferenceType::new(name.clone(), *symbol_id),
                };
                TypeKind::Reference(reference.with_type_arguments(arguments))
            }
            TypeKindObject::Union { types } => TypeKind::Union(
                types.iter().map(|ty| Self::from_object_with(ty, known)).collect(),
            ),
            TypeKindObject::Tuple { elements } => TypeKind::Tuple(
                elements.iter().map(|ty| Self::from_object_with(ty, known)).collect(),
            ),
            TypeKindObject::Unknown { name } => TypeKind::Unknown { name: name.clone() },
        };
        Self {
            is_array: object.is_array,
            kind,
        }
    }
}

impl TypeKind {
    fn to_object_with(&self, options: &SerializeOptions) -> TypeKindObject {
        match self {
            Self::Intrinsic { name } => TypeKindObject::Intrinsic { name: name.clone() },
            Self::Reference(reference) => reference.to_object_with(options),
            Self::Union(types) => TypeKindObject::Union {
                types: types.iter().map(|ty| ty.to_object_with(options)).collect(),
            },
            Self::Tuple(elements) => TypeKindObject::Tuple {
                elements: elements.iter().map(|ty| ty.to_object_with(options)).collect(),
            },
            Self::Unknown { name } => TypeKindObject::Unknown { name: name.clone() },
        }
    }
}

impl ReferenceType {
    fn to_object_with(&self, options: &SerializeOptions) -> TypeKindObject {
        let emit_arguments = options.type_arguments && !self.type_arguments().is_empty();
        let type_arguments = emit_arguments.then(|| {
            self.type_arguments()
                .iter()
                .map(|argument| argument.to_object_with(options))
                .collect()
        });
        // Only the id: an inline reflection could contain this very reference.
        let target = match self.resolution() {
            Resolution::Resolved(reflection) if options.targets => Some(reflection.id),
            _ => None,
        };
        TypeKindObject::Reference {
            name: self.name().to_string(),
            symbol_id: self.symbol_id(),
            type_arguments,
            target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReflectionKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn foo_reference() -> Type {
        Type::reference(ReferenceType::new("Foo", SymbolId(7)))
    }

    #[test]
    fn test_reference_record_shape() {
        let value = serde_json::to_value(foo_reference().to_object()).unwrap();
        assert_eq!(
            value,
            json!({ "isArray": false, "type": "reference", "name": "Foo", "symbolID": 7 })
        );
    }

    #[test]
    fn test_record_omits_target_and_arguments_by_default() {
        let target = Arc::new(Reflection::new(ReflectionId(3), "Foo", ReflectionKind::Class));
        let reference = ReferenceType::with_reflection("Foo", SymbolId(7), &target)
            .with_type_arguments(vec![Type::intrinsic("string")]);
        let value = serde_json::to_value(Type::reference(reference).array().to_object()).unwrap();
        assert_eq!(
            value,
            json!({ "isArray": true, "type": "reference", "name": "Foo", "symbolID": 7 })
        );
    }

    #[test]
    fn test_record_with_extras() {
        let target = Arc::new(Reflection::new(ReflectionId(3), "Foo", ReflectionKind::Class));
        let reference = ReferenceType::with_reflection("Foo", SymbolId(7), &target)
            .with_type_arguments(vec![Type::intrinsic("string")]);
        let options = SerializeOptions {
            type_arguments: true,
            targets: true,
        };
        let value = serde_json::to_value(Type::reference(reference).to_object_with(&options)).unwrap();
        assert_eq!(
            value,
            json!({
                "isArray": false,
                "type": "reference",
                "name": "Foo",
                "symbolID": 7,
                "typeArguments": [{ "isArray": false, "type": "intrinsic", "name": "string" }],
                "target": 3
            })
        );
    }

    #[test]
    fn test_record_without_arguments_omits_key() {
        let options = SerializeOptions {
            type_arguments: true,
            targets: false,
        };
        let value = serde_json::to_value(foo_reference().to_object_with(&options)).unwrap();
        assert_eq!(
            value,
            json!({ "isArray": false, "type": "reference", "name": "Foo", "symbolID": 7 })
        );
    }

    #[test]
    fn test_record_round_trip() {
        let original = Type::reference(ReferenceType::new("Bar", SymbolId::NONE)).array();
        let text = serde_json::to_string(&original.to_object()).unwrap();
        let decoded: TypeObject = serde_json::from_str(&text).unwrap();

        assert_eq!(decoded.type_name(), "reference");
        assert_eq!(decoded, original.to_object());

        let rebuilt = Type::from_object(&decoded);
        assert!(rebuilt.is_array);
        let reference = rebuilt.as_reference().unwrap();
        assert_eq!(reference.name(), "Bar");
        assert_eq!(reference.symbol_id(), SymbolId::NONE);
        assert!(!reference.is_resolved());
        assert_eq!(rebuilt.to_string(), "Bar[]");
    }

    #[test]
    fn test_decode_sibling_variants() {
        let decoded: TypeObject = serde_json::from_value(json!({
            "type": "union",
            "types": [
                { "type": "intrinsic", "name": "string" },
                { "type": "reference", "name": "Foo", "symbolID": 7, "isArray": true }
            ]
        }))
        .unwrap();
        assert!(!decoded.is_array);
        assert_eq!(decoded.type_name(), "union");
        assert_eq!(Type::from_object(&decoded).to_string(), "string | Foo[]");
    }

    #[test]
    fn test_decode_with_type_arguments() {
        let decoded: TypeObject = serde_json::from_value(json!({
            "type": "reference",
            "name": "Promise",
            "symbolID": 12,
            "typeArguments": [{ "type": "reference", "name": "Foo", "symbolID": 7 }]
        }))
        .unwrap();
        let rebuilt = Type::from_object(&decoded);
        let reference = rebuilt.as_reference().unwrap();
        assert_eq!(reference.type_arguments().len(), 1);
        assert_eq!(reference.type_arguments()[0].to_string(), "Foo");
    }

    #[test]
    fn test_from_object_binds_known_symbols() {
        let target = Arc::new(Reflection::new(ReflectionId(0), "Resolved", ReflectionKind::Interface));
        let object = foo_reference().to_object();
        let rebuilt = Type::from_object_with(&object, &mut |id| {
            (id == SymbolId(7)).then(|| Arc::clone(&target))
        });
        assert_eq!(rebuilt.to_string(), "Resolved");
    }

    #[test]
    fn test_unknown_type_tag_is_rejected() {
        let result: Result<TypeObject, _> =
            serde_json::from_value(json!({ "type": "mapped", "name": "X" }));
        assert!(result.is_err());
    }
}
