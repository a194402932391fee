//! Project: the documentation model of one run
//!
//! [`ProjectBuilder`] is filled during traversal; [`Project`] is the frozen
//! result the resolving pass and the serializers work on.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Reflection, ReflectionId, ReflectionObject};
use crate::resolve::{SymbolMapping, SymbolMappingBuilder};
use crate::types::{ReferenceType, SerializeOptions, SymbolId};
use crate::utils::Result;

/// Project under construction
#[derive(Debug)]
pub struct ProjectBuilder {
    name: String,
    reflections: Vec<Arc<Reflection>>,
    symbols: SymbolMappingBuilder,
}

impl ProjectBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reflections: Vec::new(),
            symbols: SymbolMappingBuilder::new(),
        }
    }

    /// Add a reflection. `build` receives the id the reflection must carry.
    pub fn add<F>(&mut self, build: F) -> Arc<Reflection>
    where
        F: FnOnce(ReflectionId) -> Reflection,
    {
        let id = ReflectionId(self.reflections.len());
        let reflection = Arc::new(build(id));
        debug_assert_eq!(reflection.id, id, "reflection built with a foreign id");
        self.reflections.push(Arc::clone(&reflection));
        reflection
    }

    /// Register the reflection created for a compiler symbol
    pub fn register(&mut self, symbol_id: SymbolId, reflection: &Arc<Reflection>) -> Result<()> {
        self.symbols.register(symbol_id, reflection)
    }

    pub fn symbols(&self) -> &SymbolMappingBuilder {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.reflections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reflections.is_empty()
    }

    /// Traversal is complete: freeze the model and its symbol table
    pub fn finish(self) -> Project {
        Project {
            name: self.name,
            reflections: self.reflections,
            symbols: self.symbols.finish(),
        }
    }
}

/// Complete documentation model
#[derive(Debug)]
pub struct Project {
    name: String,
    reflections: Vec<Arc<Reflection>>,
    symbols: SymbolMapping,
}

impl Project {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reflections(&self) -> &[Arc<Reflection>] {
        &self.reflections
    }

    pub fn get(&self, id: ReflectionId) -> Option<&Arc<Reflection>> {
        self.reflections.get(id.0)
    }

    /// Direct children of a reflection
    pub fn children(&self, id: ReflectionId) -> impl Iterator<Item = &Arc<Reflection>> {
        self.reflections
            .iter()
            .filter(move |reflection| reflection.parent == Some(id))
    }

    /// Top-level reflections
    pub fn roots(&self) -> impl Iterator<Item = &Arc<Reflection>> {
        self.reflections
            .iter()
            .filter(|reflection| reflection.parent.is_none())
    }

    pub fn symbol_mapping(&self) -> &SymbolMapping {
        &self.symbols
    }

    /// Every reference type held anywhere in the model
    pub fn references(&self) -> Vec<&ReferenceType> {
        let mut references = Vec::new();
        for reflection in &self.reflections {
            for ty in reflection.types() {
                ty.for_each_reference(&mut |reference| references.push(reference));
            }
        }
        references
    }

    pub fn to_object(&self, options: &SerializeOptions) -> ProjectObject {
        ProjectObject {
            name: self.name.clone(),
            reflections: self
                .reflections
                .iter()
                .map(|reflection| reflection.to_object(options))
                .collect(),
            symbol_mapping: self.symbols.entries(),
        }
    }
}

/// Serialized form of a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectObject {
    pub name: String,
    pub reflections: Vec<ReflectionObject>,
    /// Lets consumers turn a record's `symbolID` back into a reflection id
    pub symbol_mapping: BTreeMap<SymbolId, ReflectionId>,
}

impl ProjectObject {
    /// Output as JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReflectionKind;
    use crate::types::Type;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> Project {
        let mut builder = ProjectBuilder::new("sample");
        let module = builder.add(|id| Reflection::new(id, "lib", ReflectionKind::Module));
        let foo = builder.add(|id| {
            Reflection::new(id, "Foo", ReflectionKind::Class).with_parent(Some(module.id))
        });
        builder.register(SymbolId(7), &foo).unwrap();
        builder.add(|id| {
            Reflection::new(id, "items", ReflectionKind::Property)
                .with_parent(Some(foo.id))
                .with_type(Some(
                    Type::reference(
                        ReferenceType::new("Map", SymbolId::NONE).with_type_arguments(vec![
                            Type::intrinsic("string"),
                            Type::reference(ReferenceType::new("Foo", SymbolId(7))),
                        ]),
                    ),
                ))
        });
        builder.finish()
    }

    #[test]
    fn test_ids_follow_insertion_order() {
        let project = sample();
        let names: Vec<(usize, &str)> = project
            .reflections()
            .iter()
            .map(|r| (r.id.0, r.name.as_str()))
            .collect();
        assert_eq!(names, vec![(0, "lib"), (1, "Foo"), (2, "items")]);
        assert_eq!(project.get(ReflectionId(1)).map(|r| r.name.as_str()), Some("Foo"));
        assert!(project.get(ReflectionId(9)).is_none());
    }

    #[test]
    fn test_children_and_roots() {
        let project = sample();
        let roots: Vec<&str> = project.roots().map(|r| r.name.as_str()).collect();
        assert_eq!(roots, vec!["lib"]);
        let children: Vec<&str> = project
            .children(ReflectionId(1))
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(children, vec!["items"]);
    }

    #[test]
    fn test_references_include_type_arguments() {
        let project = sample();
        let names: Vec<&str> = project.references().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Map", "Foo"]);
    }

    #[test]
    fn test_project_object() {
        let project = sample();
        let value = serde_json::to_value(project.to_object(&SerializeOptions::default())).unwrap();
        assert_eq!(value["name"], json!("sample"));
        assert_eq!(value["symbolMapping"], json!({ "7": 1 }));
        assert_eq!(
            value["reflections"][2]["type"],
            json!({ "isArray": false, "type": "reference", "name": "Map", "symbolID": -1 })
        );
    }

    #[test]
    fn test_project_object_round_trip() {
        let object = sample().to_object(&SerializeOptions::default());
        let decoded: ProjectObject = serde_json::from_str(&object.to_json().unwrap()).unwrap();
        assert_eq!(decoded, object);
    }
}
