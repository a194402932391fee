//! Symbol dump to documentation model converter
//!
//! Creates one reflection per declaration, in order, and registers each
//! declaration's symbol. References to symbols that are already registered
//! are bound on the spot; everything else is left for the resolving pass.

use std::sync::Arc;

use log::{debug, warn};

use super::{Declaration, SymbolDump};
use crate::model::{ProjectBuilder, Reflection, ReflectionId};
use crate::types::{Type, TypeKindObject, TypeObject};
use crate::utils::{Error, Result};

/// Converter from a symbol dump to a project
pub struct Converter {
    project: ProjectBuilder,
    /// Registrations rejected without aborting the conversion
    skipped: Vec<Error>,
}

impl Converter {
    fn new(project_name: impl Into<String>) -> Self {
        Self {
            project: ProjectBuilder::new(project_name),
            skipped: Vec::new(),
        }
    }

    /// Convert a whole dump. The returned builder still has to be finished
    /// before resolution.
    pub fn convert(dump: &SymbolDump) -> Result<ProjectBuilder> {
        let mut converter = Self::new(dump.name.clone());
        for (index, declaration) in dump.declarations.iter().enumerate() {
            converter.convert_declaration(index, declaration)?;
        }
        debug!(
            "converted {} declarations, {} symbols registered, {} registrations skipped",
            converter.project.len(),
            converter.project.symbols().len(),
            converter.skipped.len()
        );
        Ok(converter.project)
    }

    /// Convert a single declaration
    fn convert_declaration(&mut self, index: usize, declaration: &Declaration) -> Result<()> {
        if declaration.name.is_empty() {
            return Err(Error::EmptyName { index });
        }
        if let Some(parent) = declaration.parent {
            if parent >= index {
                return Err(Error::InvalidParent {
                    index,
                    name: declaration.name.clone(),
                    parent,
                });
            }
        }

        let ty = declaration
            .ty
            .as_ref()
            .map(|ty| self.convert_type(index, ty))
            .transpose()?;
        let extended_types = declaration
            .extends
            .iter()
            .map(|ty| self.convert_type(index, ty))
            .collect::<Result<Vec<_>>>()?;

        let reflection = self.project.add(|id| {
            Reflection::new(id, declaration.name.clone(), declaration.kind)
                .with_parent(declaration.parent.map(ReflectionId))
                .with_type(ty)
                .with_extended_types(extended_types)
        });

        if let Some(symbol_id) = declaration.symbol_id {
            if let Err(err) = self.project.register(symbol_id, &reflection) {
                if !err.is_recoverable() {
                    return Err(err);
                }
                warn!("{}: {}", declaration.name, err);
                self.skipped.push(err);
            }
        }
        Ok(())
    }

    /// Convert a type expression, binding references to symbols seen so far
    fn convert_type(&self, index: usize, object: &TypeObject) -> Result<Type> {
        if has_empty_reference_name(object) {
            return Err(Error::EmptyReferenceName { index });
        }
        let symbols = self.project.symbols();
        Ok(Type::from_object_with(object, &mut |symbol_id| {
            symbols.get(symbol_id).map(Arc::clone)
        }))
    }
}

fn has_empty_reference_name(object: &TypeObject) -> bool {
    match &object.kind {
        TypeKindObject::Reference {
            name,
            type_arguments,
            ..
        } => name.is_empty() || type_arguments.iter().flatten().any(has_empty_reference_name),
        TypeKindObject::Union { types } => types.iter().any(has_empty_reference_name),
        TypeKindObject::Tuple { elements } => elements.iter().any(has_empty_reference_name),
        TypeKindObject::Intrinsic { .. } | TypeKindObject::Unknown { .. } => false,
    }
}
