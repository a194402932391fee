//! Documentation model
//!
//! Reflections live in a per-run [`Project`] arena; nothing here is global,
//! so independent runs never see each other's symbols.

mod project;
mod reflection;

pub use project::{Project, ProjectBuilder, ProjectObject};
pub use reflection::{Reflection, ReflectionId, ReflectionKind, ReflectionObject, ReflectionRef};
