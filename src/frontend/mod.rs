//! Front-end input for refdoc
//!
//! The compiler front-end is an external tool; this module reads what it
//! exports and turns it into a [`crate::model::ProjectBuilder`].

pub mod converter;
pub mod dump;

pub use converter::Converter;
pub use dump::{Declaration, SymbolDump};
