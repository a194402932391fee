//! Run configuration
//!
//! Read from a JSON file; command-line flags can only switch options on.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::SerializeOptions;
use crate::utils::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Options {
    /// Run the resolving pass on the rayon pool
    pub parallel: bool,

    /// Extras for the serialized model
    pub serialize: SerializeOptions,
}

impl Options {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load options from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let options = Options::from_json("{}").unwrap();
        assert_eq!(options, Options::default());
        assert!(!options.parallel);
        assert!(!options.serialize.type_arguments);
        assert!(!options.serialize.targets);
    }

    #[test]
    fn test_partial_options() {
        let options =
            Options::from_json(r#"{ "parallel": true, "serialize": { "typeArguments": true } }"#)
                .unwrap();
        assert!(options.parallel);
        assert!(options.serialize.type_arguments);
        assert!(!options.serialize.targets);
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let result = Options::from_json(r#"{ "paralel": true }"#);
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
