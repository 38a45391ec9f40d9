//! Input documents handed over by the upstream extractor.
//!
//! ```json
//! {
//!   "holes": [{"type": "Auth", "constraint": "thread-safe"}],
//!   "relationships": [{"subject": "Auth", "predicate": "requires", "object": "Database"}]
//! }
//! ```
//!
//! Both keys are optional; `null` is treated the same as a missing list.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, instrument};

use crate::error::InputError;
use crate::model::{Relationship, TypedHole};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputDocument {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub holes: Vec<TypedHole>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub relationships: Vec<Relationship>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl InputDocument {
    /// Parse a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Parse`] for malformed JSON or unexpected shapes.
    pub fn from_json_str(text: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a document from `path`, or from stdin when `path` is `-`.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NotFound`] for a missing file, otherwise any
    /// read or parse failure.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let text = if path.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            if !path.exists() {
                return Err(InputError::NotFound(path.to_path_buf()));
            }
            std::fs::read_to_string(path)?
        };

        let doc = Self::from_json_str(&text)?;
        debug!(
            holes = doc.holes.len(),
            relationships = doc.relationships.len(),
            "loaded input document"
        );
        Ok(doc)
    }
}
