use super::RuleDefinition;
use crate::error::RuleFormatError;
use std::fs;
use std::path::Path;

/// Encodes a rule definition as compact JSON text.
pub fn serialize_rule(rule: &RuleDefinition) -> Result<String, RuleFormatError> {
    Ok(serde_json::to_string(rule)?)
}

/// Decodes JSON text into a rule definition.
///
/// Malformed or mistyped input yields `None` so the caller can fall back to a
/// blank canvas. Partial data is never returned.
pub fn deserialize_rule(text: &str) -> Option<RuleDefinition> {
    match RuleDefinition::from_json(text) {
        Ok(rule) => Some(rule),
        Err(e) => {
            tracing::debug!(error = %e, "rejected stored rule definition");
            None
        }
    }
}

impl RuleDefinition {
    pub fn from_json(text: &str) -> Result<Self, RuleFormatError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, RuleFormatError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Saves the rule definition to a file as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RuleFormatError> {
        let path = path.as_ref();
        let text = self.to_json_pretty()?;
        fs::write(path, text).map_err(|source| RuleFormatError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Loads a rule definition from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RuleFormatError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| RuleFormatError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }
}
