use crate::error::{Error, Result};
use crate::placeholder::{CharTest, Placeholder, PlaceholderTable};
use crate::spec::{MaskElement, MaskSpec};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Masking setup, loaded from YAML or JSON.
///
/// ```yaml
/// placeholders:
///   "#": null                 # '#' becomes a literal
///   D: '\d'
///   "~": { optional: true }   # extra optional marker
/// masks:
///   phone: "(###) ###-####"
///   code: ["[", { pattern: '[A-F]' }, "]"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct MaskConfig {
    /// Overrides merged over the built-in placeholders; `null` removes an entry.
    pub placeholders: IndexMap<String, Option<PlaceholderConfig>>,
    /// Named masks.
    pub masks: IndexMap<String, MaskDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum PlaceholderConfig {
    /// Regex tested against a single character.
    Pattern(String),
    Marker { optional: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum MaskDefinition {
    Pattern(String),
    Elements(Vec<ElementDefinition>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ElementDefinition {
    Literal(String),
    Pattern { pattern: String },
}

impl MaskConfig {
    /// Loads a config file; `.json` files are read as JSON, anything else as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading mask config from {}", path.display());
        let text = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(text.as_str()),
            _ => Self::from_yaml_str(text.as_str()),
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Built-in placeholders with this config's overrides applied.
    ///
    /// Keys must be single characters. A pattern that does not compile removes
    /// the entry, leaving the character as a literal.
    pub fn placeholder_table(&self) -> Result<PlaceholderTable> {
        let overrides = self
            .placeholders
            .iter()
            .map(|(key, entry)| Ok((placeholder_key(key)?, resolve_placeholder(key, entry.as_ref()))))
            .collect::<Result<Vec<_>>>()?;
        Ok(PlaceholderTable::builtin().with_overrides(overrides))
    }

    pub fn mask_specs(&self) -> IndexMap<String, MaskSpec> {
        self.masks
            .iter()
            .map(|(name, definition)| (name.clone(), definition.to_spec()))
            .collect()
    }
}

impl MaskDefinition {
    pub fn to_spec(&self) -> MaskSpec {
        match self {
            Self::Pattern(pattern) => MaskSpec::pattern(pattern.as_str()),
            Self::Elements(elements) => MaskSpec::Elements(
                elements
                    .iter()
                    .map(|element| match element {
                        ElementDefinition::Literal(text) => MaskElement::literal(text.as_str()),
                        ElementDefinition::Pattern { pattern } => MaskElement::pattern(pattern),
                    })
                    .collect(),
            ),
        }
    }
}

fn placeholder_key(key: &str) -> Result<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(Error::InvalidPlaceholderKey(key.to_string())),
    }
}

fn resolve_placeholder(key: &str, entry: Option<&PlaceholderConfig>) -> Option<Placeholder> {
    match entry? {
        PlaceholderConfig::Pattern(pattern) => match CharTest::new(pattern) {
            Ok(test) => Some(Placeholder::Test(test)),
            Err(err) => {
                log::warn!("placeholder {key:?} has invalid pattern /{pattern}/, treating it as a literal: {err}");
                None
            }
        },
        PlaceholderConfig::Marker { optional: true } => Some(Placeholder::OptionalMarker),
        PlaceholderConfig::Marker { optional: false } => None,
    }
}
