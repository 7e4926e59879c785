use crate::error::{Error, Result};
use crate::placeholder::CharTest;
use serde_json::Value as JsonValue;

/// One element of an explicit mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskElement {
    /// Rendered verbatim, one literal slot per character.
    Literal(String),
    Test(CharTest),
}

impl MaskElement {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Element from a regex source. A source that does not parse degrades to a
    /// literal of the source text.
    pub fn pattern(source: &str) -> Self {
        match CharTest::new(source) {
            Ok(test) => Self::Test(test),
            Err(err) => {
                log::warn!("mask element /{source}/ is not a valid regex, using it as literal text: {err}");
                Self::Literal(source.to_string())
            }
        }
    }
}

impl From<CharTest> for MaskElement {
    fn from(test: CharTest) -> Self {
        Self::Test(test)
    }
}

impl From<&str> for MaskElement {
    fn from(text: &str) -> Self {
        Self::Literal(text.to_string())
    }
}

impl From<char> for MaskElement {
    fn from(ch: char) -> Self {
        Self::Literal(ch.to_string())
    }
}

/// A mask as supplied by the integration layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskSpec {
    /// Placeholder pattern such as `##.##.####`, resolved through a placeholder table.
    Pattern(String),
    /// Pre-built sequence of literals and single-character tests.
    Elements(Vec<MaskElement>),
}

impl MaskSpec {
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::Pattern(pattern.into())
    }

    pub fn elements<I, E>(elements: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<MaskElement>,
    {
        Self::Elements(elements.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Pattern(pattern) => pattern.is_empty(),
            Self::Elements(elements) => elements.is_empty(),
        }
    }

    /// Reads a mask from JSON: a string is a pattern; an array holds literal
    /// strings and `{"pattern": "<regex>"}` objects. Other shapes are rejected.
    pub fn from_json(value: &JsonValue) -> Result<Self> {
        match value {
            JsonValue::String(pattern) => Ok(Self::Pattern(pattern.clone())),
            JsonValue::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| element_from_json(index, item))
                .collect::<Result<Vec<_>>>()
                .map(Self::Elements),
            other => Err(Error::InvalidMaskSpec(json_kind(other))),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(text)?;
        Self::from_json(&value)
    }

    pub(crate) fn cache_key(&self) -> CacheKey {
        match self {
            Self::Pattern(pattern) => CacheKey::Pattern(pattern.clone()),
            Self::Elements(elements) => CacheKey::Elements(
                elements
                    .iter()
                    .map(|element| match element {
                        MaskElement::Literal(text) => KeyPart::Literal(text.clone()),
                        MaskElement::Test(test) => KeyPart::Test(test.as_str().to_string()),
                    })
                    .collect(),
            ),
        }
    }
}

impl From<&str> for MaskSpec {
    fn from(pattern: &str) -> Self {
        Self::Pattern(pattern.to_string())
    }
}

impl From<String> for MaskSpec {
    fn from(pattern: String) -> Self {
        Self::Pattern(pattern)
    }
}

impl From<Vec<MaskElement>> for MaskSpec {
    fn from(elements: Vec<MaskElement>) -> Self {
        Self::Elements(elements)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum KeyPart {
    Literal(String),
    Test(String),
}

/// Identity of a mask's literal value, used to key compiled masks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum CacheKey {
    Pattern(String),
    Elements(Vec<KeyPart>),
}

fn element_from_json(index: usize, item: &JsonValue) -> Result<MaskElement> {
    match item {
        JsonValue::String(text) => Ok(MaskElement::Literal(text.clone())),
        JsonValue::Object(map) => match map.get("pattern") {
            Some(JsonValue::String(source)) => Ok(MaskElement::pattern(source)),
            Some(other) => Err(Error::InvalidMaskElement {
                index,
                reason: format!("\"pattern\" must be a string, got {}", json_kind(other)),
            }),
            None => Err(Error::InvalidMaskElement {
                index,
                reason: "object elements need a \"pattern\" field".to_string(),
            }),
        },
        other => Err(Error::InvalidMaskElement {
            index,
            reason: format!("expected a string or an object, got {}", json_kind(other)),
        }),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::{MaskElement, MaskSpec};
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn json_string_is_a_pattern() {
        let spec = MaskSpec::from_json(&json!("##-##")).expect("spec");
        assert_eq!(spec, MaskSpec::pattern("##-##"));
    }

    #[test]
    fn json_array_mixes_literals_and_patterns() {
        let spec = MaskSpec::from_json(&json!(["(", {"pattern": r"\d"}, ") "])).expect("spec");
        let MaskSpec::Elements(elements) = spec else {
            panic!("expected elements");
        };
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0], MaskElement::literal("("));
        assert!(matches!(&elements[1], MaskElement::Test(test) if test.as_str() == r"\d"));
        assert_eq!(elements[2], MaskElement::literal(") "));
    }

    #[test]
    fn json_of_wrong_shape_fails_fast() {
        let err = MaskSpec::from_json(&json!(42)).expect_err("number is not a mask");
        assert!(matches!(err, Error::InvalidMaskSpec("a number")));

        let err = MaskSpec::from_json(&json!(["(", true])).expect_err("bool element");
        assert!(matches!(err, Error::InvalidMaskElement { index: 1, .. }));

        let err = MaskSpec::from_json(&json!([{"regex": "x"}])).expect_err("no pattern field");
        assert!(matches!(err, Error::InvalidMaskElement { index: 0, .. }));
    }

    #[test]
    fn malformed_pattern_element_degrades_to_literal() {
        let spec = MaskSpec::from_json(&json!([{"pattern": "[0-"}])).expect("spec");
        assert_eq!(spec, MaskSpec::elements([MaskElement::literal("[0-")]));
    }

    #[test]
    fn emptiness_covers_both_shapes() {
        assert!(MaskSpec::pattern("").is_empty());
        assert!(MaskSpec::Elements(Vec::new()).is_empty());
        assert!(!MaskSpec::pattern("#").is_empty());
    }

    #[test]
    fn cache_key_tracks_literal_value() {
        let a = MaskSpec::from_json_str(r#"["(", {"pattern": "\\d"}]"#).expect("spec");
        let b = MaskSpec::from_json_str(r#"["(", {"pattern": "\\d"}]"#).expect("spec");
        let c = MaskSpec::from_json_str(r#"["(", {"pattern": "[0-9]"}]"#).expect("spec");
        assert_eq!(a.cache_key(), b.cache_key());
        assert_ne!(a.cache_key(), c.cache_key());
        assert_ne!(MaskSpec::pattern("(").cache_key(), MaskSpec::elements(["("]).cache_key());
    }
}
