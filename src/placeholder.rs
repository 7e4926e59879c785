use indexmap::IndexMap;
use regex::Regex;
use std::fmt;

const DIGIT: &str = "[0-9]";
const ALPHA: &str = "(?i)[a-z]";
const ALNUM: &str = "(?i)[a-z0-9]";
const ANY: &str = ".";

/// A single-character acceptance test.
///
/// A character is accepted when the regex matches the one-character string made
/// of it. The regex is not anchored, so `\d`, `[A-Z]` and `(6|7)` all work as
/// written.
#[derive(Debug, Clone)]
pub struct CharTest {
    re: Regex,
}

impl CharTest {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            re: Regex::new(pattern)?,
        })
    }

    /// Test accepting exactly `ch`, with regex metacharacters escaped.
    pub fn exact(ch: char) -> Result<Self, regex::Error> {
        let mut buf = [0u8; 4];
        Self::new(regex::escape(ch.encode_utf8(&mut buf)).as_str())
    }

    pub fn accepts(&self, ch: char) -> bool {
        let mut buf = [0u8; 4];
        self.re.is_match(ch.encode_utf8(&mut buf))
    }

    pub fn as_str(&self) -> &str {
        self.re.as_str()
    }
}

impl PartialEq for CharTest {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for CharTest {}

impl fmt::Display for CharTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.as_str())
    }
}

impl From<Regex> for CharTest {
    fn from(re: Regex) -> Self {
        Self { re }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    Test(CharTest),
    /// Makes the slot that follows it optional; never emitted as a slot itself.
    OptionalMarker,
}

/// Maps display characters of string masks to what they stand for.
///
/// Characters missing from the table are literals. The table is set up once per
/// masking context and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderTable {
    entries: IndexMap<char, Placeholder>,
}

impl PlaceholderTable {
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Built-in defaults: `#` digit, `A` letter, `N` alphanumeric, `X` any
    /// character, `?` optional marker.
    pub fn builtin() -> Self {
        Self::empty()
            .with_placeholder('#', builtin_test(DIGIT))
            .with_placeholder('A', builtin_test(ALPHA))
            .with_placeholder('N', builtin_test(ALNUM))
            .with_placeholder('X', builtin_test(ANY))
            .with_optional_marker('?')
    }

    pub fn with_placeholder(mut self, ch: char, test: CharTest) -> Self {
        self.insert(ch, Placeholder::Test(test));
        self
    }

    pub fn with_optional_marker(mut self, ch: char) -> Self {
        self.insert(ch, Placeholder::OptionalMarker);
        self
    }

    /// Shallow-merges `overrides` over this table. `None` removes the entry, so
    /// the character turns back into a literal.
    pub fn with_overrides<I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (char, Option<Placeholder>)>,
    {
        for (ch, placeholder) in overrides {
            match placeholder {
                Some(placeholder) => {
                    self.insert(ch, placeholder);
                }
                None => {
                    self.remove(ch);
                }
            }
        }
        self
    }

    pub fn insert(&mut self, ch: char, placeholder: Placeholder) -> Option<Placeholder> {
        self.entries.insert(ch, placeholder)
    }

    pub fn remove(&mut self, ch: char) -> Option<Placeholder> {
        self.entries.shift_remove(&ch)
    }

    pub fn get(&self, ch: char) -> Option<&Placeholder> {
        self.entries.get(&ch)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &Placeholder)> {
        self.entries.iter().map(|(ch, placeholder)| (*ch, placeholder))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PlaceholderTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_test(pattern: &'static str) -> CharTest {
    CharTest::new(pattern).expect("built-in placeholder pattern must compile")
}

#[cfg(test)]
mod tests {
    use super::{CharTest, Placeholder, PlaceholderTable};

    #[test]
    fn builtin_table_resolves_default_placeholders() {
        let table = PlaceholderTable::default();
        let Some(Placeholder::Test(digit)) = table.get('#') else {
            panic!("'#' should be a test");
        };
        assert!(digit.accepts('7'));
        assert!(!digit.accepts('a'));
        assert!(!digit.accepts('٣'));

        let Some(Placeholder::Test(alpha)) = table.get('A') else {
            panic!("'A' should be a test");
        };
        assert!(alpha.accepts('q'));
        assert!(alpha.accepts('Q'));
        assert!(!alpha.accepts('1'));

        assert_eq!(table.get('?'), Some(&Placeholder::OptionalMarker));
        assert_eq!(table.get('-'), None);
    }

    #[test]
    fn overrides_add_replace_and_remove_entries() {
        let upper = CharTest::new("[A-Z]").expect("regex");
        let table = PlaceholderTable::default().with_overrides([
            ('#', None),
            ('u', Some(Placeholder::Test(upper.clone()))),
            ('A', Some(Placeholder::OptionalMarker)),
        ]);

        assert_eq!(table.get('#'), None);
        assert_eq!(table.get('u'), Some(&Placeholder::Test(upper)));
        assert_eq!(table.get('A'), Some(&Placeholder::OptionalMarker));
        assert!(table.get('N').is_some());
    }

    #[test]
    fn exact_test_escapes_metacharacters() {
        for ch in ['^', '$', '.', '|', '?', '*', '+', '(', ')', '[', ']', '{', '}', '\\'] {
            let test = CharTest::exact(ch).expect("escaped char should compile");
            assert!(test.accepts(ch), "{ch:?} should accept itself");
            assert!(!test.accepts('a'), "{ch:?} should reject other chars");
        }
    }

    #[test]
    fn tests_compare_by_source() {
        let a = CharTest::new(r"\d").expect("regex");
        let b = CharTest::new(r"\d").expect("regex");
        let c = CharTest::new("[0-9]").expect("regex");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_string(), r"/\d/");
    }

    #[test]
    fn unicode_classes_accept_cyrillic() {
        let test = CharTest::new(r"[\wа-яА-Я]").expect("regex");
        assert!(test.accepts('Д'));
        assert!(test.accepts('р'));
        assert!(!test.accepts(' '));
    }
}
