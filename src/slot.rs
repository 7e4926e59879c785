use crate::placeholder::CharTest;
use std::fmt;
use std::ops::Deref;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// Always rendered; an equal input character is consumed instead of duplicated.
    Literal(char),
    Pattern { test: CharTest, optional: bool },
}

impl Slot {
    pub fn pattern(test: CharTest) -> Self {
        Self::Pattern {
            test,
            optional: false,
        }
    }

    pub fn optional(test: CharTest) -> Self {
        Self::Pattern {
            test,
            optional: true,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(ch) => write!(f, "literal {ch:?}"),
            Self::Pattern {
                test,
                optional: false,
            } => write!(f, "pattern {test}"),
            Self::Pattern {
                test,
                optional: true,
            } => write!(f, "optional {test}"),
        }
    }
}

/// Ordered slot sequence produced by the compiler. Order is fixed once built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompiledMask {
    slots: Vec<Slot>,
}

impl CompiledMask {
    pub fn new(slots: Vec<Slot>) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[Slot] {
        self.slots.as_slice()
    }
}

impl Deref for CompiledMask {
    type Target = [Slot];

    fn deref(&self) -> &Self::Target {
        self.slots()
    }
}
