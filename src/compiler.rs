use crate::placeholder::{CharTest, Placeholder, PlaceholderTable};
use crate::slot::{CompiledMask, Slot};
use crate::spec::{MaskElement, MaskSpec};

/// Compiles a mask spec into its slot sequence.
///
/// Never fails: a trailing optional marker is dropped and anything the table
/// does not know is a literal.
pub fn compile(spec: &MaskSpec, table: &PlaceholderTable) -> CompiledMask {
    let slots = match spec {
        MaskSpec::Pattern(pattern) => compile_pattern(pattern.as_str(), table),
        MaskSpec::Elements(elements) => compile_elements(elements.as_slice()),
    };
    log::debug!("compiled mask {spec:?} into {} slots", slots.len());
    CompiledMask::new(slots)
}

fn compile_pattern(pattern: &str, table: &PlaceholderTable) -> Vec<Slot> {
    let mut slots = Vec::<Slot>::new();
    let mut pending_optional = false;

    for ch in pattern.chars() {
        match table.get(ch) {
            Some(Placeholder::OptionalMarker) => {
                pending_optional = true;
            }
            Some(Placeholder::Test(test)) => {
                slots.push(Slot::Pattern {
                    test: test.clone(),
                    optional: pending_optional,
                });
                pending_optional = false;
            }
            None if pending_optional => {
                slots.push(optional_literal(ch));
                pending_optional = false;
            }
            None => slots.push(Slot::Literal(ch)),
        }
    }

    if pending_optional {
        log::debug!("dropping trailing optional marker in mask {pattern:?}");
    }
    slots
}

fn optional_literal(ch: char) -> Slot {
    match CharTest::exact(ch) {
        Ok(test) => Slot::optional(test),
        Err(err) => {
            log::warn!("cannot build exact test for {ch:?}, keeping it as a required literal: {err}");
            Slot::Literal(ch)
        }
    }
}

fn compile_elements(elements: &[MaskElement]) -> Vec<Slot> {
    let mut slots = Vec::<Slot>::with_capacity(elements.len());
    for element in elements {
        match element {
            MaskElement::Literal(text) => slots.extend(text.chars().map(Slot::Literal)),
            MaskElement::Test(test) => slots.push(Slot::pattern(test.clone())),
        }
    }
    slots
}
