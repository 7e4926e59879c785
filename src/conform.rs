use crate::slot::Slot;

/// Output of a conformance pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Conformed {
    pub value: String,
    /// Input characters accepted by a pattern slot or matched against a literal.
    pub consumed: usize,
}

/// Aligns `raw` against `slots`, producing the longest prefix-valid output.
///
/// Literal slots always render and swallow an equal input character. A pattern
/// slot takes the next input character if it passes the test, is skipped when
/// optional, and otherwise ends the output. The output also ends at the first
/// pattern slot reached with no input left, so literals directly after the last
/// placed character are rendered while later ones are not.
///
/// An optional slot is skipped without looking at its test when the current
/// character equals the next required literal. Rendered output then conforms to
/// itself: a literal written for a skipped optional slot is read back by that
/// literal again, not by the optional slot.
///
/// Empty input always conforms to empty output, even when the mask starts with
/// literals.
pub fn conform(raw: &str, slots: &[Slot]) -> Conformed {
    let input: Vec<char> = raw.chars().collect();
    if input.is_empty() {
        return Conformed::default();
    }

    let mut out = String::with_capacity(raw.len() + slots.len());
    let mut idx = 0usize;

    for (pos, slot) in slots.iter().enumerate() {
        match slot {
            Slot::Literal(ch) => {
                out.push(*ch);
                if input.get(idx) == Some(ch) {
                    idx += 1;
                }
            }
            Slot::Pattern { test, optional } => {
                let Some(&ch) = input.get(idx) else {
                    break;
                };
                if *optional && next_required_literal(slots, pos + 1) == Some(ch) {
                    continue;
                }
                if test.accepts(ch) {
                    out.push(ch);
                    idx += 1;
                } else if !*optional {
                    break;
                }
            }
        }
    }

    Conformed {
        value: out,
        consumed: idx,
    }
}

/// First literal from `from` on, looking past optional pattern slots. `None`
/// when a required pattern slot or the end of the mask comes first.
fn next_required_literal(slots: &[Slot], from: usize) -> Option<char> {
    for slot in slots.get(from..)? {
        match slot {
            Slot::Literal(ch) => return Some(*ch),
            Slot::Pattern { optional: true, .. } => {}
            Slot::Pattern { optional: false, .. } => return None,
        }
    }
    None
}
