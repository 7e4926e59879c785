//! Input masks: compile a mask pattern into slots and conform typed text to it.
//!
//! ```
//! use textmask::{MaskSpec, format_input};
//!
//! assert_eq!(format_input("11112011", &MaskSpec::pattern("##.##.####")), "11.11.2011");
//! ```

pub mod cache;
pub mod compiler;
pub mod config;
pub mod conform;
pub mod error;
pub mod field;
pub mod masker;
pub mod placeholder;
pub mod presets;
pub mod slot;
pub mod spec;

pub use cache::{MAX_CACHED_MASKS, MaskCache};
pub use compiler::compile;
pub use config::MaskConfig;
pub use conform::{Conformed, conform};
pub use error::{Error, Result};
pub use field::{FieldMask, FieldUpdate, MaskedField};
pub use masker::Masker;
pub use placeholder::{CharTest, Placeholder, PlaceholderTable};
pub use slot::{CompiledMask, Slot};
pub use spec::{MaskElement, MaskSpec};

use std::sync::LazyLock;

static BUILTIN_TABLE: LazyLock<PlaceholderTable> = LazyLock::new(PlaceholderTable::builtin);

/// Formats `raw` with the built-in placeholders. An empty mask leaves the text as is.
pub fn format_input(raw: &str, mask: &MaskSpec) -> String {
    if mask.is_empty() {
        return raw.to_string();
    }
    conform(raw, &compile(mask, &BUILTIN_TABLE)).value
}

#[cfg(test)]
mod tests;
