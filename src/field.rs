use crate::masker::Masker;
use crate::presets;
use crate::spec::MaskSpec;
use std::fmt;
use std::sync::{Arc, LazyLock};

static DEFAULT_MASKER: LazyLock<Arc<Masker>> = LazyLock::new(|| Arc::new(Masker::default()));

pub type MaskFn = dyn Fn(&str) -> MaskSpec + Send + Sync;

/// Mask bound to a field: fixed, or rebuilt from the current raw value.
#[derive(Clone)]
pub enum FieldMask {
    Static(MaskSpec),
    Dynamic(Arc<MaskFn>),
}

impl FieldMask {
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&str) -> MaskSpec + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(f))
    }

    pub fn resolve(&self, raw: &str) -> MaskSpec {
        match self {
            Self::Static(spec) => spec.clone(),
            Self::Dynamic(f) => f(raw),
        }
    }
}

impl fmt::Debug for FieldMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(spec) => f.debug_tuple("Static").field(spec).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<MaskSpec> for FieldMask {
    fn from(spec: MaskSpec) -> Self {
        Self::Static(spec)
    }
}

impl From<&str> for FieldMask {
    fn from(pattern: &str) -> Self {
        Self::Static(MaskSpec::from(pattern))
    }
}

impl From<String> for FieldMask {
    fn from(pattern: String) -> Self {
        Self::Static(MaskSpec::from(pattern))
    }
}

/// Result of feeding a field one input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    pub value: String,
    pub consumed: usize,
    /// The formatted value differs from the previous one; listeners should be told.
    pub changed: bool,
    /// The formatted value differs from what was typed; the input must be rewritten.
    pub rewrite: bool,
}

/// Keeps one text value conformant to its mask across input events.
#[derive(Debug, Clone)]
pub struct MaskedField {
    masker: Arc<Masker>,
    mask: FieldMask,
    value: String,
}

impl MaskedField {
    pub fn new(mask: impl Into<FieldMask>) -> Self {
        Self {
            masker: Arc::clone(&DEFAULT_MASKER),
            mask: mask.into(),
            value: String::new(),
        }
    }

    pub fn with_masker(mut self, masker: Arc<Masker>) -> Self {
        self.masker = masker;
        self.reformat();
        self
    }

    pub fn with_default(mut self, value: &str) -> Self {
        self.input(value);
        self
    }

    pub fn phone_us() -> Self {
        Self::new(presets::PHONE_US)
    }

    pub fn zip_us() -> Self {
        Self::new(presets::ZIP_US)
    }

    pub fn date_dd_mm_yyyy() -> Self {
        Self::new(presets::DATE_DD_MM_YYYY)
    }

    pub fn time_hh_mm() -> Self {
        Self::new(presets::TIME_HH_MM)
    }

    pub fn time_range() -> Self {
        Self::new(FieldMask::dynamic(presets::time_range))
    }

    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    pub fn mask(&self) -> &FieldMask {
        &self.mask
    }

    /// Conforms a raw value coming from the input element.
    pub fn input(&mut self, raw: &str) -> FieldUpdate {
        let spec = self.mask.resolve(raw);
        let conformed = self.masker.conform(raw, &spec);
        let changed = conformed.value != self.value;
        let rewrite = conformed.value != raw;
        if changed {
            log::trace!("field value {:?} -> {:?}", self.value, conformed.value);
            self.value.clone_from(&conformed.value);
        }
        FieldUpdate {
            value: conformed.value,
            consumed: conformed.consumed,
            changed,
            rewrite,
        }
    }

    /// Swaps the mask and re-conforms the current value against it.
    pub fn set_mask(&mut self, mask: impl Into<FieldMask>) -> FieldUpdate {
        self.mask = mask.into();
        let current = self.value.clone();
        self.input(current.as_str())
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.value.is_empty();
        self.value.clear();
        changed
    }

    fn reformat(&mut self) {
        let current = self.value.clone();
        self.input(current.as_str());
    }
}
