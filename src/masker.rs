use crate::cache::MaskCache;
use crate::config::MaskConfig;
use crate::conform::{Conformed, conform};
use crate::error::{Error, Result};
use crate::placeholder::PlaceholderTable;
use crate::slot::CompiledMask;
use crate::spec::MaskSpec;
use indexmap::IndexMap;
use std::sync::Arc;

/// A masking context: one placeholder table, the masks compiled against it and
/// any named masks from configuration.
#[derive(Debug, Default)]
pub struct Masker {
    table: PlaceholderTable,
    cache: MaskCache,
    masks: IndexMap<String, MaskSpec>,
}

impl Masker {
    pub fn new(table: PlaceholderTable) -> Self {
        Self {
            table,
            cache: MaskCache::new(),
            masks: IndexMap::new(),
        }
    }

    pub fn from_config(config: &MaskConfig) -> Result<Self> {
        let mut masker = Self::new(config.placeholder_table()?);
        masker.masks = config.mask_specs();
        log::debug!(
            "masker ready with {} placeholders and {} named masks",
            masker.table.len(),
            masker.masks.len()
        );
        Ok(masker)
    }

    pub fn with_mask(mut self, name: impl Into<String>, spec: impl Into<MaskSpec>) -> Self {
        self.masks.insert(name.into(), spec.into());
        self
    }

    pub fn table(&self) -> &PlaceholderTable {
        &self.table
    }

    pub fn cache(&self) -> &MaskCache {
        &self.cache
    }

    pub fn compile(&self, spec: &MaskSpec) -> Arc<CompiledMask> {
        self.cache.get_or_compile(spec, &self.table)
    }

    /// Conforms `raw` to `spec`. An empty spec passes the text through untouched.
    pub fn conform(&self, raw: &str, spec: &MaskSpec) -> Conformed {
        if spec.is_empty() {
            return Conformed {
                value: raw.to_string(),
                consumed: raw.chars().count(),
            };
        }
        conform(raw, &self.compile(spec))
    }

    pub fn format(&self, raw: &str, spec: &MaskSpec) -> String {
        self.conform(raw, spec).value
    }

    pub fn named_mask(&self, name: &str) -> Result<&MaskSpec> {
        self.masks.get(name).ok_or_else(|| Error::UnknownMask {
            name: name.to_string(),
            known: self.masks.keys().cloned().collect(),
        })
    }

    pub fn mask_names(&self) -> impl Iterator<Item = &str> {
        self.masks.keys().map(String::as_str)
    }
}
