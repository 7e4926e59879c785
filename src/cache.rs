use crate::compiler::compile;
use crate::placeholder::PlaceholderTable;
use crate::slot::CompiledMask;
use crate::spec::{CacheKey, MaskSpec};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Entries kept before a cache starts over.
pub const MAX_CACHED_MASKS: usize = 512;

/// Compiled masks keyed by the mask's literal value.
///
/// Entries are only valid for the placeholder table they were compiled with, so
/// a cache belongs to exactly one masking context. Dynamic masks can produce an
/// unbounded number of distinct specs; once `limit` entries are held, the next
/// new mask clears the cache.
#[derive(Debug)]
pub struct MaskCache {
    compiled: RwLock<HashMap<CacheKey, Arc<CompiledMask>>>,
    limit: usize,
}

impl Default for MaskCache {
    fn default() -> Self {
        Self::with_limit(MAX_CACHED_MASKS)
    }
}

impl MaskCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            compiled: RwLock::new(HashMap::new()),
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn get_or_compile(&self, spec: &MaskSpec, table: &PlaceholderTable) -> Arc<CompiledMask> {
        let key = spec.cache_key();
        if let Some(mask) = self
            .compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            log::trace!("mask cache hit for {key:?}");
            return Arc::clone(mask);
        }

        let mask = Arc::new(compile(spec, table));
        let mut compiled = self
            .compiled
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if compiled.len() >= self.limit && !compiled.contains_key(&key) {
            log::debug!("mask cache reached {} entries, clearing", compiled.len());
            compiled.clear();
        }
        Arc::clone(compiled.entry(key).or_insert(mask))
    }

    pub fn len(&self) -> usize {
        self.compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.compiled
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
