// ── Correlation store ──
//
// Bridges fan-out results arriving out of order back to the context
// gathered in an earlier phase (display names, bandwidth limits). Built
// by a single reducer after the producing batch completes, then
// read-only for the duration of the consuming phase.

use std::collections::HashMap;

use crate::error::CoreError;

/// Per-run map from correlation key (network id) to phase-1 context.
///
/// Every key a later phase can emit must be inserted before that phase
/// starts; [`attach`](Self::attach) on an unknown key is an internal
/// consistency defect and fails loudly rather than dropping the result.
#[derive(Debug, Default)]
pub struct CorrelationStore<C> {
    entries: HashMap<String, C>,
}

impl<C> CorrelationStore<C> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Record context for a key. Replaces any earlier entry.
    pub fn insert(&mut self, key: impl Into<String>, context: C) {
        self.entries.insert(key.into(), context);
    }

    /// Match an asynchronous result back to its context, or surface an
    /// [`CoreError::UnknownCorrelation`] defect.
    pub fn attach(&self, key: &str) -> Result<&C, CoreError> {
        self.entries
            .get(key)
            .ok_or_else(|| CoreError::UnknownCorrelation { key: key.to_owned() })
    }

    /// Context for a key, if present.
    pub fn lookup(&self, key: &str) -> Option<&C> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C> FromIterator<(String, C)> for CorrelationStore<C> {
    fn from_iter<I: IntoIterator<Item = (String, C)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
