//! Ordered parameter storage for path captures and query strings.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use std::sync::Arc;

/// Maximum number of parameters before heap allocation.
///
/// Most routes have a handful of captures; `SmallVec` keeps the common case
/// off the heap.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Ordered name/value parameter map.
///
/// Parameter names use `Arc<str>` because they come from the compiled
/// pattern's key list and are shared across matches; values are per-request.
/// A value of `None` records a capture group that did not participate in the
/// match (an optional alternative, for instance) — the name is known but no
/// value was produced.
///
/// Two write disciplines coexist:
/// - [`assign`](Params::assign) applies the capture tie-break rule: a defined
///   value replaces an earlier one, an undefined value never replaces an
///   existing entry but is stored when the name is new.
/// - [`insert`](Params::insert) is plain last-write-wins, used for query
///   string parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: SmallVec<[(Arc<str>, Option<String>); MAX_INLINE_PARAMS]>,
}

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get a parameter value by name. Entries recorded as undefined yield
    /// `None`, same as absent names.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Whether the name has an entry, defined or not.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k.as_ref() == name)
    }

    /// Record a decoded capture under the tie-break rule: defined values
    /// replace, undefined values only occupy new names.
    pub fn assign(&mut self, name: Arc<str>, value: Option<String>) {
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => {
                if value.is_some() {
                    slot.1 = value;
                }
            }
            None => self.entries.push((name, value)),
        }
    }

    /// Plain replace-or-append write, last value wins.
    pub fn insert(&mut self, name: impl Into<Arc<str>>, value: impl Into<String>) {
        let name = name.into();
        let value = Some(value.into());
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_ref(), v.as_deref()))
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name.as_ref(), value)?;
        }
        map.end()
    }
}
