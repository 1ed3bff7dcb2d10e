//! Record addressing
//!
//! Records are addressed either by storage index or by GUID. GUID addressing
//! is three-way: it can hit one record, none, or several (duplicates are
//! legal at the storage layer), and callers must see the ambiguous case as an
//! outcome distinct from not-found.

/// How a caller names a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSelector {
    /// Ordinal position in storage order.
    Index(usize),
    /// Business key; compared trim-normalized. A blank string addresses the
    /// no-GUID bucket.
    Guid(String),
}

impl RecordSelector {
    pub fn index(index: usize) -> Self {
        RecordSelector::Index(index)
    }

    pub fn guid(guid: impl Into<String>) -> Self {
        RecordSelector::Guid(guid.into())
    }
}

/// Result of resolving a selector against the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one record matched.
    One(usize),
    /// Several records matched, storage order. The caller must retry with an
    /// index.
    Ambiguous(Vec<usize>),
    NotFound,
}
