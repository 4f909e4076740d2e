// Copyright 2026 the Windrow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Free-text filtering over declared searchable fields.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// One searchable field's value, coerced to a comparable representation.
///
/// Records expose their searchable fields through [`SearchRecord`]; absent
/// (null) fields are simply not visited and therefore never match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Textual field, matched case-insensitively.
    Text(&'a str),
    /// Integer field, matched against its decimal rendering.
    Int(i64),
    /// Floating-point field, matched against its display rendering.
    Float(f64),
    /// Boolean field, matched against `"true"` / `"false"`.
    Bool(bool),
}

/// A free-text search query.
///
/// Holds the raw query string alongside its lowercased form so per-record
/// matching does not re-lowercase the needle. The empty query matches
/// everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    raw: String,
    needle: String,
}

impl Query {
    /// Creates a query from the user's raw input.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let needle = raw.to_lowercase();
        Self { raw, needle }
    }

    /// Returns the raw query string as the user typed it.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns `true` for the empty query, which matches every record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns `true` if `value`'s string representation contains the query
    /// as a case-insensitive substring.
    ///
    /// The empty query matches every value.
    #[must_use]
    pub fn matches(&self, value: &FieldValue<'_>) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        match value {
            FieldValue::Text(text) => text.to_lowercase().contains(&self.needle),
            FieldValue::Int(n) => n.to_string().contains(&self.needle),
            FieldValue::Float(f) => f.to_string().contains(&self.needle),
            FieldValue::Bool(b) => b.to_string().contains(&self.needle),
        }
    }
}

/// A record with a declared set of searchable fields.
///
/// Implementations visit each searchable field in turn; a record matches a
/// query when **any** visited field matches. Fields without a value should
/// not be visited at all.
///
/// ```rust
/// use windrow_paging::{FieldValue, SearchRecord};
///
/// struct Customer {
///     name: &'static str,
///     email: Option<&'static str>,
///     active: bool,
/// }
///
/// impl SearchRecord for Customer {
///     fn searchable_fields(&self, visit: &mut dyn FnMut(FieldValue<'_>)) {
///         visit(FieldValue::Text(self.name));
///         if let Some(email) = self.email {
///             visit(FieldValue::Text(email));
///         }
///         visit(FieldValue::Bool(self.active));
///     }
/// }
/// ```
pub trait SearchRecord {
    /// Visits each searchable field's value.
    fn searchable_fields(&self, visit: &mut dyn FnMut(FieldValue<'_>));
}

/// Returns `true` if any of `record`'s searchable fields matches `query`.
#[must_use]
pub fn record_matches<R: SearchRecord + ?Sized>(record: &R, query: &Query) -> bool {
    if query.is_empty() {
        return true;
    }
    let mut hit = false;
    record.searchable_fields(&mut |value| {
        if !hit && query.matches(&value) {
            hit = true;
        }
    });
    hit
}

/// Returns the indices of matching records, preserving original order.
///
/// The empty query yields every index, so filtering is the identity on an
/// unfiltered view.
#[must_use]
pub fn filter_indices<R: SearchRecord>(records: &[R], query: &Query) -> Vec<usize> {
    if query.is_empty() {
        return (0..records.len()).collect();
    }
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record_matches(*record, query))
        .map(|(i, _)| i)
        .collect()
}
