//! Search requests and their evaluation over the in-memory collection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use logpile_core::{Document, FieldValue};

/// Page size applied when a request carries no explicit limit.
pub const DEFAULT_LIMIT: usize = 32;

/// A client-submitted search: equality filters, substring searches, pagination.
///
/// Consumed by exactly one evaluator run; results are a snapshot, not a view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    /// Field name → scalar the document's value must equal exactly.
    pub filters: HashMap<String, FilterValue>,
    /// Field name → substring the document's string value must contain
    /// (literal, case-sensitive).
    pub searches: HashMap<String, String>,
    /// Zero-based page index.
    pub page: Option<usize>,
    /// Maximum result count per page.
    pub limit: Option<usize>,
}

/// Scalar values accepted on the filter side of a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Exact equality between a document field and a filter scalar.
///
/// Kinds must line up, except that integers and floats compare numerically
/// (JSON does not distinguish them). Timestamps and nulls match no filter.
fn filter_eq(field: &FieldValue, filter: &FilterValue) -> bool {
    match (field, filter) {
        (FieldValue::Text(a), FilterValue::Text(b)) => a == b,
        (FieldValue::Integer(a), FilterValue::Integer(b)) => a == b,
        (FieldValue::Float(a), FilterValue::Float(b)) => a == b,
        (FieldValue::Integer(a), FilterValue::Float(b)) => *a as f64 == *b,
        (FieldValue::Float(a), FilterValue::Integer(b)) => *a == *b as f64,
        (FieldValue::Boolean(a), FilterValue::Boolean(b)) => a == b,
        _ => false,
    }
}

fn passes_filters(doc: &Document, filters: &HashMap<String, FilterValue>) -> bool {
    filters.iter().all(|(key, want)| {
        doc.get(key)
            .map(|have| filter_eq(have, want))
            .unwrap_or(false)
    })
}

/// A search term is satisfied only by a string value containing the needle;
/// an absent or non-string value disqualifies the document.
fn passes_searches(doc: &Document, searches: &HashMap<String, String>) -> bool {
    searches.iter().all(|(key, needle)| {
        doc.get(key)
            .and_then(FieldValue::as_str)
            .map(|s| s.contains(needle.as_str()))
            .unwrap_or(false)
    })
}

/// Run one search over the collection, in insertion order.
///
/// Matches are counted in encounter order; the requested page is the window
/// `[page * limit, (page + 1) * limit)` of that count. Scanning stops as soon
/// as the window is filled, since later documents cannot belong to the page.
pub fn evaluate(documents: &[Document], search: &SearchRequest) -> Vec<Document> {
    let limit = search.limit.unwrap_or(DEFAULT_LIMIT);
    let page = search.page.unwrap_or(0);

    let start = page.saturating_mul(limit);
    let end = start.saturating_add(limit);

    let mut hits = Vec::new();
    let mut matched = 0usize;

    for doc in documents {
        if matched >= end {
            break;
        }
        if !passes_filters(doc, &search.filters) || !passes_searches(doc, &search.searches) {
            continue;
        }
        if matched >= start {
            hits.push(doc.clone());
        }
        matched += 1;
    }

    hits
}
