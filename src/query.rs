//! Local search and sort over a fetched [`Collection`].
//!
//! The engine sorts first and filters second, and recomputes everything on
//! each call. It never touches the network and never mutates its input.

use crate::models::{Collection, RepositoryRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    StarCount,
    EffectiveUpdatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stars" | "star_count" => Ok(SortField::StarCount),
            "updated" | "updated_at" | "effective_updated_at" => Ok(SortField::EffectiveUpdatedAt),
            other => Err(format!("unknown sort field '{}', expected 'stars' or 'updated'", other)),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => Err(format!("unknown sort order '{}', expected 'asc' or 'desc'", other)),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::StarCount => f.write_str("stars"),
            SortField::EffectiveUpdatedAt => f.write_str("updated"),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => f.write_str("asc"),
            SortOrder::Descending => f.write_str("desc"),
        }
    }
}

/// Caller-held query parameters. An empty `search_term` filters nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub search_term: String,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
}

impl QueryState {
    pub fn new(search_term: impl Into<String>, sort_field: SortField, sort_order: SortOrder) -> Self {
        Self {
            search_term: search_term.into(),
            sort_field,
            sort_order,
        }
    }
}

/// Sorted, then filtered view of `collection`.
pub fn query<'a>(collection: &'a Collection, state: &QueryState) -> Vec<&'a RepositoryRecord> {
    let mut working: Vec<&RepositoryRecord> = collection.iter().collect();
    sort_records(&mut working, state.sort_field, state.sort_order);

    let term = state.search_term.to_lowercase();
    if term.is_empty() {
        return working;
    }

    working.retain(|record| matches_lowercase_term(record, &term));
    working
}

/// Stable sort: records with equal keys keep their relative order.
pub fn sort_records(records: &mut [&RepositoryRecord], field: SortField, order: SortOrder) {
    records.sort_by(|a, b| {
        let ordering = compare_by(a, b, field);
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

fn compare_by(a: &RepositoryRecord, b: &RepositoryRecord, field: SortField) -> Ordering {
    match field {
        SortField::StarCount => a.star_count().cmp(&b.star_count()),
        SortField::EffectiveUpdatedAt => a.effective_updated_at().cmp(&b.effective_updated_at()),
    }
}

/// Case-insensitive substring match against name, description, language
/// and full name.
pub fn matches_term(record: &RepositoryRecord, term: &str) -> bool {
    matches_lowercase_term(record, &term.to_lowercase())
}

fn matches_lowercase_term(record: &RepositoryRecord, term: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(term);

    contains(record.name())
        || record.description().map_or(false, contains)
        || record.language().map_or(false, contains)
        || contains(record.full_name())
}
