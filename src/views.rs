//! Table Views
//!
//! Pure derivation of the rendered row sequence from the store's records and
//! the active filters: stable sort by (status, company), then an AND of two
//! independently-defaulting membership predicates. Never mutates the store.

use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Active status and company filters. An empty set places no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub status: BTreeSet<String>,
    #[serde(default)]
    pub company: BTreeSet<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.status = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_company<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.company = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        self.status.is_empty() && self.company.is_empty()
    }

    /// Whether `record` passes both filters
    pub fn matches(&self, record: &Record) -> bool {
        let status_ok = self.status.is_empty() || self.status.contains(&record.status);
        let company_ok = self.company.is_empty() || self.company.contains(&record.company);
        status_ok && company_ok
    }
}

/// Stable sort by status ascending, then company ascending.
pub fn sort_records(records: &mut [&Record]) {
    records.sort_by(|a, b| {
        a.status
            .cmp(&b.status)
            .then_with(|| a.company.cmp(&b.company))
    });
}

/// Rows to render for the given records and filters: sorted, then filtered.
pub fn table_view<'a>(records: &'a [Record], filters: &FilterState) -> Vec<&'a Record> {
    let mut rows: Vec<&Record> = records.iter().collect();
    sort_records(&mut rows);
    rows.retain(|r| filters.matches(r));
    rows
}

/// Choices offered by the filter widgets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub statuses: Vec<String>,
    pub companies: Vec<String>,
}

impl FilterOptions {
    /// Union of the configured defaults and every value present in `records`,
    /// sorted and deduplicated.
    pub fn collect(records: &[Record], statuses: &[String], companies: &[String]) -> Self {
        let mut status_set: BTreeSet<String> = statuses.iter().cloned().collect();
        let mut company_set: BTreeSet<String> = companies.iter().cloned().collect();
        for record in records {
            status_set.insert(record.status.clone());
            company_set.insert(record.company.clone());
        }
        Self {
            statuses: status_set.into_iter().collect(),
            companies: company_set.into_iter().collect(),
        }
    }
}
