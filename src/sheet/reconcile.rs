// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Joining a new title order against stored rows.

use std::collections::HashSet;

use tracing::debug;

use super::SongRecord;

/// Result of joining a title order against the stored rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Replacement rows, in the requested order
    pub records: Vec<SongRecord>,
    /// Requested titles that matched no stored row
    pub unmatched: Vec<String>,
    /// Stored titles left out of the requested order
    pub dropped: Vec<String>,
}

/// Pair each title in `order` with the link of the first row carrying it
///
/// Matching is exact and case-sensitive. Unmatched titles produce no row;
/// stored rows whose title is not in `order` do not survive.
pub fn reconcile<S: AsRef<str>>(order: &[S], rows: &[SongRecord]) -> Reconciliation {
    let mut result = Reconciliation::default();

    for title in order {
        let title = title.as_ref();
        match rows.iter().find(|row| row.title == title) {
            Some(row) => result.records.push(row.clone()),
            None => {
                debug!(title, "no stored row for title");
                result.unmatched.push(title.to_string());
            }
        }
    }

    let requested: HashSet<&str> = order.iter().map(|t| t.as_ref()).collect();
    let mut seen = HashSet::new();
    for row in rows {
        if !requested.contains(row.title.as_str()) && seen.insert(row.title.as_str()) {
            result.dropped.push(row.title.clone());
        }
    }

    result
}
