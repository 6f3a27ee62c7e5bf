// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Spreadsheet storage for the song list.
//!
//! This module provides:
//! - Reading titles (and links) from a named sheet
//! - Header-driven column discovery
//! - Reconciliation of a new title order against the stored rows
//! - Atomic rewrite of the sheet's data rows

pub mod loader;
pub mod reconcile;
pub mod writer;

pub use loader::{load, read_table};
pub use reconcile::{reconcile, Reconciliation};
pub use writer::{save, SaveSummary};

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;
use umya_spreadsheet::Worksheet;

/// Row holding the column labels (1-based, as in the spreadsheet)
pub const HEADER_ROW: u32 = 1;

/// First row holding song data
pub const FIRST_DATA_ROW: u32 = 2;

/// A single song as stored in the sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongRecord {
    /// Song title, used as the join key
    pub title: String,
    /// Associated link (may be empty)
    pub link: String,
}

impl SongRecord {
    /// Create a new record
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}

/// Where the songs live inside a workbook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    /// Sheet name
    pub sheet: String,
    /// Header text of the title column
    pub title_header: String,
    /// Header text of the link column
    pub link_header: String,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            sheet: "Active".to_string(),
            title_header: "Title".to_string(),
            link_header: "YouTube Link".to_string(),
        }
    }
}

/// Mapping from header text to column index, built from the header row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    columns: HashMap<String, u32>,
}

impl ColumnMap {
    /// Scan the header row of a worksheet
    ///
    /// Empty header cells are ignored. When a label repeats, the leftmost
    /// column keeps it.
    pub fn scan(sheet: &Worksheet) -> Self {
        let highest = sheet.get_highest_column();
        Self::from_headers((1..=highest).map(|col| sheet.get_value((col, HEADER_ROW))))
    }

    /// Build from header labels in column order (first label is column 1)
    pub fn from_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut columns = HashMap::new();
        for (index, header) in headers.into_iter().enumerate() {
            let header = header.into();
            if header.is_empty() {
                continue;
            }
            columns.entry(header).or_insert(index as u32 + 1);
        }
        Self { columns }
    }

    /// Column index for a header label
    pub fn column(&self, header: &str) -> Option<u32> {
        self.columns.get(header).copied()
    }

    /// Number of labelled columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the header row had no labels
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column index for a header label, or a schema error naming it
    pub fn require(&self, sheet: &str, header: &str) -> Result<u32, SchemaError> {
        self.column(header).ok_or_else(|| SchemaError::MissingColumn {
            sheet: sheet.to_string(),
            header: header.to_string(),
        })
    }
}

/// The workbook does not have the expected shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// No sheet with the expected name
    #[error("sheet '{0}' not found in workbook")]
    MissingSheet(String),
    /// No header cell with the expected label
    #[error("column '{header}' not found in sheet '{sheet}'")]
    MissingColumn { sheet: String, header: String },
}

/// Errors raised while loading songs
#[derive(Debug, Error)]
pub enum LoadError {
    /// The workbook file does not exist
    #[error("Workbook not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The workbook exists but could not be read as expected
    #[error("Failed to load songs: {0}")]
    Malformed(String),
}

/// Errors raised while saving a new order
#[derive(Debug, Error)]
pub enum SaveError {
    /// The workbook file does not exist
    #[error("Workbook not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The sheet or one of its columns is missing
    #[error("Could not find the expected columns: {0}")]
    Schema(#[from] SchemaError),
    /// The workbook exists but is not a readable spreadsheet
    #[error("Workbook could not be read: {0}")]
    Malformed(String),
    /// Writing the replacement workbook failed
    #[error("Failed to write workbook: {0}")]
    Io(String),
}

/// Read data rows in sheet order
///
/// Rows with an empty title cell are skipped. Without a link column every
/// link is empty.
pub(crate) fn read_records(
    sheet: &Worksheet,
    title_col: u32,
    link_col: Option<u32>,
) -> Vec<SongRecord> {
    let highest = sheet.get_highest_row();
    (FIRST_DATA_ROW..=highest)
        .filter_map(|row| {
            let title = sheet.get_value((title_col, row));
            if title.is_empty() {
                return None;
            }
            let link = link_col
                .map(|col| sheet.get_value((col, row)))
                .unwrap_or_default();
            Some(SongRecord { title, link })
        })
        .collect()
}
