// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Writing a reordered song list back to the workbook.
//!
//! The sheet's data rows are rebuilt from the reconciled order and the
//! whole workbook is written to a temporary file next to the original,
//! which then replaces it with a rename. A failure at any point leaves the
//! original file untouched.

use std::fs;
use std::path::Path;

use tracing::{info, warn};
use umya_spreadsheet::{Spreadsheet, Worksheet};

use super::reconcile::reconcile;
use super::{
    read_records, ColumnMap, SaveError, SchemaError, SheetLayout, SongRecord, FIRST_DATA_ROW,
};

/// Outcome of a successful save
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveSummary {
    /// Rows written to the sheet
    pub written: usize,
    /// Requested titles that matched no stored row
    pub unmatched: Vec<String>,
    /// Stored titles that were left out of the new order
    pub dropped: Vec<String>,
}

/// Save `order` into the sheet, joining each title with its stored link
pub fn save<P, S>(path: P, layout: &SheetLayout, order: &[S]) -> Result<SaveSummary, SaveError>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(SaveError::NotFound(path.to_path_buf()));
    }

    let mut book = umya_spreadsheet::reader::xlsx::read(path)
        .map_err(|e| SaveError::Malformed(format!("{}: {}", path.display(), e)))?;

    let sheet = book
        .get_sheet_by_name_mut(&layout.sheet)
        .ok_or_else(|| SchemaError::MissingSheet(layout.sheet.clone()))?;

    let columns = ColumnMap::scan(sheet);
    let title_col = columns.require(&layout.sheet, &layout.title_header)?;
    let link_col = columns.require(&layout.sheet, &layout.link_header)?;

    let existing = read_records(sheet, title_col, Some(link_col));
    let plan = reconcile(order, &existing);

    if !plan.dropped.is_empty() {
        warn!(
            count = plan.dropped.len(),
            titles = ?plan.dropped,
            "rows not in the new order will be removed"
        );
    }

    clear_data_rows(sheet);
    write_records(sheet, title_col, link_col, &plan.records);
    persist(&book, path)?;

    info!(
        path = %path.display(),
        written = plan.records.len(),
        unmatched = plan.unmatched.len(),
        "saved song order"
    );

    Ok(SaveSummary {
        written: plan.records.len(),
        unmatched: plan.unmatched,
        dropped: plan.dropped,
    })
}

/// Remove every row below the header
fn clear_data_rows(sheet: &mut Worksheet) {
    let highest = sheet.get_highest_row();
    if highest >= FIRST_DATA_ROW {
        sheet.remove_row(&FIRST_DATA_ROW, &(highest - FIRST_DATA_ROW + 1));
    }
}

/// Write each record as text, so "007" or "True" is stored exactly as given
fn write_records(sheet: &mut Worksheet, title_col: u32, link_col: u32, records: &[SongRecord]) {
    for (row, record) in (FIRST_DATA_ROW..).zip(records) {
        sheet.get_cell_mut((title_col, row)).set_value_string(record.title.as_str());
        sheet.get_cell_mut((link_col, row)).set_value_string(record.link.as_str());
    }
}

/// Write the workbook to a sibling temp file, then rename it over `path`
fn persist(book: &Spreadsheet, path: &Path) -> Result<(), SaveError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".setlist-")
        .suffix(".xlsx.tmp")
        .tempfile_in(dir)
        .map_err(|e| {
            SaveError::Io(format!("cannot create temporary file in {}: {}", dir.display(), e))
        })?;

    umya_spreadsheet::writer::xlsx::write_writer(book, tmp.as_file_mut())
        .map_err(|e| SaveError::Io(format!("cannot serialize workbook: {}", e)))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| SaveError::Io(format!("cannot flush temporary file: {}", e)))?;

    // Keep the original file's permissions rather than the temp file's 0600
    if let Ok(metadata) = fs::metadata(path) {
        if let Err(e) = fs::set_permissions(tmp.path(), metadata.permissions()) {
            warn!(path = %path.display(), error = %e, "could not copy file permissions");
        }
    }

    tmp.persist(path)
        .map_err(|e| SaveError::Io(format!("cannot replace {}: {}", path.display(), e.error)))?;
    Ok(())
}
