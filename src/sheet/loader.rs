// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Reading songs from a workbook.

use std::path::Path;

use tracing::{debug, info};

use super::{read_records, ColumnMap, LoadError, SchemaError, SheetLayout, SongRecord};

/// Load song titles in sheet order
pub fn load<P: AsRef<Path>>(path: P, layout: &SheetLayout) -> Result<Vec<String>, LoadError> {
    let titles: Vec<String> = read_rows(path.as_ref(), layout, false)?
        .into_iter()
        .map(|record| record.title)
        .collect();
    info!(path = %path.as_ref().display(), songs = titles.len(), "loaded song titles");
    Ok(titles)
}

/// Load full records (title and link) in sheet order
///
/// The link column is optional here; without it every link is empty.
pub fn read_table<P: AsRef<Path>>(
    path: P,
    layout: &SheetLayout,
) -> Result<Vec<SongRecord>, LoadError> {
    read_rows(path.as_ref(), layout, true)
}

fn read_rows(
    path: &Path,
    layout: &SheetLayout,
    with_links: bool,
) -> Result<Vec<SongRecord>, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let book = umya_spreadsheet::reader::xlsx::read(path)
        .map_err(|e| LoadError::Malformed(format!("{}: {}", path.display(), e)))?;

    let sheet = book.get_sheet_by_name(&layout.sheet).ok_or_else(|| {
        LoadError::Malformed(SchemaError::MissingSheet(layout.sheet.clone()).to_string())
    })?;

    let columns = ColumnMap::scan(sheet);
    let title_col = columns
        .require(&layout.sheet, &layout.title_header)
        .map_err(|e| LoadError::Malformed(e.to_string()))?;
    let link_col = if with_links {
        columns.column(&layout.link_header)
    } else {
        None
    };
    debug!(title_col, ?link_col, "discovered columns");

    Ok(read_records(sheet, title_col, link_col))
}
