// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for Setlist
//!
//! These tests build real workbooks on disk and drive the load/save cycle
//! through the public API.

use std::fs;
use std::path::{Path, PathBuf};

use setlist::sheet::SchemaError;
use setlist::{
    load, parse_order, read_table, save, AppConfig, DisplayOrder, LoadError, SaveError, Session,
    SheetLayout, SongRecord,
};
use tempfile::{tempdir, TempDir};

/// Write a workbook with an "Active" sheet from a header row and data rows
fn write_workbook(path: &Path, header: &[&str], rows: &[&[&str]]) {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.new_sheet("Active").unwrap();
    for (c, label) in header.iter().enumerate() {
        sheet.get_cell_mut((c as u32 + 1, 1)).set_value(*label);
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            sheet.get_cell_mut((c as u32 + 1, r as u32 + 2)).set_value(*value);
        }
    }
    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}

/// Write a workbook whose cells are all stored as text
fn write_text_workbook(path: &Path, rows: &[(&str, &str)]) {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.new_sheet("Active").unwrap();
    sheet.get_cell_mut((1, 1)).set_value_string("Title");
    sheet.get_cell_mut((2, 1)).set_value_string("YouTube Link");
    for (r, (title, link)) in rows.iter().enumerate() {
        sheet.get_cell_mut((1, r as u32 + 2)).set_value_string(*title);
        sheet.get_cell_mut((2, r as u32 + 2)).set_value_string(*link);
    }
    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}

/// Titles and links that look like numbers or booleans
const TEXT_ROWS: [(&str, &str); 4] = [
    ("007", "0123"),
    ("True", "x"),
    ("1.50", "1e3"),
    ("Help", "urlHelp"),
];

/// Workbook with rows (A, urlA), (B, urlB), (C, urlC)
fn abc_workbook() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("songs.xlsx");
    write_workbook(
        &path,
        &["Title", "YouTube Link"],
        &[&["A", "urlA"], &["B", "urlB"], &["C", "urlC"]],
    );
    (dir, path)
}

fn records(pairs: &[(&str, &str)]) -> Vec<SongRecord> {
    pairs.iter().map(|(t, l)| SongRecord::new(*t, *l)).collect()
}

/// The C/A/B scenario: reordering keeps each title's link
#[test]
fn test_reorder_scenario() {
    let (_dir, path) = abc_workbook();
    let layout = SheetLayout::default();

    let mut order = DisplayOrder::new(load(&path, &layout).unwrap());
    order.move_to_top(2);
    assert_eq!(order.titles(), ["C", "A", "B"]);

    save(&path, &layout, order.titles()).unwrap();

    assert_eq!(
        read_table(&path, &layout).unwrap(),
        records(&[("C", "urlC"), ("A", "urlA"), ("B", "urlB")])
    );
}

/// Every permutation round-trips with links intact
#[test]
fn test_round_trip_permutations() {
    let permutations: [[&str; 3]; 6] = [
        ["A", "B", "C"],
        ["A", "C", "B"],
        ["B", "A", "C"],
        ["B", "C", "A"],
        ["C", "A", "B"],
        ["C", "B", "A"],
    ];
    let layout = SheetLayout::default();

    for permutation in permutations {
        let (_dir, path) = abc_workbook();
        save(&path, &layout, &permutation).unwrap();

        let stored = read_table(&path, &layout).unwrap();
        let titles: Vec<&str> = stored.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, permutation);
        for record in &stored {
            assert_eq!(record.link, format!("url{}", record.title));
        }
    }
}

/// Text cells that look like numbers or booleans come back unchanged
#[test]
fn test_round_trip_text_cells() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("songs.xlsx");
    write_text_workbook(&path, &TEXT_ROWS);
    let layout = SheetLayout::default();

    let mut order = DisplayOrder::new(load(&path, &layout).unwrap());
    assert_eq!(order.titles(), ["007", "True", "1.50", "Help"]);
    order.move_to_bottom(0);

    save(&path, &layout, order.titles()).unwrap();

    assert_eq!(
        read_table(&path, &layout).unwrap(),
        records(&[
            ("True", "x"),
            ("1.50", "1e3"),
            ("Help", "urlHelp"),
            ("007", "0123"),
        ])
    );
}

/// Saving the same order twice stores the same rows
#[test]
fn test_save_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("songs.xlsx");
    write_text_workbook(&path, &TEXT_ROWS);
    let layout = SheetLayout::default();
    let order = ["Help", "1.50", "007", "True"];

    let first = save(&path, &layout, &order).unwrap();
    let after_first = read_table(&path, &layout).unwrap();

    let second = save(&path, &layout, &order).unwrap();
    let after_second = read_table(&path, &layout).unwrap();

    assert_eq!(first, second);
    assert!(second.unmatched.is_empty());
    assert!(second.dropped.is_empty());
    assert_eq!(after_first, after_second);
}

/// Two saves from one session keep every row, as repeated saves in the UI do
#[test]
fn test_session_saves_twice() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("songs.xlsx");
    write_text_workbook(&path, &[("007", "urlBond"), ("Help", "urlHelp")]);

    let mut session = Session::open(AppConfig {
        workbook: path.clone(),
        ..AppConfig::default()
    });
    session.order_mut().move_down(0);

    let first = session.save().unwrap();
    let second = session.save().unwrap();
    assert_eq!(first.written, 2);
    assert_eq!(second.written, 2);
    assert!(second.unmatched.is_empty());
    assert!(second.dropped.is_empty());

    assert_eq!(
        read_table(&path, &SheetLayout::default()).unwrap(),
        records(&[("Help", "urlHelp"), ("007", "urlBond")])
    );
}

/// An order listing keeps titles with leading or trailing spaces
#[test]
fn test_order_listing_keeps_spaced_titles() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("songs.xlsx");
    write_text_workbook(&path, &[(" Intro", "urlIntro"), ("Outro ", "urlOutro")]);
    let layout = SheetLayout::default();

    let listing = "Outro \r\n Intro\r\n\r\n";
    let summary = save(&path, &layout, &parse_order(listing)).unwrap();
    assert_eq!(summary.written, 2);
    assert!(summary.dropped.is_empty());

    assert_eq!(
        read_table(&path, &layout).unwrap(),
        records(&[("Outro ", "urlOutro"), (" Intro", "urlIntro")])
    );
}

/// Titles left out of the order are removed from the sheet
#[test]
fn test_subset_drops_rows() {
    let (_dir, path) = abc_workbook();
    let layout = SheetLayout::default();

    let summary = save(&path, &layout, &["C", "A"]).unwrap();
    assert_eq!(summary.written, 2);
    assert_eq!(summary.dropped, vec!["B"]);

    assert_eq!(
        read_table(&path, &layout).unwrap(),
        records(&[("C", "urlC"), ("A", "urlA")])
    );
}

/// A title with no stored row is skipped without failing the save
#[test]
fn test_unmatched_title_is_excluded() {
    let (_dir, path) = abc_workbook();
    let layout = SheetLayout::default();

    let summary = save(&path, &layout, &["A", "Nope", "B", "C"]).unwrap();
    assert_eq!(summary.written, 3);
    assert_eq!(summary.unmatched, vec!["Nope"]);

    assert_eq!(load(&path, &layout).unwrap(), vec!["A", "B", "C"]);
}

/// Missing workbook: load and save report NotFound and nothing is created
#[test]
fn test_missing_storage() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("songs.xlsx");
    let layout = SheetLayout::default();

    assert!(matches!(load(&path, &layout), Err(LoadError::NotFound(_))));
    assert!(matches!(save(&path, &layout, &["A"]), Err(SaveError::NotFound(_))));
    assert!(!path.exists());

    let session = Session::open(AppConfig {
        workbook: path.clone(),
        ..AppConfig::default()
    });
    assert!(session.order().is_empty());
}

/// Missing "Title" or "YouTube Link" header: Schema error, file untouched
#[test]
fn test_missing_schema_leaves_file_unchanged() {
    let layout = SheetLayout::default();

    for header in [["Name", "YouTube Link"], ["Title", "URL"]] {
        let dir = tempdir().unwrap();
        let path = dir.path().join("songs.xlsx");
        write_workbook(&path, &header, &[&["A", "urlA"], &["B", "urlB"]]);
        let before = fs::read(&path).unwrap();

        let result = save(&path, &layout, &["B", "A"]);
        assert!(matches!(
            result,
            Err(SaveError::Schema(SchemaError::MissingColumn { .. }))
        ));
        assert_eq!(fs::read(&path).unwrap(), before);
    }
}

/// A workbook without the "Active" sheet is a schema error on save
#[test]
fn test_missing_sheet() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("songs.xlsx");
    umya_spreadsheet::writer::xlsx::write(&umya_spreadsheet::new_file(), &path).unwrap();

    let layout = SheetLayout::default();
    assert!(matches!(load(&path, &layout), Err(LoadError::Malformed(_))));
    assert!(matches!(
        save(&path, &layout, &["A"]),
        Err(SaveError::Schema(SchemaError::MissingSheet(_)))
    ));
}

/// A file that is not a workbook fails without being overwritten
#[test]
fn test_corrupt_workbook() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("songs.xlsx");
    fs::write(&path, b"plain text").unwrap();

    let result = save(&path, &SheetLayout::default(), &["A"]);
    assert!(matches!(result, Err(SaveError::Malformed(_))));
    assert_eq!(fs::read(&path).unwrap(), b"plain text");
}

/// Columns are found by header text wherever they are, and extra columns
/// in data rows are cleared
#[test]
fn test_columns_found_by_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("songs.xlsx");
    write_workbook(
        &path,
        &["Notes", "YouTube Link", "Title"],
        &[&["slow", "urlA", "A"], &["fast", "urlB", "B"]],
    );
    let layout = SheetLayout::default();

    save(&path, &layout, &["B", "A"]).unwrap();

    assert_eq!(
        read_table(&path, &layout).unwrap(),
        records(&[("B", "urlB"), ("A", "urlA")])
    );

    let book = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
    let sheet = book.get_sheet_by_name("Active").unwrap();
    assert_eq!(sheet.get_value((1, 1)), "Notes");
    assert_eq!(sheet.get_value((1, 2)), "");
    assert_eq!(sheet.get_value((3, 1)), "Title");
}

/// Custom sheet and header names from the config file
#[test]
fn test_custom_layout_from_config() {
    let dir = tempdir().unwrap();
    let book_path = dir.path().join("band.xlsx");

    let mut book = umya_spreadsheet::new_file();
    let sheet = book.new_sheet("Tour").unwrap();
    sheet.get_cell_mut((1, 1)).set_value("Song");
    sheet.get_cell_mut((2, 1)).set_value("Video");
    sheet.get_cell_mut((1, 2)).set_value("One");
    sheet.get_cell_mut((2, 2)).set_value("v1");
    sheet.get_cell_mut((1, 3)).set_value("Two");
    sheet.get_cell_mut((2, 3)).set_value("v2");
    umya_spreadsheet::writer::xlsx::write(&book, &book_path).unwrap();

    let config_path = dir.path().join("setlist.yaml");
    fs::write(
        &config_path,
        "workbook: band.xlsx\nsheet: Tour\ntitle_header: Song\nlink_header: Video\n",
    )
    .unwrap();

    let config = AppConfig::load(&config_path).unwrap();
    let mut session = Session::open(config);
    assert_eq!(session.order().titles(), ["One", "Two"]);

    session.order_mut().move_down(0);
    assert!(session.save().is_some());

    let stored = read_table(&book_path, &session.config().layout()).unwrap();
    assert_eq!(stored, records(&[("Two", "v2"), ("One", "v1")]));
}

/// Empty title cells between rows are not songs
#[test]
fn test_blank_rows_are_skipped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("songs.xlsx");
    write_workbook(
        &path,
        &["Title", "YouTube Link"],
        &[&["A", "urlA"], &["", ""], &["B", "urlB"]],
    );
    let layout = SheetLayout::default();

    assert_eq!(load(&path, &layout).unwrap(), vec!["A", "B"]);

    save(&path, &layout, &["B", "A"]).unwrap();
    assert_eq!(
        read_table(&path, &layout).unwrap(),
        records(&[("B", "urlB"), ("A", "urlA")])
    );
}
