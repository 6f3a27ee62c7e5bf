// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Setlist: reorder the songs stored in a spreadsheet.
//!
//! This crate provides:
//! - Loading song titles from the "Active" sheet of an `.xlsx` workbook
//! - An in-memory display order that the user rearranges
//! - Reconciliation of that order against the sheet's links and an
//!   atomic rewrite of the sheet
//! - A ratatui terminal front end

pub mod config;
pub mod session;
pub mod setlist;
pub mod sheet;
pub mod ui;

pub use config::AppConfig;
pub use session::Session;
pub use setlist::{parse_order, DisplayOrder};
pub use sheet::{
    load, read_table, reconcile, save, LoadError, SaveError, SaveSummary, SheetLayout, SongRecord,
};
