// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! A single editing session.
//!
//! The session owns the configuration and the display order. Load and save
//! run on user action; their outcome, success or failure, becomes a status
//! message and the session carries on.

use std::path::PathBuf;

use tracing::error;

use crate::config::AppConfig;
use crate::setlist::DisplayOrder;
use crate::sheet::{self, SaveSummary};

/// Editing session over one workbook
#[derive(Debug, Clone)]
pub struct Session {
    config: AppConfig,
    order: DisplayOrder,
    status: Option<String>,
}

impl Session {
    /// Create a session and load the songs
    ///
    /// A failed load leaves the order empty and reports the error in the
    /// status message.
    pub fn open(config: AppConfig) -> Self {
        let mut session = Self {
            config,
            order: DisplayOrder::default(),
            status: None,
        };
        session.reload();
        session
    }

    /// Create a session over titles that are already in memory
    #[cfg(test)]
    pub(crate) fn from_titles(config: AppConfig, titles: Vec<String>) -> Self {
        Self {
            config,
            order: DisplayOrder::new(titles),
            status: None,
        }
    }

    /// Current settings
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Workbook being edited
    pub fn workbook_path(&self) -> PathBuf {
        self.config.workbook_path()
    }

    /// Current order
    pub fn order(&self) -> &DisplayOrder {
        &self.order
    }

    /// Current order, for rearranging
    pub fn order_mut(&mut self) -> &mut DisplayOrder {
        &mut self.order
    }

    /// Latest status message
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Set the status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Re-read the songs, discarding unsaved changes
    ///
    /// Returns whether the load succeeded.
    pub fn reload(&mut self) -> bool {
        let path = self.workbook_path();
        match sheet::load(&path, &self.config.layout()) {
            Ok(titles) => {
                let count = titles.len();
                self.order.replace(titles);
                self.set_status(format!("Loaded {} songs from {}", count, path.display()));
                true
            }
            Err(e) => {
                error!(path = %path.display(), "load failed: {}", e);
                self.order.replace(Vec::new());
                self.set_status(e.to_string());
                false
            }
        }
    }

    /// Write the current order to the workbook
    ///
    /// Returns the save summary on success; on failure the error text is in
    /// the status message.
    pub fn save(&mut self) -> Option<SaveSummary> {
        let path = self.workbook_path();
        match sheet::save(&path, &self.config.layout(), self.order.titles()) {
            Ok(summary) => {
                self.order.mark_saved();
                self.set_status(describe_save(&path, &summary));
                Some(summary)
            }
            Err(e) => {
                error!(path = %path.display(), "save failed: {}", e);
                self.set_status(format!("Failed to save: {}", e));
                None
            }
        }
    }
}

/// Human-readable outcome of a save
pub fn describe_save(path: &std::path::Path, summary: &SaveSummary) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mut message = format!("Order saved to {} ({} songs)", name, summary.written);
    if !summary.unmatched.is_empty() {
        message.push_str(&format!(", {} not found", summary.unmatched.len()));
    }
    if !summary.dropped.is_empty() {
        message.push_str(&format!(", {} removed", summary.dropped.len()));
    }
    message
}
