// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for Setlist.
//!
//! Settings are read from an optional YAML file. Every field has a default,
//! so an empty file (or no file) describes `songs.xlsx` with an "Active"
//! sheet holding "Title" and "YouTube Link" columns.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::sheet::SheetLayout;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Workbook holding the songs
    #[serde(default = "default_workbook")]
    pub workbook: PathBuf,
    /// Sheet name
    #[serde(default = "default_sheet")]
    pub sheet: String,
    /// Header text of the title column
    #[serde(default = "default_title_header")]
    pub title_header: String,
    /// Header text of the link column
    #[serde(default = "default_link_header")]
    pub link_header: String,
    /// Log file for the terminal UI (no logging when unset)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// Directory relative paths resolve against
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

fn default_workbook() -> PathBuf {
    PathBuf::from("songs.xlsx")
}
fn default_sheet() -> String {
    "Active".to_string()
}
fn default_title_header() -> String {
    "Title".to_string()
}
fn default_link_header() -> String {
    "YouTube Link".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workbook: default_workbook(),
            sheet: default_sheet(),
            title_header: default_title_header(),
            link_header: default_link_header(),
            log_file: None,
            base_dir: None,
        }
    }
}

impl AppConfig {
    /// Load settings from a YAML file
    ///
    /// Relative paths in the file resolve against the file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let mut config = Self::from_yaml(&contents)?;
        config.base_dir = path
            .as_ref()
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf);
        Ok(config)
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as a mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save settings to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Workbook path with `base_dir` applied
    pub fn workbook_path(&self) -> PathBuf {
        self.resolve(&self.workbook)
    }

    /// Log file path with `base_dir` applied
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.as_deref().map(|path| self.resolve(path))
    }

    /// Sheet name and column headers
    pub fn layout(&self) -> SheetLayout {
        SheetLayout {
            sheet: self.sheet.clone(),
            title_header: self.title_header.clone(),
            link_header: self.link_header.clone(),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}
