// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! In-session song order.
//!
//! A `DisplayOrder` starts as the sheet's titles in row order and is
//! rearranged by the user before being saved back.

/// Ordered list of titles the user is rearranging
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayOrder {
    /// Current order
    titles: Vec<String>,
    /// Order at load time or at the last successful save
    baseline: Vec<String>,
}

impl DisplayOrder {
    /// Create from titles in their stored order
    pub fn new(titles: Vec<String>) -> Self {
        Self {
            baseline: titles.clone(),
            titles,
        }
    }

    /// Current titles in order
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Title at a position
    pub fn get(&self, index: usize) -> Option<&str> {
        self.titles.get(index).map(String::as_str)
    }

    /// Number of titles
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Check if there are no titles
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Replace the whole list (e.g. after a reload)
    pub fn replace(&mut self, titles: Vec<String>) {
        *self = Self::new(titles);
    }

    /// Move the title at `from` so it ends up at `to`
    ///
    /// Returns false (and leaves the order alone) when either index is out
    /// of range.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from >= self.titles.len() || to >= self.titles.len() {
            return false;
        }
        if from != to {
            let title = self.titles.remove(from);
            self.titles.insert(to, title);
        }
        true
    }

    /// Swap a title with the one above it
    pub fn move_up(&mut self, index: usize) -> bool {
        index > 0 && self.move_item(index, index - 1)
    }

    /// Swap a title with the one below it
    pub fn move_down(&mut self, index: usize) -> bool {
        self.move_item(index, index + 1)
    }

    /// Move a title to the first position
    pub fn move_to_top(&mut self, index: usize) -> bool {
        self.move_item(index, 0)
    }

    /// Move a title to the last position
    pub fn move_to_bottom(&mut self, index: usize) -> bool {
        match self.titles.len() {
            0 => false,
            len => self.move_item(index, len - 1),
        }
    }

    /// Check if the order differs from the last loaded or saved one
    pub fn is_modified(&self) -> bool {
        self.titles != self.baseline
    }

    /// Record the current order as the saved one
    pub fn mark_saved(&mut self) {
        self.baseline = self.titles.clone();
    }
}

/// Split an order listing into titles, one per line
///
/// Titles are compared exactly, so only the line ending is stripped.
/// Empty lines are skipped.
pub fn parse_order(text: &str) -> Vec<&str> {
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .collect()
}
