// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Song list widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

/// Widget for displaying the reorderable song list
pub struct SetlistWidget<'a> {
    titles: &'a [String],
    grabbed: Option<usize>,
    block: Option<Block<'a>>,
}

impl<'a> SetlistWidget<'a> {
    /// Create a new song list widget
    pub fn new(titles: &'a [String]) -> Self {
        Self {
            titles,
            grabbed: None,
            block: None,
        }
    }

    /// Mark the row currently being dragged
    pub fn grabbed(mut self, index: Option<usize>) -> Self {
        self.grabbed = index;
        self
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl StatefulWidget for SetlistWidget<'_> {
    type State = ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut ListState) {
        let area = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        if self.titles.is_empty() {
            Paragraph::new("No songs loaded")
                .style(Style::default().fg(Color::DarkGray))
                .render(area, buf);
            return;
        }

        let number_width = self.titles.len().to_string().len();
        let items: Vec<ListItem> = self
            .titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                let is_grabbed = self.grabbed == Some(i);
                let handle = if is_grabbed { "≡ " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:>width$} ", i + 1, width = number_width),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(handle, Style::default().fg(Color::Magenta)),
                    Span::raw(title.as_str()),
                ]))
            })
            .collect();

        // Grabbed rows stand out from a plain selection
        let highlight = if self.grabbed.is_some() {
            Style::default()
                .bg(Color::Magenta)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        };

        let list = List::new(items).highlight_style(highlight);
        StatefulWidget::render(list, area, buf, state);
    }
}
