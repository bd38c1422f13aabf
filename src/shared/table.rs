//! Fixed-width table rendering for terminal output.
//!
//! Column widths are measured in display width so CJK text in commit
//! messages or descriptions lines up.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string to fit within the specified display width.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width {
            break;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

/// Pads or truncates a string to exactly the specified display width.
///
/// Longer strings end in "..." when the width allows it.
pub fn pad_or_truncate(s: &str, width: usize) -> String {
    let display_width = s.width();

    if display_width <= width {
        format!("{}{}", s, " ".repeat(width - display_width))
    } else if width < 3 {
        truncate_to_width(s, width)
    } else {
        let truncated = truncate_to_width(s, width - 3);
        // CJK chars can leave the truncated text one column short
        let padding = width.saturating_sub(truncated.width()).saturating_sub(3);
        format!("{}...{}", truncated, " ".repeat(padding))
    }
}

/// A column: header text and a maximum display width.
pub struct Column {
    pub header: &'static str,
    pub max_width: usize,
}

impl Column {
    pub const fn new(header: &'static str, max_width: usize) -> Self {
        Self { header, max_width }
    }
}

/// Rows of cells rendered under a header line.
///
/// Each column is as wide as its widest cell, capped at `max_width`. Lines
/// carry no trailing whitespace.
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row; missing cells render empty, extra cells are dropped.
    pub fn push(&mut self, cells: Vec<String>) {
        // Newlines would break the row layout
        self.rows
            .push(cells.iter().map(|c| c.replace(['\n', '\r'], " ")).collect());
    }

    pub fn render(&self) -> String {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.width())
                    .chain(std::iter::once(col.header.width()))
                    .max()
                    .unwrap_or(0)
                    .min(col.max_width)
            })
            .collect();

        let mut out = String::new();
        let header: Vec<&str> = self.columns.iter().map(|c| c.header).collect();
        out.push_str(&self.render_line(&header, &widths));
        for row in &self.rows {
            let cells: Vec<&str> = (0..self.columns.len())
                .map(|i| row.get(i).map_or("", String::as_str))
                .collect();
            out.push_str(&self.render_line(&cells, &widths));
        }
        out
    }

    fn render_line(&self, cells: &[&str], widths: &[usize]) -> String {
        let last = cells.len().saturating_sub(1);
        let parts: Vec<String> = cells
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (cell, width))| {
                if i == last {
                    truncate_to_width(cell, *width)
                } else {
                    pad_or_truncate(cell, *width)
                }
            })
            .collect();
        let mut line = parts.join("  ").trim_end().to_string();
        line.push('\n');
        line
    }
}
