//! Plain-text tables for the terminal: the sales summary and raw previews.

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::{
    aggregate::{COUNT_HEADER, SKU_HEADER, Summary},
    source::Table,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

pub fn render_table(headers: &[String], rows: &[Vec<String>], aligns: &[Align]) -> String {
    let cleaned_headers = headers.iter().map(|h| clean_cell(h)).collect::<Vec<_>>();
    let cleaned_rows = rows
        .iter()
        .map(|row| {
            (0..headers.len())
                .map(|idx| clean_cell(row.get(idx).map(String::as_str).unwrap_or("")))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let mut widths = cleaned_headers
        .iter()
        .map(|h| display_width(h).max(3))
        .collect::<Vec<_>>();
    for row in &cleaned_rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(display_width(cell));
        }
    }

    let mut output = String::new();
    push_line(&mut output, &cleaned_headers, &widths, aligns);
    let rule = widths
        .iter()
        .map(|w| Cow::Owned("-".repeat(*w)))
        .collect::<Vec<_>>();
    push_line(&mut output, &rule, &widths, &[]);
    for row in &cleaned_rows {
        push_line(&mut output, row, &widths, aligns);
    }
    output
}

/// Summary rendering with a 1-based rank column.
pub fn summary_table(summary: &Summary) -> String {
    let headers = vec![
        "#".to_string(),
        SKU_HEADER.to_string(),
        COUNT_HEADER.to_string(),
    ];
    let rows = summary
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            vec![
                (idx + 1).to_string(),
                row.sku.clone(),
                row.total_sold_count.to_string(),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&headers, &rows, &[Align::Right, Align::Left, Align::Right])
}

/// First `limit` data rows of the decoded input, cells in their textual form.
pub fn preview_table(table: &Table, limit: usize) -> String {
    let rows = table
        .rows()
        .iter()
        .take(limit)
        .map(|row| row.iter().map(|cell| cell.to_text()).collect())
        .collect::<Vec<Vec<String>>>();
    render_table(table.headers(), &rows, &[])
}

fn push_line(output: &mut String, cells: &[Cow<'_, str>], widths: &[usize], aligns: &[Align]) {
    let mut line = String::new();
    for (idx, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if idx > 0 {
            line.push_str("  ");
        }
        let padding = " ".repeat(width.saturating_sub(display_width(cell)));
        match aligns.get(idx).copied().unwrap_or(Align::Left) {
            Align::Left => {
                line.push_str(cell);
                line.push_str(&padding);
            }
            Align::Right => {
                line.push_str(&padding);
                line.push_str(cell);
            }
        }
    }
    let _ = writeln!(output, "{}", line.trim_end());
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

pub(crate) fn clean_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}
