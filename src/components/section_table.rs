//! Section table for the course details page
//!
//! Renders class sections as aligned columns with a highlighted row.

use crate::model::course::{Course, SECTION_HEADERS};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a single column may grow
const MAX_COLUMN_WIDTH: usize = 30;

#[derive(Debug, Default)]
pub struct SectionTable {
    pub selected: usize,
}

impl SectionTable {
    pub fn reset(&mut self) {
        self.selected = 0;
    }

    pub fn next(&mut self, row_count: usize) {
        if self.selected + 1 < row_count {
            self.selected += 1;
        }
    }

    pub fn previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Enroll code of the highlighted section
    pub fn selected_enroll_code<'a>(&self, course: &'a Course) -> Option<&'a str> {
        course
            .class_sections
            .get(self.selected)
            .map(|s| s.enroll_code.as_str())
    }

    pub fn render_lines(&self, course: &Course) -> Vec<Line<'static>> {
        let rows: Vec<[String; 8]> = course
            .class_sections
            .iter()
            .map(|section| section.row(course))
            .collect();
        build_table_lines(&SECTION_HEADERS, &rows, Some(self.selected))
    }
}

/// Build table lines from headers and rows
pub fn build_table_lines<const N: usize>(
    headers: &[&str; N],
    rows: &[[String; N]],
    selected: Option<usize>,
) -> Vec<Line<'static>> {
    if rows.is_empty() {
        return vec![Line::from(Span::styled(
            "No sections found",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let mut col_widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            col_widths[i] = col_widths[i].max(cell.width());
        }
    }
    for width in &mut col_widths {
        *width = (*width).min(MAX_COLUMN_WIDTH);
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);

    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    lines.push(render_row(headers.iter().copied(), &col_widths, header_style));

    let separator: String = col_widths
        .iter()
        .map(|w| "─".repeat(*w))
        .collect::<Vec<_>>()
        .join("─┼─");
    lines.push(Line::from(Span::styled(
        separator,
        Style::default().fg(Color::DarkGray),
    )));

    for (i, row) in rows.iter().enumerate() {
        let style = if selected == Some(i) {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(render_row(row.iter().map(String::as_str), &col_widths, style));
    }

    lines
}

fn render_row<'a>(
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
    style: Style,
) -> Line<'static> {
    let spans: Vec<Span> = cells
        .zip(widths)
        .enumerate()
        .flat_map(|(i, (cell, width))| {
            let mut spans = vec![Span::styled(pad(cell, *width), style)];
            if i + 1 < widths.len() {
                spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
            }
            spans
        })
        .collect();
    Line::from(spans)
}

/// Fit `text` into exactly `width` columns, truncating with an ellipsis
fn pad(text: &str, width: usize) -> String {
    if text.width() <= width {
        return format!("{}{}", text, " ".repeat(width - text.width()));
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
