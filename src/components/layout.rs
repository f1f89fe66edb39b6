//! Layout calculations for the UI

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Main screen layout areas
pub struct MainLayout {
    pub pages: Rect,
    pub content: Rect,
    pub status: Option<Rect>,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Full-screen overlay inset by `margin` on every side
pub fn inset(area: Rect, margin: u16) -> Rect {
    Rect::new(
        area.x + margin.min(area.width / 2),
        area.y + margin.min(area.height / 2),
        area.width.saturating_sub(margin * 2),
        area.height.saturating_sub(margin * 2),
    )
}

/// Calculate main screen layout: page tabs, content, optional status, help bar
pub fn calculate_main_layout(area: Rect, has_status: bool) -> MainLayout {
    let chunks = if has_status {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area)
    };

    let (status, help) = if has_status {
        (Some(chunks[2]), chunks[3])
    } else {
        (None, chunks[2])
    };

    MainLayout {
        pages: chunks[0],
        content: chunks[1],
        status,
        help,
    }
}

/// A push button rendered as a single line
pub fn button_line(label: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    Line::from(Span::styled(format!("[ {} ]", label), style))
}

/// Key hint spans for a help bar, e.g. `[(" Esc ", "Close")]`
pub fn key_hints(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, description) in hints {
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!("{}  ", description)));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_popup(area, 10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_popup(area, 40, 40), Rect::new(0, 0, 20, 10));
    }

    #[test]
    fn test_main_layout_with_status() {
        let layout = calculate_main_layout(Rect::new(0, 0, 80, 24), true);
        assert_eq!(layout.pages.height, 2);
        assert_eq!(layout.status.map(|r| r.height), Some(1));
        assert_eq!(layout.help.height, 3);
        assert_eq!(layout.content.height, 18);
    }
}
