//! Reusable UI widgets and helper functions

use ratatui::prelude::*;

use crate::tui::theme::Theme;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Create a centered rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Spinner glyph for an animation frame
pub fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

/// Indeterminate loading bar: a block of accent color sweeping across `width`
pub fn loading_bar(frame: usize, width: usize, theme: &Theme) -> Line<'static> {
    if width == 0 {
        return Line::default();
    }
    let block = (width / 5).max(1);
    let start = (frame * 2) % width;

    let spans: Vec<Span<'static>> = (0..width)
        .map(|x| {
            let lit = (x + width - start) % width < block;
            if lit {
                Span::styled("━", Style::default().fg(theme.accent))
            } else {
                Span::styled("─", Style::default().fg(theme.border))
            }
        })
        .collect();
    Line::from(spans)
}

/// Scroll offset that keeps `selected` visible
pub fn calculate_scroll_offset(selected: usize, visible: usize, total: usize) -> usize {
    if visible == 0 || total <= visible {
        return 0;
    }
    selected
        .saturating_sub(visible - 1)
        .min(total - visible)
}
