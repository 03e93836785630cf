//! Overlay rendering: help and filter pickers

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use crate::models::Company;
use crate::tui::app::{ListState, PickerKind, PickerOption};
use crate::tui::theme::Theme;

use super::widgets::{calculate_scroll_offset, centered_rect};

pub fn render_help_overlay(frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup_area = centered_rect(60, 80, area);
    frame.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default().fg(theme.accent).bold(),
        ))
    };

    let help_text = vec![
        Line::from(Span::styled(
            "hirrd - Keyboard Shortcuts",
            Style::default().bold(),
        )),
        Line::from(""),
        section("Search & Filters"),
        Line::from("  /              Edit search (applied after you stop typing)"),
        Line::from("  Enter / Esc    Leave the search box"),
        Line::from("  Ctrl+u         Clear the search box"),
        Line::from("  L              Pick a location"),
        Line::from("  C              Pick a company"),
        Line::from("  x              Clear all filters"),
        Line::from(""),
        section("Pages"),
        Line::from("  h / Left       Previous page"),
        Line::from("  l / Right      Next page"),
        Line::from("  1-9            Go to page"),
        Line::from("  j/k / Up/Down  Move between job cards"),
        Line::from(""),
        section("General"),
        Line::from("  r              Retry loading jobs"),
        Line::from("  a              About hirrd"),
        Line::from("  ?/F1           Show this help"),
        Line::from("  q              Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or Esc to close this help",
            Style::default().fg(theme.border),
        )),
    ];

    let help_para = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_focused))
                .title(" Help "),
        )
        .style(Style::default().fg(theme.fg));
    frame.render_widget(help_para, popup_area);
}

/// Product overview: what the board offers and who is hiring
pub fn render_about_overlay(companies: &[Company], frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup_area = centered_rect(70, 70, area);
    frame.render_widget(Clear, popup_area);

    let heading = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default().fg(theme.accent).bold(),
        ))
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "Find Your Dream Job and get hirrd",
            Style::default().fg(theme.fg).bold(),
        )),
        Line::from(Span::styled(
            "Explore job listings or find the perfect candidate",
            Style::default().fg(theme.muted),
        )),
        Line::from(""),
        heading("For Job Seekers"),
        Line::from("  Search and apply for jobs, track applications, and more."),
        heading("For Employers"),
        Line::from("  Post jobs, manage applications, and find the best candidates."),
        Line::from(""),
        heading("Hiring now"),
    ];

    if companies.is_empty() {
        lines.push(Line::styled("  -", Style::default().fg(theme.muted)));
    } else {
        let names: Vec<&str> = companies.iter().map(|c| c.name.as_str()).collect();
        lines.push(Line::from(format!("  {}", names.join(" · "))));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press a or Esc to close",
        Style::default().fg(theme.border),
    )));

    let para = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_focused))
                .title(" About "),
        )
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(theme.fg));
    frame.render_widget(para, popup_area);
}

pub fn render_picker_overlay(
    kind: PickerKind,
    options: &[PickerOption],
    list: &ListState,
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
) {
    let popup_area = centered_rect(50, 70, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(kind.title());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let visible = inner.height as usize;
    let offset = calculate_scroll_offset(list.selected, visible, options.len());

    let items: Vec<ListItem> = options
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, option)| {
            let style = if i == list.selected {
                Style::default()
                    .fg(theme.selected_fg)
                    .bg(theme.selected_bg)
                    .bold()
            } else if option.value.is_empty() {
                Style::default().fg(theme.muted)
            } else {
                Style::default().fg(theme.fg)
            };
            ListItem::new(format!(" {}", option.label)).style(style)
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_picker_scrolls_to_selection() {
        let options: Vec<PickerOption> = (0..50)
            .map(|i| PickerOption {
                value: format!("v{}", i),
                label: format!("Option {:02}", i),
            })
            .collect();
        let list = ListState::at(40);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| {
                render_picker_overlay(
                    PickerKind::Location,
                    &options,
                    &list,
                    frame,
                    frame.area(),
                    &Theme::dark(),
                )
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(screen.contains("Option 40"));
        assert!(!screen.contains("Option 00"));
        assert!(screen.contains("Filter by Location"));
    }
}
