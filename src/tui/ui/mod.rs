//! UI rendering for the TUI
//!
//! Rendering is event-driven: a frame is drawn only when an event changed
//! state, not at a fixed frame rate.

mod listing;
mod overlays;
mod widgets;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::listing::PageControl;
use crate::tui::app::{App, ModalState};
use crate::tui::theme::Theme;

use listing::render_listing;
use overlays::{render_about_overlay, render_help_overlay, render_picker_overlay};
use widgets::{loading_bar, spinner};

/// Render the entire TUI
pub fn render(app: &App, frame: &mut Frame) {
    let theme = Theme::from_name(&app.config.display.theme);
    let area = frame.area();

    let layout = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Length(1), // Title
        Constraint::Length(1), // Loading bar
        Constraint::Length(3), // Search box
        Constraint::Length(1), // Filter row
        Constraint::Min(0),    // Job cards
        Constraint::Length(1), // Pagination
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_header(app, frame, layout[0], &theme);
    render_title(frame, layout[1], &theme);
    render_loading_bar(app, frame, layout[2], &theme);
    render_search_box(app, frame, layout[3], &theme);
    render_filter_row(app, frame, layout[4], &theme);
    render_listing(app, frame, layout[5], &theme);
    render_pagination(app, frame, layout[6], &theme);
    render_status_bar(app, frame, layout[7], &theme);

    match &app.modal {
        ModalState::Help => render_help_overlay(frame, area, &theme),
        ModalState::About => render_about_overlay(
            app.listing.companies().data().unwrap_or_default(),
            frame,
            area,
            &theme,
        ),
        ModalState::Picker {
            kind,
            options,
            list,
        } => render_picker_overlay(*kind, options, list, frame, area, &theme),
        ModalState::Search | ModalState::None => {}
    }
}

/// Links shown on the right of the header for the session profile
fn header_links(app: &App) -> Vec<&'static str> {
    let profile = app.profile;
    if !profile.signed_in {
        return vec!["Login"];
    }
    let mut links = Vec::new();
    if profile.can_post_jobs() {
        links.push("Post a Job");
    }
    links.push(profile.my_jobs_label());
    links.push("Saved Jobs");
    links
}

fn render_header(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let brand = Paragraph::new(Line::from(vec![
        Span::styled(" hirrd", Style::default().fg(theme.accent).bold()),
        Span::styled(" job board", Style::default().fg(theme.muted)),
    ]));
    frame.render_widget(brand, area);

    let mut spans = Vec::new();
    for (i, link) in header_links(app).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(theme.border)));
        }
        let style = if link == "Post a Job" {
            Style::default().fg(theme.accent).bold()
        } else {
            Style::default().fg(theme.fg)
        };
        spans.push(Span::styled(link, style));
    }
    spans.push(Span::raw(" "));
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
        area,
    );
}

fn render_title(frame: &mut Frame, area: Rect, theme: &Theme) {
    let title = Paragraph::new("Latest Jobs")
        .style(Style::default().fg(theme.fg).bold())
        .alignment(Alignment::Center);
    frame.render_widget(title, area);
}

fn render_loading_bar(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let jobs_loading = app.listing.jobs().is_loading() || !app.listing.is_ready();
    if !(jobs_loading || app.listing.display_loading()) {
        return;
    }
    let bar = loading_bar(app.spinner_frame, area.width as usize, theme);
    frame.render_widget(Paragraph::new(bar), area);
}

fn render_search_box(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let editing = app.modal.is_editing_search();
    let border = if editing {
        theme.border_focused
    } else {
        theme.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Search ");

    let line = if app.search_input.is_empty() && !editing {
        Line::from(Span::styled(
            "Search jobs by title... (press /)",
            Style::default().fg(theme.muted),
        ))
    } else {
        let mut spans = vec![Span::styled(
            app.search_input.clone(),
            Style::default().fg(theme.fg),
        )];
        if editing {
            spans.push(Span::styled("█", Style::default().fg(theme.accent)));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_filter_row(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let label = Style::default().fg(theme.muted);
    let filters = app.listing.filters();

    let line = match app.listing.company_options() {
        None => Line::from(vec![
            Span::styled(format!(" {} ", spinner(app.spinner_frame)), label),
            Span::styled("Loading companies...", Style::default().fg(theme.accent)),
        ]),
        Some(_) => {
            let location = filters.location().unwrap_or("Any");
            let company = match filters.company() {
                Some(id) => app.listing.company_name(id).unwrap_or(id),
                None => "Any",
            };
            Line::from(vec![
                Span::styled(" [L] Location: ", label),
                Span::styled(location.to_string(), Style::default().fg(theme.fg)),
                Span::styled("   [C] Company: ", label),
                Span::styled(company.to_string(), Style::default().fg(theme.fg)),
                Span::styled("   [x] Clear Filters", label),
            ])
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_pagination(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let controls = app.listing.pages().controls();
    if controls.is_empty() {
        return;
    }

    let disabled = Style::default().fg(theme.border);
    let mut spans = Vec::with_capacity(controls.len() * 2);
    for control in controls {
        let span = match control {
            PageControl::Previous { enabled } => Span::styled(
                "‹ Prev",
                if enabled {
                    Style::default().fg(theme.fg)
                } else {
                    disabled
                },
            ),
            PageControl::Page { number, active: true } => Span::styled(
                format!(" {} ", number),
                Style::default()
                    .fg(theme.selected_fg)
                    .bg(theme.accent)
                    .bold(),
            ),
            PageControl::Page { number, .. } => {
                Span::styled(format!(" {} ", number), Style::default().fg(theme.fg))
            }
            PageControl::Next { enabled } => Span::styled(
                "Next ›",
                if enabled {
                    Style::default().fg(theme.fg)
                } else {
                    disabled
                },
            ),
        };
        spans.push(span);
        spans.push(Span::raw(" "));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn render_status_bar(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let keybinds = match app.modal {
        ModalState::Search => " type to search  Enter/Esc:done  Ctrl+u:clear ",
        ModalState::Picker { .. } => " j/k:move  Enter:apply  Esc:cancel ",
        _ => " /:search  h/l:page  1-9:go to page  L:location  C:company  x:clear  r:retry  a:about  ?:help  q:quit ",
    };
    let mut spans = vec![Span::styled(keybinds, Style::default().fg(theme.border))];

    if let Some(notice) = app.feedback.current_notice() {
        spans.push(Span::styled(
            format!("| {} ", notice),
            Style::default().fg(theme.accent),
        ));
    } else if let Some(first) = app.feedback.config_warnings.first() {
        let more = app.feedback.config_warnings.len() - 1;
        let text = if more == 0 {
            format!("| WARN: {}", first)
        } else {
            format!("| WARN: {} (+{} more)", first, more)
        };
        spans.push(Span::styled(text, Style::default().fg(theme.warn)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
