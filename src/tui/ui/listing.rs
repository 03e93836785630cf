//! Results area: job card grid and its loading, error and empty states

use chrono::Utc;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::formatting::truncate_string;
use crate::listing::ListingView;
use crate::models::Job;
use crate::tui::app::App;
use crate::tui::theme::Theme;

use super::widgets::{calculate_scroll_offset, spinner};

const CARD_HEIGHT: u16 = 6;

/// Grid columns for the available width
fn columns_for(width: u16) -> usize {
    match width {
        0..=79 => 1,
        80..=119 => 2,
        _ => 3,
    }
}

pub fn render_listing(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    match app.listing.view() {
        ListingView::NotReady | ListingView::Loading => {
            let msg = format!("{} Loading jobs...", spinner(app.spinner_frame));
            render_message(frame, area, Line::styled(msg, Style::default().fg(theme.muted)));
        }
        ListingView::Failed(err) => {
            let lines = vec![
                Line::styled(
                    "Error loading jobs. Please try again.",
                    Style::default().fg(theme.error).bold(),
                ),
                Line::styled(err.to_string(), Style::default().fg(theme.muted)),
                Line::styled("Press r to retry", Style::default().fg(theme.border)),
            ];
            let para = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(para, vertical_center(area, 3));
        }
        ListingView::Empty => {
            render_message(
                frame,
                area,
                Line::styled("No Jobs Found", Style::default().fg(theme.fg).bold()),
            );
        }
        ListingView::Results(jobs) => render_grid(app, jobs, frame, area, theme),
    }
}

fn vertical_center(area: Rect, height: u16) -> Rect {
    let top = area.height.saturating_sub(height) / 2;
    Rect {
        y: area.y + top,
        height: height.min(area.height),
        ..area
    }
}

fn render_message(frame: &mut Frame, area: Rect, line: Line<'_>) {
    let para = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(para, vertical_center(area, 1));
}

fn render_grid(app: &App, jobs: &[Job], frame: &mut Frame, area: Rect, theme: &Theme) {
    let cols = columns_for(area.width);
    let total_rows = jobs.len().div_ceil(cols);
    let visible_rows = ((area.height / CARD_HEIGHT) as usize).max(1);
    let selected_row = app.cards.selected / cols;
    let first_row = calculate_scroll_offset(selected_row, visible_rows, total_rows);

    let row_areas = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); visible_rows]).split(area);
    let col_constraints = vec![Constraint::Ratio(1, cols as u32); cols];

    for (slot, row_area) in row_areas.iter().enumerate() {
        let row = first_row + slot;
        if row >= total_rows {
            break;
        }
        let cells = Layout::horizontal(col_constraints.clone()).split(*row_area);
        for (col, cell) in cells.iter().enumerate() {
            let index = row * cols + col;
            if let Some(job) = jobs.get(index) {
                render_card(app, job, index == app.cards.selected, frame, *cell, theme);
            }
        }
    }
}

fn render_card(app: &App, job: &Job, selected: bool, frame: &mut Frame, area: Rect, theme: &Theme) {
    let title = truncate_string(&job.title, app.config.display.title_max_length);
    let border = if selected {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.border)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(theme.fg).bold(),
        ));

    let company = app
        .listing
        .company_name(&job.company_id)
        .unwrap_or(&job.company_id);
    let (status, status_color) = if job.is_open {
        ("Open", theme.job_status_color(true))
    } else {
        ("Closed", theme.job_status_color(false))
    };

    let mut meta = vec![
        Span::styled(company.to_string(), Style::default().fg(theme.accent)),
        Span::styled(" · ", Style::default().fg(theme.border)),
        Span::styled(job.location.clone(), Style::default().fg(theme.fg)),
    ];
    if job.saved {
        meta.push(Span::styled("  ★ saved", Style::default().fg(theme.warn)));
    }

    let lines = vec![
        Line::from(meta),
        Line::styled(job.summary().to_string(), Style::default().fg(theme.muted)),
        Line::from(""),
        Line::from(vec![
            Span::styled(status, Style::default().fg(status_color)),
            Span::styled(
                format!("  {}", job.posted_display(Utc::now())),
                Style::default().fg(theme.border),
            ),
        ]),
    ];

    let mut para = Paragraph::new(lines).block(block);
    if selected {
        para = para.style(Style::default().bg(theme.selected_bg));
    }
    frame.render_widget(para, area);
}
