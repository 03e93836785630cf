//! Display and formatting functions for CLI output

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, Width, object::Rows},
};

use crate::formatting::{format_page_controls, layout, truncate_string};
use crate::listing::{FilterState, PageState};
use crate::models::{Catalog, Company, Job};

#[derive(Tabled)]
struct JobRow {
    #[tabled(rename = "ID")]
    id: String,

    #[tabled(rename = "Title")]
    title: String,

    #[tabled(rename = "Company")]
    company: String,

    #[tabled(rename = "Location")]
    location: String,

    #[tabled(rename = "Status")]
    status: String,

    #[tabled(rename = "Posted")]
    posted: String,
}

#[derive(Tabled)]
struct CompanyRow {
    #[tabled(rename = "ID")]
    id: String,

    #[tabled(rename = "Company")]
    name: String,
}

fn format_status(job: &Job) -> String {
    if job.is_open {
        "Open".green().to_string()
    } else {
        "Closed".red().to_string()
    }
}

/// Table of the jobs on one page
pub fn format_jobs(
    jobs: &[Job],
    companies: &[Company],
    title_max_length: usize,
    now: DateTime<Utc>,
) -> String {
    if jobs.is_empty() {
        return "No Jobs Found".yellow().to_string();
    }

    let rows: Vec<JobRow> = jobs
        .iter()
        .map(|job| JobRow {
            id: job.id.clone(),
            title: truncate_string(&job.title, title_max_length),
            company: Catalog::company_name(companies, &job.company_id)
                .unwrap_or(&job.company_id)
                .to_string(),
            location: job.location.clone(),
            status: format_status(job),
            posted: job.posted_display(now),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Width::wrap(200).keep_words(true))
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// Table of every company
pub fn format_companies(companies: &[Company]) -> String {
    if companies.is_empty() {
        return "No companies found".yellow().to_string();
    }

    let rows: Vec<CompanyRow> = companies
        .iter()
        .map(|c| CompanyRow {
            id: c.id.clone(),
            name: c.name.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

/// One-line summary of the active filters
pub fn format_filters(filters: &FilterState, companies: &[Company]) -> String {
    if filters.is_empty() {
        return "All jobs".dimmed().to_string();
    }

    let mut parts = Vec::new();
    if let Some(query) = filters.search() {
        parts.push(format!("{} \"{}\"", "search:".dimmed(), query));
    }
    if let Some(location) = filters.location() {
        parts.push(format!("{} {}", "location:".dimmed(), location));
    }
    if let Some(id) = filters.company() {
        let name = Catalog::company_name(companies, id).unwrap_or(id);
        parts.push(format!("{} {}", "company:".dimmed(), name));
    }
    parts.join("  ")
}

/// "Page 2 of 3 (14 jobs)" plus the pagination bar when there is more than one page
pub fn format_page_footer(pages: &PageState, total_jobs: usize) -> String {
    let summary = format!(
        "Page {} of {} ({} {})",
        pages.current_page(),
        pages.total_pages(),
        total_jobs,
        if total_jobs == 1 { "job" } else { "jobs" }
    );

    let controls = format_page_controls(&pages.controls());
    if controls.is_empty() {
        summary.dimmed().to_string()
    } else {
        format!(
            "{}\n{:^width$}",
            summary.dimmed(),
            controls,
            width = layout::BOX_WIDTH
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Strip ANSI color codes to compare visible text
    fn strip_ansi(s: &str) -> String {
        let mut result = String::new();
        let mut in_escape = false;

        for ch in s.chars() {
            if ch == '\x1b' {
                in_escape = true;
            } else if in_escape && ch == 'm' {
                in_escape = false;
            } else if !in_escape {
                result.push(ch);
            }
        }

        result
    }

    fn job(id: &str, title: &str, company_id: &str, is_open: bool) -> Job {
        Job {
            id: id.to_string(),
            title: title.to_string(),
            company_id: company_id.to_string(),
            location: "Karnataka".to_string(),
            description: String::new(),
            requirements: String::new(),
            is_open,
            saved: false,
            posted_at: None,
        }
    }

    fn companies() -> Vec<Company> {
        vec![Company {
            id: "c1".to_string(),
            name: "Acme".to_string(),
            logo_url: None,
        }]
    }

    #[test]
    fn test_format_jobs_resolves_company_names() {
        let jobs = vec![
            job("1", "Backend Engineer", "c1", true),
            job("2", "Designer", "c9", false),
        ];
        let out = strip_ansi(&format_jobs(&jobs, &companies(), 40, Utc::now()));
        assert!(out.contains("Backend Engineer"));
        assert!(out.contains("Acme"));
        // Unknown company falls back to its id
        assert!(out.contains("c9"));
        assert!(out.contains("Closed"));
    }

    #[test]
    fn test_format_jobs_empty() {
        let out = strip_ansi(&format_jobs(&[], &[], 40, Utc::now()));
        assert_eq!(out, "No Jobs Found");
    }

    #[test]
    fn test_format_filters() {
        assert_eq!(
            strip_ansi(&format_filters(&FilterState::default(), &[])),
            "All jobs"
        );

        let filters = FilterState {
            search_query: "rust".to_string(),
            location: String::new(),
            company_id: "c1".to_string(),
        };
        assert_eq!(
            strip_ansi(&format_filters(&filters, &companies())),
            "search: \"rust\"  company: Acme"
        );
    }

    #[test]
    fn test_format_page_footer() {
        let mut pages = PageState::new(6);
        pages.set_result_count(14);
        pages.go_to(2);

        let out = strip_ansi(&format_page_footer(&pages, 14));
        assert!(out.starts_with("Page 2 of 3 (14 jobs)"));
        assert!(out.contains("‹ Prev 1 [2] 3 Next ›"));

        let mut single = PageState::new(6);
        single.set_result_count(1);
        assert_eq!(strip_ansi(&format_page_footer(&single, 1)), "Page 1 of 1 (1 job)");
    }
}
