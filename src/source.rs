//! Job and company fetch collaborators
//!
//! `JobSource` is the boundary the listing controller fetches through. The
//! board ships `CatalogSource`, which reads a JSON catalog file and answers
//! queries the way the hosted backend does: exact match on location and
//! company, case-insensitive substring match on the title.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::listing::{FetchError, FilterState};
use crate::models::{Catalog, Company, Job};

/// Asynchronous access to job and company records
pub trait JobSource: Send + Sync + 'static {
    /// Jobs matching the filters
    fn fetch_jobs(
        &self,
        filters: &FilterState,
    ) -> impl Future<Output = Result<Vec<Job>, FetchError>> + Send;

    /// Every company, for the company filter options
    fn fetch_companies(&self) -> impl Future<Output = Result<Vec<Company>, FetchError>> + Send;
}

/// Check whether a job matches the backend query for `filters`
pub fn job_matches(job: &Job, filters: &FilterState) -> bool {
    if let Some(location) = filters.location()
        && job.location != location
    {
        return false;
    }
    if let Some(company) = filters.company()
        && job.company_id != company
    {
        return false;
    }
    match filters.search() {
        Some(query) => job.title.to_lowercase().contains(&query.to_lowercase()),
        None => true,
    }
}

/// Job source backed by a JSON catalog file
#[derive(Debug, Clone)]
pub struct CatalogSource {
    path: PathBuf,
    latency: Duration,
}

impl CatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            latency: Duration::ZERO,
        }
    }

    /// Add artificial latency to every request
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the catalog. The file is re-read on every request so
    /// edits show up on the next fetch.
    async fn load(&self) -> Result<Catalog, FetchError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let path = self.path.clone();
        // Run blocking file IO in a separate thread
        let result = tokio::task::spawn_blocking(move || read_catalog(&path)).await;

        match result {
            Ok(catalog) => catalog,
            Err(e) => Err(FetchError::Aborted(format!("Task join error: {}", e))),
        }
    }
}

fn read_catalog(path: &Path) -> Result<Catalog, FetchError> {
    let display_path = path.to_string_lossy().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| FetchError::Io {
        path: display_path.clone(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| FetchError::Parse {
        path: display_path,
        message: e.to_string(),
    })
}

impl JobSource for CatalogSource {
    async fn fetch_jobs(&self, filters: &FilterState) -> Result<Vec<Job>, FetchError> {
        let catalog = self.load().await?;
        let jobs: Vec<Job> = catalog
            .jobs
            .into_iter()
            .filter(|job| job_matches(job, filters))
            .collect();
        tracing::debug!(
            "Catalog query {:?} matched {} jobs",
            filters,
            jobs.len()
        );
        Ok(jobs)
    }

    async fn fetch_companies(&self) -> Result<Vec<Company>, FetchError> {
        Ok(self.load().await?.companies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn job(id: &str, title: &str, company_id: &str, location: &str) -> Job {
        Job {
            id: id.to_string(),
            title: title.to_string(),
            company_id: company_id.to_string(),
            location: location.to_string(),
            description: String::new(),
            requirements: String::new(),
            is_open: true,
            saved: false,
            posted_at: None,
        }
    }

    fn filters(search: &str, location: &str, company: &str) -> FilterState {
        FilterState {
            search_query: search.to_string(),
            location: location.to_string(),
            company_id: company.to_string(),
        }
    }

    #[test]
    fn test_empty_filters_match_everything() {
        let j = job("1", "Backend Engineer", "c1", "Goa");
        assert!(job_matches(&j, &FilterState::default()));
    }

    #[test]
    fn test_search_is_case_insensitive_title_substring() {
        let j = job("1", "Senior Rust Engineer", "c1", "Goa");
        assert!(job_matches(&j, &filters("rust", "", "")));
        assert!(job_matches(&j, &filters("SENIOR", "", "")));
        assert!(!job_matches(&j, &filters("python", "", "")));
    }

    #[test]
    fn test_location_and_company_are_exact() {
        let j = job("1", "Designer", "c1", "Tamil Nadu");
        assert!(job_matches(&j, &filters("", "Tamil Nadu", "")));
        assert!(!job_matches(&j, &filters("", "Tamil", "")));
        assert!(job_matches(&j, &filters("", "", "c1")));
        assert!(!job_matches(&j, &filters("", "", "c10")));
    }

    #[test]
    fn test_filters_combine_with_and() {
        let j = job("1", "Data Analyst", "c2", "Kerala");
        assert!(job_matches(&j, &filters("data", "Kerala", "c2")));
        assert!(!job_matches(&j, &filters("data", "Kerala", "c1")));
    }

    fn write_catalog(contents: &str) -> PathBuf {
        let dir = std::env::temp_dir();
        let path = dir.join(format!(
            "hirrd-catalog-test-{}-{}.json",
            std::process::id(),
            contents.len()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[tokio::test]
    async fn test_catalog_source_filters_jobs() {
        let path = write_catalog(
            r#"{
                "companies": [{"id": "c1", "name": "Acme"}],
                "jobs": [
                    {"id": "1", "title": "Rust Engineer", "company_id": "c1", "location": "Goa"},
                    {"id": "2", "title": "Go Engineer", "company_id": "c1", "location": "Delhi"}
                ]
            }"#,
        );
        let source = CatalogSource::new(&path);

        let jobs = source.fetch_jobs(&filters("", "Goa", "")).await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "1");

        let companies = source.fetch_companies().await.unwrap();
        assert_eq!(companies[0].name, "Acme");

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_catalog_source_missing_file_is_io_error() {
        let source = CatalogSource::new("/nonexistent/hirrd/catalog.json");
        let err = source.fetch_jobs(&FilterState::default()).await.unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
    }

    #[tokio::test]
    async fn test_catalog_source_bad_json_is_parse_error() {
        let path = write_catalog("{ not json");
        let source = CatalogSource::new(&path);
        let err = source.fetch_companies().await.unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }));
        std::fs::remove_file(path).ok();
    }
}
