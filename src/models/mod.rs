//! Data models for the job board.
//!
//! Job and company records as returned by the job source, the catalog file
//! format, built-in filter options and configuration types.

mod config;
mod job;
mod locations;

pub use config::{
    BoardConfig, ConfigError, DisplayConfig, ListingConfig, SessionConfig, SourceConfig,
};
pub use job::{Catalog, Company, Job};
pub use locations::location_options;
