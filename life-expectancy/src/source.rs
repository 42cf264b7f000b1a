//! Facilities for pulling raw life expectancy data.

use anyhow::Error;
use async_trait::async_trait;

mod client;
mod local;

pub use client::{Client, DEFAULT_BASE_URL, DEFAULT_DATASET};
pub use local::LocalSource;

/// A place raw Eurostat exports can be read from.
#[async_trait]
pub trait Source {
    /// A human-readable description of where the data comes from.
    fn describe(&self) -> String;

    /// Fetch the full contents of the raw, tab-separated export.
    async fn fetch(&self) -> Result<String, Error>;
}
