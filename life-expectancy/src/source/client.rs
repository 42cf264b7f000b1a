//! A client for the Eurostat dissemination API.

use super::Source;
use anyhow::{bail, Context, Error};
use async_trait::async_trait;
use std::fmt::{self, Debug, Formatter};
use surf::Url;

/// Root of the Eurostat SDMX 2.1 data endpoint.
pub const DEFAULT_BASE_URL: &str = "https://ec.europa.eu/eurostat/api/dissemination/sdmx/2.1/data/";

/// Life expectancy by age, sex and NUTS 2 region.
pub const DEFAULT_DATASET: &str = "demo_r_mlifexp";

/// A Eurostat client.
///
/// Downloads a single dataset as an uncompressed TSV export, in the same layout as the files
/// offered for bulk download.
pub struct Client {
    client: surf::Client,
    base_url: Url,
    dataset: String,
}

impl Client {
    /// Connect to Eurostat.
    pub fn new(dataset: impl Into<String>) -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL.parse()?, dataset)
    }

    /// Connect to a Eurostat-compatible API rooted at `base_url`.
    pub fn with_base_url(base_url: Url, dataset: impl Into<String>) -> Result<Self, Error> {
        let dataset = dataset.into();
        if dataset.is_empty() {
            bail!("dataset code cannot be empty");
        }
        Ok(Self {
            client: surf::Client::new(),
            base_url,
            dataset,
        })
    }

    /// The URL from which the dataset is downloaded.
    pub fn url(&self) -> Result<Url, Error> {
        self.base_url
            .join(&format!("{}?format=TSV&compressed=false", self.dataset))
            .with_context(|| format!("invalid dataset code {}", self.dataset))
    }
}

impl Debug for Client {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("dataset", &self.dataset)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Source for Client {
    fn describe(&self) -> String {
        format!("Eurostat dataset {}", self.dataset)
    }

    async fn fetch(&self) -> Result<String, Error> {
        let url = self.url()?;
        tracing::info!("downloading {url}");
        let mut res = self.client.get(&url).await.map_err(Error::msg)?;
        if !res.status().is_success() {
            bail!("request to {url} failed with status {}", res.status());
        }
        res.body_string().await.map_err(Error::msg)
    }
}
