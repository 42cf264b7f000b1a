//! A source which reads from the local file system instead of the Eurostat API.

use super::Source;
use anyhow::{Context, Error};
use async_trait::async_trait;
use std::path::PathBuf;

/// A source which reads from the local file system instead of the Eurostat API.
#[derive(Clone, Debug)]
pub struct LocalSource {
    path: PathBuf,
}

impl LocalSource {
    /// Open a raw export saved at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Source for LocalSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String, Error> {
        async_std::fs::read_to_string(self.path.as_path())
            .await
            .with_context(|| format!("unable to read {}", self.path.display()))
    }
}
