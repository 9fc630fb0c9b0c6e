use crate::app::ports::LocationRepository;
use crate::domain::{Location, LocationStatus};
use crate::error::Result;
use std::sync::Arc;
use tracing::debug;

/// Keyword search over active locations.
#[derive(Clone)]
pub struct SearchService {
    repo: Arc<dyn LocationRepository>,
}

impl SearchService {
    pub fn new(repo: Arc<dyn LocationRepository>) -> Self {
        Self { repo }
    }

    /// Name or address match, ranked. A blank keyword yields nothing.
    pub async fn search(&self, keyword: &str) -> Result<Vec<Location>> {
        let Some(keyword) = normalize(keyword) else {
            return Ok(Vec::new());
        };
        let results = self
            .repo
            .search_by_keyword(keyword, LocationStatus::Active)
            .await?;
        debug!(keyword, hits = results.len(), "Keyword search");
        Ok(results)
    }

    pub async fn search_by_name(&self, keyword: &str) -> Result<Vec<Location>> {
        match normalize(keyword) {
            Some(k) => self.repo.search_by_name(k, LocationStatus::Active).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn search_by_address(&self, keyword: &str) -> Result<Vec<Location>> {
        match normalize(keyword) {
            Some(k) => self.repo.search_by_address(k, LocationStatus::Active).await,
            None => Ok(Vec::new()),
        }
    }
}

fn normalize(keyword: &str) -> Option<&str> {
    let trimmed = keyword.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
