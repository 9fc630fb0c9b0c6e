use crate::app::ports::LocationRepository;
use crate::domain::{Location, LocationDetails, LocationStatus};
use crate::error::{CenterError, Result};
use crate::storage::keyword_rank;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

struct Table {
    next_id: i64,
    rows: HashMap<i64, Location>,
}

/// In-memory repository for development and testing. Ids start at 1.
pub struct InMemoryLocationRepository {
    table: Mutex<Table>,
}

impl Default for InMemoryLocationRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLocationRepository {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(Table {
                next_id: 1,
                rows: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Table>> {
        self.table
            .lock()
            .map_err(|e| CenterError::database("in-memory lock", e))
    }

    /// Rows matching `filter`, ordered by id.
    fn select(&self, filter: impl Fn(&Location) -> bool) -> Result<Vec<Location>> {
        let table = self.lock()?;
        let mut rows: Vec<Location> = table.rows.values().filter(|l| filter(l)).cloned().collect();
        rows.sort_by_key(|l| l.id);
        Ok(rows)
    }
}

#[async_trait]
impl LocationRepository for InMemoryLocationRepository {
    async fn insert(&self, details: LocationDetails, status: LocationStatus) -> Result<Location> {
        let mut table = self.lock()?;
        let id = table.next_id;
        table.next_id += 1;

        let location = Location::new(id, details, status, Utc::now());
        table.rows.insert(id, location.clone());

        debug!("Created location: {} with id {}", location.name, id);
        Ok(location)
    }

    async fn save(&self, location: &Location) -> Result<()> {
        let mut table = self.lock()?;
        match table.rows.get_mut(&location.id) {
            Some(row) => {
                *row = location.clone();
                debug!("Updated location: {}", location.id);
                Ok(())
            }
            None => Err(CenterError::NotFound { id: location.id }),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Location>> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Location>> {
        self.select(|_| true)
    }

    async fn find_by_status(&self, status: LocationStatus) -> Result<Vec<Location>> {
        self.select(|l| l.status == status)
    }

    async fn find_all_by_ids_and_status(
        &self,
        ids: &[i64],
        status: LocationStatus,
    ) -> Result<Vec<Location>> {
        self.select(|l| l.status == status && ids.contains(&l.id))
    }

    async fn update_status(&self, id: i64, status: LocationStatus) -> Result<usize> {
        let mut table = self.lock()?;
        Ok(match table.rows.get_mut(&id) {
            Some(row) => {
                row.status = status;
                row.updated_at = Utc::now();
                1
            }
            None => 0,
        })
    }

    async fn search_by_keyword(
        &self,
        keyword: &str,
        status: LocationStatus,
    ) -> Result<Vec<Location>> {
        let keyword = keyword.to_ascii_lowercase();
        let mut ranked: Vec<(u8, Location)> = self
            .select(|l| l.status == status)?
            .into_iter()
            .filter_map(|l| keyword_rank(&l, &keyword).map(|rank| (rank, l)))
            .collect();
        ranked.sort_by(|(ra, a), (rb, b)| ra.cmp(rb).then_with(|| a.name.as_str().cmp(b.name.as_str())));
        Ok(ranked.into_iter().map(|(_, l)| l).collect())
    }

    async fn search_by_name(&self, keyword: &str, status: LocationStatus) -> Result<Vec<Location>> {
        let keyword = keyword.to_ascii_lowercase();
        let mut rows = self.select(|l| {
            l.status == status && l.name.as_str().to_ascii_lowercase().contains(&keyword)
        })?;
        rows.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        Ok(rows)
    }

    async fn search_by_address(
        &self,
        keyword: &str,
        status: LocationStatus,
    ) -> Result<Vec<Location>> {
        let keyword = keyword.to_ascii_lowercase();
        let mut rows = self.select(|l| {
            l.status == status && l.address.as_str().to_ascii_lowercase().contains(&keyword)
        })?;
        rows.sort_by(|a, b| a.address.as_str().cmp(b.address.as_str()));
        Ok(rows)
    }
}
