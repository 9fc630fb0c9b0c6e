use crate::app::ports::LocationRepository;
use crate::domain::{
    Latitude, Location, LocationAddress, LocationDetails, LocationName, LocationNumber,
    LocationStatus, Longitude,
};
use crate::error::{CenterError, Result};
use crate::storage::escape_like;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::task;
use tracing::{debug, info};

const SCHEMA: &str = r#"
    PRAGMA journal_mode=WAL;
    CREATE TABLE IF NOT EXISTS location (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        number      TEXT NOT NULL,
        name        TEXT NOT NULL,
        address     TEXT NOT NULL,
        latitude    REAL NOT NULL,
        longitude   REAL NOT NULL,
        status      INTEGER NOT NULL,
        created_at  TEXT NOT NULL,
        updated_at  TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_location_status ON location (status);
"#;

const COLUMNS: &str =
    "id, number, name, address, latitude, longitude, status, created_at, updated_at";

/// Column values as stored, before the value objects re-validate them.
struct LocationRow {
    id: i64,
    number: String,
    name: String,
    address: String,
    latitude: f64,
    longitude: f64,
    status: i64,
    created_at: String,
    updated_at: String,
}

impl LocationRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            number: row.get(1)?,
            name: row.get(2)?,
            address: row.get(3)?,
            latitude: row.get(4)?,
            longitude: row.get(5)?,
            status: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    fn into_location(self) -> Result<Location> {
        let details = LocationDetails {
            number: LocationNumber::new(&self.number)?,
            name: LocationName::new(&self.name)?,
            address: LocationAddress::new(&self.address)?,
            latitude: Latitude::new(self.latitude)?,
            longitude: Longitude::new(self.longitude)?,
        };
        let mut location = Location::new(
            self.id,
            details,
            LocationStatus::from_code(self.status)?,
            parse_timestamp(&self.created_at)?,
        );
        location.updated_at = parse_timestamp(&self.updated_at)?;
        Ok(location)
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| CenterError::database("timestamp column", e))
}

/// Ids bound per `IN (...)` query, well under SQLite's variable limit.
const IDS_PER_QUERY: usize = 500;

/// SQLite-backed repository. One connection behind a mutex, used from the
/// blocking thread pool.
pub struct SqliteLocationRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteLocationRepository {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path).map_err(|e| CenterError::database("open", e))?;
        info!("Opened location store at {}", path.display());
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| CenterError::database("open", e))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| CenterError::database("schema", e))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `op` with the locked connection on the blocking pool.
    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| CenterError::database("connection lock", e))?;
            op(&conn)
        })
        .await
        .map_err(|e| CenterError::database("blocking task", e))?
    }
}

fn query_rows<P: rusqlite::Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<Location>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| CenterError::database("prepare", e))?;
    let rows = stmt
        .query_map(params, LocationRow::from_row)
        .map_err(|e| CenterError::database("query", e))?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| CenterError::database("read row", e))?;
    rows.into_iter().map(LocationRow::into_location).collect()
}

#[async_trait]
impl LocationRepository for SqliteLocationRepository {
    async fn insert(&self, details: LocationDetails, status: LocationStatus) -> Result<Location> {
        let now = Utc::now();
        let row = details.clone();
        let id = self
            .run(move |conn| {
                conn.execute(
                    "INSERT INTO location (number, name, address, latitude, longitude, status, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
                    params![
                        row.number.as_str(),
                        row.name.as_str(),
                        row.address.as_str(),
                        row.latitude.value(),
                        row.longitude.value(),
                        status.code(),
                        now.to_rfc3339(),
                    ],
                )
                .map_err(|e| CenterError::database("insert location", e))?;
                Ok(conn.last_insert_rowid())
            })
            .await?;
        debug!("Created location: {} with id {}", details.name, id);
        Ok(Location::new(id, details, status, now))
    }

    async fn save(&self, location: &Location) -> Result<()> {
        let location = location.clone();
        let id = location.id;
        let changed = self
            .run(move |conn| {
                conn.execute(
                    "UPDATE location SET number = ?2, name = ?3, address = ?4, latitude = ?5,
                     longitude = ?6, status = ?7, updated_at = ?8 WHERE id = ?1",
                    params![
                        location.id,
                        location.number.as_str(),
                        location.name.as_str(),
                        location.address.as_str(),
                        location.latitude.value(),
                        location.longitude.value(),
                        location.status.code(),
                        location.updated_at.to_rfc3339(),
                    ],
                )
                .map_err(|e| CenterError::database("update location", e))
            })
            .await?;
        if changed == 0 {
            return Err(CenterError::NotFound { id });
        }
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Location>> {
        let row = self
            .run(move |conn| {
                conn.query_row(
                    &format!("SELECT {COLUMNS} FROM location WHERE id = ?1"),
                    params![id],
                    LocationRow::from_row,
                )
                .optional()
                .map_err(|e| CenterError::database("find location", e))
            })
            .await?;
        row.map(LocationRow::into_location).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Location>> {
        self.run(|conn| {
            query_rows(conn, &format!("SELECT {COLUMNS} FROM location ORDER BY id"), params![])
        })
        .await
    }

    async fn find_by_status(&self, status: LocationStatus) -> Result<Vec<Location>> {
        self.run(move |conn| {
            query_rows(
                conn,
                &format!("SELECT {COLUMNS} FROM location WHERE status = ?1 ORDER BY id"),
                params![status.code()],
            )
        })
        .await
    }

    async fn find_all_by_ids_and_status(
        &self,
        ids: &[i64],
        status: LocationStatus,
    ) -> Result<Vec<Location>> {
        // Sorted and deduplicated, so chunk results concatenate in id order
        let ids: Vec<i64> = ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.run(move |conn| {
            let mut found = Vec::new();
            for chunk in ids.chunks(IDS_PER_QUERY) {
                let placeholders = (2..chunk.len() + 2)
                    .map(|i| format!("?{i}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                let values = std::iter::once(status.code()).chain(chunk.iter().copied());
                found.extend(query_rows(
                    conn,
                    &format!(
                        "SELECT {COLUMNS} FROM location WHERE status = ?1 AND id IN ({placeholders}) ORDER BY id"
                    ),
                    params_from_iter(values),
                )?);
            }
            Ok(found)
        })
        .await
    }

    async fn update_status(&self, id: i64, status: LocationStatus) -> Result<usize> {
        self.run(move |conn| {
            conn.execute(
                "UPDATE location SET status = ?2, updated_at = ?3 WHERE id = ?1",
                params![id, status.code(), Utc::now().to_rfc3339()],
            )
            .map_err(|e| CenterError::database("update status", e))
        })
        .await
    }

    async fn search_by_keyword(
        &self,
        keyword: &str,
        status: LocationStatus,
    ) -> Result<Vec<Location>> {
        let pattern = escape_like(keyword);
        self.run(move |conn| {
            query_rows(
                conn,
                &format!(
                    r"SELECT {COLUMNS} FROM location
                      WHERE status = ?1
                        AND (name LIKE '%' || ?2 || '%' ESCAPE '\' OR address LIKE '%' || ?2 || '%' ESCAPE '\')
                      ORDER BY CASE
                          WHEN name LIKE ?2 || '%' ESCAPE '\' THEN 1
                          WHEN name LIKE '%' || ?2 || '%' ESCAPE '\' THEN 2
                          ELSE 3
                      END, name"
                ),
                params![status.code(), pattern],
            )
        })
        .await
    }

    async fn search_by_name(&self, keyword: &str, status: LocationStatus) -> Result<Vec<Location>> {
        let pattern = escape_like(keyword);
        self.run(move |conn| {
            query_rows(
                conn,
                &format!(
                    r"SELECT {COLUMNS} FROM location
                      WHERE status = ?1 AND name LIKE '%' || ?2 || '%' ESCAPE '\'
                      ORDER BY name"
                ),
                params![status.code(), pattern],
            )
        })
        .await
    }

    async fn search_by_address(
        &self,
        keyword: &str,
        status: LocationStatus,
    ) -> Result<Vec<Location>> {
        let pattern = escape_like(keyword);
        self.run(move |conn| {
            query_rows(
                conn,
                &format!(
                    r"SELECT {COLUMNS} FROM location
                      WHERE status = ?1 AND address LIKE '%' || ?2 || '%' ESCAPE '\'
                      ORDER BY address"
                ),
                params![status.code(), pattern],
            )
        })
        .await
    }
}
