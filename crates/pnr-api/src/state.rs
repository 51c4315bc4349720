//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! ## Architecture
//!
//! Every catalog table has an in-memory [`Store`] that serves all reads.
//! When a database pool is configured, writes go to Postgres first and are
//! published to the store only after the insert succeeds; on startup the
//! stores are hydrated from the database.
//!
//! Writes are serialized through [`AppState::writer`], a `tokio` mutex held
//! across the check-then-insert of a single operation. Readers never take it.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::object_store::{InMemoryObjectStore, ObjectStore};

/// Default request body limit for material uploads (50 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

// -- Generic In-Memory Store --------------------------------------------------

/// Thread-safe, cloneable in-memory key-value store.
///
/// All operations are synchronous (the RwLock is `parking_lot`, not `tokio::sync`)
/// because we never hold the lock across `.await` points.
#[derive(Debug)]
pub struct Store<T: Clone + Send + Sync> {
    data: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Clone + Send + Sync> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: Clone + Send + Sync> Store<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a record, returning the previous value if the key existed.
    pub fn insert(&self, id: Uuid, value: T) -> Option<T> {
        self.data.write().insert(id, value)
    }

    /// Retrieve a record by ID.
    pub fn get(&self, id: &Uuid) -> Option<T> {
        self.data.read().get(id).cloned()
    }

    /// List all records, in no particular order.
    pub fn list(&self) -> Vec<T> {
        self.data.read().values().cloned().collect()
    }

    /// First record matching `pred`, if any.
    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.data.read().values().find(|v| pred(v)).cloned()
    }

    /// All records matching `pred`.
    pub fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.data
            .read()
            .values()
            .filter(|v| pred(v))
            .cloned()
            .collect()
    }

    /// Snapshot the whole table as an id-keyed map.
    pub fn snapshot(&self) -> HashMap<Uuid, T> {
        self.data.read().clone()
    }

    /// Check if a record exists.
    pub fn contains(&self, id: &Uuid) -> bool {
        self.data.read().contains_key(id)
    }

    /// Return the number of records.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone + Send + Sync> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

// -- Catalog Record Types -----------------------------------------------------

/// Academic branch (department), e.g. `CSE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchRecord {
    pub id: Uuid,
    pub name: String,
    /// Unique, upper-cased.
    pub code: String,
}

/// Specialization within a branch, e.g. `CSE-AIML`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubBranchRecord {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub branch_id: Uuid,
}

/// Curriculum scheme identified by a code such as `R22`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegulationRecord {
    pub id: Uuid,
    pub name: String,
    /// Unique, case-sensitive.
    pub code: String,
    pub start_year: i32,
    pub end_year: Option<i32>,
    pub description: Option<String>,
}

/// Academic year 1..=4.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct YearLevelRecord {
    pub id: Uuid,
    pub year_number: i32,
}

/// Half of a year level, numbered 1..=8 across the curriculum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemesterRecord {
    pub id: Uuid,
    pub sem_number: i32,
    pub year_id: Uuid,
}

/// A course offered in a branch, regulation, year and semester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectRecord {
    pub id: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub branch_id: Uuid,
    pub regulation_id: Uuid,
    pub year_id: Uuid,
    pub semester_id: Uuid,
    pub sub_branch_id: Option<Uuid>,
}

impl SubjectRecord {
    /// The hierarchy references a [`pnr_core::SubjectFilter`] evaluates.
    pub fn refs(&self) -> pnr_core::SubjectRefs {
        pnr_core::SubjectRefs {
            branch_id: self.branch_id,
            regulation_id: self.regulation_id,
            sub_branch_id: self.sub_branch_id,
            year_id: self.year_id,
            semester_id: self.semester_id,
        }
    }
}

/// An uploaded study document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialRecord {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub material_type: String,
    pub title: String,
    pub storage_url: String,
    pub storage_id: String,
    pub file_type: String,
    pub uploaded_on: DateTime<Utc>,
}

// -- Upload Clock -------------------------------------------------------------

/// Monotonic timestamp source for in-memory material persists.
///
/// Successive stamps never decrease, even if the wall clock steps back.
#[derive(Debug, Clone, Default)]
pub struct MaterialClock {
    last: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl MaterialClock {
    /// Return the next upload timestamp.
    pub fn stamp(&self) -> DateTime<Utc> {
        let mut last = self.last.lock();
        let now = Utc::now();
        let next = match *last {
            Some(prev) if prev > now => prev,
            _ => now,
        };
        *last = Some(next);
        next
    }

    /// Advance the clock past a timestamp assigned elsewhere.
    pub fn observe(&self, at: DateTime<Utc>) {
        let mut last = self.last.lock();
        if last.map_or(true, |prev| at > prev) {
            *last = Some(at);
        }
    }
}

// -- Application State --------------------------------------------------------

/// Application configuration.
///
/// Custom `Debug` redacts the database URL, which may carry credentials.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Postgres connection URL. `None` runs in-memory only.
    pub database_url: Option<String>,
    /// Maximum accepted upload request size in bytes.
    pub max_upload_bytes: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            database_url: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl AppConfig {
    /// Read `PORT` and `DATABASE_URL` from the environment.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|u| !u.trim().is_empty());
        Self {
            port,
            database_url,
            ..Self::default()
        }
    }
}

/// Shared application state accessible to all route handlers.
///
/// Clone-friendly via `Arc` internals in each `Store`.
#[derive(Debug, Clone)]
pub struct AppState {
    // -- Curriculum --
    pub branches: Store<BranchRecord>,
    pub sub_branches: Store<SubBranchRecord>,
    pub regulations: Store<RegulationRecord>,
    pub years: Store<YearLevelRecord>,
    pub semesters: Store<SemesterRecord>,

    // -- Catalog --
    pub subjects: Store<SubjectRecord>,
    pub materials: Store<MaterialRecord>,

    /// Single-writer lock for every catalog mutation.
    pub writer: Arc<tokio::sync::Mutex<()>>,

    /// Upload timestamps when no database assigns them.
    pub clock: MaterialClock,

    // -- Database persistence (optional) --
    /// When `Some`, every write is persisted to Postgres before it becomes
    /// visible in the in-memory stores.
    pub db_pool: Option<PgPool>,

    /// Destination for uploaded material files.
    pub object_store: Arc<dyn ObjectStore>,

    pub config: AppConfig,
}

impl AppState {
    /// In-memory state with default configuration and an in-memory object store.
    pub fn new() -> Self {
        Self::with_config(
            AppConfig::default(),
            Arc::new(InMemoryObjectStore::new()),
            None,
        )
    }

    /// State with explicit configuration, object store and optional pool.
    pub fn with_config(
        config: AppConfig,
        object_store: Arc<dyn ObjectStore>,
        db_pool: Option<PgPool>,
    ) -> Self {
        Self {
            branches: Store::new(),
            sub_branches: Store::new(),
            regulations: Store::new(),
            years: Store::new(),
            semesters: Store::new(),
            subjects: Store::new(),
            materials: Store::new(),
            writer: Arc::new(tokio::sync::Mutex::new(())),
            clock: MaterialClock::default(),
            db_pool,
            object_store,
            config,
        }
    }

    /// Hydrate in-memory stores from the database.
    ///
    /// Called once on startup when a database pool is available.
    pub async fn hydrate_from_db(&self) -> Result<(), String> {
        let pool = match &self.db_pool {
            Some(pool) => pool,
            None => return Ok(()),
        };

        let branches = crate::db::branches::load_all(pool)
            .await
            .map_err(|e| format!("failed to load branches: {e}"))?;
        let branch_count = branches.len();
        for record in branches {
            self.branches.insert(record.id, record);
        }

        let sub_branches = crate::db::sub_branches::load_all(pool)
            .await
            .map_err(|e| format!("failed to load sub-branches: {e}"))?;
        for record in sub_branches {
            self.sub_branches.insert(record.id, record);
        }

        let regulations = crate::db::regulations::load_all(pool)
            .await
            .map_err(|e| format!("failed to load regulations: {e}"))?;
        let regulation_count = regulations.len();
        for record in regulations {
            self.regulations.insert(record.id, record);
        }

        let years = crate::db::lattice::load_years(pool)
            .await
            .map_err(|e| format!("failed to load year levels: {e}"))?;
        for record in years {
            self.years.insert(record.id, record);
        }

        let semesters = crate::db::lattice::load_semesters(pool)
            .await
            .map_err(|e| format!("failed to load semesters: {e}"))?;
        for record in semesters {
            self.semesters.insert(record.id, record);
        }

        let subjects = crate::db::subjects::load_all(pool)
            .await
            .map_err(|e| format!("failed to load subjects: {e}"))?;
        let subject_count = subjects.len();
        for record in subjects {
            self.subjects.insert(record.id, record);
        }

        let materials = crate::db::materials::load_all(pool)
            .await
            .map_err(|e| format!("failed to load materials: {e}"))?;
        let material_count = materials.len();
        for record in materials {
            self.clock.observe(record.uploaded_on);
            self.materials.insert(record.id, record);
        }

        tracing::info!(
            branches = branch_count,
            regulations = regulation_count,
            years = self.years.len(),
            semesters = self.semesters.len(),
            subjects = subject_count,
            materials = material_count,
            "Hydrated in-memory stores from database"
        );

        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
