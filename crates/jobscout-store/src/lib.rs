//! jobscout Storage Layer
//!
//! Implements the JobStore trait on SQLite.
//!
//! # Architecture
//!
//! - One `jobs` table; `job_hash` is the uniqueness key
//! - `seq` (rowid) records insertion order for tie-breaking
//! - Timestamps are stored as Unix milliseconds
//! - A `CHECK` constraint keeps `sent_at` and `sent_in_digest` in agreement
//!
//! # Examples
//!
//! ```no_run
//! use jobscout_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for job operations
//! ```

#![warn(missing_docs)]

use chrono::{DateTime, Duration, Utc};
use jobscout_domain::traits::JobStore;
use jobscout_domain::{Category, JobHash, JobId, JobRecord, SponsorConfidence, StoreStats, StoredRecord};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

const COLUMNS: &str = "id, job_hash, title, company, location, category, source, url, description, \
     posted_at, discovered_at, sponsor_confidence, sponsor_reasoning, entry_level_reasoning, \
     score, sent_at";

/// SQLite-based implementation of JobStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use jobscout_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("jobscout.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Convert JobId to bytes for storage
    fn job_id_to_bytes(id: JobId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    /// Convert bytes to JobId
    fn bytes_to_job_id(bytes: &[u8]) -> Result<JobId, StoreError> {
        let arr: [u8; 16] = bytes.try_into().map_err(|_| {
            StoreError::InvalidData(format!("Expected 16 bytes for JobId, got {}", bytes.len()))
        })?;
        Ok(JobId::from_value(u128::from_be_bytes(arr)))
    }

    fn millis_to_time(millis: i64) -> Result<DateTime<Utc>, StoreError> {
        DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| StoreError::InvalidData(format!("Timestamp out of range: {}", millis)))
    }

    /// Map a row selected with [`COLUMNS`] to a record
    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<JobRecord> {
        fn conversion(index: usize, ty: rusqlite::types::Type, e: StoreError) -> rusqlite::Error {
            rusqlite::Error::FromSqlConversionFailure(index, ty, Box::new(e))
        }
        use rusqlite::types::Type;

        let id_bytes: Vec<u8> = row.get(0)?;
        let id = Self::bytes_to_job_id(&id_bytes).map_err(|e| conversion(0, Type::Blob, e))?;

        let posted_at = row
            .get::<_, Option<i64>>(9)?
            .map(Self::millis_to_time)
            .transpose()
            .map_err(|e| conversion(9, Type::Integer, e))?;
        let discovered_at =
            Self::millis_to_time(row.get(10)?).map_err(|e| conversion(10, Type::Integer, e))?;

        let confidence: String = row.get(11)?;
        let sponsor_confidence = SponsorConfidence::parse(&confidence).ok_or_else(|| {
            conversion(
                11,
                Type::Text,
                StoreError::InvalidData(format!("Unknown sponsor confidence: {}", confidence)),
            )
        })?;

        let sent_at = row
            .get::<_, Option<i64>>(15)?
            .map(Self::millis_to_time)
            .transpose()
            .map_err(|e| conversion(15, Type::Integer, e))?;

        Ok(JobRecord::restore(StoredRecord {
            id,
            hash: JobHash::from_hex(row.get::<_, String>(1)?),
            title: row.get(2)?,
            company: row.get(3)?,
            location: row.get(4)?,
            category: Category::parse(&row.get::<_, String>(5)?),
            source: row.get(6)?,
            url: row.get(7)?,
            description: row.get(8)?,
            posted_at,
            discovered_at,
            sponsor_confidence,
            sponsor_reasoning: row.get(12)?,
            entry_level_reasoning: row.get(13)?,
            score: row.get(14)?,
            sent_at,
        }))
    }

    fn count(&self, sql: &str) -> Result<usize, StoreError> {
        let n: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

impl JobStore for SqliteStore {
    type Error = StoreError;

    fn insert_if_absent(&mut self, record: &JobRecord) -> Result<bool, Self::Error> {
        let inserted = self.conn.execute(
            "INSERT INTO jobs (id, job_hash, title, company, location, category, source, url, description,
                               posted_at, discovered_at, sponsor_confidence, sponsor_reasoning,
                               entry_level_reasoning, score, sent_in_digest, sent_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)
             ON CONFLICT(job_hash) DO NOTHING",
            params![
                Self::job_id_to_bytes(record.id),
                record.hash.as_str(),
                &record.title,
                &record.company,
                &record.location,
                record.category.as_str(),
                &record.source,
                &record.url,
                &record.description,
                record.posted_at.map(|t| t.timestamp_millis()),
                record.discovered_at.timestamp_millis(),
                record.sponsor_confidence.as_str(),
                &record.sponsor_reasoning,
                &record.entry_level_reasoning,
                record.score(),
                record.sent_in_digest(),
                record.sent_at.map(|t| t.timestamp_millis()),
            ],
        )?;

        Ok(inserted == 1)
    }

    fn contains_hash(&self, hash: &JobHash) -> Result<bool, Self::Error> {
        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM jobs WHERE job_hash = ?1",
                params![hash.as_str()],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        Ok(exists)
    }

    fn get(&self, id: JobId) -> Result<Option<JobRecord>, Self::Error> {
        let record = self
            .conn
            .query_row(
                &format!("SELECT {} FROM jobs WHERE id = ?1", COLUMNS),
                params![Self::job_id_to_bytes(id)],
                Self::row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    fn get_unsent(&self, limit: Option<usize>) -> Result<Vec<JobRecord>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM jobs WHERE sent_in_digest = 0
             ORDER BY score DESC, posted_at IS NULL, posted_at DESC, seq ASC
             LIMIT ?1",
            COLUMNS
        );
        // SQLite treats a negative LIMIT as unbounded
        let limit = limit.map(|n| n as i64).unwrap_or(-1);

        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map(params![limit], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn mark_sent(&mut self, ids: &[JobId], sent_at: DateTime<Utc>) -> Result<usize, Self::Error> {
        let tx = self.conn.transaction()?;
        let mut transitioned = 0;
        {
            let mut stmt = tx.prepare(
                "UPDATE jobs SET sent_in_digest = 1, sent_at = ?1
                 WHERE id = ?2 AND sent_in_digest = 0",
            )?;
            for id in ids {
                transitioned += stmt.execute(params![
                    sent_at.timestamp_millis(),
                    Self::job_id_to_bytes(*id)
                ])?;
            }
        }
        tx.commit()?;
        Ok(transitioned)
    }

    fn purge_older_than(&mut self, age: Duration, now: DateTime<Utc>) -> Result<usize, Self::Error> {
        let cutoff = now
            .checked_sub_signed(age)
            .ok_or_else(|| StoreError::InvalidData(format!("retention age of {} days is out of range", age.num_days())))?;
        let deleted = self.conn.execute(
            "DELETE FROM jobs WHERE discovered_at < ?1",
            params![cutoff.timestamp_millis()],
        )?;
        Ok(deleted)
    }

    fn count_discovered_before(&self, cutoff: DateTime<Utc>) -> Result<usize, Self::Error> {
        let n: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM jobs WHERE discovered_at < ?1",
            params![cutoff.timestamp_millis()],
            |row| row.get(0),
        )?;
        Ok(n as usize)
    }

    fn stats(&self) -> Result<StoreStats, Self::Error> {
        let total = self.count("SELECT COUNT(*) FROM jobs")?;
        let sent = self.count("SELECT COUNT(*) FROM jobs WHERE sent_in_digest = 1")?;
        Ok(StoreStats {
            total,
            sent,
            unsent: total - sent,
        })
    }
}
