//! Repository layer for scan event storage

pub mod memory;
pub mod qr_scans;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{analytics::DateRange, qr_scan::QrScan},
};

pub use memory::MemoryScanStore;
pub use qr_scans::QrScansRepository;

/// Event store for QR scans. All ranges are inclusive on both ends.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScanStore: Send + Sync {
    /// Number of scans within the range
    async fn count_in_range(&self, range: &DateRange) -> AppResult<i64>;

    /// `(date, count)` pairs for days with at least one scan, ascending
    async fn group_by_day(&self, range: &DateRange) -> AppResult<Vec<(NaiveDate, i64)>>;

    /// `(hour of day, count)` pairs for hours with at least one scan, ascending
    async fn group_by_hour(&self, range: &DateRange) -> AppResult<Vec<(u32, i64)>>;

    /// Record one scan
    async fn append(&self, scan_time: NaiveDateTime) -> AppResult<QrScan>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub qr_scans: QrScansRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            qr_scans: QrScansRepository::new(pool.clone()),
            pool,
        }
    }
}
