//! QR scans repository (PostgreSQL)

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{analytics::DateRange, qr_scan::QrScan},
};

use super::ScanStore;

#[derive(Clone)]
pub struct QrScansRepository {
    pool: Pool<Postgres>,
}

impl QrScansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScanStore for QrScansRepository {
    async fn count_in_range(&self, range: &DateRange) -> AppResult<i64> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM qr_scans WHERE scan_time BETWEEN $1 AND $2",
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    async fn group_by_day(&self, range: &DateRange) -> AppResult<Vec<(NaiveDate, i64)>> {
        let rows = sqlx::query_as::<_, (NaiveDate, i64)>(
            r#"
            SELECT scan_time::date AS day, COUNT(*) AS scans
            FROM qr_scans
            WHERE scan_time BETWEEN $1 AND $2
            GROUP BY day
            ORDER BY day
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn group_by_hour(&self, range: &DateRange) -> AppResult<Vec<(u32, i64)>> {
        let rows = sqlx::query_as::<_, (i32, i64)>(
            r#"
            SELECT EXTRACT(HOUR FROM scan_time)::int4 AS hour, COUNT(*) AS scans
            FROM qr_scans
            WHERE scan_time BETWEEN $1 AND $2
            GROUP BY hour
            ORDER BY hour
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(hour, scans)| u32::try_from(hour).ok().map(|h| (h, scans)))
            .collect())
    }

    async fn append(&self, scan_time: NaiveDateTime) -> AppResult<QrScan> {
        let row = sqlx::query_as::<_, QrScan>(
            "INSERT INTO qr_scans (scan_time) VALUES ($1) RETURNING id, scan_time",
        )
        .bind(scan_time)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
