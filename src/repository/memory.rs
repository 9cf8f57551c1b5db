//! In-process scan store

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    models::{analytics::DateRange, qr_scan::QrScan},
};

use super::ScanStore;

#[derive(Default)]
struct Inner {
    next_id: i64,
    scans: Vec<QrScan>,
}

/// Scan store kept in memory; same inclusive range semantics as PostgreSQL.
#[derive(Default)]
pub struct MemoryScanStore {
    inner: RwLock<Inner>,
}

impl MemoryScanStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.scans.len()
    }

    async fn times_in(&self, range: &DateRange) -> Vec<NaiveDateTime> {
        self.inner
            .read()
            .await
            .scans
            .iter()
            .map(|s| s.scan_time)
            .filter(|t| *t >= range.start && *t <= range.end)
            .collect()
    }
}

#[async_trait]
impl ScanStore for MemoryScanStore {
    async fn count_in_range(&self, range: &DateRange) -> AppResult<i64> {
        Ok(self.times_in(range).await.len() as i64)
    }

    async fn group_by_day(&self, range: &DateRange) -> AppResult<Vec<(NaiveDate, i64)>> {
        let mut days: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        for t in self.times_in(range).await {
            *days.entry(t.date()).or_default() += 1;
        }
        Ok(days.into_iter().collect())
    }

    async fn group_by_hour(&self, range: &DateRange) -> AppResult<Vec<(u32, i64)>> {
        let mut hours: BTreeMap<u32, i64> = BTreeMap::new();
        for t in self.times_in(range).await {
            *hours.entry(t.hour()).or_default() += 1;
        }
        Ok(hours.into_iter().collect())
    }

    async fn append(&self, scan_time: NaiveDateTime) -> AppResult<QrScan> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let scan = QrScan {
            id: inner.next_id,
            scan_time,
        };
        inner.scans.push(scan.clone());
        Ok(scan)
    }
}
