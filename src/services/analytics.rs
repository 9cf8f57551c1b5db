//! QR scan analytics service
//!
//! Resolves dashboard range requests into concrete windows and turns the
//! store's sparse grouped counts into dense, zero-filled chart series.

use std::{collections::HashMap, hash::Hash, sync::Arc};

use crate::{
    error::AppResult,
    models::analytics::{
        AnalyticsRequest, DailyChartPoint, DashboardStats, DateRange, HourlyChartPoint, RangeSpec,
    },
    repository::ScanStore,
};

use super::clock::Clock;

/// Pair every key of a dense key sequence with its count from a sparse
/// lookup, defaulting to zero. Output order follows `keys`.
pub fn zero_fill<K, I, C>(keys: I, counts: C) -> impl Iterator<Item = (K, i64)>
where
    K: Eq + Hash,
    I: IntoIterator<Item = K>,
    C: IntoIterator<Item = (K, i64)>,
{
    let lookup: HashMap<K, i64> = counts.into_iter().collect();
    keys.into_iter().map(move |key| {
        let count = lookup.get(&key).copied().unwrap_or(0);
        (key, count)
    })
}

#[derive(Clone)]
pub struct AnalyticsService {
    store: Arc<dyn ScanStore>,
    clock: Arc<dyn Clock>,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn ScanStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Record one scan at the current time
    pub async fn log_scan(&self) -> AppResult<()> {
        let scan = self.store.append(self.clock.now()).await?;
        tracing::debug!(id = scan.id, scan_time = %scan.scan_time, "QR scan recorded");
        Ok(())
    }

    fn resolve(&self, request: &AnalyticsRequest) -> AppResult<(RangeSpec, DateRange)> {
        let spec = RangeSpec::try_from(request)?;
        let range = spec.resolve(self.clock.now());
        tracing::debug!(
            range_type = %spec.range_type(),
            start = %range.start,
            end = %range.end,
            "Resolved analytics range"
        );
        Ok((spec, range))
    }

    /// Total scans for the requested range
    pub async fn dashboard_stats(&self, request: &AnalyticsRequest) -> AppResult<DashboardStats> {
        let (spec, range) = self.resolve(request)?;
        let total_scans = self.store.count_in_range(&range).await?;

        Ok(DashboardStats {
            total_scans,
            start_date: range.start.date(),
            end_date: range.end.date(),
            range_type: spec.range_type(),
        })
    }

    /// Daily series for the requested range
    pub async fn chart_data(&self, request: &AnalyticsRequest) -> AppResult<Vec<DailyChartPoint>> {
        let (_, range) = self.resolve(request)?;
        self.daily_chart(&range).await
    }

    /// Hourly series from midnight today until now
    pub async fn today_hourly_chart(&self) -> AppResult<Vec<HourlyChartPoint>> {
        self.hourly_chart(&DateRange::today(self.clock.now())).await
    }

    /// One point per calendar day in the range, zero-filled
    pub async fn daily_chart(&self, range: &DateRange) -> AppResult<Vec<DailyChartPoint>> {
        let rows = self.store.group_by_day(range).await?;

        Ok(zero_fill(range.days(), rows)
            .map(|(date, scans)| DailyChartPoint { date, scans })
            .collect())
    }

    /// Exactly 24 points keyed by hour of day, zero-filled
    pub async fn hourly_chart(&self, range: &DateRange) -> AppResult<Vec<HourlyChartPoint>> {
        let rows = self.store.group_by_hour(range).await?;

        Ok(zero_fill(0..24u32, rows)
            .map(|(hour, scans)| HourlyChartPoint { hour, scans })
            .collect())
    }

    /// Cheap store round trip used by the readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        self.store
            .count_in_range(&DateRange::today(self.clock.now()))
            .await
            .map(|_| ())
    }
}
