//! Business logic services

pub mod analytics;
pub mod clock;

use std::sync::Arc;

use crate::repository::{Repository, ScanStore};

use clock::{Clock, SystemClock};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub analytics: analytics::AnalyticsService,
}

impl Services {
    /// Create all services backed by PostgreSQL
    pub fn new(repository: Repository) -> Self {
        Self::with_store(Arc::new(repository.qr_scans), Arc::new(SystemClock))
    }

    /// Create all services over an arbitrary scan store and clock
    pub fn with_store(store: Arc<dyn ScanStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            analytics: analytics::AnalyticsService::new(store, clock),
        }
    }
}
