//! Data models for the analytics server

pub mod analytics;
pub mod claims;
pub mod qr_scan;

// Re-export commonly used types
pub use analytics::{
    AnalyticsRequest, DailyChartPoint, DashboardStats, DateRange, HourlyChartPoint, RangeSpec,
    RangeType,
};
pub use claims::Claims;
pub use qr_scan::QrScan;
