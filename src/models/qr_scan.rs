//! QR scan event model

use chrono::NaiveDateTime;
use sqlx::FromRow;

/// One recorded QR code scan. Rows are never updated.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct QrScan {
    pub id: i64,
    /// Server local time of the scan
    pub scan_time: NaiveDateTime,
}
