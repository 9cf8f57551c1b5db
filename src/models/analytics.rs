//! Analytics models: range types, resolved date ranges and chart points

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// Named policy for deriving a concrete reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RangeType {
    CurrentWeek,
    LastWeek,
    CurrentMonth,
    LastMonth,
    Custom,
}

impl RangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeType::CurrentWeek => "CURRENT_WEEK",
            RangeType::LastWeek => "LAST_WEEK",
            RangeType::CurrentMonth => "CURRENT_MONTH",
            RangeType::LastMonth => "LAST_MONTH",
            RangeType::Custom => "CUSTOM",
        }
    }
}

impl std::fmt::Display for RangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RangeType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CURRENT_WEEK" => Ok(RangeType::CurrentWeek),
            "LAST_WEEK" => Ok(RangeType::LastWeek),
            "CURRENT_MONTH" => Ok(RangeType::CurrentMonth),
            "LAST_MONTH" => Ok(RangeType::LastMonth),
            "CUSTOM" => Ok(RangeType::Custom),
            _ => Err(AppError::InvalidArgument(format!("Invalid range type: {}", s))),
        }
    }
}

/// Analytics request body shared by the stats and chart endpoints
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsRequest {
    /// CURRENT_WEEK, LAST_WEEK, CURRENT_MONTH, LAST_MONTH or CUSTOM
    #[serde(default)]
    #[schema(value_type = Option<RangeType>)]
    pub range_type: Option<String>,
    /// First day of a CUSTOM range (YYYY-MM-DD)
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last day of a CUSTOM range (YYYY-MM-DD), inclusive
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Longest CUSTOM range accepted, in days (inclusive)
pub const MAX_CUSTOM_RANGE_DAYS: i64 = 3660;

/// A validated range request. Only `Custom` carries bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSpec {
    CurrentWeek,
    LastWeek,
    CurrentMonth,
    LastMonth,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl TryFrom<&AnalyticsRequest> for RangeSpec {
    type Error = AppError;

    fn try_from(request: &AnalyticsRequest) -> Result<Self, Self::Error> {
        let range_type: RangeType = request
            .range_type
            .as_deref()
            .ok_or_else(|| AppError::InvalidArgument("rangeType is required".to_string()))?
            .parse()?;

        Ok(match range_type {
            RangeType::CurrentWeek => RangeSpec::CurrentWeek,
            RangeType::LastWeek => RangeSpec::LastWeek,
            RangeType::CurrentMonth => RangeSpec::CurrentMonth,
            RangeType::LastMonth => RangeSpec::LastMonth,
            RangeType::Custom => {
                let (start, end) = match (request.start_date, request.end_date) {
                    (Some(start), Some(end)) => (start, end),
                    _ => {
                        return Err(AppError::InvalidArgument(
                            "Custom range requires startDate and endDate".to_string(),
                        ))
                    }
                };
                if start > end {
                    return Err(AppError::InvalidArgument(format!(
                        "Custom range startDate {} is after endDate {}",
                        start, end
                    )));
                }
                if (end - start).num_days() + 1 > MAX_CUSTOM_RANGE_DAYS {
                    return Err(AppError::InvalidArgument(format!(
                        "Custom range may span at most {} days",
                        MAX_CUSTOM_RANGE_DAYS
                    )));
                }
                RangeSpec::Custom { start, end }
            }
        })
    }
}

impl RangeSpec {
    pub fn range_type(&self) -> RangeType {
        match self {
            RangeSpec::CurrentWeek => RangeType::CurrentWeek,
            RangeSpec::LastWeek => RangeType::LastWeek,
            RangeSpec::CurrentMonth => RangeType::CurrentMonth,
            RangeSpec::LastMonth => RangeType::LastMonth,
            RangeSpec::Custom { .. } => RangeType::Custom,
        }
    }

    /// Resolve to concrete bounds relative to `now` (server local time).
    ///
    /// Current periods end at `now`; closed periods end on the last instant
    /// before the current period starts. Custom ranges end at 23:59:59 of
    /// their last day.
    pub fn resolve(&self, now: NaiveDateTime) -> DateRange {
        let today = now.date();
        match *self {
            RangeSpec::CurrentWeek => DateRange {
                start: start_of_day(monday_of(today)),
                end: now,
            },
            RangeSpec::LastWeek => {
                let end = start_of_day(monday_of(today)) - Duration::nanoseconds(1);
                DateRange {
                    start: start_of_day(end.date() - Duration::days(6)),
                    end,
                }
            }
            RangeSpec::CurrentMonth => DateRange {
                start: start_of_day(first_of_month(today)),
                end: now,
            },
            RangeSpec::LastMonth => {
                let end = start_of_day(first_of_month(today)) - Duration::nanoseconds(1);
                DateRange {
                    start: start_of_day(first_of_month(end.date())),
                    end,
                }
            }
            RangeSpec::Custom { start, end } => DateRange {
                start: start_of_day(start),
                end: start_of_day(end) + Duration::seconds(86_399),
            },
        }
    }
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// Inclusive window of local timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    /// From midnight today up to `now`
    pub fn today(now: NaiveDateTime) -> Self {
        Self {
            start: start_of_day(now.date()),
            end: now,
        }
    }

    /// Every calendar date from `start` to `end`, inclusive and ascending
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.end.date();
        self.start.date().iter_days().take_while(move |d| *d <= last)
    }
}

/// Dashboard totals for a range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_scans: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub range_type: RangeType,
}

/// Scans on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyChartPoint {
    pub date: NaiveDate,
    pub scans: i64,
}

/// Scans during one hour of the day (0-23)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HourlyChartPoint {
    pub hour: u32,
    pub scans: i64,
}
