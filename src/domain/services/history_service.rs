use std::sync::Arc;
use crate::domain::{
    models::report::{Report, ReportFilters},
    ports::ReportRepository,
};
use crate::error::AppError;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

pub const HISTORY_LIMIT: i64 = 100;

pub struct HistoryService {
    repo: Arc<dyn ReportRepository>,
}

impl HistoryService {
    pub fn new(repo: Arc<dyn ReportRepository>) -> Self {
        Self { repo }
    }

    /// Newest first, capped at [`HISTORY_LIMIT`].
    pub async fn list(&self, shop_id: &str, user_id: Option<&str>, filters: &ReportFilters) -> Result<Vec<Report>, AppError> {
        self.repo.list(shop_id, user_id, filters, HISTORY_LIMIT).await
    }

    pub async fn get_by_id(&self, shop_id: &str, id: &str) -> Result<Option<Report>, AppError> {
        self.repo.find_by_id(shop_id, id).await
    }

    pub async fn delete(&self, shop_id: &str, id: &str) -> Result<bool, AppError> {
        self.repo.delete(shop_id, id).await
    }
}

#[derive(Clone, Copy)]
pub enum RangeEdge {
    Start,
    End,
}

/// Accepts RFC 3339 or `YYYY-MM-DD`. A bare date expands to the first or last
/// instant of that day depending on the edge.
pub fn parse_range_bound(raw: &str, edge: RangeEdge) -> Result<DateTime<Utc>, AppError> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date: {}", raw)))?;

    let time = match edge {
        RangeEdge::Start => NaiveTime::MIN,
        RangeEdge::End => NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN),
    };
    Ok(date.and_time(time).and_utc())
}

/// Blank strings are treated as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_date_bounds_cover_whole_day() {
        let start = parse_range_bound("2025-02-10", RangeEdge::Start).unwrap();
        let end = parse_range_bound("2025-02-10", RangeEdge::End).unwrap();

        assert_eq!(start, Utc.with_ymd_and_hms(2025, 2, 10, 0, 0, 0).unwrap());
        assert_eq!(end.hour(), 23);
        assert_eq!(end.minute(), 59);
    }

    #[test]
    fn test_rfc3339_bound_is_kept() {
        let ts = parse_range_bound("2025-02-10T08:00:00+02:00", RangeEdge::End).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 2, 10, 6, 0, 0).unwrap());
    }

    #[test]
    fn test_garbage_bound_is_rejected() {
        assert!(parse_range_bound("last tuesday", RangeEdge::Start).is_err());
    }
}
