use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::collections::BTreeSet;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::AppState;

/// Distinct activity days as "YYYY-MM-DD" strings, ascending. Days are
/// taken from the UTC components of each timestamp, and two entries on the
/// same day collapse to one date.
fn activity_dates(timestamps: &[DateTime<Utc>]) -> Vec<String> {
    timestamps
        .iter()
        .map(|t| t.date_naive().format("%Y-%m-%d").to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Value>> {
    let timestamps = sqlx::query_scalar::<_, DateTime<Utc>>(
        "SELECT created_at FROM journal_entries WHERE user_id = $1",
    )
    .bind(auth_user.id)
    .fetch_all(&state.db)
    .await?;

    let dates = activity_dates(&timestamps);

    Ok(Json(json!({ "count": dates.len(), "dates": dates })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_input() {
        assert!(activity_dates(&[]).is_empty());
    }

    #[test]
    fn test_same_day_counted_once() {
        let dates = activity_dates(&[
            ts("2026-08-05T09:00:00Z"),
            ts("2026-08-05T18:30:00Z"),
            ts("2026-08-05T23:59:59Z"),
        ]);
        assert_eq!(dates, vec!["2026-08-05"]);
    }

    #[test]
    fn test_sorted_ascending() {
        let dates = activity_dates(&[
            ts("2026-08-05T12:00:00Z"),
            ts("2026-01-02T12:00:00Z"),
            ts("2025-12-31T12:00:00Z"),
        ]);
        assert_eq!(dates, vec!["2025-12-31", "2026-01-02", "2026-08-05"]);
    }

    #[test]
    fn test_utc_midnight_boundary_splits_days() {
        let dates = activity_dates(&[
            ts("2026-08-05T23:59:59Z"),
            ts("2026-08-06T00:00:01Z"),
        ]);
        assert_eq!(dates, vec!["2026-08-05", "2026-08-06"]);
    }

    #[test]
    fn test_offset_timestamps_use_utc_components() {
        // 01:30+02:00 is 23:30 UTC of the previous day.
        let with_offset: DateTime<Utc> = "2026-08-06T01:30:00+02:00".parse().unwrap();
        assert_eq!(activity_dates(&[with_offset]), vec!["2026-08-05"]);
    }
}
