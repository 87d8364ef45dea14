use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::entry::{CreateEntryRequest, EntryQuery, JournalEntry, UpdateEntryRequest};
use crate::AppState;

/// Half-open UTC range [00:00, next 00:00) covering one calendar day, so a
/// timestamp near midnight never drifts into an adjacent day.
fn utc_day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    let end = (date + chrono::Duration::days(1))
        .and_time(NaiveTime::MIN)
        .and_utc();
    (start, end)
}

pub async fn list_entries(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<EntryQuery>,
) -> AppResult<Json<Value>> {
    let entries = if let Some(date) = query.date {
        let (start, end) = utc_day_bounds(date);
        sqlx::query_as::<_, JournalEntry>(
            r#"
            SELECT * FROM journal_entries
            WHERE user_id = $1 AND created_at >= $2 AND created_at < $3
            ORDER BY created_at DESC
            "#,
        )
        .bind(auth_user.id)
        .bind(start)
        .bind(end)
        .fetch_all(&state.db)
        .await?
    } else {
        sqlx::query_as::<_, JournalEntry>(
            r#"
            SELECT * FROM journal_entries
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(auth_user.id)
        .fetch_all(&state.db)
        .await?
    };

    Ok(Json(json!({ "entries": entries })))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateEntryRequest>,
) -> AppResult<(StatusCode, Json<JournalEntry>)> {
    let content = body
        .content
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::Validation("Content is required".into()))?;

    let title = body
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("Untitled");

    let created_at = body.created_at.unwrap_or_else(Utc::now);

    let entry = sqlx::query_as::<_, JournalEntry>(
        r#"
        INSERT INTO journal_entries (id, user_id, title, content, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(title)
    .bind(content)
    .bind(created_at)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
    Json(body): Json<UpdateEntryRequest>,
) -> AppResult<Json<JournalEntry>> {
    // A supplied content must still be non-empty after trimming; an absent
    // field keeps its stored value.
    let content = match body.content.as_deref().map(str::trim) {
        Some("") => return Err(AppError::Validation("Content is required".into())),
        other => other.map(str::to_owned),
    };
    let title = body
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned);

    let entry = sqlx::query_as::<_, JournalEntry>(
        r#"
        UPDATE journal_entries SET
            title = COALESCE($3, title),
            content = COALESCE($4, content),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(entry_id)
    .bind(auth_user.id)
    .bind(title)
    .bind(content)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("Entry not found".into()))?;

    Ok(Json(entry))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    let entry = sqlx::query_as::<_, JournalEntry>(
        "SELECT * FROM journal_entries WHERE id = $1 AND user_id = $2",
    )
    .bind(entry_id)
    .bind(auth_user.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("Entry not found".into()))?;

    sqlx::query("DELETE FROM journal_entries WHERE id = $1 AND user_id = $2")
        .bind(entry_id)
        .bind(auth_user.id)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({ "message": "Entry deleted", "entry": entry })))
}
