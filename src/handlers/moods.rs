use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::mood::{CreateMoodRequest, Mood};
use crate::AppState;

pub async fn list_moods(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Value>> {
    let moods = sqlx::query_as::<_, Mood>(
        r#"
        SELECT * FROM moods
        WHERE user_id = $1
        ORDER BY logged_at DESC
        "#,
    )
    .bind(auth_user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(json!({ "moods": moods })))
}

pub async fn create_mood(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateMoodRequest>,
) -> AppResult<(StatusCode, Json<Mood>)> {
    let mood_label = body
        .mood
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| AppError::Validation("Mood is required".into()))?;

    let logged_at = body.logged_at.unwrap_or_else(Utc::now);

    let mood = sqlx::query_as::<_, Mood>(
        r#"
        INSERT INTO moods (id, user_id, mood, logged_at)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(mood_label)
    .bind(logged_at)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(mood)))
}

pub async fn delete_mood(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(mood_id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    // Absent and not-owned look the same to the caller.
    let mood = sqlx::query_as::<_, Mood>("SELECT * FROM moods WHERE id = $1 AND user_id = $2")
        .bind(mood_id)
        .bind(auth_user.id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Mood not found".into()))?;

    sqlx::query("DELETE FROM moods WHERE id = $1 AND user_id = $2")
        .bind(mood_id)
        .bind(auth_user.id)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({ "message": "Mood deleted", "mood": mood })))
}
