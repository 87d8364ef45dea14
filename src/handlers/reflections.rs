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
use crate::models::reflection::{Reflection, SaveReflectionRequest};
use crate::prompts;
use crate::AppState;

pub async fn daily_prompt() -> Json<Value> {
    Json(json!({ "prompt": prompts::daily_prompt() }))
}

pub async fn today_reflection(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Value>> {
    let today = Utc::now().date_naive();

    let reflection = sqlx::query_as::<_, Reflection>(
        "SELECT * FROM reflections WHERE user_id = $1 AND date = $2",
    )
    .bind(auth_user.id)
    .bind(today)
    .fetch_optional(&state.db)
    .await?;

    Ok(Json(json!({ "reflection": reflection })))
}

pub async fn list_reflections(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Value>> {
    let reflections = sqlx::query_as::<_, Reflection>(
        r#"
        SELECT * FROM reflections
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(auth_user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(json!({ "reflections": reflections })))
}

/// Save today's reflection: one record per user per day. A second save on
/// the same day replaces the text of the existing record instead of
/// creating a duplicate, and the prompt is recomputed on every save.
pub async fn save_reflection(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<SaveReflectionRequest>,
) -> AppResult<(StatusCode, Json<Reflection>)> {
    let text = body
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("Reflection text is required".into()))?;

    let today = Utc::now().date_naive();
    let prompt = prompts::prompt_for_date(today);

    let existing = sqlx::query_as::<_, Reflection>(
        "SELECT * FROM reflections WHERE user_id = $1 AND date = $2",
    )
    .bind(auth_user.id)
    .bind(today)
    .fetch_optional(&state.db)
    .await?;

    if let Some(current) = existing {
        let updated = sqlx::query_as::<_, Reflection>(
            r#"
            UPDATE reflections SET
                prompt = $3,
                text = $4,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(current.id)
        .bind(auth_user.id)
        .bind(prompt)
        .bind(text)
        .fetch_one(&state.db)
        .await?;

        return Ok((StatusCode::OK, Json(updated)));
    }

    // Two concurrent first saves for the same day race on the unique
    // (user_id, date) index; the loser lands here as an update.
    let created = sqlx::query_as::<_, Reflection>(
        r#"
        INSERT INTO reflections (id, user_id, prompt, text, date)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id, date) DO UPDATE SET
            prompt = EXCLUDED.prompt,
            text = EXCLUDED.text,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(prompt)
    .bind(text)
    .bind(today)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete_reflection(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(reflection_id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    let reflection = sqlx::query_as::<_, Reflection>(
        "SELECT * FROM reflections WHERE id = $1 AND user_id = $2",
    )
    .bind(reflection_id)
    .bind(auth_user.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("Reflection not found".into()))?;

    sqlx::query("DELETE FROM reflections WHERE id = $1 AND user_id = $2")
        .bind(reflection_id)
        .bind(auth_user.id)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({
        "message": "Reflection deleted",
        "reflection": reflection,
    })))
}
