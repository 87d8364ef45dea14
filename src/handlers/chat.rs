use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Timelike, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::chat::{ChatMessage, PostMessageRequest};
use crate::AppState;

/// 12-hour display time for the chat UI, e.g. "10:02 AM".
fn display_time(at: DateTime<Utc>) -> String {
    let (is_pm, hour) = at.hour12();
    format!(
        "{}:{:02} {}",
        hour,
        at.minute(),
        if is_pm { "PM" } else { "AM" }
    )
}

pub async fn list_messages(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let messages = sqlx::query_as::<_, ChatMessage>(
        "SELECT * FROM chat_messages ORDER BY created_at ASC",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(json!({ "messages": messages })))
}

pub async fn post_message(
    State(state): State<AppState>,
    Json(body): Json<PostMessageRequest>,
) -> AppResult<(StatusCode, Json<ChatMessage>)> {
    let sender = body
        .sender
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("Sender is required".into()))?;

    let text = body
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("Text is required".into()))?;

    let now = Utc::now();

    let message = sqlx::query_as::<_, ChatMessage>(
        r#"
        INSERT INTO chat_messages (id, sender, text, time, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(sender)
    .bind(text)
    .bind(display_time(now))
    .bind(now)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_time_morning() {
        let at: DateTime<Utc> = "2026-08-05T10:02:00Z".parse().unwrap();
        assert_eq!(display_time(at), "10:02 AM");
    }

    #[test]
    fn test_display_time_afternoon() {
        let at: DateTime<Utc> = "2026-08-05T13:05:00Z".parse().unwrap();
        assert_eq!(display_time(at), "1:05 PM");
    }

    #[test]
    fn test_display_time_midnight_is_twelve() {
        let at: DateTime<Utc> = "2026-08-05T00:30:00Z".parse().unwrap();
        assert_eq!(display_time(at), "12:30 AM");
    }

    #[test]
    fn test_display_time_noon_is_twelve_pm() {
        let at: DateTime<Utc> = "2026-08-05T12:00:00Z".parse().unwrap();
        assert_eq!(display_time(at), "12:00 PM");
    }
}
