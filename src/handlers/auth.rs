use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::{
    jwt::create_token,
    password::{hash_password, verify_password},
};
use crate::error::{AppError, AppResult};
use crate::models::user::{LoginRequest, RegisterRequest, User, UserPublic};
use crate::AppState;

/// Normalize and validate a submitted email address. Emails are compared
/// case-insensitively, so they are lowercased once here and stored that way.
fn normalize_email(email: Option<&str>) -> AppResult<String> {
    let email = email.map(str::trim).unwrap_or_default().to_lowercase();
    if !validator::validate_email(email.as_str()) {
        return Err(AppError::Validation("A valid email is required.".into()));
    }
    Ok(email)
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let email = normalize_email(body.email.as_deref())?;

    let password = body.password.as_deref().unwrap_or_default();
    if password.len() < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters long.".into(),
        ));
    }

    let name = body
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("Anonymous");

    let existing =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE LOWER(email) = $1")
            .bind(&email)
            .fetch_one(&state.db)
            .await?;

    if existing > 0 {
        return Err(AppError::Conflict("User already exists".into()));
    }

    let password_hash = hash_password(password)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, name, email, password_hash)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(&state.db)
    .await?;

    let token = create_token(user.id, &state.config)?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully",
            "token": token,
            "user": UserPublic::from(user),
        })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<Value>> {
    let email = normalize_email(body.email.as_deref())?;

    let password = body.password.as_deref().unwrap_or_default();
    if password.is_empty() {
        return Err(AppError::Validation("Password is required.".into()));
    }

    // Unknown email and wrong password are indistinguishable to the caller.
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(password, &user.password_hash)? {
        return Err(AppError::Unauthorized);
    }

    let token = create_token(user.id, &state.config)?;

    Ok(Json(json!({
        "message": "Login successful",
        "token": token,
        "user": UserPublic::from(user),
    })))
}

/// Tokens are stateless, so signing out is a client-side discard; the
/// endpoint exists so the frontend has something to call.
pub async fn signout() -> Json<Value> {
    Json(json!({ "message": "Sign out successful" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email_lowercases_and_trims() {
        let email = normalize_email(Some("  Ada@Example.COM ")).unwrap();
        assert_eq!(email, "ada@example.com");
    }

    #[test]
    fn test_normalize_email_rejects_garbage() {
        assert!(normalize_email(Some("not-an-email")).is_err());
        assert!(normalize_email(Some("")).is_err());
        assert!(normalize_email(None).is_err());
    }
}
