use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: String,
    pub text: String,
    /// Display time, e.g. "10:02 AM", stamped when the message is posted.
    pub time: String,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub sender: Option<String>,
    pub text: Option<String>,
}
