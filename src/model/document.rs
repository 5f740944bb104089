use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub r#type: String,
    /// Uploader's username, joined from the users table.
    pub uploaded_by: Option<String>,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
}
