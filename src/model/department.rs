use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Department {
    #[schema(example = "a3f1c2d4-0000-4000-8000-000000000001")]
    pub id: String,

    #[schema(example = "Engineering")]
    pub name: String,

    #[schema(example = "Product engineering and platform teams")]
    pub description: Option<String>,

    /// Derived aggregate, joined by department id.
    #[schema(example = 12)]
    pub employee_count: i64,
}
