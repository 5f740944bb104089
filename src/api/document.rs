use crate::{auth::auth::AuthUser, error::ApiError, model::document::Document};
use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
pub struct CreateDocument {
    #[schema(example = "Employment contract template")]
    pub title: Option<String>,
    #[schema(example = "contract")]
    pub r#type: Option<String>,
}

/// List documents
#[utoipa::path(
    get,
    path = "/api/documents",
    responses((status = 200, description = "All documents, newest first", body = [Document])),
    security(("bearer_auth" = [])),
    tag = "Document"
)]
pub async fn list_documents(pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let documents = sqlx::query_as::<_, Document>(
        r#"
        SELECT
            d.id,
            d.title,
            d.type,
            u.username AS uploaded_by,
            d.created_at
        FROM documents d
        LEFT JOIN users u ON d.uploaded_by = u.id
        ORDER BY d.created_at DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(documents))
}

/// Create document
///
/// The uploader is the authenticated caller; the user row is re-checked so
/// a stale token cannot attach a document to a deleted account.
#[utoipa::path(
    post,
    path = "/api/documents",
    request_body = CreateDocument,
    responses(
        (status = 201, description = "Document created"),
        (status = 400, description = "Title and type are required"),
        (status = 404, description = "Uploader no longer exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Document"
)]
pub async fn create_document(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateDocument>,
) -> Result<HttpResponse, ApiError> {
    let title = payload.title.as_deref().filter(|s| !s.trim().is_empty());
    let kind = payload.r#type.as_deref().filter(|s| !s.trim().is_empty());
    let (title, kind) = match (title, kind) {
        (Some(t), Some(k)) => (t, k),
        _ => return Err(ApiError::validation("Title and type are required")),
    };

    let uploader: Option<String> = sqlx::query_scalar("SELECT username FROM users WHERE id = ?")
        .bind(&auth.id)
        .fetch_optional(pool.get_ref())
        .await?;

    let uploader = uploader.ok_or(ApiError::NotFound("User not found"))?;

    let id = Uuid::new_v4().to_string();

    sqlx::query("INSERT INTO documents (id, title, type, uploaded_by) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(title)
        .bind(kind)
        .bind(&auth.id)
        .execute(pool.get_ref())
        .await?;

    info!(document_id = %id, uploader = %uploader, "Document created");

    Ok(HttpResponse::Created().json(json!({
        "message": "Document created successfully",
        "document": {
            "id": id,
            "title": title,
            "type": kind,
            "uploaded_by": uploader,
            "created_at": Utc::now(),
        }
    })))
}

/// Delete document
#[utoipa::path(
    delete,
    path = "/api/documents/{id}",
    params(("id", Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document deleted"),
        (status = 404, description = "Document not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Document"
)]
pub async fn delete_document(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let document_id = path.into_inner();

    let result = sqlx::query("DELETE FROM documents WHERE id = ?")
        .bind(&document_id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Document not found"));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Document deleted successfully" })))
}
