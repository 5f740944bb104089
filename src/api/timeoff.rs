use crate::{error::ApiError, model::time_off::TimeOffStatus};
use actix_web::{HttpResponse, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use std::str::FromStr;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

/// Time-off request joined with employee and department context.
#[derive(Serialize, sqlx::FromRow, ToSchema)]
pub struct TimeOffRow {
    pub id: String,
    pub employee_id: String,
    #[schema(value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = "date")]
    pub end_date: NaiveDate,
    #[schema(example = "vacation")]
    pub r#type: String,
    #[schema(example = "pending")]
    pub status: String,
    pub reason: Option<String>,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
    pub employee_name: String,
    pub email: String,
    pub department_name: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateTimeOff {
    pub employee_id: Option<String>,
    #[schema(example = "2024-05-05", format = "date", value_type = String)]
    pub start_date: Option<NaiveDate>,
    #[schema(example = "2024-05-10", format = "date", value_type = String)]
    pub end_date: Option<NaiveDate>,
    #[schema(example = "vacation")]
    pub r#type: Option<String>,
    pub reason: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateTimeOffStatus {
    #[schema(example = "approved")]
    pub status: Option<String>,
}

const TIMEOFF_VIEW: &str = r#"
    SELECT
        t.id,
        t.employee_id,
        t.start_date,
        t.end_date,
        t.type,
        t.status,
        t.reason,
        t.created_at,
        e.name AS employee_name,
        e.email,
        d.name AS department_name
    FROM time_off t
    JOIN employees e ON t.employee_id = e.id
    LEFT JOIN departments d ON e.department_id = d.id
"#;

async fn fetch_timeoff_view(pool: &MySqlPool, id: &str) -> Result<Option<TimeOffRow>, ApiError> {
    let sql = format!("{} WHERE t.id = ?", TIMEOFF_VIEW);
    let row = sqlx::query_as::<_, TimeOffRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// List time-off requests
#[utoipa::path(
    get,
    path = "/api/timeoff",
    responses((status = 200, description = "All time-off requests", body = [TimeOffRow])),
    security(("bearer_auth" = [])),
    tag = "TimeOff"
)]
pub async fn list_timeoff(pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let sql = format!("{} ORDER BY t.created_at DESC", TIMEOFF_VIEW);
    let requests = sqlx::query_as::<_, TimeOffRow>(&sql)
        .fetch_all(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(requests))
}

/// List time-off requests for one employee
#[utoipa::path(
    get,
    path = "/api/timeoff/employee/{employee_id}",
    params(("employee_id", Path, description = "Employee ID")),
    responses((status = 200, description = "Employee's time-off requests", body = [TimeOffRow])),
    security(("bearer_auth" = [])),
    tag = "TimeOff"
)]
pub async fn list_employee_timeoff(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let sql = format!(
        "{} WHERE t.employee_id = ? ORDER BY t.created_at DESC",
        TIMEOFF_VIEW
    );
    let requests = sqlx::query_as::<_, TimeOffRow>(&sql)
        .bind(&employee_id)
        .fetch_all(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(requests))
}

/// Create time-off request
///
/// New requests always start pending. A one-day request (start == end) is
/// allowed.
#[utoipa::path(
    post,
    path = "/api/timeoff",
    request_body = CreateTimeOff,
    responses(
        (status = 201, description = "Request created", body = TimeOffRow),
        (status = 400, description = "Missing fields, inverted dates, or unknown employee")
    ),
    security(("bearer_auth" = [])),
    tag = "TimeOff"
)]
pub async fn create_timeoff(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateTimeOff>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = payload
        .employee_id
        .as_deref()
        .filter(|s| !s.trim().is_empty());
    let kind = payload.r#type.as_deref().filter(|s| !s.trim().is_empty());
    let (employee_id, start_date, end_date, kind) =
        match (employee_id, payload.start_date, payload.end_date, kind) {
            (Some(e), Some(s), Some(d), Some(k)) => (e, s, d, k),
            _ => return Err(ApiError::validation("Missing required fields")),
        };

    if start_date > end_date {
        return Err(ApiError::validation("Start date cannot be after end date"));
    }

    // An unknown employee is a 400 here, not a 404.
    let employee_exists: Option<String> =
        sqlx::query_scalar("SELECT id FROM employees WHERE id = ?")
            .bind(employee_id)
            .fetch_optional(pool.get_ref())
            .await?;

    if employee_exists.is_none() {
        return Err(ApiError::validation("Employee not found"));
    }

    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO time_off
        (id, employee_id, start_date, end_date, type, status, reason)
        VALUES (?, ?, ?, ?, ?, 'pending', ?)
        "#,
    )
    .bind(&id)
    .bind(employee_id)
    .bind(start_date)
    .bind(end_date)
    .bind(kind)
    .bind(payload.reason.as_deref().unwrap_or(""))
    .execute(pool.get_ref())
    .await?;

    info!(request_id = %id, %employee_id, "Time-off request created");

    match fetch_timeoff_view(pool.get_ref(), &id).await? {
        Some(row) => Ok(HttpResponse::Created().json(row)),
        None => Err(ApiError::Internal("time-off row missing after insert")),
    }
}

/// Review time-off request
///
/// The only transitions are pending -> approved and pending -> rejected.
/// Any authenticated caller may review; there is no ownership or role
/// restriction on this endpoint.
#[utoipa::path(
    patch,
    path = "/api/timeoff/{id}/status",
    params(("id", Path, description = "Time-off request ID")),
    request_body = UpdateTimeOffStatus,
    responses(
        (status = 200, description = "Status updated", body = TimeOffRow),
        (status = 400, description = "Target status is not approved/rejected"),
        (status = 404, description = "Request not found")
    ),
    security(("bearer_auth" = [])),
    tag = "TimeOff"
)]
pub async fn update_timeoff_status(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
    payload: web::Json<UpdateTimeOffStatus>,
) -> Result<HttpResponse, ApiError> {
    let request_id = path.into_inner();

    let status = payload
        .status
        .as_deref()
        .and_then(|s| TimeOffStatus::from_str(s).ok())
        .filter(|s| s.is_reviewable_target())
        .ok_or_else(|| ApiError::validation("Invalid status value"))?;

    let existing: Option<String> = sqlx::query_scalar("SELECT id FROM time_off WHERE id = ?")
        .bind(&request_id)
        .fetch_optional(pool.get_ref())
        .await?;

    if existing.is_none() {
        return Err(ApiError::NotFound("Timeoff request not found"));
    }

    sqlx::query("UPDATE time_off SET status = ? WHERE id = ?")
        .bind(status.to_string())
        .bind(&request_id)
        .execute(pool.get_ref())
        .await?;

    info!(%request_id, status = %status, "Time-off request reviewed");

    match fetch_timeoff_view(pool.get_ref(), &request_id).await? {
        Some(row) => Ok(HttpResponse::Ok().json(row)),
        None => Err(ApiError::NotFound("Timeoff request not found")),
    }
}

/// Delete time-off request
#[utoipa::path(
    delete,
    path = "/api/timeoff/{id}",
    params(("id", Path, description = "Time-off request ID")),
    responses(
        (status = 200, description = "Request deleted"),
        (status = 404, description = "Request not found")
    ),
    security(("bearer_auth" = [])),
    tag = "TimeOff"
)]
pub async fn delete_timeoff(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let request_id = path.into_inner();

    let result = sqlx::query("DELETE FROM time_off WHERE id = ?")
        .bind(&request_id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Timeoff request not found"));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Timeoff request deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review_target(raw: &str) -> Option<TimeOffStatus> {
        TimeOffStatus::from_str(raw)
            .ok()
            .filter(|s| s.is_reviewable_target())
    }

    #[test]
    fn approved_and_rejected_are_the_only_targets() {
        assert_eq!(review_target("approved"), Some(TimeOffStatus::Approved));
        assert_eq!(review_target("rejected"), Some(TimeOffStatus::Rejected));
        assert_eq!(review_target("pending"), None);
        assert_eq!(review_target("cancelled"), None);
    }

    #[test]
    fn zero_length_request_passes_date_check() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 5).unwrap();
        assert!(day <= day);

        let later = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        assert!(later > day); // start after end is the rejected shape
    }
}
