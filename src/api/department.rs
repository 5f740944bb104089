use crate::{error::ApiError, model::department::Department};
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
pub struct DepartmentReq {
    #[schema(example = "Engineering")]
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Employee summary inside a department roster (no payroll columns).
#[derive(Serialize, sqlx::FromRow, ToSchema)]
pub struct DepartmentEmployee {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    pub location: String,
    #[schema(value_type = String, format = "date")]
    pub join_date: NaiveDate,
    pub phone: String,
}

// Employees are matched by department id, not name; name collisions must
// not leak employees across departments.
const DEPARTMENT_VIEW: &str = r#"
    SELECT
        d.id,
        d.name,
        d.description,
        COUNT(e.id) AS employee_count
    FROM departments d
    LEFT JOIN employees e ON e.department_id = d.id
"#;

/// List departments
#[utoipa::path(
    get,
    path = "/api/departments",
    responses((status = 200, description = "Departments with employee counts", body = [Department])),
    security(("bearer_auth" = [])),
    tag = "Department"
)]
pub async fn list_departments(pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let sql = format!(
        "{} GROUP BY d.id, d.name, d.description ORDER BY d.name",
        DEPARTMENT_VIEW
    );
    let departments = sqlx::query_as::<_, Department>(&sql)
        .fetch_all(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(departments))
}

/// Get department by ID
#[utoipa::path(
    get,
    path = "/api/departments/{id}",
    params(("id", Path, description = "Department ID")),
    responses(
        (status = 200, body = Department),
        (status = 404, description = "Department not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Department"
)]
pub async fn get_department(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let department_id = path.into_inner();

    let department = fetch_department(pool.get_ref(), &department_id).await?;

    match department {
        Some(d) => Ok(HttpResponse::Ok().json(d)),
        None => Err(ApiError::NotFound("Department not found")),
    }
}

async fn fetch_department(pool: &MySqlPool, id: &str) -> Result<Option<Department>, ApiError> {
    let sql = format!(
        "{} WHERE d.id = ? GROUP BY d.id, d.name, d.description",
        DEPARTMENT_VIEW
    );
    let row = sqlx::query_as::<_, Department>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Create department
#[utoipa::path(
    post,
    path = "/api/departments",
    request_body = DepartmentReq,
    responses(
        (status = 201, description = "Department created", body = Department),
        (status = 400, description = "Name is required")
    ),
    security(("bearer_auth" = [])),
    tag = "Department"
)]
pub async fn create_department(
    pool: web::Data<MySqlPool>,
    payload: web::Json<DepartmentReq>,
) -> Result<HttpResponse, ApiError> {
    let name = payload
        .name
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ApiError::validation("Department name is required"))?;

    let id = Uuid::new_v4().to_string();

    sqlx::query("INSERT INTO departments (id, name, description) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(name)
        .bind(payload.description.as_deref())
        .execute(pool.get_ref())
        .await?;

    info!(department_id = %id, name, "Department created");

    match fetch_department(pool.get_ref(), &id).await? {
        Some(d) => Ok(HttpResponse::Created().json(d)),
        None => Err(ApiError::Internal("department row missing after insert")),
    }
}

/// Update department
#[utoipa::path(
    put,
    path = "/api/departments/{id}",
    params(("id", Path, description = "Department ID")),
    request_body = DepartmentReq,
    responses(
        (status = 200, description = "Department updated", body = Department),
        (status = 400, description = "Name is required"),
        (status = 404, description = "Department not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Department"
)]
pub async fn update_department(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
    payload: web::Json<DepartmentReq>,
) -> Result<HttpResponse, ApiError> {
    let department_id = path.into_inner();

    let name = payload
        .name
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ApiError::validation("Department name is required"))?;

    let existing: Option<String> = sqlx::query_scalar("SELECT id FROM departments WHERE id = ?")
        .bind(&department_id)
        .fetch_optional(pool.get_ref())
        .await?;

    if existing.is_none() {
        return Err(ApiError::NotFound("Department not found"));
    }

    sqlx::query("UPDATE departments SET name = ?, description = ? WHERE id = ?")
        .bind(name)
        .bind(payload.description.as_deref())
        .bind(&department_id)
        .execute(pool.get_ref())
        .await?;

    match fetch_department(pool.get_ref(), &department_id).await? {
        Some(d) => Ok(HttpResponse::Ok().json(d)),
        None => Err(ApiError::NotFound("Department not found")),
    }
}

/// List employees in a department
#[utoipa::path(
    get,
    path = "/api/departments/{id}/employees",
    params(("id", Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department roster", body = [DepartmentEmployee]),
        (status = 404, description = "Department not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Department"
)]
pub async fn department_employees(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let department_id = path.into_inner();

    let existing: Option<String> = sqlx::query_scalar("SELECT id FROM departments WHERE id = ?")
        .bind(&department_id)
        .fetch_optional(pool.get_ref())
        .await?;

    if existing.is_none() {
        return Err(ApiError::NotFound("Department not found"));
    }

    let employees = sqlx::query_as::<_, DepartmentEmployee>(
        r#"
        SELECT id, name, email, role, status, location, join_date, phone
        FROM employees
        WHERE department_id = ?
        ORDER BY name
        "#,
    )
    .bind(&department_id)
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(employees))
}
