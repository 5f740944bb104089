use crate::{
    error::ApiError,
    model::{
        employee::{Employee, EmployeeStatus},
        payroll::net_salary,
    },
    utils::db_utils::{build_update_sql, execute_update},
};
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sqlx::MySqlPool;
use std::str::FromStr;
use tracing::{error, info};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
pub struct InitialPayroll {
    #[schema(example = 50000.0)]
    #[serde(default)]
    pub base_salary: f64,
    #[schema(example = 5000.0)]
    #[serde(default)]
    pub bonus: f64,
    #[schema(example = 2000.0)]
    #[serde(default)]
    pub deductions: f64,
}

impl Default for InitialPayroll {
    fn default() -> Self {
        Self {
            base_salary: 0.0,
            bonus: 0.0,
            deductions: 0.0,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "john.doe@company.com", format = "email")]
    pub email: String,
    pub department_id: String,
    #[schema(example = "Software Engineer")]
    pub role: String,
    #[schema(example = "active")]
    pub status: String,
    #[schema(example = "Dhaka")]
    pub location: String,
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub join_date: NaiveDate,
    #[schema(example = "+8801712345678")]
    pub phone: String,
    #[serde(default)]
    pub payroll: InitialPayroll,
}

/// Roster row: employee LEFT JOINed with its department and current payroll.
#[derive(Serialize, sqlx::FromRow, ToSchema)]
pub struct EmployeeListRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    pub location: String,
    #[schema(value_type = String, format = "date")]
    pub join_date: NaiveDate,
    pub phone: String,
    pub department_name: Option<String>,
    pub base_salary: Option<f64>,
    pub bonus: Option<f64>,
    pub deductions: Option<f64>,
    pub net_salary: Option<f64>,
    pub payroll_status: Option<String>,
}

fn validate_new_employee(payload: &CreateEmployee) -> Result<(), ApiError> {
    let required = [
        ("name", &payload.name),
        ("email", &payload.email),
        ("department_id", &payload.department_id),
        ("role", &payload.role),
        ("status", &payload.status),
        ("location", &payload.location),
        ("phone", &payload.phone),
    ];
    if required.iter().any(|(_, v)| v.trim().is_empty()) {
        return Err(ApiError::validation("All employee fields are required"));
    }

    if EmployeeStatus::from_str(&payload.status).is_err() {
        return Err(ApiError::validation(
            "Invalid status. Allowed: active, inactive, on_leave",
        ));
    }

    if !payload.payroll.base_salary.is_finite() || payload.payroll.base_salary < 0.0 {
        return Err(ApiError::validation("Base salary must be a positive number"));
    }

    Ok(())
}

/// List employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses((status = 200, description = "Employee roster", body = [EmployeeListRow])),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let employees = sqlx::query_as::<_, EmployeeListRow>(
        r#"
        SELECT
            e.id,
            e.name,
            e.email,
            e.role,
            e.status,
            e.location,
            e.join_date,
            e.phone,
            d.name AS department_name,
            p.base_salary,
            p.bonus,
            p.deductions,
            p.net_salary,
            p.status AS payroll_status
        FROM employees e
        LEFT JOIN departments d ON e.department_id = d.id
        LEFT JOIN payroll p ON e.payroll_id = p.id
        ORDER BY e.created_at DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(employees))
}

/// Create employee
///
/// Inserts the employee and its initial payroll record as one transaction;
/// neither row persists unless both inserts and the back-link update commit.
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee and initial payroll created"),
        (status = 400, description = "Missing or invalid fields")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    validate_new_employee(&payload)?;

    let employee_id = Uuid::new_v4().to_string();
    let payroll_id = Uuid::new_v4().to_string();
    let net = net_salary(
        payload.payroll.base_salary,
        payload.payroll.bonus,
        payload.payroll.deductions,
    );

    // Dropping the transaction on any early return rolls everything back.
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO employees
        (id, name, email, department_id, role, status, location, join_date, phone)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&employee_id)
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&payload.department_id)
    .bind(&payload.role)
    .bind(&payload.status)
    .bind(&payload.location)
    .bind(payload.join_date)
    .bind(&payload.phone)
    .execute(&mut *tx)
    .await?;

    // Initial payroll starts pending, dated at the employee's join date.
    sqlx::query(
        r#"
        INSERT INTO payroll
        (id, employee_id, base_salary, bonus, deductions, net_salary, payment_date, status)
        VALUES (?, ?, ?, ?, ?, ?, ?, 'pending')
        "#,
    )
    .bind(&payroll_id)
    .bind(&employee_id)
    .bind(payload.payroll.base_salary)
    .bind(payload.payroll.bonus)
    .bind(payload.payroll.deductions)
    .bind(net)
    .bind(payload.join_date)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE employees SET payroll_id = ? WHERE id = ?")
        .bind(&payroll_id)
        .bind(&employee_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(%employee_id, %payroll_id, "Employee created");

    Ok(HttpResponse::Created().json(json!({
        "message": "Employee added successfully",
        "employee": {
            "id": employee_id,
            "name": payload.name,
            "email": payload.email,
            "department_id": payload.department_id,
            "role": payload.role,
            "status": payload.status,
            "location": payload.location,
            "join_date": payload.join_date,
            "phone": payload.phone,
            "payroll_id": payroll_id,
            "payroll": {
                "id": payroll_id,
                "base_salary": payload.payroll.base_salary,
                "bonus": payload.payroll.bonus,
                "deductions": payload.payroll.deductions,
                "net_salary": net,
                "status": "pending"
            }
        }
    })))
}

/// Get employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(("id", Path, description = "Employee ID")),
    responses(
        (status = 200, body = Employee),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let employee = sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, name, email, department_id, role, status, location,
               join_date, phone, payroll_id
        FROM employees
        WHERE id = ?
        "#,
    )
    .bind(&employee_id)
    .fetch_optional(pool.get_ref())
    .await?;

    match employee {
        Some(emp) => Ok(HttpResponse::Ok().json(emp)),
        None => Err(ApiError::NotFound("Employee not found")),
    }
}

/// Update employee
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(("id", Path, description = "Employee ID")),
    request_body = Object,
    responses(
        (status = 200, description = "Employee updated"),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn update_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    // payroll_id is excluded: only the lifecycle operations may repoint it.
    let update = build_update_sql(
        "employees",
        &body,
        &[
            "name",
            "email",
            "department_id",
            "role",
            "status",
            "location",
            "join_date",
            "phone",
        ],
        "id",
        &employee_id,
    )?;

    let affected = execute_update(pool.get_ref(), update).await?;

    if affected == 0 {
        return Err(ApiError::NotFound("Employee not found"));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Employee updated successfully" })))
}

/// Delete employee
///
/// Removes the employee and, when linked, its payroll row in one
/// transaction; no reader observes one without the other.
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(("id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deleted"),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let mut tx = pool.begin().await?;

    let payroll_id: Option<Option<String>> =
        sqlx::query_scalar("SELECT payroll_id FROM employees WHERE id = ?")
            .bind(&employee_id)
            .fetch_optional(&mut *tx)
            .await?;

    let payroll_id = match payroll_id {
        Some(p) => p,
        None => return Err(ApiError::NotFound("Employee not found")),
    };

    sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(&employee_id)
        .execute(&mut *tx)
        .await?;

    if let Some(payroll_id) = &payroll_id {
        sqlx::query("DELETE FROM payroll WHERE id = ?")
            .bind(payroll_id)
            .execute(&mut *tx)
            .await?;
    }

    if let Err(e) = tx.commit().await {
        error!(error = %e, %employee_id, "Failed to commit employee delete");
        return Err(e.into());
    }

    info!(%employee_id, "Employee deleted");

    Ok(HttpResponse::Ok().json(json!({ "message": "Employee deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> CreateEmployee {
        CreateEmployee {
            name: "John Doe".to_string(),
            email: "john@company.com".to_string(),
            department_id: "d-1".to_string(),
            role: "Engineer".to_string(),
            status: "active".to_string(),
            location: "Dhaka".to_string(),
            join_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            phone: "+880123".to_string(),
            payroll: InitialPayroll {
                base_salary: 50000.0,
                bonus: 5000.0,
                deductions: 2000.0,
            },
        }
    }

    #[test]
    fn accepts_complete_payload() {
        assert!(validate_new_employee(&valid_payload()).is_ok());
    }

    #[test]
    fn rejects_blank_required_field() {
        let mut p = valid_payload();
        p.location = "  ".to_string();
        assert!(matches!(
            validate_new_employee(&p),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn rejects_negative_base_salary() {
        let mut p = valid_payload();
        p.payroll.base_salary = -1.0;
        assert!(validate_new_employee(&p).is_err());
    }

    #[test]
    fn zero_base_salary_is_allowed() {
        let mut p = valid_payload();
        p.payroll = InitialPayroll::default();
        assert!(validate_new_employee(&p).is_ok());
    }

    #[test]
    fn rejects_unknown_status() {
        let mut p = valid_payload();
        p.status = "fired".to_string();
        assert!(validate_new_employee(&p).is_err());
    }
}
