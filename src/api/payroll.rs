use crate::{
    error::ApiError,
    model::payroll::{PayrollStatus, net_salary},
};
use actix_web::{HttpResponse, web};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::MySqlPool;
use std::str::FromStr;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
pub struct CreatePayroll {
    pub employee_id: Option<String>,
    #[schema(example = 50000.0)]
    pub base_salary: Option<f64>,
    #[schema(example = 5000.0)]
    pub bonus: Option<f64>,
    #[schema(example = 2000.0)]
    pub deductions: Option<f64>,
    #[schema(example = "2024-01-31", format = "date", value_type = String)]
    pub payment_date: Option<NaiveDate>,
}

/// Payroll row joined with employee and department context.
#[derive(Serialize, sqlx::FromRow, ToSchema)]
pub struct PayrollRow {
    pub id: String,
    pub employee_id: String,
    pub base_salary: f64,
    pub bonus: f64,
    pub deductions: f64,
    pub net_salary: f64,
    #[schema(value_type = String, format = "date")]
    pub payment_date: NaiveDate,
    #[schema(example = "pending")]
    pub status: String,
    pub employee_name: String,
    pub email: String,
    pub department_name: Option<String>,
}

const PAYROLL_VIEW: &str = r#"
    SELECT
        p.id,
        p.employee_id,
        p.base_salary,
        p.bonus,
        p.deductions,
        p.net_salary,
        p.payment_date,
        p.status,
        e.name AS employee_name,
        e.email,
        d.name AS department_name
    FROM payroll p
    JOIN employees e ON p.employee_id = e.id
    LEFT JOIN departments d ON e.department_id = d.id
"#;

/// Accepts a JSON number or a numeric string; the dashboard submits salary
/// fields both ways.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Normalizes to a calendar date; time-of-day components are dropped.
fn normalize_payment_date(raw: &str) -> Result<NaiveDate, ApiError> {
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.date());
    }
    Err(ApiError::validation("Invalid payment date"))
}

async fn fetch_payroll_view(pool: &MySqlPool, id: &str) -> Result<Option<PayrollRow>, ApiError> {
    let sql = format!("{} WHERE p.id = ?", PAYROLL_VIEW);
    let row = sqlx::query_as::<_, PayrollRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// List payrolls
#[utoipa::path(
    get,
    path = "/api/payroll",
    responses((status = 200, description = "Payroll records", body = [PayrollRow])),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn list_payrolls(pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let sql = format!("{} ORDER BY p.payment_date DESC", PAYROLL_VIEW);
    let payrolls = sqlx::query_as::<_, PayrollRow>(&sql)
        .fetch_all(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(payrolls))
}

/// Get payroll by ID
#[utoipa::path(
    get,
    path = "/api/payroll/{id}",
    params(("id", Path, description = "Payroll ID")),
    responses(
        (status = 200, body = PayrollRow),
        (status = 404, description = "Payroll not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn get_payroll(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let payroll_id = path.into_inner();

    match fetch_payroll_view(pool.get_ref(), &payroll_id).await? {
        Some(p) => Ok(HttpResponse::Ok().json(p)),
        None => Err(ApiError::NotFound("Payroll not found")),
    }
}

/// Create payroll
///
/// Inserts a pending payroll row and repoints the employee's current
/// payroll link, in one transaction.
#[utoipa::path(
    post,
    path = "/api/payroll",
    request_body = CreatePayroll,
    responses(
        (status = 201, description = "Payroll created", body = PayrollRow),
        (status = 400, description = "Missing required fields")
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn create_payroll(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreatePayroll>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = payload
        .employee_id
        .as_deref()
        .filter(|s| !s.trim().is_empty());
    let (employee_id, base_salary, payment_date) =
        match (employee_id, payload.base_salary, payload.payment_date) {
            (Some(e), Some(b), Some(p)) => (e, b, p),
            _ => return Err(ApiError::validation("Missing required fields")),
        };

    let bonus = payload.bonus.unwrap_or(0.0);
    let deductions = payload.deductions.unwrap_or(0.0);
    let net = net_salary(base_salary, bonus, deductions);
    let id = Uuid::new_v4().to_string();

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO payroll
        (id, employee_id, base_salary, bonus, deductions, net_salary, payment_date, status)
        VALUES (?, ?, ?, ?, ?, ?, ?, 'pending')
        "#,
    )
    .bind(&id)
    .bind(employee_id)
    .bind(base_salary)
    .bind(bonus)
    .bind(deductions)
    .bind(net)
    .bind(payment_date)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE employees SET payroll_id = ? WHERE id = ?")
        .bind(&id)
        .bind(employee_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(payroll_id = %id, %employee_id, "Payroll created");

    match fetch_payroll_view(pool.get_ref(), &id).await? {
        Some(p) => Ok(HttpResponse::Created().json(p)),
        None => Err(ApiError::Internal("payroll row missing after insert")),
    }
}

/// Update payroll
///
/// Recomputes net salary server-side; a client-supplied net_salary is
/// ignored.
#[utoipa::path(
    put,
    path = "/api/payroll/{id}",
    params(("id", Path, description = "Payroll ID")),
    request_body = Object,
    responses(
        (status = 200, description = "Payroll updated", body = PayrollRow),
        (status = 400, description = "Missing or non-numeric fields"),
        (status = 404, description = "Payroll not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn update_payroll(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let payroll_id = path.into_inner();

    let base_salary = body
        .get("base_salary")
        .and_then(coerce_number)
        .ok_or_else(|| ApiError::validation("Missing required fields"))?;

    let status_raw = body
        .get("status")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::validation("Missing required fields"))?;
    let status = PayrollStatus::from_str(status_raw)
        .map_err(|_| ApiError::validation("Invalid status. Allowed: pending, paid, cancelled"))?;

    let payment_date_raw = body
        .get("payment_date")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::validation("Missing required fields"))?;
    let payment_date = normalize_payment_date(payment_date_raw)?;

    let bonus = match body.get("bonus") {
        None | Some(Value::Null) => 0.0,
        Some(v) => coerce_number(v).ok_or_else(|| ApiError::validation("Invalid numeric values"))?,
    };
    let deductions = match body.get("deductions") {
        None | Some(Value::Null) => 0.0,
        Some(v) => coerce_number(v).ok_or_else(|| ApiError::validation("Invalid numeric values"))?,
    };

    let net = net_salary(base_salary, bonus, deductions);

    // rows_affected is 0 for a no-op update on MySQL, so existence is
    // checked through the follow-up select instead.
    sqlx::query(
        r#"
        UPDATE payroll
        SET base_salary = ?, bonus = ?, deductions = ?, net_salary = ?, payment_date = ?, status = ?
        WHERE id = ?
        "#,
    )
    .bind(base_salary)
    .bind(bonus)
    .bind(deductions)
    .bind(net)
    .bind(payment_date)
    .bind(status.to_string())
    .bind(&payroll_id)
    .execute(pool.get_ref())
    .await?;

    match fetch_payroll_view(pool.get_ref(), &payroll_id).await? {
        Some(p) => Ok(HttpResponse::Ok().json(p)),
        None => Err(ApiError::NotFound("Payroll not found")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_numbers_and_numeric_strings() {
        assert_eq!(coerce_number(&json!(1200.5)), Some(1200.5));
        assert_eq!(coerce_number(&json!("1200.5")), Some(1200.5));
        assert_eq!(coerce_number(&json!(" 300 ")), Some(300.0));
        assert_eq!(coerce_number(&json!("12k")), None);
        assert_eq!(coerce_number(&json!(null)), None);
        assert_eq!(coerce_number(&json!([1])), None);
    }

    #[test]
    fn normalizes_datetime_to_calendar_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        assert_eq!(normalize_payment_date("2024-05-10").unwrap(), expected);
        assert_eq!(
            normalize_payment_date("2024-05-10T14:30:00").unwrap(),
            expected
        );
        assert_eq!(
            normalize_payment_date("2024-05-10T14:30:00+00:00").unwrap(),
            expected
        );
        assert!(normalize_payment_date("next tuesday").is_err());
    }
}
