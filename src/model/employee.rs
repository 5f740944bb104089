use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    Active,
    Inactive,
    OnLeave,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": "a3f1c2d4-0000-4000-8000-000000000002",
        "name": "John Doe",
        "email": "john.doe@company.com",
        "department_id": "a3f1c2d4-0000-4000-8000-000000000001",
        "role": "Software Engineer",
        "status": "active",
        "location": "Dhaka",
        "join_date": "2024-01-01",
        "phone": "+8801712345678",
        "payroll_id": "a3f1c2d4-0000-4000-8000-000000000003"
    })
)]
pub struct Employee {
    pub id: String,

    #[schema(example = "John Doe")]
    pub name: String,

    #[schema(example = "john.doe@company.com")]
    pub email: String,

    pub department_id: Option<String>,

    /// Free-text job title, not the access-control role.
    #[schema(example = "Software Engineer")]
    pub role: String,

    #[schema(example = "active")]
    pub status: String,

    #[schema(example = "Dhaka")]
    pub location: String,

    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub join_date: NaiveDate,

    #[schema(example = "+8801712345678")]
    pub phone: String,

    /// Points at the employee's current payroll row; NULL only inside the
    /// creation transaction, never observable afterwards.
    pub payroll_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_uses_snake_case_wire_form() {
        assert_eq!(EmployeeStatus::OnLeave.to_string(), "on_leave");
        assert_eq!(
            EmployeeStatus::from_str("on_leave").unwrap(),
            EmployeeStatus::OnLeave
        );
        assert!(EmployeeStatus::from_str("retired").is_err());
    }
}
