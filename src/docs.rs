use crate::api::department::{DepartmentEmployee, DepartmentReq};
use crate::api::document::CreateDocument;
use crate::api::employee::{CreateEmployee, EmployeeListRow, InitialPayroll};
use crate::api::payroll::{CreatePayroll, PayrollRow};
use crate::api::timeoff::{CreateTimeOff, TimeOffRow, UpdateTimeOffStatus};
use crate::api::admin_users::{CreateUser, UpdateUser};
use crate::model::department::Department;
use crate::model::document::Document;
use crate::model::employee::Employee;
use crate::models::{LoginReq, PublicUser};
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HR Dashboard API",
        version = "1.0.0",
        description = r#"
## HR Dashboard Backend

REST API for an HR management dashboard: employees, departments, payroll,
time-off requests, documents, and user accounts.

### Security
All endpoints except login/logout require **JWT Bearer authentication**
(24-hour tokens). User management under `/api/admin/users` additionally
requires the **admin** role.

### Consistency
Employee creation and deletion are transactional with the employee's
payroll record: the two rows appear and disappear together.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::logout,
        crate::auth::handlers::check,

        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::payroll::list_payrolls,
        crate::api::payroll::get_payroll,
        crate::api::payroll::create_payroll,
        crate::api::payroll::update_payroll,

        crate::api::timeoff::list_timeoff,
        crate::api::timeoff::list_employee_timeoff,
        crate::api::timeoff::create_timeoff,
        crate::api::timeoff::update_timeoff_status,
        crate::api::timeoff::delete_timeoff,

        crate::api::department::list_departments,
        crate::api::department::get_department,
        crate::api::department::create_department,
        crate::api::department::update_department,
        crate::api::department::department_employees,

        crate::api::document::list_documents,
        crate::api::document::create_document,
        crate::api::document::delete_document,

        crate::api::admin_users::list_users,
        crate::api::admin_users::create_user,
        crate::api::admin_users::update_user,
        crate::api::admin_users::delete_user,
    ),
    components(
        schemas(
            LoginReq,
            PublicUser,
            CreateEmployee,
            InitialPayroll,
            Employee,
            EmployeeListRow,
            CreatePayroll,
            PayrollRow,
            CreateTimeOff,
            UpdateTimeOffStatus,
            TimeOffRow,
            Department,
            DepartmentReq,
            DepartmentEmployee,
            Document,
            CreateDocument,
            CreateUser,
            UpdateUser,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Authentication APIs"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Payroll", description = "Payroll management APIs"),
        (name = "TimeOff", description = "Time-off request APIs"),
        (name = "Department", description = "Department directory APIs"),
        (name = "Document", description = "Document APIs"),
        (name = "Admin", description = "Administrator-only user management"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
