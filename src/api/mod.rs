pub mod admin_users;
pub mod department;
pub mod document;
pub mod employee;
pub mod payroll;
pub mod timeoff;
