pub mod department;
pub mod document;
pub mod employee;
pub mod payroll;
pub mod role;
pub mod time_off;
pub mod user;
