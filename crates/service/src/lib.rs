//! Service layer providing the employee CRUD operations on top of models.
//! - Separates business rules from persistence via `EmployeeRepository`.
//! - Reuses validation and entity definitions in `models` crate.

pub mod employee_service;
pub mod errors;
pub mod repository;
pub mod storage;

pub use employee_service::{location_for, Created, EmployeeService, EMPLOYEES_PATH};
pub use errors::ServiceError;
pub use repository::EmployeeRepository;
