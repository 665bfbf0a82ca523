//! Domain entities for the employees service.
//! - `Employee` is the stored record, `EmployeePatch` the partial update body.
//! - `schema` owns the accepted field names and how keys are matched on read.

pub mod employee;
pub mod errors;
pub mod schema;

pub use employee::{Employee, EmployeePatch};
pub use errors::ModelError;
pub use schema::{FieldSchema, KeyMatching};
