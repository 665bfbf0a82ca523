use async_trait::async_trait;
use models::Employee;

use crate::errors::ServiceError;

/// Load/save boundary between the in-memory collection and its persistent form.
/// Implementations hand back the whole collection and replace it whole.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn load(&self) -> Result<Vec<Employee>, ServiceError>;
    async fn save(&self, employees: &[Employee]) -> Result<(), ServiceError>;
}
