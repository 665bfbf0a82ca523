use std::sync::Arc;

use models::{Employee, EmployeePatch};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::errors::ServiceError;
use crate::repository::EmployeeRepository;

/// Path under which employees are addressed; `location_for` builds on it.
pub const EMPLOYEES_PATH: &str = "/employees";

pub fn location_for(id: i64) -> String {
    format!("{EMPLOYEES_PATH}/{id}")
}

/// Result of a successful create: the stored record and where to fetch it again.
#[derive(Debug, Clone, PartialEq)]
pub struct Created {
    pub employee: Employee,
    pub location: String,
}

/// CRUD over the employee collection.
///
/// Each call loads the full collection from the repository, works on it and,
/// for writes, saves it back. All calls on one service share a single lock
/// around that load/mutate/save sequence, so concurrent requests in this
/// process cannot lose each other's updates. Lookups resolve to the first
/// match in stored order.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: Arc<R>,
    lock: Mutex<()>,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo, lock: Mutex::new(()) }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repo
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Employee>, ServiceError> {
        let _guard = self.lock.lock().await;
        let employees = self.repo.load().await?;
        debug!(count = employees.len(), "listed employees");
        Ok(employees)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<Employee, ServiceError> {
        let _guard = self.lock.lock().await;
        self.repo
            .load()
            .await?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| ServiceError::not_found(id))
    }

    /// Remove the first record with `id` and persist; returns the removed record.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<Employee, ServiceError> {
        let _guard = self.lock.lock().await;
        let mut employees = self.repo.load().await?;
        let pos = employees.iter().position(|e| e.id == id).ok_or_else(|| ServiceError::not_found(id))?;
        let removed = employees.remove(pos);
        self.repo.save(&employees).await?;
        info!(id, remaining = employees.len(), "deleted employee");
        Ok(removed)
    }

    /// Apply `patch` to the first record with `id`. The collection is saved
    /// even when the patch changes nothing.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i64, patch: &EmployeePatch) -> Result<Employee, ServiceError> {
        let _guard = self.lock.lock().await;
        let mut employees = self.repo.load().await?;
        let target = employees.iter_mut().find(|e| e.id == id).ok_or_else(|| ServiceError::not_found(id))?;
        let changed = patch.apply_to(target);
        let updated = target.clone();
        self.repo.save(&employees).await?;
        info!(id, changed, "updated employee");
        Ok(updated)
    }

    #[instrument(skip(self, employee), fields(id = employee.id))]
    pub async fn create(&self, employee: Employee) -> Result<Created, ServiceError> {
        employee.validate_new()?;
        let _guard = self.lock.lock().await;
        let mut employees = self.repo.load().await?;
        if employees.iter().any(|e| e.id == employee.id) {
            warn!(id = employee.id, "rejected duplicate employee id");
            return Err(ServiceError::duplicate(employee.id));
        }
        employees.push(employee.clone());
        self.repo.save(&employees).await?;
        info!(id = employee.id, total = employees.len(), "created employee");
        Ok(Created { location: location_for(employee.id), employee })
    }
}
