use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use models::Employee;
use tokio::sync::Mutex;

use crate::errors::ServiceError;
use crate::repository::EmployeeRepository;

/// Process-local repository; counts saves so callers can assert on write behaviour.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    employees: Mutex<Vec<Employee>>,
    saves: AtomicUsize,
}

impl InMemoryRepository {
    pub fn with_employees(employees: Vec<Employee>) -> Self {
        Self { employees: Mutex::new(employees), saves: AtomicUsize::new(0) }
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> Vec<Employee> {
        self.employees.lock().await.clone()
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryRepository {
    async fn load(&self) -> Result<Vec<Employee>, ServiceError> {
        Ok(self.employees.lock().await.clone())
    }

    async fn save(&self, employees: &[Employee]) -> Result<(), ServiceError> {
        *self.employees.lock().await = employees.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
