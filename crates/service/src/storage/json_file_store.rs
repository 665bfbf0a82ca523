use std::path::PathBuf;

use async_trait::async_trait;
use models::{schema, Employee, KeyMatching};
use serde_json::{Map, Value};
use tokio::fs;
use tracing::{debug, info};

use crate::errors::ServiceError;
use crate::repository::EmployeeRepository;

/// Flat JSON file holding the whole employee collection.
///
/// The file is a single object `{"employees": [...]}`. Every `load` re-reads
/// and every `save` rewrites the full file; nothing is cached in between.
/// Callers that need read-modify-write isolation must serialize access
/// themselves (see `EmployeeService`).
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    file_path: PathBuf,
    matching: KeyMatching,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P, matching: KeyMatching) -> Self {
        Self { file_path: path.into(), matching }
    }

    /// Create parent directories and seed an empty collection when the file is missing.
    /// Existing files are left untouched, whatever their content.
    pub async fn ensure_exists(&self) -> Result<(), ServiceError> {
        match fs::metadata(&self.file_path).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).await.map_err(|e| self.io_error("create directory for", e))?;
                }
                self.save(&[]).await?;
                info!(path = %self.file_path.display(), "seeded empty employee file");
                Ok(())
            }
            Err(e) => Err(self.io_error("inspect", e)),
        }
    }

    pub async fn load(&self) -> Result<Vec<Employee>, ServiceError> {
        let bytes = fs::read(&self.file_path).await.map_err(|e| self.io_error("read", e))?;
        let employees = parse_collection(&bytes, self.matching)?;
        debug!(path = %self.file_path.display(), count = employees.len(), "loaded employee file");
        Ok(employees)
    }

    pub async fn save(&self, employees: &[Employee]) -> Result<(), ServiceError> {
        let data = render_collection(employees)?;
        fs::write(&self.file_path, data).await.map_err(|e| self.io_error("write", e))?;
        debug!(path = %self.file_path.display(), count = employees.len(), "saved employee file");
        Ok(())
    }

    fn io_error(&self, action: &str, e: std::io::Error) -> ServiceError {
        ServiceError::Io(format!("cannot {action} {}: {e}", self.file_path.display()))
    }
}

#[async_trait]
impl EmployeeRepository for JsonFileStore {
    async fn load(&self) -> Result<Vec<Employee>, ServiceError> { self.load().await }
    async fn save(&self, employees: &[Employee]) -> Result<(), ServiceError> { self.save(employees).await }
}

/// Decode the wrapper object. A missing or `null` wrapper field (or a bare
/// `null` document) is an empty collection; any other mismatch is a format error.
pub fn parse_collection(bytes: &[u8], matching: KeyMatching) -> Result<Vec<Employee>, ServiceError> {
    let root: Value =
        serde_json::from_slice(bytes).map_err(|e| ServiceError::Format(format!("invalid JSON: {e}")))?;
    let obj = match root {
        Value::Null => return Ok(Vec::new()),
        Value::Object(obj) => obj,
        other => {
            return Err(ServiceError::Format(format!(
                "expected an object with an `{}` array, got {}",
                schema::COLLECTION.canonical,
                kind(&other)
            )))
        }
    };
    let items = match schema::COLLECTION.find_in(&obj, matching) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ServiceError::Format(format!(
                "`{}` must be an array, got {}",
                schema::COLLECTION.canonical,
                kind(other)
            )))
        }
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(record) => Employee::from_object(record.clone(), matching)
                .map_err(|e| ServiceError::Format(format!("record {i}: {e}"))),
            other => Err(ServiceError::Format(format!("record {i} must be an object, got {}", kind(other)))),
        })
        .collect()
}

/// Encode the collection under the canonical wrapper field.
pub fn render_collection(employees: &[Employee]) -> Result<Vec<u8>, ServiceError> {
    let records = serde_json::to_value(employees).map_err(|e| ServiceError::Format(e.to_string()))?;
    let mut root = Map::new();
    root.insert(schema::COLLECTION.canonical.to_string(), records);
    serde_json::to_vec(&Value::Object(root)).map_err(|e| ServiceError::Format(e.to_string()))
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
