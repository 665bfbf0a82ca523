use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::errors::ModelError;
use crate::schema::{self, FieldSchema, KeyMatching};

/// One employee entry.
///
/// `id`, `first_name` and `last_name` are interpreted; every other attribute
/// is kept in `extra` untouched and written back after the known fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub extra: Map<String, Value>,
}

impl Employee {
    pub fn new(id: i64, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self { id, first_name: first_name.into(), last_name: last_name.into(), extra: Map::new() }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Build a record from a JSON object, matching known keys per `matching`.
    ///
    /// Absent id reads as `0` and absent or `null` names as empty strings, so
    /// incomplete records surface through [`Employee::validate_new`] rather than here.
    /// When two keys map to the same field the later one wins.
    pub fn from_object(obj: Map<String, Value>, matching: KeyMatching) -> Result<Self, ModelError> {
        let mut employee = Employee::default();
        for (key, value) in obj {
            if schema::ID.accepts(&key, matching) {
                employee.id = read_id(value)?;
            } else if schema::FIRST_NAME.accepts(&key, matching) {
                employee.first_name = read_text(schema::FIRST_NAME, value)?;
            } else if schema::LAST_NAME.accepts(&key, matching) {
                employee.last_name = read_text(schema::LAST_NAME, value)?;
            } else {
                employee.extra.insert(key, value);
            }
        }
        Ok(employee)
    }

    /// Rules applied on the create path.
    pub fn validate_new(&self) -> Result<(), ModelError> {
        let mut invalid = Vec::new();
        if self.id <= 0 {
            invalid.push(schema::ID.canonical);
        }
        if self.first_name.is_empty() {
            invalid.push(schema::FIRST_NAME.canonical);
        }
        if self.last_name.is_empty() {
            invalid.push(schema::LAST_NAME.canonical);
        }
        if invalid.is_empty() {
            return Ok(());
        }
        Err(ModelError::Validation(format!(
            "firstName and lastName are required and id must be greater than 0 (invalid: {})",
            invalid.join(", ")
        )))
    }
}

fn read_id(value: Value) -> Result<i64, ModelError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| ModelError::Shape(format!("{} must be an integer, got {n}", schema::ID.canonical))),
        other => Err(ModelError::Shape(format!("{} must be an integer, got {other}", schema::ID.canonical))),
    }
}

fn read_text(field: FieldSchema, value: Value) -> Result<String, ModelError> {
    Ok(read_optional_text(field, value)?.unwrap_or_default())
}

fn read_optional_text(field: FieldSchema, value: Value) -> Result<Option<String>, ModelError> {
    match value {
        Value::String(s) => Ok(Some(s)),
        Value::Null => Ok(None),
        other => Err(ModelError::Shape(format!("{} must be a string, got {other}", field.canonical))),
    }
}

impl Serialize for Employee {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extras: Vec<(&String, &Value)> =
            self.extra.iter().filter(|(k, _)| !schema::is_canonical_record_key(k)).collect();
        let mut map = serializer.serialize_map(Some(3 + extras.len()))?;
        map.serialize_entry(schema::ID.canonical, &self.id)?;
        map.serialize_entry(schema::FIRST_NAME.canonical, &self.first_name)?;
        map.serialize_entry(schema::LAST_NAME.canonical, &self.last_name)?;
        for (k, v) in extras {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

// Request bodies are always matched case-insensitively.
impl<'de> Deserialize<'de> for Employee {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let obj = Map::<String, Value>::deserialize(deserializer)?;
        Employee::from_object(obj, KeyMatching::CaseInsensitive).map_err(serde::de::Error::custom)
    }
}

/// Partial update body. Only present, non-empty names are applied; any id in
/// the body is ignored because the path id selects the record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl EmployeePatch {
    pub fn from_object(obj: Map<String, Value>, matching: KeyMatching) -> Result<Self, ModelError> {
        let mut patch = EmployeePatch::default();
        for (key, value) in obj {
            if schema::FIRST_NAME.accepts(&key, matching) {
                patch.first_name = read_optional_text(schema::FIRST_NAME, value)?;
            } else if schema::LAST_NAME.accepts(&key, matching) {
                patch.last_name = read_optional_text(schema::LAST_NAME, value)?;
            }
        }
        Ok(patch)
    }

    /// Overwrite the target's names with the non-empty patch values. Returns
    /// whether anything was written.
    pub fn apply_to(&self, employee: &mut Employee) -> bool {
        let mut changed = false;
        if let Some(first) = self.first_name.as_deref().filter(|s| !s.is_empty()) {
            employee.first_name = first.to_string();
            changed = true;
        }
        if let Some(last) = self.last_name.as_deref().filter(|s| !s.is_empty()) {
            employee.last_name = last.to_string();
            changed = true;
        }
        changed
    }
}

impl<'de> Deserialize<'de> for EmployeePatch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let obj = Map::<String, Value>::deserialize(deserializer)?;
        EmployeePatch::from_object(obj, KeyMatching::CaseInsensitive).map_err(serde::de::Error::custom)
    }
}
