//! Field names accepted when reading records, and the canonical names written back.
//!
//! Reads go through [`FieldSchema::accepts`] with a [`KeyMatching`] policy so the
//! case-insensitive read / fixed-case write asymmetry lives in one place.

use serde_json::{Map, Value};

/// How stored or submitted keys are compared against known field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMatching {
    #[default]
    CaseInsensitive,
    Exact,
}

impl KeyMatching {
    pub fn from_case_insensitive(flag: bool) -> Self {
        if flag { Self::CaseInsensitive } else { Self::Exact }
    }

    pub fn matches(self, key: &str, name: &str) -> bool {
        match self {
            Self::CaseInsensitive => key.eq_ignore_ascii_case(name),
            Self::Exact => key == name,
        }
    }
}

/// A known field: the name emitted on write plus the legacy names accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
}

impl FieldSchema {
    pub const fn new(canonical: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { canonical, aliases }
    }

    pub fn accepts(&self, key: &str, matching: KeyMatching) -> bool {
        matching.matches(key, self.canonical) || self.aliases.iter().any(|a| matching.matches(key, a))
    }

    /// Last entry of `map` whose key this field accepts, so a later
    /// spelling overrides an earlier one as it does for record fields.
    pub fn find_in<'a>(&self, map: &'a Map<String, Value>, matching: KeyMatching) -> Option<&'a Value> {
        map.iter().filter(|(k, _)| self.accepts(k, matching)).last().map(|(_, v)| v)
    }
}

pub const ID: FieldSchema = FieldSchema::new("id", &["numeroEmp"]);
pub const FIRST_NAME: FieldSchema = FieldSchema::new("firstName", &["nombre"]);
pub const LAST_NAME: FieldSchema = FieldSchema::new("lastName", &["apellidos"]);

/// Top-level wrapper field holding the record array in the backing file.
pub const COLLECTION: FieldSchema = FieldSchema::new("employees", &["empleados"]);

pub const RECORD_FIELDS: [FieldSchema; 3] = [ID, FIRST_NAME, LAST_NAME];

/// True when `key` is the written name of an interpreted record field.
pub fn is_canonical_record_key(key: &str) -> bool {
    RECORD_FIELDS.iter().any(|f| f.canonical == key)
}
