//! Common test utilities for datumkit integration tests
//!
//! Provides shared data shapes, metadata records and collection fixtures.

#![allow(dead_code)]

use datumkit::{LabeledValue, LabeledValueFactory, Metadata, MetadataRecord, NamedCollection, collection};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

// =============================================================================
// Test Data Shapes
// =============================================================================

/// A user record covering string and numeric fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserData {
    pub username: String,
    pub age: u32,
    pub gender: String,
}

impl Default for UserData {
    fn default() -> Self {
        Self {
            username: "James Chan".to_string(),
            age: 24,
            gender: "male".to_string(),
        }
    }
}

/// A data shape whose values are all strings, for `map` results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DistortedUser {
    pub username: String,
    pub age: String,
    pub gender: String,
}

// =============================================================================
// Typed Metadata Record
// =============================================================================

/// A fixed-shape metadata record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldInfo {
    pub description: String,
    pub readonly: bool,
}

impl FieldInfo {
    pub fn new(description: &str, readonly: bool) -> Self {
        Self {
            description: description.to_string(),
            readonly,
        }
    }
}

impl MetadataRecord for FieldInfo {
    type Value = Value;

    fn get_field(&self, name: &str) -> Option<Value> {
        match name {
            "description" => Some(json!(self.description)),
            "readonly" => Some(json!(self.readonly)),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) {
        match (name, value) {
            ("description", Value::String(s)) => self.description = s,
            ("readonly", Value::Bool(b)) => self.readonly = b,
            _ => {}
        }
    }

    fn remove_field(&mut self, _name: &str) -> Option<Value> {
        None
    }

    fn field_names(&self) -> Vec<String> {
        vec!["description".to_string(), "readonly".to_string()]
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// `{username: "James Chan", age: 24, gender: "male"}` with empty metadata
pub fn user_collection() -> NamedCollection {
    collection! {
        "username" => LabeledValue::of(json!("James Chan")),
        "age" => LabeledValue::of(json!(24)),
        "gender" => LabeledValue::of(json!("male")),
    }
}

/// Same data with `public` visibility metadata on each entry
pub fn public_user_collection() -> NamedCollection {
    collection! {
        "username" => LabeledValue::of(json!("James Chan")).meta_bool("public", true),
        "age" => LabeledValue::of(json!(24)).meta_bool("public", false),
        "gender" => LabeledValue::of(json!("male")).meta_bool("public", false),
    }
}

/// Metadata record `{state: "OK"}`
pub fn state_ok() -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert("state".to_string(), json!("OK"));
    metadata
}

/// Factory copying `{description: "Default description.", readonly: true}`
pub fn description_factory() -> LabeledValueFactory<FieldInfo> {
    LabeledValueFactory::with_default_metadata(FieldInfo::new("Default description.", true))
}

/// Install a test logger once; safe to call from every test
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
