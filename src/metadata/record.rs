use indexmap::IndexMap;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Default metadata record: an insertion-ordered JSON object.
pub type Metadata = serde_json::Map<String, Value>;

/// A metadata record whose fields can be addressed by name.
///
/// Implemented for the common string-keyed maps. Implement it for your own
/// struct when you want a fixed metadata shape:
///
/// ```
/// use datumkit::MetadataRecord;
/// use serde_json::Value;
///
/// #[derive(Clone, Default)]
/// struct FieldInfo {
///     description: String,
///     readonly: bool,
/// }
///
/// impl MetadataRecord for FieldInfo {
///     type Value = Value;
///
///     fn get_field(&self, name: &str) -> Option<Value> {
///         match name {
///             "description" => Some(Value::from(self.description.clone())),
///             "readonly" => Some(Value::from(self.readonly)),
///             _ => None,
///         }
///     }
///
///     fn set_field(&mut self, name: &str, value: Value) {
///         match (name, value) {
///             ("description", Value::String(s)) => self.description = s,
///             ("readonly", Value::Bool(b)) => self.readonly = b,
///             _ => {}
///         }
///     }
///
///     fn remove_field(&mut self, _name: &str) -> Option<Value> {
///         None
///     }
///
///     fn field_names(&self) -> Vec<String> {
///         vec!["description".into(), "readonly".into()]
///     }
/// }
/// ```
pub trait MetadataRecord {
    /// Type stored in each field
    type Value: Clone;

    /// Read a field. Returns `None` if the field was never set.
    fn get_field(&self, name: &str) -> Option<Self::Value>;

    /// Write a field, replacing any previous value
    fn set_field(&mut self, name: &str, value: Self::Value);

    /// Remove a field, returning its previous value
    fn remove_field(&mut self, name: &str) -> Option<Self::Value>;

    /// Names of all fields currently set
    fn field_names(&self) -> Vec<String>;

    /// Check whether a field is set
    fn has_field(&self, name: &str) -> bool {
        self.get_field(name).is_some()
    }
}

impl MetadataRecord for serde_json::Map<String, Value> {
    type Value = Value;

    fn get_field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }

    fn set_field(&mut self, name: &str, value: Value) {
        self.insert(name.to_string(), value);
    }

    fn remove_field(&mut self, name: &str) -> Option<Value> {
        // shift_remove keeps the remaining fields in insertion order
        self.shift_remove(name)
    }

    fn field_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }

    fn has_field(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

impl<V: Clone> MetadataRecord for IndexMap<String, V> {
    type Value = V;

    fn get_field(&self, name: &str) -> Option<V> {
        self.get(name).cloned()
    }

    fn set_field(&mut self, name: &str, value: V) {
        self.insert(name.to_string(), value);
    }

    fn remove_field(&mut self, name: &str) -> Option<V> {
        self.shift_remove(name)
    }

    fn field_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }

    fn has_field(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

impl<V: Clone> MetadataRecord for HashMap<String, V> {
    type Value = V;

    fn get_field(&self, name: &str) -> Option<V> {
        self.get(name).cloned()
    }

    fn set_field(&mut self, name: &str, value: V) {
        self.insert(name.to_string(), value);
    }

    fn remove_field(&mut self, name: &str) -> Option<V> {
        self.remove(name)
    }

    fn field_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }

    fn has_field(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

impl<V: Clone> MetadataRecord for BTreeMap<String, V> {
    type Value = V;

    fn get_field(&self, name: &str) -> Option<V> {
        self.get(name).cloned()
    }

    fn set_field(&mut self, name: &str, value: V) {
        self.insert(name.to_string(), value);
    }

    fn remove_field(&mut self, name: &str) -> Option<V> {
        self.remove(name)
    }

    fn field_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }

    fn has_field(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}
