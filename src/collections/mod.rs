//! Ordered collections of named labeled values
//!
//! A [`NamedCollection`] owns one [`LabeledValue`] per field name. Values are
//! held as `serde_json::Value`; the typed shape of the data is recovered at the
//! edges through serde:
//!
//! ```rust
//! use datumkit::{LabeledValue, collection};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     username: String,
//!     age: u32,
//! }
//!
//! let users = collection! {
//!     "username" => LabeledValue::of(json!("James Chan")).meta_bool("public", true),
//!     "age" => LabeledValue::of(json!(24)).meta_bool("public", false),
//! };
//!
//! let user: User = users.get_data_as()?;
//! assert_eq!(user.username, "James Chan");
//! assert_eq!(users.get_value_as::<u32>("age")?, 24);
//! # Ok::<(), datumkit::Error>(())
//! ```

mod macros;

use crate::error::{Error, Result};
use crate::factory::LabeledValueFactory;
use crate::metadata::{Metadata, SharedMetadata};
use crate::schema::DataSchema;
use crate::value::LabeledValue;
use indexmap::IndexMap;
use indexmap::map::Entry;
use log::{debug, trace, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

/// Backing store of a collection: field name to labeled value, in insertion order
pub type DataMapping<M = Metadata> = IndexMap<String, LabeledValue<Value, M>>;

/// Data shape of a collection that was not built from a typed struct.
/// Any set of values fits it.
pub type UntypedData = serde_json::Map<String, Value>;

/// An ordered mapping from field name to [`LabeledValue`], all sharing one
/// metadata type `M`.
///
/// `D` is the data shape the values must fit. Collections built with
/// [`NamedCollection::from_data`] or [`NamedCollection::from_schema`] carry the
/// struct they were built from, and [`NamedCollection::set_value`] rejects
/// values that would not deserialize back into it. Collections built from
/// hand-made entries use [`UntypedData`], which accepts anything.
///
/// Entries are fixed at construction; each entry's value and metadata can be
/// changed afterwards. Lookups of names that are not in the collection fail
/// with [`Error::EntryNotFound`].
pub struct NamedCollection<M = Metadata, D = UntypedData> {
    data: DataMapping<M>,
    shape: PhantomData<fn() -> D>,
}

impl<M> NamedCollection<M> {
    /// Create a collection that takes ownership of `data` as its backing store
    pub fn new(data: DataMapping<M>) -> Self {
        Self::from_store(data)
    }

    /// Create a collection from `(name, value)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateEntry` if a name appears more than once.
    pub fn from_entries<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, LabeledValue<Value, M>)>,
        K: Into<String>,
    {
        let mut data: DataMapping<M> = IndexMap::new();
        for (name, value) in entries {
            match data.entry(name.into()) {
                Entry::Occupied(occupied) => {
                    return Err(Error::DuplicateEntry(occupied.key().clone()));
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(value);
                }
            }
        }
        Ok(Self::new(data))
    }
}

impl<M, D> NamedCollection<M, D> {
    fn from_store(data: DataMapping<M>) -> Self {
        debug!("Created collection with {} entries", data.len());
        Self {
            data,
            shape: PhantomData,
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Get the labeled value at `name`
    ///
    /// # Errors
    ///
    /// Returns `Error::EntryNotFound` if the name is not in the collection.
    pub fn get(&self, name: &str) -> Result<&LabeledValue<Value, M>> {
        self.data
            .get(name)
            .ok_or_else(|| Error::EntryNotFound(name.to_string()))
    }

    /// Get the labeled value at `name` mutably.
    ///
    /// Writes through the returned value are not checked against the data
    /// shape; prefer [`NamedCollection::set_value`].
    ///
    /// # Errors
    ///
    /// Returns `Error::EntryNotFound` if the name is not in the collection.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut LabeledValue<Value, M>> {
        self.data
            .get_mut(name)
            .ok_or_else(|| Error::EntryNotFound(name.to_string()))
    }

    /// Current value of the entry at `name`
    ///
    /// # Errors
    ///
    /// Returns `Error::EntryNotFound` if the name is not in the collection.
    pub fn get_value(&self, name: &str) -> Result<&Value> {
        self.get(name).map(LabeledValue::value)
    }

    /// Current value of the entry at `name`, deserialized into `T`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name is not in the collection
    /// - The value cannot be deserialized to type `T`
    pub fn get_value_as<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let value = self.get_value(name)?;
        T::deserialize(value).map_err(|e| Error::type_mismatch(name, &e))
    }

    /// Live handle on the metadata of the entry at `name`
    ///
    /// # Errors
    ///
    /// Returns `Error::EntryNotFound` if the name is not in the collection.
    pub fn get_metadata(&self, name: &str) -> Result<SharedMetadata<M>> {
        self.get(name).map(LabeledValue::metadata)
    }

    /// Check whether `name` is an entry of this collection
    pub fn exist(&self, name: &str) -> bool {
        self.data.contains_key(name)
    }

    // =========================================================================
    // Whole-collection access
    // =========================================================================

    /// All entries in insertion order. A new list is built on every call.
    pub fn get_list(&self) -> Vec<&LabeledValue<Value, M>> {
        self.data.values().collect()
    }

    /// The backing store (a view, not a copy)
    pub fn get_data_mapping(&self) -> &DataMapping<M> {
        &self.data
    }

    /// The backing store, mutably. Writes are not checked against the data
    /// shape.
    pub fn get_data_mapping_mut(&mut self) -> &mut DataMapping<M> {
        &mut self.data
    }

    /// Field names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// `(name, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LabeledValue<Value, M>)> {
        self.data.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the collection has no entries
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Call `f(value, name)` for every entry in insertion order.
    ///
    /// The callback may change values and metadata in place. Value changes
    /// made here are not checked against the data shape.
    pub fn for_each<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut LabeledValue<Value, M>, &str),
    {
        for (name, value) in &mut self.data {
            f(value, name);
        }
    }

    /// Build a new mapping from each name to `f(value, name)`
    pub fn map<R, F>(&self, mut f: F) -> IndexMap<String, R>
    where
        F: FnMut(&LabeledValue<Value, M>, &str) -> R,
    {
        self.data
            .iter()
            .map(|(name, value)| (name.clone(), f(value, name)))
            .collect()
    }

    /// Current values of all entries, keyed by name
    pub fn get_data(&self) -> serde_json::Map<String, Value> {
        self.data
            .iter()
            .map(|(name, value)| (name.clone(), value.value().clone()))
            .collect()
    }

    /// Current values of all entries, deserialized into any data shape `T`
    ///
    /// # Errors
    ///
    /// Returns `Error::TypeMismatch` if the values do not fit `T`.
    pub fn get_data_as<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.get_data()))
            .map_err(|e| Error::type_mismatch("data", &e))
    }

    /// Restore every entry's current value to its default
    pub fn reset_all(&mut self) {
        debug!("Resetting {} entries to defaults", self.data.len());
        for value in self.data.values_mut() {
            value.reset();
        }
    }

    /// Drop the data shape, keeping the entries. The result accepts any value.
    pub fn into_untyped(self) -> NamedCollection<M> {
        NamedCollection::new(self.data)
    }

    /// Consume the collection and return its backing store
    pub fn into_inner(self) -> DataMapping<M> {
        self.data
    }
}

impl<M, D: DeserializeOwned> NamedCollection<M, D> {
    /// Replace the current value of the entry at `name`.
    ///
    /// The collection's values, with `value` in place, must still fit the data
    /// shape `D`. On a mismatch nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name is not in the collection
    /// - The value cannot be serialized
    /// - The value does not fit the data shape (`Error::TypeMismatch`)
    pub fn set_value<T: Serialize>(&mut self, name: &str, value: T) -> Result<()> {
        if !self.exist(name) {
            return Err(Error::EntryNotFound(name.to_string()));
        }
        let value = serde_json::to_value(value)?;
        self.check_shape(name, &value)?;

        trace!("Setting value of {name}");
        self.get_mut(name)?.set_value(value);
        Ok(())
    }

    /// Current values of all entries as the data shape `D`
    ///
    /// # Errors
    ///
    /// Returns `Error::TypeMismatch` if values changed through `get_mut` or
    /// `for_each` no longer fit `D`.
    pub fn to_data(&self) -> Result<D> {
        self.get_data_as()
    }

    fn check_shape(&self, name: &str, candidate: &Value) -> Result<()> {
        let mut data = self.get_data();
        data.insert(name.to_string(), candidate.clone());

        D::deserialize(Value::Object(data))
            .map(drop)
            .map_err(|e| Error::type_mismatch(name, &e))
    }
}

impl<M: Clone + Default> NamedCollection<M> {
    /// Create a collection from a serializable data shape, one entry per field.
    ///
    /// Every entry is created through `factory`, so it starts with the
    /// factory's default metadata. The field values become the defaults, and
    /// the collection keeps `D` as its data shape.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `data` cannot be serialized
    /// - `data` does not serialize to an object (struct or map)
    pub fn from_data<D: Serialize>(
        data: &D,
        factory: &LabeledValueFactory<M>,
    ) -> Result<NamedCollection<M, D>> {
        let fields = match serde_json::to_value(data)? {
            Value::Object(fields) => fields,
            other => return Err(Error::InvalidShape(describe(&other).to_string())),
        };

        let data = fields
            .into_iter()
            .map(|(name, value)| (name, factory.create(value)))
            .collect();
        Ok(NamedCollection::from_store(data))
    }
}

impl NamedCollection<Metadata> {
    /// Create a collection from the default instance of a [`DataSchema`] type,
    /// attaching the schema's per-field metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the default instance does not serialize to an object.
    pub fn from_schema<D: DataSchema>() -> Result<NamedCollection<Metadata, D>> {
        Self::from_schema_data(&D::default())
    }

    /// Create a collection from a [`DataSchema`] instance. Its field values
    /// become the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` does not serialize to an object.
    pub fn from_schema_data<D: DataSchema>(data: &D) -> Result<NamedCollection<Metadata, D>> {
        let mut collection = Self::from_data(data, &LabeledValueFactory::new())?;

        for (name, metadata) in D::field_metadata() {
            match collection.data.get_mut(&name) {
                Some(entry) => {
                    entry.replace_metadata(metadata);
                }
                None => warn!("Schema metadata for {name} has no matching field, ignoring"),
            }
        }

        Ok(collection)
    }
}

impl<M> FromIterator<(String, LabeledValue<Value, M>)> for NamedCollection<M> {
    /// Later entries replace earlier ones with the same name
    fn from_iter<I: IntoIterator<Item = (String, LabeledValue<Value, M>)>>(iter: I) -> Self {
        let mut data: DataMapping<M> = IndexMap::new();
        for (name, value) in iter {
            if data.contains_key(&name) {
                warn!("Duplicate entry {name} in collection, keeping the last one");
            }
            data.insert(name, value);
        }
        Self::new(data)
    }
}

impl<M> From<DataMapping<M>> for NamedCollection<M> {
    fn from(data: DataMapping<M>) -> Self {
        Self::new(data)
    }
}

impl<'a, M, D> IntoIterator for &'a NamedCollection<M, D> {
    type Item = (&'a String, &'a LabeledValue<Value, M>);
    type IntoIter = indexmap::map::Iter<'a, String, LabeledValue<Value, M>>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<M: fmt::Debug, D> fmt::Debug for NamedCollection<M, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.data.iter()).finish()
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Tests
// =============================================================================
