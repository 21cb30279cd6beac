//! A single value with a default and an attached metadata record

use crate::error::{Error, Result};
use crate::metadata::{Metadata, MetadataRecord, SharedMetadata};
use log::warn;
use serde::de::DeserializeOwned;
use serde_json::{Number, Value};
use std::fmt;

/// A value paired with its immutable default and a metadata record.
///
/// The metadata is held through a [`SharedMetadata`] handle, so several
/// values may alias one record (see [`LabeledValue::clone_with`] and
/// [`crate::LabeledValueFactory`]).
///
/// # Example
///
/// ```
/// use datumkit::LabeledValue;
/// use serde_json::json;
///
/// let mut dark_mode = LabeledValue::of(false)
///     .meta_str("label", "Dark Mode")
///     .meta_str("description", "Whether to turn on the dark mode.");
///
/// dark_mode.set_value(true);
///
/// assert!(*dark_mode.value());
/// assert!(!*dark_mode.default_value());
/// assert_eq!(dark_mode.get_meta_field("label"), Some(json!("Dark Mode")));
/// ```
pub struct LabeledValue<T, M = Metadata> {
    default_value: T,
    current_value: T,
    metadata: SharedMetadata<M>,
}

impl<T: Clone> LabeledValue<T, Metadata> {
    /// Create a value whose current value starts at `default_value`,
    /// with an empty JSON metadata record.
    ///
    /// Use [`LabeledValue::new`] for other record types.
    pub fn of(default_value: T) -> Self {
        Self::new(default_value)
    }
}

impl<T: Clone, M: Default> LabeledValue<T, M> {
    /// Create a value whose current value starts at `default_value`,
    /// with an empty `M` record
    pub fn new(default_value: T) -> Self {
        Self::with_metadata(default_value, SharedMetadata::new(M::default()))
    }
}

impl<T: Clone, M> LabeledValue<T, M> {
    /// Create a value with an initial metadata record or handle.
    ///
    /// Passing a `SharedMetadata` aliases it; passing a plain record wraps it.
    pub fn with_metadata(default_value: T, metadata: impl Into<SharedMetadata<M>>) -> Self {
        Self {
            current_value: default_value.clone(),
            default_value,
            metadata: metadata.into(),
        }
    }

    /// Restore the current value to the default
    pub fn reset(&mut self) -> &mut Self {
        self.current_value = self.default_value.clone();
        self
    }
}

impl<T, M> LabeledValue<T, M> {
    /// Current value
    pub fn value(&self) -> &T {
        &self.current_value
    }

    /// Mutable access to the current value
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.current_value
    }

    /// Replace the current value. Returns `self` for chaining.
    pub fn set_value(&mut self, value: T) -> &mut Self {
        self.current_value = value;
        self
    }

    /// Consume and return the current value
    pub fn into_value(self) -> T {
        self.current_value
    }

    /// Default value given at construction
    pub fn default_value(&self) -> &T {
        &self.default_value
    }

    /// Live handle on the metadata record.
    ///
    /// This is a view, not a snapshot: writes through the returned handle are
    /// visible through this value and every other alias.
    ///
    /// Inside [`SharedMetadata::with`] or [`SharedMetadata::with_mut`] on this
    /// handle, do not read or write this value's metadata; use the record
    /// passed to the closure. Re-entering the record panics.
    pub fn metadata(&self) -> SharedMetadata<M> {
        self.metadata.clone()
    }

    /// Replace the metadata record (or handle) in place, keeping the record type
    pub fn replace_metadata(&mut self, metadata: impl Into<SharedMetadata<M>>) -> &mut Self {
        self.metadata = metadata.into();
        self
    }

    /// Replace the metadata record, possibly changing its type
    pub fn set_metadata<N>(self, metadata: impl Into<SharedMetadata<N>>) -> LabeledValue<T, N> {
        LabeledValue {
            default_value: self.default_value,
            current_value: self.current_value,
            metadata: metadata.into(),
        }
    }
}

impl<T, M: Clone> LabeledValue<T, M> {
    /// Independent copy of the metadata record
    #[must_use]
    pub fn metadata_snapshot(&self) -> M {
        self.metadata.snapshot()
    }
}

impl<T: Clone, M: Clone> LabeledValue<T, M> {
    /// Clone this value.
    ///
    /// The clone gets the same default and current value. With
    /// `copy_metadata` it gets its own copy of the record, otherwise it aliases
    /// this value's record.
    #[must_use]
    pub fn clone_with(&self, copy_metadata: bool) -> Self {
        let metadata = if copy_metadata {
            self.metadata.copied()
        } else {
            self.metadata.clone()
        };

        Self {
            default_value: self.default_value.clone(),
            current_value: self.current_value.clone(),
            metadata,
        }
    }
}

impl<T, M: MetadataRecord> LabeledValue<T, M> {
    /// Read a metadata field. Unset fields read as `None`.
    pub fn get_meta_field(&self, name: &str) -> Option<M::Value> {
        self.metadata.get_field(name)
    }

    /// Write a metadata field
    pub fn set_meta_field(&self, name: &str, value: M::Value) {
        self.metadata.set_field(name, value);
    }

    /// Remove a metadata field, returning its previous value
    pub fn remove_meta_field(&self, name: &str) -> Option<M::Value> {
        self.metadata.remove_field(name)
    }

    /// Builder form of [`LabeledValue::set_meta_field`]
    #[must_use]
    pub fn meta(self, name: &str, value: M::Value) -> Self {
        self.set_meta_field(name, value);
        self
    }
}

impl<T: PartialEq, M> LabeledValue<T, M> {
    /// Check whether the current value equals the default
    pub fn is_default(&self) -> bool {
        self.current_value == self.default_value
    }
}

// =============================================================================
// JSON metadata helpers
// =============================================================================

impl<T> LabeledValue<T, Metadata> {
    /// Add string metadata
    #[must_use]
    pub fn meta_str(self, name: &str, value: impl Into<String>) -> Self {
        self.meta(name, Value::String(value.into()))
    }

    /// Add boolean metadata
    #[must_use]
    pub fn meta_bool(self, name: &str, value: bool) -> Self {
        self.meta(name, Value::Bool(value))
    }

    /// Add numeric metadata.
    ///
    /// JSON has no NaN or infinity. A non-finite number is not stored and a
    /// warning is logged; any previous value of the field is kept.
    #[must_use]
    pub fn meta_num(self, name: &str, value: impl Into<f64>) -> Self {
        let value: f64 = value.into();
        match Number::from_f64(value) {
            Some(number) => self.meta(name, Value::Number(number)),
            None => {
                warn!("Ignoring non-finite number {value} for metadata field {name}");
                self
            }
        }
    }

    /// Get metadata field as string
    pub fn get_meta_str(&self, name: &str) -> Option<String> {
        self.metadata
            .with(|record| record.get(name).and_then(|v| v.as_str()).map(String::from))
    }

    /// Get metadata field as bool
    pub fn get_meta_bool(&self, name: &str) -> Option<bool> {
        self.metadata
            .with(|record| record.get(name).and_then(|v| v.as_bool()))
    }

    /// Get metadata field as number
    pub fn get_meta_num(&self, name: &str) -> Option<f64> {
        self.metadata
            .with(|record| record.get(name).and_then(|v| v.as_f64()))
    }
}

impl<M> LabeledValue<Value, M> {
    /// Deserialize the current value into `T`
    ///
    /// # Errors
    ///
    /// Returns `Error::TypeMismatch` if the value does not fit `T`.
    pub fn value_as<T: DeserializeOwned>(&self) -> Result<T> {
        T::deserialize(&self.current_value).map_err(|e| Error::type_mismatch("value", &e))
    }
}

impl<T: Clone, M: Clone> Clone for LabeledValue<T, M> {
    /// Clones with an independent copy of the metadata record
    fn clone(&self) -> Self {
        self.clone_with(true)
    }
}

impl<T: fmt::Debug, M: fmt::Debug> fmt::Debug for LabeledValue<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabeledValue")
            .field("default_value", &self.default_value)
            .field("value", &self.current_value)
            .field("metadata", &self.metadata)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
