//! Factory that stamps default metadata onto new labeled values

use crate::metadata::{Metadata, SharedMetadata};
use crate::value::LabeledValue;
use log::trace;
use std::fmt;

/// Creates [`LabeledValue`]s that start with the same default metadata.
///
/// By default every created value gets its own copy of the default record.
/// With `clone_metadata(false)` all created values alias one record.
///
/// # Example
/// ```rust
/// use datumkit::{LabeledValueFactory, Metadata};
/// use serde_json::json;
///
/// let mut defaults = Metadata::new();
/// defaults.insert("state".into(), json!("OK"));
///
/// let factory = LabeledValueFactory::with_default_metadata(defaults);
/// let port = factory.create(8080);
/// let host = factory.create("localhost");
///
/// port.set_meta_field("state", json!("ERR"));
/// assert_eq!(host.get_meta_field("state"), Some(json!("OK")));
/// ```
pub struct LabeledValueFactory<M = Metadata> {
    default_metadata: Option<SharedMetadata<M>>,
    clone_metadata: bool,
}

impl<M> LabeledValueFactory<M> {
    /// Factory without default metadata
    #[must_use]
    pub fn new() -> Self {
        Self {
            default_metadata: None,
            clone_metadata: true,
        }
    }

    /// Factory that gives every created value a copy of `metadata`
    pub fn with_default_metadata(metadata: M) -> Self {
        Self {
            default_metadata: Some(SharedMetadata::new(metadata)),
            clone_metadata: true,
        }
    }

    /// Create a new builder
    #[must_use]
    pub fn builder() -> LabeledValueFactoryBuilder<M> {
        LabeledValueFactoryBuilder::new()
    }

    /// Default metadata handle, if configured.
    ///
    /// When the factory shares its record this is the same record every
    /// created value holds.
    pub fn default_metadata(&self) -> Option<SharedMetadata<M>> {
        self.default_metadata.clone()
    }

    /// Whether created values get their own copy of the default metadata
    pub fn clones_metadata(&self) -> bool {
        self.clone_metadata
    }
}

impl<M: Clone + Default> LabeledValueFactory<M> {
    /// Create a labeled value with the given default value
    pub fn create<T: Clone>(&self, default_value: T) -> LabeledValue<T, M> {
        let value: LabeledValue<T, M> = LabeledValue::new(default_value);

        match &self.default_metadata {
            Some(defaults) if self.clone_metadata => {
                trace!("Creating labeled value with copied default metadata");
                value.set_metadata(defaults.copied())
            }
            Some(defaults) => {
                trace!("Creating labeled value with shared default metadata");
                value.set_metadata(defaults.clone())
            }
            None => value,
        }
    }
}

impl<M> Default for LabeledValueFactory<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: fmt::Debug> fmt::Debug for LabeledValueFactory<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabeledValueFactory")
            .field("default_metadata", &self.default_metadata)
            .field("clone_metadata", &self.clone_metadata)
            .finish()
    }
}

/// Builder for creating a LabeledValueFactory with a fluent API
pub struct LabeledValueFactoryBuilder<M = Metadata> {
    default_metadata: Option<M>,
    clone_metadata: bool,
}

impl<M> LabeledValueFactoryBuilder<M> {
    /// Create a new builder (no default metadata, copies per value)
    #[must_use]
    pub fn new() -> Self {
        Self {
            default_metadata: None,
            clone_metadata: true,
        }
    }

    /// Set the metadata applied to every created value
    #[must_use]
    pub fn default_metadata(mut self, metadata: M) -> Self {
        self.default_metadata = Some(metadata);
        self
    }

    /// Choose between copying the default metadata per value (`true`, the
    /// default) and sharing one record across all created values (`false`)
    #[must_use]
    pub fn clone_metadata(mut self, clone: bool) -> Self {
        self.clone_metadata = clone;
        self
    }

    /// Shorthand for `clone_metadata(false)`
    #[must_use]
    pub fn share_metadata(self) -> Self {
        self.clone_metadata(false)
    }

    /// Build the factory
    pub fn build(self) -> LabeledValueFactory<M> {
        LabeledValueFactory {
            default_metadata: self.default_metadata.map(SharedMetadata::new),
            clone_metadata: self.clone_metadata,
        }
    }
}

impl<M> Default for LabeledValueFactoryBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
