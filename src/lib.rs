//! # datumkit - labeled values and named collections
//!
//! A small in-memory library for values that carry descriptive metadata
//! (labels, visibility, option lists) next to the value itself, without the
//! metadata leaking into the value's own type.
//!
//! ## Features
//!
//! - **Labeled Values**: A current value, an immutable default and a metadata record
//! - **Shared or Copied Metadata**: Records can be aliased across values or copied per value
//! - **Factories**: Stamp the same default metadata onto many values
//! - **Named Collections**: Ordered `name -> value` mappings with typed extraction through serde
//! - **Schemas**: Derive a collection from a plain struct (`derive` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use datumkit::{LabeledValue, collection};
//! use serde_json::json;
//!
//! let mut form = collection! {
//!     "username" => LabeledValue::of(json!("James Chan"))
//!         .meta_str("label", "Username")
//!         .meta_bool("public", true),
//!     "age" => LabeledValue::of(json!(24))
//!         .meta_str("label", "Age")
//!         .meta_bool("public", false),
//! };
//!
//! assert!(form.exist("username"));
//! assert!(!form.exist("password"));
//!
//! form.set_value("age", 25)?;
//! assert_eq!(form.get_value_as::<u32>("age")?, 25);
//! assert_eq!(form.get("age")?.default_value(), &json!(24));
//! # Ok::<(), datumkit::Error>(())
//! ```
//!
//! ## Factories and Metadata Sharing
//!
//! ```rust
//! use datumkit::{LabeledValueFactory, Metadata, SharedMetadata};
//! use serde_json::json;
//!
//! let mut defaults = Metadata::new();
//! defaults.insert("state".into(), json!("OK"));
//!
//! // One record shared by every created value
//! let factory = LabeledValueFactory::builder()
//!     .default_metadata(defaults)
//!     .share_metadata()
//!     .build();
//!
//! let port = factory.create(8080);
//! let host = factory.create("localhost");
//!
//! port.set_meta_field("state", json!("ERR"));
//! assert_eq!(host.get_meta_field("state"), Some(json!("ERR")));
//! assert!(SharedMetadata::ptr_eq(&port.metadata(), &host.metadata()));
//! ```
//!
//! ## Live Views
//!
//! [`LabeledValue::metadata`] and [`NamedCollection::get_data_mapping`] return
//! views of internal state, not snapshots. Use
//! [`LabeledValue::metadata_snapshot`] or [`SharedMetadata::snapshot`] for a
//! copy.

// Core modules
mod collections;
mod error;
mod factory;
mod schema;
mod sync;
mod value;

// Grouped modules
pub mod metadata;

// Re-exports from core
pub use collections::{DataMapping, NamedCollection, UntypedData};
pub use error::{Error, Result};
pub use factory::{LabeledValueFactory, LabeledValueFactoryBuilder};
pub use schema::DataSchema;
pub use value::LabeledValue;

// Re-exports from metadata
pub use metadata::{Metadata, MetadataRecord, SharedMetadata, meta};

/// JSON value type used for collection entries and the default metadata record
pub use serde_json::Value;

// Derive macro re-export (requires `derive` feature)
/// Derive macro for generating `DataSchema` implementations.
///
/// # Example
///
/// ```rust,ignore
/// use datumkit::DeriveDataSchema;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Default, Serialize, Deserialize, DeriveDataSchema)]
/// #[schema(group = "account")]
/// struct Account {
///     #[field(label = "Username", description = "The name of the user.")]
///     username: String,
///
///     #[field(hidden)]
///     age: u32,
/// }
/// ```
#[cfg(feature = "derive")]
pub use datumkit_derive::DataSchema as DeriveDataSchema;
