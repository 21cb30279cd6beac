//! Typed data shapes with per-field metadata
//!
//! A [`DataSchema`] is a plain struct whose fields are the entries of a
//! [`NamedCollection`](crate::NamedCollection). Its `Default` instance supplies
//! the default values and [`DataSchema::field_metadata`] supplies the metadata.
//!
//! ```rust
//! use datumkit::{DataSchema, Metadata, NamedCollection, meta};
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//!
//! #[derive(Default, Serialize, Deserialize)]
//! struct Profile {
//!     username: String,
//!     age: u32,
//! }
//!
//! impl DataSchema for Profile {
//!     fn field_metadata() -> Vec<(String, Metadata)> {
//!         let mut username = Metadata::new();
//!         username.insert(meta::LABEL.into(), json!("Username"));
//!         vec![("username".into(), username)]
//!     }
//! }
//!
//! let profile = NamedCollection::from_schema::<Profile>()?;
//! assert_eq!(profile.get_metadata("username")?.get_field(meta::LABEL), Some(json!("Username")));
//! assert!(profile.get_metadata("age")?.field_names().is_empty());
//! # Ok::<(), datumkit::Error>(())
//! ```

use crate::metadata::{Metadata, meta};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Trait for types that describe the shape of a collection
///
/// Implement it by hand or with `#[derive(DataSchema)]` (requires the
/// `derive` feature).
pub trait DataSchema: Default + Serialize + DeserializeOwned {
    /// Metadata for each field, keyed by the field's serialized name.
    ///
    /// Fields without an entry get an empty record. A name may also have no
    /// field in a given instance, e.g. one serde skips when it is `None`.
    /// Collections built from that instance ignore its metadata.
    fn field_metadata() -> Vec<(String, Metadata)>;

    /// Names of fields that carry metadata, in declaration order
    #[must_use]
    fn described_fields() -> Vec<String> {
        Self::field_metadata()
            .into_iter()
            .map(|(name, _)| name)
            .collect()
    }

    /// Distinct values of the `group` metadata field, sorted
    #[must_use]
    fn groups() -> Vec<String> {
        let mut groups: Vec<String> = Self::field_metadata()
            .iter()
            .filter_map(|(_, metadata)| metadata.get(meta::GROUP))
            .filter_map(|group| group.as_str().map(String::from))
            .collect();
        groups.sort();
        groups.dedup();
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NamedCollection;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Default, Serialize, Deserialize, PartialEq, Debug)]
    struct Appearance {
        theme: String,
        font_size: u32,
        compact: bool,
    }

    impl DataSchema for Appearance {
        fn field_metadata() -> Vec<(String, Metadata)> {
            let entry = |label: &str, group: &str| {
                let mut metadata = Metadata::new();
                metadata.insert(meta::LABEL.into(), json!(label));
                metadata.insert(meta::GROUP.into(), json!(group));
                metadata
            };

            vec![
                ("theme".into(), entry("Theme", "colors")),
                ("font_size".into(), entry("Font Size", "text")),
                ("missing".into(), entry("Missing", "text")),
            ]
        }
    }

    #[test]
    fn test_described_fields_and_groups() {
        assert_eq!(
            Appearance::described_fields(),
            vec!["theme", "font_size", "missing"]
        );
        assert_eq!(Appearance::groups(), vec!["colors", "text"]);
    }

    #[test]
    fn test_from_schema_uses_defaults() {
        let appearance = NamedCollection::from_schema::<Appearance>().unwrap();

        assert_eq!(appearance.len(), 3);
        assert_eq!(
            appearance.get_data_as::<Appearance>().unwrap(),
            Appearance::default()
        );
        assert_eq!(
            appearance.get_metadata("font_size").unwrap().get_field(meta::LABEL),
            Some(json!("Font Size"))
        );
        assert!(!appearance.exist("missing"));
    }

    #[test]
    fn test_from_schema_data() {
        let data = Appearance {
            theme: "dark".into(),
            font_size: 16,
            compact: true,
        };
        let mut appearance = NamedCollection::from_schema_data(&data).unwrap();
        appearance.set_value("font_size", 20).unwrap();
        appearance.reset_all();

        assert_eq!(appearance.get_value_as::<u32>("font_size").unwrap(), 16);
        assert_eq!(appearance.get_data_as::<Appearance>().unwrap(), data);
    }
}
