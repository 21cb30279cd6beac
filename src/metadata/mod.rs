//! Metadata records attached to labeled values
//!
//! This module contains the building blocks for descriptive metadata:
//! - `MetadataRecord` - Trait for field-addressable metadata records
//! - `Metadata` - The default record, an ordered JSON object
//! - `SharedMetadata` - Reference-counted handle that lets several values alias one record
//! - `meta` - Well-known field names

mod record;
mod shared;

pub use record::{Metadata, MetadataRecord};
pub use shared::SharedMetadata;

/// Well-known metadata field names.
///
/// The library itself never interprets these. They exist so that form and
/// settings front-ends agree on spelling. Any other string works as a field
/// name too.
///
/// # Example
///
/// ```
/// use datumkit::{LabeledValue, meta};
/// use serde_json::json;
///
/// let theme = LabeledValue::of(json!("dark"))
///     .meta_str(meta::LABEL, "Theme")
///     .meta_bool(meta::VISIBLE, true);
///
/// assert_eq!(theme.get_meta_str(meta::LABEL).as_deref(), Some("Theme"));
/// ```
pub mod meta {
    /// Human readable label
    pub const LABEL: &str = "label";
    /// Longer help text
    pub const DESCRIPTION: &str = "description";
    /// Whether a front-end should show the field
    pub const VISIBLE: &str = "visible";
    /// Allowed choices for the field
    pub const OPTIONS: &str = "options";
    /// Group the field belongs to, stamped by `#[schema(group = "...")]`
    pub const GROUP: &str = "group";
}
