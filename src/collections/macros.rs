/// Build a [`NamedCollection`](crate::NamedCollection) from `name => value` pairs.
///
/// Entries keep the order they are written in. Without a type prefix the
/// collection uses the default JSON [`Metadata`](crate::Metadata) record;
/// prefix with `<MyMetadata>` for another record type.
///
/// Duplicate names keep the last value.
///
/// # Example
///
/// ```rust
/// use datumkit::{LabeledValue, collection};
/// use serde_json::json;
///
/// let config = collection! {
///     "username" => LabeledValue::of(json!("TypingHare"))
///         .meta_str("label", "The username of the user."),
///
///     "font_size" => LabeledValue::of(json!(16))
///         .meta_str("label", "The font size.")
///         .meta("option_list", json!([12, 16, 20])),
/// };
///
/// assert_eq!(config.get_value("font_size")?, &json!(16));
/// # Ok::<(), datumkit::Error>(())
/// ```
///
/// With a custom metadata record:
///
/// ```rust
/// use datumkit::{LabeledValue, collection};
/// use serde_json::json;
/// use std::collections::BTreeMap;
///
/// type Flags = BTreeMap<String, bool>;
///
/// let flags = collection! { <Flags>
///     "age" => LabeledValue::new(json!(24)).meta("public", false),
/// };
///
/// assert_eq!(flags.get_metadata("age")?.get_field("public"), Some(false));
/// # Ok::<(), datumkit::Error>(())
/// ```
#[macro_export]
macro_rules! collection {
    (<$meta:ty> $($key:expr => $value:expr),* $(,)?) => {
        <$crate::NamedCollection<$meta> as ::std::iter::FromIterator<_>>::from_iter([
            $(($key.to_string(), $value)),*
        ])
    };
    ($($key:expr => $value:expr),* $(,)?) => {
        $crate::collection!(<$crate::Metadata> $($key => $value),*)
    };
}
