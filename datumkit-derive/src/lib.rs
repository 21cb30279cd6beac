//! Derive macros for the datumkit library
//!
//! This crate provides `#[derive(DataSchema)]` for generating the per-field
//! metadata of a data shape.
//!
//! # Usage
//!
//! ```text
//! use datumkit::DeriveDataSchema;
//!
//! #[derive(DeriveDataSchema, Default, Serialize, Deserialize)]
//! #[schema(group = "account")]
//! struct Account {
//!     #[field(label = "Username", description = "The name of the user.")]
//!     username: String,
//!
//!     #[field(options("male", "female", "non-binary", "other"))]
//!     gender: String,
//! }
//! ```

use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{
    Attribute, Data, DeriveInput, Expr, Fields, Lit, LitStr, Meta, MetaList, Token, parse_macro_input,
};

/// Derive macro for generating `DataSchema` implementations.
///
/// # Attributes
///
/// ## Container attributes (`#[schema(...)]`)
/// - `group = "name"` - Stored as the `group` metadata field of every entry
///
/// ## Field attributes (`#[field(...)]`)
/// - `label = "Label"` - Display label (defaults to the title-cased field name)
/// - `description = "..."` - Help text
/// - `group = "..."` - Group override
/// - `options("a", "b", ...)` - Allowed choices, stored as a JSON array
/// - `hidden` - Stores `visible: false`
/// - `skip` - No metadata for this field
///
/// Entry names follow serde: `#[serde(rename = "...")]`,
/// `#[serde(rename_all = "...")]` (including their `serialize = "..."` list
/// forms), `#[serde(skip)]` and `#[serde(skip_serializing)]` are honored.
///
/// A field with `#[serde(skip_serializing_if = "...")]` still gets metadata,
/// because whether it is skipped depends on its value. When an instance omits
/// it, the collection has no entry of that name and the metadata is ignored
/// with a warning.
#[proc_macro_derive(DataSchema, attributes(schema, field))]
pub fn derive_data_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let container_attrs = parse_container_attrs(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unnamed(fields) => {
                return Err(syn::Error::new_spanned(
                    fields,
                    "DataSchema can only be derived for structs with named fields",
                ));
            }
            Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "DataSchema can only be derived for structs with named fields",
                ));
            }
        },
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span,
                "DataSchema can only be derived for structs, not enums",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span,
                "DataSchema can only be derived for structs, not unions",
            ));
        }
    };

    let mut metadata_entries = Vec::new();

    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let attrs = parse_field_attrs(&field.attrs)?;
        let serde_attrs = parse_serde_attrs(&field.attrs);

        if attrs.skip || serde_attrs.skip {
            continue;
        }

        let field_name = ident.to_string();
        let field_name = field_name.trim_start_matches("r#");

        let key = serde_attrs.rename.clone().unwrap_or_else(|| {
            container_attrs
                .rename_all
                .as_deref()
                .map(|rule| apply_rename_rule(field_name, rule))
                .unwrap_or_else(|| field_name.to_string())
        });

        let label = attrs
            .label
            .clone()
            .unwrap_or_else(|| title_case(field_name));

        let mut inserts = vec![quote! {
            metadata.insert("label".to_string(), datumkit::Value::from(#label));
        }];

        if let Some(desc) = &attrs.description {
            inserts.push(quote! {
                metadata.insert("description".to_string(), datumkit::Value::from(#desc));
            });
        }
        if attrs.hidden {
            inserts.push(quote! {
                metadata.insert("visible".to_string(), datumkit::Value::Bool(false));
            });
        }
        if !attrs.options.is_empty() {
            let options = &attrs.options;
            inserts.push(quote! {
                metadata.insert(
                    "options".to_string(),
                    datumkit::Value::Array(vec![#(datumkit::Value::from(#options)),*]),
                );
            });
        }
        if let Some(group) = attrs.group.as_ref().or(container_attrs.group.as_ref()) {
            inserts.push(quote! {
                metadata.insert("group".to_string(), datumkit::Value::from(#group));
            });
        }

        metadata_entries.push(quote! {
            {
                let mut metadata = datumkit::Metadata::new();
                #(#inserts)*
                fields.push((#key.to_string(), metadata));
            }
        });
    }

    Ok(quote! {
        impl #impl_generics datumkit::DataSchema for #name #ty_generics #where_clause {
            fn field_metadata() -> ::std::vec::Vec<(::std::string::String, datumkit::Metadata)> {
                let mut fields = ::std::vec::Vec::new();
                #(#metadata_entries)*
                fields
            }
        }
    })
}

/// Container-level attributes from #[schema(...)] and #[serde(rename_all)]
#[derive(Default)]
struct ContainerAttrs {
    group: Option<String>,
    rename_all: Option<String>,
}

/// Field-level attributes from #[field(...)]
#[derive(Default)]
struct FieldAttrs {
    label: Option<String>,
    description: Option<String>,
    group: Option<String>,
    options: Vec<String>,
    hidden: bool,
    skip: bool,
}

/// The parts of #[serde(...)] that change entry names
#[derive(Default)]
struct SerdeAttrs {
    rename: Option<String>,
    skip: bool,
}

fn nested_metas(attr: &Attribute) -> syn::Result<Punctuated<Meta, Token![,]>> {
    attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
}

fn lit_str(expr: &Expr, attr_name: &str) -> syn::Result<String> {
    if let Expr::Lit(lit) = expr {
        if let Lit::Str(s) = &lit.lit {
            return Ok(s.value());
        }
    }
    Err(syn::Error::new_spanned(
        expr,
        format!("`{attr_name}` must be a string literal, e.g. `{attr_name} = \"...\"`"),
    ))
}

fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut result = ContainerAttrs::default();

    for attr in attrs {
        if attr.path().is_ident("schema") {
            for meta in nested_metas(attr)? {
                match meta {
                    Meta::NameValue(nv) if nv.path.is_ident("group") => {
                        result.group = Some(lit_str(&nv.value, "group")?);
                    }
                    other => {
                        return Err(syn::Error::new_spanned(
                            other,
                            "unknown schema attribute, expected `group = \"...\"`",
                        ));
                    }
                }
            }
        } else if attr.path().is_ident("serde") {
            let Ok(nested) = nested_metas(attr) else {
                continue;
            };
            for meta in nested {
                match meta {
                    Meta::NameValue(nv) if nv.path.is_ident("rename_all") => {
                        if let Ok(rule) = lit_str(&nv.value, "rename_all") {
                            result.rename_all = Some(rule);
                        }
                    }
                    // rename_all(serialize = "...", deserialize = "...")
                    Meta::List(list) if list.path.is_ident("rename_all") => {
                        if let Some(rule) = serialize_name(&list) {
                            result.rename_all = Some(rule);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(result)
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut result = FieldAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident("field") {
            continue;
        }

        for meta in nested_metas(attr)? {
            match meta {
                Meta::Path(path) if path.is_ident("hidden") => result.hidden = true,
                Meta::Path(path) if path.is_ident("skip") => result.skip = true,
                Meta::NameValue(nv) if nv.path.is_ident("label") => {
                    result.label = Some(lit_str(&nv.value, "label")?);
                }
                Meta::NameValue(nv) if nv.path.is_ident("description") => {
                    result.description = Some(lit_str(&nv.value, "description")?);
                }
                Meta::NameValue(nv) if nv.path.is_ident("group") => {
                    result.group = Some(lit_str(&nv.value, "group")?);
                }
                Meta::List(list) if list.path.is_ident("options") => {
                    let options =
                        list.parse_args_with(Punctuated::<LitStr, Token![,]>::parse_terminated)?;
                    result.options.extend(options.iter().map(LitStr::value));
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "unknown field attribute, expected one of: label, description, group, options(...), hidden, skip",
                    ));
                }
            }
        }
    }

    Ok(result)
}

fn parse_serde_attrs(attrs: &[Attribute]) -> SerdeAttrs {
    let mut result = SerdeAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }
        // Attributes serde accepts but we cannot parse are not ours to reject
        let Ok(nested) = nested_metas(attr) else {
            continue;
        };
        for meta in nested {
            match meta {
                Meta::Path(path) if path.is_ident("skip") || path.is_ident("skip_serializing") => {
                    result.skip = true;
                }
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    if let Ok(name) = lit_str(&nv.value, "rename") {
                        result.rename = Some(name);
                    }
                }
                // rename(serialize = "...", deserialize = "...")
                Meta::List(list) if list.path.is_ident("rename") => {
                    if let Some(name) = serialize_name(&list) {
                        result.rename = Some(name);
                    }
                }
                _ => {}
            }
        }
    }

    result
}

/// The `serialize = "..."` part of a serde `rename(...)` / `rename_all(...)` list
fn serialize_name(list: &MetaList) -> Option<String> {
    let inner = list
        .parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
        .ok()?;
    inner.into_iter().find_map(|meta| match meta {
        Meta::NameValue(nv) if nv.path.is_ident("serialize") => {
            lit_str(&nv.value, "serialize").ok()
        }
        _ => None,
    })
}

/// "font_size" -> "Font Size"
fn title_case(name: &str) -> String {
    name.split('_')
        .filter(|s| !s.is_empty())
        .map(|s| {
            let mut c = s.chars();
            match c.next() {
                None => String::new(),
                Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Apply a serde `rename_all` rule to a snake_case field name
fn apply_rename_rule(name: &str, rule: &str) -> String {
    let words: Vec<&str> = name.split('_').filter(|s| !s.is_empty()).collect();
    let capitalize = |s: &str| {
        let mut c = s.chars();
        match c.next() {
            None => String::new(),
            Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
        }
    };

    match rule {
        "lowercase" => name.to_lowercase(),
        "UPPERCASE" => name.to_uppercase(),
        "PascalCase" => words.iter().map(|w| capitalize(*w)).collect(),
        "camelCase" => words
            .iter()
            .enumerate()
            .map(|(i, w)| if i == 0 { w.to_string() } else { capitalize(*w) })
            .collect(),
        "SCREAMING_SNAKE_CASE" => name.to_uppercase(),
        "kebab-case" => words.join("-"),
        "SCREAMING-KEBAB-CASE" => words.join("-").to_uppercase(),
        _ => name.to_string(),
    }
}
