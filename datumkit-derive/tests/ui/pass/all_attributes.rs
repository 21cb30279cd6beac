use datumkit::{DataSchema, DeriveDataSchema};
use serde::{Deserialize, Serialize};

#[derive(Default, Serialize, Deserialize, DeriveDataSchema)]
#[schema(group = "display")]
#[serde(rename_all(serialize = "camelCase", deserialize = "camelCase"))]
struct Display {
    #[field(label = "Font size", description = "Points.", group = "text")]
    font_size: u32,

    #[field(options("light", "dark"), hidden)]
    #[serde(rename = "theme")]
    color_theme: String,

    #[field(skip)]
    scratch: bool,

    #[serde(skip)]
    cache_key: String,
}

fn main() {
    assert_eq!(Display::described_fields(), vec!["fontSize", "theme"]);
    assert_eq!(Display::groups(), vec!["display", "text"]);
}
