#![allow(dead_code)]

use datumkit::DeriveDataSchema;

#[derive(DeriveDataSchema)]
struct Account {
    #[field(tooltip = "Shown on hover")]
    username: String,
}

fn main() {}
