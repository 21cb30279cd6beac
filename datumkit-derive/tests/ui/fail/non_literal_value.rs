#![allow(dead_code)]

use datumkit::DeriveDataSchema;

#[derive(DeriveDataSchema)]
struct Account {
    #[field(label = 42)]
    username: String,
}

fn main() {}
