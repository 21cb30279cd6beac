#![allow(dead_code)]

use datumkit::DeriveDataSchema;

#[derive(DeriveDataSchema)]
#[schema(section = "account")]
struct Account {
    username: String,
}

fn main() {}
