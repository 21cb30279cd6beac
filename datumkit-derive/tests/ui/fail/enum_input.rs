#![allow(dead_code)]

use datumkit::DeriveDataSchema;

#[derive(DeriveDataSchema)]
enum Mode {
    Light,
    Dark,
}

fn main() {}
