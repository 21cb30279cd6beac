#![allow(dead_code)]

use datumkit::DeriveDataSchema;

#[derive(DeriveDataSchema)]
struct Point(i32, i32);

fn main() {}
