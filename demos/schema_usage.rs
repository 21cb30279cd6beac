// Schema derive example for datumkit
//
// Run with: cargo run --example schema_usage --features derive

use datumkit::{DataSchema, DeriveDataSchema, NamedCollection, meta};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, DeriveDataSchema)]
#[schema(group = "profile")]
struct Profile {
    #[field(label = "Username", description = "The name shown to other users.")]
    username: String,

    #[field(description = "Age in years.")]
    age: u32,

    #[field(options("male", "female", "non-binary", "other"))]
    gender: String,

    #[field(hidden, group = "internal")]
    session_token: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            username: "James Chan".into(),
            age: 24,
            gender: "male".into(),
            session_token: String::new(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("📦 datumkit Schema Example\n");
    println!("Groups: {:?}\n", Profile::groups());

    let mut profile = NamedCollection::from_schema::<Profile>()?;

    for (name, value) in profile.iter() {
        if value.get_meta_bool(meta::VISIBLE) == Some(false) {
            continue;
        }
        println!(
            "  {:<10} {:<12} {}",
            value.get_meta_str(meta::LABEL).unwrap_or_default(),
            value.value(),
            value.get_meta_str(meta::DESCRIPTION).unwrap_or_else(|| name.to_string())
        );
    }

    println!("\n🔧 Updating gender...");
    profile.set_value("gender", "non-binary")?;

    let data: Profile = profile.get_data_as()?;
    println!("✅ {data:?}");

    Ok(())
}
