// Basic usage example for datumkit
//
// Run with: RUST_LOG=debug cargo run --example basic_usage

use datumkit::{LabeledValue, LabeledValueFactory, Metadata, NamedCollection, SharedMetadata, collection};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Serialize, Deserialize)]
struct User {
    username: String,
    age: u32,
    gender: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("📦 datumkit Basic Usage Example\n");

    // A single labeled value
    let mut dark_mode = LabeledValue::of(true)
        .meta_str("label", "Dark Mode")
        .meta_str("description", "Whether to turn on the dark mode.");
    dark_mode.set_value(false);
    println!(
        "🌙 {}: {} (default {})",
        dark_mode.get_meta_str("label").unwrap_or_default(),
        dark_mode.value(),
        dark_mode.default_value()
    );

    // A collection built by hand
    let mut users = collection! {
        "username" => LabeledValue::of(json!("James Chan"))
            .meta_str("label", "Username")
            .meta_bool("public", true),
        "age" => LabeledValue::of(json!(24))
            .meta_str("label", "Age")
            .meta_bool("public", false),
        "gender" => LabeledValue::of(json!("male"))
            .meta_str("label", "Gender")
            .meta_bool("public", false),
    };

    println!("\n✅ Public fields:");
    users.for_each(|value, name| {
        if value.get_meta_bool("public") == Some(true) {
            println!("  {name} = {}", value.value());
        }
    });

    println!("\n🔧 Changing age to 25...");
    users.set_value("age", 25)?;
    let user: User = users.get_data_as()?;
    println!("✅ Typed data: {user:?}");

    let tagged = users.map(|value, _| format!("@{}", value.value()));
    println!("🏷️  Tagged: {tagged:?}");

    println!("\n🔄 Resetting all values...");
    users.reset_all();
    println!("✅ {}", serde_json::to_string_pretty(&users.get_data())?);

    // Factories: one record per value, or one record for all values
    let mut defaults = Metadata::new();
    defaults.insert("state".into(), json!("OK"));

    let copying = LabeledValueFactory::with_default_metadata(defaults.clone());
    let sharing = LabeledValueFactory::builder()
        .default_metadata(defaults)
        .share_metadata()
        .build();

    let port = copying.create(8080);
    let host = copying.create("localhost");
    port.set_meta_field("state", json!("ERR"));
    println!(
        "\n📋 Copied metadata: port={:?} host={:?}",
        port.get_meta_str("state"),
        host.get_meta_str("state")
    );

    let port = sharing.create(8080);
    let host = sharing.create("localhost");
    port.set_meta_field("state", json!("ERR"));
    println!(
        "📋 Shared metadata: port={:?} host={:?} same_record={}",
        port.get_meta_str("state"),
        host.get_meta_str("state"),
        SharedMetadata::ptr_eq(&port.metadata(), &host.metadata())
    );

    // A collection built from a plain struct
    let from_struct = NamedCollection::from_data(
        &User {
            username: "Jane Doe".into(),
            age: 31,
            gender: "female".into(),
        },
        &copying,
    )?;
    println!(
        "\n🧱 From struct: {} entries, age state = {:?}",
        from_struct.len(),
        from_struct.get("age")?.get_meta_str("state")
    );

    Ok(())
}
