//! Read-only reports for the `catalog enums` and `catalog schema` commands.

use anyhow::{Context, Result};

use ar15_catalog_core::enums::{self, Registry};
use ar15_catalog_core::schema::{all_collections, CollectionSpec};
use ar15_catalog_core::Category;

/// The category's enumeration registry as pretty-printed JSON.
pub fn enums_json(category: Category) -> Result<String> {
    serde_json::to_string_pretty(enums::registry(category))
        .with_context(|| format!("Failed to render enums for {}", category))
}

/// Human-readable description of every collection, then of every
/// category registry.
pub fn schema_report() -> String {
    let collections = all_collections()
        .iter()
        .map(describe_collection)
        .collect::<Vec<_>>()
        .join("\n");

    let registries: String = Category::ALL
        .into_iter()
        .map(|category| describe_registry(enums::registry(category)))
        .collect();

    format!("{}\nregistries\n{}", collections, registries)
}

fn describe_registry(registry: &Registry) -> String {
    format!(
        "  {} v{}: {}\n",
        registry.category,
        registry.version,
        registry.names().collect::<Vec<_>>().join(", ")
    )
}

fn describe_collection(spec: &CollectionSpec) -> String {
    let mut out = format!("{}\n", spec.name);
    out.push_str(&format!("  unique:  {}\n", spec.unique_fields.join(", ")));

    let indexes: Vec<String> = spec
        .indexes
        .iter()
        .map(|i| {
            if i.descending {
                format!("{} desc", i.field)
            } else {
                i.field.to_string()
            }
        })
        .collect();
    out.push_str(&format!("  indexes: {}\n", indexes.join(", ")));

    let text: Vec<String> = spec
        .text_index
        .iter()
        .map(|t| format!("{} ({})", t.field, t.weight))
        .collect();
    out.push_str(&format!("  text:    {}\n", text.join(", ")));
    out
}
