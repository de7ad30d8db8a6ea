//! Part categories and their category-specific records.
//!
//! Each category is a zero-sized marker type implementing [`PartKind`],
//! which binds it to its attribute record, its compatibility record, its
//! collections, and the registry sets used for group specifications. The
//! [`Catalog`](crate::Catalog) operations and the HTTP routes are written
//! once, generically over `K: PartKind`.
//!
//! | Marker | Category | Attributes | Compatibility |
//! |--------|----------|------------|---------------|
//! | [`Grip`] | `grips` | [`grip::GripAttributes`] | [`grip::GripCompatibility`] |
//! | [`Handguard`] | `handguards` | [`handguard::HandguardAttributes`] | [`handguard::HandguardCompatibility`] |
//! | [`TriggerGuard`] | `trigger-guards` | [`trigger_guard::TriggerGuardAttributes`] | [`trigger_guard::TriggerGuardCompatibility`] |
//!
//! Shared building blocks of the compatibility records (component
//! references, fasteners, measurement ranges, status metadata) live here.

pub mod grip;
pub mod handguard;
pub mod trigger_guard;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::enums::INSTALLATION_TYPES;
use crate::schema::CollectionSpec;
use crate::validate::{Validate, Validator};

pub use grip::Grip;
pub use handguard::Handguard;
pub use trigger_guard::TriggerGuard;

// ============ Category ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Grip,
    Handguard,
    TriggerGuard,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Grip, Category::Handguard, Category::TriggerGuard];

    /// Plural path segment used by the HTTP routes and the CLI.
    pub fn slug(self) -> &'static str {
        match self {
            Category::Grip => "grips",
            Category::Handguard => "handguards",
            Category::TriggerGuard => "trigger-guards",
        }
    }

    /// Human-readable singular name.
    pub fn label(self) -> &'static str {
        match self {
            Category::Grip => "grip",
            Category::Handguard => "handguard",
            Category::TriggerGuard => "trigger guard",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "grip" | "grips" => Ok(Category::Grip),
            "handguard" | "handguards" => Ok(Category::Handguard),
            "trigger-guard" | "trigger-guards" => Ok(Category::TriggerGuard),
            other => Err(format!(
                "unknown category '{}'. Must be grips, handguards, or trigger-guards.",
                other
            )),
        }
    }
}

// ============ PartKind ============

/// Bounds shared by the category-specific records.
pub trait Record:
    Serialize + DeserializeOwned + Validate + fmt::Debug + Clone + PartialEq + Default + Send + Sync + 'static
{
}

impl<T> Record for T where
    T: Serialize
        + DeserializeOwned
        + Validate
        + fmt::Debug
        + Clone
        + PartialEq
        + Default
        + Send
        + Sync
        + 'static
{
}

/// Compile-time description of one part category.
pub trait PartKind:
    fmt::Debug + Clone + Copy + PartialEq + Default + Send + Sync + 'static
{
    const CATEGORY: Category;
    /// Group collection; `name` is unique.
    const GROUPS: CollectionSpec;
    /// Variant collection; `upc` is unique.
    const VARIANTS: CollectionSpec;
    /// Legal `components.specifications.material` values.
    const MATERIALS: &'static [&'static str];
    /// Legal `components.specifications.finish` values.
    const FINISHES: &'static [&'static str];

    type Attributes: Record;
    type Compatibility: Record;

    /// Fills server-side defaults before a record is persisted.
    fn normalize_compatibility(_record: &mut Self::Compatibility) {}
}

// ============ Shared compatibility building blocks ============

/// `specifications` of a mating-component reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Fitment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitment_type: Option<String>,
    /// Optional reference to a specific catalog part.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// A required or incompatible mating component, e.g. a lower receiver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ComponentRef {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<Fitment>,
}

impl ComponentRef {
    fn fitment_type(&self) -> Option<&str> {
        self.specifications
            .as_ref()
            .and_then(|s| s.fitment_type.as_deref())
    }
}

/// Entries of a `required*` list must name both the type and the fitment.
pub(crate) fn validate_required_components(
    v: &mut Validator,
    field: &str,
    items: &[ComponentRef],
    kinds: Option<&'static [&'static str]>,
) {
    v.each(field, items, |v, item| {
        v.required("type", item.kind.as_deref());
        if let Some(set) = kinds {
            v.one_of("type", item.kind.as_deref(), set);
        }
        v.required("specifications.fitmentType", item.fitment_type());
    });
}

pub(crate) fn validate_incompatible_components(
    v: &mut Validator,
    field: &str,
    items: &[ComponentRef],
    kinds: Option<&'static [&'static str]>,
) {
    if let Some(set) = kinds {
        v.each(field, items, |v, item| v.one_of("type", item.kind.as_deref(), set));
    }
}

/// A single typed component descriptor (trigger guard, selector, buffer tube).
pub(crate) fn validate_component(
    v: &mut Validator,
    field: &str,
    item: Option<&ComponentRef>,
    kinds: &'static [&'static str],
) {
    v.optional(field, item, |v, c| v.one_of("type", c.kind.as_deref(), kinds));
}

/// A screw, pin, or other fastener.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Fastener {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Thread spec, e.g. `1/4-28`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MagwellFit {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flared: Option<bool>,
}

/// Dimensional range. Bounds are opaque measurement strings
/// (`"10 degrees"`, `"0.625 in"`); units are never parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MeasurementRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

/// A companion part recommended alongside the variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SuggestedComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Arbitrary payload, e.g. `{ "fitmentType": "Mil-Spec" }`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Fields present on the compatibility record of every category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ergonomic_requirements: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand_orientation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installation_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitment_explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compatibility_warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggested_components: Vec<SuggestedComponent>,
}

impl CompatibilityMeta {
    /// `version` and `lastUpdated` are mandatory whenever a record exists.
    pub(crate) fn validate_with(
        &self,
        v: &mut Validator,
        hand_orientations: &'static [&'static str],
        installation_required: bool,
    ) {
        v.required("version", self.version.as_deref());
        v.required("lastUpdated", self.last_updated.as_deref());
        v.one_of(
            "handOrientation",
            self.hand_orientation.as_deref(),
            hand_orientations,
        );
        if installation_required {
            v.required("installationType", self.installation_type.as_deref());
        }
        v.one_of(
            "installationType",
            self.installation_type.as_deref(),
            INSTALLATION_TYPES,
        );
    }

    pub(crate) fn default_hand_orientation(&mut self, value: &str) {
        if self.hand_orientation.is_none() {
            self.hand_orientation = Some(value.to_string());
        }
    }
}
