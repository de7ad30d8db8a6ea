//! Groups, variants, and the request/response shapes around them.
//!
//! Stored documents ([`Group`], [`Variant`]) carry no id; the id is the
//! store key and is added back in the summaries returned to clients
//! ([`GroupSummary`], [`VariantSummary`]).
//!
//! Request inputs keep every field optional so the catalog can report a
//! missing field as [`CatalogError::MissingField`](crate::CatalogError)
//! instead of a decoding error, and so updates can tell "omitted" apart
//! from "set".

use serde::{Deserialize, Serialize};

use crate::parts::PartKind;
use crate::validate::Validator;
use crate::vendor::Vendor;

// ============ Groups ============

/// Aggregate spec sheet shared by every variant of a group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GroupSpecifications {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub includes_mounting_hardware: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_compatibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish: Option<String>,
}

impl GroupSpecifications {
    /// Material and finish draw from the category registry.
    pub fn validate_for<K: PartKind>(&self, v: &mut Validator) {
        v.one_of("material", self.material.as_deref(), K::MATERIALS);
        v.one_of("finish", self.finish.as_deref(), K::FINISHES);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupComponents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<GroupSpecifications>,
}

/// A named product line, as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub components: GroupComponents,
    #[serde(default)]
    pub popularity_score: f64,
}

/// Body of the create-group and update-group requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub components: Option<GroupComponents>,
    #[serde(default)]
    pub popularity_score: Option<f64>,
}

impl GroupInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub(crate) fn specifications(&self) -> Option<&GroupSpecifications> {
        self.components.as_ref()?.specifications.as_ref()
    }

    /// Checks the name and registry-backed specification fields.
    pub(crate) fn validate<K: PartKind>(&self, v: &mut Validator) {
        v.required("name", self.name.as_deref());
        if let Some(spec) = self.specifications() {
            v.nested("components", |v| {
                v.nested("specifications", |v| spec.validate_for::<K>(v))
            });
        }
        v.non_negative("popularityScore", self.popularity_score);
    }
}

/// A group as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub group_id: String,
    #[serde(flatten)]
    pub group: Group,
}

// ============ Variants ============

/// One purchasable SKU, as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct Variant<K: PartKind> {
    pub group_id: String,
    pub attributes: K::Attributes,
    pub upc: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub vendors: Vec<Vendor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<K::Compatibility>,
    #[serde(default)]
    pub customer_rating: f64,
}

/// Body of the create-variant and update-variant requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct VariantInput<K: PartKind> {
    #[serde(default)]
    pub attributes: Option<K::Attributes>,
    #[serde(default)]
    pub upc: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub vendors: Option<Vec<Vendor>>,
    #[serde(default)]
    pub compatibility: Option<K::Compatibility>,
    #[serde(default)]
    pub customer_rating: Option<f64>,
}

impl<K: PartKind> Default for VariantInput<K> {
    fn default() -> Self {
        Self {
            attributes: None,
            upc: None,
            images: None,
            vendors: None,
            compatibility: None,
            customer_rating: None,
        }
    }
}

impl<K: PartKind> VariantInput<K> {
    pub fn new(attributes: K::Attributes, upc: impl Into<String>) -> Self {
        Self {
            attributes: Some(attributes),
            upc: Some(upc.into()),
            ..Default::default()
        }
    }

    /// Attributes must carry at least one value and the UPC must be
    /// non-blank. Checked before anything touches the store.
    pub(crate) fn check_required(&self) -> Result<(), crate::CatalogError> {
        let attrs_empty = self
            .attributes
            .as_ref()
            .map_or(true, |a| *a == K::Attributes::default());
        if attrs_empty {
            return Err(crate::CatalogError::missing("attributes"));
        }
        if self.upc.as_deref().map_or(true, |u| u.trim().is_empty()) {
            return Err(crate::CatalogError::missing("upc"));
        }
        Ok(())
    }
}

/// A variant as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct VariantSummary<K: PartKind> {
    pub variant_id: String,
    #[serde(flatten)]
    pub variant: Variant<K>,
}
