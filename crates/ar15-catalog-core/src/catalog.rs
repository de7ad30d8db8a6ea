//! Group and variant management.
//!
//! [`Catalog`] implements every CRUD operation once, generically over the
//! part kind. Callers pick the category with a turbofish:
//!
//! ```ignore
//! let id = catalog.create_group::<Grip>(GroupInput::named("Magpul MOE Grip")).await?;
//! ```
//!
//! # Check order
//!
//! | Operation | Checks, in order |
//! |-----------|------------------|
//! | create group | name present, registry values, unique name |
//! | update group | name present, group exists, registry values, unique name |
//! | create variant | attributes and upc present, group exists, registry values, unique UPC |
//! | update variant | attributes and upc present, variant exists, registry values, unique UPC |
//!
//! Nothing is written unless every check passes. Uniqueness is enforced by
//! the store in the same step as the write, so two concurrent requests with
//! the same name or UPC cannot both succeed.

use std::sync::Arc;

use anyhow::anyhow;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::enums::{self, Registry};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Group, GroupComponents, GroupInput, GroupSummary, Variant, VariantInput, VariantSummary,
};
use crate::parts::PartKind;
use crate::store::{DocumentStore, InMemoryStore, StoreError};
use crate::validate::{Validate, Validator};

/// The catalog service. Cheap to clone; clones share the store.
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn DocumentStore>,
}

impl Catalog {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// A catalog over a fresh [`InMemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()))
    }

    // ============ Groups ============

    /// Creates a group and returns its id.
    pub async fn create_group<K: PartKind>(&self, input: GroupInput) -> CatalogResult<String> {
        check(|v| input.validate::<K>(v))?;
        let name = input.name.clone().unwrap_or_default();
        let group = Group {
            name: name.clone(),
            description: input.description,
            components: input.components.unwrap_or_default(),
            popularity_score: input.popularity_score.unwrap_or(0.0),
        };

        let id = new_id();
        self.store
            .insert(&K::GROUPS, &id, &encode(&group)?)
            .await
            .map_err(|e| duplicate_name(e, &name))?;
        Ok(id)
    }

    pub async fn get_group<K: PartKind>(&self, group_id: &str) -> CatalogResult<GroupSummary> {
        let group = self.load_group::<K>(group_id).await?;
        Ok(GroupSummary {
            group_id: group_id.to_string(),
            group,
        })
    }

    /// Every group of the category, in insertion order.
    pub async fn list_groups<K: PartKind>(&self) -> CatalogResult<Vec<GroupSummary>> {
        let docs = self.store.list(&K::GROUPS).await?;
        docs.into_iter()
            .map(|doc| {
                Ok(GroupSummary {
                    group: decode(K::GROUPS.name, &doc.id, doc.body)?,
                    group_id: doc.id,
                })
            })
            .collect()
    }

    /// Replaces `name` and `description`. `specifications` and
    /// `popularityScore` keep their stored values when omitted.
    pub async fn update_group<K: PartKind>(
        &self,
        group_id: &str,
        input: GroupInput,
    ) -> CatalogResult<()> {
        let name = match input.name.as_deref() {
            Some(n) if !n.trim().is_empty() => n.to_string(),
            _ => return Err(CatalogError::missing("name")),
        };
        let stored = self.load_group::<K>(group_id).await?;
        check(|v| input.validate::<K>(v))?;

        let specifications = input
            .specifications()
            .cloned()
            .or(stored.components.specifications);
        let group = Group {
            name: name.clone(),
            description: input.description,
            components: GroupComponents { specifications },
            popularity_score: input.popularity_score.unwrap_or(stored.popularity_score),
        };

        let replaced = self
            .store
            .replace(&K::GROUPS, group_id, &encode(&group)?)
            .await
            .map_err(|e| duplicate_name(e, &name))?;
        if !replaced {
            return Err(group_not_found(group_id));
        }
        Ok(())
    }

    // ============ Variants ============

    /// Creates a variant under an existing group and returns its id.
    pub async fn create_variant<K: PartKind>(
        &self,
        group_id: &str,
        input: VariantInput<K>,
    ) -> CatalogResult<String> {
        input.check_required()?;
        if self.store.get(&K::GROUPS, group_id).await?.is_none() {
            return Err(CatalogError::GroupNotFound {
                id: group_id.to_string(),
            });
        }

        let mut variant = Variant::<K> {
            group_id: group_id.to_string(),
            attributes: input.attributes.unwrap_or_default(),
            upc: input.upc.unwrap_or_default(),
            images: input.images.unwrap_or_default(),
            vendors: input.vendors.unwrap_or_default(),
            compatibility: input.compatibility,
            customer_rating: input.customer_rating.unwrap_or(0.0),
        };
        check(|v| validate_variant(&variant, v))?;
        if let Some(record) = variant.compatibility.as_mut() {
            K::normalize_compatibility(record);
        }

        let id = new_id();
        self.store
            .insert(&K::VARIANTS, &id, &encode(&variant)?)
            .await
            .map_err(|e| duplicate_upc(e, &variant.upc))?;
        Ok(id)
    }

    pub async fn get_variant<K: PartKind>(
        &self,
        variant_id: &str,
    ) -> CatalogResult<VariantSummary<K>> {
        let variant = self.load_variant::<K>(variant_id).await?;
        Ok(VariantSummary {
            variant_id: variant_id.to_string(),
            variant,
        })
    }

    /// Variants of one group, in insertion order.
    pub async fn list_variants<K: PartKind>(
        &self,
        group_id: &str,
    ) -> CatalogResult<Vec<VariantSummary<K>>> {
        if self.store.get(&K::GROUPS, group_id).await?.is_none() {
            return Err(CatalogError::GroupNotFound {
                id: group_id.to_string(),
            });
        }
        let docs = self
            .store
            .find_by_field(&K::VARIANTS, "groupId", &Value::String(group_id.to_string()))
            .await?;
        docs.into_iter()
            .map(|doc| {
                Ok(VariantSummary {
                    variant: decode(K::VARIANTS.name, &doc.id, doc.body)?,
                    variant_id: doc.id,
                })
            })
            .collect()
    }

    /// Replaces `attributes` and `upc`. Images, vendors, compatibility, and
    /// customer rating keep their stored values when omitted.
    pub async fn update_variant<K: PartKind>(
        &self,
        variant_id: &str,
        input: VariantInput<K>,
    ) -> CatalogResult<()> {
        input.check_required()?;
        let stored = self.load_variant::<K>(variant_id).await?;

        let mut variant = Variant::<K> {
            group_id: stored.group_id,
            attributes: input.attributes.unwrap_or_default(),
            upc: input.upc.unwrap_or_default(),
            images: input.images.unwrap_or(stored.images),
            vendors: input.vendors.unwrap_or(stored.vendors),
            compatibility: input.compatibility.or(stored.compatibility),
            customer_rating: input.customer_rating.unwrap_or(stored.customer_rating),
        };
        check(|v| validate_variant(&variant, v))?;
        if let Some(record) = variant.compatibility.as_mut() {
            K::normalize_compatibility(record);
        }

        let replaced = self
            .store
            .replace(&K::VARIANTS, variant_id, &encode(&variant)?)
            .await
            .map_err(|e| duplicate_upc(e, &variant.upc))?;
        if !replaced {
            return Err(variant_not_found(variant_id));
        }
        Ok(())
    }

    /// The enumeration registry of the category.
    pub fn enums<K: PartKind>(&self) -> &'static Registry {
        enums::registry(K::CATEGORY)
    }

    // ============ Helpers ============

    async fn load_group<K: PartKind>(&self, group_id: &str) -> CatalogResult<Group> {
        match self.store.get(&K::GROUPS, group_id).await? {
            Some(body) => decode(K::GROUPS.name, group_id, body),
            None => Err(group_not_found(group_id)),
        }
    }

    async fn load_variant<K: PartKind>(&self, variant_id: &str) -> CatalogResult<Variant<K>> {
        match self.store.get(&K::VARIANTS, variant_id).await? {
            Some(body) => decode(K::VARIANTS.name, variant_id, body),
            None => Err(variant_not_found(variant_id)),
        }
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn check(f: impl FnOnce(&mut Validator)) -> CatalogResult<()> {
    let mut v = Validator::new();
    f(&mut v);
    v.finish()
}

fn validate_variant<K: PartKind>(variant: &Variant<K>, v: &mut Validator) {
    v.nested("attributes", |v| variant.attributes.validate(v));
    v.each("vendors", &variant.vendors, |v, vendor| vendor.validate(v));
    v.optional("compatibility", variant.compatibility.as_ref(), |v, c| {
        c.validate(v)
    });
    v.non_negative("customerRating", Some(variant.customer_rating));
}

fn encode<T: Serialize>(value: &T) -> CatalogResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| CatalogError::Store(anyhow!("failed to encode document: {}", e)))
}

/// Stored documents that no longer decode are a store failure, not a
/// client error.
fn decode<T: DeserializeOwned>(collection: &str, id: &str, body: Value) -> CatalogResult<T> {
    serde_json::from_value(body).map_err(|e| {
        CatalogError::Store(anyhow!(
            "corrupt document {} in {}: {}",
            id,
            collection,
            e
        ))
    })
}

fn group_not_found(id: &str) -> CatalogError {
    CatalogError::NotFound {
        entity: "group",
        id: id.to_string(),
    }
}

fn variant_not_found(id: &str) -> CatalogError {
    CatalogError::NotFound {
        entity: "variant",
        id: id.to_string(),
    }
}

fn duplicate_name(err: StoreError, name: &str) -> CatalogError {
    match err {
        StoreError::Duplicate {
            field: "name",
            existing_id,
            ..
        } => CatalogError::DuplicateName {
            name: name.to_string(),
            existing_id,
        },
        other => other.into(),
    }
}

fn duplicate_upc(err: StoreError, upc: &str) -> CatalogError {
    match err {
        StoreError::Duplicate {
            field: "upc",
            existing_id,
            ..
        } => CatalogError::DuplicateUpc {
            upc: upc.to_string(),
            existing_id,
        },
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parts::grip::{GripAttributes, GripCompatibility};
    use crate::parts::handguard::HandguardAttributes;
    use crate::parts::{Grip, Handguard};

    fn black_grip() -> GripAttributes {
        GripAttributes {
            color: Some("Black".to_string()),
            material_type: Some("Polymer".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_update_group_missing_name_checked_before_existence() {
        let catalog = Catalog::in_memory();
        let err = catalog
            .update_group::<Grip>("nope", GroupInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::MissingField { .. }));

        let err = catalog
            .update_group::<Grip>("nope", GroupInput::named("X"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { entity: "group", .. }));
    }

    #[tokio::test]
    async fn test_categories_are_isolated() {
        let catalog = Catalog::in_memory();
        let gid = catalog
            .create_group::<Grip>(GroupInput::named("Magpul MOE Grip"))
            .await
            .unwrap();

        // Same name is free in another category.
        catalog
            .create_group::<Handguard>(GroupInput::named("Magpul MOE Grip"))
            .await
            .unwrap();

        // A grip group id is not a handguard group id.
        let attrs = HandguardAttributes {
            color: Some("Black".to_string()),
            ..Default::default()
        };
        let err = catalog
            .create_variant::<Handguard>(&gid, VariantInput::new(attrs, "1"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::GroupNotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_variant_keeps_omitted_fields() {
        let catalog = Catalog::in_memory();
        let gid = catalog
            .create_group::<Grip>(GroupInput::named("Magpul MOE Grip"))
            .await
            .unwrap();
        let mut input = VariantInput::<Grip>::new(black_grip(), "873750002996");
        input.images = Some(vec!["moe-black.jpg".to_string()]);
        input.customer_rating = Some(4.5);
        input.compatibility = Some(
            serde_json::from_value::<GripCompatibility>(serde_json::json!({
                "version": "1.0",
                "lastUpdated": "2025-04-12"
            }))
            .unwrap(),
        );
        let vid = catalog.create_variant::<Grip>(&gid, input).await.unwrap();

        let attrs = GripAttributes {
            color: Some("FDE".to_string()),
            ..Default::default()
        };
        catalog
            .update_variant::<Grip>(&vid, VariantInput::new(attrs.clone(), "873750002997"))
            .await
            .unwrap();

        let summary = catalog.get_variant::<Grip>(&vid).await.unwrap();
        assert_eq!(summary.variant.attributes, attrs);
        assert_eq!(summary.variant.upc, "873750002997");
        assert_eq!(summary.variant.images, vec!["moe-black.jpg"]);
        assert_eq!(summary.variant.customer_rating, 4.5);
        assert!(summary.variant.compatibility.is_some());
        assert_eq!(summary.variant.group_id, gid);
    }

    #[tokio::test]
    async fn test_negative_rating_rejected() {
        let catalog = Catalog::in_memory();
        let gid = catalog
            .create_group::<Grip>(GroupInput::named("Hogue OverMolded"))
            .await
            .unwrap();
        let mut input = VariantInput::<Grip>::new(black_grip(), "743108150004");
        input.customer_rating = Some(-1.0);
        let err = catalog.create_variant::<Grip>(&gid, input).await.unwrap_err();
        match err {
            CatalogError::Validation { violations } => {
                assert_eq!(violations[0].field, "customerRating")
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(catalog.list_variants::<Grip>(&gid).await.unwrap().is_empty());
    }
}
