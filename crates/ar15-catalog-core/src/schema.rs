//! Collection declarations.
//!
//! A [`CollectionSpec`] names a document collection and declares the
//! constraints a [`DocumentStore`](crate::store::DocumentStore) must
//! enforce (unique fields) and the indexes it should build. The weighted
//! text index is declarative only: it records which fields a full-text
//! search would target and their relative weights.

use serde::Serialize;

use crate::parts::{Category, Grip, Handguard, PartKind, TriggerGuard};

/// A secondary index over a (dotted) document field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexSpec {
    pub field: &'static str,
    pub descending: bool,
}

impl IndexSpec {
    pub const fn asc(field: &'static str) -> Self {
        Self {
            field,
            descending: false,
        }
    }

    pub const fn desc(field: &'static str) -> Self {
        Self {
            field,
            descending: true,
        }
    }
}

/// A field participating in the weighted full-text index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextField {
    pub field: &'static str,
    pub weight: u32,
}

const fn text(field: &'static str, weight: u32) -> TextField {
    TextField { field, weight }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollectionSpec {
    pub name: &'static str,
    /// Fields whose values must be unique within the collection.
    pub unique_fields: &'static [&'static str],
    pub indexes: &'static [IndexSpec],
    pub text_index: &'static [TextField],
}

const GROUP_INDEXES: &[IndexSpec] = &[IndexSpec::desc("popularityScore")];

const GROUP_TEXT: &[TextField] = &[
    text("name", 10),
    text("components.specifications.brand", 5),
];

pub const GRIP_GROUPS: CollectionSpec = CollectionSpec {
    name: "ar15_grip_groups",
    unique_fields: &["name"],
    indexes: GROUP_INDEXES,
    text_index: GROUP_TEXT,
};

pub const GRIPS: CollectionSpec = CollectionSpec {
    name: "ar15_grips",
    unique_fields: &["upc"],
    indexes: &[
        IndexSpec::asc("groupId"),
        IndexSpec::asc("compatibility.handOrientation"),
        IndexSpec::asc("compatibility.magwellCompatibility.type"),
    ],
    text_index: &[
        text("attributes.materialType", 5),
        text("attributes.shape", 5),
        text("attributes.features", 3),
        text("attributes.subCategory", 3),
        text("attributes.finishType", 2),
        text("attributes.angle", 2),
        text("attributes.screwType", 1),
    ],
};

pub const HANDGUARD_GROUPS: CollectionSpec = CollectionSpec {
    name: "ar15_handguard_groups",
    unique_fields: &["name"],
    indexes: GROUP_INDEXES,
    text_index: GROUP_TEXT,
};

pub const HANDGUARDS: CollectionSpec = CollectionSpec {
    name: "ar15_handguards",
    unique_fields: &["upc"],
    indexes: &[
        IndexSpec::asc("groupId"),
        IndexSpec::asc("compatibility.handOrientation"),
        IndexSpec::asc("compatibility.mountingSystem.type"),
        IndexSpec::asc("compatibility.requiredBarrelNut.type"),
    ],
    text_index: &[
        text("attributes.materialType", 5),
        text("attributes.finishType", 4),
        text("attributes.weight", 3),
        text("attributes.length", 3),
        text("attributes.profile", 5),
        text("attributes.features", 3),
        text("attributes.subCategory", 3),
    ],
};

pub const TRIGGER_GUARD_GROUPS: CollectionSpec = CollectionSpec {
    name: "ar15_trigger_guard_groups",
    unique_fields: &["name"],
    indexes: GROUP_INDEXES,
    text_index: GROUP_TEXT,
};

pub const TRIGGER_GUARDS: CollectionSpec = CollectionSpec {
    name: "ar15_trigger_guards",
    unique_fields: &["upc"],
    indexes: &[
        IndexSpec::asc("groupId"),
        IndexSpec::asc("compatibility.handOrientation"),
        IndexSpec::asc("compatibility.magwellCompatibility.type"),
    ],
    text_index: &[
        text("attributes.materialType", 5),
        text("attributes.shape", 5),
        text("attributes.features", 3),
        text("attributes.subCategory", 3),
        text("attributes.finishType", 2),
        text("attributes.triggerAreaWidth", 1),
    ],
};

/// Group and variant collections of one category.
pub fn collections(category: Category) -> [CollectionSpec; 2] {
    match category {
        Category::Grip => [Grip::GROUPS, Grip::VARIANTS],
        Category::Handguard => [Handguard::GROUPS, Handguard::VARIANTS],
        Category::TriggerGuard => [TriggerGuard::GROUPS, TriggerGuard::VARIANTS],
    }
}

/// Every collection the catalog persists.
pub fn all_collections() -> Vec<CollectionSpec> {
    Category::ALL.into_iter().flat_map(collections).collect()
}
