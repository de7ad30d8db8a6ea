//! Enumeration registry.
//!
//! Each part category declares closed sets of legal values for its
//! categorical attributes (colors, materials, finishes, thread and screw
//! types, ...). The sets are process-wide constants; changing one is a
//! redeploy, and growth is additive so stored documents stay valid.
//!
//! The registry serves two purposes:
//!
//! 1. Validation: [`crate::validate::Validator`] checks incoming values
//!    against the constants in [`grip`], [`handguard`], and [`trigger_guard`].
//! 2. Discovery: [`registry`] exposes the named sets so clients can render
//!    valid choices (`GET /ar15/<category>/enums`).

pub mod grip;
pub mod handguard;
pub mod trigger_guard;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::parts::Category;

/// Installation type, shared by every category.
pub const INSTALLATION_TYPES: &[&str] = &["Drop-In", "Gunsmithing"];

/// Default orientation for categories without handedness.
pub const AMBIDEXTROUS: &str = "Ambidextrous";

/// A named closed set of legal values.
#[derive(Debug, Clone, Copy)]
pub struct EnumSet {
    pub name: &'static str,
    pub values: &'static [&'static str],
}

impl EnumSet {
    pub const fn new(name: &'static str, values: &'static [&'static str]) -> Self {
        Self { name, values }
    }
}

/// All attribute sets of one category.
#[derive(Debug)]
pub struct Registry {
    pub category: Category,
    /// Bumped when a set changes. Changes are additive only.
    pub version: u32,
    pub sets: &'static [EnumSet],
}

impl Registry {
    /// Look up a set by its listing name (e.g. `"colors"`).
    pub fn get(&self, name: &str) -> Option<&'static [&'static str]> {
        self.sets.iter().find(|s| s.name == name).map(|s| s.values)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sets.iter().map(|s| s.name)
    }
}

/// Serializes as a JSON object `{ setName: [values...] }` in declaration order.
impl Serialize for Registry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sets.len()))?;
        for set in self.sets {
            map.serialize_entry(set.name, set.values)?;
        }
        map.end()
    }
}

static GRIP: Registry = Registry {
    category: Category::Grip,
    version: 1,
    sets: grip::SETS,
};

static HANDGUARD: Registry = Registry {
    category: Category::Handguard,
    version: 1,
    sets: handguard::SETS,
};

static TRIGGER_GUARD: Registry = Registry {
    category: Category::TriggerGuard,
    version: 1,
    sets: trigger_guard::SETS,
};

/// Returns the registry for a category.
pub fn registry(category: Category) -> &'static Registry {
    match category {
        Category::Grip => &GRIP,
        Category::Handguard => &HANDGUARD,
        Category::TriggerGuard => &TRIGGER_GUARD,
    }
}
