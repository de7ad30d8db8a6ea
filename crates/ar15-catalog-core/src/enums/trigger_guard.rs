//! Trigger guard attribute sets.

use super::{EnumSet, INSTALLATION_TYPES};

pub const COLORS: &[&str] = &["Black", "Flat Dark Earth", "Silver", "OD Green", "Gray"];

pub const MATERIALS: &[&str] = &["Aluminum", "Polymer", "Steel", "Titanium"];

pub const FINISHES: &[&str] = &["Anodized", "Cerakote", "Polished", "Matte", "Powder Coated"];

pub const TEXTURES: &[&str] = &["Smooth", "Matte", "Knurled"];

pub const SUBCATEGORIES: &[&str] = &["Standard", "Enhanced", "Tactical", "Custom"];

pub const SHAPES: &[&str] = &["Standard", "Enlarged", "Undercut", "Skeletonized"];

pub const FEATURES: &[&str] = &[
    "Enlarged Trigger Area",
    "Undercut Design",
    "Cold Weather Compatibility",
    "Integrated Magwell Flare",
    "Anti-Slip Texture",
];

pub const SCREW_TYPES: &[&str] = &["Roll Pin", "Hex Head", "Torx", "Phillips", "None"];

pub const GRIP_TYPES: &[&str] = &[
    "Standard Pistol Grip",
    "Oversized Pistol Grip",
    "Custom Pistol Grip",
    "Vertical Foregrip",
];

pub const LOWER_RECEIVER_TYPES: &[&str] = &["Mil-Spec", "Commercial", "Proprietary"];

pub const SAFETY_SELECTOR_TYPES: &[&str] = &["Standard", "Ambidextrous", "Extended", "Short Throw"];

pub const MAGWELL_TYPES: &[&str] = &["STANAG", "Flared", "Custom"];

/// Trigger guards have no handedness.
pub const HAND_ORIENTATIONS: &[&str] = &["Ambidextrous"];

pub(super) const SETS: &[EnumSet] = &[
    EnumSet::new("colors", COLORS),
    EnumSet::new("subCategories", SUBCATEGORIES),
    EnumSet::new("shapes", SHAPES),
    EnumSet::new("features", FEATURES),
    EnumSet::new("materials", MATERIALS),
    EnumSet::new("finishes", FINISHES),
    EnumSet::new("textures", TEXTURES),
    EnumSet::new("screwTypes", SCREW_TYPES),
    EnumSet::new("gripTypes", GRIP_TYPES),
    EnumSet::new("lowerReceiverTypes", LOWER_RECEIVER_TYPES),
    EnumSet::new("safetySelectorTypes", SAFETY_SELECTOR_TYPES),
    EnumSet::new("magwellTypes", MAGWELL_TYPES),
    EnumSet::new("handOrientations", HAND_ORIENTATIONS),
    EnumSet::new("installationTypes", INSTALLATION_TYPES),
];
