//! Grip attribute sets.

use super::{EnumSet, INSTALLATION_TYPES};

pub const COLORS: &[&str] = &[
    "Black",
    "FDE",
    "Scorched Dark Earth",
    "OD Green",
    "Gray",
    "Tan",
    "Burnt Bronze",
    "Sniper Gray",
    "Tungsten",
    "Olive Drab",
    "Desert Tan",
    "Coyote Brown",
    "Stealth Gray",
];

pub const MATERIALS: &[&str] = &[
    "Polymer",
    "Rubber",
    "Aluminum",
    "Wood",
    "G10",
    "OverMolded Rubber",
    "Thermoplastic Elastomer",
    "Reinforced Polymer",
];

pub const FINISHES: &[&str] = &[
    "Textured", "Smooth", "Matte", "Glossy", "Stippled", "Anodized", "Cerakote",
];

pub const TEXTURES: &[&str] = &[
    "Smooth",
    "Textured",
    "Rubberized",
    "Cobblestone",
    "Stippled",
    "Checkered",
    "Non-Slip Textured Surface",
    "Aggressive Textured Surface",
];

pub const SUBCATEGORIES: &[&str] = &["Pistol Grip", "Vertical Foregrip", "Angled Foregrip"];

pub const SHAPES: &[&str] = &[
    "Ergonomic",
    "Straight",
    "Contoured",
    "Beavertail",
    "Pistol",
    "Vertical",
    "Ergonomic with extended tang",
];

pub const FEATURES: &[&str] = &[
    "Finger Grooves",
    "Palm Swells",
    "Thumb Rest",
    "Beavertail Extension",
    "Non-Slip Surface",
    "Grooved Back Straps",
    "Receiver Gap Filler",
    "Storage Compartment",
    "Battery Cradle",
    "Anti-Slip Design",
    "Recoil Absorbing",
    "Heat Resistant",
];

pub const SCREW_TYPES: &[&str] = &["Hex Head", "Slotted", "Phillips", "Torx"];

pub const TRIGGER_GUARD_TYPES: &[&str] =
    &["Standard", "Enhanced", "Integrated", "Oversized", "Custom"];

pub const SAFETY_SELECTOR_TYPES: &[&str] =
    &["Standard", "Ambidextrous", "Extended Ambidextrous", "Custom"];

pub const MAGWELL_TYPES: &[&str] = &["STANAG", "Custom"];

pub const BUFFER_TUBE_TYPES: &[&str] = &["Mil-Spec", "Commercial", "Custom"];

pub const HAND_ORIENTATIONS: &[&str] = &["Right-Handed", "Left-Handed", "Ambidextrous"];

pub(super) const SETS: &[EnumSet] = &[
    EnumSet::new("colors", COLORS),
    EnumSet::new("subCategories", SUBCATEGORIES),
    EnumSet::new("shapes", SHAPES),
    EnumSet::new("features", FEATURES),
    EnumSet::new("materials", MATERIALS),
    EnumSet::new("finishes", FINISHES),
    EnumSet::new("textures", TEXTURES),
    EnumSet::new("screwTypes", SCREW_TYPES),
    EnumSet::new("triggerGuardTypes", TRIGGER_GUARD_TYPES),
    EnumSet::new("safetySelectorTypes", SAFETY_SELECTOR_TYPES),
    EnumSet::new("magwellTypes", MAGWELL_TYPES),
    EnumSet::new("bufferTubeTypes", BUFFER_TUBE_TYPES),
    EnumSet::new("handOrientations", HAND_ORIENTATIONS),
    EnumSet::new("installationTypes", INSTALLATION_TYPES),
];
