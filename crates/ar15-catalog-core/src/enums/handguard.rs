//! Handguard attribute sets.

use super::{EnumSet, INSTALLATION_TYPES};

pub const COLORS: &[&str] = &[
    "Black",
    "Flat Dark Earth",
    "OD Green",
    "Gray",
    "Burnt Bronze",
    "Tungsten",
    "Coyote Tan",
    "Midnight Bronze",
    "Sniper Gray",
    "Foliage Green",
];

pub const MATERIALS: &[&str] = &[
    "Aluminum",
    "Polymer",
    "Carbon Fiber",
    "Aluminum (6061-T6)",
    "Aluminum (7075-T6)",
    "Magnesium Alloy",
    "Steel",
    "Titanium",
];

pub const FINISHES: &[&str] = &[
    "Anodized",
    "Cerakote",
    "Matte",
    "Hardcoat Anodized",
    "Polished",
    "Nitron",
    "Parkerized",
    "DuraCoat",
];

pub const PROFILES: &[&str] = &["Slim", "Standard", "Quad Rail", "Octagonal", "Round", "Hybrid"];

pub const SUBCATEGORIES: &[&str] = &[
    "Free Float",
    "Drop-In",
    "Quad Rail",
    "KeyMod",
    "M-LOK",
    "Hybrid",
    "Skeletal",
    "Retro",
];

pub const FEATURES: &[&str] = &[
    "QD Mounts",
    "Heat Shields",
    "Anti-Rotation Tabs",
    "Modular Design",
    "Integrated Sling Swivel",
    "Ventilation Slots",
    "Integrated Bipod Mount",
    "Full-Length Top Rail",
    "Full-Length Picatinny Rail",
    "M-LOK Slots",
    "KeyMod Slots",
    "Barrel Nut Cutouts",
    "Angled Foregrip Compatibility",
    "Built-In Handstop",
    "Lightening Cuts",
    "Integrated Optics Rail",
    "Textured Grip Surface",
];

pub const BARREL_NUT_TYPES: &[&str] = &[
    "Standard Mil-Spec",
    "Proprietary",
    "Aero Precision",
    "Delta Ring",
    "YHM Diamond",
    "BCM KMR",
    "Geissele BAR",
    "Midwest Industries",
];

pub const MOUNTING_SYSTEMS: &[&str] = &[
    "M-LOK",
    "KeyMod",
    "Picatinny",
    "Direct Attach",
    "Weaver",
    "Magpul MOE",
    "Slick",
];

pub const RAIL_COMPATIBILITIES: &[&str] = &[
    "Picatinny",
    "Weaver",
    "None",
    "NATO STANAG",
    "Magpul MOE Slots",
];

pub const HAND_ORIENTATIONS: &[&str] = &["Right-Handed", "Left-Handed", "Ambidextrous"];

pub const GAS_SYSTEM_TYPES: &[&str] = &[
    "Carbine",
    "Mid-Length",
    "Rifle-Length",
    "Pistol",
    "Short-Stroke Piston",
    "Adjustable Gas Block",
    "Dissipator",
];

pub(super) const SETS: &[EnumSet] = &[
    EnumSet::new("colors", COLORS),
    EnumSet::new("materials", MATERIALS),
    EnumSet::new("finishes", FINISHES),
    EnumSet::new("profiles", PROFILES),
    EnumSet::new("subCategories", SUBCATEGORIES),
    EnumSet::new("features", FEATURES),
    EnumSet::new("barrelNutTypes", BARREL_NUT_TYPES),
    EnumSet::new("mountingSystems", MOUNTING_SYSTEMS),
    EnumSet::new("railCompatibilities", RAIL_COMPATIBILITIES),
    EnumSet::new("handOrientations", HAND_ORIENTATIONS),
    EnumSet::new("gasSystemTypes", GAS_SYSTEM_TYPES),
    EnumSet::new("installationTypes", INSTALLATION_TYPES),
];
