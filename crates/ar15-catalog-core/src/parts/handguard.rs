//! Handguards and rail systems.

use serde::{Deserialize, Serialize};

use super::{
    validate_incompatible_components, validate_required_components, Category, CompatibilityMeta,
    ComponentRef, MeasurementRange, PartKind,
};
use crate::enums::{self as registry, handguard as enums};
use crate::schema::{self, CollectionSpec};
use crate::validate::{Validate, Validator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Handguard;

impl PartKind for Handguard {
    const CATEGORY: Category = Category::Handguard;
    const GROUPS: CollectionSpec = schema::HANDGUARD_GROUPS;
    const VARIANTS: CollectionSpec = schema::HANDGUARDS;
    const MATERIALS: &'static [&'static str] = enums::MATERIALS;
    const FINISHES: &'static [&'static str] = enums::FINISHES;

    type Attributes = HandguardAttributes;
    type Compatibility = HandguardCompatibility;

    fn normalize_compatibility(record: &mut HandguardCompatibility) {
        record.meta.default_hand_orientation(registry::AMBIDEXTROUS);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HandguardAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_diameter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer_diameter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_cutouts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vented_design: Option<bool>,
}

impl Validate for HandguardAttributes {
    fn validate(&self, v: &mut Validator) {
        v.one_of("color", self.color.as_deref(), enums::COLORS);
        v.one_of("materialType", self.material_type.as_deref(), enums::MATERIALS);
        v.one_of("finishType", self.finish_type.as_deref(), enums::FINISHES);
        v.one_of("profile", self.profile.as_deref(), enums::PROFILES);
        v.one_of("subCategory", self.sub_category.as_deref(), enums::SUBCATEGORIES);
        if let Some(features) = &self.features {
            v.all_of("features", features, enums::FEATURES);
        }
    }
}

// ============ Compatibility descriptors ============

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BarrelNutFit {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// e.g. `1-7/16-16`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BarrelNutSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BarrelNutRef {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<BarrelNutSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GasSystemSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GasSystemRef {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<GasSystemSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MountingSystemFit {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RailFit {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuous: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfileSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Gas block or front sight reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfiledPartRef {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_removal: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<ProfileSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BarrelProfileFit {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compatible_profiles: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub incompatible_profiles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_diameter_at_chamber: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeltaRingFit {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_delta_ring: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_removal: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MuzzleDeviceFit {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clearance_diameter: Option<String>,
    /// e.g. `"Flush"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_relation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SuppressorFit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_diameter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HeatShielding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_heat_shield: Option<bool>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandguardCompatibility {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_upper_receiver: Vec<ComponentRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub incompatible_upper_receiver: Vec<ComponentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_barrel_nut: Option<BarrelNutFit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incompatible_barrel_nut: Option<BarrelNutRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_gas_system: Option<GasSystemRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incompatible_gas_system: Option<GasSystemRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mounting_system: Option<MountingSystemFit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rail_compatibility: Option<RailFit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barrel_diameter_compatibility: Option<MeasurementRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_compatibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_gas_block: Option<ProfiledPartRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incompatible_gas_block: Option<ProfiledPartRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barrel_profile_compatibility: Option<BarrelProfileFit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_sight_compatibility: Option<ProfiledPartRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_ring_compatibility: Option<DeltaRingFit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muzzle_device_compatibility: Option<MuzzleDeviceFit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suppressor_compatibility: Option<SuppressorFit>,
    /// e.g. `10-32`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mounting_hardware_thread_pitch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rail_height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_shielding: Option<HeatShielding>,
    #[serde(flatten)]
    pub meta: CompatibilityMeta,
}

impl Validate for HandguardCompatibility {
    fn validate(&self, v: &mut Validator) {
        validate_required_components(v, "requiredUpperReceiver", &self.required_upper_receiver, None);
        validate_incompatible_components(
            v,
            "incompatibleUpperReceiver",
            &self.incompatible_upper_receiver,
            None,
        );
        v.optional("requiredBarrelNut", self.required_barrel_nut.as_ref(), |v, nut| {
            v.required_one_of("type", nut.kind.as_deref(), enums::BARREL_NUT_TYPES);
            v.required("thread", nut.thread.as_deref());
            v.required("diameter", nut.diameter.as_deref());
        });
        v.optional("incompatibleBarrelNut", self.incompatible_barrel_nut.as_ref(), |v, nut| {
            v.one_of("type", nut.kind.as_deref(), enums::BARREL_NUT_TYPES)
        });
        v.optional("requiredGasSystem", self.required_gas_system.as_ref(), |v, gas| {
            v.one_of("type", gas.kind.as_deref(), enums::GAS_SYSTEM_TYPES)
        });
        v.optional("incompatibleGasSystem", self.incompatible_gas_system.as_ref(), |v, gas| {
            v.one_of("type", gas.kind.as_deref(), enums::GAS_SYSTEM_TYPES)
        });
        v.optional("mountingSystem", self.mounting_system.as_ref(), |v, m| {
            v.required_one_of("type", m.kind.as_deref(), enums::MOUNTING_SYSTEMS)
        });
        v.optional("railCompatibility", self.rail_compatibility.as_ref(), |v, r| {
            v.one_of("type", r.kind.as_deref(), enums::RAIL_COMPATIBILITIES)
        });
        self.meta.validate_with(v, enums::HAND_ORIENTATIONS, true);
    }
}
