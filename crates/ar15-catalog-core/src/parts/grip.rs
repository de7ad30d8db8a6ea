//! Pistol grips and foregrips.

use serde::{Deserialize, Serialize};

use super::{
    validate_component, validate_incompatible_components, validate_required_components,
    Category, CompatibilityMeta, ComponentRef, Fastener, MagwellFit, MeasurementRange, PartKind,
};
use crate::enums::grip as enums;
use crate::schema::{self, CollectionSpec};
use crate::validate::{Validate, Validator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Grip;

impl PartKind for Grip {
    const CATEGORY: Category = Category::Grip;
    const GROUPS: CollectionSpec = schema::GRIP_GROUPS;
    const VARIANTS: CollectionSpec = schema::GRIPS;
    const MATERIALS: &'static [&'static str] = enums::MATERIALS;
    const FINISHES: &'static [&'static str] = enums::FINISHES;

    type Attributes = GripAttributes;
    type Compatibility = GripCompatibility;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GripAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    /// Free text, e.g. `"15 degrees"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_storage_compartment: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screw_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beavertail_support: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anti_slip_design: Option<bool>,
}

impl Validate for GripAttributes {
    fn validate(&self, v: &mut Validator) {
        v.one_of("color", self.color.as_deref(), enums::COLORS);
        v.one_of("materialType", self.material_type.as_deref(), enums::MATERIALS);
        v.one_of("texture", self.texture.as_deref(), enums::TEXTURES);
        v.one_of("subCategory", self.sub_category.as_deref(), enums::SUBCATEGORIES);
        v.one_of("shape", self.shape.as_deref(), enums::SHAPES);
        if let Some(features) = &self.features {
            v.all_of("features", features, enums::FEATURES);
        }
        v.one_of("finishType", self.finish_type.as_deref(), enums::FINISHES);
        v.one_of("screwType", self.screw_type.as_deref(), enums::SCREW_TYPES);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GripCompatibility {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_lower_receiver: Vec<ComponentRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub incompatible_lower_receiver: Vec<ComponentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_grip_screw: Option<Fastener>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_trigger_guard: Option<ComponentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incompatible_trigger_guard: Option<ComponentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_safety_selector: Option<ComponentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incompatible_safety_selector: Option<ComponentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magwell_compatibility: Option<MagwellFit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_buffer_tube: Option<ComponentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incompatible_buffer_tube: Option<ComponentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_grip_angle_range: Option<MeasurementRange>,
    #[serde(flatten)]
    pub meta: CompatibilityMeta,
}

impl Validate for GripCompatibility {
    fn validate(&self, v: &mut Validator) {
        validate_required_components(v, "requiredLowerReceiver", &self.required_lower_receiver, None);
        validate_incompatible_components(
            v,
            "incompatibleLowerReceiver",
            &self.incompatible_lower_receiver,
            None,
        );
        v.optional("requiredGripScrew", self.required_grip_screw.as_ref(), |v, screw| {
            v.required_one_of("type", screw.kind.as_deref(), enums::SCREW_TYPES);
            v.required("thread", screw.thread.as_deref());
            v.required("length", screw.length.as_deref());
        });
        validate_component(
            v,
            "requiredTriggerGuard",
            self.required_trigger_guard.as_ref(),
            enums::TRIGGER_GUARD_TYPES,
        );
        validate_component(
            v,
            "incompatibleTriggerGuard",
            self.incompatible_trigger_guard.as_ref(),
            enums::TRIGGER_GUARD_TYPES,
        );
        validate_component(
            v,
            "requiredSafetySelector",
            self.required_safety_selector.as_ref(),
            enums::SAFETY_SELECTOR_TYPES,
        );
        validate_component(
            v,
            "incompatibleSafetySelector",
            self.incompatible_safety_selector.as_ref(),
            enums::SAFETY_SELECTOR_TYPES,
        );
        v.optional("magwellCompatibility", self.magwell_compatibility.as_ref(), |v, m| {
            v.one_of("type", m.kind.as_deref(), enums::MAGWELL_TYPES)
        });
        validate_component(
            v,
            "requiredBufferTube",
            self.required_buffer_tube.as_ref(),
            enums::BUFFER_TUBE_TYPES,
        );
        validate_component(
            v,
            "incompatibleBufferTube",
            self.incompatible_buffer_tube.as_ref(),
            enums::BUFFER_TUBE_TYPES,
        );
        self.meta.validate_with(v, enums::HAND_ORIENTATIONS, false);
    }
}
