//! Trigger guards.
//!
//! Trigger guards have no handedness: the only legal orientation is
//! `Ambidextrous`, and it is filled in when a record omits it.

use serde::{Deserialize, Serialize};

use super::{
    validate_component, validate_incompatible_components, validate_required_components,
    Category, CompatibilityMeta, ComponentRef, Fastener, MagwellFit, PartKind,
};
use crate::enums::{self as registry, trigger_guard as enums};
use crate::schema::{self, CollectionSpec};
use crate::validate::{Validate, Validator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerGuard;

impl PartKind for TriggerGuard {
    const CATEGORY: Category = Category::TriggerGuard;
    const GROUPS: CollectionSpec = schema::TRIGGER_GUARD_GROUPS;
    const VARIANTS: CollectionSpec = schema::TRIGGER_GUARDS;
    const MATERIALS: &'static [&'static str] = enums::MATERIALS;
    const FINISHES: &'static [&'static str] = enums::FINISHES;

    type Attributes = TriggerGuardAttributes;
    type Compatibility = TriggerGuardCompatibility;

    fn normalize_compatibility(record: &mut TriggerGuardCompatibility) {
        record.meta.default_hand_orientation(registry::AMBIDEXTROUS);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TriggerGuardAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_integrated_magwell_flare: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undercut_design: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anti_slip_design: Option<bool>,
    /// e.g. `"0.9 in"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_area_width: Option<String>,
}

impl Validate for TriggerGuardAttributes {
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
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerGuardCompatibility {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_lower_receiver: Vec<ComponentRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub incompatible_lower_receiver: Vec<ComponentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_grip: Option<ComponentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incompatible_grip: Option<ComponentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_screw_or_pin: Option<Fastener>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_safety_selector: Option<ComponentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incompatible_safety_selector: Option<ComponentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magwell_compatibility: Option<MagwellFit>,
    #[serde(flatten)]
    pub meta: CompatibilityMeta,
}

impl Validate for TriggerGuardCompatibility {
    fn validate(&self, v: &mut Validator) {
        validate_required_components(
            v,
            "requiredLowerReceiver",
            &self.required_lower_receiver,
            Some(enums::LOWER_RECEIVER_TYPES),
        );
        validate_incompatible_components(
            v,
            "incompatibleLowerReceiver",
            &self.incompatible_lower_receiver,
            Some(enums::LOWER_RECEIVER_TYPES),
        );
        validate_component(v, "requiredGrip", self.required_grip.as_ref(), enums::GRIP_TYPES);
        validate_component(
            v,
            "incompatibleGrip",
            self.incompatible_grip.as_ref(),
            enums::GRIP_TYPES,
        );
        // Thread is optional here: roll pins have none.
        v.optional("requiredScrewOrPin", self.required_screw_or_pin.as_ref(), |v, pin| {
            v.required_one_of("type", pin.kind.as_deref(), enums::SCREW_TYPES);
            v.required("length", pin.length.as_deref());
        });
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
        self.meta.validate_with(v, enums::HAND_ORIENTATIONS, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CatalogError;

    fn check<T: Validate>(record: &T) -> Result<(), CatalogError> {
        let mut v = Validator::new();
        record.validate(&mut v);
        v.finish()
    }

    fn base_record() -> serde_json::Value {
        serde_json::json!({
            "requiredLowerReceiver": [
                { "type": "Mil-Spec", "specifications": { "fitmentType": "Mil-Spec" } }
            ],
            "requiredScrewOrPin": { "type": "Roll Pin", "length": "0.25 in" },
            "magwellCompatibility": { "type": "STANAG", "flared": false },
            "installationType": "Drop-In",
            "version": "1.0",
            "lastUpdated": "2025-04-12"
        })
    }

    #[test]
    fn test_roll_pin_without_thread_validates() {
        let record: TriggerGuardCompatibility = serde_json::from_value(base_record()).unwrap();
        assert!(check(&record).is_ok());
    }

    #[test]
    fn test_lower_receiver_type_enforced() {
        let mut json = base_record();
        json["requiredLowerReceiver"][0]["type"] = serde_json::json!("Billet");
        let record: TriggerGuardCompatibility = serde_json::from_value(json).unwrap();
        match check(&record) {
            Err(CatalogError::Validation { violations }) => {
                assert_eq!(violations[0].field, "requiredLowerReceiver[0].type")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_only_ambidextrous_allowed() {
        let mut json = base_record();
        json["handOrientation"] = serde_json::json!("Left-Handed");
        let record: TriggerGuardCompatibility = serde_json::from_value(json).unwrap();
        assert!(matches!(check(&record), Err(CatalogError::Validation { .. })));
    }

    #[test]
    fn test_screw_or_pin_length_required() {
        let mut json = base_record();
        json["requiredScrewOrPin"] = serde_json::json!({ "type": "Roll Pin" });
        let record: TriggerGuardCompatibility = serde_json::from_value(json).unwrap();
        match check(&record) {
            Err(CatalogError::MissingField { field }) => {
                assert_eq!(field, "requiredScrewOrPin.length")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_normalize_fills_ambidextrous() {
        let mut record: TriggerGuardCompatibility = serde_json::from_value(base_record()).unwrap();
        TriggerGuard::normalize_compatibility(&mut record);
        assert_eq!(record.meta.hand_orientation.as_deref(), Some("Ambidextrous"));
        assert!(check(&record).is_ok());
    }

    #[test]
    fn test_attributes_accept_width_and_flags() {
        let attrs: TriggerGuardAttributes = serde_json::from_value(serde_json::json!({
            "color": "Black",
            "materialType": "Aluminum",
            "shape": "Enlarged",
            "features": ["Enlarged Trigger Area", "Undercut Design"],
            "undercutDesign": true,
            "triggerAreaWidth": "0.9 in"
        }))
        .unwrap();
        assert!(check(&attrs).is_ok());
        assert_eq!(attrs.trigger_area_width.as_deref(), Some("0.9 in"));
    }
}
