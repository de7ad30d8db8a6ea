//! Vendor offers embedded in a variant.

use serde::{Deserialize, Serialize};

use crate::validate::{Validate, Validator};

/// A purchasable offer for a variant. Has no identity of its own; it is
/// created, replaced, and dropped together with the owning variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Vendor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_estimate: Option<String>,
}

impl Validate for Vendor {
    fn validate(&self, v: &mut Validator) {
        v.required("vendorName", self.vendor_name.as_deref());
        v.required("affiliateLink", self.affiliate_link.as_deref());
        v.non_negative("price", self.price);
    }
}
