//! Field-level validation.
//!
//! A [`Validator`] walks a request, collecting missing required fields and
//! registry violations under dotted field paths. [`Validator::finish`]
//! reports the first missing field as [`CatalogError::MissingField`];
//! otherwise every violation is returned together as
//! [`CatalogError::Validation`].

use crate::error::{CatalogError, CatalogResult, FieldViolation};

#[derive(Debug, Default)]
pub struct Validator {
    prefix: Vec<String>,
    missing: Vec<String>,
    violations: Vec<FieldViolation>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` with `segment` appended to the current field path.
    pub fn nested(&mut self, segment: &str, f: impl FnOnce(&mut Self)) {
        self.prefix.push(segment.to_string());
        f(self);
        self.prefix.pop();
    }

    /// Like [`nested`](Self::nested), skipping absent sub-objects.
    pub fn optional<T>(&mut self, segment: &str, value: Option<&T>, f: impl FnOnce(&mut Self, &T)) {
        if let Some(inner) = value {
            self.nested(segment, |v| f(v, inner));
        }
    }

    /// Validates every element of a list under `segment[i]`.
    pub fn each<T>(&mut self, segment: &str, items: &[T], mut f: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            self.nested(&format!("{}[{}]", segment, i), |v| f(v, item));
        }
    }

    pub fn path(&self, field: &str) -> String {
        if self.prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", self.prefix.join("."), field)
        }
    }

    /// Records `field` as missing when absent or blank.
    pub fn required(&mut self, field: &str, value: Option<&str>) {
        if value.map_or(true, |s| s.trim().is_empty()) {
            let path = self.path(field);
            self.missing.push(path);
        }
    }

    /// Checks an optional value against a closed set.
    pub fn one_of(&mut self, field: &str, value: Option<&str>, allowed: &'static [&'static str]) {
        if let Some(v) = value {
            if !allowed.contains(&v) {
                let path = self.path(field);
                self.violations.push(FieldViolation {
                    field: path,
                    value: v.to_string(),
                    allowed: allowed.iter().map(|s| s.to_string()).collect(),
                    message: "not an allowed value".to_string(),
                });
            }
        }
    }

    /// A value that must be present and a member of `allowed`.
    pub fn required_one_of(
        &mut self,
        field: &str,
        value: Option<&str>,
        allowed: &'static [&'static str],
    ) {
        self.required(field, value);
        self.one_of(field, value, allowed);
    }

    /// Checks every element of a list against a closed set.
    pub fn all_of(&mut self, field: &str, values: &[String], allowed: &'static [&'static str]) {
        for (i, v) in values.iter().enumerate() {
            self.one_of(&format!("{}[{}]", field, i), Some(v), allowed);
        }
    }

    pub fn non_negative(&mut self, field: &str, value: Option<f64>) {
        if let Some(n) = value {
            if n.is_nan() || n < 0.0 {
                let path = self.path(field);
                self.violations.push(FieldViolation {
                    field: path,
                    value: n.to_string(),
                    allowed: Vec::new(),
                    message: "must be a non-negative number".to_string(),
                });
            }
        }
    }

    pub fn finish(mut self) -> CatalogResult<()> {
        if !self.missing.is_empty() {
            return Err(CatalogError::MissingField {
                field: self.missing.remove(0),
            });
        }
        if !self.violations.is_empty() {
            return Err(CatalogError::Validation {
                violations: self.violations,
            });
        }
        Ok(())
    }
}

/// Implemented by every request fragment that can be checked against the
/// enumeration registry.
pub trait Validate {
    fn validate(&self, v: &mut Validator);
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self, v: &mut Validator) {
        if let Some(inner) = self {
            inner.validate(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLORS: &[&str] = &["Black", "Gray"];

    #[test]
    fn test_clean_validator_finishes_ok() {
        let mut v = Validator::new();
        v.one_of("color", Some("Black"), COLORS);
        v.one_of("color", None, COLORS);
        assert!(v.finish().is_ok());
    }

    #[test]
    fn test_violation_carries_path_value_and_allowed_set() {
        let mut v = Validator::new();
        v.nested("attributes", |v| v.one_of("color", Some("Pink"), COLORS));
        match v.finish() {
            Err(CatalogError::Validation { violations }) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "attributes.color");
                assert_eq!(violations[0].value, "Pink");
                assert_eq!(violations[0].allowed, vec!["Black", "Gray"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_wins_over_violations() {
        let mut v = Validator::new();
        v.one_of("color", Some("Pink"), COLORS);
        v.nested("compatibility", |v| v.required("version", None));
        match v.finish() {
            Err(CatalogError::MissingField { field }) => {
                assert_eq!(field, "compatibility.version")
            }
            other => panic!("expected missing field, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_string_counts_as_missing() {
        let mut v = Validator::new();
        v.required("upc", Some("   "));
        assert!(matches!(v.finish(), Err(CatalogError::MissingField { .. })));
    }

    #[test]
    fn test_list_paths_are_indexed() {
        let mut v = Validator::new();
        v.all_of(
            "features",
            &["Black".to_string(), "Blue".to_string()],
            COLORS,
        );
        match v.finish() {
            Err(CatalogError::Validation { violations }) => {
                assert_eq!(violations[0].field, "features[1]");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_non_negative_rejects_negative_and_nan() {
        let mut v = Validator::new();
        v.non_negative("price", Some(-0.01));
        v.non_negative("rating", Some(f64::NAN));
        v.non_negative("ok", Some(0.0));
        match v.finish() {
            Err(CatalogError::Validation { violations }) => assert_eq!(violations.len(), 2),
            other => panic!("unexpected {:?}", other),
        }
    }
}
