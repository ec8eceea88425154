//! Customization schemas.
//!
//! A schema lists the options a product offers. It validates a shopper's
//! selections and fills in defaults, so two shoppers who pick the same look
//! end up with structurally equal customizations.

use crate::customization::{Customization, OptionValue};
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// The kind of values an option accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OptionKind {
    /// One of a fixed set of text values.
    Choice { values: Vec<String> },
    /// A yes/no flag.
    Toggle,
    /// A whole number in `min..=max`.
    Count { min: i64, max: i64 },
}

impl OptionKind {
    /// Check a single value against this kind.
    pub fn accepts(&self, value: &OptionValue) -> bool {
        match (self, value) {
            (OptionKind::Choice { values }, OptionValue::Text(s)) => values.iter().any(|v| v == s),
            (OptionKind::Toggle, OptionValue::Flag(_)) => true,
            (OptionKind::Count { min, max }, OptionValue::Number(n)) => {
                n.is_finite() && n.fract() == 0.0 && *n >= *min as f64 && *n <= *max as f64
            }
            _ => false,
        }
    }

    /// Human-readable description of accepted values.
    pub fn describe(&self) -> String {
        match self {
            OptionKind::Choice { values } => values.join(" | "),
            OptionKind::Toggle => "true | false".to_string(),
            OptionKind::Count { min, max } => format!("{}..{}", min, max),
        }
    }
}

/// One configurable option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Dotted key, e.g. `monogram.enabled`.
    pub key: String,
    /// Label shown on the detail screen.
    pub label: String,
    pub kind: OptionKind,
    /// Value used when the shopper leaves the option alone.
    pub default: OptionValue,
}

impl OptionSpec {
    pub fn choice(key: &str, label: &str, values: &[&str], default: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind: OptionKind::Choice {
                values: values.iter().map(|v| v.to_string()).collect(),
            },
            default: OptionValue::Text(default.to_string()),
        }
    }

    pub fn toggle(key: &str, label: &str, default: bool) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind: OptionKind::Toggle,
            default: OptionValue::Flag(default),
        }
    }

    pub fn count(key: &str, label: &str, min: i32, max: i32, default: i32) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind: OptionKind::Count {
                min: min.into(),
                max: max.into(),
            },
            default: OptionValue::from(default),
        }
    }
}

/// Ordered list of options a product supports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomizationSchema {
    pub options: Vec<OptionSpec>,
}

impl CustomizationSchema {
    pub fn new(options: Vec<OptionSpec>) -> Self {
        Self { options }
    }

    pub fn option(&self, key: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.key == key)
    }

    /// Customization with every option at its default.
    pub fn defaults(&self) -> Customization {
        let mut customization = Customization::new();
        for spec in &self.options {
            customization.set_path(&spec.key, spec.default.clone());
        }
        customization
    }

    /// Reject unknown keys and values outside an option's kind.
    pub fn validate(&self, customization: &Customization) -> Result<(), CommerceError> {
        for (path, value) in customization.leaf_paths() {
            let spec = self.option(&path).ok_or_else(|| {
                CommerceError::ValidationError(format!("unknown option '{}'", path))
            })?;
            if !spec.kind.accepts(value) {
                return Err(CommerceError::ValidationError(format!(
                    "invalid value '{}' for {} (expected {})",
                    value,
                    spec.label,
                    spec.kind.describe()
                )));
            }
        }
        Ok(())
    }

    /// Validate `selections` and lay them over the defaults.
    pub fn resolve(&self, selections: &Customization) -> Result<Customization, CommerceError> {
        self.validate(selections)?;
        let mut resolved = self.defaults();
        for (path, value) in selections.leaf_paths() {
            resolved.set_path(&path, value.clone());
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> CustomizationSchema {
        CustomizationSchema::new(vec![
            OptionSpec::choice("lapel", "Lapel", &["notch", "peak", "shawl"], "notch"),
            OptionSpec::count("buttons", "Buttons", 1, 3, 2),
            OptionSpec::toggle("monogram.enabled", "Monogram", false),
        ])
    }

    #[test]
    fn test_defaults() {
        let defaults = schema().defaults();
        assert_eq!(defaults.get_path("lapel"), Some(&OptionValue::from("notch")));
        assert_eq!(defaults.get_path("monogram.enabled"), Some(&OptionValue::Flag(false)));
    }

    #[test]
    fn test_resolve_overlays_selection() {
        let mut picked = Customization::new();
        picked.set_path("monogram.enabled", true);
        let resolved = schema().resolve(&picked).unwrap();

        assert_eq!(resolved.get_path("monogram.enabled"), Some(&OptionValue::Flag(true)));
        assert_eq!(resolved.get_path("buttons"), Some(&OptionValue::Number(2.0)));

        let explicit = schema()
            .resolve(&Customization::new().with("lapel", "notch"))
            .unwrap();
        assert!(explicit.matches(&schema().defaults()));
    }

    #[test]
    fn test_validate_rejects() {
        let s = schema();
        assert!(s.validate(&Customization::new().with("lapel", "wide")).is_err());
        assert!(s.validate(&Customization::new().with("buttons", 4)).is_err());
        assert!(s.validate(&Customization::new().with("buttons", 1.5)).is_err());
        assert!(s.validate(&Customization::new().with("vents", "double")).is_err());
        assert!(s.validate(&Customization::new().with("lapel", "peak")).is_ok());
    }
}
