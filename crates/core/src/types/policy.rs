//! How the catalog treats products without a category.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown policy name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category policy '{0}' (expected 'required' or 'optional')")]
pub struct CategoryPolicyError(pub String);

/// Whether a product must reference a category.
///
/// - `Required`: writes without a category are rejected, and a stored product
///   that somehow lacks one is reported as an error when shaped for output.
/// - `Optional`: products may be uncategorized; response records carry
///   `categoryName: null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryPolicy {
    #[default]
    Required,
    Optional,
}

impl CategoryPolicy {
    /// Returns the policy name as used in configuration.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
        }
    }

    /// Returns `true` if products must carry a category.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        matches!(self, Self::Required)
    }
}

impl fmt::Display for CategoryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryPolicy {
    type Err = CategoryPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "required" => Ok(Self::Required),
            "optional" => Ok(Self::Optional),
            other => Err(CategoryPolicyError(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Required".parse::<CategoryPolicy>().unwrap(), CategoryPolicy::Required);
        assert_eq!(" optional ".parse::<CategoryPolicy>().unwrap(), CategoryPolicy::Optional);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "sometimes".parse::<CategoryPolicy>().unwrap_err();
        assert_eq!(err, CategoryPolicyError("sometimes".to_owned()));
    }

    #[test]
    fn test_default_is_required() {
        assert!(CategoryPolicy::default().is_required());
    }
}
