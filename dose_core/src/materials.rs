//! # Shielding Materials
//!
//! The slab materials a point source can be shielded with. `None` is a
//! sentinel: no attenuation is applied and any thickness is ignored.
//!
//! Half-value layers are not a property of the material alone; they depend
//! on the photon energy, so they live on each radionuclide record (see
//! [`crate::nuclides::HalfValueLayers`]).
//!
//! ## Example
//!
//! ```rust
//! use dose_core::materials::ShieldMaterial;
//!
//! let lead = ShieldMaterial::from_id("lead").unwrap();
//! assert_eq!(lead.display_name(), "Lead");
//! assert!(ShieldMaterial::None.is_none());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{DoseError, DoseResult};

/// Shielding material option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShieldMaterial {
    /// No shield
    #[default]
    None,
    Lead,
    Steel,
    Concrete,
    Water,
}

impl ShieldMaterial {
    /// All materials in selection order, `None` first
    pub const ALL: [ShieldMaterial; 5] = [
        ShieldMaterial::None,
        ShieldMaterial::Lead,
        ShieldMaterial::Steel,
        ShieldMaterial::Concrete,
        ShieldMaterial::Water,
    ];

    /// Stable identifier used in requests ("none", "lead", ...)
    pub fn id(&self) -> &'static str {
        match self {
            ShieldMaterial::None => "none",
            ShieldMaterial::Lead => "lead",
            ShieldMaterial::Steel => "steel",
            ShieldMaterial::Concrete => "concrete",
            ShieldMaterial::Water => "water",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ShieldMaterial::None => "None",
            ShieldMaterial::Lead => "Lead",
            ShieldMaterial::Steel => "Steel",
            ShieldMaterial::Concrete => "Concrete",
            ShieldMaterial::Water => "Water",
        }
    }

    /// Resolve an exact identifier
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.id() == id)
    }

    /// Parse from common string representations (case-insensitive, "Pb" for lead)
    pub fn from_str_flexible(s: &str) -> DoseResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" | "no" | "unshielded" => Ok(ShieldMaterial::None),
            "lead" | "pb" => Ok(ShieldMaterial::Lead),
            "steel" | "fe" | "iron" => Ok(ShieldMaterial::Steel),
            "concrete" => Ok(ShieldMaterial::Concrete),
            "water" | "h2o" => Ok(ShieldMaterial::Water),
            _ => Err(DoseError::unknown_material(s)),
        }
    }

    /// Check for the no-shield sentinel
    pub fn is_none(&self) -> bool {
        matches!(self, ShieldMaterial::None)
    }
}

impl std::fmt::Display for ShieldMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for material in ShieldMaterial::ALL {
            assert_eq!(ShieldMaterial::from_id(material.id()), Some(material));
        }
        assert_eq!(ShieldMaterial::from_id("Lead"), None);
        assert_eq!(ShieldMaterial::from_id("tungsten"), None);
    }

    #[test]
    fn test_flexible_parsing() {
        assert_eq!(ShieldMaterial::from_str_flexible("Pb").unwrap(), ShieldMaterial::Lead);
        assert_eq!(ShieldMaterial::from_str_flexible(" CONCRETE ").unwrap(), ShieldMaterial::Concrete);
        assert_eq!(ShieldMaterial::from_str_flexible("none").unwrap(), ShieldMaterial::None);

        let err = ShieldMaterial::from_str_flexible("tungsten").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_MATERIAL");
    }

    #[test]
    fn test_serialization_uses_id() {
        let json = serde_json::to_string(&ShieldMaterial::Concrete).unwrap();
        assert_eq!(json, "\"concrete\"");
        let parsed: ShieldMaterial = serde_json::from_str("\"water\"").unwrap();
        assert_eq!(parsed, ShieldMaterial::Water);
    }

    #[test]
    fn test_default_is_none() {
        assert!(ShieldMaterial::default().is_none());
        assert_eq!(ShieldMaterial::ALL[0], ShieldMaterial::default());
        assert_eq!(ShieldMaterial::Steel.to_string(), "Steel");
    }
}
