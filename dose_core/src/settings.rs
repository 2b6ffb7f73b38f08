//! # Calculator Settings
//!
//! Initial values for a calculator session. Every field has a default, so a
//! configuration document only needs the keys it wants to change.
//!
//! ## TOML Example
//!
//! ```toml
//! radionuclide_id = "f-18"
//! output_unit = "mSv/hr"
//!
//! [activity]
//! value = 370.0
//! unit = "MBq"
//!
//! [distance]
//! value = 50.0
//! unit = "cm"
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::DoseRateInput;
use crate::errors::{DoseError, DoseResult};
use crate::materials::ShieldMaterial;
use crate::nuclides;
use crate::units::{ActivityUnit, DistanceUnit, DoseRateUnit, ThicknessUnit};

/// Significant digits used when rendering a dose rate
pub const DEFAULT_SIGNIFICANT_DIGITS: usize = 3;

/// A value paired with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity<U> {
    pub value: f64,
    pub unit: U,
}

impl<U> Quantity<U> {
    pub fn new(value: f64, unit: U) -> Self {
        Quantity { value, unit }
    }
}

/// Starting values for a calculator session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorDefaults {
    pub activity: Quantity<ActivityUnit>,
    pub distance: Quantity<DistanceUnit>,
    /// Defaults to the first entry of the reference table
    pub radionuclide_id: String,
    pub shield_material: ShieldMaterial,
    pub shield_thickness: Quantity<ThicknessUnit>,
    pub output_unit: DoseRateUnit,
    pub significant_digits: usize,
}

impl Default for CalculatorDefaults {
    fn default() -> Self {
        CalculatorDefaults {
            activity: Quantity::new(100.0, ActivityUnit::Megabecquerel),
            distance: Quantity::new(1.0, DistanceUnit::Meter),
            radionuclide_id: nuclides::default_radionuclide().id.to_string(),
            shield_material: ShieldMaterial::None,
            shield_thickness: Quantity::new(0.0, ThicknessUnit::Centimeter),
            output_unit: DoseRateUnit::MicroSievertPerHour,
            significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
        }
    }
}

impl CalculatorDefaults {
    /// Parse and validate a TOML configuration document.
    pub fn from_toml_str(text: &str) -> DoseResult<Self> {
        let defaults: CalculatorDefaults = toml::from_str(text).map_err(|e| DoseError::config(e.to_string()))?;
        defaults.validate()?;
        Ok(defaults)
    }

    /// Check that identifiers resolve and the shield applies to the radionuclide.
    pub fn validate(&self) -> DoseResult<()> {
        let radionuclide = nuclides::lookup(&self.radionuclide_id)
            .ok_or_else(|| DoseError::config(format!("unknown radionuclide '{}'", self.radionuclide_id)))?;

        if !radionuclide.supports(self.shield_material) {
            return Err(DoseError::config(format!(
                "shield material '{}' has no half-value layer for {}",
                self.shield_material.id(),
                radionuclide.id
            )));
        }

        if !(1..=17).contains(&self.significant_digits) {
            return Err(DoseError::config(format!(
                "significant_digits must be between 1 and 17, got {}",
                self.significant_digits
            )));
        }

        for (field, value) in [
            ("activity.value", self.activity.value),
            ("distance.value", self.distance.value),
            ("shield_thickness.value", self.shield_thickness.value),
        ] {
            if !value.is_finite() {
                return Err(DoseError::config(format!("{} must be a finite number", field)));
            }
        }
        Ok(())
    }

    /// The request these defaults describe
    pub fn to_input(&self) -> DoseRateInput {
        DoseRateInput::new(
            self.radionuclide_id.clone(),
            self.activity.value,
            self.activity.unit,
            self.distance.value,
            self.distance.unit,
        )
        .with_shield(
            self.shield_material.id(),
            self.shield_thickness.value,
            self.shield_thickness.unit,
        )
    }
}
