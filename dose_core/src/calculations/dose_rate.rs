//! # Dose Rate Calculation
//!
//! Estimates the dose rate from a point radionuclide source at a given
//! distance, optionally behind a single slab shield.
//!
//! ## Procedure
//!
//! 1. Resolve the radionuclide; an unknown identifier gives
//!    [`DoseRateOutcome::NoResult`].
//! 2. Normalize activity to MBq and distance to m.
//! 3. A distance of zero or less gives [`DoseRateOutcome::Unbounded`].
//! 4. Ḋ = Γ·A / d² (µSv/hr).
//! 5. If a shield material other than "none" is selected with a positive
//!    thickness, multiply by 0.5^(x / HVL). When the pair has no tabulated
//!    HVL the shield is ignored and the result carries an advisory.
//!
//! `compute` never fails: every degenerate input maps to an explicit
//! outcome variant. It is pure and holds no state, so it can be called from
//! any number of threads.
//!
//! ## Example
//!
//! ```rust
//! use dose_core::calculations::dose_rate::{compute, DoseRateInput};
//! use dose_core::units::{ActivityUnit, DistanceUnit, DoseRateUnit, ThicknessUnit};
//!
//! let input = DoseRateInput::new("tc-99m", 100.0, ActivityUnit::Megabecquerel, 1.0, DistanceUnit::Meter)
//!     .with_shield("lead", 0.03, ThicknessUnit::Centimeter);
//!
//! let rate = compute(&input).in_unit(DoseRateUnit::MicroSievertPerHour).unwrap();
//! assert!((rate - 1.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::{half_value_layers, hvl_transmission, inverse_square_dose_rate};
use crate::materials::ShieldMaterial;
use crate::nuclides::{self, Radionuclide};
use crate::units::{ActivityUnit, DistanceUnit, DoseRateUnit, MicroSievertsPerHour, ThicknessUnit};

/// Input parameters for a dose rate calculation.
///
/// Identifiers are kept as strings so a host can pass whatever the user
/// selected; resolving them is part of the calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "activity": 100.0,
///   "activity_unit": "MBq",
///   "distance": 1.0,
///   "distance_unit": "m",
///   "radionuclide_id": "tc-99m",
///   "shield_material_id": "lead",
///   "shield_thickness": 0.03,
///   "shield_thickness_unit": "cm"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseRateInput {
    /// Source activity, in `activity_unit`
    pub activity: f64,
    #[serde(default)]
    pub activity_unit: ActivityUnit,

    /// Distance from the source, in `distance_unit`
    pub distance: f64,
    #[serde(default)]
    pub distance_unit: DistanceUnit,

    /// Radionuclide identifier (e.g. "tc-99m")
    pub radionuclide_id: String,

    /// Shielding material identifier ("none", "lead", ...)
    #[serde(default = "default_material_id")]
    pub shield_material_id: String,

    /// Shield thickness, in `shield_thickness_unit`
    #[serde(default)]
    pub shield_thickness: f64,
    #[serde(default)]
    pub shield_thickness_unit: ThicknessUnit,
}

fn default_material_id() -> String {
    ShieldMaterial::None.id().to_string()
}

impl DoseRateInput {
    /// Create an unshielded request
    pub fn new(
        radionuclide_id: impl Into<String>,
        activity: f64,
        activity_unit: ActivityUnit,
        distance: f64,
        distance_unit: DistanceUnit,
    ) -> Self {
        DoseRateInput {
            activity,
            activity_unit,
            distance,
            distance_unit,
            radionuclide_id: radionuclide_id.into(),
            shield_material_id: default_material_id(),
            shield_thickness: 0.0,
            shield_thickness_unit: ThicknessUnit::default(),
        }
    }

    /// Add a slab shield (builder pattern)
    pub fn with_shield(mut self, material_id: impl Into<String>, thickness: f64, unit: ThicknessUnit) -> Self {
        self.shield_material_id = material_id.into();
        self.shield_thickness = thickness;
        self.shield_thickness_unit = unit;
        self
    }

    /// True when the request asks for no attenuation at all
    pub fn is_unshielded(&self) -> bool {
        // NaN thickness counts as no shield
        self.shield_material_id == ShieldMaterial::None.id() || !(self.shield_thickness > 0.0)
    }
}

/// What happened to the shield part of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ShieldingStatus {
    /// No material, or a thickness of zero or less
    Unshielded,
    /// Exponential attenuation was applied
    Attenuated {
        material: ShieldMaterial,
        thickness_cm: f64,
        hvl_cm: f64,
        half_value_layers: f64,
    },
    /// The material has no half-value layer for this radionuclide, so the
    /// shield was ignored
    Unavailable {
        material_id: String,
        radionuclide_id: String,
    },
}

/// A finite dose rate with its breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseRateResult {
    /// Dose rate at the point, after shielding (µSv/hr)
    pub dose_rate_usv_hr: f64,

    /// Dose rate without any shield (µSv/hr)
    pub unshielded_usv_hr: f64,

    /// Fraction transmitted through the shield (1.0 when unshielded)
    pub transmission: f64,

    pub shielding: ShieldingStatus,
}

impl DoseRateResult {
    /// Dose rate in base units
    pub fn dose_rate(&self) -> MicroSievertsPerHour {
        MicroSievertsPerHour(self.dose_rate_usv_hr)
    }

    /// Dose rate expressed in a display unit
    pub fn in_unit(&self, unit: DoseRateUnit) -> f64 {
        unit.convert(self.dose_rate())
    }

    /// Advisory text when the selected shield could not be applied
    pub fn advisory(&self) -> Option<String> {
        match &self.shielding {
            ShieldingStatus::Unavailable { material_id, radionuclide_id } => Some(format!(
                "No half-value layer for '{}' with {}; shielding ignored",
                material_id, radionuclide_id
            )),
            _ => None,
        }
    }
}

/// Outcome of [`compute`].
///
/// ## JSON Example
///
/// ```json
/// { "outcome": "rate", "dose_rate_usv_hr": 2.0, "unshielded_usv_hr": 2.0,
///   "transmission": 1.0, "shielding": { "status": "unshielded" } }
/// { "outcome": "unbounded" }
/// { "outcome": "no_result" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DoseRateOutcome {
    /// A finite dose rate
    Rate(DoseRateResult),
    /// Distance was zero or negative; the inverse-square term diverges
    Unbounded,
    /// The radionuclide identifier is not in the reference table
    NoResult,
}

impl DoseRateOutcome {
    /// The numeric result, if there is one
    pub fn result(&self) -> Option<&DoseRateResult> {
        match self {
            DoseRateOutcome::Rate(result) => Some(result),
            _ => None,
        }
    }

    /// Dose rate in base units, if there is one
    pub fn dose_rate(&self) -> Option<MicroSievertsPerHour> {
        self.result().map(DoseRateResult::dose_rate)
    }

    /// Dose rate in a display unit, if there is one
    pub fn in_unit(&self, unit: DoseRateUnit) -> Option<f64> {
        self.result().map(|r| r.in_unit(unit))
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, DoseRateOutcome::Unbounded)
    }
}

/// Compute the dose rate for a request.
///
/// # Arguments
///
/// * `input` - Request with quantities in any supported unit
///
/// # Returns
///
/// * `Rate` - finite dose rate in µSv/hr with breakdown
/// * `Unbounded` - distance ≤ 0
/// * `NoResult` - unknown radionuclide
pub fn compute(input: &DoseRateInput) -> DoseRateOutcome {
    match nuclides::lookup(&input.radionuclide_id) {
        Some(radionuclide) => compute_for(radionuclide, input),
        None => {
            tracing::debug!(radionuclide = %input.radionuclide_id, "unknown radionuclide");
            DoseRateOutcome::NoResult
        }
    }
}

/// Compute the dose rate for an already resolved radionuclide record.
///
/// `input.radionuclide_id` is not consulted. Never returns `NoResult`.
pub fn compute_for(radionuclide: &Radionuclide, input: &DoseRateInput) -> DoseRateOutcome {
    let activity = input.activity_unit.to_megabecquerels(input.activity);
    let distance = input.distance_unit.to_meters(input.distance);

    if distance.0 <= 0.0 {
        return DoseRateOutcome::Unbounded;
    }

    let unshielded = inverse_square_dose_rate(radionuclide.gamma_constant, activity.0, distance.0);

    let (transmission, shielding) = if input.is_unshielded() {
        (1.0, ShieldingStatus::Unshielded)
    } else {
        let thickness = input.shield_thickness_unit.to_centimeters(input.shield_thickness);
        let material = ShieldMaterial::from_id(&input.shield_material_id);

        match material.and_then(|m| radionuclide.half_value_layer(m).map(|hvl| (m, hvl))) {
            Some((material, hvl_cm)) if hvl_cm > 0.0 => (
                hvl_transmission(thickness.0, hvl_cm),
                ShieldingStatus::Attenuated {
                    material,
                    thickness_cm: thickness.0,
                    hvl_cm,
                    half_value_layers: half_value_layers(thickness.0, hvl_cm),
                },
            ),
            _ => {
                tracing::warn!(
                    radionuclide = radionuclide.id,
                    material = %input.shield_material_id,
                    "HVL not defined for {} and material {}; shielding ignored",
                    radionuclide.name,
                    input.shield_material_id
                );
                (
                    1.0,
                    ShieldingStatus::Unavailable {
                        material_id: input.shield_material_id.clone(),
                        radionuclide_id: radionuclide.id.to_string(),
                    },
                )
            }
        }
    };

    let dose_rate = unshielded * transmission;

    tracing::debug!(
        radionuclide = radionuclide.id,
        activity_mbq = activity.0,
        distance_m = distance.0,
        unshielded_usv_hr = unshielded,
        dose_rate_usv_hr = dose_rate,
        "dose rate computed"
    );

    DoseRateOutcome::Rate(DoseRateResult {
        dose_rate_usv_hr: dose_rate,
        unshielded_usv_hr: unshielded,
        transmission,
        shielding,
    })
}
