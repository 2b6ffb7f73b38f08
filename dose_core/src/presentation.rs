//! # Presentation Adapter
//!
//! Everything a front end needs around [`compute`] that is not a widget:
//! selection lists, reading numeric fields, rendering the outcome, and a
//! form model that recomputes whenever one of its inputs changes.
//!
//! ## Example
//!
//! ```rust
//! use dose_core::presentation::{CalculatorState, NumericField};
//! use dose_core::settings::CalculatorDefaults;
//!
//! let mut state = CalculatorState::new(&CalculatorDefaults::default());
//! assert_eq!(state.display(), "2.00");
//!
//! state.select_material("lead").unwrap();
//! state.set_field(NumericField::ShieldThickness, "0.03").unwrap();
//! assert_eq!(state.display(), "1.00");
//!
//! state.set_field(NumericField::Distance, "0").unwrap();
//! assert_eq!(state.display(), "Infinity (distance too small)");
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{compute, compute_for, DoseRateInput, DoseRateOutcome};
use crate::errors::{DoseError, DoseResult};
use crate::materials::ShieldMaterial;
use crate::nuclides::{self, Radionuclide};
use crate::settings::CalculatorDefaults;
use crate::units::{ActivityUnit, DistanceUnit, DoseRateUnit, ThicknessUnit, UnitKind};

/// Rendered in place of a number when the distance is zero or less
pub const UNBOUNDED_TEXT: &str = "Infinity (distance too small)";

/// Rendered when there is no numeric result
pub const NO_RESULT_TEXT: &str = "N/A";

/// Footer text for hosts
pub const DISCLAIMER: &str = "Disclaimer: This calculator is for educational and illustrative purposes only. \
Do not use for actual radiation protection planning without consulting a qualified expert.";

// ============================================================================
// Selection Lists
// ============================================================================

/// One entry of a selection list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub disabled: bool,
}

impl SelectOption {
    fn enabled(value: impl Into<String>, label: impl Into<String>) -> Self {
        SelectOption {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }
}

/// Radionuclides labelled "Name (Symbol)", in table order
pub fn radionuclide_options() -> Vec<SelectOption> {
    nuclides::all()
        .iter()
        .map(|r| SelectOption::enabled(r.id, r.option_label()))
        .collect()
}

/// Shielding materials, disabled where the radionuclide has no HVL.
///
/// With an unknown radionuclide nothing is disabled.
pub fn shielding_options(radionuclide_id: &str) -> Vec<SelectOption> {
    match nuclides::lookup(radionuclide_id) {
        Some(radionuclide) => shielding_options_for(radionuclide),
        None => material_options(|_| false),
    }
}

/// Shielding materials for a resolved radionuclide record
pub fn shielding_options_for(radionuclide: &Radionuclide) -> Vec<SelectOption> {
    material_options(|material| !radionuclide.supports(material))
}

fn material_options(disabled: impl Fn(ShieldMaterial) -> bool) -> Vec<SelectOption> {
    ShieldMaterial::ALL
        .iter()
        .map(|&material| SelectOption {
            value: material.id().to_string(),
            label: material.display_name().to_string(),
            disabled: disabled(material),
        })
        .collect()
}

/// Units of one quantity, value and label both being the unit label
pub fn unit_options<U: UnitKind>() -> Vec<SelectOption> {
    U::all()
        .iter()
        .map(|u| SelectOption::enabled(u.label(), u.label()))
        .collect()
}

// ============================================================================
// Field Parsing and Formatting
// ============================================================================

/// The numeric fields of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    Activity,
    Distance,
    ShieldThickness,
}

impl NumericField {
    pub fn name(&self) -> &'static str {
        match self {
            NumericField::Activity => "activity",
            NumericField::Distance => "distance",
            NumericField::ShieldThickness => "shield_thickness",
        }
    }
}

/// Read a numeric field as typed by a user.
///
/// An empty field counts as zero. Text that is not a finite number is an
/// error, and the caller should keep the field's previous value.
pub fn parse_numeric_field(field: NumericField, text: &str) -> DoseResult<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(DoseError::invalid_input(field.name(), text, "Value must be finite")),
        Err(_) => Err(DoseError::invalid_input(field.name(), text, "Not a number")),
    }
}

/// Format a number with a fixed count of significant digits.
///
/// Follows JavaScript's `Number.prototype.toPrecision`: fixed notation when
/// the decimal exponent is in `[-6, digits)`, otherwise `d.dde+X`. Exact
/// ties round up (26.25 -> "26.3").
pub fn format_precision(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let digits = digits.clamp(1, 100);
    if value == 0.0 {
        return format!("{:.*}", digits - 1, 0.0);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let (kept, exponent) = round_half_up(value.abs(), digits);

    if exponent < -6 || exponent >= digits as i32 {
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        let mantissa = match kept.split_at(1) {
            (lead, "") => lead.to_string(),
            (lead, rest) => format!("{}.{}", lead, rest),
        };
        format!("{}{}e{}{}", sign, mantissa, exp_sign, exponent.abs())
    } else if exponent < 0 {
        let zeros = "0".repeat((-exponent - 1) as usize);
        format!("{}0.{}{}", sign, zeros, kept)
    } else {
        match kept.split_at(exponent as usize + 1) {
            (int, "") => format!("{}{}", sign, int),
            (int, frac) => format!("{}{}.{}", sign, int, frac),
        }
    }
}

/// Significant digits of every finite f64 fit in this many decimals.
const EXACT_DIGITS: usize = 767;

/// Round a positive finite value to `digits` significant digits, ties away
/// from zero.
///
/// Returns the digit string and the decimal exponent of its first digit.
/// `{:e}` with a fixed precision rounds ties to even, so the exact decimal
/// expansion is produced first and rounded by hand.
fn round_half_up(magnitude: f64, digits: usize) -> (String, i32) {
    let exact = format!("{:.*e}", EXACT_DIGITS, magnitude);
    let (mantissa, exponent) = exact.split_once('e').unwrap_or((exact.as_str(), "0"));
    let mut exponent = exponent.parse::<i32>().unwrap_or(0);

    let all: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    let mut kept = all[..digits].to_vec();

    if all[digits] >= b'5' {
        let mut i = digits;
        loop {
            if i == 0 {
                // 99.9 -> 100: one more digit in front, one fewer kept
                kept.insert(0, b'1');
                kept.truncate(digits);
                exponent += 1;
                break;
            }
            i -= 1;
            if kept[i] == b'9' {
                kept[i] = b'0';
            } else {
                kept[i] += 1;
                break;
            }
        }
    }

    (String::from_utf8_lossy(&kept).into_owned(), exponent)
}

/// Render an outcome in a display unit.
pub fn format_dose_rate(outcome: &DoseRateOutcome, unit: DoseRateUnit, digits: usize) -> String {
    match outcome {
        DoseRateOutcome::Rate(result) => {
            let value = result.in_unit(unit);
            if value.is_finite() {
                format_precision(value, digits)
            } else if value == f64::INFINITY {
                UNBOUNDED_TEXT.to_string()
            } else {
                NO_RESULT_TEXT.to_string()
            }
        }
        DoseRateOutcome::Unbounded => UNBOUNDED_TEXT.to_string(),
        DoseRateOutcome::NoResult => NO_RESULT_TEXT.to_string(),
    }
}

// ============================================================================
// Form Model
// ============================================================================

/// Calculator form state.
///
/// Every setter recomputes the outcome synchronously, so [`outcome`] and
/// [`display`] always reflect the current inputs.
///
/// [`outcome`]: CalculatorState::outcome
/// [`display`]: CalculatorState::display
#[derive(Debug, Clone)]
pub struct CalculatorState {
    input: DoseRateInput,
    radionuclide: Option<&'static Radionuclide>,
    output_unit: DoseRateUnit,
    significant_digits: usize,
    outcome: DoseRateOutcome,
}

impl CalculatorState {
    pub fn new(defaults: &CalculatorDefaults) -> Self {
        let input = defaults.to_input();
        let radionuclide = nuclides::lookup(&input.radionuclide_id);
        let outcome = evaluate(radionuclide, &input);
        CalculatorState {
            input,
            radionuclide,
            output_unit: defaults.output_unit,
            significant_digits: defaults.significant_digits,
            outcome,
        }
    }

    pub fn input(&self) -> &DoseRateInput {
        &self.input
    }

    pub fn outcome(&self) -> &DoseRateOutcome {
        &self.outcome
    }

    pub fn output_unit(&self) -> DoseRateUnit {
        self.output_unit
    }

    /// The currently selected shield material
    pub fn material(&self) -> ShieldMaterial {
        ShieldMaterial::from_id(&self.input.shield_material_id).unwrap_or_default()
    }

    /// The thickness field only matters once a material is selected
    pub fn shows_thickness(&self) -> bool {
        !self.material().is_none()
    }

    /// Shielding options for the selected radionuclide
    pub fn shielding_options(&self) -> Vec<SelectOption> {
        match self.radionuclide {
            Some(radionuclide) => shielding_options_for(radionuclide),
            None => shielding_options(&self.input.radionuclide_id),
        }
    }

    /// Formatted result in the selected output unit
    pub fn display(&self) -> String {
        format_dose_rate(&self.outcome, self.output_unit, self.significant_digits)
    }

    fn recompute(&mut self) {
        self.outcome = evaluate(self.radionuclide, &self.input);
    }

    /// Update a numeric field from user text. On error the field is unchanged.
    pub fn set_field(&mut self, field: NumericField, text: &str) -> DoseResult<()> {
        let value = parse_numeric_field(field, text)?;
        self.set_value(field, value);
        Ok(())
    }

    /// Update a numeric field
    pub fn set_value(&mut self, field: NumericField, value: f64) {
        match field {
            NumericField::Activity => self.input.activity = value,
            NumericField::Distance => self.input.distance = value,
            NumericField::ShieldThickness => self.input.shield_thickness = value,
        }
        self.recompute();
    }

    pub fn set_activity_unit(&mut self, unit: ActivityUnit) {
        self.input.activity_unit = unit;
        self.recompute();
    }

    pub fn set_distance_unit(&mut self, unit: DistanceUnit) {
        self.input.distance_unit = unit;
        self.recompute();
    }

    pub fn set_thickness_unit(&mut self, unit: ThicknessUnit) {
        self.input.shield_thickness_unit = unit;
        self.recompute();
    }

    /// Change the display unit; the base-unit outcome is unaffected
    pub fn set_output_unit(&mut self, unit: DoseRateUnit) {
        self.output_unit = unit;
    }

    /// Select a radionuclide by identifier.
    pub fn select_radionuclide(&mut self, id: &str) -> DoseResult<()> {
        let radionuclide = nuclides::lookup(id).ok_or_else(|| DoseError::unknown_radionuclide(id))?;
        self.set_radionuclide(radionuclide);
        Ok(())
    }

    /// Switch to a radionuclide record.
    ///
    /// If the current shield material has no HVL for the new radionuclide,
    /// the material falls back to "none". The thickness is kept.
    pub fn set_radionuclide(&mut self, radionuclide: &'static Radionuclide) {
        self.input.radionuclide_id = radionuclide.id.to_string();
        self.radionuclide = Some(radionuclide);

        let material = self.material();
        if !radionuclide.supports(material) {
            tracing::info!(
                radionuclide = radionuclide.id,
                material = material.id(),
                "shield material not applicable, resetting to none"
            );
            self.input.shield_material_id = ShieldMaterial::None.id().to_string();
        }
        self.recompute();
    }

    /// Select a shield material by identifier or common name.
    ///
    /// Materials without an HVL for the current radionuclide are rejected.
    pub fn select_material(&mut self, id: &str) -> DoseResult<()> {
        let material = ShieldMaterial::from_str_flexible(id)?;
        if let Some(radionuclide) = self.radionuclide {
            if !radionuclide.supports(material) {
                return Err(DoseError::material_unavailable(material.id(), radionuclide.id));
            }
        }
        self.input.shield_material_id = material.id().to_string();
        self.recompute();
        Ok(())
    }
}

fn evaluate(radionuclide: Option<&Radionuclide>, input: &DoseRateInput) -> DoseRateOutcome {
    match radionuclide {
        Some(radionuclide) => compute_for(radionuclide, input),
        None => compute(input),
    }
}

impl Default for CalculatorState {
    fn default() -> Self {
        CalculatorState::new(&CalculatorDefaults::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nuclides::HalfValueLayers;

    static NO_WATER: Radionuclide = Radionuclide {
        id: "xe-133",
        name: "Xenon-133",
        symbol: "Xe-133",
        gamma_constant: 0.01,
        hvl_cm: HalfValueLayers {
            lead: Some(0.02),
            steel: Some(0.2),
            concrete: Some(2.0),
            water: None,
        },
    };

    #[test]
    fn test_format_precision_fixed() {
        assert_eq!(format_precision(2.0, 3), "2.00");
        assert_eq!(format_precision(0.5, 3), "0.500");
        assert_eq!(format_precision(38.75, 3), "38.8");
        assert_eq!(format_precision(123.4, 3), "123");
        assert_eq!(format_precision(0.000001, 3), "0.00000100");
        assert_eq!(format_precision(-0.25, 3), "-0.250");
        assert_eq!(format_precision(0.0, 3), "0.00");
    }

    #[test]
    fn test_format_precision_exponential() {
        assert_eq!(format_precision(1234.5, 3), "1.23e+3");
        assert_eq!(format_precision(999.6, 3), "1.00e+3");
        assert_eq!(format_precision(0.00000012345, 3), "1.23e-7");
        assert_eq!(format_precision(50_000.0, 1), "5e+4");
    }

    #[test]
    fn test_format_precision_rounds_ties_up() {
        assert_eq!(format_precision(26.25, 3), "26.3");
        assert_eq!(format_precision(1.125, 3), "1.13");
        assert_eq!(format_precision(2.5, 1), "3");
        assert_eq!(format_precision(9.5, 1), "1e+1");
        assert_eq!(format_precision(-0.125, 2), "-0.13");
        // 0.15 is stored just below the tie
        assert_eq!(format_precision(0.15, 1), "0.1");
    }

    #[test]
    fn test_display_of_exact_tie() {
        // I-123: 0.042 * 625 = 26.25 and 0.042 * 3250 = 136.5 µSv/hr
        let mut state = CalculatorState::default();
        state.select_radionuclide("i-123").unwrap();
        state.set_field(NumericField::Activity, "625").unwrap();
        assert_eq!(state.display(), "26.3");

        state.set_field(NumericField::Activity, "3250").unwrap();
        assert_eq!(state.display(), "137");
    }

    #[test]
    fn test_format_sentinels() {
        let unit = DoseRateUnit::MicroSievertPerHour;
        assert_eq!(format_dose_rate(&DoseRateOutcome::Unbounded, unit, 3), UNBOUNDED_TEXT);
        assert_eq!(format_dose_rate(&DoseRateOutcome::NoResult, unit, 3), NO_RESULT_TEXT);
    }

    #[test]
    fn test_format_converts_unit() {
        let state = CalculatorState::default();
        let outcome = state.outcome();
        assert_eq!(format_dose_rate(outcome, DoseRateUnit::MilliSievertPerHour, 3), "0.00200");
        assert_eq!(format_dose_rate(outcome, DoseRateUnit::MilliRoentgenPerHour, 3), "0.200");
    }

    #[test]
    fn test_parse_numeric_field() {
        assert_eq!(parse_numeric_field(NumericField::Activity, "").unwrap(), 0.0);
        assert_eq!(parse_numeric_field(NumericField::Activity, "  ").unwrap(), 0.0);
        assert_eq!(parse_numeric_field(NumericField::Distance, " 2.5 ").unwrap(), 2.5);
        assert_eq!(parse_numeric_field(NumericField::Distance, "1e-2").unwrap(), 0.01);

        let err = parse_numeric_field(NumericField::Distance, "abc").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(parse_numeric_field(NumericField::Activity, "inf").is_err());
        assert!(parse_numeric_field(NumericField::Activity, "NaN").is_err());
    }

    #[test]
    fn test_radionuclide_options() {
        let options = radionuclide_options();
        assert_eq!(options.len(), nuclides::all().len());
        assert_eq!(options[0].value, "tc-99m");
        assert_eq!(options[0].label, "Technetium-99m (Tc-99m)");
        assert!(options.iter().all(|o| !o.disabled));
    }

    #[test]
    fn test_shielding_options() {
        let options = shielding_options("tc-99m");
        let values: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["none", "lead", "steel", "concrete", "water"]);
        assert!(options.iter().all(|o| !o.disabled));

        let unknown = shielding_options("xx-1");
        assert!(unknown.iter().all(|o| !o.disabled));
    }

    #[test]
    fn test_unit_options_order() {
        let labels: Vec<_> = unit_options::<ActivityUnit>().into_iter().map(|o| o.label).collect();
        assert_eq!(labels, ["MBq", "GBq", "kBq", "Bq", "Ci", "mCi", "µCi"]);

        let labels: Vec<_> = unit_options::<ThicknessUnit>().into_iter().map(|o| o.value).collect();
        assert_eq!(labels, ["cm", "mm", "m"]);
    }

    #[test]
    fn test_state_recomputes_on_change() {
        let mut state = CalculatorState::default();
        assert_eq!(state.display(), "2.00");
        assert!(!state.shows_thickness());

        state.set_field(NumericField::Activity, "200").unwrap();
        assert_eq!(state.display(), "4.00");

        state.set_distance_unit(DistanceUnit::Centimeter);
        state.set_field(NumericField::Distance, "200").unwrap();
        assert_eq!(state.display(), "1.00");

        state.set_output_unit(DoseRateUnit::MilliRoentgenPerHour);
        assert_eq!(state.display(), "0.100");
    }

    #[test]
    fn test_state_keeps_value_on_invalid_text() {
        let mut state = CalculatorState::default();
        assert!(state.set_field(NumericField::Activity, "lots").is_err());
        assert_eq!(state.input().activity, 100.0);
        assert_eq!(state.display(), "2.00");

        state.set_field(NumericField::Activity, "").unwrap();
        assert_eq!(state.display(), "0.00");
    }

    #[test]
    fn test_state_shielding() {
        let mut state = CalculatorState::default();
        state.select_material("Pb").unwrap();
        assert!(state.shows_thickness());
        assert_eq!(state.display(), "2.00");

        state.set_thickness_unit(ThicknessUnit::Millimeter);
        state.set_field(NumericField::ShieldThickness, "0.6").unwrap();
        assert_eq!(state.display(), "0.500");

        assert!(state.select_material("tungsten").is_err());
        assert_eq!(state.material(), ShieldMaterial::Lead);
    }

    #[test]
    fn test_select_radionuclide() {
        let mut state = CalculatorState::default();
        state.select_radionuclide("f-18").unwrap();
        assert_eq!(state.input().radionuclide_id, "f-18");
        assert_eq!(state.display(), "15.5");

        let err = state.select_radionuclide("xx-1").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_RADIONUCLIDE");
        assert_eq!(state.input().radionuclide_id, "f-18");
    }

    #[test]
    fn test_shielding_options_disable_missing_hvl() {
        let options = shielding_options_for(&NO_WATER);
        let disabled: Vec<_> = options.iter().filter(|o| o.disabled).map(|o| o.value.as_str()).collect();
        assert_eq!(disabled, ["water"]);
        assert!(!options[0].disabled);
    }

    #[test]
    fn test_radionuclide_change_resets_material() {
        let mut state = CalculatorState::default();
        state.select_material("water").unwrap();
        state.set_field(NumericField::ShieldThickness, "12").unwrap();

        state.set_radionuclide(&NO_WATER);
        assert_eq!(state.input().radionuclide_id, "xe-133");
        assert_eq!(state.material(), ShieldMaterial::None);
        assert_eq!(state.input().shield_thickness, 12.0);
        assert!(!state.shows_thickness());
        // 0.01 * 100 MBq at 1 m, unshielded
        assert_eq!(state.display(), "1.00");
        assert!(state.shielding_options().iter().any(|o| o.value == "water" && o.disabled));
    }

    #[test]
    fn test_radionuclide_change_keeps_supported_material() {
        let mut state = CalculatorState::default();
        state.select_material("lead").unwrap();
        state.set_field(NumericField::ShieldThickness, "0.02").unwrap();

        state.set_radionuclide(&NO_WATER);
        assert_eq!(state.material(), ShieldMaterial::Lead);
        assert_eq!(state.display(), "0.500");
    }

    #[test]
    fn test_unavailable_material_is_rejected() {
        let mut state = CalculatorState::default();
        state.set_radionuclide(&NO_WATER);

        let err = state.select_material("water").unwrap_err();
        assert_eq!(err, DoseError::material_unavailable("water", "xe-133"));
        assert_eq!(err.error_code(), "MATERIAL_UNAVAILABLE");
        assert_eq!(state.material(), ShieldMaterial::None);

        state.select_material("concrete").unwrap();
        assert_eq!(state.material(), ShieldMaterial::Concrete);
    }

    #[test]
    fn test_unbounded_display() {
        let mut state = CalculatorState::default();
        state.set_value(NumericField::Distance, 0.0);
        assert!(state.outcome().is_unbounded());
        assert_eq!(state.display(), UNBOUNDED_TEXT);
    }
}
