//! # Unit Types
//!
//! Closed unit enumerations for the four quantities the calculator accepts,
//! each with a fixed factor into its canonical base unit, plus lightweight
//! newtypes for values already expressed in a base unit.
//!
//! | Quantity  | Variants                          | Base unit |
//! |-----------|-----------------------------------|-----------|
//! | Activity  | Bq, kBq, MBq, GBq, µCi, mCi, Ci   | MBq       |
//! | Distance  | cm, m                             | m         |
//! | Thickness | mm, cm, m                         | cm        |
//! | Dose rate | µSv/hr, mSv/hr, mR/hr             | µSv/hr    |
//!
//! Every variant has a factor, enforced by exhaustive `match`, so there is no
//! "unknown unit" case once a value has been parsed into one of these enums.
//! Parsing strings (from a CLI flag or a JSON payload) is the only place an
//! unknown unit can show up, and it returns [`DoseError::UnknownUnit`].
//!
//! ## Example
//!
//! ```rust
//! use dose_core::units::{ActivityUnit, DoseRateUnit, UnitKind};
//!
//! let mbq = ActivityUnit::Millicurie.to_megabecquerels(2.0);
//! assert_eq!(mbq.0, 74.0);
//!
//! let unit: DoseRateUnit = "mR/hr".parse().unwrap();
//! assert_eq!(unit.factor_from_base(), 0.1);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{DoseError, DoseResult};

/// Shared behavior of the unit enumerations.
pub trait UnitKind: Copy + PartialEq + 'static {
    /// Quantity name used in error messages ("activity", "distance", ...)
    const QUANTITY: &'static str;

    /// All variants, in the order they are offered for selection
    fn all() -> &'static [Self];

    /// Display label (e.g. "µCi", "mSv/hr")
    fn label(self) -> &'static str;

    /// Alternate spellings accepted when parsing, besides the label
    fn aliases(self) -> &'static [&'static str];

    /// Multiply a value in this unit by this factor to get base units
    fn factor_to_base(self) -> f64;

    /// Convert a value in this unit to the base unit
    fn to_base(self, value: f64) -> f64 {
        value * self.factor_to_base()
    }

    /// Convert a base-unit value into this unit
    fn from_base(self, value: f64) -> f64 {
        value / self.factor_to_base()
    }

    /// Parse a unit from its label or one of its aliases.
    fn parse_unit(s: &str) -> DoseResult<Self> {
        let s = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|unit| unit.label() == s || unit.aliases().contains(&s))
            .ok_or_else(|| {
                let expected = Self::all()
                    .iter()
                    .map(|u| u.label())
                    .collect::<Vec<_>>()
                    .join(", ");
                DoseError::unknown_unit(Self::QUANTITY, s, expected)
            })
    }
}

// ============================================================================
// Activity
// ============================================================================

/// Source activity unit. Base unit: MBq.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActivityUnit {
    #[serde(rename = "Bq")]
    Becquerel,
    #[serde(rename = "kBq")]
    Kilobecquerel,
    #[default]
    #[serde(rename = "MBq")]
    Megabecquerel,
    #[serde(rename = "GBq")]
    Gigabecquerel,
    #[serde(rename = "µCi", alias = "uCi")]
    Microcurie,
    #[serde(rename = "mCi")]
    Millicurie,
    #[serde(rename = "Ci")]
    Curie,
}

impl ActivityUnit {
    /// Selection order: SI prefixes around MBq first, then curies
    pub const ALL: [ActivityUnit; 7] = [
        ActivityUnit::Megabecquerel,
        ActivityUnit::Gigabecquerel,
        ActivityUnit::Kilobecquerel,
        ActivityUnit::Becquerel,
        ActivityUnit::Curie,
        ActivityUnit::Millicurie,
        ActivityUnit::Microcurie,
    ];

    /// Convert an activity in this unit to megabecquerels
    pub fn to_megabecquerels(self, value: f64) -> Megabecquerels {
        Megabecquerels(self.to_base(value))
    }
}

impl UnitKind for ActivityUnit {
    const QUANTITY: &'static str = "activity";

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn label(self) -> &'static str {
        match self {
            ActivityUnit::Becquerel => "Bq",
            ActivityUnit::Kilobecquerel => "kBq",
            ActivityUnit::Megabecquerel => "MBq",
            ActivityUnit::Gigabecquerel => "GBq",
            ActivityUnit::Microcurie => "µCi",
            ActivityUnit::Millicurie => "mCi",
            ActivityUnit::Curie => "Ci",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            ActivityUnit::Becquerel => &["bq"],
            ActivityUnit::Kilobecquerel => &["kbq"],
            ActivityUnit::Megabecquerel => &["mbq"],
            ActivityUnit::Gigabecquerel => &["gbq"],
            ActivityUnit::Microcurie => &["uCi", "μCi", "uci"],
            ActivityUnit::Millicurie => &["mci"],
            ActivityUnit::Curie => &["ci"],
        }
    }

    fn factor_to_base(self) -> f64 {
        match self {
            ActivityUnit::Becquerel => 1.0 / 1e6,
            ActivityUnit::Kilobecquerel => 1.0 / 1e3,
            ActivityUnit::Megabecquerel => 1.0,
            ActivityUnit::Gigabecquerel => 1e3,
            ActivityUnit::Microcurie => 0.037,
            ActivityUnit::Millicurie => 37.0,
            ActivityUnit::Curie => 37_000.0,
        }
    }
}

// ============================================================================
// Distance
// ============================================================================

/// Source-to-point distance unit. Base unit: m.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DistanceUnit {
    #[serde(rename = "cm")]
    Centimeter,
    #[default]
    #[serde(rename = "m")]
    Meter,
}

impl DistanceUnit {
    pub const ALL: [DistanceUnit; 2] = [DistanceUnit::Meter, DistanceUnit::Centimeter];

    /// Convert a distance in this unit to meters
    pub fn to_meters(self, value: f64) -> Meters {
        Meters(self.to_base(value))
    }
}

impl UnitKind for DistanceUnit {
    const QUANTITY: &'static str = "distance";

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn label(self) -> &'static str {
        match self {
            DistanceUnit::Centimeter => "cm",
            DistanceUnit::Meter => "m",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            DistanceUnit::Centimeter => &["centimeter", "centimeters"],
            DistanceUnit::Meter => &["meter", "meters"],
        }
    }

    fn factor_to_base(self) -> f64 {
        match self {
            DistanceUnit::Centimeter => 0.01,
            DistanceUnit::Meter => 1.0,
        }
    }
}

// ============================================================================
// Shield Thickness
// ============================================================================

/// Shield thickness unit. Base unit: cm (half-value layers are tabulated in cm).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ThicknessUnit {
    #[serde(rename = "mm")]
    Millimeter,
    #[default]
    #[serde(rename = "cm")]
    Centimeter,
    #[serde(rename = "m")]
    Meter,
}

impl ThicknessUnit {
    pub const ALL: [ThicknessUnit; 3] = [
        ThicknessUnit::Centimeter,
        ThicknessUnit::Millimeter,
        ThicknessUnit::Meter,
    ];

    /// Convert a thickness in this unit to centimeters
    pub fn to_centimeters(self, value: f64) -> Centimeters {
        Centimeters(self.to_base(value))
    }
}

impl UnitKind for ThicknessUnit {
    const QUANTITY: &'static str = "thickness";

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn label(self) -> &'static str {
        match self {
            ThicknessUnit::Millimeter => "mm",
            ThicknessUnit::Centimeter => "cm",
            ThicknessUnit::Meter => "m",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            ThicknessUnit::Millimeter => &["millimeter", "millimeters"],
            ThicknessUnit::Centimeter => &["centimeter", "centimeters"],
            ThicknessUnit::Meter => &["meter", "meters"],
        }
    }

    fn factor_to_base(self) -> f64 {
        match self {
            ThicknessUnit::Millimeter => 0.1,
            ThicknessUnit::Centimeter => 1.0,
            ThicknessUnit::Meter => 100.0,
        }
    }
}

// ============================================================================
// Dose Rate
// ============================================================================

/// Dose rate output unit. Base unit: µSv/hr.
///
/// mR/hr uses the rounded approximation 1 mR/hr ≈ 10 µSv/hr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DoseRateUnit {
    #[default]
    #[serde(rename = "µSv/hr", alias = "uSv/hr")]
    MicroSievertPerHour,
    #[serde(rename = "mSv/hr")]
    MilliSievertPerHour,
    #[serde(rename = "mR/hr")]
    MilliRoentgenPerHour,
}

impl DoseRateUnit {
    pub const ALL: [DoseRateUnit; 3] = [
        DoseRateUnit::MicroSievertPerHour,
        DoseRateUnit::MilliSievertPerHour,
        DoseRateUnit::MilliRoentgenPerHour,
    ];

    /// Multiply a µSv/hr value by this factor to express it in this unit
    pub fn factor_from_base(self) -> f64 {
        match self {
            DoseRateUnit::MicroSievertPerHour => 1.0,
            DoseRateUnit::MilliSievertPerHour => 0.001,
            DoseRateUnit::MilliRoentgenPerHour => 0.1,
        }
    }

    /// Express a base-unit dose rate in this unit
    pub fn convert(self, rate: MicroSievertsPerHour) -> f64 {
        rate.0 * self.factor_from_base()
    }
}

impl UnitKind for DoseRateUnit {
    const QUANTITY: &'static str = "dose rate";

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn label(self) -> &'static str {
        match self {
            DoseRateUnit::MicroSievertPerHour => "µSv/hr",
            DoseRateUnit::MilliSievertPerHour => "mSv/hr",
            DoseRateUnit::MilliRoentgenPerHour => "mR/hr",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            DoseRateUnit::MicroSievertPerHour => &["uSv/hr", "μSv/hr", "µSv/h", "uSv/h", "usv/hr", "usv/h"],
            DoseRateUnit::MilliSievertPerHour => &["mSv/h", "msv/hr", "msv/h"],
            DoseRateUnit::MilliRoentgenPerHour => &["mR/h", "mr/hr", "mr/h"],
        }
    }

    fn factor_to_base(self) -> f64 {
        match self {
            DoseRateUnit::MicroSievertPerHour => 1.0,
            DoseRateUnit::MilliSievertPerHour => 1000.0,
            DoseRateUnit::MilliRoentgenPerHour => 10.0,
        }
    }

    fn from_base(self, value: f64) -> f64 {
        value * self.factor_from_base()
    }
}

// ============================================================================
// Parsing and Display (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_unit_text {
    ($type:ty) => {
        impl FromStr for $type {
            type Err = DoseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$type as UnitKind>::parse_unit(s)
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

impl_unit_text!(ActivityUnit);
impl_unit_text!(DistanceUnit);
impl_unit_text!(ThicknessUnit);
impl_unit_text!(DoseRateUnit);

// ============================================================================
// Base-Unit Values
// ============================================================================

/// Activity in megabecquerels
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megabecquerels(pub f64);

/// Distance in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Shield thickness in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Dose rate in microsieverts per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MicroSievertsPerHour(pub f64);


#[cfg(test)]
mod tests {
    use super::*;

    fn assert_round_trip<U: UnitKind + fmt::Debug>(value: f64) {
        for &unit in U::all() {
            let back = unit.from_base(unit.to_base(value));
            assert!(
                (back - value).abs() <= 1e-12 * value.abs().max(1.0),
                "{:?}: {} -> {}",
                unit,
                value,
                back
            );
        }
    }

    #[test]
    fn test_activity_factors() {
        assert_eq!(ActivityUnit::Megabecquerel.factor_to_base(), 1.0);
        assert_eq!(ActivityUnit::Gigabecquerel.to_megabecquerels(1.5).0, 1500.0);
        assert_eq!(ActivityUnit::Curie.to_megabecquerels(1.0).0, 37_000.0);
        assert!((ActivityUnit::Becquerel.to_base(1e6) - 1.0).abs() < 1e-12);
        assert!((ActivityUnit::Microcurie.to_base(10.0) - 0.37).abs() < 1e-12);
    }

    #[test]
    fn test_distance_and_thickness_factors() {
        assert_eq!(DistanceUnit::Centimeter.to_meters(50.0).0, 0.5);
        assert!((ThicknessUnit::Millimeter.to_centimeters(3.0).0 - 0.3).abs() < 1e-12);
        assert_eq!(ThicknessUnit::Meter.to_centimeters(0.25).0, 25.0);
    }

    #[test]
    fn test_dose_rate_factors() {
        let rate = MicroSievertsPerHour(250.0);
        assert_eq!(DoseRateUnit::MicroSievertPerHour.convert(rate), 250.0);
        assert_eq!(DoseRateUnit::MilliSievertPerHour.convert(rate), 0.25);
        assert_eq!(DoseRateUnit::MilliRoentgenPerHour.convert(rate), 25.0);
    }

    #[test]
    fn test_round_trips() {
        for value in [0.0, 1.0, 0.037, 123.456, 1e-9, 5e7] {
            assert_round_trip::<ActivityUnit>(value);
            assert_round_trip::<DistanceUnit>(value);
            assert_round_trip::<ThicknessUnit>(value);
            assert_round_trip::<DoseRateUnit>(value);
        }
    }

    #[test]
    fn test_all_lists_are_complete() {
        assert_eq!(ActivityUnit::ALL.len(), 7);
        assert_eq!(ActivityUnit::ALL[0], ActivityUnit::default());
        assert_eq!(DistanceUnit::ALL[0], DistanceUnit::default());
        assert_eq!(ThicknessUnit::ALL[0], ThicknessUnit::default());
        assert_eq!(DoseRateUnit::ALL[0], DoseRateUnit::default());
    }

    #[test]
    fn test_parse_labels_and_aliases() {
        assert_eq!("µCi".parse::<ActivityUnit>().unwrap(), ActivityUnit::Microcurie);
        assert_eq!("uCi".parse::<ActivityUnit>().unwrap(), ActivityUnit::Microcurie);
        assert_eq!(" MBq ".parse::<ActivityUnit>().unwrap(), ActivityUnit::Megabecquerel);
        assert_eq!("mCi".parse::<ActivityUnit>().unwrap(), ActivityUnit::Millicurie);
        assert_eq!("cm".parse::<DistanceUnit>().unwrap(), DistanceUnit::Centimeter);
        assert_eq!("mm".parse::<ThicknessUnit>().unwrap(), ThicknessUnit::Millimeter);
        assert_eq!("uSv/hr".parse::<DoseRateUnit>().unwrap(), DoseRateUnit::MicroSievertPerHour);
        assert_eq!("mR/h".parse::<DoseRateUnit>().unwrap(), DoseRateUnit::MilliRoentgenPerHour);
    }

    #[test]
    fn test_parse_unknown_unit() {
        let err = "kCi".parse::<ActivityUnit>().unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_UNIT");
        assert!(err.to_string().contains("MBq, GBq"));

        assert!("mm".parse::<DistanceUnit>().is_err());
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(ActivityUnit::Microcurie.to_string(), "µCi");
        assert_eq!(DoseRateUnit::MilliSievertPerHour.to_string(), "mSv/hr");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&DoseRateUnit::MicroSievertPerHour).unwrap();
        assert_eq!(json, "\"µSv/hr\"");
        let parsed: ActivityUnit = serde_json::from_str("\"uCi\"").unwrap();
        assert_eq!(parsed, ActivityUnit::Microcurie);

        let mbq = Megabecquerels(12.5);
        assert_eq!(serde_json::to_string(&mbq).unwrap(), "12.5");
    }
}
