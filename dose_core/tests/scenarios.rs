//! End-to-end scenarios through the public API.

use dose_core::presentation::{format_dose_rate, CalculatorState, NumericField, NO_RESULT_TEXT, UNBOUNDED_TEXT};
use dose_core::units::{ActivityUnit, DistanceUnit, DoseRateUnit, ThicknessUnit};
use dose_core::{compute, nuclides, CalculatorDefaults, DoseRateInput, DoseRateOutcome, ShieldingStatus};

fn usv_hr(input: &DoseRateInput) -> f64 {
    compute(input).in_unit(DoseRateUnit::MicroSievertPerHour).unwrap()
}

#[test]
fn technetium_lead_scenario() {
    let bare = DoseRateInput::new("tc-99m", 100.0, ActivityUnit::Megabecquerel, 1.0, DistanceUnit::Meter);
    assert!((usv_hr(&bare) - 2.0).abs() < 1e-12);

    let one_hvl = bare.clone().with_shield("lead", 0.03, ThicknessUnit::Centimeter);
    assert!((usv_hr(&one_hvl) - 1.0).abs() < 1e-12);

    let two_hvl = bare.clone().with_shield("lead", 0.06, ThicknessUnit::Centimeter);
    assert!((usv_hr(&two_hvl) - 0.5).abs() < 1e-12);
}

#[test]
fn manual_computation_for_several_radionuclides() {
    // (id, gamma, activity MBq, distance m)
    let cases = [
        ("i-131", 0.059, 3700.0, 2.0),
        ("f-18", 0.155, 370.0, 0.5),
        ("lu-177", 0.016, 7400.0, 1.5),
        ("in-111", 0.086, 185.0, 3.0),
    ];

    for (id, gamma, activity, distance) in cases {
        assert_eq!(nuclides::lookup(id).unwrap().gamma_constant, gamma);
        let input = DoseRateInput::new(id, activity, ActivityUnit::Megabecquerel, distance, DistanceUnit::Meter);
        let expected = gamma * activity / (distance * distance);
        assert!((usv_hr(&input) - expected).abs() < 1e-9, "{}", id);
    }
}

#[test]
fn curie_and_centimeter_inputs() {
    // 1 Ci = 37 GBq of I-131 at 100 cm: 0.059 * 37000 / 1 = 2183 µSv/hr
    let input = DoseRateInput::new("i-131", 1.0, ActivityUnit::Curie, 100.0, DistanceUnit::Centimeter);
    assert!((usv_hr(&input) - 2183.0).abs() < 1e-6);

    let outcome = compute(&input);
    assert!((outcome.in_unit(DoseRateUnit::MilliSievertPerHour).unwrap() - 2.183).abs() < 1e-9);
    assert!((outcome.in_unit(DoseRateUnit::MilliRoentgenPerHour).unwrap() - 218.3).abs() < 1e-6);
}

#[test]
fn concrete_wall_in_meters() {
    // F-18 behind 0.16 m of concrete = 4 HVLs
    let input = DoseRateInput::new("f-18", 1.0, ActivityUnit::Gigabecquerel, 2.0, DistanceUnit::Meter)
        .with_shield("concrete", 0.16, ThicknessUnit::Meter);
    let outcome = compute(&input);
    let result = outcome.result().unwrap();

    assert!((result.unshielded_usv_hr - 38.75).abs() < 1e-9);
    assert!((result.transmission - 0.0625).abs() < 1e-12);
    assert!(matches!(result.shielding, ShieldingStatus::Attenuated { .. }));
}

#[test]
fn zero_distance_in_every_unit() {
    for unit in DistanceUnit::ALL {
        let input = DoseRateInput::new("ga-68", 500.0, ActivityUnit::Megabecquerel, 0.0, unit);
        assert_eq!(compute(&input), DoseRateOutcome::Unbounded);
        assert_eq!(format_dose_rate(&compute(&input), DoseRateUnit::MicroSievertPerHour, 3), UNBOUNDED_TEXT);
    }
}

#[test]
fn unknown_radionuclide_renders_not_available() {
    let input = DoseRateInput::new("co-60", 1.0, ActivityUnit::Gigabecquerel, 1.0, DistanceUnit::Meter);
    let outcome = compute(&input);
    assert_eq!(outcome, DoseRateOutcome::NoResult);
    assert_eq!(format_dose_rate(&outcome, DoseRateUnit::MicroSievertPerHour, 3), NO_RESULT_TEXT);
}

#[test]
fn json_request_round_trip_through_engine() {
    let json = r#"{
        "activity": 10.0,
        "activity_unit": "mCi",
        "distance": 50.0,
        "distance_unit": "cm",
        "radionuclide_id": "tc-99m",
        "shield_material_id": "steel",
        "shield_thickness": 3.0,
        "shield_thickness_unit": "mm"
    }"#;
    let input: DoseRateInput = serde_json::from_str(json).unwrap();

    // 370 MBq at 0.5 m = 29.6 µSv/hr, behind one steel HVL
    assert!((usv_hr(&input) - 14.8).abs() < 1e-9);

    let outcome_json = serde_json::to_value(compute(&input)).unwrap();
    assert_eq!(outcome_json["outcome"], "rate");
    assert_eq!(outcome_json["shielding"]["status"], "attenuated");
    assert_eq!(outcome_json["shielding"]["material"], "steel");
}

#[test]
fn form_session_from_config() {
    let defaults = CalculatorDefaults::from_toml_str(
        r#"
        radionuclide_id = "i-131"
        output_unit = "mR/hr"

        [activity]
        value = 1.0
        unit = "GBq"
        "#,
    )
    .unwrap();

    let mut state = CalculatorState::new(&defaults);
    // 0.059 * 1000 = 59 µSv/hr = 5.9 mR/hr
    assert_eq!(state.display(), "5.90");

    state.select_material("lead").unwrap();
    state.set_field(NumericField::ShieldThickness, "0.5").unwrap();
    // two HVLs of lead
    assert_eq!(state.display(), "1.48");

    state.select_radionuclide("tl-201").unwrap();
    assert_eq!(state.input().shield_material_id, "lead");
    // 0.012 * 1000 * 0.5^(0.5/0.01) / 10
    assert_eq!(state.display(), "1.07e-15");
}
