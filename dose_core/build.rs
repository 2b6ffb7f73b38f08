//! Build script: compiles `data/radionuclides.toml` into Rust statics.
//!
//! The generated file is written to `$OUT_DIR/radionuclide_data.rs` and
//! pulled into the crate by `src/generated.rs`. Malformed data fails the
//! build rather than surfacing at runtime.

use std::collections::HashSet;
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::Deserialize;

const DATA_PATH: &str = "data/radionuclides.toml";

#[derive(Deserialize)]
struct DataFile {
    radionuclide: Vec<RadionuclideRow>,
}

#[derive(Deserialize)]
struct RadionuclideRow {
    id: String,
    name: String,
    symbol: String,
    gamma_constant: f64,
    #[serde(default)]
    hvl_cm: HvlRow,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct HvlRow {
    lead: Option<f64>,
    steel: Option<f64>,
    concrete: Option<f64>,
    water: Option<f64>,
}

fn main() {
    println!("cargo:rerun-if-changed={}", DATA_PATH);
    println!("cargo:rerun-if-changed=build.rs");

    let raw = fs::read_to_string(DATA_PATH)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", DATA_PATH, e));
    let data: DataFile = toml::from_str(&raw)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", DATA_PATH, e));

    validate(&data);

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set by cargo");
    let out_path = Path::new(&out_dir).join("radionuclide_data.rs");
    fs::write(&out_path, render(&data))
        .unwrap_or_else(|e| panic!("Failed to write {}: {}", out_path.display(), e));
}

fn validate(data: &DataFile) {
    assert!(!data.radionuclide.is_empty(), "{} has no radionuclides", DATA_PATH);

    let mut seen = HashSet::new();
    for row in &data.radionuclide {
        assert!(seen.insert(row.id.as_str()), "Duplicate radionuclide id '{}'", row.id);
        assert!(
            row.gamma_constant.is_finite() && row.gamma_constant > 0.0,
            "Gamma constant for '{}' must be positive, got {}",
            row.id,
            row.gamma_constant
        );
        for (material, hvl) in [
            ("lead", row.hvl_cm.lead),
            ("steel", row.hvl_cm.steel),
            ("concrete", row.hvl_cm.concrete),
            ("water", row.hvl_cm.water),
        ] {
            if let Some(value) = hvl {
                assert!(
                    value.is_finite() && value > 0.0,
                    "HVL for '{}' in {} must be positive, got {}",
                    row.id,
                    material,
                    value
                );
            }
        }
    }
}

fn render(data: &DataFile) -> String {
    let mut out = String::new();
    out.push_str("// Generated by build.rs from data/radionuclides.toml. Do not edit.\n\n");
    out.push_str("pub static RADIONUCLIDES: &[Radionuclide] = &[\n");
    for row in &data.radionuclide {
        writeln!(out, "    Radionuclide {{").unwrap();
        writeln!(out, "        id: {:?},", row.id).unwrap();
        writeln!(out, "        name: {:?},", row.name).unwrap();
        writeln!(out, "        symbol: {:?},", row.symbol).unwrap();
        writeln!(out, "        gamma_constant: {:?},", row.gamma_constant).unwrap();
        writeln!(out, "        hvl_cm: HalfValueLayers {{").unwrap();
        writeln!(out, "            lead: {},", option_literal(row.hvl_cm.lead)).unwrap();
        writeln!(out, "            steel: {},", option_literal(row.hvl_cm.steel)).unwrap();
        writeln!(out, "            concrete: {},", option_literal(row.hvl_cm.concrete)).unwrap();
        writeln!(out, "            water: {},", option_literal(row.hvl_cm.water)).unwrap();
        writeln!(out, "        }},").unwrap();
        writeln!(out, "    }},").unwrap();
    }
    out.push_str("];\n");
    out
}

// `{:?}` on f64 always keeps a decimal point, so the literal stays an f64.
fn option_literal(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("Some({:?})", v),
        None => "None".to_string(),
    }
}
