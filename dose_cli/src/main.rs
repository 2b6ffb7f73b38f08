//! # Radiant Shield CLI
//!
//! Terminal front end for the dose rate engine in `dose_core`.
//!
//! ```text
//! dose_cli calc --nuclide tc-99m --activity 100 --distance 1 --material lead --thickness 0.03
//! dose_cli calc --request request.json --json
//! dose_cli nuclides
//! dose_cli materials --nuclide i-131
//! dose_cli units
//! dose_cli interactive
//! ```
//!
//! Flags left out of `calc` fall back to the calculator defaults, which can
//! be overridden with `--config defaults.toml`. Set `RUST_LOG` (or pass
//! `--verbose`) to see engine diagnostics on stderr.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dose_core::presentation::{
    format_dose_rate, format_precision, shielding_options, unit_options, CalculatorState, NumericField, DISCLAIMER,
};
use dose_core::units::{ActivityUnit, DistanceUnit, DoseRateUnit, ThicknessUnit, UnitKind};
use dose_core::{compute, nuclides, CalculatorDefaults, DoseError, DoseRateInput, DoseRateOutcome, DoseResult, ShieldingStatus};

#[derive(Parser)]
#[command(name = "dose_cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Radiant Shield - point-source dose rate calculator (educational use only)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML file with calculator defaults
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a dose rate
    Calc(CalcArgs),

    /// List radionuclides with gamma constants and half-value layers
    Nuclides,

    /// List shielding materials and whether they apply to a radionuclide
    Materials {
        /// Radionuclide identifier (defaults to the configured one)
        #[arg(short, long)]
        nuclide: Option<String>,
    },

    /// List supported units and their conversion factors
    Units,

    /// Fill in the calculator field by field
    Interactive,
}

#[derive(clap::Args, Default)]
struct CalcArgs {
    /// Read the whole request from a JSON file instead of flags
    #[arg(long, value_name = "FILE", conflicts_with_all = ["nuclide", "activity", "distance", "material", "thickness"])]
    request: Option<PathBuf>,

    /// Radionuclide identifier (e.g. tc-99m)
    #[arg(short, long)]
    nuclide: Option<String>,

    /// Source activity
    #[arg(short, long, allow_negative_numbers = true)]
    activity: Option<f64>,

    /// Activity unit (Bq, kBq, MBq, GBq, uCi, mCi, Ci)
    #[arg(long)]
    activity_unit: Option<String>,

    /// Distance from the source
    #[arg(short, long, allow_negative_numbers = true)]
    distance: Option<f64>,

    /// Distance unit (cm, m)
    #[arg(long)]
    distance_unit: Option<String>,

    /// Shielding material (none, lead, steel, concrete, water)
    #[arg(short, long)]
    material: Option<String>,

    /// Shield thickness
    #[arg(short, long, allow_negative_numbers = true)]
    thickness: Option<f64>,

    /// Thickness unit (mm, cm, m)
    #[arg(long)]
    thickness_unit: Option<String>,

    /// Output unit (uSv/hr, mSv/hr, mR/hr)
    #[arg(short, long)]
    output_unit: Option<String>,
}

/// JSON shape of a `calc` result
#[derive(Serialize)]
struct CalcReport<'a> {
    input: &'a DoseRateInput,
    outcome: &'a DoseRateOutcome,
    output_unit: DoseRateUnit,
    display: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if cli.json {
                if let Ok(json) = serde_json::to_string_pretty(&e) {
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "dose_core=debug,dose_cli=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn run(cli: &Cli) -> DoseResult<()> {
    let defaults = load_defaults(cli.config.as_deref())?;

    match &cli.command {
        Commands::Calc(args) => {
            let (input, output_unit, digits) = match &args.request {
                Some(path) => (read_request(path)?, parse_unit(args.output_unit.as_deref(), defaults.output_unit)?, defaults.significant_digits),
                None => {
                    let state = build_state(args, &defaults)?;
                    (state.input().clone(), state.output_unit(), defaults.significant_digits)
                }
            };
            let outcome = compute(&input);
            let display = format_dose_rate(&outcome, output_unit, digits);

            if cli.json {
                print_json(&CalcReport {
                    input: &input,
                    outcome: &outcome,
                    output_unit,
                    display,
                })
            } else {
                print_report(&input, &outcome, output_unit, &display);
                Ok(())
            }
        }
        Commands::Nuclides => {
            if cli.json {
                print_json(nuclides::all())
            } else {
                print_nuclides();
                Ok(())
            }
        }
        Commands::Materials { nuclide } => {
            let id = nuclide.as_deref().unwrap_or(defaults.radionuclide_id.as_str());
            let radionuclide = nuclides::lookup(id).ok_or_else(|| DoseError::unknown_radionuclide(id))?;
            if cli.json {
                print_json(&nuclides::shielding_choices(radionuclide))
            } else {
                println!("Shielding materials for {}:", radionuclide.option_label());
                for option in shielding_options(radionuclide.id) {
                    let hvl = nuclides::half_value_layer(radionuclide.id, &option.value)
                        .map(|v| format!("HVL {} cm", v))
                        .unwrap_or_default();
                    let status = if option.disabled { "[unavailable]" } else { "" };
                    println!("  {:<10} {:<10} {:<14} {}", option.value, option.label, hvl, status);
                }
                Ok(())
            }
        }
        Commands::Units => {
            print_units();
            Ok(())
        }
        Commands::Interactive => interactive(&defaults),
    }
}

fn load_defaults(path: Option<&Path>) -> DoseResult<CalculatorDefaults> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| DoseError::config(format!("cannot read '{}': {}", path.display(), e)))?;
            let defaults = CalculatorDefaults::from_toml_str(&text)?;
            tracing::debug!(path = %path.display(), "loaded calculator defaults");
            Ok(defaults)
        }
        None => Ok(CalculatorDefaults::default()),
    }
}

fn read_request(path: &Path) -> DoseResult<DoseRateInput> {
    let text = fs::read_to_string(path)
        .map_err(|e| DoseError::invalid_input("request", path.display().to_string(), e.to_string()))?;
    serde_json::from_str(&text)
        .map_err(|e| DoseError::invalid_input("request", path.display().to_string(), e.to_string()))
}

fn parse_unit<U: UnitKind>(text: Option<&str>, fallback: U) -> DoseResult<U> {
    text.map_or(Ok(fallback), U::parse_unit)
}

/// Apply command-line overrides to a calculator seeded from the defaults.
///
/// The radionuclide is selected before the material so that an explicit
/// material is checked against the radionuclide actually used.
fn build_state(args: &CalcArgs, defaults: &CalculatorDefaults) -> DoseResult<CalculatorState> {
    let mut state = CalculatorState::new(defaults);

    if let Some(id) = &args.nuclide {
        state.select_radionuclide(id)?;
    }
    if let Some(material) = &args.material {
        state.select_material(material)?;
    }

    let input = state.input().clone();
    state.set_activity_unit(parse_unit::<ActivityUnit>(args.activity_unit.as_deref(), input.activity_unit)?);
    state.set_distance_unit(parse_unit::<DistanceUnit>(args.distance_unit.as_deref(), input.distance_unit)?);
    state.set_thickness_unit(parse_unit::<ThicknessUnit>(args.thickness_unit.as_deref(), input.shield_thickness_unit)?);
    state.set_output_unit(parse_unit::<DoseRateUnit>(args.output_unit.as_deref(), state.output_unit())?);

    for (field, value) in [
        (NumericField::Activity, args.activity),
        (NumericField::Distance, args.distance),
        (NumericField::ShieldThickness, args.thickness),
    ] {
        if let Some(value) = value {
            state.set_value(field, value);
        }
    }
    Ok(state)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> DoseResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| DoseError::serialization(e.to_string()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> DoseResult<()> {
    println!("{}", to_json(value)?);
    Ok(())
}

fn print_report(input: &DoseRateInput, outcome: &DoseRateOutcome, unit: DoseRateUnit, display: &str) {
    let radionuclide = nuclides::lookup(&input.radionuclide_id)
        .map(|r| r.option_label())
        .unwrap_or_else(|| format!("{} (unknown)", input.radionuclide_id));

    println!("═══════════════════════════════════════");
    println!("  DOSE RATE");
    println!("═══════════════════════════════════════");
    println!("  Radionuclide: {}", radionuclide);
    println!("  Activity:     {} {}", input.activity, input.activity_unit);
    println!("  Distance:     {} {}", input.distance, input.distance_unit);

    match outcome.result().map(|r| &r.shielding) {
        Some(ShieldingStatus::Attenuated { material, thickness_cm, half_value_layers, .. }) => {
            println!(
                "  Shielding:    {} {} cm ({} HVL)",
                material,
                format_precision(*thickness_cm, 3),
                format_precision(*half_value_layers, 3)
            );
        }
        Some(ShieldingStatus::Unavailable { material_id, .. }) => {
            println!("  Shielding:    {} (ignored)", material_id);
        }
        _ => println!("  Shielding:    none"),
    }

    println!();
    match outcome {
        DoseRateOutcome::Rate(_) => println!("  Dose rate:    {} {}", display, unit),
        _ => println!("  Dose rate:    {}", display),
    }
    if let Some(advisory) = outcome.result().and_then(|r| r.advisory()) {
        println!("  Note: {}", advisory);
    }
    println!("═══════════════════════════════════════");
    println!();
    println!("{}", DISCLAIMER);
}

fn print_nuclides() {
    fn hvl(value: Option<f64>) -> String {
        value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
    }

    println!(
        "{:<8} {:<30} {:>8} {:>6} {:>6} {:>9} {:>6}",
        "ID", "Name", "Γ", "Pb", "Steel", "Concrete", "Water"
    );
    println!("{:<8} {:<30} {:>8} {:>6} {:>6} {:>9} {:>6}", "", "", "", "cm", "cm", "cm", "cm");
    for r in nuclides::all() {
        println!(
            "{:<8} {:<30} {:>8} {:>6} {:>6} {:>9} {:>6}",
            r.id,
            r.name,
            r.gamma_constant,
            hvl(r.hvl_cm.lead),
            hvl(r.hvl_cm.steel),
            hvl(r.hvl_cm.concrete),
            hvl(r.hvl_cm.water)
        );
    }
    println!();
    println!("Γ in µSv·m²/MBq·hr");
}

fn print_units() {
    fn section<U: UnitKind>(title: &str, base: &str) {
        println!("{} (base: {})", title, base);
        for option in unit_options::<U>() {
            if let Ok(unit) = U::parse_unit(&option.value) {
                println!("  {:<8} x {}", option.label, unit.factor_to_base());
            }
        }
    }

    section::<ActivityUnit>("Activity", "MBq");
    section::<DistanceUnit>("Distance", "m");
    section::<ThicknessUnit>("Thickness", "cm");
    section::<DoseRateUnit>("Dose rate", "µSv/hr");
    println!();
    println!("mR/hr uses the approximation 1 mR/hr ≈ 10 µSv/hr.");
}

// ============================================================================
// Interactive Mode
// ============================================================================

/// Read one line; `None` on EOF or I/O failure.
fn prompt(label: &str, current: &str) -> Option<String> {
    print!("{} [{}]: ", label, current);
    if io::stdout().flush().is_err() {
        return None;
    }

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

/// Prompt until the answer is accepted or left blank. Returns false on EOF.
fn ask(label: &str, current: String, mut apply: impl FnMut(&str) -> DoseResult<()>) -> bool {
    loop {
        let Some(answer) = prompt(label, &current) else {
            return false;
        };
        if answer.is_empty() {
            return true;
        }
        match apply(&answer) {
            Ok(()) => return true,
            Err(e) => println!("  {}", e),
        }
    }
}

fn interactive(defaults: &CalculatorDefaults) -> DoseResult<()> {
    let mut state = CalculatorState::new(defaults);

    println!("Radiant Shield - Dose Rate Calculator");
    println!("=====================================");
    println!("Press Enter to keep the value in brackets. Ctrl-D to quit.");
    println!();

    loop {
        let current = state.input().clone();
        let answered = ask("Radionuclide", current.radionuclide_id.clone(), |s| state.select_radionuclide(s))
            && ask("Activity", current.activity.to_string(), |s| state.set_field(NumericField::Activity, s))
            && ask("Activity unit", current.activity_unit.to_string(), |s| {
                state.set_activity_unit(s.parse()?);
                Ok(())
            })
            && ask("Distance", current.distance.to_string(), |s| state.set_field(NumericField::Distance, s))
            && ask("Distance unit", current.distance_unit.to_string(), |s| {
                state.set_distance_unit(s.parse()?);
                Ok(())
            })
            && ask("Shielding material", state.material().id().to_string(), |s| state.select_material(s));

        if !answered {
            break;
        }

        if state.shows_thickness() {
            let current = state.input().clone();
            let answered = ask("Shield thickness", current.shield_thickness.to_string(), |s| {
                state.set_field(NumericField::ShieldThickness, s)
            }) && ask("Thickness unit", current.shield_thickness_unit.to_string(), |s| {
                state.set_thickness_unit(s.parse()?);
                Ok(())
            });
            if !answered {
                break;
            }
        }

        if !ask("Output unit", state.output_unit().to_string(), |s| {
            state.set_output_unit(s.parse()?);
            Ok(())
        }) {
            break;
        }

        println!();
        print_report(state.input(), state.outcome(), state.output_unit(), &state.display());
        println!();
    }

    println!();
    Ok(())
}
