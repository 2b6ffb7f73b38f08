//! # dose_core - Point-Source Dose Rate Engine
//!
//! `dose_core` is the computational heart of Radiant Shield: it estimates
//! the dose rate from a point radionuclide source at a distance, optionally
//! behind a slab shield, and converts between the usual units of activity,
//! distance, thickness and dose rate. All inputs and outputs are
//! JSON-serializable.
//!
//! Educational use only; results carry no regulatory guarantee.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: `compute` is a pure function of its request
//! - **No faults at the boundary**: unknown radionuclides and zero distance
//!   are explicit outcome variants, not errors
//! - **Static data**: reference tables are compiled in and never mutated
//!
//! ## Quick Start
//!
//! ```rust
//! use dose_core::{compute, DoseRateInput};
//! use dose_core::units::{ActivityUnit, DistanceUnit, DoseRateUnit};
//!
//! let input = DoseRateInput::new("tc-99m", 100.0, ActivityUnit::Megabecquerel, 1.0, DistanceUnit::Meter);
//! let outcome = compute(&input);
//! assert!((outcome.in_unit(DoseRateUnit::MicroSievertPerHour).unwrap() - 2.0).abs() < 1e-12);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The dose rate engine
//! - [`equations`] - Inverse-square and half-value-layer formulas
//! - [`nuclides`] - Radionuclide reference table
//! - [`materials`] - Shielding materials
//! - [`units`] - Unit enumerations and conversion factors
//! - [`presentation`] - Option lists, field parsing, result formatting, form model
//! - [`settings`] - Calculator defaults and configuration loading
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
mod generated;
pub mod materials;
pub mod nuclides;
pub mod presentation;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{compute, compute_for, DoseRateInput, DoseRateOutcome, DoseRateResult, ShieldingStatus};
pub use errors::{DoseError, DoseResult};
pub use materials::ShieldMaterial;
pub use nuclides::Radionuclide;
pub use presentation::CalculatorState;
pub use settings::CalculatorDefaults;
