//! # Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Outcome` / `*Result` - Calculation results (JSON-serializable)
//! - a pure function from input to outcome
//!
//! ## Available Calculations
//!
//! - [`dose_rate`] - Point-source dose rate with optional slab shielding

pub mod dose_rate;

// Re-export commonly used types
pub use dose_rate::{compute, compute_for, DoseRateInput, DoseRateOutcome, DoseRateResult, ShieldingStatus};
