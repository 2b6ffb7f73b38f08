//! # Error Types
//!
//! Structured error types for dose_core. The dose rate engine itself never
//! returns an error (degenerate inputs are explicit outcome variants, see
//! [`crate::calculations::dose_rate`]). These errors cover the surfaces
//! around it: parsing unit strings, resolving identifiers chosen by a host,
//! reading numeric form fields and loading configuration.
//!
//! ## Example
//!
//! ```rust
//! use dose_core::errors::{DoseError, DoseResult};
//!
//! fn require_known(id: &str) -> DoseResult<()> {
//!     if dose_core::nuclides::lookup(id).is_none() {
//!         return Err(DoseError::unknown_radionuclide(id));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_known("tc-99m").is_ok());
//! assert!(require_known("xx-1").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for dose_core operations
pub type DoseResult<T> = Result<T, DoseError>;

/// Structured error type for everything outside the engine boundary.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum DoseError {
    /// A unit string did not match any variant of its quantity
    #[error("Unknown {quantity} unit: '{unit}' (expected one of {expected})")]
    UnknownUnit {
        quantity: String,
        unit: String,
        expected: String,
    },

    /// Radionuclide identifier not in the reference table
    #[error("Radionuclide not found: {id}")]
    UnknownRadionuclide { id: String },

    /// Shielding material identifier not recognized
    #[error("Shielding material not found: {id}")]
    UnknownMaterial { id: String },

    /// Material exists but has no half-value layer for the radionuclide
    #[error("Shielding material '{material}' has no half-value layer for {radionuclide}")]
    MaterialUnavailable {
        material: String,
        radionuclide: String,
    },

    /// A numeric form field could not be read
    #[error("Invalid input for '{field}': '{value}' - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Configuration document could not be parsed or is inconsistent
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Output could not be serialized
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl DoseError {
    /// Create an UnknownUnit error
    pub fn unknown_unit(quantity: impl Into<String>, unit: impl Into<String>, expected: impl Into<String>) -> Self {
        DoseError::UnknownUnit {
            quantity: quantity.into(),
            unit: unit.into(),
            expected: expected.into(),
        }
    }

    /// Create an UnknownRadionuclide error
    pub fn unknown_radionuclide(id: impl Into<String>) -> Self {
        DoseError::UnknownRadionuclide { id: id.into() }
    }

    /// Create an UnknownMaterial error
    pub fn unknown_material(id: impl Into<String>) -> Self {
        DoseError::UnknownMaterial { id: id.into() }
    }

    /// Create a MaterialUnavailable error
    pub fn material_unavailable(material: impl Into<String>, radionuclide: impl Into<String>) -> Self {
        DoseError::MaterialUnavailable {
            material: material.into(),
            radionuclide: radionuclide.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        DoseError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config(reason: impl Into<String>) -> Self {
        DoseError::ConfigError { reason: reason.into() }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        DoseError::SerializationError { reason: reason.into() }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DoseError::UnknownUnit { .. } => "UNKNOWN_UNIT",
            DoseError::UnknownRadionuclide { .. } => "UNKNOWN_RADIONUCLIDE",
            DoseError::UnknownMaterial { .. } => "UNKNOWN_MATERIAL",
            DoseError::MaterialUnavailable { .. } => "MATERIAL_UNAVAILABLE",
            DoseError::InvalidInput { .. } => "INVALID_INPUT",
            DoseError::ConfigError { .. } => "CONFIG_ERROR",
            DoseError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}
