//! # Radionuclide Reference Data
//!
//! Fixed table of radionuclides with their gamma constants and per-material
//! half-value layers. The table is read from `data/radionuclides.toml` at
//! build time, so it is a `'static` slice with no runtime loading and no
//! mutation API.
//!
//! Half-value layers are partial: a radionuclide may have no value for a
//! given material. That is modeled as `None`, which is distinct from a zero
//! thickness.
//!
//! ## Example
//!
//! ```rust
//! use dose_core::nuclides;
//!
//! let tc = nuclides::lookup("tc-99m").unwrap();
//! assert_eq!(tc.symbol, "Tc-99m");
//! assert_eq!(nuclides::half_value_layer("tc-99m", "lead"), Some(0.03));
//! assert_eq!(nuclides::half_value_layer("tc-99m", "none"), None);
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::generated::RADIONUCLIDES;
use crate::materials::ShieldMaterial;

/// Half-value layers in cm, one optional value per shielding material
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct HalfValueLayers {
    pub lead: Option<f64>,
    pub steel: Option<f64>,
    pub concrete: Option<f64>,
    pub water: Option<f64>,
}

impl HalfValueLayers {
    /// HVL for a material; always `None` for the no-shield sentinel
    pub fn get(&self, material: ShieldMaterial) -> Option<f64> {
        match material {
            ShieldMaterial::None => None,
            ShieldMaterial::Lead => self.lead,
            ShieldMaterial::Steel => self.steel,
            ShieldMaterial::Concrete => self.concrete,
            ShieldMaterial::Water => self.water,
        }
    }
}

/// A radionuclide record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Radionuclide {
    /// Stable identifier (e.g. "tc-99m")
    pub id: &'static str,
    /// Human name (e.g. "Technetium-99m")
    pub name: &'static str,
    /// Short symbol (e.g. "Tc-99m")
    pub symbol: &'static str,
    /// Unshielded dose rate per unit activity at 1 m (µSv·m²/MBq·hr)
    pub gamma_constant: f64,
    /// Half-value layers in cm
    pub hvl_cm: HalfValueLayers,
}

impl Radionuclide {
    /// Half-value layer (cm) for a material, if one is tabulated
    pub fn half_value_layer(&self, material: ShieldMaterial) -> Option<f64> {
        self.hvl_cm.get(material)
    }

    /// Whether a material can shield this radionuclide.
    ///
    /// `None` always applies; other materials need a tabulated HVL.
    pub fn supports(&self, material: ShieldMaterial) -> bool {
        material.is_none() || self.half_value_layer(material).is_some()
    }

    /// Label for selection lists: "Technetium-99m (Tc-99m)"
    pub fn option_label(&self) -> String {
        format!("{} ({})", self.name, self.symbol)
    }
}

/// A shielding material annotated with whether it applies to a radionuclide
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShieldingChoice {
    pub material: ShieldMaterial,
    /// Half-value layer in cm (absent for `None` and untabulated pairs)
    pub hvl_cm: Option<f64>,
    pub available: bool,
}

static INDEX: Lazy<HashMap<&'static str, &'static Radionuclide>> =
    Lazy::new(|| RADIONUCLIDES.iter().map(|r| (r.id, r)).collect());

/// All radionuclides in table order
pub fn all() -> &'static [Radionuclide] {
    RADIONUCLIDES
}

/// The first table entry, used as the initial selection
pub fn default_radionuclide() -> &'static Radionuclide {
    &RADIONUCLIDES[0]
}

/// Look up a radionuclide by identifier
pub fn lookup(id: &str) -> Option<&'static Radionuclide> {
    INDEX.get(id).copied()
}

/// Half-value layer (cm) for a (radionuclide, material) pair.
///
/// Absent when the radionuclide is unknown, the material is unknown or
/// "none", or the pair has no tabulated value.
pub fn half_value_layer(radionuclide_id: &str, material_id: &str) -> Option<f64> {
    let radionuclide = lookup(radionuclide_id)?;
    let material = ShieldMaterial::from_id(material_id)?;
    radionuclide.half_value_layer(material)
}

/// Every shielding material, annotated for one radionuclide
pub fn shielding_choices(radionuclide: &Radionuclide) -> Vec<ShieldingChoice> {
    ShieldMaterial::ALL
        .iter()
        .map(|&material| ShieldingChoice {
            material,
            hvl_cm: radionuclide.half_value_layer(material),
            available: radionuclide.supports(material),
        })
        .collect()
}
