//! # Dose Rate Formulas
//!
//! The two relations the calculator is built on, as plain functions of
//! base-unit values.
//!
//! ## Notation
//!
//! - `Γ` = Gamma constant (µSv·m²/MBq·hr)
//! - `A` = Activity (MBq)
//! - `d` = Distance from a point source (m)
//! - `Ḋ` = Dose rate (µSv/hr)
//! - `x` = Shield thickness (cm)
//! - `HVL` = Half-value layer of the shield for the source's photons (cm)
//!
//! ## Assumptions
//!
//! - Point source, no self-absorption
//! - Single slab shield, narrow-beam attenuation (no buildup factor)
//! - No air attenuation or scatter

// =============================================================================
// DISTANCE
// =============================================================================

/// Unshielded dose rate at distance d from a point source
///
/// ```text
///    ●  ─────── d ───────→  ×
///  source                 point
/// ```
///
/// # Formula
/// Ḋ = Γ·A / d²
///
/// # Arguments
/// * `gamma` - Gamma constant Γ (µSv·m²/MBq·hr)
/// * `activity_mbq` - Activity A (MBq)
/// * `distance_m` - Distance d (m), must be positive
///
/// # Example
/// ```rust
/// use dose_core::equations::inverse_square_dose_rate;
///
/// // Tc-99m, 100 MBq at 1 m
/// let rate = inverse_square_dose_rate(0.020, 100.0, 1.0);
/// assert!((rate - 2.0).abs() < 1e-12);
/// ```
#[inline]
pub fn inverse_square_dose_rate(gamma: f64, activity_mbq: f64, distance_m: f64) -> f64 {
    gamma * activity_mbq / (distance_m * distance_m)
}

// =============================================================================
// SHIELDING
// =============================================================================

/// Fraction of the dose rate transmitted through a slab shield
///
/// # Formula
/// T = 0.5^(x / HVL)
///
/// One HVL halves the rate, two quarter it. The result approaches zero for
/// thick shields but never reaches it or goes negative.
///
/// # Arguments
/// * `thickness_cm` - Shield thickness x (cm)
/// * `hvl_cm` - Half-value layer (cm), must be positive
#[inline]
pub fn hvl_transmission(thickness_cm: f64, hvl_cm: f64) -> f64 {
    0.5_f64.powf(half_value_layers(thickness_cm, hvl_cm))
}

/// Shield thickness expressed as a number of half-value layers (x / HVL)
#[inline]
pub fn half_value_layers(thickness_cm: f64, hvl_cm: f64) -> f64 {
    thickness_cm / hvl_cm
}
