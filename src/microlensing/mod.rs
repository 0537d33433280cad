//! # Astrometric microlensing
//!
//! Photocenter shift of a background source lensed by a foreground star in
//! the **partially resolved** regime (Sahu et al. 2017, Science 356, 1046):
//!
//! ```text
//! θE = 2.854 · sqrt(M · (ϖ_L − ϖ_S))     [mas]
//! u  = Δθ / θE
//! δ  = ½ · (sqrt(u² + 4) − u) · θE        [mas]
//! ```
//!
//! - [`einstein_radius`](crate::microlensing::einstein_radius) evaluates `θE` once per lens–source pair,
//! - [`deflection`](crate::microlensing::deflection) turns a separation into the deflection
//!   magnitude and then into a tangent-plane offset.

pub mod deflection;
pub mod einstein_radius;
