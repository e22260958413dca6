//! Conversion between the public rating scale and the internal Glicko-2
//! scale.
//!
//! The public scale is centered on `1500` with deviations around `350` for a
//! new competitor. The internal scale is centered on `0` and shrunk by
//! [`INTERNAL_RATING_SCALE`]. Volatility is the same on both scales.

/// Ratio between the public and the internal scale.
pub const INTERNAL_RATING_SCALE: f64 = 173.7178;

/// Public rating that maps to `mu = 0`.
pub const RATING_CENTER: f64 = 1500.0;

#[inline]
pub fn rating_to_mu(rating: f64) -> f64 {
    (rating - RATING_CENTER) / INTERNAL_RATING_SCALE
}

#[inline]
pub fn mu_to_rating(mu: f64) -> f64 {
    mu * INTERNAL_RATING_SCALE + RATING_CENTER
}

#[inline]
pub fn deviation_to_phi(deviation: f64) -> f64 {
    deviation / INTERNAL_RATING_SCALE
}

#[inline]
pub fn phi_to_deviation(phi: f64) -> f64 {
    phi * INTERNAL_RATING_SCALE
}

/// A competitor's state on the internal scale.
///
/// This is a plain copy. Taking one from a competitor never borrows it
/// beyond the call, so snapshots of opponents can be collected before a
/// rating period and used while any competitor is updated.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InternalRating {
    /// Centered rating.
    pub mu: f64,
    /// Centered rating deviation. Always positive.
    pub phi: f64,
    pub volatility: f64,
}

impl InternalRating {
    #[inline]
    pub fn from_public(rating: f64, deviation: f64, volatility: f64) -> InternalRating {
        InternalRating {
            mu: rating_to_mu(rating),
            phi: deviation_to_phi(deviation),
            volatility,
        }
    }

    #[inline]
    pub fn rating(&self) -> f64 {
        mu_to_rating(self.mu)
    }

    #[inline]
    pub fn deviation(&self) -> f64 {
        phi_to_deviation(self.phi)
    }
}
