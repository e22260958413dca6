//! Closed-form building blocks of Glicko-2, all on the internal scale.

use std::f64::consts::PI;

/// Discounts the influence of an opponent in proportion to the opponent's
/// own uncertainty `phi`.
#[inline]
pub fn g(phi: f64) -> f64 {
    1.0 / (1.0 + 3.0 * phi * phi / (PI * PI)).sqrt()
}

/// Expected score of a competitor rated `mu` against an opponent rated
/// `opponent_mu` with deviation `opponent_phi`.
///
/// Only the opponent's deviation is taken into account. This is the weight
/// of an observed game, not a prediction between two uncertain competitors
/// (see [`win_probability`]).
#[inline]
pub fn expectation(mu: f64, opponent_mu: f64, opponent_phi: f64) -> f64 {
    1.0 / (1.0 + (-g(opponent_phi) * (mu - opponent_mu)).exp())
}

/// Probability that a competitor `(mu, phi)` beats an opponent
/// `(opponent_mu, opponent_phi)`, using the combined uncertainty of both.
#[inline]
pub fn win_probability(mu: f64, phi: f64, opponent_mu: f64, opponent_phi: f64) -> f64 {
    let combined_phi = (phi * phi + opponent_phi * opponent_phi).sqrt();
    1.0 / (1.0 + (-g(combined_phi) * (mu - opponent_mu)).exp())
}

/// Deviation at the start of a rating period, before any game is applied.
#[inline]
pub fn widen(phi: f64, volatility: f64) -> f64 {
    widen_over(phi, volatility, 1.0)
}

/// Deviation after `periods` rating periods without games.
#[inline]
pub fn widen_over(phi: f64, volatility: f64, periods: f64) -> f64 {
    (phi * phi + periods * volatility * volatility).sqrt()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::internal_rating::{deviation_to_phi, rating_to_mu};

    #[test]
    fn test_g() {
        assert_eq!(g(0.0), 1.0);
        assert_abs_diff_eq!(g(deviation_to_phi(30.0)), 0.9955, epsilon = 1e-4);
        assert_abs_diff_eq!(g(deviation_to_phi(100.0)), 0.9531, epsilon = 1e-4);
        assert_abs_diff_eq!(g(deviation_to_phi(300.0)), 0.7242, epsilon = 1e-4);
        assert!(g(10.0) < g(1.0));
    }

    #[test]
    fn test_expectation() {
        let mu = rating_to_mu(1500.0);
        assert_abs_diff_eq!(expectation(mu, rating_to_mu(1400.0), deviation_to_phi(30.0)), 0.639, epsilon = 1e-3);
        assert_abs_diff_eq!(expectation(mu, rating_to_mu(1550.0), deviation_to_phi(100.0)), 0.432, epsilon = 1e-3);
        assert_abs_diff_eq!(expectation(mu, rating_to_mu(1700.0), deviation_to_phi(300.0)), 0.303, epsilon = 1e-3);
        assert_eq!(expectation(0.3, 0.3, 1.0), 0.5);
    }

    #[test]
    fn test_win_probability_uses_both_deviations() {
        let (mu, opponent_mu) = (rating_to_mu(1600.0), rating_to_mu(1500.0));
        let opponent_phi = deviation_to_phi(50.0);

        let certain = win_probability(mu, 0.0, opponent_mu, opponent_phi);
        assert_abs_diff_eq!(certain, expectation(mu, opponent_mu, opponent_phi), epsilon = 1e-15);

        let uncertain = win_probability(mu, deviation_to_phi(300.0), opponent_mu, opponent_phi);
        assert!(uncertain > 0.5);
        assert!(uncertain < certain);

        assert_eq!(win_probability(0.0, 2.0, 0.0, 2.0), 0.5);
    }

    #[test]
    fn test_widen() {
        assert_abs_diff_eq!(widen(3.0, 4.0), 5.0);
        assert_eq!(widen_over(1.5, 0.06, 0.0), 1.5);
        assert!(widen(1.0, 0.06) > 1.0);
        assert_abs_diff_eq!(widen_over(1.0, 0.06, 2.0), widen(widen(1.0, 0.06), 0.06), epsilon = 1e-12);
    }
}
