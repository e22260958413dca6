use crate::{
    estimation::{expectation, g},
    outcome::Opponent,
    Error,
};

/// Summary of all games of one rating period, relative to the competitor's
/// rating at the start of the period.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PeriodAggregate {
    /// Estimated variance `v` of the rating based on game outcomes.
    pub variance: f64,
    /// Estimated improvement `delta` in rating implied by the outcomes.
    pub improvement: f64,
    /// `sum(g(phi_j) * (s_j - E_j))`, with each `E_j` taken at the start of
    /// the period. The rating moves by this times the new `phi^2`.
    pub weighted_surprise: f64,
    pub games: usize,
}

impl PeriodAggregate {
    /// Sums the contributions of `opponents` for a competitor rated `mu`.
    ///
    /// The order of opponents does not matter.
    pub(crate) fn new(mu: f64, opponents: &[Opponent]) -> Result<PeriodAggregate, Error> {
        if opponents.is_empty() {
            return Err(Error::NoOutcomes);
        }

        let mut information = 0.0;
        let mut weighted_surprise = 0.0;
        for opponent in opponents {
            let g = g(opponent.phi);
            let expected = expectation(mu, opponent.mu, opponent.phi);
            information += g * g * expected * (1.0 - expected);
            weighted_surprise += g * (opponent.score - expected);
        }

        let variance = 1.0 / information;
        if !variance.is_finite() || variance <= 0.0 {
            return Err(Error::UndefinedVariance);
        }

        Ok(PeriodAggregate {
            variance,
            improvement: variance * weighted_surprise,
            weighted_surprise,
            games: opponents.len(),
        })
    }
}
