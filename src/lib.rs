//! Glicko-2 rating system.
//!
//! Rates competitors in *rating periods*: at the end of each period, every
//! competitor's rating, deviation and volatility are updated from the games
//! they played against opponents as rated at the start of the period.
//!
//! ```
//! use glicko2::{Competitor, GameOutcome, RatingSystem};
//!
//! let rating_system = RatingSystem::new();
//! let mut competitor = Competitor::new(1500.0, 200.0, 0.06)?;
//!
//! competitor.update(
//!     &[
//!         GameOutcome::win(1400.0, 30.0),
//!         GameOutcome::loss(1550.0, 100.0),
//!         GameOutcome::loss(1700.0, 300.0),
//!     ],
//!     &rating_system,
//! )?;
//!
//! assert!((competitor.rating() - 1464.05).abs() < 0.01);
//! assert!((competitor.deviation() - 151.52).abs() < 0.01);
//! # Ok::<_, glicko2::Error>(())
//! ```
//!
//! See [Glickman's paper](http://www.glicko.net/glicko/glicko2.pdf).

mod aggregate;
mod competitor;
mod error;
pub mod estimation;
pub mod internal_rating;
mod outcome;
mod periods;
mod rating_system;
mod score;
mod volatility;

pub use aggregate::PeriodAggregate;
pub use competitor::Competitor;
pub use error::{Error, ErrorKind};
pub use outcome::GameOutcome;
pub use periods::Periods;
pub use rating_system::{RatingSystem, RatingSystemBuilder};
pub use score::{Score, ScoreDomain};
pub use volatility::{SolverStage, VolatilityFormula, VolatilityInput, VolatilitySolver};

/// Log likelihood deviance metric that can be used to evaluate the quality of
/// predictions made with [`Competitor::win_prob`].
///
/// Lower is better.
///
/// See <https://www.kaggle.com/c/ChessRatings2/overview/evaluation>.
pub fn deviance(win_probability: f64, Score(actual): Score) -> f64 {
    let expected = win_probability.clamp(0.01, 0.99);
    -(actual * expected.log10() + (1.0 - actual) * (1.0 - expected).log10())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_deviance() {
        assert_abs_diff_eq!(deviance(0.5, Score::WIN), 0.5f64.log10().abs(), epsilon = 1e-12);
        assert_abs_diff_eq!(deviance(0.5, Score::DRAW), deviance(0.5, Score::LOSS), epsilon = 1e-12);
        assert!(deviance(0.9, Score::WIN) < deviance(0.1, Score::WIN));
        assert_eq!(deviance(1.0, Score::WIN), deviance(0.99, Score::WIN));
    }
}
