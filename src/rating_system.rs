use tracing::debug;

use crate::{
    aggregate::PeriodAggregate,
    error::{finite, positive},
    estimation::widen,
    internal_rating::InternalRating,
    outcome::Opponent,
    volatility::{VolatilityFormula, VolatilityInput, VolatilitySolver},
    Competitor, Error, GameOutcome, ScoreDomain,
};

#[derive(Debug, Clone)]
pub struct RatingSystemBuilder {
    default_rating: f64,
    default_deviation: f64,
    default_volatility: f64,

    tau: f64,
    convergence_tolerance: f64,
    max_iterations: usize,

    volatility_formula: VolatilityFormula,
    score_domain: ScoreDomain,
}

impl Default for RatingSystemBuilder {
    fn default() -> RatingSystemBuilder {
        RatingSystemBuilder::new()
    }
}

impl RatingSystemBuilder {
    pub fn new() -> RatingSystemBuilder {
        RatingSystemBuilder {
            default_rating: 1500.0,
            default_deviation: 350.0,
            default_volatility: 0.06,

            tau: 0.5,
            convergence_tolerance: 1e-6,
            max_iterations: 100,

            volatility_formula: VolatilityFormula::Canonical,
            score_domain: ScoreDomain::Discrete,
        }
    }

    pub fn default_rating(&mut self, default_rating: f64) -> &mut Self {
        self.default_rating = default_rating;
        self
    }

    pub fn default_deviation(&mut self, default_deviation: f64) -> &mut Self {
        self.default_deviation = default_deviation;
        self
    }

    pub fn default_volatility(&mut self, default_volatility: f64) -> &mut Self {
        self.default_volatility = default_volatility;
        self
    }

    /// System constant constraining the change in volatility over time.
    /// Reasonable values are between `0.3` and `1.2`, smaller values
    /// preventing volatility from changing quickly.
    pub fn tau(&mut self, tau: f64) -> &mut Self {
        self.tau = tau;
        self
    }

    /// Width of the final bracket around the root in the volatility solver.
    pub fn convergence_tolerance(&mut self, convergence_tolerance: f64) -> &mut Self {
        self.convergence_tolerance = convergence_tolerance;
        self
    }

    /// Iteration budget for each phase of the volatility solver.
    pub fn max_iterations(&mut self, max_iterations: usize) -> &mut Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn volatility_formula(&mut self, volatility_formula: VolatilityFormula) -> &mut Self {
        self.volatility_formula = volatility_formula;
        self
    }

    pub fn score_domain(&mut self, score_domain: ScoreDomain) -> &mut Self {
        self.score_domain = score_domain;
        self
    }

    pub fn build(&self) -> Result<RatingSystem, Error> {
        if self.max_iterations == 0 {
            return Err(Error::InvalidParameter {
                name: "max iterations",
                value: 0.0,
            });
        }

        Ok(RatingSystem {
            default_rating: finite("default rating", self.default_rating)?,
            default_deviation: positive("default deviation", self.default_deviation)?,
            default_volatility: positive("default volatility", self.default_volatility)?,

            solver: VolatilitySolver::new(
                positive("tau", self.tau)?,
                positive("convergence tolerance", self.convergence_tolerance)?,
                self.max_iterations,
                self.volatility_formula,
            ),

            score_domain: self.score_domain,
        })
    }
}

/// Configuration shared by all competitors of a rating pool.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingSystem {
    default_rating: f64,
    default_deviation: f64,
    default_volatility: f64,

    solver: VolatilitySolver,

    score_domain: ScoreDomain,
}

impl Default for RatingSystem {
    fn default() -> RatingSystem {
        RatingSystem {
            default_rating: 1500.0,
            default_deviation: 350.0,
            default_volatility: 0.06,

            solver: VolatilitySolver::new(0.5, 1e-6, 100, VolatilityFormula::Canonical),

            score_domain: ScoreDomain::Discrete,
        }
    }
}

impl RatingSystem {
    pub fn builder() -> RatingSystemBuilder {
        RatingSystemBuilder::default()
    }

    pub fn new() -> RatingSystem {
        RatingSystem::default()
    }

    pub fn default_rating(&self) -> f64 {
        self.default_rating
    }

    pub fn default_deviation(&self) -> f64 {
        self.default_deviation
    }

    pub fn default_volatility(&self) -> f64 {
        self.default_volatility
    }

    pub fn tau(&self) -> f64 {
        self.solver.tau()
    }

    pub fn convergence_tolerance(&self) -> f64 {
        self.solver.tolerance()
    }

    pub fn max_iterations(&self) -> usize {
        self.solver.max_iterations()
    }

    pub fn volatility_formula(&self) -> VolatilityFormula {
        self.solver.formula()
    }

    pub fn score_domain(&self) -> ScoreDomain {
        self.score_domain
    }

    pub fn volatility_solver(&self) -> &VolatilitySolver {
        &self.solver
    }

    /// A competitor with the configured default rating, deviation and
    /// volatility.
    pub fn new_competitor(&self) -> Competitor {
        Competitor::from_internal(InternalRating::from_public(
            self.default_rating,
            self.default_deviation,
            self.default_volatility,
        ))
    }

    /// Validates the games of a rating period and sums them up relative to
    /// the current rating of `competitor`.
    pub fn aggregate(&self, competitor: &Competitor, outcomes: &[GameOutcome]) -> Result<PeriodAggregate, Error> {
        let opponents = outcomes
            .iter()
            .map(|outcome| outcome.to_internal(self.score_domain))
            .collect::<Result<Vec<Opponent>, Error>>()?;

        PeriodAggregate::new(competitor.mu(), &opponents)
    }

    /// Computes the state of `competitor` after a rating period with the
    /// given games.
    ///
    /// Opponents are taken from `outcomes` as they were recorded, never from
    /// live state, so all competitors of a period can be rated
    /// independently.
    pub fn rate(&self, competitor: &Competitor, outcomes: &[GameOutcome]) -> Result<Competitor, Error> {
        let before = competitor.internal();
        let aggregate = self.aggregate(competitor, outcomes)?;

        let volatility = self.solver.solve(&VolatilityInput {
            improvement: aggregate.improvement,
            variance: aggregate.variance,
            mu: before.mu,
            phi: before.phi,
            volatility: before.volatility,
        })?;

        let widened_phi = widen(before.phi, volatility);
        let phi = 1.0 / (1.0 / (widened_phi * widened_phi) + 1.0 / aggregate.variance).sqrt();
        let mu = before.mu + phi * phi * aggregate.weighted_surprise;

        let after = InternalRating { mu, phi, volatility };
        debug!(
            games = aggregate.games,
            variance = aggregate.variance,
            improvement = aggregate.improvement,
            rating = after.rating(),
            deviation = after.deviation(),
            volatility,
            "rated period"
        );
        Ok(Competitor::from_internal(after))
    }

    /// Replaces `competitor` with its state after a rating period.
    ///
    /// On error, `competitor` is left unchanged.
    pub fn update(&self, competitor: &mut Competitor, outcomes: &[GameOutcome]) -> Result<(), Error> {
        *competitor = self.rate(competitor, outcomes)?;
        Ok(())
    }

    /// Like [`RatingSystem::update`], but a period without games counts as
    /// inactivity.
    pub fn update_or_decay(&self, competitor: &mut Competitor, outcomes: &[GameOutcome]) -> Result<(), Error> {
        if outcomes.is_empty() {
            competitor.decay();
            Ok(())
        } else {
            self.update(competitor, outcomes)
        }
    }
}
