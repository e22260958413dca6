use crate::{
    error::{finite, positive},
    estimation::{widen, widen_over, win_probability},
    internal_rating::{deviation_to_phi, rating_to_mu, InternalRating},
    Error, GameOutcome, Periods, RatingSystem,
};

/// One rated entity.
///
/// The rating and deviation are stored on the internal scale and converted
/// whenever they are read or written on the public scale.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "InternalRating", into = "InternalRating")
)]
pub struct Competitor {
    internal: InternalRating,
}

impl TryFrom<InternalRating> for Competitor {
    type Error = Error;

    /// Accepts a stored internal rating only if `mu` is finite and `phi` and
    /// the volatility are positive.
    fn try_from(internal: InternalRating) -> Result<Competitor, Error> {
        Ok(Competitor::from_internal(InternalRating {
            mu: finite("mu", internal.mu)?,
            phi: positive("phi", internal.phi)?,
            volatility: positive("volatility", internal.volatility)?,
        }))
    }
}

impl From<Competitor> for InternalRating {
    fn from(competitor: Competitor) -> InternalRating {
        competitor.internal
    }
}

impl Default for Competitor {
    /// An unrated competitor: rating `1500`, deviation `350`, volatility
    /// `0.06`.
    fn default() -> Competitor {
        Competitor::from_internal(InternalRating::from_public(1500.0, 350.0, 0.06))
    }
}

impl Competitor {
    pub fn new(rating: f64, deviation: f64, volatility: f64) -> Result<Competitor, Error> {
        Ok(Competitor::from_internal(InternalRating::from_public(
            finite("rating", rating)?,
            positive("deviation", deviation)?,
            positive("volatility", volatility)?,
        )))
    }

    pub(crate) fn from_internal(internal: InternalRating) -> Competitor {
        Competitor { internal }
    }

    /// Snapshot on the internal scale.
    pub fn internal(&self) -> InternalRating {
        self.internal
    }

    pub fn rating(&self) -> f64 {
        self.internal.rating()
    }

    pub fn deviation(&self) -> f64 {
        self.internal.deviation()
    }

    pub fn volatility(&self) -> f64 {
        self.internal.volatility
    }

    pub fn mu(&self) -> f64 {
        self.internal.mu
    }

    pub fn phi(&self) -> f64 {
        self.internal.phi
    }

    pub fn set_rating(&mut self, rating: f64) -> Result<(), Error> {
        self.internal.mu = rating_to_mu(finite("rating", rating)?);
        Ok(())
    }

    pub fn set_deviation(&mut self, deviation: f64) -> Result<(), Error> {
        self.internal.phi = deviation_to_phi(positive("deviation", deviation)?);
        Ok(())
    }

    pub fn set_volatility(&mut self, volatility: f64) -> Result<(), Error> {
        self.internal.volatility = positive("volatility", volatility)?;
        Ok(())
    }

    /// Approximate 95% confidence interval of the rating.
    pub fn confidence_interval(&self) -> (f64, f64) {
        let rating = self.rating();
        let margin = 1.96 * self.deviation();
        (rating - margin, rating + margin)
    }

    /// Applies the games of one rating period. See [`RatingSystem::update`].
    pub fn update(&mut self, outcomes: &[GameOutcome], rating_system: &RatingSystem) -> Result<(), Error> {
        rating_system.update(self, outcomes)
    }

    /// Accounts for a rating period without games: the deviation grows by
    /// the volatility, rating and volatility stay the same.
    pub fn decay(&mut self) {
        self.internal.phi = widen(self.internal.phi, self.internal.volatility);
    }

    /// Accounts for several rating periods without games.
    pub fn decay_over(&mut self, periods: Periods) -> Result<(), Error> {
        let Periods(periods) = periods;
        if !periods.is_finite() || periods < 0.0 {
            return Err(Error::InvalidParameter {
                name: "periods",
                value: periods,
            });
        }
        self.internal.phi = widen_over(self.internal.phi, self.internal.volatility, periods);
        Ok(())
    }

    /// Probability that `self` beats `other`, taking the uncertainty of both
    /// ratings into account.
    pub fn win_prob(&self, other: &Competitor) -> f64 {
        let other = other.internal();
        win_probability(self.internal.mu, self.internal.phi, other.mu, other.phi)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_default() {
        let competitor = Competitor::default();
        assert_abs_diff_eq!(competitor.rating(), 1500.0);
        assert_abs_diff_eq!(competitor.deviation(), 350.0, epsilon = 1e-9);
        assert_eq!(competitor.volatility(), 0.06);
        assert_eq!(competitor.mu(), 0.0);
        assert_abs_diff_eq!(competitor.phi(), 2.014762, epsilon = 1e-6);
    }

    #[test]
    fn test_new_rejects() {
        assert!(matches!(
            Competitor::new(1500.0, 0.0, 0.06),
            Err(Error::InvalidParameter { name: "deviation", .. })
        ));
        assert!(matches!(
            Competitor::new(1500.0, 350.0, -0.06),
            Err(Error::InvalidParameter { name: "volatility", .. })
        ));
        assert!(matches!(
            Competitor::new(f64::NAN, 350.0, 0.06),
            Err(Error::InvalidParameter { name: "rating", .. })
        ));
    }

    #[test]
    fn test_try_from_internal() {
        let internal = InternalRating {
            mu: 0.5,
            phi: 1.2,
            volatility: 0.06,
        };
        let competitor = Competitor::try_from(internal).unwrap();
        assert_eq!(competitor.internal(), internal);
        assert_eq!(InternalRating::from(competitor), internal);

        assert!(matches!(
            Competitor::try_from(InternalRating { phi: -1.0, ..internal }),
            Err(Error::InvalidParameter { name: "phi", .. })
        ));
        assert!(matches!(
            Competitor::try_from(InternalRating { volatility: 0.0, ..internal }),
            Err(Error::InvalidParameter { name: "volatility", .. })
        ));
        assert!(matches!(
            Competitor::try_from(InternalRating { mu: f64::NAN, ..internal }),
            Err(Error::InvalidParameter { name: "mu", .. })
        ));
    }

    #[test]
    fn test_setters() {
        let mut competitor = Competitor::default();
        competitor.set_rating(1700.0).unwrap();
        competitor.set_deviation(200.0).unwrap();
        competitor.set_volatility(0.09).unwrap();
        assert_abs_diff_eq!(competitor.rating(), 1700.0, epsilon = 1e-9);
        assert_abs_diff_eq!(competitor.deviation(), 200.0, epsilon = 1e-9);
        assert_abs_diff_eq!(competitor.mu(), competitor.phi(), epsilon = 1e-12);
        assert_eq!(competitor.volatility(), 0.09);

        let before = competitor.clone();
        assert!(competitor.set_deviation(-1.0).is_err());
        assert!(competitor.set_rating(f64::INFINITY).is_err());
        assert!(competitor.set_volatility(0.0).is_err());
        assert_eq!(competitor, before);
    }

    #[test]
    fn test_decay() {
        let mut competitor = Competitor::new(1620.0, 80.0, 0.06).unwrap();
        let before = competitor.clone();
        competitor.decay();
        assert!(competitor.deviation() > before.deviation());
        assert_eq!(competitor.rating(), before.rating());
        assert_eq!(competitor.volatility(), before.volatility());
    }

    #[test]
    fn test_decay_over() {
        let mut once = Competitor::new(1620.0, 80.0, 0.06).unwrap();
        once.decay();

        let mut over = Competitor::new(1620.0, 80.0, 0.06).unwrap();
        over.decay_over(Periods::from(1.0)).unwrap();
        assert_eq!(over, once);

        let mut idle = Competitor::new(1620.0, 80.0, 0.06).unwrap();
        idle.decay_over(Periods(0.0)).unwrap();
        assert_abs_diff_eq!(idle.deviation(), 80.0, epsilon = 1e-9);

        let mut long = Competitor::new(1620.0, 80.0, 0.06).unwrap();
        long.decay_over(Periods(12.0)).unwrap();
        assert!(long.deviation() > once.deviation());

        assert!(long.decay_over(Periods(-1.0)).is_err());
        assert!(long.decay_over(Periods(f64::NAN)).is_err());
    }

    #[test]
    fn test_win_prob() {
        let competitor = Competitor::default();
        assert_eq!(competitor.win_prob(&competitor), 0.5);

        let strong = Competitor::new(1800.0, 50.0, 0.06).unwrap();
        let weak = Competitor::new(1400.0, 50.0, 0.06).unwrap();
        let p = strong.win_prob(&weak);
        assert!(p > 0.5);
        assert_abs_diff_eq!(p + weak.win_prob(&strong), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_confidence_interval() {
        let competitor = Competitor::new(1500.0, 100.0, 0.06).unwrap();
        let (low, high) = competitor.confidence_interval();
        assert_abs_diff_eq!(low, 1304.0, epsilon = 1e-9);
        assert_abs_diff_eq!(high, 1696.0, epsilon = 1e-9);
    }
}
