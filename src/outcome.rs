use crate::{
    error::{finite, positive},
    internal_rating::{deviation_to_phi, rating_to_mu},
    Competitor, Error, Score, ScoreDomain,
};

/// One game of a rating period, seen from the competitor being rated.
///
/// The opponent is captured by value. Build all outcomes of a period before
/// updating anyone, so that every update in the period sees the same
/// opponent ratings.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameOutcome {
    /// Opponent rating on the public scale.
    pub opponent_rating: f64,
    /// Opponent rating deviation on the public scale.
    pub opponent_deviation: f64,
    pub score: Score,
}

impl GameOutcome {
    pub fn new(opponent_rating: f64, opponent_deviation: f64, score: Score) -> GameOutcome {
        GameOutcome {
            opponent_rating,
            opponent_deviation,
            score,
        }
    }

    pub fn win(opponent_rating: f64, opponent_deviation: f64) -> GameOutcome {
        GameOutcome::new(opponent_rating, opponent_deviation, Score::WIN)
    }

    pub fn draw(opponent_rating: f64, opponent_deviation: f64) -> GameOutcome {
        GameOutcome::new(opponent_rating, opponent_deviation, Score::DRAW)
    }

    pub fn loss(opponent_rating: f64, opponent_deviation: f64) -> GameOutcome {
        GameOutcome::new(opponent_rating, opponent_deviation, Score::LOSS)
    }

    /// Records a game against the current rating of `opponent`.
    pub fn against(opponent: &Competitor, score: Score) -> GameOutcome {
        GameOutcome::new(opponent.rating(), opponent.deviation(), score)
    }

    /// Checks the outcome and converts the opponent to the internal scale.
    pub(crate) fn to_internal(self, domain: ScoreDomain) -> Result<Opponent, Error> {
        let rating = finite("opponent rating", self.opponent_rating)?;
        let deviation = positive("opponent deviation", self.opponent_deviation)?;
        let score = self.score.validate(domain)?;
        Ok(Opponent {
            mu: rating_to_mu(rating),
            phi: deviation_to_phi(deviation),
            score: score.value(),
        })
    }
}

/// A validated game outcome on the internal scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Opponent {
    pub mu: f64,
    pub phi: f64,
    pub score: f64,
}
