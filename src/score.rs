use crate::Error;

/// A score or expectation value in the range `0.0..=1.0`, where `0.0` is a
/// loss and `1.0` is a win.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Score(pub f64);

impl From<Score> for f64 {
    fn from(Score(score): Score) -> f64 {
        score
    }
}

impl From<f64> for Score {
    fn from(score: f64) -> Score {
        Score(score)
    }
}

impl Score {
    pub const LOSS: Score = Score(0.0);
    pub const DRAW: Score = Score(0.5);
    pub const WIN: Score = Score(1.0);

    /// The score from the opponent's point of view.
    pub fn opposite(self) -> Score {
        Score(1.0 - self.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub(crate) fn validate(self, domain: ScoreDomain) -> Result<Score, Error> {
        if domain.accepts(self) {
            Ok(self)
        } else {
            Err(Error::InvalidScore(self.0))
        }
    }
}

/// Which game scores a rating system accepts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScoreDomain {
    /// Only [`Score::LOSS`], [`Score::DRAW`] and [`Score::WIN`].
    #[default]
    Discrete,
    /// Any score in `0.0..=1.0`, for games with partial credit.
    Continuous,
}

impl ScoreDomain {
    pub fn accepts(self, Score(score): Score) -> bool {
        match self {
            ScoreDomain::Discrete => score == 0.0 || score == 0.5 || score == 1.0,
            ScoreDomain::Continuous => (0.0..=1.0).contains(&score),
        }
    }
}
