use thiserror::Error;

use crate::volatility::SolverStage;

/// Coarse classification of an [`Error`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied a value outside the accepted domain.
    InvalidInput,
    /// The inputs were individually valid, but the period statistics are
    /// undefined.
    Domain,
    /// The volatility solver exhausted its iteration budget.
    Convergence,
}

/// Errors reported by the rating system.
///
/// All errors are detected before a competitor is modified, so a failed
/// update always leaves the previous rating in place.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("score {0} is outside the accepted range")]
    InvalidScore(f64),
    #[error("a rating period needs at least one game outcome")]
    NoOutcomes,
    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("estimated variance is undefined, every expected score is exactly 0 or 1")]
    UndefinedVariance,
    #[error("volatility solver did not converge in {stage} after {iterations} iterations")]
    Convergence {
        stage: SolverStage,
        iterations: usize,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidScore(_) | Error::NoOutcomes | Error::InvalidParameter { .. } => {
                ErrorKind::InvalidInput
            }
            Error::UndefinedVariance => ErrorKind::Domain,
            Error::Convergence { .. } => ErrorKind::Convergence,
        }
    }
}

/// Returns `value` if it is finite and strictly positive.
pub(crate) fn positive(name: &'static str, value: f64) -> Result<f64, Error> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidParameter { name, value })
    }
}

/// Returns `value` if it is finite.
pub(crate) fn finite(name: &'static str, value: f64) -> Result<f64, Error> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidParameter { name, value })
    }
}
