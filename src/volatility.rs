//! Volatility update ("Step 5." in Glickman's paper), solved with the
//! Illinois variant of regula falsi.

use std::fmt;

use tracing::{trace, warn};

use crate::{
    error::{finite, positive},
    Error,
};

/// Which rating term appears in the objective function of the volatility
/// solver.
///
/// The published algorithm uses the squared deviation `phi^2`. Some
/// historical implementations use the squared centered rating `mu^2` in the
/// same place. The two agree only when `|mu| == phi`, so ratings computed
/// with one cannot be reproduced with the other.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VolatilityFormula {
    /// `phi^2`, as published.
    #[default]
    Canonical,
    /// `mu^2`, for compatibility with ratings computed by the historical
    /// reference implementation.
    Legacy,
}

/// Phase of the solver, reported when it runs out of iterations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SolverStage {
    /// Search for the lower end of the initial bracket.
    Bracket,
    /// Regula falsi iterations narrowing the bracket.
    Refinement,
}

impl fmt::Display for SolverStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SolverStage::Bracket => "bracket search",
            SolverStage::Refinement => "refinement",
        })
    }
}

/// Period statistics and prior state consumed by the solver, on the
/// internal scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VolatilityInput {
    /// Estimated improvement `delta`.
    pub improvement: f64,
    /// Estimated variance `v`.
    pub variance: f64,
    /// Centered rating. Only used by [`VolatilityFormula::Legacy`].
    pub mu: f64,
    /// Deviation before widening for the period.
    pub phi: f64,
    pub volatility: f64,
}

/// Finds the new volatility `exp(A / 2)`, where `A` is the root of
///
/// ```text
/// f(x) = e^x (delta^2 - phi^2 - v - e^x) / (2 (phi^2 + v + e^x)^2) - (x - a) / tau^2
/// ```
///
/// with `a = ln(volatility^2)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VolatilitySolver {
    tau: f64,
    tolerance: f64,
    max_iterations: usize,
    formula: VolatilityFormula,
}

impl VolatilitySolver {
    pub(crate) fn new(
        tau: f64,
        tolerance: f64,
        max_iterations: usize,
        formula: VolatilityFormula,
    ) -> VolatilitySolver {
        VolatilitySolver {
            tau,
            tolerance,
            max_iterations,
            formula,
        }
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn formula(&self) -> VolatilityFormula {
        self.formula
    }

    pub fn solve(&self, input: &VolatilityInput) -> Result<f64, Error> {
        let VolatilityInput {
            improvement: delta,
            variance: v,
            mu,
            phi,
            volatility,
        } = *input;
        let delta = finite("improvement", delta)?;
        let v = positive("variance", v)?;
        let mu = finite("mu", mu)?;
        let phi = positive("phi", phi)?;
        let volatility = positive("volatility", volatility)?;

        let tau = self.tau;
        let a = (volatility * volatility).ln();
        let rating_term = match self.formula {
            VolatilityFormula::Canonical => phi * phi,
            VolatilityFormula::Legacy => mu * mu,
        };
        let f = |x: f64| {
            let ex = x.exp();
            let denominator = rating_term + v + ex;
            ex * (delta * delta - rating_term - v - ex) / (2.0 * denominator * denominator)
                - (x - a) / (tau * tau)
        };

        let mut big_a = a;
        let mut big_b = if delta * delta > phi * phi + v {
            (delta * delta - phi * phi - v).ln()
        } else {
            self.lower_bracket(&f, a)?
        };

        let mut f_a = f(big_a);
        let mut f_b = f(big_b);
        if !f_a.is_finite() || !f_b.is_finite() {
            return Err(Error::Convergence {
                stage: SolverStage::Bracket,
                iterations: 0,
            });
        }

        let mut iterations = 0;
        while (big_b - big_a).abs() > self.tolerance {
            if iterations >= self.max_iterations {
                warn!(iterations, big_a, big_b, "volatility refinement exhausted");
                return Err(Error::Convergence {
                    stage: SolverStage::Refinement,
                    iterations,
                });
            }
            iterations += 1;

            let c = big_a + (big_a - big_b) * f_a / (f_b - f_a);
            let f_c = f(c);
            if !c.is_finite() || !f_c.is_finite() {
                return Err(Error::Convergence {
                    stage: SolverStage::Refinement,
                    iterations,
                });
            }
            if f_c == 0.0 {
                // Exact root. Halving f_a would never move the bracket again.
                big_a = c;
                break;
            }

            if f_c * f_b < 0.0 {
                big_a = big_b;
                f_a = f_b;
            } else {
                f_a /= 2.0;
            }
            big_b = c;
            f_b = f_c;

            trace!(iterations, big_a, big_b, f_a, f_b, "volatility refinement");
        }

        let volatility = (big_a / 2.0).exp();
        if volatility.is_finite() && volatility > 0.0 {
            Ok(volatility)
        } else {
            Err(Error::Convergence {
                stage: SolverStage::Refinement,
                iterations,
            })
        }
    }

    /// Steps down from `a` in multiples of `tau` until `f` is no longer
    /// negative.
    fn lower_bracket<F>(&self, f: &F, a: f64) -> Result<f64, Error>
    where
        F: Fn(f64) -> f64,
    {
        for k in 1..=self.max_iterations {
            let x = a - k as f64 * self.tau;
            let f_x = f(x);
            if f_x.is_nan() {
                return Err(Error::Convergence {
                    stage: SolverStage::Bracket,
                    iterations: k,
                });
            }
            if f_x >= 0.0 {
                trace!(k, x, "volatility bracket");
                return Ok(x);
            }
        }

        warn!(a, tau = self.tau, "volatility bracket search exhausted");
        Err(Error::Convergence {
            stage: SolverStage::Bracket,
            iterations: self.max_iterations,
        })
    }
}
