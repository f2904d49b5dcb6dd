//! Volatility solver for the Glicko-2 update
//!
//! Finds the root of Glickman's `f(x)` over `x = ln σ²` with the Illinois
//! variant of regula falsi. The iteration cap covers both the search for the
//! lower bracket and the refinement loop.

use crate::error::{RatingError, Result};
use tracing::trace;

/// Quantities of one rating period the solver depends on, all on the internal
/// Glicko-2 scale
#[derive(Debug, Clone, Copy)]
pub struct VolatilityInputs {
    /// Estimated improvement Δ
    pub delta: f64,
    /// Pre-period deviation φ
    pub phi: f64,
    /// Estimated performance variance v
    pub variance: f64,
    /// Pre-period volatility σ
    pub sigma: f64,
}

/// Solver limits
#[derive(Debug, Clone, Copy)]
pub struct SolverSettings {
    pub tau: f64,
    pub tolerance: f64,
    pub max_iterations: usize,
}

struct Objective {
    a: f64,
    delta_sq: f64,
    phi_sq: f64,
    variance: f64,
    tau_sq: f64,
}

impl Objective {
    fn eval(&self, x: f64) -> f64 {
        let ex = x.exp();
        let denom = self.phi_sq + self.variance + ex;
        ex * (self.delta_sq - self.phi_sq - self.variance - ex) / (2.0 * denom * denom)
            - (x - self.a) / self.tau_sq
    }
}

fn checked(value: f64, x: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(RatingError::convergence(format!(
            "volatility function is not finite at x = {}",
            x
        ))
        .into());
    }
    Ok(value)
}

fn budget_exhausted(settings: &SolverSettings) -> anyhow::Error {
    RatingError::convergence(format!(
        "volatility did not converge to {} within {} iterations",
        settings.tolerance, settings.max_iterations
    ))
    .into()
}

/// Solve for the post-period volatility σ'
pub fn solve_volatility(inputs: VolatilityInputs, settings: &SolverSettings) -> Result<f64> {
    let objective = Objective {
        a: (inputs.sigma * inputs.sigma).ln(),
        delta_sq: inputs.delta * inputs.delta,
        phi_sq: inputs.phi * inputs.phi,
        variance: inputs.variance,
        tau_sq: settings.tau * settings.tau,
    };
    let a = objective.a;
    let mut iterations = 0usize;

    // Bracket the root
    let mut lower = a;
    let mut upper = if objective.delta_sq > objective.phi_sq + objective.variance {
        (objective.delta_sq - objective.phi_sq - objective.variance).ln()
    } else {
        let mut k = 1.0;
        while objective.eval(a - k * settings.tau) < 0.0 {
            iterations += 1;
            if iterations >= settings.max_iterations {
                return Err(budget_exhausted(settings));
            }
            k += 1.0;
        }
        a - k * settings.tau
    };

    let mut f_lower = checked(objective.eval(lower), lower)?;
    let mut f_upper = checked(objective.eval(upper), upper)?;

    while (upper - lower).abs() > settings.tolerance {
        if iterations >= settings.max_iterations {
            return Err(budget_exhausted(settings));
        }
        iterations += 1;

        let candidate = lower + (lower - upper) * f_lower / (f_upper - f_lower);
        let f_candidate = checked(objective.eval(candidate), candidate)?;

        if f_candidate * f_upper <= 0.0 {
            lower = upper;
            f_lower = f_upper;
        } else {
            f_lower /= 2.0;
        }
        upper = candidate;
        f_upper = f_candidate;

        trace!(iterations, lower, upper, "volatility bracket narrowed");
    }

    let sigma = (lower / 2.0).exp();
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(
            RatingError::convergence(format!("solved volatility {} is unusable", sigma)).into(),
        );
    }

    Ok(sigma)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(tau: f64) -> SolverSettings {
        SolverSettings {
            tau,
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }

    // Step 5 of Glickman's worked example
    fn worked_example() -> VolatilityInputs {
        VolatilityInputs {
            delta: -0.4834,
            phi: 1.1513,
            variance: 1.7785,
            sigma: 0.06,
        }
    }

    #[test]
    fn test_worked_example() {
        let sigma = solve_volatility(worked_example(), &settings(0.5)).unwrap();
        assert!((sigma - 0.05999).abs() < 1e-4);
    }

    #[test]
    fn test_expected_performance_lowers_volatility() {
        let inputs = VolatilityInputs {
            delta: 0.0,
            ..worked_example()
        };
        let sigma = solve_volatility(inputs, &settings(0.5)).unwrap();
        assert!(sigma < 0.06);
        assert!(sigma > 0.0);
    }

    #[test]
    fn test_surprising_performance_raises_volatility() {
        let inputs = VolatilityInputs {
            delta: 4.0,
            ..worked_example()
        };
        let sigma = solve_volatility(inputs, &settings(1.2)).unwrap();
        assert!(sigma > 0.06);
    }

    #[test]
    fn test_iteration_cap() {
        let capped = SolverSettings {
            max_iterations: 1,
            ..settings(0.5)
        };
        let err = solve_volatility(worked_example(), &capped).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RatingError>(),
            Some(RatingError::ConvergenceFailed { .. })
        ));
    }

    #[test]
    fn test_non_finite_objective() {
        // tau² underflows to zero, so f(a) is 0/0
        let err = solve_volatility(worked_example(), &settings(1e-200)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RatingError>(),
            Some(RatingError::ConvergenceFailed { .. })
        ));
    }
}
