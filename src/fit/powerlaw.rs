// Power-law fit y = a * x^b by unweighted nonlinear least squares.
//
// Levenberg-Marquardt over the two parameters with the analytic Jacobian
//
//   df/da = x^b
//   df/db = a * x^b * ln(x)
//
// The damped 2x2 normal equations are solved in closed form. The starting
// point comes from a straight-line fit in log-log space, which is already
// close for heavy-tailed word-frequency data.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::frequency::distribution::CountDistribution;

/// Damping above this means no step reduces the residual any further.
const MAX_DAMPING: f64 = 1e16;
const MIN_DAMPING: f64 = 1e-12;
const INITIAL_DAMPING: f64 = 1e-3;

/// Why a power-law fit could not produce parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("need at least 2 distinct points to fit a power law, found {found}")]
    TooFewPoints { found: usize },

    #[error("x and y have different lengths ({x} vs {y})")]
    MismatchedLengths { x: usize, y: usize },

    #[error("power law is undefined at x = {x}; all x values must be positive")]
    NonPositiveX { x: f64 },

    #[error("observation ({x}, {y}) is not finite")]
    NonFinite { x: f64, y: f64 },

    #[error("solver did not converge within {iterations} iterations")]
    DidNotConverge { iterations: usize },

    #[error("residuals are not finite at the starting point")]
    Diverged,
}

/// Solver limits.
#[derive(Debug, Clone, Copy)]
pub struct FitOptions {
    pub max_iterations: usize,
    /// Stop when one accepted step reduces the residual sum of squares by
    /// less than this fraction.
    pub ftol: f64,
    /// Stop when the step is smaller than this fraction of the parameter norm.
    pub xtol: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            ftol: 1e-12,
            xtol: 1e-12,
        }
    }
}

/// Fitted parameters of y = a * x^b.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitResult {
    pub a: f64,
    pub b: f64,
    /// Estimated covariance of (a, b). Entries are infinite when there are no
    /// spare degrees of freedom (exactly two points).
    pub covariance: [[f64; 2]; 2],
    pub residual_sum_of_squares: f64,
    pub iterations: usize,
}

impl FitResult {
    /// Evaluate the fitted curve at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        power_law(x, self.a, self.b)
    }

    /// One-sigma uncertainties of (a, b).
    pub fn standard_errors(&self) -> (f64, f64) {
        (self.covariance[0][0].sqrt(), self.covariance[1][1].sqrt())
    }
}

pub fn power_law(x: f64, a: f64, b: f64) -> f64 {
    a * x.powf(b)
}

/// Fit a power law to a count distribution (x = frequency, y = tokens).
pub fn fit_power_law(distribution: &CountDistribution) -> Result<FitResult, FitError> {
    let (x, y) = distribution.points();
    fit_points(&x, &y)
}

/// Fit a power law to parallel x/y observations with default solver limits.
pub fn fit_points(x: &[f64], y: &[f64]) -> Result<FitResult, FitError> {
    fit_points_with(x, y, &FitOptions::default())
}

pub fn fit_points_with(x: &[f64], y: &[f64], options: &FitOptions) -> Result<FitResult, FitError> {
    validate(x, y)?;

    let mut params = initial_guess(x, y);
    let mut ssr = sum_of_squares(x, y, params);
    if !ssr.is_finite() {
        return Err(FitError::Diverged);
    }

    let mut damping = INITIAL_DAMPING;

    for iteration in 1..=options.max_iterations {
        if ssr == 0.0 {
            return Ok(finish(x, y, params, ssr, iteration - 1));
        }

        let (jtj, jtr) = normal_equations(x, y, params);

        loop {
            if let Some(step) = solve_damped(jtj, jtr, damping) {
                let candidate = [params[0] + step[0], params[1] + step[1]];
                let new_ssr = sum_of_squares(x, y, candidate);

                if new_ssr.is_finite() && new_ssr < ssr {
                    let reduction = (ssr - new_ssr) / ssr;
                    let step_norm = step[0].hypot(step[1]);
                    let param_norm = params[0].hypot(params[1]);

                    params = candidate;
                    ssr = new_ssr;
                    damping = (damping / 10.0).max(MIN_DAMPING);

                    if reduction <= options.ftol
                        || step_norm <= options.xtol * (param_norm + options.xtol)
                    {
                        return Ok(finish(x, y, params, ssr, iteration));
                    }
                    break;
                }
            }

            damping *= 10.0;
            if damping > MAX_DAMPING {
                return Ok(finish(x, y, params, ssr, iteration));
            }
        }
    }

    Err(FitError::DidNotConverge {
        iterations: options.max_iterations,
    })
}

fn validate(x: &[f64], y: &[f64]) -> Result<(), FitError> {
    if x.len() != y.len() {
        return Err(FitError::MismatchedLengths {
            x: x.len(),
            y: y.len(),
        });
    }

    for (&xi, &yi) in x.iter().zip(y) {
        if !xi.is_finite() || !yi.is_finite() {
            return Err(FitError::NonFinite { x: xi, y: yi });
        }
        if xi <= 0.0 {
            return Err(FitError::NonPositiveX { x: xi });
        }
    }

    let mut distinct: Vec<f64> = x.to_vec();
    distinct.sort_by(f64::total_cmp);
    distinct.dedup();
    if distinct.len() < 2 {
        return Err(FitError::TooFewPoints {
            found: distinct.len(),
        });
    }
    Ok(())
}

/// Straight-line fit of ln y against ln x over points with y > 0.
fn initial_guess(x: &[f64], y: &[f64]) -> [f64; 2] {
    const FALLBACK: [f64; 2] = [1.0, -1.0];

    let logs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter(|&(_, &yi)| yi > 0.0)
        .map(|(&xi, &yi)| (xi.ln(), yi.ln()))
        .collect();
    if logs.len() < 2 {
        return FALLBACK;
    }

    let n = logs.len() as f64;
    let mean_x = logs.iter().map(|(lx, _)| lx).sum::<f64>() / n;
    let mean_y = logs.iter().map(|(_, ly)| ly).sum::<f64>() / n;
    let var: f64 = logs.iter().map(|(lx, _)| (lx - mean_x).powi(2)).sum();
    let cov: f64 = logs
        .iter()
        .map(|(lx, ly)| (lx - mean_x) * (ly - mean_y))
        .sum();
    if var == 0.0 {
        return FALLBACK;
    }

    let b = cov / var;
    let a = (mean_y - b * mean_x).exp();
    if a.is_finite() && b.is_finite() {
        [a, b]
    } else {
        FALLBACK
    }
}

fn sum_of_squares(x: &[f64], y: &[f64], params: [f64; 2]) -> f64 {
    x.iter()
        .zip(y)
        .map(|(&xi, &yi)| (yi - power_law(xi, params[0], params[1])).powi(2))
        .sum()
}

/// JᵀJ (as [j00, j01, j11]) and Jᵀr at `params`.
fn normal_equations(x: &[f64], y: &[f64], params: [f64; 2]) -> ([f64; 3], [f64; 2]) {
    let [a, b] = params;
    let mut jtj = [0.0; 3];
    let mut jtr = [0.0; 2];

    for (&xi, &yi) in x.iter().zip(y) {
        let da = xi.powf(b);
        let f = a * da;
        let db = f * xi.ln();
        let r = yi - f;

        jtj[0] += da * da;
        jtj[1] += da * db;
        jtj[2] += db * db;
        jtr[0] += da * r;
        jtr[1] += db * r;
    }
    (jtj, jtr)
}

fn solve_damped(jtj: [f64; 3], jtr: [f64; 2], damping: f64) -> Option<[f64; 2]> {
    let a00 = jtj[0] + damping * jtj[0].max(MIN_DAMPING);
    let a11 = jtj[2] + damping * jtj[2].max(MIN_DAMPING);
    let a01 = jtj[1];

    let det = a00 * a11 - a01 * a01;
    if !det.is_finite() || det.abs() < f64::MIN_POSITIVE {
        return None;
    }
    let step = [
        (jtr[0] * a11 - a01 * jtr[1]) / det,
        (a00 * jtr[1] - a01 * jtr[0]) / det,
    ];
    step.iter().all(|s| s.is_finite()).then_some(step)
}

fn finish(x: &[f64], y: &[f64], params: [f64; 2], ssr: f64, iterations: usize) -> FitResult {
    let (jtj, _) = normal_equations(x, y, params);
    let det = jtj[0] * jtj[2] - jtj[1] * jtj[1];
    let dof = x.len().saturating_sub(2);

    let covariance = if dof == 0 || !det.is_finite() || det.abs() < f64::MIN_POSITIVE {
        [[f64::INFINITY; 2]; 2]
    } else {
        let scale = ssr / dof as f64 / det;
        [
            [jtj[2] * scale, -jtj[1] * scale],
            [-jtj[1] * scale, jtj[0] * scale],
        ]
    };

    debug!(
        a = params[0],
        b = params[1],
        ssr,
        iterations,
        "Power-law fit converged"
    );

    FitResult {
        a: params[0],
        b: params[1],
        covariance,
        residual_sum_of_squares: ssr,
        iterations,
    }
}
