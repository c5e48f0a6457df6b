//! Derivative-free classical minimizers for the variational loop.

use tracing::{debug, warn};

/// Outcome of a minimization run.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    /// Best parameters seen.
    pub params: Vec<f64>,
    /// Objective value recorded at `params`.
    pub value: f64,
    /// Number of objective evaluations.
    pub evaluations: usize,
    /// Number of simplex iterations.
    pub iterations: usize,
    /// Best value after initialization and after every iteration.
    pub history: Vec<f64>,
    /// Whether the stopping criterion was met before the iteration cap.
    pub converged: bool,
}

/// A minimizer over real parameter vectors.
///
/// The first objective error aborts the run and is returned unchanged.
pub trait Optimizer {
    fn minimize<F, E>(&self, objective: F, initial: Vec<f64>) -> Result<OptimizationResult, E>
    where
        F: FnMut(&[f64]) -> Result<f64, E>;
}

/// Nelder-Mead downhill simplex.
///
/// Derivative-free; objective values are only compared. Under sampling
/// noise the spread test rarely fires and the iteration cap is the
/// effective stop.
#[derive(Debug, Clone)]
pub struct NelderMead {
    pub max_iterations: usize,
    /// Edge length of the initial simplex.
    pub initial_step: f64,
    /// Stop once worst − best objective value falls below this...
    pub f_tolerance: f64,
    /// ...and every vertex lies within this distance of the best one.
    pub x_tolerance: f64,
}

impl Default for NelderMead {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            initial_step: 0.5,
            f_tolerance: 1e-4,
            x_tolerance: 1e-4,
        }
    }
}

impl NelderMead {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_initial_step(mut self, initial_step: f64) -> Self {
        self.initial_step = initial_step;
        self
    }

    pub fn with_tolerances(mut self, f_tolerance: f64, x_tolerance: f64) -> Self {
        self.f_tolerance = f_tolerance;
        self.x_tolerance = x_tolerance;
        self
    }
}

const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;

fn affine(from: &[f64], to: &[f64], t: f64) -> Vec<f64> {
    from.iter().zip(to).map(|(a, b)| a + t * (b - a)).collect()
}

fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

impl Optimizer for NelderMead {
    fn minimize<F, E>(&self, mut objective: F, initial: Vec<f64>) -> Result<OptimizationResult, E>
    where
        F: FnMut(&[f64]) -> Result<f64, E>,
    {
        let n = initial.len();
        let mut evaluations = 0usize;
        let mut eval = |x: &[f64], evaluations: &mut usize| -> Result<f64, E> {
            *evaluations += 1;
            objective(x)
        };

        let f0 = eval(&initial, &mut evaluations)?;
        let mut simplex: Vec<(Vec<f64>, f64)> = vec![(initial.clone(), f0)];
        for i in 0..n {
            let mut vertex = initial.clone();
            vertex[i] += self.initial_step;
            let f = eval(&vertex, &mut evaluations)?;
            simplex.push((vertex, f));
        }

        let mut history = vec![simplex.iter().map(|v| v.1).fold(f64::INFINITY, f64::min)];
        let mut converged = false;
        let mut iterations = 0;

        while n > 0 && iterations < self.max_iterations {
            simplex.sort_by(|a, b| a.1.total_cmp(&b.1));

            let spread = simplex[n].1 - simplex[0].1;
            let size = simplex[1..]
                .iter()
                .map(|v| distance(&v.0, &simplex[0].0))
                .fold(0.0, f64::max);
            if spread <= self.f_tolerance && size <= self.x_tolerance {
                converged = true;
                break;
            }
            iterations += 1;

            let mut centroid = vec![0.0; n];
            for (x, _) in &simplex[..n] {
                for (c, xi) in centroid.iter_mut().zip(x) {
                    *c += xi / n as f64;
                }
            }

            let (worst, f_worst) = simplex[n].clone();
            let f_best = simplex[0].1;
            let f_second = simplex[n - 1].1;

            let reflected = affine(&centroid, &worst, -REFLECT);
            let f_reflected = eval(&reflected, &mut evaluations)?;

            if f_reflected < f_best {
                let expanded = affine(&centroid, &worst, -EXPAND);
                let f_expanded = eval(&expanded, &mut evaluations)?;
                simplex[n] = if f_expanded < f_reflected {
                    (expanded, f_expanded)
                } else {
                    (reflected, f_reflected)
                };
            } else if f_reflected < f_second {
                simplex[n] = (reflected, f_reflected);
            } else {
                let (contracted, accept_below) = if f_reflected < f_worst {
                    (affine(&centroid, &reflected, CONTRACT), f_reflected)
                } else {
                    (affine(&centroid, &worst, CONTRACT), f_worst)
                };
                let f_contracted = eval(&contracted, &mut evaluations)?;

                if f_contracted < accept_below {
                    simplex[n] = (contracted, f_contracted);
                } else {
                    let best = simplex[0].0.clone();
                    for vertex in simplex.iter_mut().skip(1) {
                        let x = affine(&best, &vertex.0, SHRINK);
                        let f = eval(&x, &mut evaluations)?;
                        *vertex = (x, f);
                    }
                }
            }

            let best = simplex.iter().map(|v| v.1).fold(f64::INFINITY, f64::min);
            history.push(best);
            debug!(iteration = iterations, best, evaluations, "simplex step");
        }

        let (params, value) = simplex
            .into_iter()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap_or((initial, f0));

        if n > 0 && !converged {
            warn!(
                iterations,
                value, "Nelder-Mead stopped at the iteration cap without converging"
            );
        }

        Ok(OptimizationResult {
            params,
            value,
            evaluations,
            iterations,
            history,
            converged: converged || n == 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn minimizes_shifted_quadratic() {
        let nm = NelderMead::new().with_max_iterations(500).with_tolerances(1e-10, 1e-6);

        let result = nm
            .minimize(
                |p: &[f64]| Ok::<_, Infallible>((p[0] - 1.0).powi(2) + (p[1] - 2.0).powi(2)),
                vec![0.0, 0.0],
            )
            .unwrap();

        assert!(result.converged);
        assert!(result.value < 1e-8, "value = {}", result.value);
        assert!((result.params[0] - 1.0).abs() < 1e-3);
        assert!((result.params[1] - 2.0).abs() < 1e-3);
    }

    #[test]
    fn improves_rosenbrock() {
        let nm = NelderMead::new().with_max_iterations(500);

        let result = nm
            .minimize(
                |p: &[f64]| {
                    Ok::<_, Infallible>((1.0 - p[0]).powi(2) + 100.0 * (p[1] - p[0].powi(2)).powi(2))
                },
                vec![-1.0, 1.0],
            )
            .unwrap();

        assert!(result.value < 1e-2, "value = {}", result.value);
    }

    #[test]
    fn history_is_monotone() {
        let nm = NelderMead::new().with_max_iterations(50);
        let result = nm
            .minimize(|p: &[f64]| Ok::<_, Infallible>(p[0].cos() + p[1].sin()), vec![0.3, 0.3])
            .unwrap();

        assert_eq!(result.history.len(), result.iterations + 1);
        for w in result.history.windows(2) {
            assert!(w[1] <= w[0], "history = {:?}", result.history);
        }
    }

    #[test]
    fn iteration_cap_is_not_an_error() {
        let nm = NelderMead::new().with_max_iterations(3);
        let result = nm
            .minimize(|p: &[f64]| Ok::<_, Infallible>(p[0].powi(2)), vec![5.0])
            .unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 3);
        assert!(result.value <= 25.0);
    }

    #[test]
    fn objective_error_aborts() {
        let nm = NelderMead::new();
        let mut calls = 0;
        let err = nm
            .minimize(
                |_: &[f64]| {
                    calls += 1;
                    if calls == 3 {
                        Err("boom")
                    } else {
                        Ok(1.0)
                    }
                },
                vec![0.0, 0.0],
            )
            .unwrap_err();
        assert_eq!(err, "boom");
        assert_eq!(calls, 3);
    }
}
