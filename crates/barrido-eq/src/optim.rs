//! Derivative-free simplex minimization.

/// Tuning for [`nelder_mead`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimizeOptions {
    /// Hard cap on cost-function evaluations.
    pub max_evaluations: usize,
    /// Simplex coordinate spread below which the search is converged.
    pub x_tolerance: f64,
    /// Relative cost spread below which the search is converged.
    pub f_tolerance: f64,
}

impl Default for MinimizeOptions {
    fn default() -> Self {
        Self {
            max_evaluations: 5000,
            x_tolerance: 1e-4,
            f_tolerance: 1e-6,
        }
    }
}

/// Outcome of a minimization run.
#[derive(Debug, Clone, PartialEq)]
pub struct Minimization {
    /// Best parameter vector found.
    pub x: Vec<f64>,
    /// Cost at `x`.
    pub cost: f64,
    /// Whether both tolerances were met within the evaluation budget.
    pub converged: bool,
    /// Cost-function evaluations spent.
    pub evaluations: usize,
}

/// Minimize `cost` starting from `start` with a Nelder-Mead simplex.
///
/// `steps` sets the initial simplex offset along each coordinate and must
/// match `start` in length. Uses the standard reflection, expansion,
/// contraction, and shrink coefficients (1, 2, 1/2, 1/2). When the budget
/// runs out before the tolerances are met, the best vertex seen is
/// returned with `converged == false`.
pub fn nelder_mead<F>(
    mut cost: F,
    start: &[f64],
    steps: &[f64],
    options: &MinimizeOptions,
) -> Minimization
where
    F: FnMut(&[f64]) -> f64,
{
    assert_eq!(start.len(), steps.len(), "one initial step per parameter");
    let dim = start.len();
    if dim == 0 {
        let value = cost(&[]);
        return Minimization {
            x: Vec::new(),
            cost: value,
            converged: true,
            evaluations: 1,
        };
    }

    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(dim + 1);
    simplex.push(start.to_vec());
    for i in 0..dim {
        let mut vertex = start.to_vec();
        vertex[i] += steps[i];
        simplex.push(vertex);
    }
    let mut costs: Vec<f64> = simplex.iter().map(|v| cost(v)).collect();
    let mut evaluations = dim + 1;

    while evaluations < options.max_evaluations {
        sort_vertices(&mut simplex, &mut costs);

        if is_converged(&simplex, &costs, options) {
            return Minimization {
                x: simplex[0].clone(),
                cost: costs[0],
                converged: true,
                evaluations,
            };
        }

        // Centroid of every vertex except the worst.
        let mut centroid = vec![0.0; dim];
        for vertex in &simplex[..dim] {
            for (c, v) in centroid.iter_mut().zip(vertex.iter()) {
                *c += v;
            }
        }
        for c in &mut centroid {
            *c /= dim as f64;
        }

        let worst = simplex[dim].clone();
        let reflected: Vec<f64> = centroid
            .iter()
            .zip(worst.iter())
            .map(|(c, w)| c + (c - w))
            .collect();
        let reflected_cost = cost(&reflected);
        evaluations += 1;

        if reflected_cost < costs[0] {
            // Reflection beat every vertex: try stretching further out.
            let expanded: Vec<f64> = centroid
                .iter()
                .zip(worst.iter())
                .map(|(c, w)| c + 2.0 * (c - w))
                .collect();
            let expanded_cost = cost(&expanded);
            evaluations += 1;
            if expanded_cost < reflected_cost {
                simplex[dim] = expanded;
                costs[dim] = expanded_cost;
            } else {
                simplex[dim] = reflected;
                costs[dim] = reflected_cost;
            }
        } else if reflected_cost < costs[dim - 1] {
            simplex[dim] = reflected;
            costs[dim] = reflected_cost;
        } else {
            // Contract toward the better of the worst vertex and the
            // reflection.
            let contracted: Vec<f64> = if reflected_cost < costs[dim] {
                centroid
                    .iter()
                    .zip(reflected.iter())
                    .map(|(c, r)| c + 0.5 * (r - c))
                    .collect()
            } else {
                centroid
                    .iter()
                    .zip(worst.iter())
                    .map(|(c, w)| c + 0.5 * (w - c))
                    .collect()
            };
            let contracted_cost = cost(&contracted);
            evaluations += 1;

            if contracted_cost < reflected_cost.min(costs[dim]) {
                simplex[dim] = contracted;
                costs[dim] = contracted_cost;
            } else {
                // Contraction failed too: shrink everything toward the best.
                for i in 1..=dim {
                    let shrunk: Vec<f64> = simplex[0]
                        .iter()
                        .zip(simplex[i].iter())
                        .map(|(b, v)| b + 0.5 * (v - b))
                        .collect();
                    costs[i] = cost(&shrunk);
                    simplex[i] = shrunk;
                    evaluations += 1;
                }
            }
        }
    }

    let mut best = 0;
    for i in 1..=dim {
        if costs[i] < costs[best] {
            best = i;
        }
    }
    Minimization {
        x: simplex[best].clone(),
        cost: costs[best],
        converged: false,
        evaluations,
    }
}

fn sort_vertices(simplex: &mut Vec<Vec<f64>>, costs: &mut Vec<f64>) {
    let mut order: Vec<usize> = (0..costs.len()).collect();
    order.sort_by(|&a, &b| {
        costs[a]
            .partial_cmp(&costs[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    *simplex = order.iter().map(|&i| simplex[i].clone()).collect();
    *costs = order.iter().map(|&i| costs[i]).collect();
}

fn is_converged(simplex: &[Vec<f64>], costs: &[f64], options: &MinimizeOptions) -> bool {
    let best = &simplex[0];
    let x_spread = simplex[1..]
        .iter()
        .flat_map(|vertex| vertex.iter().zip(best.iter()).map(|(a, b)| (a - b).abs()))
        .fold(0.0f64, f64::max);
    let f_spread = (costs[costs.len() - 1] - costs[0]).abs();
    x_spread < options.x_tolerance
        && f_spread < options.f_tolerance * (costs[0].abs() + options.f_tolerance)
}
