//! Boolean-selection model solved by the LP collaborator.
//!
//! The matching engines describe their problem as boolean decision variables
//! with integer costs plus equality constraints over variable subsets; this
//! module is the only place that talks to `good_lp`.

use good_lp::{constraint, default_solver, variable, variables, Expression, ResolutionError, Solution, SolverModel};

/// A minimization problem over boolean decision variables.
///
/// Variables are identified by the index returned from [`add_variable`];
/// each constraint requires the selected count within a subset of variables
/// to equal a target.
///
/// [`add_variable`]: SelectionProblem::add_variable
#[derive(Debug, Default)]
pub struct SelectionProblem {
    costs: Vec<i64>,
    constraints: Vec<(Vec<usize>, u32)>,
}

impl SelectionProblem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a boolean decision variable with the given cost; returns its id.
    pub fn add_variable(&mut self, cost: i64) -> usize {
        self.costs.push(cost);
        self.costs.len() - 1
    }

    /// Require that exactly `total` of the given variables are selected.
    pub fn require_sum(&mut self, vars: Vec<usize>, total: u32) {
        self.constraints.push((vars, total));
    }

    /// Find a cost-minimal assignment satisfying every constraint.
    ///
    /// Returns `None` when the problem is infeasible. Solver failures other
    /// than infeasibility (which should not occur for a bounded boolean
    /// model) are logged and also reported as infeasible, never as success.
    pub fn solve(&self) -> Option<Vec<bool>> {
        let mut vars = variables!();
        let selections: Vec<_> = self
            .costs
            .iter()
            .map(|_| vars.add(variable().binary()))
            .collect();

        let objective = selections
            .iter()
            .zip(&self.costs)
            .fold(Expression::from(0.0), |acc, (var, cost)| {
                acc + (*cost as f64) * *var
            });
        let mut model = vars.minimise(objective).using(default_solver);

        for (members, total) in &self.constraints {
            let selected_count = members
                .iter()
                .fold(Expression::from(0.0), |acc, &i| acc + selections[i]);
            model = model.with(constraint!(selected_count == f64::from(*total)));
        }

        match model.solve() {
            Ok(solution) => Some(
                selections
                    .iter()
                    .map(|var| solution.value(*var) > 0.5)
                    .collect(),
            ),
            Err(ResolutionError::Infeasible) => None,
            Err(err) => {
                log::warn!("selection solve failed: {}", err);
                None
            }
        }
    }
}
