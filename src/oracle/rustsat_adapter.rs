//! Adapter for rustsat solver backends
//!
//! Lets any incremental rustsat-compatible solver serve as the crate's
//! [`SatBackend`]. The default choice is batsat, a pure-Rust solver.

use super::SatBackend;
use crate::{Result, SeekerError};
use rustsat::solvers::{SolveIncremental, SolverResult};
use rustsat::types::{Clause, Lit, Var};

/// Wraps a rustsat solver to implement [`SatBackend`]
///
/// # Example
///
/// ```ignore
/// use rustsat_batsat::BasicSolver;
/// let backend = RustSatAdapter::new(BasicSolver::default());
/// ```
#[derive(Debug)]
pub struct RustSatAdapter<S> {
    solver: S,
    num_vars: u32,
}

impl<S> RustSatAdapter<S> {
    /// Creates an adapter wrapping the given solver
    pub fn new(solver: S) -> Self {
        Self {
            solver,
            num_vars: 0,
        }
    }

    /// Number of variables declared through [`SatBackend::reserve`]
    pub fn num_variables(&self) -> u32 {
        self.num_vars
    }
}

impl<S: Default> Default for RustSatAdapter<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

fn to_rustsat_lits(lits: &[i32]) -> Vec<Lit> {
    lits.iter()
        .map(|&lit| {
            let var_idx = lit.unsigned_abs() - 1;
            debug_assert!(var_idx <= Var::MAX_IDX, "variable index {var_idx} too high");
            let var = Var::new(var_idx);
            if lit > 0 {
                var.pos_lit()
            } else {
                var.neg_lit()
            }
        })
        .collect()
}

impl<S: SolveIncremental> SatBackend for RustSatAdapter<S> {
    fn reserve(&mut self, num_vars: u32) {
        // rustsat solvers create variables on demand as clauses arrive;
        // only the count is tracked here
        self.num_vars += num_vars;
    }

    fn add_clause(&mut self, lits: &[i32]) -> Result<()> {
        let clause = Clause::from(&to_rustsat_lits(lits)[..]);
        self.solver
            .add_clause(clause)
            .map_err(|e| SeekerError::Formula(format!("backend rejected clause: {e}")))
    }

    fn solve(&mut self, assumptions: &[i32]) -> Result<bool> {
        let assumps = to_rustsat_lits(assumptions);
        match self.solver.solve_assumps(&assumps) {
            Ok(SolverResult::Sat) => Ok(true),
            Ok(SolverResult::Unsat) => Ok(false),
            Ok(SolverResult::Interrupted) => Err(SeekerError::SolverTimeout),
            Err(e) => Err(SeekerError::Formula(format!("backend failure: {e}"))),
        }
    }
}
