//! SAT backend contract and the append-only knowledge base
//!
//! The backend is an external oracle: clauses go in, satisfiability answers
//! come out. Nothing here (or anywhere else in the crate) can retract a
//! clause; all round-varying knowledge enters as unit literals over
//! variables reserved for that purpose.

pub mod rustsat_adapter;

use crate::{Result, SeekerError};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

/// Contract over a SAT solving backend
///
/// Variables are 1-indexed; literals are signed integers, positive for true.
/// Implementations must answer [`solve`](Self::solve) without permanently
/// adding the assumption literals.
pub trait SatBackend {
    /// Declares the upper bound on variable identifiers before solving
    fn reserve(&mut self, num_vars: u32);

    /// Adds a clause (disjunction of signed literals) to the formula
    fn add_clause(&mut self, lits: &[i32]) -> Result<()>;

    /// Tests satisfiability of the formula plus the given unit assumptions
    ///
    /// Fails with [`SeekerError::SolverTimeout`] if the backend's inference
    /// budget is exceeded; the caller must treat that as fatal for the
    /// current round.
    fn solve(&mut self, assumptions: &[i32]) -> Result<bool>;
}

/// The default backend: batsat behind the rustsat adapter
pub type BatsatBackend = rustsat_adapter::RustSatAdapter<rustsat_batsat::BasicSolver>;

/// The full accumulated formula, owned by the inference engine
///
/// Append-only by construction: the public surface has exactly two
/// operations, "add clause" and "query under assumptions". On every
/// insertion the store re-runs unit propagation over its own copy of the
/// clauses; deriving the empty clause surfaces as
/// [`SeekerError::Formula`] at the offending `add_clause` call, which is the
/// earliest point the contradiction is knowable. Since nothing can be
/// rolled back, that error taints the run.
#[derive(Debug)]
pub struct KnowledgeBase<S: SatBackend = BatsatBackend> {
    backend: S,
    clauses: Vec<Vec<i32>>,
    forced: FxHashMap<u32, bool>,
    num_vars: u32,
}

enum ClauseState {
    Satisfied,
    Open,
    Unit(i32),
    Conflicting,
}

impl KnowledgeBase<BatsatBackend> {
    /// Creates a knowledge base over the default batsat backend
    pub fn new(num_vars: u32) -> Self {
        Self::with_backend(num_vars, BatsatBackend::default())
    }
}

impl<S: SatBackend> KnowledgeBase<S> {
    /// Creates a knowledge base over a caller-supplied backend
    pub fn with_backend(num_vars: u32, mut backend: S) -> Self {
        backend.reserve(num_vars);
        Self {
            backend,
            clauses: Vec::new(),
            forced: FxHashMap::default(),
            num_vars,
        }
    }

    /// Adds a clause permanently
    ///
    /// Fails with [`SeekerError::Formula`] if the clause is empty, or if
    /// adding it lets unit propagation over the accumulated store derive the
    /// empty clause.
    pub fn add_clause(&mut self, lits: &[i32]) -> Result<()> {
        if lits.is_empty() {
            return Err(SeekerError::Formula("empty clause".into()));
        }
        debug_assert!(
            lits.iter()
                .all(|&l| l != 0 && l.unsigned_abs() <= self.num_vars),
            "literal outside declared variable range in {lits:?}"
        );

        let state = self.evaluate(lits);
        if let ClauseState::Conflicting = state {
            return Err(SeekerError::Formula(format!(
                "clause {lits:?} contradicts established knowledge"
            )));
        }

        self.backend.add_clause(lits)?;
        self.clauses.push(lits.to_vec());

        if let ClauseState::Unit(lit) = state {
            self.force(lit)?;
            self.propagate()?;
        }
        Ok(())
    }

    /// Tests satisfiability under transient unit assumptions
    ///
    /// The assumptions are not added to the formula.
    pub fn is_satisfiable(&mut self, assumptions: &[i32]) -> Result<bool> {
        self.backend.solve(assumptions)
    }

    /// Number of clauses added so far
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Declared variable count
    pub fn num_variables(&self) -> u32 {
        self.num_vars
    }

    /// Evaluates a clause against the currently forced assignments
    fn evaluate(&self, lits: &[i32]) -> ClauseState {
        let mut open = 0;
        let mut last_open = 0;
        for &lit in lits {
            match self.forced.get(&lit.unsigned_abs()) {
                Some(&value) if value == (lit > 0) => return ClauseState::Satisfied,
                Some(_) => {}
                None => {
                    open += 1;
                    last_open = lit;
                }
            }
        }
        match open {
            0 => ClauseState::Conflicting,
            1 => ClauseState::Unit(last_open),
            _ => ClauseState::Open,
        }
    }

    /// Records a forced literal
    fn force(&mut self, lit: i32) -> Result<()> {
        let value = lit > 0;
        if let Some(&prev) = self.forced.get(&lit.unsigned_abs()) {
            if prev != value {
                return Err(SeekerError::Formula(format!(
                    "unit {lit} contradicts established knowledge"
                )));
            }
            return Ok(());
        }
        self.forced.insert(lit.unsigned_abs(), value);
        Ok(())
    }

    /// Unit propagation to fixpoint over the stored clauses
    fn propagate(&mut self) -> Result<()> {
        loop {
            let mut derived = Vec::new();
            for clause in &self.clauses {
                match self.evaluate(clause) {
                    ClauseState::Conflicting => {
                        return Err(SeekerError::Formula(format!(
                            "clause {clause:?} falsified by established knowledge"
                        )));
                    }
                    ClauseState::Unit(lit) => derived.push(lit),
                    _ => {}
                }
            }
            if derived.is_empty() {
                return Ok(());
            }
            for lit in derived {
                self.force(lit)?;
            }
        }
    }
}

/// Scripted responses for [`MockBackend`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockResponse {
    /// Report satisfiable
    Sat,
    /// Report unsatisfiable
    Unsat,
    /// Report an exhausted inference budget
    Timeout,
}

/// A backend double that records clauses and replays scripted answers
///
/// Useful for exercising the engine's round protocol without a real solver:
/// timeout propagation, clause accounting, call ordering.
#[derive(Debug, Default)]
pub struct MockBackend {
    num_vars: u32,
    clauses: Vec<Vec<i32>>,
    responses: VecDeque<MockResponse>,
}

impl MockBackend {
    /// Creates an empty mock; unscripted solve calls report satisfiable
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the answer for the next solve call
    pub fn enqueue(&mut self, response: MockResponse) {
        self.responses.push_back(response);
    }

    /// Clauses received so far
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }
}

impl SatBackend for MockBackend {
    fn reserve(&mut self, num_vars: u32) {
        self.num_vars += num_vars;
    }

    fn add_clause(&mut self, lits: &[i32]) -> Result<()> {
        self.clauses.push(lits.to_vec());
        Ok(())
    }

    fn solve(&mut self, _assumptions: &[i32]) -> Result<bool> {
        match self.responses.pop_front().unwrap_or(MockResponse::Sat) {
            MockResponse::Sat => Ok(true),
            MockResponse::Unsat => Ok(false),
            MockResponse::Timeout => Err(SeekerError::SolverTimeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_clause() {
        let mut kb = KnowledgeBase::with_backend(2, MockBackend::new());
        assert!(matches!(
            kb.add_clause(&[]),
            Err(SeekerError::Formula(_))
        ));
        assert_eq!(kb.num_clauses(), 0);
    }

    #[test]
    fn rejects_directly_conflicting_unit() {
        let mut kb = KnowledgeBase::with_backend(1, MockBackend::new());
        kb.add_clause(&[1]).unwrap();
        assert!(matches!(
            kb.add_clause(&[-1]),
            Err(SeekerError::Formula(_))
        ));
        // the conflicting clause was not stored
        assert_eq!(kb.num_clauses(), 1);
    }

    #[test]
    fn propagation_finds_chained_contradiction() {
        let mut kb = KnowledgeBase::with_backend(3, MockBackend::new());
        kb.add_clause(&[-1, 2]).unwrap();
        kb.add_clause(&[-2, 3]).unwrap();
        kb.add_clause(&[1]).unwrap(); // forces 2, then 3
        assert!(matches!(
            kb.add_clause(&[-3]),
            Err(SeekerError::Formula(_))
        ));
    }

    #[test]
    fn propagation_derives_through_later_units() {
        let mut kb = KnowledgeBase::with_backend(3, MockBackend::new());
        kb.add_clause(&[1, 2, 3]).unwrap();
        kb.add_clause(&[-1]).unwrap();
        kb.add_clause(&[-2]).unwrap(); // leaves 3 as the only support
        assert!(matches!(
            kb.add_clause(&[-3]),
            Err(SeekerError::Formula(_))
        ));
    }

    #[test]
    fn satisfiable_answers_from_real_backend() {
        let mut kb = KnowledgeBase::new(2);
        kb.add_clause(&[1, 2]).unwrap();
        assert!(kb.is_satisfiable(&[]).unwrap());
        // assumptions restrict the query without becoming permanent
        assert!(!kb.is_satisfiable(&[-1, -2]).unwrap());
        assert!(kb.is_satisfiable(&[]).unwrap());
        assert!(kb.is_satisfiable(&[1, -2]).unwrap());
    }

    #[test]
    fn timeout_propagates() {
        let mut backend = MockBackend::new();
        backend.enqueue(MockResponse::Timeout);
        let mut kb = KnowledgeBase::with_backend(1, backend);
        assert!(matches!(
            kb.is_satisfiable(&[1]),
            Err(SeekerError::SolverTimeout)
        ));
    }
}
