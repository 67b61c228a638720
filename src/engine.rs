//! The per-round inference engine
//!
//! Each round runs two phases in a fixed order. The commit phase turns the
//! previous round's conclusions into permanent `¬Past(cell)` unit clauses.
//! The query phase then asks the oracle, for every still-open cell, whether
//! `Future(cell)` is consistent with everything known; cells that are not
//! get excluded and staged for the next round's commit. The one-round lag
//! between deriving a conclusion and committing it is what lets an
//! append-only solver simulate retraction-free belief revision.

use crate::evidence::{EvidenceEncoder, MoveOutcome, Observation};
use crate::formula::{FormulaBuilder, FormulaLayout};
use crate::grid::{Cell, KnowledgeGrid};
use crate::oracle::{BatsatBackend, KnowledgeBase, SatBackend};
use crate::{Result, SeekerError};
use log::{debug, info};

/// Tracks the set of cells that could still hold the target
///
/// Owns the knowledge base and the public knowledge grid exclusively for
/// its lifetime; callers interact once per externally-taken step through
/// [`run_round`](Self::run_round) and read snapshots through
/// [`knowledge`](Self::knowledge).
#[derive(Debug)]
pub struct InferenceEngine<S: SatBackend = BatsatBackend> {
    layout: FormulaLayout,
    kb: KnowledgeBase<S>,
    grid: KnowledgeGrid,
    /// Conclusions from the last query phase, awaiting permanent commitment
    pending: Vec<Cell>,
    round: u64,
}

impl InferenceEngine<BatsatBackend> {
    /// Creates an engine over the default batsat backend
    pub fn new(dim: u32, start: Cell) -> Result<Self> {
        Self::with_backend(dim, start, BatsatBackend::default())
    }
}

impl<S: SatBackend> InferenceEngine<S> {
    /// Creates an engine over a caller-supplied backend
    ///
    /// Builds the full static formula; the agent's start cell is excluded
    /// from round 0 onward.
    pub fn with_backend(dim: u32, start: Cell, backend: S) -> Result<Self> {
        let (layout, kb) = FormulaBuilder::new(dim, start)?.build_with(backend)?;
        let mut grid = KnowledgeGrid::new(dim);
        grid.exclude(start);
        Ok(Self {
            layout,
            kb,
            grid,
            pending: Vec::new(),
            round: 0,
        })
    }

    /// Grid dimension N
    pub fn dim(&self) -> u32 {
        self.layout.dim()
    }

    /// Rounds processed so far
    pub fn round(&self) -> u64 {
        self.round
    }

    /// An owned snapshot of the current per-cell belief
    pub fn knowledge(&self) -> KnowledgeGrid {
        self.grid.clone()
    }

    /// Processes one round, in lockstep with one externally-taken step
    ///
    /// Order is fixed: validate the inputs, commit last round's conclusions,
    /// encode this round's evidence, then sweep every open cell. Errors
    /// propagate untouched; after a [`SeekerError::Formula`] the knowledge
    /// base is tainted and the run must stop.
    pub fn run_round(&mut self, outcome: &MoveOutcome, observation: &Observation) -> Result<()> {
        self.validate(outcome, observation)?;
        self.round += 1;

        self.commit_pending()?;
        EvidenceEncoder::new(&self.layout).encode(&mut self.kb, outcome.position, observation)?;
        let newly = self.sweep()?;

        info!(
            "round {}: position={} band={:?} newly_excluded={} total_excluded={}",
            self.round,
            outcome.position,
            observation.band,
            newly,
            self.grid.excluded_count()
        );
        Ok(())
    }

    /// Query phase: one satisfiability question per still-open cell
    ///
    /// Already-excluded cells are skipped; the bridge guarantees they can
    /// never become satisfiable again, so skipping is a pure optimization.
    /// Re-running the sweep without new evidence finds nothing new.
    pub fn sweep(&mut self) -> Result<usize> {
        let dim = self.layout.dim();
        let future = self.layout.future();
        let mut newly = 0;

        for row in 1..=dim {
            for col in 1..=dim {
                let cell = Cell::new(row, col);
                if self.grid.is_excluded(cell) {
                    continue;
                }
                if !self.kb.is_satisfiable(&[future.lit(cell)])? {
                    debug!("excluded {cell}");
                    self.grid.exclude(cell);
                    self.pending.push(cell);
                    newly += 1;
                }
            }
        }
        Ok(newly)
    }

    /// Commit phase: last round's conclusions become permanent
    fn commit_pending(&mut self) -> Result<()> {
        let past = self.layout.past();
        for cell in std::mem::take(&mut self.pending) {
            self.kb.add_clause(&[-past.lit(cell)])?;
        }
        Ok(())
    }

    /// Sensor readings must match the move outcome they came with
    fn validate(&self, outcome: &MoveOutcome, observation: &Observation) -> Result<()> {
        if !outcome.position.within(self.layout.dim()) {
            return Err(SeekerError::InvalidObservation(format!(
                "reported position {pos} outside {dim}x{dim} grid",
                pos = outcome.position,
                dim = self.layout.dim(),
            )));
        }
        match (outcome.informant, observation.direction) {
            (true, None) => Err(SeekerError::InvalidObservation(
                "informant encountered but no directional answer supplied".into(),
            )),
            (false, Some(_)) => Err(SeekerError::InvalidObservation(
                "directional answer supplied without an informant encounter".into(),
            )),
            _ => Ok(()),
        }
    }
}
