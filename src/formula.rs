//! Static formula skeleton construction
//!
//! Everything that can be known before the first move is encoded exactly
//! once, at construction: the two candidate-position generations, the
//! monotone bridge between them, the per-category sensor implication
//! skeleton, and the start-cell exclusion. Rounds afterwards only ever add
//! unit clauses over auxiliary or past-generation variables; no disjunction
//! is ever edited, because the backend cannot retract anything.

use crate::evidence::{DetectorBand, Direction};
use crate::grid::Cell;
use crate::oracle::{BatsatBackend, KnowledgeBase, SatBackend};
use crate::vars::{VariablePool, VariableSpace};
use crate::{Result, SeekerError};
use log::debug;

/// The pool handles of a built formula
///
/// Copyable, cheap, and the only way the rest of the crate names variables:
/// past/future candidate generations plus one auxiliary pool per sensor
/// category.
#[derive(Debug, Clone, Copy)]
pub struct FormulaLayout {
    dim: u32,
    past: VariablePool,
    future: VariablePool,
    detectors: [VariablePool; 4],
    above: VariablePool,
    below: VariablePool,
}

impl FormulaLayout {
    fn allocate(space: &mut VariableSpace, dim: u32) -> Self {
        let past = space.allocate();
        let future = space.allocate();
        let detectors = [
            space.allocate(),
            space.allocate(),
            space.allocate(),
            space.allocate(),
        ];
        let above = space.allocate();
        let below = space.allocate();
        Self {
            dim,
            past,
            future,
            detectors,
            above,
            below,
        }
    }

    /// Grid dimension N
    pub fn dim(&self) -> u32 {
        self.dim
    }

    /// Prior-generation candidate pool
    pub fn past(&self) -> VariablePool {
        self.past
    }

    /// Current-generation candidate pool
    pub fn future(&self) -> VariablePool {
        self.future
    }

    /// Auxiliary pool for a detector band
    pub fn detector(&self, band: DetectorBand) -> VariablePool {
        self.detectors[band.code() as usize]
    }

    /// Auxiliary pool for a directional answer
    pub fn direction(&self, direction: Direction) -> VariablePool {
        match direction {
            Direction::Above => self.above,
            Direction::Below => self.below,
        }
    }
}

/// Builds the initial knowledge base of the agent
///
/// ```rust,ignore
/// let (layout, kb) = FormulaBuilder::new(4, Cell::new(1, 1))?.build()?;
/// ```
#[derive(Debug)]
pub struct FormulaBuilder {
    dim: u32,
    start: Cell,
}

impl FormulaBuilder {
    /// Creates a builder for a `dim`×`dim` world with the agent starting at
    /// `start`
    pub fn new(dim: u32, start: Cell) -> Result<Self> {
        if dim == 0 {
            return Err(SeekerError::InvalidArgument(
                "grid dimension must be at least 1".into(),
            ));
        }
        if !start.within(dim) {
            return Err(SeekerError::InvalidArgument(format!(
                "start cell {start} outside {dim}x{dim} grid"
            )));
        }
        Ok(Self { dim, start })
    }

    /// Builds the formula over the default batsat backend
    pub fn build(self) -> Result<(FormulaLayout, KnowledgeBase<BatsatBackend>)> {
        self.build_with(BatsatBackend::default())
    }

    /// Builds the formula over a caller-supplied backend
    ///
    /// Pool allocation is fixed before the backend sees its variable bound;
    /// clause insertion follows. A world too small to hold both the agent's
    /// start and the target (N = 1) contradicts itself here and fails with
    /// [`SeekerError::Formula`].
    pub fn build_with<S: SatBackend>(
        self,
        backend: S,
    ) -> Result<(FormulaLayout, KnowledgeBase<S>)> {
        let mut space = VariableSpace::new(self.dim)?;
        let layout = FormulaLayout::allocate(&mut space, self.dim);
        let mut kb = KnowledgeBase::with_backend(space.total_variables(), backend);

        self.add_existence_clause(&mut kb, layout.past)?;
        self.add_existence_clause(&mut kb, layout.future)?;
        self.add_bridge_clauses(&mut kb, &layout)?;
        self.add_detector_implications(&mut kb, &layout)?;
        self.add_direction_implications(&mut kb, &layout)?;
        self.exclude_start(&mut kb, &layout)?;

        debug!(
            "built formula: dim={} variables={} clauses={}",
            self.dim,
            kb.num_variables(),
            kb.num_clauses()
        );
        Ok((layout, kb))
    }

    /// "The target is at some cell": one N²-literal disjunction per pool
    fn add_existence_clause<S: SatBackend>(
        &self,
        kb: &mut KnowledgeBase<S>,
        pool: VariablePool,
    ) -> Result<()> {
        let lits: Vec<i32> = self.cells().map(|cell| pool.lit(cell)).collect();
        kb.add_clause(&lits)
    }

    /// `Future(c) → Past(c)` for every cell
    ///
    /// The one invariant that makes irrevocable knowledge possible: a
    /// committed `¬Past(c)` unit forces `¬Future(c)` in every later round.
    fn add_bridge_clauses<S: SatBackend>(
        &self,
        kb: &mut KnowledgeBase<S>,
        layout: &FormulaLayout,
    ) -> Result<()> {
        for cell in self.cells() {
            kb.add_clause(&[-layout.future.lit(cell), layout.past.lit(cell)])?;
        }
        Ok(())
    }

    /// `band(observer) → ¬Future(candidate)` for every ruled-out pair
    fn add_detector_implications<S: SatBackend>(
        &self,
        kb: &mut KnowledgeBase<S>,
        layout: &FormulaLayout,
    ) -> Result<()> {
        for band in DetectorBand::ALL {
            let pool = layout.detector(band);
            for observer in self.cells() {
                for candidate in self.cells() {
                    if band.excludes(observer, candidate) {
                        kb.add_clause(&[
                            -pool.lit(observer),
                            -layout.future.lit(candidate),
                        ])?;
                    }
                }
            }
        }
        Ok(())
    }

    /// `direction(observer) → ¬Future(candidate)` for every ruled-out pair
    fn add_direction_implications<S: SatBackend>(
        &self,
        kb: &mut KnowledgeBase<S>,
        layout: &FormulaLayout,
    ) -> Result<()> {
        for direction in Direction::ALL {
            let pool = layout.direction(direction);
            for observer in self.cells() {
                for candidate in self.cells() {
                    if direction.excludes(observer, candidate) {
                        kb.add_clause(&[
                            -pool.lit(observer),
                            -layout.future.lit(candidate),
                        ])?;
                    }
                }
            }
        }
        Ok(())
    }

    /// The target is known a priori not to share the agent's start cell
    fn exclude_start<S: SatBackend>(
        &self,
        kb: &mut KnowledgeBase<S>,
        layout: &FormulaLayout,
    ) -> Result<()> {
        kb.add_clause(&[-layout.future.lit(self.start)])?;
        kb.add_clause(&[-layout.past.lit(self.start)])
    }

    fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let dim = self.dim;
        (1..=dim).flat_map(move |row| (1..=dim).map(move |col| Cell::new(row, col)))
    }
}
