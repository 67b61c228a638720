//! Sensor outcomes and their clause encodings
//!
//! Every sensor-outcome category is a closed enum carrying its own exclusion
//! predicate: given the observer's cell and a candidate cell, the predicate
//! says whether the reading rules the candidate out. The predicates drive
//! both the one-time implication skeleton (see [`crate::formula`]) and
//! nothing else; a round merely asserts one auxiliary unit literal per
//! reading, and the precomputed implications do the narrowing.

use crate::formula::FormulaLayout;
use crate::grid::Cell;
use crate::oracle::{KnowledgeBase, SatBackend};
use crate::{Result, SeekerError};

/// Range detector reading, one of four discrete bands
///
/// Band geometry uses the floored Euclidean distance `d` between observer
/// and candidate ([`Cell::floor_distance`]): Band1 means the target is at
/// distance 0 (exact hit), Band2 within distance 1, Band3 within distance 2,
/// and Band0 no detection, i.e. distance 3 or more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectorBand {
    /// No detection: target at distance ≥ 3
    Band0,
    /// Exact hit: target at distance 0
    Band1,
    /// Target within distance 1
    Band2,
    /// Target within distance 2
    Band3,
}

impl DetectorBand {
    /// All bands, in wire-code order
    pub const ALL: [DetectorBand; 4] = [
        DetectorBand::Band0,
        DetectorBand::Band1,
        DetectorBand::Band2,
        DetectorBand::Band3,
    ];

    /// Parses the wire code `0..=3`
    ///
    /// Anything else raises [`SeekerError::InvalidObservation`], surfaced
    /// before any clause is added.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(DetectorBand::Band0),
            1 => Ok(DetectorBand::Band1),
            2 => Ok(DetectorBand::Band2),
            3 => Ok(DetectorBand::Band3),
            other => Err(SeekerError::InvalidObservation(format!(
                "unknown detector code {other}"
            ))),
        }
    }

    /// The wire code of this band
    pub fn code(self) -> u8 {
        match self {
            DetectorBand::Band0 => 0,
            DetectorBand::Band1 => 1,
            DetectorBand::Band2 => 2,
            DetectorBand::Band3 => 3,
        }
    }

    /// Exclusion predicate: does this reading at `observer` rule out
    /// `candidate`?
    ///
    /// The complement of each band's consistent set under the floor rule.
    pub fn excludes(self, observer: Cell, candidate: Cell) -> bool {
        let d = observer.floor_distance(candidate);
        match self {
            DetectorBand::Band1 => d >= 1,
            DetectorBand::Band2 => d >= 2,
            DetectorBand::Band3 => d >= 3,
            DetectorBand::Band0 => d <= 2,
        }
    }
}

/// Directional answer from an informant: which side of the observer's row
/// holds the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Target row strictly greater than the observer's
    Above,
    /// Target row equal to or less than the observer's
    Below,
}

impl Direction {
    /// Both directions
    pub const ALL: [Direction; 2] = [Direction::Above, Direction::Below];

    /// Exclusion predicate: does this answer at `observer` rule out
    /// `candidate`?
    ///
    /// `Above` excludes every row at or below the observer; `Below` is the
    /// exact complement and excludes every row strictly above. The two
    /// answers partition the grid, so whichever one the informant gives is
    /// sound even when the target shares the observer's row.
    pub fn excludes(self, observer: Cell, candidate: Cell) -> bool {
        match self {
            Direction::Above => candidate.row <= observer.row,
            Direction::Below => candidate.row > observer.row,
        }
    }
}

/// The environment's answer to one move request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The agent's resulting cell
    pub position: Cell,
    /// Whether an informant occupies that cell
    pub informant: bool,
}

/// One round's sensor outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// The detector band read at the agent's position
    pub band: DetectorBand,
    /// The informant's directional answer, present exactly when the move
    /// outcome reported an informant encounter
    pub direction: Option<Direction>,
}

impl Observation {
    /// A detector-only observation
    pub fn detector(band: DetectorBand) -> Self {
        Self {
            band,
            direction: None,
        }
    }

    /// A detector reading plus an informant's directional answer
    pub fn with_direction(band: DetectorBand, direction: Direction) -> Self {
        Self {
            band,
            direction: Some(direction),
        }
    }
}

/// Converts one observed sensor reading into its auxiliary unit assertions
///
/// The heavy lifting happened at construction time: the implication skeleton
/// already links every auxiliary variable to the candidate cells its
/// category rules out. Encoding a reading is therefore one unit clause per
/// sensor (two when an informant answered).
#[derive(Debug)]
pub struct EvidenceEncoder<'a> {
    layout: &'a FormulaLayout,
}

impl<'a> EvidenceEncoder<'a> {
    /// Creates an encoder over the given formula layout
    pub fn new(layout: &'a FormulaLayout) -> Self {
        Self { layout }
    }

    /// Asserts the auxiliary unit literal(s) for one round's observation
    ///
    /// Fails with [`SeekerError::Formula`] if an assertion contradicts the
    /// accumulated knowledge base; with consistent sensing that cannot
    /// happen, so it signals a modeling or simulation bug and must abort
    /// the run.
    pub fn encode<S: SatBackend>(
        &self,
        kb: &mut KnowledgeBase<S>,
        position: Cell,
        observation: &Observation,
    ) -> Result<()> {
        let detector = self.layout.detector(observation.band);
        kb.add_clause(&[detector.lit(position)])?;

        if let Some(direction) = observation.direction {
            let pool = self.layout.direction(direction);
            kb.add_clause(&[pool.lit(position)])?;
        }
        Ok(())
    }
}
