//! Environment simulator holding ground truth
//!
//! The world knows where the target really is and where the informants
//! stand; the agent only ever sees its answers. Kept strictly outside the
//! inference engine so that tests can also feed the engine fabricated
//! (including deliberately inconsistent) readings.

use crate::evidence::{DetectorBand, Direction, MoveOutcome, Observation};
use crate::grid::Cell;
use crate::{Result, SeekerError};
use rustc_hash::FxHashSet;

/// A `dim`×`dim` world with one hidden target and any number of informants
#[derive(Debug, Clone)]
pub struct GridWorld {
    dim: u32,
    target: Cell,
    informants: FxHashSet<Cell>,
}

impl GridWorld {
    /// Creates a world; the target and every informant must lie within it
    pub fn new(dim: u32, target: Cell, informants: &[Cell]) -> Result<Self> {
        if dim == 0 {
            return Err(SeekerError::InvalidArgument(
                "grid dimension must be at least 1".into(),
            ));
        }
        if !target.within(dim) {
            return Err(SeekerError::InvalidArgument(format!(
                "target {target} outside {dim}x{dim} grid"
            )));
        }
        if let Some(bad) = informants.iter().find(|c| !c.within(dim)) {
            return Err(SeekerError::InvalidArgument(format!(
                "informant {bad} outside {dim}x{dim} grid"
            )));
        }
        Ok(Self {
            dim,
            target,
            informants: informants.iter().copied().collect(),
        })
    }

    /// Grid dimension N
    pub fn dim(&self) -> u32 {
        self.dim
    }

    /// The true target cell
    pub fn target(&self) -> Cell {
        self.target
    }

    /// Answers a move request
    ///
    /// `None` if the destination is outside the world (the agent stays
    /// where it was); otherwise the resulting position plus the informant
    /// flag for that cell.
    pub fn accept_move(&self, destination: Cell) -> Option<MoveOutcome> {
        if !destination.within(self.dim) {
            return None;
        }
        Some(MoveOutcome {
            position: destination,
            informant: self.informants.contains(&destination),
        })
    }

    /// The detector band read at `position`, under the floor-distance rule
    pub fn detect(&self, position: Cell) -> DetectorBand {
        match position.floor_distance(self.target) {
            0 => DetectorBand::Band1,
            1 => DetectorBand::Band2,
            2 => DetectorBand::Band3,
            _ => DetectorBand::Band0,
        }
    }

    /// The informant's answer at `position`
    ///
    /// `Above` iff the target's row is strictly greater; a target sharing
    /// the row answers `Below`.
    pub fn direction_from(&self, position: Cell) -> Direction {
        if self.target.row > position.row {
            Direction::Above
        } else {
            Direction::Below
        }
    }

    /// The full sensor outcome for one accepted move
    pub fn observe(&self, outcome: &MoveOutcome) -> Observation {
        let band = self.detect(outcome.position);
        if outcome.informant {
            Observation::with_direction(band, self.direction_from(outcome.position))
        } else {
            Observation::detector(band)
        }
    }
}
