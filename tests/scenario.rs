//! End-to-end scenarios for the round protocol

use gridseeker::engine::InferenceEngine;
use gridseeker::evidence::{DetectorBand, MoveOutcome, Observation};
use gridseeker::grid::Cell;
use gridseeker::SeekerError;

#[test]
fn start_cell_excluded_from_round_zero() {
    let engine = InferenceEngine::new(4, Cell::new(1, 1)).unwrap();
    let grid = engine.knowledge();
    assert!(grid.is_excluded(Cell::new(1, 1)));
    assert_eq!(grid.excluded_count(), 1);
}

#[test]
fn exact_hit_then_false_negative_is_caught() {
    // 4x4 world, target truly at (3,3), agent starting at (1,1)
    let mut engine = InferenceEngine::new(4, Cell::new(1, 1)).unwrap();

    // Round 1: step onto the target; the detector reports an exact hit.
    // Everything except (3,3) must be excluded.
    let outcome = MoveOutcome {
        position: Cell::new(3, 3),
        informant: false,
    };
    engine
        .run_round(&outcome, &Observation::detector(DetectorBand::Band1))
        .unwrap();

    let grid = engine.knowledge();
    assert_eq!(grid.excluded_count(), 15);
    assert!(!grid.is_excluded(Cell::new(3, 3)));

    // Round 2: move away and (falsely) report no detection. In a 4x4 world
    // every cell lies within floor distance 2 of (3,3), so the reading
    // contradicts the accumulated knowledge and must fail loudly instead of
    // being absorbed.
    let outcome = MoveOutcome {
        position: Cell::new(1, 1),
        informant: false,
    };
    let err = engine
        .run_round(&outcome, &Observation::detector(DetectorBand::Band0))
        .unwrap_err();
    assert!(matches!(err, SeekerError::Formula(_)));
}

#[test]
fn single_cell_world_cannot_be_constructed() {
    // With N = 1 the start-cell exclusion contradicts "the target is
    // somewhere"; construction must fail, not limp along.
    let result = InferenceEngine::new(1, Cell::new(1, 1));
    assert!(matches!(result, Err(SeekerError::Formula(_))));
}

#[test]
fn excluded_cells_stay_excluded_without_requerying() {
    let mut engine = InferenceEngine::new(4, Cell::new(1, 1)).unwrap();

    let outcome = MoveOutcome {
        position: Cell::new(3, 3),
        informant: false,
    };
    engine
        .run_round(&outcome, &Observation::detector(DetectorBand::Band1))
        .unwrap();
    let after_hit = engine.knowledge();

    // A later consistent reading adds nothing but must also undo nothing.
    let outcome = MoveOutcome {
        position: Cell::new(2, 3),
        informant: false,
    };
    engine
        .run_round(&outcome, &Observation::detector(DetectorBand::Band2))
        .unwrap();

    assert_eq!(engine.knowledge(), after_hit);
}
