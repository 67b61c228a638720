//! World-driven multi-round runs: monotone narrowing, idempotent sweeps,
//! directional evidence

use gridseeker::engine::InferenceEngine;
use gridseeker::grid::Cell;
use gridseeker::world::GridWorld;

/// Runs the scripted steps against the world, asserting the exclusion set
/// only ever grows, and returns the final engine.
fn run_script(world: &GridWorld, start: Cell, steps: &[Cell]) -> InferenceEngine {
    let mut engine = InferenceEngine::new(world.dim(), start).unwrap();
    let mut previous = engine.knowledge().excluded_cells();

    for &step in steps {
        let outcome = world.accept_move(step).unwrap();
        let observation = world.observe(&outcome);
        engine.run_round(&outcome, &observation).unwrap();

        let current = engine.knowledge().excluded_cells();
        for cell in &previous {
            assert!(
                current.contains(cell),
                "cell {cell} reverted to unknown after moving to {step}"
            );
        }
        assert!(
            !engine.knowledge().is_excluded(world.target()),
            "true target {} was excluded",
            world.target()
        );
        previous = current;
    }
    engine
}

#[test]
fn narrowing_is_monotone_and_never_loses_the_target() {
    let world = GridWorld::new(4, Cell::new(3, 3), &[Cell::new(2, 2)]).unwrap();
    let steps = [
        Cell::new(1, 2),
        Cell::new(2, 2), // informant here
        Cell::new(3, 3),
        Cell::new(2, 3),
    ];
    let engine = run_script(&world, Cell::new(1, 1), &steps);

    // the exact hit in step 3 pinned the target
    let grid = engine.knowledge();
    assert_eq!(grid.excluded_count(), 15);
    assert!(!grid.is_excluded(Cell::new(3, 3)));
    assert_eq!(engine.round(), 4);
}

#[test]
fn sweep_is_idempotent_without_new_evidence() {
    let world = GridWorld::new(4, Cell::new(3, 3), &[]).unwrap();
    let mut engine = InferenceEngine::new(4, Cell::new(1, 1)).unwrap();

    let outcome = world.accept_move(Cell::new(2, 2)).unwrap();
    let observation = world.observe(&outcome);
    engine.run_round(&outcome, &observation).unwrap();

    let after_round = engine.knowledge();
    assert!(after_round.excluded_count() > 1);

    // re-running the query phase twice changes nothing
    assert_eq!(engine.sweep().unwrap(), 0);
    assert_eq!(engine.knowledge(), after_round);
    assert_eq!(engine.sweep().unwrap(), 0);
    assert_eq!(engine.knowledge(), after_round);
}

#[test]
fn informant_answer_rules_out_the_wrong_side() {
    // informant on (1,3); the target sits two rows above, so the answer is
    // Above and the whole of row 1 must go
    let world = GridWorld::new(4, Cell::new(3, 3), &[Cell::new(1, 3)]).unwrap();
    let mut engine = InferenceEngine::new(4, Cell::new(1, 1)).unwrap();

    let outcome = world.accept_move(Cell::new(1, 3)).unwrap();
    assert!(outcome.informant);
    let observation = world.observe(&outcome);
    engine.run_round(&outcome, &observation).unwrap();

    let grid = engine.knowledge();
    for col in 1..=4 {
        assert!(grid.is_excluded(Cell::new(1, col)));
    }
    assert!(!grid.is_excluded(Cell::new(3, 3)));
}

#[test]
fn larger_world_localizes_with_a_walk() {
    // 6x6, target at (5,2); approach it and confirm the detector bands
    // tighten the candidate set without ever contradicting themselves
    let world = GridWorld::new(6, Cell::new(5, 2), &[]).unwrap();
    let steps = [
        Cell::new(2, 2),
        Cell::new(3, 2),
        Cell::new(4, 2),
        Cell::new(5, 2),
    ];
    let engine = run_script(&world, Cell::new(1, 1), &steps);

    let grid = engine.knowledge();
    assert_eq!(grid.excluded_count(), 35);
    assert!(!grid.is_excluded(Cell::new(5, 2)));
}
