use gw_env::{Action, Transitions, attempt_move};
use gw_grid::{Grid, Position};
use proptest::prelude::*;

fn make_grid() -> Grid {
    Grid::from_codes(&[
        [0, 0, 0, 0, 1],
        [0, 9, 0, 9, -1],
        [0, 0, 0, 0, 0],
        [9, 0, 1, 0, 0],
    ])
    .unwrap()
}

fn action() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::ALL.to_vec())
}

proptest! {
    #[test]
    fn distribution_sums_to_one(
        row in 0usize..4,
        col in 0usize..5,
        action in action(),
        move_prob in 0.0f64..1.0,
    ) {
        let grid = make_grid();
        let state = Position::new(row, col);
        let transitions = Transitions::compute(&grid, state, action, move_prob);

        if grid.is_actionable(state) {
            prop_assert!((transitions.total() - 1.0).abs() <= 1e-9);
            for (position, prob) in &transitions {
                prop_assert!(prob >= 0.0);
                prop_assert!(!grid[position].is_wall());
            }
        } else {
            prop_assert!(transitions.is_empty());
        }
    }

    #[test]
    fn opposite_direction_contributes_nothing(
        row in 0usize..4,
        col in 0usize..5,
        action in action(),
        move_prob in 0.01f64..0.99,
    ) {
        let grid = make_grid();
        let state = Position::new(row, col);
        prop_assume!(grid.is_actionable(state));

        let transitions = Transitions::compute(&grid, state, action, move_prob);
        let opposite = attempt_move(&grid, state, action.opposite()).unwrap();
        let intended = attempt_move(&grid, state, action).unwrap();
        let [left, right] = action.perpendicular();
        let drift = [
            attempt_move(&grid, state, left).unwrap(),
            attempt_move(&grid, state, right).unwrap(),
        ];

        let mut expected = 0.0;
        if opposite == intended {
            expected += move_prob;
        }
        for target in drift {
            if opposite == target {
                expected += (1.0 - move_prob) / 2.0;
            }
        }
        prop_assert!((transitions.probability(opposite) - expected).abs() <= 1e-12);
    }

    #[test]
    fn moves_stay_in_bounds(row in 0usize..4, col in 0usize..5, action in action()) {
        let grid = make_grid();
        let state = Position::new(row, col);
        match attempt_move(&grid, state, action) {
            Ok(next) => {
                prop_assert!(grid.contains(next));
                prop_assert!(!grid[next].is_wall());
                let distance = next.row.abs_diff(state.row) + next.col.abs_diff(state.col);
                prop_assert!(distance <= 1);
            }
            Err(_) => prop_assert!(!grid.is_actionable(state)),
        }
    }
}
