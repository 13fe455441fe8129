//! Property tests for the placement rules and the tick loop.
//!
//! Invariants covered:
//! - Four rotations about the pivot restore any piece.
//! - A rejected move leaves the falling piece untouched; an accepted one keeps
//!   it inside the grid and off locked blocks.
//! - After every tick the grid holds no full row and only values in `0..=7`.
//! - Clearing rows keeps the surviving rows in order and drops exactly
//!   `width` cells per cleared row.

use proptest::prelude::*;
use rltris_engine::{
    Action, Board, BoardConfig, Cell, Grid, InputEvent, Piece, RandomShapes, ShapeKind,
};

fn shape_kind() -> impl Strategy<Value = ShapeKind> {
    prop::sample::select(ShapeKind::ALL.to_vec())
}

fn action() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::ALL.to_vec())
}

proptest! {
    #[test]
    fn four_rotations_restore_piece(
        kind in shape_kind(),
        dx in -20i32..20,
        dy in -20i32..20,
    ) {
        let piece = Piece::spawn(kind, 3).translated(dx, dy);
        let rotated = piece.rotated().rotated().rotated().rotated();
        prop_assert_eq!(rotated, piece);
    }

    #[test]
    fn rollout_respects_placement_rules(
        seed in any::<u64>(),
        width in 4usize..14,
        fall_delay in 0u32..4,
        spawn_delay in 0u32..3,
        actions in prop::collection::vec(prop::option::of(action()), 1..400),
    ) {
        let config = BoardConfig {
            width,
            spawn_delay,
            fall_delay,
            ..BoardConfig::default()
        };
        let mut board = Board::new(config, Box::new(RandomShapes::from_seed(seed))).unwrap();

        for (i, action) in actions.iter().enumerate() {
            if let Some(action) = *action {
                let before = board.falling_piece().copied();
                let moved = board.apply(action);
                if !moved {
                    prop_assert_eq!(board.falling_piece().copied(), before);
                }
                if let Some(piece) = board.falling_piece() {
                    prop_assert!(piece.fits(board.grid()));
                }
            }

            let events = [InputEvent::Action(Action::ALL[i % Action::LEN])];
            prop_assert!(board.step(&events, None).is_continue());

            prop_assert!(board.grid().full_rows().is_empty());
            prop_assert!(board.grid().values().all(|v| v <= 7));
            if let Some(piece) = board.falling_piece() {
                prop_assert!(piece.fits(board.grid()));
            }
        }

        let stats = board.stats();
        prop_assert_eq!(stats.ticks(), actions.len() as u64);
        prop_assert_eq!(
            stats.line_cleared_counter().iter().sum::<usize>(),
            stats.locked_pieces()
        );
    }

    #[test]
    fn clearing_rows_compacts_survivors(
        rows in prop::collection::vec(prop::collection::vec(any::<bool>(), 6), 8),
        full in prop::collection::vec(any::<bool>(), 8),
    ) {
        let width = 6;
        let mut grid = Grid::new(width, rows.len());
        for (y, (row, &is_full)) in rows.iter().zip(&full).enumerate() {
            for (x, &occupied) in row.iter().enumerate() {
                if is_full || occupied {
                    grid.fill_cell(x, y, Cell::Filled(ShapeKind::T));
                }
            }
        }

        let full_rows = grid.full_rows();
        let survivors: Vec<Vec<Cell>> = grid
            .rows()
            .enumerate()
            .filter(|(y, _)| !full_rows.contains(y))
            .map(|(_, row)| row.to_vec())
            .collect();
        let filled_before = grid.filled_cells();

        let cleared = grid.clear_full_rows();

        prop_assert_eq!(cleared, full_rows.len());
        prop_assert_eq!(grid.height(), rows.len());
        prop_assert_eq!(grid.filled_cells(), filled_before - cleared * width);
        prop_assert!(grid.full_rows().is_empty());

        let after: Vec<Vec<Cell>> = grid.rows().map(<[Cell]>::to_vec).collect();
        prop_assert!(after[..cleared].iter().flatten().all(|c| c.is_empty()));
        prop_assert_eq!(&after[cleared..], &survivors[..]);
    }
}
