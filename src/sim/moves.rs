//! Move legality and the one-cell cascading shift
//!
//! A move never slides tiles to the wall. Each line finds the contact point
//! nearest the destination edge where a tile can step into its neighbour,
//! and every tile from there back to the source edge advances one cell.
//! At most one merge happens per line per move.

use serde::{Deserialize, Serialize};

use super::board::{Board, Direction};

/// Result of a tile stepping from one cell into its neighbour.
///
/// `None` when the step is illegal: nothing to move, `1`+`1`, `2`+`2`,
/// mismatched rank tiles, or a low tile meeting a rank tile.
#[inline]
pub fn merge_result(from: u32, to: u32) -> Option<u32> {
    match (from, to) {
        (0, _) => None,
        (from, 0) => Some(from),
        (1, 2) | (2, 1) => Some(3),
        (from, to) if from == to && from > 2 => Some(from * 2),
        _ => None,
    }
}

#[inline]
pub fn can_merge(from: u32, to: u32) -> bool {
    merge_result(from, to).is_some()
}

/// Legality of a direction plus where each line starts moving
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCheck {
    pub direction: Direction,
    /// Per line, the board-axis position (row for Up/Down, column for
    /// Left/Right) of the contact point nearest the destination edge.
    /// `None` when nothing on that line can move.
    pub offsets: Vec<Option<usize>>,
}

impl MoveCheck {
    /// True if at least one line can move
    pub fn is_legal(&self) -> bool {
        self.offsets.iter().any(Option::is_some)
    }

    pub fn legal_lines(&self) -> usize {
        self.offsets.iter().filter(|o| o.is_some()).count()
    }
}

/// What a move did to the board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    /// Tiles that changed cell (merged tiles included)
    pub moved: usize,
    /// Merges performed; each removes one tile from the board
    pub merges: usize,
}

/// Scan every line for its first legal step, nearest the destination edge first
pub fn check_move(board: &Board, direction: Direction) -> MoveCheck {
    let size = board.size();
    let offsets = (0..size)
        .map(|line| {
            (1..size)
                .find(|&depth| {
                    let (fr, fc) = direction.cell(size, line, depth);
                    let (tr, tc) = direction.cell(size, line, depth - 1);
                    can_merge(board.get(fr, fc), board.get(tr, tc))
                })
                .map(|depth| direction.axis_position(size, depth))
        })
        .collect();

    MoveCheck { direction, offsets }
}

/// Shift every legal line one cell toward the destination edge.
///
/// `check` must come from [`check_move`] on this same board and report a
/// legal move; anything else is a caller bug.
pub fn apply_move(board: &mut Board, check: &MoveCheck) -> MoveReport {
    let size = board.size();
    assert_eq!(
        check.offsets.len(),
        size,
        "move check is for a different board size"
    );
    assert!(
        check.is_legal(),
        "applying {} which has no legal line",
        check.direction.as_str()
    );

    let direction = check.direction;
    let mut report = MoveReport::default();

    for (line, offset) in check.offsets.iter().enumerate() {
        let Some(position) = *offset else {
            continue;
        };
        let start = direction.axis_position(size, position);
        for depth in start..size {
            let from = direction.cell(size, line, depth);
            let to = direction.cell(size, line, depth - 1);
            shift_merge(board, from, to, &mut report);
        }
    }

    report
}

/// Step the tile at `from` into `to`, then clear `from`
fn shift_merge(
    board: &mut Board,
    from: (usize, usize),
    to: (usize, usize),
    report: &mut MoveReport,
) {
    let source = board.get(from.0, from.1);
    let target = board.get(to.0, to.1);
    if let Some(result) = merge_result(source, target) {
        board.set(to.0, to.1, result);
        report.moved += 1;
        if target != 0 {
            report.merges += 1;
        }
    }
    board.set(from.0, from.1, 0);
}

/// Directions with at least one movable line
pub fn legal_directions(board: &Board) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|&d| check_move(board, d).is_legal())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row_board(row: [u32; 4]) -> Board {
        Board::from_rows([row, [0; 4], [0; 4], [0; 4]])
    }

    fn moved(board: &Board, direction: Direction) -> (Board, MoveReport) {
        let mut board = board.clone();
        let check = check_move(&board, direction);
        let report = apply_move(&mut board, &check);
        (board, report)
    }

    #[test]
    fn test_merge_rules() {
        assert!(can_merge(1, 0));
        assert!(can_merge(1, 2));
        assert!(can_merge(2, 1));
        assert!(can_merge(3, 3));
        assert!(can_merge(48, 48));
        assert!(!can_merge(1, 1));
        assert!(!can_merge(2, 2));
        assert!(!can_merge(3, 6));
        assert!(!can_merge(3, 1));
        assert!(!can_merge(0, 0));
        assert!(!can_merge(0, 3));
        assert_eq!(merge_result(3, 3), Some(6));
        assert_eq!(merge_result(2, 1), Some(3));
    }

    #[test]
    fn test_low_pair_merges_into_three() {
        let (board, report) = moved(&row_board([1, 2, 0, 0]), Direction::Left);
        assert_eq!(board.rows().next().unwrap(), &[3, 0, 0, 0]);
        assert_eq!(report.merges, 1);
    }

    #[test]
    fn test_equal_threes_double() {
        let (board, _) = moved(&row_board([3, 3, 0, 0]), Direction::Left);
        assert_eq!(board.rows().next().unwrap(), &[6, 0, 0, 0]);
    }

    #[test]
    fn test_equal_ones_cannot_move() {
        let board = row_board([1, 1, 0, 0]);
        let check = check_move(&board, Direction::Left);
        assert_eq!(check.offsets[0], None);
        assert!(!check.is_legal());
    }

    #[test]
    #[should_panic]
    fn test_applying_illegal_move_panics() {
        let mut board = row_board([1, 1, 0, 0]);
        let check = check_move(&board, Direction::Left);
        apply_move(&mut board, &check);
    }

    #[test]
    fn test_shift_is_one_cell() {
        let (board, report) = moved(&row_board([0, 0, 1, 0]), Direction::Left);
        assert_eq!(board.rows().next().unwrap(), &[0, 1, 0, 0]);
        assert_eq!(report.moved, 1);
        assert_eq!(report.merges, 0);
    }

    #[test]
    fn test_cascade_behind_merge() {
        // 3+3 merge at the wall, the rest of the line follows one cell
        let (board, report) = moved(&row_board([3, 3, 2, 1]), Direction::Left);
        assert_eq!(board.rows().next().unwrap(), &[6, 2, 1, 0]);
        assert_eq!(report.merges, 1);
        assert_eq!(report.moved, 3);
    }

    #[test]
    fn test_only_first_contact_merges() {
        let (board, report) = moved(&row_board([6, 3, 3, 3]), Direction::Left);
        assert_eq!(board.rows().next().unwrap(), &[6, 6, 3, 0]);
        assert_eq!(report.merges, 1);
    }

    #[test]
    fn test_right_move_offsets_are_columns() {
        let board = row_board([0, 1, 2, 0]);
        let check = check_move(&board, Direction::Right);
        // Column 2 steps into empty column 3
        assert_eq!(check.offsets[0], Some(2));
        let (board, _) = moved(&board, Direction::Right);
        assert_eq!(board.rows().next().unwrap(), &[0, 0, 1, 2]);
    }

    #[test]
    fn test_vertical_moves() {
        let board = Board::from_rows([
            [1, 0, 0, 0],
            [2, 0, 0, 0],
            [0, 0, 0, 0],
            [3, 0, 0, 0],
        ]);
        let (up, report) = moved(&board, Direction::Up);
        assert_eq!(up.get(0, 0), 3);
        assert_eq!(up.get(1, 0), 0);
        assert_eq!(up.get(2, 0), 3);
        assert_eq!(up.get(3, 0), 0);
        assert_eq!(report.merges, 1);

        let (down, _) = moved(&board, Direction::Down);
        assert_eq!(down.get(0, 0), 0);
        assert_eq!(down.get(1, 0), 1);
        assert_eq!(down.get(2, 0), 2);
        assert_eq!(down.get(3, 0), 3);
    }

    #[test]
    fn test_untouched_lines_stay() {
        let board = Board::from_rows([
            [1, 2, 0, 0],
            [3, 6, 12, 24],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        let check = check_move(&board, Direction::Left);
        assert_eq!(check.offsets, vec![Some(1), None, None, None]);
        assert_eq!(check.legal_lines(), 1);
        let (after, _) = moved(&board, Direction::Left);
        assert_eq!(after.rows().nth(1).unwrap(), &[3, 6, 12, 24]);
    }

    #[test]
    fn test_full_stuck_board_has_no_moves() {
        let board = Board::from_rows([
            [1, 3, 1, 3],
            [3, 1, 3, 1],
            [1, 3, 1, 3],
            [3, 1, 3, 1],
        ]);
        assert!(legal_directions(&board).is_empty());
    }

    #[test]
    fn test_other_board_sizes() {
        let board = Board::from_rows([[0, 0, 0, 0, 0], [0; 5], [0; 5], [0; 5], [3, 3, 3, 0, 1]]);
        let (after, report) = moved(&board, Direction::Left);
        assert_eq!(after.rows().nth(4).unwrap(), &[6, 3, 0, 1, 0]);
        assert_eq!(report.merges, 1);
    }

    fn arb_board() -> impl Strategy<Value = Board> {
        prop::collection::vec(prop::sample::select(vec![0u32, 0, 1, 2, 3, 6, 12]), 16).prop_map(
            |cells| {
                let mut board = Board::new(4);
                for (i, code) in cells.into_iter().enumerate() {
                    board.set(i / 4, i % 4, code);
                }
                board
            },
        )
    }

    fn line(board: &Board, direction: Direction, line: usize) -> Vec<u32> {
        (0..board.size())
            .map(|depth| {
                let (r, c) = direction.cell(board.size(), line, depth);
                board.get(r, c)
            })
            .collect()
    }

    proptest! {
        #[test]
        fn prop_illegal_lines_are_untouched(board in arb_board(), d in 0u8..4) {
            let direction = Direction::try_from(d).unwrap();
            let check = check_move(&board, direction);
            if check.is_legal() {
                let mut after = board.clone();
                apply_move(&mut after, &check);
                for (i, offset) in check.offsets.iter().enumerate() {
                    if offset.is_none() {
                        prop_assert_eq!(line(&board, direction, i), line(&after, direction, i));
                    }
                }
            }
        }

        #[test]
        fn prop_tile_count_drops_by_merges(board in arb_board(), d in 0u8..4) {
            let direction = Direction::try_from(d).unwrap();
            let check = check_move(&board, direction);
            prop_assume!(check.is_legal());
            let mut after = board.clone();
            let report = apply_move(&mut after, &check);
            prop_assert_eq!(after.tile_count() + report.merges, board.tile_count());
            prop_assert!(report.merges <= check.legal_lines());
            prop_assert!(after != board);
        }
    }
}
