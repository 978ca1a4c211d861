use crate::gomoku::side::Side;
use std::fmt;
use thiserror::Error;

pub const BOARD_SIZE: usize = 10;
pub const WIN_LENGTH: usize = 5;

// Scan order is significant: the first axis with a winning run decides the winner.
// Horizontal, vertical, "\" and "/".
const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Coordinate {
    Row,
    Col,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::Row => write!(f, "row"),
            Coordinate::Col => write!(f, "col"),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum IllegalMoveError {
    #[error("{coordinate} {value} is outside the board 1..={max}")]
    OutOfBoard {
        coordinate: Coordinate,
        value: i64,
        max: usize,
    },
    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: i64, col: i64 },
    #[error("the game is already finished")]
    GameFinished,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Stone(Side),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

// 0-indexed, always on the board
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoardPosition(usize, usize);

impl BoardPosition {
    pub fn new(row: i64, col: i64) -> Result<Self, IllegalMoveError> {
        Ok(BoardPosition(
            to_index(Coordinate::Row, row)?,
            to_index(Coordinate::Col, col)?,
        ))
    }

    pub fn row(&self) -> usize {
        self.0
    }

    pub fn col(&self) -> usize {
        self.1
    }

    // The position `steps` cells away along (d_row, d_col), if still on the board
    fn step(&self, d_row: isize, d_col: isize, steps: isize) -> Option<BoardPosition> {
        let row = self.0.checked_add_signed(d_row * steps)?;
        let col = self.1.checked_add_signed(d_col * steps)?;
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(BoardPosition(row, col))
    }
}

fn to_index(coordinate: Coordinate, value: i64) -> Result<usize, IllegalMoveError> {
    match usize::try_from(value) {
        Ok(v) if (1..=BOARD_SIZE).contains(&v) => Ok(v - 1),
        _ => Err(IllegalMoveError::OutOfBoard {
            coordinate,
            value,
            max: BOARD_SIZE,
        }),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board([[Cell; BOARD_SIZE]; BOARD_SIZE]);

impl Board {
    pub fn get(&self, pos: BoardPosition) -> Cell {
        self.0[pos.row()][pos.col()]
    }

    pub fn apply_move(&mut self, row: i64, col: i64, player: Side) -> Result<bool, IllegalMoveError> {
        let pos = BoardPosition::new(row, col)?;
        if !self.get(pos).is_empty() {
            return Err(IllegalMoveError::Occupied { row, col });
        }
        self.0[pos.row()][pos.col()] = Cell::Stone(player);
        Ok(self.check_win(row, col).is_some())
    }

    // Exactly WIN_LENGTH wins, scanning at most four cells each way from the stone
    pub fn check_win(&self, row: i64, col: i64) -> Option<Side> {
        let pos = BoardPosition::new(row, col).ok()?;
        let player = match self.get(pos) {
            Cell::Stone(player) => player,
            Cell::Empty => return None,
        };
        AXES.iter()
            .find(|(d_row, d_col)| self.run_length(pos, *d_row, *d_col, player) == WIN_LENGTH)
            .map(|_| player)
    }

    fn run_length(&self, pos: BoardPosition, d_row: isize, d_col: isize, player: Side) -> usize {
        1 + self.count_direction(pos, d_row, d_col, player)
            + self.count_direction(pos, -d_row, -d_col, player)
    }

    fn count_direction(&self, pos: BoardPosition, d_row: isize, d_col: isize, player: Side) -> usize {
        let max_steps = (WIN_LENGTH - 1) as isize;
        (1..=max_steps)
            .map_while(|steps| pos.step(d_row, d_col, steps))
            .take_while(|p| self.get(*p) == Cell::Stone(player))
            .count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.0.iter() {
            writeln!(f, "{}+", "+---".repeat(BOARD_SIZE))?;
            for cell in row.iter() {
                let c = match cell {
                    Cell::Empty => ' ',
                    Cell::Stone(Side::Black) => 'X',
                    Cell::Stone(Side::White) => 'O',
                };
                write!(f, "| {} ", c)?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{}+", "+---".repeat(BOARD_SIZE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place_all(board: &mut Board, stones: &[(i64, i64)], player: Side) {
        for (row, col) in stones {
            assert_eq!(board.apply_move(*row, *col, player), Ok(false));
        }
    }

    #[test]
    fn test_apply_move_on_every_cell() {
        let mut board = Board::default();
        for row in 1..=BOARD_SIZE as i64 {
            for col in 1..=BOARD_SIZE as i64 {
                let player = if (row + col) % 2 == 0 { Side::Black } else { Side::White };
                assert!(board.apply_move(row, col, player).is_ok());
                assert_eq!(
                    board.apply_move(row, col, player),
                    Err(IllegalMoveError::Occupied { row, col })
                );
            }
        }
    }

    #[test]
    fn test_out_of_board_moves() {
        let mut board = Board::default();
        for (row, col) in [(0, 1), (1, 0), (11, 5), (5, 11), (-1, 3), (i64::MAX, 1)] {
            assert!(matches!(
                board.apply_move(row, col, Side::Black),
                Err(IllegalMoveError::OutOfBoard { .. })
            ));
        }
        assert_eq!(
            board.apply_move(3, 0, Side::Black),
            Err(IllegalMoveError::OutOfBoard {
                coordinate: Coordinate::Col,
                value: 0,
                max: BOARD_SIZE,
            })
        );
        assert_eq!(board, Board::default());
    }

    #[test]
    fn test_failed_move_leaves_board_unchanged() {
        let mut board = Board::default();
        board.apply_move(4, 4, Side::Black).unwrap();
        let before = board.clone();
        assert!(board.apply_move(4, 4, Side::White).is_err());
        assert!(board.apply_move(4, 11, Side::White).is_err());
        assert_eq!(board, before);
        assert_eq!(
            board.get(BoardPosition::new(4, 4).unwrap()),
            Cell::Stone(Side::Black)
        );
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::default();
        place_all(&mut board, &[(5, 5), (5, 6), (5, 7), (5, 8)], Side::Black);
        assert_eq!(board.apply_move(5, 9, Side::Black), Ok(true));
        assert_eq!(board.check_win(5, 9), Some(Side::Black));
        assert_eq!(board.check_win(5, 5), Some(Side::Black));
    }

    #[test]
    fn test_vertical_win_at_board_edge() {
        let mut board = Board::default();
        place_all(&mut board, &[(1, 10), (2, 10), (3, 10), (4, 10)], Side::White);
        assert_eq!(board.apply_move(5, 10, Side::White), Ok(true));
        assert_eq!(board.check_win(5, 10), Some(Side::White));
    }

    #[test]
    fn test_diagonal_wins() {
        let mut board = Board::default();
        place_all(&mut board, &[(1, 1), (2, 2), (4, 4), (5, 5)], Side::Black);
        assert_eq!(board.apply_move(3, 3, Side::Black), Ok(true));

        let mut board = Board::default();
        place_all(&mut board, &[(6, 1), (5, 2), (4, 3), (3, 4)], Side::White);
        assert_eq!(board.apply_move(2, 5, Side::White), Ok(true));
    }

    #[test]
    fn test_broken_run_does_not_win() {
        let mut board = Board::default();
        place_all(&mut board, &[(5, 5), (5, 6), (5, 7), (5, 8)], Side::Black);
        board.apply_move(5, 9, Side::White).unwrap();
        assert_eq!(board.apply_move(5, 4, Side::Black), Ok(true));

        let mut board = Board::default();
        place_all(&mut board, &[(5, 5), (5, 6), (5, 7)], Side::Black);
        board.apply_move(5, 8, Side::White).unwrap();
        assert_eq!(board.apply_move(5, 9, Side::Black), Ok(false));
        assert_eq!(board.check_win(5, 9), None);
    }

    #[test]
    fn test_overline_does_not_win() {
        let mut board = Board::default();
        place_all(&mut board, &[(2, 1), (2, 2), (2, 3), (2, 5), (2, 6)], Side::Black);
        assert_eq!(board.apply_move(2, 4, Side::Black), Ok(false));
        assert_eq!(board.check_win(2, 4), None);
    }

    #[test]
    fn test_scan_stops_four_cells_out() {
        let mut board = Board::default();
        place_all(&mut board, &[(7, 2), (7, 3), (7, 4), (7, 6), (7, 7)], Side::White);
        assert_eq!(board.apply_move(7, 5, Side::White), Ok(false));
        // Only 7,2..7,5 are within reach of 7,1, so the longer run counts as five
        assert_eq!(board.apply_move(7, 1, Side::White), Ok(true));
    }

    #[test]
    fn test_check_win_on_empty_or_invalid_cell() {
        let board = Board::default();
        assert_eq!(board.check_win(1, 1), None);
        assert_eq!(board.check_win(0, 12), None);
    }

    #[test]
    fn test_board_display() {
        let mut board = Board::default();
        board.apply_move(1, 1, Side::Black).unwrap();
        board.apply_move(1, 2, Side::White).unwrap();
        let rendered = board.to_string();
        assert_eq!(rendered.lines().count(), 2 * BOARD_SIZE + 1);
        assert!(rendered.lines().nth(1).unwrap().starts_with("| X | O |   |"));
    }
}
