pub mod codec;
pub mod messages;
mod gomoku;

pub use gomoku::{
    Board, BoardPosition, Cell, Coordinate, Game, IllegalMoveError, Side, BOARD_SIZE, WIN_LENGTH,
};
