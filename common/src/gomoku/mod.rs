mod board;
mod game;
mod side;

pub use board::{Board, BoardPosition, Cell, Coordinate, IllegalMoveError, BOARD_SIZE, WIN_LENGTH};
pub use game::Game;
pub use side::Side;
