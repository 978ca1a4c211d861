use crate::gomoku::board::{Board, IllegalMoveError};
use crate::gomoku::side::Side;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    board: Board,
    current_player: Side,
    finished: bool,
    winner: Option<Side>,
}

impl Default for Game {
    fn default() -> Self {
        Game {
            board: Board::default(),
            current_player: Side::Black,
            finished: false,
            winner: None,
        }
    }
}

impl Game {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Side {
        self.current_player
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    // On error nothing changes, the turn included
    pub fn make_move(&mut self, row: i64, col: i64) -> Result<Option<Side>, IllegalMoveError> {
        if self.finished {
            return Err(IllegalMoveError::GameFinished);
        }
        let player = self.current_player;
        if self.board.apply_move(row, col, player)? {
            self.finished = true;
            self.winner = Some(player);
        }
        self.current_player = player.opponent();
        Ok(self.winner)
    }
}
