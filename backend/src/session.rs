use crate::client::Sender;
use common::messages::ServerCommand;
use common::{IllegalMoveError, Side};
use std::net::SocketAddr;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

pub type SessionId = Uuid;
pub type GameId = Uuid;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("It's not your turn!")]
    OutOfTurn,
    #[error("Invalid move: {0}")]
    IllegalMove(#[from] IllegalMoveError),
    #[error("Opponent connection lost")]
    PeerLost,
    #[error("Session {0} is not connected")]
    UnknownSession(SessionId),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    AwaitingOpponent,
    MakingMove,
    AwaitingMove,
    Finished,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub game: GameId,
    // Handle into the session registry, the opponent may already be gone
    pub opponent: SessionId,
    pub side: Side,
}

#[derive(Debug)]
pub struct Session {
    id: SessionId,
    peer: SocketAddr,
    state: SessionState,
    pairing: Option<Pairing>,
    sender: Sender,
}

impl Session {
    pub fn new(id: SessionId, peer: SocketAddr, sender: Sender) -> Self {
        Session {
            id,
            peer,
            state: SessionState::AwaitingOpponent,
            pairing: None,
            sender,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn pairing(&self) -> Option<Pairing> {
        self.pairing
    }

    pub fn send(&self, command: ServerCommand) {
        // The connection task may already be shutting down, there is nobody left to tell
        if let Err(err) = self.sender.send(&command) {
            warn!("Failed to send {:?} to {}: {}", command, self.id, err);
        }
    }

    pub fn send_error(&self, message: impl Into<String>) {
        self.send(ServerCommand::Error {
            message: message.into(),
        });
    }

    pub fn start_game(&mut self, game: GameId, opponent: SessionId, side: Side) {
        self.pairing = Some(Pairing {
            game,
            opponent,
            side,
        });
        self.state = match side {
            Side::Black => SessionState::MakingMove,
            Side::White => SessionState::AwaitingMove,
        };
        self.send(ServerCommand::Started { side });
    }

    pub fn move_made(&mut self, row: i64, col: i64, winner: Option<Side>, next_state: SessionState) {
        self.send(ServerCommand::Move { row, col, winner });
        self.state = if winner.is_some() {
            SessionState::Finished
        } else {
            next_state
        };
    }

    pub fn opponent_connection_lost(&mut self) {
        self.state = SessionState::Finished;
        self.send(ServerCommand::OpponentDisconnected);
        if let Err(err) = self.sender.close() {
            warn!("Failed to close connection of {}: {}", self.id, err);
        }
    }
}
