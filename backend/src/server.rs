use crate::client::Sender;
use crate::matchmaking::{Games, MatchQueue, Sessions};
use crate::session::{Session, SessionError, SessionId, SessionState};
use common::codec::{self, CodecError, Decoded};
use common::messages::ClientCommand;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub type SharedState = Arc<Mutex<ServerState>>;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub connected: usize,
    pub queued: usize,
    pub games: usize,
}

// Every connection event runs to completion under the lock
#[derive(Debug)]
pub struct ServerState<R: Rng = StdRng> {
    sessions: Sessions,
    games: Games,
    queue: MatchQueue,
    rng: R,
}

impl Default for ServerState {
    fn default() -> Self {
        ServerState::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> ServerState<R> {
    pub fn with_rng(rng: R) -> Self {
        ServerState {
            sessions: Sessions::new(),
            games: Games::new(),
            queue: MatchQueue::default(),
            rng,
        }
    }

    pub fn stats(&self) -> Stats {
        Stats {
            connected: self.sessions.len(),
            queued: self.queue.len(),
            games: self.games.len(),
        }
    }

    #[cfg(test)]
    pub fn session(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn connect(&mut self, peer: SocketAddr, sender: Sender) -> SessionId {
        let id = Uuid::new_v4();
        self.sessions.insert(id, Session::new(id, peer, sender));
        info!("Connection made from {} as {}", peer, id);
        self.queue
            .enqueue_or_pair(id, &mut self.sessions, &mut self.games, &mut self.rng);
        id
    }

    pub fn handle_line(&mut self, id: SessionId, line: &str) {
        debug!("Data received from {}: {}", id, line);
        let command = match codec::decode::<ClientCommand>(line) {
            Ok(Decoded::Command(command)) => command,
            Ok(Decoded::MissingCommand) => {
                debug!("Ignoring frame without command from {}", id);
                return;
            }
            Ok(Decoded::Unknown(command)) => {
                info!("Invalid command from {}: {}", id, command);
                return;
            }
            Err(err @ CodecError::InvalidParams { .. }) => {
                warn!("Rejecting frame from {}: {}", id, err);
                if let Some(session) = self.sessions.get(&id) {
                    session.send_error("Invalid parameters for move");
                }
                return;
            }
            Err(err) => {
                warn!("Dropping frame from {}: {}", id, err);
                return;
            }
        };

        match command {
            ClientCommand::Move { row, col } => {
                if let Err(err) = self.receive_move_request(id, row, col) {
                    warn!("Move ({}, {}) from {} rejected: {}", row, col, id, err);
                }
            }
        }
    }

    pub fn receive_move_request(
        &mut self,
        id: SessionId,
        row: i64,
        col: i64,
    ) -> Result<(), SessionError> {
        let session = self
            .sessions
            .get(&id)
            .ok_or(SessionError::UnknownSession(id))?;
        let pairing = match (session.state(), session.pairing()) {
            (SessionState::MakingMove, Some(pairing)) => pairing,
            _ => {
                session.send_error(SessionError::OutOfTurn.to_string());
                return Err(SessionError::OutOfTurn);
            }
        };
        if !self.sessions.contains_key(&pairing.opponent) {
            return Err(SessionError::PeerLost);
        }
        let game = self
            .games
            .get_mut(&pairing.game)
            .ok_or(SessionError::PeerLost)?;

        let winner = match game.make_move(row, col) {
            Ok(winner) => winner,
            Err(err) => {
                session.send_error(format!("Invalid move ({}, {}): {}", row, col, err));
                return Err(err.into());
            }
        };
        info!("{} ({}) played ({}, {})", id, pairing.side, row, col);
        if let Some(winner) = winner {
            info!("Game {} won by {}", pairing.game, winner);
            debug!("Final board of game {}:\n{}", pairing.game, game.board());
        }

        let [mover, opponent] = self
            .sessions
            .get_many_mut([&id, &pairing.opponent])
            .ok_or(SessionError::PeerLost)?;
        mover.move_made(row, col, winner, SessionState::AwaitingMove);
        opponent.move_made(row, col, winner, SessionState::MakingMove);
        Ok(())
    }

    pub fn disconnect(&mut self, id: SessionId) {
        self.queue.remove(&id);
        let session = match self.sessions.remove(&id) {
            Some(session) => session,
            None => return,
        };
        info!("Connection lost from {} ({})", session.peer(), id);

        let pairing = match session.pairing() {
            Some(pairing) => pairing,
            None => return,
        };
        match self.sessions.get_mut(&pairing.opponent) {
            Some(opponent) if session.state() != SessionState::Finished => {
                info!("Ending game {}, {} lost its opponent", pairing.game, opponent.id());
                opponent.opponent_connection_lost();
            }
            Some(_) => {}
            None => {
                self.games.remove(&pairing.game);
                debug!("Game {} discarded", pairing.game);
            }
        }
    }
}
