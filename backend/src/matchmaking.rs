use crate::session::{GameId, Session, SessionId, SessionState};
use common::messages::ServerCommand;
use common::{Game, Side};
use hashbrown::HashMap;
use rand::Rng;
use std::collections::VecDeque;
use tracing::{info, warn};
use uuid::Uuid;

pub type Sessions = HashMap<SessionId, Session>;
pub type Games = HashMap<GameId, Game>;

// Oldest first. A session is queued exactly as long as it is in `AwaitingOpponent`.
#[derive(Debug, Default)]
pub struct MatchQueue(VecDeque<SessionId>);

impl MatchQueue {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.0.contains(id)
    }

    pub fn enqueue_or_pair<R: Rng>(
        &mut self,
        id: SessionId,
        sessions: &mut Sessions,
        games: &mut Games,
        rng: &mut R,
    ) -> Option<GameId> {
        if !sessions.contains_key(&id) {
            warn!("Session {} is not connected, not queueing it", id);
            return None;
        }
        if self.contains(&id) {
            warn!("Session {} is already waiting for an opponent", id);
            return None;
        }
        while let Some(opponent_id) = self.0.pop_front() {
            let [session, opponent] = match sessions.get_many_mut([&id, &opponent_id]) {
                Some(pair) => pair,
                None => {
                    warn!("Dropping stale queue entry {}", opponent_id);
                    continue;
                }
            };
            if opponent.state() != SessionState::AwaitingOpponent {
                warn!("Dropping queue entry {} in state {:?}", opponent_id, opponent.state());
                continue;
            }

            let game_id = Uuid::new_v4();
            games.insert(game_id, Game::default());
            let (side, opponent_side) = if rng.gen_bool(0.5) {
                (Side::Black, Side::White)
            } else {
                (Side::White, Side::Black)
            };
            session.start_game(game_id, opponent_id, side);
            opponent.start_game(game_id, id, opponent_side);
            info!(
                "Game {} started: {} ({}) vs {} ({})",
                game_id,
                id,
                side,
                opponent_id,
                opponent_side
            );
            return Some(game_id);
        }

        self.0.push_back(id);
        if let Some(session) = sessions.get(&id) {
            session.send(ServerCommand::AwaitingOpponent);
        }
        info!("{} is waiting for an opponent", id);
        None
    }

    pub fn remove(&mut self, id: &SessionId) -> bool {
        match self.0.iter().position(|queued| queued == id) {
            Some(idx) => {
                self.0.remove(idx);
                true
            }
            None => false,
        }
    }
}
