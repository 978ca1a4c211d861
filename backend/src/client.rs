use common::codec::{self, CodecError};
use common::messages::ServerCommand;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Error, Debug)]
pub enum SendError {
    #[error("Error sending message: connection is closed")]
    Closed,
    #[error(transparent)]
    Codec(#[from] CodecError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Frame(String),
    Close,
}

#[derive(Debug, Clone)]
pub struct Sender(pub mpsc::UnboundedSender<Outbound>);

impl Sender {
    pub fn send(&self, command: &ServerCommand) -> Result<(), SendError> {
        let frame = codec::encode(command)?;
        self.0.send(Outbound::Frame(frame)).map_err(|_| SendError::Closed)
    }

    pub fn close(&self) -> Result<(), SendError> {
        self.0.send(Outbound::Close).map_err(|_| SendError::Closed)
    }
}
