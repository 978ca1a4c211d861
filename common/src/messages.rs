use crate::codec::Command;
use crate::gomoku::Side;
use serde::{de, Deserialize, Deserializer, Serialize};

pub const NOT_YOUR_TURN: &str = "It's not your turn!";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "command")]
pub enum ServerCommand {
    #[serde(rename = "awaiting opponent")]
    AwaitingOpponent,
    #[serde(rename = "started")]
    Started { side: Side },
    #[serde(rename = "move")]
    Move {
        row: i64,
        col: i64,
        // Only present on the move that ended the game
        #[serde(default, skip_serializing_if = "Option::is_none")]
        winner: Option<Side>,
    },
    #[serde(rename = "error")]
    Error { message: String },
    #[serde(rename = "opponent disconnected")]
    OpponentDisconnected,
}

impl Command for ServerCommand {
    const NAMES: &'static [&'static str] = &[
        "awaiting opponent",
        "started",
        "move",
        "error",
        "opponent disconnected",
    ];
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "command")]
pub enum ClientCommand {
    #[serde(rename = "move")]
    Move {
        #[serde(deserialize_with = "coordinate")]
        row: i64,
        #[serde(deserialize_with = "coordinate")]
        col: i64,
    },
}

impl Command for ClientCommand {
    const NAMES: &'static [&'static str] = &["move"];
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCoordinate {
    Int(i64),
    Text(String),
}

// Terminal clients forward the digits the user typed, so "5" and 5 are the same coordinate
fn coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match RawCoordinate::deserialize(deserializer)? {
        RawCoordinate::Int(value) => Ok(value),
        RawCoordinate::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid coordinate {:?}", text))),
    }
}
