use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

pub const COMMAND_FIELD: &str = "command";

pub trait Command: Serialize + DeserializeOwned {
    const NAMES: &'static [&'static str];
}

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Malformed frame: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("Frame is not a JSON object")]
    NotAnObject,
    #[error("Invalid parameters for {command}: {source}")]
    InvalidParams {
        command: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to encode command: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Decoded<C> {
    Command(C),
    // No string `command` field
    MissingCommand,
    Unknown(String),
}

pub fn decode<C: Command>(line: &str) -> Result<Decoded<C>, CodecError> {
    let value: Value = serde_json::from_str(line.trim_end_matches(['\r', '\n']))
        .map_err(CodecError::Malformed)?;
    let object: Map<String, Value> = match value {
        Value::Object(object) => object,
        _ => return Err(CodecError::NotAnObject),
    };
    let command = match object.get(COMMAND_FIELD) {
        Some(Value::String(command)) => command.clone(),
        _ => return Ok(Decoded::MissingCommand),
    };
    if !C::NAMES.contains(&command.as_str()) {
        return Ok(Decoded::Unknown(command));
    }
    serde_json::from_value(Value::Object(object))
        .map(Decoded::Command)
        .map_err(|source| CodecError::InvalidParams { command, source })
}

pub fn encode<C: Command>(command: &C) -> Result<String, CodecError> {
    let mut frame = serde_json::to_string(command).map_err(CodecError::Encode)?;
    frame.push('\n');
    Ok(frame)
}
