use crate::error::VetoError;
use crate::types::*;
use serde::{Deserialize, Serialize};

pub const PROTOCOL_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Name and choice in one go (INPUT)
    AddEntry {
        name: String,
        choice: String,
    },
    /// Name only, choice collected in CHOICES (INPUT)
    AddName {
        name: String,
    },
    BeginChoices,
    SubmitChoice {
        choice: String,
    },
    StartVeto,
    CastVeto {
        choice: String,
    },
    Reset,
    /// Ask for the current snapshot (e.g. after reconnect)
    RequestState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        protocol: String,
        role: Role,
        session: SessionSnapshot,
        server_now: String,
    },
    /// Current session, broadcast after every applied transition
    Session {
        session: SessionSnapshot,
    },
    /// Broadcast once when the last veto leaves a single choice
    Winner {
        choice: String,
    },
    Error {
        code: String,
        msg: String,
    },
}

impl ServerMessage {
    pub fn error(code: &str, msg: impl Into<String>) -> Self {
        ServerMessage::Error {
            code: code.to_string(),
            msg: msg.into(),
        }
    }
}

impl From<VetoError> for ServerMessage {
    fn from(e: VetoError) -> Self {
        ServerMessage::error(e.code(), e.to_string())
    }
}
