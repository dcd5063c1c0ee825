use serde::{Deserialize, Serialize};

/// Opaque ID type for a game session
pub type GameId = String;

/// Fewest participants a veto round can run with
pub const MIN_PARTICIPANTS: usize = 2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Input,
    Choices,
    Veto,
    Winner,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Input => "INPUT",
            Stage::Choices => "CHOICES",
            Stage::Veto => "VETO",
            Stage::Winner => "WINNER",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
    /// None only while a name-first entry waits for the CHOICES stage
    pub choice: Option<String>,
}

impl Participant {
    pub fn new(name: String, choice: String) -> Self {
        Self {
            name,
            choice: Some(choice),
        }
    }

    pub fn pending(name: String) -> Self {
        Self { name, choice: None }
    }

    pub fn has_choice(&self) -> bool {
        self.choice.is_some()
    }
}

/// Read-only copy of a session handed to the rendering layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub game_id: GameId,
    pub version: u64,
    pub stage: Stage,
    pub participants: Vec<Participant>,
    pub turn_index: usize,
    /// Name of whoever acts next (CHOICES and VETO only)
    pub current_turn: Option<String>,
    pub live_choices: Vec<String>,
    pub winner: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Host,
    Display,
}

impl Role {
    /// Parse the `role` query parameter; anything unknown is a host
    pub fn from_query(role: Option<&str>) -> Self {
        match role {
            Some("display") | Some("beamer") => Role::Display,
            _ => Role::Host,
        }
    }

    pub fn can_control(&self) -> bool {
        *self == Role::Host
    }
}
