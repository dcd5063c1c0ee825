//! Errors raised by veto game transitions

use crate::types::Stage;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VetoError {
    #[error("{action} is only allowed in the {expected} stage (current: {actual})")]
    WrongStage {
        action: &'static str,
        expected: Stage,
        actual: Stage,
    },

    #[error("at least {required} participants are needed, have {count}")]
    NotEnoughParticipants { required: usize, count: usize },

    #[error("{count} participant(s) still need to enter a choice")]
    MissingChoices { count: usize },

    #[error("every participant already has a choice, start the veto instead")]
    NothingToCollect,
}

impl VetoError {
    /// Stable code sent to clients in `error` messages
    pub fn code(&self) -> &'static str {
        match self {
            VetoError::WrongStage { .. } => "WRONG_STAGE",
            VetoError::NotEnoughParticipants { .. } => "NOT_ENOUGH_PARTICIPANTS",
            VetoError::MissingChoices { .. } => "MISSING_CHOICES",
            VetoError::NothingToCollect => "NOTHING_TO_COLLECT",
        }
    }
}

pub type VetoResult<T> = Result<T, VetoError>;
