//! WebSocket message dispatch
//!
//! Authorization is checked here, then the intent is applied to the shared
//! game. Applied transitions reach every client (sender included) through
//! the broadcast channel, so successful intents produce no direct reply.

use crate::error::VetoError;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;
use crate::types::Role;
use std::sync::Arc;

/// Macro to check control authorization and return early if unauthorized
macro_rules! check_host {
    ($role:expr, $action:expr) => {
        if !$role.can_control() {
            return Some(ServerMessage::error(
                "UNAUTHORIZED",
                format!("Only host can {}", $action),
            ));
        }
    };
}

fn reply<T>(result: Result<T, VetoError>) -> Option<ServerMessage> {
    match result {
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("Rejected intent: {}", e);
            Some(e.into())
        }
    }
}

/// Handle client messages and return optional response
pub async fn handle_message(
    msg: ClientMessage,
    role: &Role,
    state: &Arc<AppState>,
) -> Option<ServerMessage> {
    match msg {
        ClientMessage::RequestState => Some(ServerMessage::Session {
            session: state.snapshot().await,
        }),

        ClientMessage::AddEntry { name, choice } => {
            check_host!(role, "add entries");
            reply(state.add_entry(&name, &choice).await)
        }

        ClientMessage::AddName { name } => {
            check_host!(role, "add names");
            reply(state.add_name(&name).await)
        }

        ClientMessage::BeginChoices => {
            check_host!(role, "collect choices");
            reply(state.begin_choices().await)
        }

        ClientMessage::SubmitChoice { choice } => {
            check_host!(role, "submit choices");
            reply(state.submit_choice(&choice).await)
        }

        ClientMessage::StartVeto => {
            check_host!(role, "start the veto");
            reply(state.start_veto().await)
        }

        ClientMessage::CastVeto { choice } => {
            check_host!(role, "veto");
            reply(state.cast_veto(&choice).await)
        }

        ClientMessage::Reset => {
            check_host!(role, "reset the game");
            state.reset().await;
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Stage;

    #[tokio::test]
    async fn test_display_cannot_control() {
        let state = Arc::new(AppState::with_seed(1));

        let response = handle_message(
            ClientMessage::AddEntry {
                name: "A".to_string(),
                choice: "x".to_string(),
            },
            &Role::Display,
            &state,
        )
        .await;

        match response {
            Some(ServerMessage::Error { code, .. }) => assert_eq!(code, "UNAUTHORIZED"),
            other => panic!("Expected UNAUTHORIZED error, got {:?}", other),
        }
        assert!(state.snapshot().await.participants.is_empty());
    }

    #[tokio::test]
    async fn test_display_can_request_state() {
        let state = Arc::new(AppState::with_seed(1));

        let response = handle_message(ClientMessage::RequestState, &Role::Display, &state).await;

        match response {
            Some(ServerMessage::Session { session }) => assert_eq!(session.stage, Stage::Input),
            other => panic!("Expected Session, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_errors_carry_codes() {
        let state = Arc::new(AppState::with_seed(1));

        let response = handle_message(ClientMessage::StartVeto, &Role::Host, &state).await;
        match response {
            Some(ServerMessage::Error { code, .. }) => assert_eq!(code, "NOT_ENOUGH_PARTICIPANTS"),
            other => panic!("Expected error, got {:?}", other),
        }

        let response = handle_message(
            ClientMessage::CastVeto {
                choice: "x".to_string(),
            },
            &Role::Host,
            &state,
        )
        .await;
        match response {
            Some(ServerMessage::Error { code, .. }) => assert_eq!(code, "WRONG_STAGE"),
            other => panic!("Expected error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_blank_entry_is_silent() {
        let state = Arc::new(AppState::with_seed(1));

        let response = handle_message(
            ClientMessage::AddEntry {
                name: " ".to_string(),
                choice: "x".to_string(),
            },
            &Role::Host,
            &state,
        )
        .await;

        assert!(response.is_none());
        assert!(state.snapshot().await.participants.is_empty());
    }
}
