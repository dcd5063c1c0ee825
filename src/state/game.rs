use super::AppState;
use crate::error::VetoResult;
use crate::protocol::ServerMessage;
use crate::types::*;
use crate::veto::{Outcome, VetoGame, VetoOutcome};

impl AppState {
    /// Get the current session snapshot
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.game.read().await.snapshot()
    }

    /// Run one transition under the write lock and broadcast the new
    /// snapshot if anything changed.
    ///
    /// Broadcasts are sent before the guard is released so clients see
    /// snapshots in version order.
    async fn apply<T>(
        &self,
        transition: impl FnOnce(&mut VetoGame) -> VetoResult<T>,
    ) -> VetoResult<(T, SessionSnapshot)> {
        let mut game = self.game.write().await;
        let before = game.version();
        let result = transition(&mut *game)?;
        let snapshot = game.snapshot();

        if snapshot.version != before {
            self.broadcast_to_all(ServerMessage::Session {
                session: snapshot.clone(),
            });
            if let (Stage::Winner, Some(winner)) = (snapshot.stage, &snapshot.winner) {
                self.broadcast_to_all(ServerMessage::Winner {
                    choice: winner.clone(),
                });
            }
        }
        drop(game);

        Ok((result, snapshot))
    }

    pub async fn add_entry(&self, name: &str, choice: &str) -> VetoResult<Outcome> {
        let (outcome, session) = self.apply(|g| g.add_entry(name, choice)).await?;
        if outcome == Outcome::Applied {
            tracing::info!("Entry added ({} participants)", session.participants.len());
        }
        Ok(outcome)
    }

    pub async fn add_name(&self, name: &str) -> VetoResult<Outcome> {
        let (outcome, session) = self.apply(|g| g.add_name(name)).await?;
        if outcome == Outcome::Applied {
            tracing::info!("Name added ({} participants)", session.participants.len());
        }
        Ok(outcome)
    }

    pub async fn begin_choices(&self) -> VetoResult<()> {
        let (_, session) = self.apply(VetoGame::begin_choices).await?;
        tracing::info!(
            "Collecting choices, first up: {:?}",
            session.current_turn.as_deref()
        );
        Ok(())
    }

    pub async fn submit_choice(&self, choice: &str) -> VetoResult<Outcome> {
        let (outcome, session) = self.apply(|g| g.submit_choice(choice)).await?;
        if outcome == Outcome::Applied && session.stage == Stage::Veto {
            tracing::info!(
                "All choices in, veto started with {} options",
                session.live_choices.len()
            );
        }
        Ok(outcome)
    }

    pub async fn start_veto(&self) -> VetoResult<()> {
        let (_, session) = self.apply(VetoGame::start_veto).await?;
        tracing::info!(
            "Veto started with {} options",
            session.live_choices.len()
        );
        Ok(())
    }

    pub async fn cast_veto(&self, choice: &str) -> VetoResult<VetoOutcome> {
        let (outcome, session) = self.apply(|g| g.cast_veto(choice)).await?;
        match &outcome {
            VetoOutcome::Winner(winner) => {
                tracing::info!("Winner decided: {}", winner);
            }
            VetoOutcome::NextTurn { .. } => {
                tracing::info!(
                    "Vetoed {:?}, {} left, next: {:?}",
                    choice,
                    session.live_choices.len(),
                    session.current_turn.as_deref()
                );
            }
            VetoOutcome::NotLive => {
                tracing::debug!("Veto for {:?} did not match a live choice", choice);
            }
        }
        Ok(outcome)
    }

    /// Reset to an empty INPUT stage
    pub async fn reset(&self) -> SessionSnapshot {
        let mut game = self.game.write().await;
        game.reset();
        let snapshot = game.snapshot();
        self.broadcast_to_all(ServerMessage::Session {
            session: snapshot.clone(),
        });
        drop(game);

        tracing::info!("Game reset, new id {}", snapshot.game_id);
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VetoError;

    #[tokio::test]
    async fn test_applied_transition_broadcasts_snapshot() {
        let state = AppState::with_seed(1);
        let mut rx = state.broadcast.subscribe();

        state.add_entry("Alice", "pizza").await.unwrap();

        match rx.try_recv().unwrap() {
            ServerMessage::Session { session } => {
                assert_eq!(session.participants.len(), 1);
                assert_eq!(session.stage, Stage::Input);
            }
            other => panic!("Expected Session, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_ignored_input_does_not_broadcast() {
        let state = AppState::with_seed(1);
        let mut rx = state.broadcast.subscribe();

        let outcome = state.add_entry("  ", "pizza").await.unwrap();

        assert_eq!(outcome, Outcome::Ignored);
        assert!(rx.try_recv().is_err());
        assert!(state.snapshot().await.participants.is_empty());
    }

    #[tokio::test]
    async fn test_failed_transition_does_not_broadcast() {
        let state = AppState::with_seed(1);
        let mut rx = state.broadcast.subscribe();

        let err = state.start_veto().await.unwrap_err();

        assert!(matches!(err, VetoError::NotEnoughParticipants { .. }));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_winner_is_broadcast_after_session() {
        let state = AppState::with_seed(5);
        state.add_entry("A", "x").await.unwrap();
        state.add_entry("B", "y").await.unwrap();
        state.start_veto().await.unwrap();
        let mut rx = state.broadcast.subscribe();

        let outcome = state.cast_veto("y").await.unwrap();
        assert_eq!(outcome, VetoOutcome::Winner("x".to_string()));

        match rx.try_recv().unwrap() {
            ServerMessage::Session { session } => {
                assert_eq!(session.stage, Stage::Winner);
                assert_eq!(session.winner.as_deref(), Some("x"));
            }
            other => panic!("Expected Session, got {:?}", other),
        }
        match rx.try_recv().unwrap() {
            ServerMessage::Winner { choice } => assert_eq!(choice, "x"),
            other => panic!("Expected Winner, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reset_always_broadcasts_empty_input() {
        let state = AppState::with_seed(2);
        state.add_entry("A", "x").await.unwrap();
        state.add_entry("B", "y").await.unwrap();
        state.start_veto().await.unwrap();
        let mut rx = state.broadcast.subscribe();

        let snapshot = state.reset().await;

        assert_eq!(snapshot.stage, Stage::Input);
        assert!(snapshot.participants.is_empty());
        assert!(matches!(
            rx.try_recv().unwrap(),
            ServerMessage::Session { .. }
        ));
    }

    fn broadcast_versions(
        rx: &mut tokio::sync::broadcast::Receiver<ServerMessage>,
    ) -> Vec<u64> {
        let mut versions = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            if let ServerMessage::Session { session } = msg {
                versions.push(session.version);
            }
        }
        versions
    }

    #[tokio::test]
    async fn test_broadcast_versions_increase_across_reset() {
        let state = AppState::with_seed(4);
        let mut rx = state.broadcast.subscribe();

        state.add_entry("A", "x").await.unwrap();
        state.add_entry("B", "y").await.unwrap();
        state.start_veto().await.unwrap();
        state.reset().await;
        state.add_entry("C", "z").await.unwrap();

        let versions = broadcast_versions(&mut rx);
        assert_eq!(versions.len(), 5);
        assert!(versions.windows(2).all(|w| w[0] < w[1]), "{:?}", versions);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_transitions_broadcast_in_version_order() {
        let state = std::sync::Arc::new(AppState::with_seed(6));
        let mut rx = state.broadcast.subscribe();

        let mut tasks = Vec::new();
        for i in 0..40 {
            let state = state.clone();
            tasks.push(tokio::spawn(async move {
                if i % 10 == 9 {
                    state.reset().await;
                } else {
                    let name = format!("p{i}");
                    state.add_entry(&name, "x").await.unwrap();
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let versions = broadcast_versions(&mut rx);
        assert_eq!(versions.len(), 40);
        assert!(versions.windows(2).all(|w| w[0] < w[1]), "{:?}", versions);
    }

    #[tokio::test]
    async fn test_two_step_flow_through_state() {
        let state = AppState::with_seed(8);
        for name in ["A", "B", "C"] {
            state.add_name(name).await.unwrap();
        }
        state.begin_choices().await.unwrap();

        for choice in ["x", "y", "z"] {
            state.submit_choice(choice).await.unwrap();
        }

        let session = state.snapshot().await;
        assert_eq!(session.stage, Stage::Veto);
        assert_eq!(session.live_choices.len(), 3);
    }
}
