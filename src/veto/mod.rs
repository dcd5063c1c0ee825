//! Veto game controller
//!
//! A plain state container walking a group through entering choices and
//! eliminating them turn by turn until one remains. Rendering layers read
//! [`SessionSnapshot`]s and call the transition methods; nothing here knows
//! about sockets or locks.

mod elimination;
mod entry;
mod order;

pub use elimination::VetoOutcome;

use crate::error::{VetoError, VetoResult};
use crate::types::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Whether an input changed the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// Blank or otherwise meaningless input, state untouched
    Ignored,
}

pub struct VetoGame {
    id: GameId,
    version: u64,
    stage: Stage,
    participants: Vec<Participant>,
    turn_index: usize,
    live_choices: Vec<String>,
    winner: Option<String>,
    rng: StdRng,
}

impl VetoGame {
    /// Fresh game with turn order drawn from OS entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Fresh game with reproducible turn order
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            version: 1,
            stage: Stage::Input,
            participants: Vec::new(),
            turn_index: 0,
            live_choices: Vec::new(),
            winner: None,
            rng,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn turn_index(&self) -> usize {
        self.turn_index
    }

    pub fn live_choices(&self) -> &[String] {
        &self.live_choices
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    /// Participant whose turn it is, if the stage has turns
    pub fn current_participant(&self) -> Option<&Participant> {
        match self.stage {
            Stage::Choices | Stage::Veto => self.participants.get(self.turn_index),
            Stage::Input | Stage::Winner => None,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            game_id: self.id.clone(),
            version: self.version,
            stage: self.stage,
            participants: self.participants.clone(),
            turn_index: self.turn_index,
            current_turn: self.current_participant().map(|p| p.name.clone()),
            live_choices: self.live_choices.clone(),
            winner: self.winner.clone(),
        }
    }

    /// Back to an empty INPUT stage. Always succeeds.
    ///
    /// The version keeps counting so clients can drop snapshots from the
    /// previous game.
    pub fn reset(&mut self) {
        self.id = ulid::Ulid::new().to_string();
        self.stage = Stage::Input;
        self.participants.clear();
        self.turn_index = 0;
        self.live_choices.clear();
        self.winner = None;
        self.touch();
    }

    fn touch(&mut self) {
        self.version += 1;
    }

    fn require_stage(&self, action: &'static str, expected: Stage) -> VetoResult<()> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(VetoError::WrongStage {
                action,
                expected,
                actual: self.stage,
            })
        }
    }
}

impl Default for VetoGame {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VetoGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VetoGame")
            .field("id", &self.id)
            .field("version", &self.version)
            .field("stage", &self.stage)
            .field("participants", &self.participants)
            .field("turn_index", &self.turn_index)
            .field("live_choices", &self.live_choices)
            .field("winner", &self.winner)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_is_empty_input() {
        let game = VetoGame::with_seed(1);
        assert_eq!(game.stage(), Stage::Input);
        assert!(game.participants().is_empty());
        assert!(game.live_choices().is_empty());
        assert!(game.winner().is_none());
        assert!(game.current_participant().is_none());
    }

    #[test]
    fn test_reset_from_every_stage() {
        // INPUT with entries
        let mut game = VetoGame::with_seed(7);
        game.add_entry("A", "x").unwrap();
        game.reset();
        assert_eq!(game.stage(), Stage::Input);
        assert!(game.participants().is_empty());

        // CHOICES
        game.add_name("A").unwrap();
        game.add_name("B").unwrap();
        game.begin_choices().unwrap();
        assert_eq!(game.stage(), Stage::Choices);
        game.reset();
        assert_eq!(game.stage(), Stage::Input);
        assert!(game.participants().is_empty());

        // VETO
        game.add_entry("A", "x").unwrap();
        game.add_entry("B", "y").unwrap();
        game.add_entry("C", "z").unwrap();
        game.start_veto().unwrap();
        game.reset();
        assert_eq!(game.stage(), Stage::Input);
        assert!(game.live_choices().is_empty());
        assert_eq!(game.turn_index(), 0);

        // WINNER
        game.add_entry("A", "x").unwrap();
        game.add_entry("B", "y").unwrap();
        game.start_veto().unwrap();
        game.cast_veto("x").unwrap();
        assert_eq!(game.stage(), Stage::Winner);
        game.reset();
        assert_eq!(game.stage(), Stage::Input);
        assert!(game.winner().is_none());
        assert!(game.participants().is_empty());
    }

    #[test]
    fn test_reset_assigns_new_id_and_bumps_version() {
        let mut game = VetoGame::with_seed(3);
        let id = game.id().to_string();
        let version = game.version();

        game.reset();

        assert_ne!(game.id(), id);
        assert_eq!(game.version(), version + 1);
    }

    #[test]
    fn test_snapshot_reports_turn_holder_only_during_turns() {
        let mut game = VetoGame::with_seed(11);
        game.add_entry("A", "x").unwrap();
        game.add_entry("B", "y").unwrap();
        assert!(game.snapshot().current_turn.is_none());

        game.start_veto().unwrap();
        let snap = game.snapshot();
        assert_eq!(snap.stage, Stage::Veto);
        assert_eq!(
            snap.current_turn.as_deref(),
            Some(game.participants()[snap.turn_index].name.as_str())
        );
        assert_eq!(snap.live_choices.len(), 2);
    }
}
