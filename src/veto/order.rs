use super::VetoGame;
use crate::error::{VetoError, VetoResult};
use crate::types::*;
use rand::seq::SliceRandom;

impl VetoGame {
    /// Shuffle the turn order and open the veto stage.
    ///
    /// Needs at least two participants, all of them with a choice.
    pub fn start_veto(&mut self) -> VetoResult<()> {
        self.require_stage("start_veto", Stage::Input)?;
        self.require_enough_participants()?;

        let missing = self.pending_count();
        if missing > 0 {
            return Err(VetoError::MissingChoices { count: missing });
        }

        self.enter_veto();
        Ok(())
    }

    /// Unchecked hand-off into VETO, shared with the CHOICES stage
    pub(super) fn enter_veto(&mut self) {
        self.shuffle_participants();
        self.live_choices = self
            .participants
            .iter()
            .filter_map(|p| p.choice.clone())
            .collect();
        self.turn_index = 0;
        self.winner = None;
        self.stage = Stage::Veto;
        self.touch();

        tracing::debug!(
            "Veto order: {:?}",
            self.participants.iter().map(|p| &p.name).collect::<Vec<_>>()
        );
    }

    /// Uniform Fisher-Yates permutation of the participants
    pub(super) fn shuffle_participants(&mut self) {
        self.participants.shuffle(&mut self.rng);
    }
}
