use super::VetoGame;
use crate::error::VetoResult;
use crate::types::*;

/// Result of a single veto
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VetoOutcome {
    /// Choice removed, play passes to the participant at `turn_index`
    NextTurn { turn_index: usize },
    /// Only one choice left
    Winner(String),
    /// The choice was not live (already vetoed or never entered)
    NotLive,
}

impl VetoGame {
    /// Remove one live occurrence of `choice` on behalf of the current
    /// turn-holder.
    ///
    /// Vetoing something that is not live changes nothing, including whose
    /// turn it is.
    pub fn cast_veto(&mut self, choice: &str) -> VetoResult<VetoOutcome> {
        self.require_stage("cast_veto", Stage::Veto)?;

        let choice = choice.trim();
        let Some(position) = self.live_choices.iter().position(|c| c == choice) else {
            tracing::debug!("Veto for non-live choice {:?} ignored", choice);
            return Ok(VetoOutcome::NotLive);
        };

        self.live_choices.remove(position);

        if let [last] = self.live_choices.as_slice() {
            let winner = last.clone();
            self.winner = Some(winner.clone());
            self.stage = Stage::Winner;
            self.touch();
            return Ok(VetoOutcome::Winner(winner));
        }

        self.turn_index = (self.turn_index + 1) % self.participants.len();
        self.touch();
        Ok(VetoOutcome::NextTurn {
            turn_index: self.turn_index,
        })
    }
}
