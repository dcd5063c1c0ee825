use super::{Outcome, VetoGame};
use crate::error::{VetoError, VetoResult};
use crate::types::*;

/// Trimmed copy of `input`, or None when nothing is left
fn non_blank(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl VetoGame {
    /// Add a participant together with their choice
    pub fn add_entry(&mut self, name: &str, choice: &str) -> VetoResult<Outcome> {
        self.require_stage("add_entry", Stage::Input)?;

        let (Some(name), Some(choice)) = (non_blank(name), non_blank(choice)) else {
            tracing::debug!("Ignoring entry with blank name or choice");
            return Ok(Outcome::Ignored);
        };

        self.participants.push(Participant::new(name, choice));
        self.touch();
        Ok(Outcome::Applied)
    }

    /// Add a participant whose choice is collected later in CHOICES
    pub fn add_name(&mut self, name: &str) -> VetoResult<Outcome> {
        self.require_stage("add_name", Stage::Input)?;

        let Some(name) = non_blank(name) else {
            tracing::debug!("Ignoring blank name");
            return Ok(Outcome::Ignored);
        };

        self.participants.push(Participant::pending(name));
        self.touch();
        Ok(Outcome::Applied)
    }

    /// Close name entry and start asking each pending participant for a choice
    pub fn begin_choices(&mut self) -> VetoResult<()> {
        self.require_stage("begin_choices", Stage::Input)?;
        self.require_enough_participants()?;

        if self.pending_count() == 0 {
            return Err(VetoError::NothingToCollect);
        }

        self.shuffle_participants();
        self.turn_index = self.next_pending().unwrap_or(0);
        self.stage = Stage::Choices;
        self.touch();
        Ok(())
    }

    /// Attach a choice to the current participant in CHOICES.
    ///
    /// Once the last pending participant has chosen, the game moves
    /// straight into VETO.
    pub fn submit_choice(&mut self, choice: &str) -> VetoResult<Outcome> {
        self.require_stage("submit_choice", Stage::Choices)?;

        let Some(choice) = non_blank(choice) else {
            tracing::debug!("Ignoring blank choice");
            return Ok(Outcome::Ignored);
        };

        if let Some(participant) = self.participants.get_mut(self.turn_index) {
            participant.choice = Some(choice);
        }

        match self.next_pending() {
            Some(index) => {
                self.turn_index = index;
                self.touch();
            }
            None => self.enter_veto(),
        }
        Ok(Outcome::Applied)
    }

    pub(super) fn pending_count(&self) -> usize {
        self.participants.iter().filter(|p| !p.has_choice()).count()
    }

    fn next_pending(&self) -> Option<usize> {
        self.participants.iter().position(|p| !p.has_choice())
    }

    pub(super) fn require_enough_participants(&self) -> VetoResult<()> {
        if self.participants.len() < MIN_PARTICIPANTS {
            return Err(VetoError::NotEnoughParticipants {
                required: MIN_PARTICIPANTS,
                count: self.participants.len(),
            });
        }
        Ok(())
    }
}
