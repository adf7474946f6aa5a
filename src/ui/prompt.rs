//! Decision prompt
//!
//! The session loop asks a [`DecisionSource`] for each decision. The terminal
//! implementation uses a dialoguer `Select`; tests supply scripted sources.

use crate::models::{Decision, Label, Record};
use crate::state::SessionState;
use crate::Result;
use dialoguer::Select;

/// Prompt entry that ends the session
pub const QUIT_OPTION: &str = "Quit";

/// Provides one decision per record
pub trait DecisionSource {
    /// Ask for a decision on `record`. `Ok(None)` means the annotator quit.
    fn next_decision(&mut self, record: &Record, state: &SessionState)
        -> Result<Option<Decision>>;
}

/// Choices offered for every record, in prompt order: the confirm sentinel
/// first, then each label.
pub fn choices() -> Vec<Decision> {
    std::iter::once(Decision::Confirm)
        .chain(Label::ALL.iter().copied().map(Decision::Relabel))
        .collect()
}

/// Interactive prompt on the controlling terminal
pub struct TerminalPrompt {
    choices: Vec<Decision>,
    items: Vec<&'static str>,
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPrompt {
    pub fn new() -> Self {
        let choices = choices();
        let items = choices
            .iter()
            .map(Decision::display_name)
            .chain(std::iter::once(QUIT_OPTION))
            .collect();
        Self { choices, items }
    }
}

impl DecisionSource for TerminalPrompt {
    fn next_decision(
        &mut self,
        _record: &Record,
        _state: &SessionState,
    ) -> Result<Option<Decision>> {
        // Cursor starts on "No Change" for every record
        let selection = Select::new()
            .with_prompt("Correct Category?")
            .items(&self.items)
            .default(0)
            .interact_opt()
            .map_err(|e| anyhow::anyhow!("Terminal not available: {}", e))?;

        Ok(selection.and_then(|index| self.choices.get(index).copied()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choices_start_with_confirm() {
        let choices = choices();
        assert_eq!(choices.len(), 6);
        assert_eq!(choices[0], Decision::Confirm);
        assert_eq!(choices[1], Decision::Relabel(Label::Person));
        assert_eq!(choices[5], Decision::Relabel(Label::General));
    }

    #[test]
    fn test_terminal_prompt_items() {
        let prompt = TerminalPrompt::new();
        assert_eq!(
            prompt.items,
            vec!["No Change", "person", "place", "quantity", "time", "general", "Quit"]
        );
    }
}
