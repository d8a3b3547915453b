// Per-message feedback sub-flow state machine

pub mod options;

pub use options::{FeedbackOption, OptionSet, ResolvedOption};

use crate::error::ChatError;
use crate::models::FeedbackRating;

// ============================================================================
// State
// ============================================================================

/// States of the feedback sub-flow for one bot message.
///
/// `Idle → Rated → [SubOptionPending] → [FreeText] → Submitted → Dismissed`
///
/// Non-"other" options without sub-options submit automatically, so
/// "option chosen" never rests as its own state.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedbackState {
    Idle,
    Rated {
        rating: FeedbackRating,
    },
    /// A parent category with sub-options was picked; awaiting the sub-reason
    SubOptionPending {
        rating: FeedbackRating,
        parent_id: String,
    },
    /// The "other" option was picked; awaiting free text
    FreeText {
        rating: FeedbackRating,
        draft: String,
    },
    Submitted {
        rating: FeedbackRating,
        resolved: ResolvedOption,
        custom_text: Option<String>,
    },
    /// Terminal: the confirmation affordance stays hidden permanently
    Dismissed,
}

/// What the caller should show next after an option choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceOutcome {
    /// Show the parent option's sub-option list
    NeedsSubOption,
    /// Show the free-text box ("other")
    NeedsFreeText,
    /// Auto-submitted; show the confirmation
    Submitted,
}

// ============================================================================
// Flow
// ============================================================================

/// Feedback state machine for a single bot message, bound to the variant's
/// option set. The free-text draft is clamped, never rejected, at the
/// configured character cap.
#[derive(Debug, Clone)]
pub struct FeedbackFlow {
    options: OptionSet,
    max_len: usize,
    state: FeedbackState,
}

impl FeedbackFlow {
    pub fn new(options: OptionSet, max_len: usize) -> Self {
        Self {
            options,
            max_len,
            state: FeedbackState::Idle,
        }
    }

    pub fn state(&self) -> &FeedbackState {
        &self.state
    }

    pub fn option_set(&self) -> OptionSet {
        self.options
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn rating(&self) -> Option<FeedbackRating> {
        match &self.state {
            FeedbackState::Idle | FeedbackState::Dismissed => None,
            FeedbackState::Rated { rating }
            | FeedbackState::SubOptionPending { rating, .. }
            | FeedbackState::FreeText { rating, .. }
            | FeedbackState::Submitted { rating, .. } => Some(*rating),
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.state, FeedbackState::Submitted { .. })
    }

    pub fn is_dismissed(&self) -> bool {
        matches!(self.state, FeedbackState::Dismissed)
    }

    /// True while the flow is in an intermediate (pre-submit) state.
    pub fn is_open(&self) -> bool {
        matches!(
            self.state,
            FeedbackState::Rated { .. }
                | FeedbackState::SubOptionPending { .. }
                | FeedbackState::FreeText { .. }
        )
    }

    /// Options to present for the current rating, scoped to a pending
    /// parent's sub-options when one is open.
    pub fn visible_options(&self) -> &'static [FeedbackOption] {
        match &self.state {
            FeedbackState::Rated { rating } => self.options.options_for(*rating),
            FeedbackState::SubOptionPending { rating, parent_id } => self
                .options
                .find(*rating, parent_id)
                .map(|parent| parent.sub_options)
                .unwrap_or(&[]),
            _ => &[],
        }
    }

    /// Thumbs-up / thumbs-down. Only valid from `Idle`.
    pub fn rate(&mut self, rating: FeedbackRating) -> Result<(), ChatError> {
        match self.state {
            FeedbackState::Idle => {
                log::debug!("feedback rated {}", rating);
                self.state = FeedbackState::Rated { rating };
                Ok(())
            }
            _ => Err(ChatError::InvalidTransition("rate requires the idle state")),
        }
    }

    /// Choose an option from the polarity-scoped list, or a sub-option when
    /// one is pending. Non-"other" leaf options submit automatically.
    pub fn choose_option(&mut self, option_id: &str) -> Result<ChoiceOutcome, ChatError> {
        match self.state.clone() {
            FeedbackState::Rated { rating } => {
                let option = self
                    .options
                    .find(rating, option_id)
                    .ok_or_else(|| ChatError::UnknownOption(option_id.to_string()))?;
                if !option.sub_options.is_empty() {
                    self.state = FeedbackState::SubOptionPending {
                        rating,
                        parent_id: option.id.to_string(),
                    };
                    return Ok(ChoiceOutcome::NeedsSubOption);
                }
                if option.id == "other" {
                    self.state = FeedbackState::FreeText {
                        rating,
                        draft: String::new(),
                    };
                    return Ok(ChoiceOutcome::NeedsFreeText);
                }
                let resolved = self
                    .options
                    .resolve(rating, option_id)
                    .ok_or_else(|| ChatError::UnknownOption(option_id.to_string()))?;
                self.state = FeedbackState::Submitted {
                    rating,
                    resolved,
                    custom_text: None,
                };
                Ok(ChoiceOutcome::Submitted)
            }
            FeedbackState::SubOptionPending { rating, parent_id } => {
                let parent = self
                    .options
                    .find(rating, &parent_id)
                    .ok_or_else(|| ChatError::UnknownOption(parent_id.clone()))?;
                let sub = parent
                    .sub_options
                    .iter()
                    .find(|s| s.id == option_id)
                    .ok_or_else(|| ChatError::UnknownOption(option_id.to_string()))?;
                let resolved = ResolvedOption::composite(parent, sub);
                log::debug!("feedback resolved composite option {}", resolved.id);
                self.state = FeedbackState::Submitted {
                    rating,
                    resolved,
                    custom_text: None,
                };
                Ok(ChoiceOutcome::Submitted)
            }
            _ => Err(ChatError::InvalidTransition(
                "choose_option requires a rated state",
            )),
        }
    }

    /// Replace the free-text draft, clamped to the character cap.
    pub fn set_draft(&mut self, text: &str) -> Result<(), ChatError> {
        match &mut self.state {
            FeedbackState::FreeText { draft, .. } => {
                *draft = clamp_chars(text, self.max_len);
                Ok(())
            }
            _ => Err(ChatError::InvalidTransition(
                "set_draft requires the free-text state",
            )),
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match &self.state {
            FeedbackState::FreeText { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Live remaining-character count for the free-text box.
    pub fn remaining_chars(&self) -> Option<usize> {
        self.draft()
            .map(|d| self.max_len.saturating_sub(d.chars().count()))
    }

    /// Submit the free-text draft. Requires non-empty trimmed text.
    pub fn submit_text(&mut self) -> Result<(), ChatError> {
        match self.state.clone() {
            FeedbackState::FreeText { rating, draft } => {
                if draft.trim().is_empty() {
                    return Err(ChatError::EmptyInput);
                }
                let resolved = self
                    .options
                    .resolve(rating, "other")
                    .ok_or_else(|| ChatError::UnknownOption("other".to_string()))?;
                self.state = FeedbackState::Submitted {
                    rating,
                    resolved,
                    custom_text: Some(draft),
                };
                Ok(())
            }
            _ => Err(ChatError::InvalidTransition(
                "submit_text requires the free-text state",
            )),
        }
    }

    /// Abandon an in-progress flow and re-enable the thumbs affordance.
    pub fn cancel(&mut self) -> Result<(), ChatError> {
        match self.state {
            FeedbackState::Idle
            | FeedbackState::Rated { .. }
            | FeedbackState::SubOptionPending { .. }
            | FeedbackState::FreeText { .. } => {
                self.state = FeedbackState::Idle;
                Ok(())
            }
            _ => Err(ChatError::InvalidTransition(
                "cancel is not available after submission",
            )),
        }
    }

    /// Hide the confirmation. Terminal and idempotent.
    pub fn dismiss(&mut self) -> Result<(), ChatError> {
        match self.state {
            FeedbackState::Submitted { .. } | FeedbackState::Dismissed => {
                self.state = FeedbackState::Dismissed;
                Ok(())
            }
            _ => Err(ChatError::InvalidTransition(
                "dismiss requires a submitted state",
            )),
        }
    }

    /// The resolved option once submitted.
    pub fn resolved(&self) -> Option<&ResolvedOption> {
        match &self.state {
            FeedbackState::Submitted { resolved, .. } => Some(resolved),
            _ => None,
        }
    }

    /// Confirmation text shown after submission: the resolved option's
    /// canned response.
    pub fn confirmation_text(&self) -> Option<&str> {
        self.resolved().map(|r| r.response.as_str())
    }

    /// Free text stored with the submission, when the "other" path was taken.
    pub fn submitted_text(&self) -> Option<&str> {
        match &self.state {
            FeedbackState::Submitted { custom_text, .. } => custom_text.as_deref(),
            _ => None,
        }
    }
}

fn clamp_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rated(set: OptionSet, rating: FeedbackRating) -> FeedbackFlow {
        let mut flow = FeedbackFlow::new(set, 180);
        flow.rate(rating).unwrap();
        flow
    }

    #[test]
    fn test_rate_from_idle_only() {
        let mut flow = FeedbackFlow::new(OptionSet::Inline, 180);
        flow.rate(FeedbackRating::Positive).unwrap();
        assert!(flow.rate(FeedbackRating::Negative).is_err());
        assert_eq!(flow.rating(), Some(FeedbackRating::Positive));
    }

    #[test]
    fn test_plain_option_auto_submits() {
        let mut flow = rated(OptionSet::Inline, FeedbackRating::Negative);
        let outcome = flow.choose_option("slow").unwrap();
        assert_eq!(outcome, ChoiceOutcome::Submitted);
        assert!(flow.is_submitted());
        assert_eq!(
            flow.confirmation_text().unwrap(),
            "Sorry for the delay. We're working on improving speed."
        );
    }

    #[test]
    fn test_incorrect_option_confirmation() {
        let mut flow = rated(OptionSet::Inline, FeedbackRating::Negative);
        flow.choose_option("incorrect").unwrap();
        assert_eq!(
            flow.confirmation_text().unwrap(),
            "Apologies for the mistake. We’ll review and improve accuracy."
        );
    }

    #[test]
    fn test_sub_option_resolution() {
        let mut flow = rated(OptionSet::Drawer, FeedbackRating::Negative);
        let outcome = flow.choose_option("technical").unwrap();
        assert_eq!(outcome, ChoiceOutcome::NeedsSubOption);
        assert!(!flow.is_submitted());
        // Only the sub-options are on offer now
        assert_eq!(
            flow.visible_options()
                .iter()
                .map(|o| o.id)
                .collect::<Vec<_>>(),
            vec!["error", "no_response"]
        );

        let outcome = flow.choose_option("error").unwrap();
        assert_eq!(outcome, ChoiceOutcome::Submitted);

        let resolved = flow.resolved().unwrap();
        assert_eq!(resolved.id, "technical_error");
        assert_eq!(resolved.label, "Technical issues - Encountered error message");
        // Confirmation uses the sub-option's response, not the parent's
        assert_eq!(
            flow.confirmation_text().unwrap(),
            "We apologize for the error message. Our team will investigate and fix this issue."
        );
    }

    #[test]
    fn test_other_requires_nonempty_trimmed_text() {
        let mut flow = rated(OptionSet::Inline, FeedbackRating::Positive);
        assert_eq!(
            flow.choose_option("other").unwrap(),
            ChoiceOutcome::NeedsFreeText
        );

        assert_eq!(flow.submit_text(), Err(ChatError::EmptyInput));
        flow.set_draft("   ").unwrap();
        assert_eq!(flow.submit_text(), Err(ChatError::EmptyInput));

        flow.set_draft("very helpful answers").unwrap();
        flow.submit_text().unwrap();
        assert!(flow.is_submitted());
        assert_eq!(flow.submitted_text(), Some("very helpful answers"));
        assert_eq!(
            flow.confirmation_text().unwrap(),
            "Thanks for your positive feedback!"
        );
    }

    #[test]
    fn test_draft_clamped_at_cap() {
        let mut flow = FeedbackFlow::new(OptionSet::Inline, 600);
        flow.rate(FeedbackRating::Negative).unwrap();
        flow.choose_option("other").unwrap();

        let long = "x".repeat(601);
        flow.set_draft(&long).unwrap();
        assert_eq!(flow.draft().unwrap().chars().count(), 600);
        assert_eq!(flow.remaining_chars(), Some(0));

        // Exactly at the cap is accepted untouched
        let exact = "y".repeat(600);
        flow.set_draft(&exact).unwrap();
        assert_eq!(flow.draft().unwrap(), exact);
        flow.submit_text().unwrap();
        assert_eq!(flow.submitted_text().unwrap().chars().count(), 600);
    }

    #[test]
    fn test_clamp_is_char_based() {
        let mut flow = FeedbackFlow::new(OptionSet::Inline, 3);
        flow.rate(FeedbackRating::Positive).unwrap();
        flow.choose_option("other").unwrap();
        flow.set_draft("héllo").unwrap();
        assert_eq!(flow.draft().unwrap(), "hél");
    }

    #[test]
    fn test_cancel_resets_to_idle() {
        let mut flow = rated(OptionSet::Inline, FeedbackRating::Negative);
        flow.choose_option("other").unwrap();
        flow.set_draft("some text").unwrap();
        flow.cancel().unwrap();
        assert_eq!(*flow.state(), FeedbackState::Idle);
        assert!(flow.draft().is_none());

        // Thumbs are re-enabled after cancel
        flow.rate(FeedbackRating::Positive).unwrap();
    }

    #[test]
    fn test_cancel_after_submit_is_rejected() {
        let mut flow = rated(OptionSet::Inline, FeedbackRating::Negative);
        flow.choose_option("slow").unwrap();
        assert!(flow.cancel().is_err());
    }

    #[test]
    fn test_dismiss_is_terminal_and_idempotent() {
        let mut flow = rated(OptionSet::Inline, FeedbackRating::Positive);
        flow.choose_option("fast").unwrap();
        flow.dismiss().unwrap();
        assert!(flow.is_dismissed());

        // Second dismissal has no further effect
        flow.dismiss().unwrap();
        assert!(flow.is_dismissed());

        // Nothing else is possible afterwards
        assert!(flow.rate(FeedbackRating::Negative).is_err());
        assert!(flow.choose_option("slow").is_err());
        assert!(flow.cancel().is_err());
    }

    #[test]
    fn test_dismiss_before_submit_is_rejected() {
        let mut flow = rated(OptionSet::Inline, FeedbackRating::Negative);
        assert!(flow.dismiss().is_err());
    }

    #[test]
    fn test_unknown_option_is_error() {
        let mut flow = rated(OptionSet::Inline, FeedbackRating::Positive);
        assert_eq!(
            flow.choose_option("helpful"),
            Err(ChatError::UnknownOption("helpful".to_string()))
        );
    }
}
