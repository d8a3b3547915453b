// Guided-form flows - scripted multi-turn data collection inside the chat

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Chips attached to every flow summary message.
pub const SUMMARY_SUGGESTIONS: [&str; 2] = ["No, I'm good", "I still need help"];

/// Acknowledgement for the "No, I'm good" summary chip.
pub const SUMMARY_DONE_RESPONSE: &str = "Thanks for taking the time to chat.";

/// Acknowledgement for the "I still need help" summary chip.
pub const SUMMARY_MORE_HELP_RESPONSE: &str = "How can I help with your council-related query?";

// ============================================================================
// Flow Kind
// ============================================================================

/// Which scripted collection sequence is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    /// Name → Email → Phone → Summary
    Proposal,
    /// Name → Email → Phone → Location → Noticed → Summary
    #[serde(rename = "housing_repair")]
    HousingRepair,
}

impl FlowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowKind::Proposal => "proposal",
            FlowKind::HousingRepair => "housing_repair",
        }
    }

    /// Scripted bot message that opens the flow and asks for the first field.
    pub fn opening_prompt(&self) -> &'static str {
        match self {
            FlowKind::Proposal => {
                "Great! I'd be happy to help you request a proposal. Let's get started with a few details. First, could you please tell me your full name?"
            }
            FlowKind::HousingRepair => {
                "I can help you report a housing repair. Let's get started with some details. First, could you please tell me your full name?"
            }
        }
    }
}

impl std::fmt::Display for FlowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Steps and captured fields
// ============================================================================

/// The field currently being collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStep {
    Name,
    Email,
    Phone,
    Location,
    Noticed,
}

/// Raw user answers, stored verbatim. The chat-embedded flow performs no
/// format validation (the standalone sales form does).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub noticed: Option<String>,
}

/// What the flow produced for one user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowTurn {
    /// The next scripted prompt, as bot-message text
    Prompt(&'static str),
    /// The flow finished; emit this summary with the follow-up chips
    Summary {
        text: String,
        suggestions: Vec<String>,
    },
}

// ============================================================================
// Guided Flow
// ============================================================================

/// One active scripted collection sequence. Created on trigger, consumed on
/// completion; each user turn stores the raw input and yields the next prompt
/// or the closing summary.
#[derive(Debug, Clone)]
pub struct GuidedFlow {
    kind: FlowKind,
    step: FlowStep,
    fields: FlowFields,
}

impl GuidedFlow {
    pub fn new(kind: FlowKind) -> Self {
        log::debug!("guided flow started: {}", kind);
        Self {
            kind,
            step: FlowStep::Name,
            fields: FlowFields::default(),
        }
    }

    pub fn kind(&self) -> FlowKind {
        self.kind
    }

    pub fn step(&self) -> FlowStep {
        self.step
    }

    pub fn fields(&self) -> &FlowFields {
        &self.fields
    }

    /// Store the raw answer for the current step and advance. Returns the
    /// next scripted prompt, or the summary when the last field lands.
    pub fn record<R: Rng>(&mut self, input: &str, rng: &mut R) -> FlowTurn {
        match (self.kind, self.step) {
            (FlowKind::Proposal, FlowStep::Name) => {
                self.fields.name = Some(input.to_string());
                self.step = FlowStep::Email;
                FlowTurn::Prompt(
                    "Thanks! Now, could you please provide your email address so we can send you the proposal?",
                )
            }
            (FlowKind::Proposal, FlowStep::Email) => {
                self.fields.email = Some(input.to_string());
                self.step = FlowStep::Phone;
                FlowTurn::Prompt("Finally, what's your phone number?")
            }
            (FlowKind::Proposal, FlowStep::Phone) => {
                self.fields.phone = Some(input.to_string());
                self.summary(rng)
            }
            (FlowKind::HousingRepair, FlowStep::Name) => {
                self.fields.name = Some(input.to_string());
                self.step = FlowStep::Email;
                FlowTurn::Prompt(
                    "Thanks! Now, could you please provide your email address so we can send you updates about your repair?",
                )
            }
            (FlowKind::HousingRepair, FlowStep::Email) => {
                self.fields.email = Some(input.to_string());
                self.step = FlowStep::Phone;
                FlowTurn::Prompt(
                    "Great! What's your phone number so we can contact you about the repair if needed?",
                )
            }
            (FlowKind::HousingRepair, FlowStep::Phone) => {
                self.fields.phone = Some(input.to_string());
                self.step = FlowStep::Location;
                FlowTurn::Prompt(
                    "Please tell me where in your home the issue is located (e.g., kitchen, bathroom, bedroom).",
                )
            }
            (FlowKind::HousingRepair, FlowStep::Location) => {
                self.fields.location = Some(input.to_string());
                self.step = FlowStep::Noticed;
                FlowTurn::Prompt("When did you first notice this issue?")
            }
            (FlowKind::HousingRepair, FlowStep::Noticed) => {
                self.fields.noticed = Some(input.to_string());
                self.summary(rng)
            }
            // Proposal never advances into the repair-only steps; fall
            // through to the summary rather than panic
            (FlowKind::Proposal, FlowStep::Location | FlowStep::Noticed) => self.summary(rng),
        }
    }

    fn summary<R: Rng>(&self, rng: &mut R) -> FlowTurn {
        let fields = &self.fields;
        let missing = String::new;
        let text = match self.kind {
            FlowKind::Proposal => format!(
                "Thank you for providing all the information! Here's what I have:\n\nName: {}\nEmail: {}\nPhone: {}\n\nIs there anything else I can help you with?",
                fields.name.clone().unwrap_or_else(missing),
                fields.email.clone().unwrap_or_else(missing),
                fields.phone.clone().unwrap_or_else(missing),
            ),
            FlowKind::HousingRepair => {
                let reference: u32 = rng.gen_range(0..10000);
                format!(
                    "Thank you for providing all the information about your repair request. Here's a summary:\n\nName: {}\nEmail: {}\nPhone: {}\nLocation: {}\nWhen noticed: {}\n\nYour repair request has been submitted with reference number REP-{:04}. A member of our repairs team will contact you within 2 working days.\n\nIs there anything else I can help you with?",
                    fields.name.clone().unwrap_or_else(missing),
                    fields.email.clone().unwrap_or_else(missing),
                    fields.phone.clone().unwrap_or_else(missing),
                    fields.location.clone().unwrap_or_else(missing),
                    fields.noticed.clone().unwrap_or_else(missing),
                    reference,
                )
            }
        };
        FlowTurn::Summary {
            text,
            suggestions: SUMMARY_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
