// Chat session - per-dialog-mount orchestration of store, feedback and flows

pub mod delivery;

use std::collections::HashMap;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::DialogConfig;
use crate::error::ChatError;
use crate::feedback::{ChoiceOutcome, FeedbackFlow};
use crate::flows::{
    FlowKind, FlowTurn, GuidedFlow, SUMMARY_DONE_RESPONSE, SUMMARY_MORE_HELP_RESPONSE,
    SUMMARY_SUGGESTIONS,
};
use crate::models::{FeedbackRating, Message, MessagePatch};
use crate::responder::{classify_council, wants_proposal, CannedResponder, ResponseProvider};
use crate::store::MessageStore;

// ============================================================================
// Pending Reply
// ============================================================================

/// A bot reply prepared by `send_message`, to be appended after the
/// simulated typing delay. Carries the session generation it was created
/// under; `complete_reply` drops it if the session was closed meanwhile.
#[derive(Debug, Clone)]
pub struct PendingReply {
    message: Message,
    delay: Duration,
    generation: u64,
}

impl PendingReply {
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn message(&self) -> &Message {
        &self.message
    }
}

// ============================================================================
// Chat Session
// ============================================================================

/// One mounted dialog. Owns the message store, per-message feedback flows,
/// the optional guided flow, the response provider and the auth gate.
/// Dropping the session discards everything; nothing persists.
pub struct ChatSession {
    id: String,
    config: DialogConfig,
    store: MessageStore,
    responder: Box<dyn ResponseProvider + Send>,
    rng: StdRng,
    feedback: HashMap<String, FeedbackFlow>,
    guided_flow: Option<GuidedFlow>,
    authenticated: bool,
    typing: bool,
    generation: u64,
    closed: bool,
}

impl ChatSession {
    pub fn new(config: DialogConfig) -> Self {
        let responder = CannedResponder::new(config.response_pool.strings());
        Self::with_responder(config, Box::new(responder))
    }

    /// Deterministic variant for tests: both the pool pick and the repair
    /// reference number derive from the seed.
    pub fn with_seed(config: DialogConfig, seed: u64) -> Self {
        let responder = CannedResponder::with_seed(config.response_pool.strings(), seed);
        let mut session = Self::with_responder(config, Box::new(responder));
        session.rng = StdRng::seed_from_u64(seed);
        session
    }

    /// Swap in a different response backend behind the provider seam.
    pub fn with_responder(
        config: DialogConfig,
        responder: Box<dyn ResponseProvider + Send>,
    ) -> Self {
        let mut session = Self {
            id: uuid::Uuid::new_v4().to_string(),
            config,
            store: MessageStore::new(),
            responder,
            rng: StdRng::from_entropy(),
            feedback: HashMap::new(),
            guided_flow: None,
            authenticated: false,
            typing: false,
            generation: 0,
            closed: false,
        };
        session.seed();
        log::info!("chat session {} created", session.id);
        session
    }

    /// Seed the scripted opening messages. Seeds carry no timestamp and no
    /// feedback affordance; the configured index gets the initial chips.
    fn seed(&mut self) {
        let seeds = self.config.seed_messages.clone();
        for (index, content) in seeds.into_iter().enumerate() {
            let id = self.store.next_id();
            let mut message = Message::bot(id, content, None);
            if self.config.show_suggestions_on_message_index == Some(index)
                && !self.config.initial_suggestions.is_empty()
            {
                message = message.with_suggestions(self.config.initial_suggestions.clone());
            }
            self.store.append(message);
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    pub fn messages(&self) -> &[Message] {
        self.store.all()
    }

    pub fn message(&self, id: &str) -> Option<&Message> {
        self.store.get(id)
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn active_flow(&self) -> Option<FlowKind> {
        self.guided_flow.as_ref().map(|f| f.kind())
    }

    /// Satisfy the auth gate. The gate carries no identity data; it only
    /// unlocks the send affordance.
    pub fn authenticate(&mut self) {
        self.authenticated = true;
    }

    /// Close the dialog. Bumps the generation so replies still pending
    /// delivery are suppressed when they land.
    pub fn close(&mut self) {
        log::info!("chat session {} closed", self.id);
        self.closed = true;
        self.typing = false;
        self.generation += 1;
    }

    // ========================================================================
    // Sending
    // ========================================================================

    /// Append the user's message and prepare the bot's reply. The reply is
    /// returned as a `PendingReply`; the caller delivers it after the delay
    /// (see `delivery::deliver`) via `complete_reply`.
    pub fn send_message(&mut self, content: &str) -> Result<PendingReply, ChatError> {
        if self.closed {
            return Err(ChatError::InvalidTransition("session is closed"));
        }
        if self.config.require_auth && !self.authenticated {
            return Err(ChatError::NotAuthenticated);
        }
        if content.trim().is_empty() {
            return Err(ChatError::EmptyInput);
        }

        let user_id = self.store.next_id();
        self.store
            .append(Message::user(user_id, content, Some(now_hhmm())));

        // Selecting a chip hides it on the message that carried it
        self.hide_matching_suggestions(content);

        let reply = self.prepare_reply(content);
        self.typing = true;

        Ok(PendingReply {
            message: reply,
            delay: Duration::from_millis(self.config.response_delay_ms),
            generation: self.generation,
        })
    }

    /// Land a prepared reply. Returns `None` without appending when the
    /// session was closed after the reply was prepared.
    pub fn complete_reply(&mut self, pending: PendingReply) -> Option<&Message> {
        if pending.generation != self.generation {
            log::debug!(
                "dropping stale reply for session {} (generation {} != {})",
                self.id,
                pending.generation,
                self.generation
            );
            return None;
        }
        self.typing = false;

        let mut message = pending.message;
        message.timestamp = Some(now_hhmm());
        if message.show_feedback {
            self.feedback.insert(
                message.id.clone(),
                FeedbackFlow::new(self.config.option_set, self.config.feedback_text_max_len),
            );
        }
        Some(self.store.append(message))
    }

    /// Selecting a suggestion chip sends its text as a user message. The
    /// chip must currently be on offer.
    pub fn select_suggestion(&mut self, text: &str) -> Result<PendingReply, ChatError> {
        let offered = self.store.all().iter().any(|m| {
            m.suggestions
                .as_ref()
                .map(|s| s.iter().any(|c| c == text))
                .unwrap_or(false)
        });
        if !offered {
            return Err(ChatError::UnknownOption(text.to_string()));
        }
        self.send_message(text)
    }

    /// Start a guided flow directly. A flow already in progress is a
    /// guarded precondition.
    pub fn start_flow(&mut self, kind: FlowKind) -> Result<PendingReply, ChatError> {
        if self.closed {
            return Err(ChatError::InvalidTransition("session is closed"));
        }
        if self.guided_flow.is_some() {
            return Err(ChatError::InvalidTransition(
                "a guided flow is already active",
            ));
        }
        let flow = GuidedFlow::new(kind);
        let prompt = kind.opening_prompt();
        self.guided_flow = Some(flow);
        self.typing = true;
        Ok(PendingReply {
            message: Message::bot(self.store.next_id(), prompt, None),
            delay: Duration::from_millis(self.config.response_delay_ms),
            generation: self.generation,
        })
    }

    fn hide_matching_suggestions(&mut self, content: &str) {
        let ids: Vec<String> = self
            .store
            .all()
            .iter()
            .filter(|m| {
                m.suggestions
                    .as_ref()
                    .map(|s| s.iter().any(|c| c == content))
                    .unwrap_or(false)
            })
            .map(|m| m.id.clone())
            .collect();
        for id in ids {
            // Ids came from the store; the update cannot miss
            let _ = self.store.update(&id, MessagePatch::clear_suggestions());
        }
    }

    /// Decide what the bot says back. Order mirrors the shipped variants:
    /// summary chips, then the active flow, then variant routing, then the
    /// random pool.
    fn prepare_reply(&mut self, content: &str) -> Message {
        // Summary chips end the flow with a fixed acknowledgement
        if SUMMARY_SUGGESTIONS.contains(&content) {
            self.guided_flow = None;
            let text = if content == "No, I'm good" {
                SUMMARY_DONE_RESPONSE
            } else {
                SUMMARY_MORE_HELP_RESPONSE
            };
            return self.bot_reply(text, self.config.feedback_enabled);
        }

        // An active flow consumes the input as the next field answer. Flow
        // triggers arriving meanwhile are not triggers here; re-entry is
        // guarded.
        if let Some(mut flow) = self.guided_flow.take() {
            if self.is_flow_trigger(content) {
                log::debug!("ignoring flow re-trigger while {} is active", flow.kind());
            }
            let turn = flow.record(content, &mut self.rng);
            return match turn {
                FlowTurn::Prompt(prompt) => {
                    self.guided_flow = Some(flow);
                    self.bot_reply(prompt, false)
                }
                FlowTurn::Summary { text, suggestions } => {
                    // Flow is complete; only the summary chips remain
                    let id = self.store.next_id();
                    Message::bot(id, text, None).with_suggestions(suggestions)
                }
            };
        }

        if self.config.council_routing {
            if let Some(intent) = classify_council(content) {
                return match intent.response() {
                    Some(text) => self.bot_reply(text, self.config.feedback_enabled),
                    None => {
                        // Repair intent opens the guided flow
                        self.guided_flow = Some(GuidedFlow::new(FlowKind::HousingRepair));
                        self.bot_reply(FlowKind::HousingRepair.opening_prompt(), false)
                    }
                };
            }
        }

        if self.config.proposal_keywords && wants_proposal(content) {
            self.guided_flow = Some(GuidedFlow::new(FlowKind::Proposal));
            return self.bot_reply(FlowKind::Proposal.opening_prompt(), false);
        }

        let text = self.responder.respond(content);
        self.bot_reply(&text, self.config.feedback_enabled)
    }

    fn is_flow_trigger(&self, content: &str) -> bool {
        (self.config.council_routing
            && classify_council(content).map(|i| i.response().is_none()) == Some(true))
            || (self.config.proposal_keywords && wants_proposal(content))
    }

    fn bot_reply(&mut self, content: &str, show_feedback: bool) -> Message {
        let id = self.store.next_id();
        let message = Message::bot(id, content, None);
        if show_feedback {
            message.with_feedback()
        } else {
            message
        }
    }

    // ========================================================================
    // Feedback intents
    // ========================================================================

    fn flow_mut(&mut self, message_id: &str) -> Result<&mut FeedbackFlow, ChatError> {
        if !self.config.feedback_enabled {
            return Err(ChatError::FeedbackDisabled);
        }
        if self.store.get(message_id).is_none() {
            return Err(ChatError::UnknownMessage(message_id.to_string()));
        }
        self.feedback
            .get_mut(message_id)
            .ok_or_else(|| ChatError::FeedbackUnavailable(message_id.to_string()))
    }

    /// Thumbs-up / thumbs-down on a bot message. Under the drawer rule any
    /// other open flow is cancelled first.
    pub fn rate_message(
        &mut self,
        message_id: &str,
        rating: FeedbackRating,
    ) -> Result<(), ChatError> {
        if self.config.single_feedback_flow {
            self.cancel_other_open_flows(message_id);
        }
        self.flow_mut(message_id)?.rate(rating)?;
        self.store.update(
            message_id,
            MessagePatch {
                feedback: Some(Some(rating)),
                ..Default::default()
            },
        )?;
        Ok(())
    }

    fn cancel_other_open_flows(&mut self, keep_id: &str) {
        let open: Vec<String> = self
            .feedback
            .iter()
            .filter(|(id, flow)| id.as_str() != keep_id && flow.is_open())
            .map(|(id, _)| id.clone())
            .collect();
        for id in open {
            log::debug!("cancelling open feedback flow on {} (single-flow rule)", id);
            if let Some(flow) = self.feedback.get_mut(&id) {
                let _ = flow.cancel();
            }
            let _ = self.store.update(&id, MessagePatch::reset_feedback());
        }
    }

    /// Pick an option (or sub-option). Auto-submitting choices patch the
    /// message record in place.
    pub fn choose_feedback_option(
        &mut self,
        message_id: &str,
        option_id: &str,
    ) -> Result<ChoiceOutcome, ChatError> {
        let flow = self.flow_mut(message_id)?;
        let outcome = flow.choose_option(option_id)?;
        if outcome == ChoiceOutcome::Submitted {
            let resolved_id = flow
                .resolved()
                .map(|r| r.id.clone())
                .ok_or(ChatError::InvalidTransition("submission without an option"))?;
            self.store.update(
                message_id,
                MessagePatch {
                    feedback_option_id: Some(Some(resolved_id)),
                    feedback_submitted: Some(true),
                    ..Default::default()
                },
            )?;
        }
        Ok(outcome)
    }

    /// Replace the free-text draft for the message's open "other" box.
    pub fn set_feedback_draft(&mut self, message_id: &str, text: &str) -> Result<(), ChatError> {
        self.flow_mut(message_id)?.set_draft(text)
    }

    /// Submit the free-text draft and patch the message record.
    pub fn submit_feedback_text(&mut self, message_id: &str) -> Result<(), ChatError> {
        let flow = self.flow_mut(message_id)?;
        flow.submit_text()?;
        let resolved_id = flow
            .resolved()
            .map(|r| r.id.clone())
            .ok_or(ChatError::InvalidTransition("submission without an option"))?;
        let text = flow.submitted_text().map(|t| t.to_string());
        self.store.update(
            message_id,
            MessagePatch {
                feedback_option_id: Some(Some(resolved_id)),
                custom_feedback_text: Some(text),
                feedback_submitted: Some(true),
                ..Default::default()
            },
        )?;
        Ok(())
    }

    /// Abandon an in-progress feedback flow, re-enabling the thumbs.
    pub fn cancel_feedback(&mut self, message_id: &str) -> Result<(), ChatError> {
        self.flow_mut(message_id)?.cancel()?;
        self.store.update(message_id, MessagePatch::reset_feedback())?;
        Ok(())
    }

    /// Hide the confirmation permanently for this message.
    pub fn dismiss_feedback(&mut self, message_id: &str) -> Result<(), ChatError> {
        self.flow_mut(message_id)?.dismiss()?;
        self.store.update(
            message_id,
            MessagePatch {
                feedback_dismissed: Some(true),
                ..Default::default()
            },
        )?;
        Ok(())
    }

    /// Confirmation text for a submitted flow, if any.
    pub fn feedback_confirmation(&self, message_id: &str) -> Option<&str> {
        self.feedback
            .get(message_id)
            .and_then(|flow| flow.confirmation_text())
    }

    pub fn feedback_flow(&self, message_id: &str) -> Option<&FeedbackFlow> {
        self.feedback.get(message_id)
    }
}

fn now_hhmm() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}

// ============================================================================
// Tests
// ============================================================================
