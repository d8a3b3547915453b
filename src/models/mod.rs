// Chat models - canonical type definitions for dialog messages

use serde::{Deserialize, Serialize};

// ============================================================================
// Message Role Enum
// ============================================================================

/// Enum for chat message roles with compile-time validation.
/// Serializes/deserializes as lowercase strings for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Bot,
}

impl MessageRole {
    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Bot => "bot",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "bot" | "assistant" => Ok(MessageRole::Bot),
            _ => Err(format!(
                "Invalid message role: '{}'. Expected 'user' or 'bot'",
                s
            )),
        }
    }
}

// ============================================================================
// Feedback Rating Enum
// ============================================================================

/// Thumbs-up / thumbs-down polarity attached to a bot message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackRating {
    Positive,
    Negative,
}

impl FeedbackRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackRating::Positive => "positive",
            FeedbackRating::Negative => "negative",
        }
    }
}

impl std::fmt::Display for FeedbackRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FeedbackRating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "positive" => Ok(FeedbackRating::Positive),
            "negative" => Ok(FeedbackRating::Negative),
            _ => Err(format!(
                "Invalid feedback rating: '{}'. Expected 'positive' or 'negative'",
                s
            )),
        }
    }
}

// ============================================================================
// Message
// ============================================================================

/// A single bubble in the dialog. Feedback fields only ever become active on
/// bot messages; seeded messages carry neither timestamp nor feedback
/// affordance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    /// Display text; may contain simple markup (see `render::render_markdown`)
    pub content: String,
    pub role: MessageRole,
    /// `HH:MM` display time; seeded messages omit it
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Whether the thumbs affordance is eligible for this message
    #[serde(default)]
    pub show_feedback: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<FeedbackRating>,
    /// Resolved option id, composite (`parent_sub`) for sub-option choices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_option_id: Option<String>,
    /// Free-text feedback, only meaningful for the "other" option
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_feedback_text: Option<String>,
    #[serde(default)]
    pub feedback_submitted: bool,
    /// Once true, the confirmation affordance stays hidden for this message
    #[serde(default)]
    pub feedback_dismissed: bool,
    /// Follow-up prompt chips, shown only under variant display rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl Message {
    /// Build a user-authored message
    pub fn user(id: impl Into<String>, content: impl Into<String>, timestamp: Option<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            role: MessageRole::User,
            timestamp,
            show_feedback: false,
            feedback: None,
            feedback_option_id: None,
            custom_feedback_text: None,
            feedback_submitted: false,
            feedback_dismissed: false,
            suggestions: None,
        }
    }

    /// Build a bot-authored message; feedback affordance off by default
    pub fn bot(id: impl Into<String>, content: impl Into<String>, timestamp: Option<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            role: MessageRole::Bot,
            timestamp,
            show_feedback: false,
            feedback: None,
            feedback_option_id: None,
            custom_feedback_text: None,
            feedback_submitted: false,
            feedback_dismissed: false,
            suggestions: None,
        }
    }

    pub fn with_feedback(mut self) -> Self {
        self.show_feedback = true;
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = Some(suggestions);
        self
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }

    pub fn is_bot(&self) -> bool {
        self.role == MessageRole::Bot
    }
}

// ============================================================================
// Message Patch
// ============================================================================

/// Partial update applied through `MessageStore::update`. Outer `Option`
/// means "leave unchanged"; the nested `Option` on nullable fields makes
/// clearing expressible.
#[derive(Debug, Clone, Default)]
pub struct MessagePatch {
    pub show_feedback: Option<bool>,
    pub feedback: Option<Option<FeedbackRating>>,
    pub feedback_option_id: Option<Option<String>>,
    pub custom_feedback_text: Option<Option<String>>,
    pub feedback_submitted: Option<bool>,
    pub feedback_dismissed: Option<bool>,
    pub suggestions: Option<Option<Vec<String>>>,
}

impl MessagePatch {
    /// Patch that resets all feedback fields back to the initial thumbs state
    pub fn reset_feedback() -> Self {
        Self {
            feedback: Some(None),
            feedback_option_id: Some(None),
            custom_feedback_text: Some(None),
            feedback_submitted: Some(false),
            ..Default::default()
        }
    }

    /// Patch that removes suggestion chips from a message
    pub fn clear_suggestions() -> Self {
        Self {
            suggestions: Some(None),
            ..Default::default()
        }
    }

    pub fn apply(self, message: &mut Message) {
        if let Some(show_feedback) = self.show_feedback {
            message.show_feedback = show_feedback;
        }
        if let Some(feedback) = self.feedback {
            message.feedback = feedback;
        }
        if let Some(option_id) = self.feedback_option_id {
            message.feedback_option_id = option_id;
        }
        if let Some(text) = self.custom_feedback_text {
            message.custom_feedback_text = text;
        }
        if let Some(submitted) = self.feedback_submitted {
            message.feedback_submitted = submitted;
        }
        if let Some(dismissed) = self.feedback_dismissed {
            message.feedback_dismissed = dismissed;
        }
        if let Some(suggestions) = self.suggestions {
            message.suggestions = suggestions;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_as_str() {
        assert_eq!(MessageRole::User.as_str(), "user");
        assert_eq!(MessageRole::Bot.as_str(), "bot");
    }

    #[test]
    fn test_message_role_from_str() {
        assert_eq!("user".parse::<MessageRole>().unwrap(), MessageRole::User);
        assert_eq!("bot".parse::<MessageRole>().unwrap(), MessageRole::Bot);
        assert_eq!("BOT".parse::<MessageRole>().unwrap(), MessageRole::Bot);
    }

    #[test]
    fn test_message_role_from_str_invalid() {
        let result = "operator".parse::<MessageRole>();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid message role"));
    }

    #[test]
    fn test_feedback_rating_roundtrip() {
        let serialized = serde_json::to_string(&FeedbackRating::Positive).unwrap();
        assert_eq!(serialized, "\"positive\"");
        let parsed: FeedbackRating = serde_json::from_str("\"negative\"").unwrap();
        assert_eq!(parsed, FeedbackRating::Negative);
    }

    #[test]
    fn test_user_message_has_no_feedback_affordance() {
        let msg = Message::user("1", "hello", Some("14:31".to_string()));
        assert!(msg.is_user());
        assert!(!msg.show_feedback);
        assert!(msg.feedback.is_none());
    }

    #[test]
    fn test_bot_builder_flags() {
        let msg = Message::bot("2", "hi", None)
            .with_feedback()
            .with_suggestions(vec!["Ask a question".to_string()]);
        assert!(msg.is_bot());
        assert!(msg.show_feedback);
        assert_eq!(msg.suggestions.as_ref().unwrap().len(), 1);
        assert!(msg.timestamp.is_none());
    }

    #[test]
    fn test_message_serde_camel_case() {
        let msg = Message::bot("1", "hi", None).with_feedback();
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"showFeedback\":true"));
        assert!(json.contains("\"feedbackSubmitted\":false"));
        // Nullable fields are skipped when absent
        assert!(!json.contains("feedbackOptionId"));
    }

    #[test]
    fn test_patch_reset_feedback() {
        let mut msg = Message::bot("1", "hi", None).with_feedback();
        msg.feedback = Some(FeedbackRating::Negative);
        msg.feedback_option_id = Some("other".to_string());
        msg.custom_feedback_text = Some("slow".to_string());

        MessagePatch::reset_feedback().apply(&mut msg);

        assert!(msg.feedback.is_none());
        assert!(msg.feedback_option_id.is_none());
        assert!(msg.custom_feedback_text.is_none());
        assert!(!msg.feedback_submitted);
        assert!(msg.show_feedback); // affordance untouched
    }

    #[test]
    fn test_patch_leaves_unset_fields_alone() {
        let mut msg = Message::bot("1", "hi", None).with_feedback();
        msg.feedback = Some(FeedbackRating::Positive);

        let patch = MessagePatch {
            feedback_submitted: Some(true),
            ..Default::default()
        };
        patch.apply(&mut msg);

        assert!(msg.feedback_submitted);
        assert_eq!(msg.feedback, Some(FeedbackRating::Positive));
    }

    #[test]
    fn test_patch_clear_suggestions() {
        let mut msg =
            Message::bot("2", "pick one", None).with_suggestions(vec!["a".to_string()]);
        MessagePatch::clear_suggestions().apply(&mut msg);
        assert!(msg.suggestions.is_none());
    }
}
