// Dialog variant configuration

pub mod loader;

pub use loader::ConfigLoader;

use crate::feedback::OptionSet;
use crate::responder::{COUNCIL_POOL, GENERAL_POOL, REACT_POOL, WELCOME_POOL};
use serde::{Deserialize, Serialize};

// ============================================================================
// Response Pool
// ============================================================================

/// Which canned pool the variant draws free-form replies from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResponsePoolKind {
    #[default]
    General,
    Council,
    React,
    Welcome,
}

impl ResponsePoolKind {
    pub fn strings(&self) -> &'static [&'static str] {
        match self {
            ResponsePoolKind::General => GENERAL_POOL,
            ResponsePoolKind::Council => COUNCIL_POOL,
            ResponsePoolKind::React => REACT_POOL,
            ResponsePoolKind::Welcome => WELCOME_POOL,
        }
    }
}

// ============================================================================
// Dialog Config
// ============================================================================

/// Per-variant parameters. One state machine serves every dialog variant;
/// these values are the only differences between them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogConfig {
    /// Feedback free-text character cap (180 or 600 in the shipped variants)
    #[serde(
        rename = "feedbackTextMaxLen",
        alias = "feedback_text_max_len",
        default = "default_max_len"
    )]
    pub feedback_text_max_len: usize,
    /// Seed-message index that carries the initial suggestion chips
    #[serde(
        rename = "showSuggestionsOnMessageIndex",
        alias = "show_suggestions_on_message_index",
        default
    )]
    pub show_suggestions_on_message_index: Option<usize>,
    #[serde(
        rename = "feedbackEnabled",
        alias = "feedback_enabled",
        default = "default_true"
    )]
    pub feedback_enabled: bool,
    /// Which option tables the feedback flow presents
    #[serde(rename = "optionSet", alias = "option_set", default)]
    pub option_set: OptionSet,
    /// Simulated typing delay before a bot reply lands
    #[serde(
        rename = "responseDelayMs",
        alias = "response_delay_ms",
        default = "default_delay"
    )]
    pub response_delay_ms: u64,
    /// Gate message sending behind `authenticate()`
    #[serde(rename = "requireAuth", alias = "require_auth", default)]
    pub require_auth: bool,
    /// Drawer rule: at most one feedback flow open across the dialog
    #[serde(
        rename = "singleFeedbackFlow",
        alias = "single_feedback_flow",
        default
    )]
    pub single_feedback_flow: bool,
    /// Route bins/repair/rent keywords to scripted council answers and the
    /// repair flow
    #[serde(rename = "councilRouting", alias = "council_routing", default)]
    pub council_routing: bool,
    /// Start the proposal flow on "proposal"/"quote" keywords
    #[serde(rename = "proposalKeywords", alias = "proposal_keywords", default)]
    pub proposal_keywords: bool,
    #[serde(rename = "responsePool", alias = "response_pool", default)]
    pub response_pool: ResponsePoolKind,
    /// Scripted bot messages present at mount, in order
    #[serde(rename = "seedMessages", alias = "seed_messages", default)]
    pub seed_messages: Vec<String>,
    /// Chips attached to the configured seed message
    #[serde(rename = "initialSuggestions", alias = "initial_suggestions", default)]
    pub initial_suggestions: Vec<String>,
}

fn default_max_len() -> usize {
    180
}
fn default_delay() -> u64 {
    2000
}
fn default_true() -> bool {
    true
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            feedback_text_max_len: default_max_len(),
            show_suggestions_on_message_index: None,
            feedback_enabled: default_true(),
            option_set: OptionSet::default(),
            response_delay_ms: default_delay(),
            require_auth: false,
            single_feedback_flow: false,
            council_routing: false,
            proposal_keywords: false,
            response_pool: ResponsePoolKind::default(),
            seed_messages: Vec::new(),
            initial_suggestions: Vec::new(),
        }
    }
}

impl DialogConfig {
    /// Authenticated welcome dialog with one fixed reply.
    pub fn welcome() -> Self {
        Self {
            response_delay_ms: 1500,
            require_auth: true,
            response_pool: ResponsePoolKind::Welcome,
            seed_messages: vec!["👋 Welcome! How can I help today?".to_string()],
            ..Default::default()
        }
    }

    /// Sales-capture dialog, 180-char feedback cap.
    pub fn capture() -> Self {
        Self {
            response_delay_ms: 1500,
            proposal_keywords: true,
            response_pool: ResponsePoolKind::Welcome,
            seed_messages: vec![
                "👋 Hi, I'm Arto, your AI assistant here to help. How can I assist you today?"
                    .to_string(),
            ],
            ..Default::default()
        }
    }

    /// Sales-capture dialog with the long 600-char feedback box.
    pub fn capture_v2() -> Self {
        Self {
            feedback_text_max_len: 600,
            ..Self::capture()
        }
    }

    /// Suggestion-chip dialog backed by the drawer feedback panel.
    pub fn suggestions() -> Self {
        Self {
            option_set: OptionSet::Drawer,
            single_feedback_flow: true,
            proposal_keywords: true,
            response_pool: ResponsePoolKind::React,
            show_suggestions_on_message_index: Some(1),
            seed_messages: vec![
                "👋 Hi, I am Arto how can help?".to_string(),
                "Select an option below or type a brief message so I can better assist you."
                    .to_string(),
            ],
            initial_suggestions: vec![
                "Ask for a proposal".to_string(),
                "Ask a question".to_string(),
            ],
            ..Default::default()
        }
    }

    /// Council-services dialog with keyword routing and the repair flow.
    pub fn council() -> Self {
        Self {
            option_set: OptionSet::Drawer,
            single_feedback_flow: true,
            council_routing: true,
            response_pool: ResponsePoolKind::Council,
            show_suggestions_on_message_index: Some(1),
            seed_messages: vec![
                "👋 Hi, I am Arto your helpful AI assistant".to_string(),
                "Select an option below or type a brief message so I can better assist you."
                    .to_string(),
            ],
            initial_suggestions: vec![
                "When are my bins collected?".to_string(),
                "I need to report a housing repair".to_string(),
                "What's my rent balance?".to_string(),
            ],
            ..Default::default()
        }
    }

    /// Plain drawer-feedback dialog over the general pool.
    pub fn drawer() -> Self {
        Self {
            option_set: OptionSet::Drawer,
            single_feedback_flow: true,
            seed_messages: vec!["👋 Hi, I am Arto your helpful AI assistant".to_string()],
            ..Default::default()
        }
    }

    /// Preset lookup by name, for config files.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "welcome" => Some(Self::welcome()),
            "capture" => Some(Self::capture()),
            "capture_v2" => Some(Self::capture_v2()),
            "suggestions" => Some(Self::suggestions()),
            "council" => Some(Self::council()),
            "drawer" => Some(Self::drawer()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DialogConfig::default();
        assert_eq!(config.feedback_text_max_len, 180);
        assert_eq!(config.response_delay_ms, 2000);
        assert!(config.feedback_enabled);
        assert!(!config.require_auth);
        assert_eq!(config.option_set, OptionSet::Inline);
    }

    #[test]
    fn test_presets_differ_where_the_variants_do() {
        assert!(DialogConfig::welcome().require_auth);
        assert!(!DialogConfig::capture().require_auth);
        assert_eq!(DialogConfig::capture().feedback_text_max_len, 180);
        assert_eq!(DialogConfig::capture_v2().feedback_text_max_len, 600);
        assert!(DialogConfig::council().council_routing);
        assert_eq!(DialogConfig::council().initial_suggestions.len(), 3);
        assert!(DialogConfig::suggestions().single_feedback_flow);
        assert_eq!(
            DialogConfig::suggestions().option_set,
            OptionSet::Drawer
        );
    }

    #[test]
    fn test_preset_lookup() {
        assert!(DialogConfig::preset("council").is_some());
        assert!(DialogConfig::preset("nope").is_none());
    }

    #[test]
    fn test_camel_case_and_snake_case_both_parse() {
        let camel: DialogConfig =
            toml::from_str("feedbackTextMaxLen = 600\nresponseDelayMs = 1000").unwrap();
        assert_eq!(camel.feedback_text_max_len, 600);
        assert_eq!(camel.response_delay_ms, 1000);

        let snake: DialogConfig =
            toml::from_str("feedback_text_max_len = 600\nresponse_delay_ms = 1000").unwrap();
        assert_eq!(snake.feedback_text_max_len, 600);
        assert_eq!(snake.response_delay_ms, 1000);
    }

    #[test]
    fn test_pool_kinds_resolve() {
        assert_eq!(ResponsePoolKind::Welcome.strings().len(), 1);
        assert_eq!(ResponsePoolKind::General.strings().len(), 5);
        assert_eq!(ResponsePoolKind::Council.strings().len(), 5);
        assert_eq!(ResponsePoolKind::React.strings().len(), 5);
    }
}
