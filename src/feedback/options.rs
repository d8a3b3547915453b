// Static feedback option tables, scoped by rating polarity

use crate::models::FeedbackRating;
use serde::{Deserialize, Serialize};

/// One entry in a polarity-scoped option table. Drawer-set negative options
/// may carry one level of sub-options for disambiguation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackOption {
    pub id: &'static str,
    pub label: &'static str,
    /// Canned acknowledgement shown on the confirmation screen
    pub response: &'static str,
    pub sub_options: &'static [FeedbackOption],
}

// ============================================================================
// Inline set (compact, no sub-options)
// ============================================================================

pub const INLINE_POSITIVE_OPTIONS: &[FeedbackOption] = &[
    FeedbackOption {
        id: "fast",
        label: "Fast (Efficient)",
        response: "Thanks for your feedback! We strive for quick, accurate responses.",
        sub_options: &[],
    },
    FeedbackOption {
        id: "clear",
        label: "Provided clear and helpful answers",
        response: "Glad to hear our answers were clear and helpful!",
        sub_options: &[],
    },
    FeedbackOption {
        id: "knowledgeable",
        label: "Knowledgeable assistant",
        response: "We appreciate your recognition! We aim for expertise in every response.",
        sub_options: &[],
    },
    FeedbackOption {
        id: "engaging",
        label: "Engaging and friendly tone",
        response: "Happy you found our conversation engaging!",
        sub_options: &[],
    },
    FeedbackOption {
        id: "easy",
        label: "Easy to use",
        response: "Thanks! We aim for a smooth, user-friendly experience.",
        sub_options: &[],
    },
    FeedbackOption {
        id: "understood",
        label: "Understood my needs well",
        response: "Glad we could understand and address your needs!",
        sub_options: &[],
    },
    FeedbackOption {
        id: "other",
        label: "Other",
        response: "Thanks for your positive feedback!",
        sub_options: &[],
    },
];

pub const INLINE_NEGATIVE_OPTIONS: &[FeedbackOption] = &[
    FeedbackOption {
        id: "slow",
        label: "Slow (Inefficient)",
        response: "Sorry for the delay. We're working on improving speed.",
        sub_options: &[],
    },
    FeedbackOption {
        id: "unhelpful",
        label: "Answers were not helpful",
        response: "Sorry our answers weren’t helpful. We’re working to improve.",
        sub_options: &[],
    },
    FeedbackOption {
        id: "incorrect",
        label: "Provided incorrect information",
        response: "Apologies for the mistake. We’ll review and improve accuracy.",
        sub_options: &[],
    },
    FeedbackOption {
        id: "difficult",
        label: "Difficult to interact with",
        response: "Sorry for any difficulty. We’re making interactions smoother.",
        sub_options: &[],
    },
    FeedbackOption {
        id: "misunderstood",
        label: "Didn't understand my question",
        response: "Apologies for the misunderstanding. We’re working on better comprehension.",
        sub_options: &[],
    },
    FeedbackOption {
        id: "error",
        label: "Encountered error message",
        response: "Sorry for the error. We’ll investigate and fix it.",
        sub_options: &[],
    },
    FeedbackOption {
        id: "other",
        label: "Other",
        response: "Thanks for your feedback!",
        sub_options: &[],
    },
];

// ============================================================================
// Drawer set (richer responses, technical sub-options)
// ============================================================================

pub const DRAWER_POSITIVE_OPTIONS: &[FeedbackOption] = &[
    FeedbackOption {
        id: "fast",
        label: "Fast and efficient",
        response: "Thanks for your feedback! We strive for speed and efficiency.",
        sub_options: &[],
    },
    FeedbackOption {
        id: "helpful",
        label: "Helpful resolution",
        response: "Glad we could help resolve your query!",
        sub_options: &[],
    },
    FeedbackOption {
        id: "knowledgeable",
        label: "Knowledgeable support",
        response: "We appreciate your recognition of our expertise!",
        sub_options: &[],
    },
    FeedbackOption {
        id: "friendly",
        label: "Friendly tone",
        response: "Happy you found our conversation friendly!",
        sub_options: &[],
    },
    FeedbackOption {
        id: "easy",
        label: "Easy to use",
        response: "Thanks! We aim for a smooth, user-friendly experience.",
        sub_options: &[],
    },
    FeedbackOption {
        id: "intelligent",
        label: "Chatbot was intelligent",
        response: "Thank you! We strive to provide intelligent assistance.",
        sub_options: &[],
    },
    FeedbackOption {
        id: "other",
        label: "Other",
        response: "Thanks for your feedback!",
        sub_options: &[],
    },
];

pub const DRAWER_NEGATIVE_OPTIONS: &[FeedbackOption] = &[
    FeedbackOption {
        id: "slow",
        label: "Slow and inefficient",
        response: "We apologize for the slow performance. We're working on improving our efficiency.",
        sub_options: &[],
    },
    FeedbackOption {
        id: "unhelpful",
        label: "Unhelpful resolution",
        response: "We're sorry the resolution wasn't helpful. We'll work to improve our solutions.",
        sub_options: &[],
    },
    FeedbackOption {
        id: "expertise",
        label: "Lack of expertise",
        response: "We apologize for not meeting your expertise expectations. We're continuously improving our knowledge base.",
        sub_options: &[],
    },
    FeedbackOption {
        id: "unfriendly",
        label: "Unfriendly tone",
        response: "We're sorry about the unfriendly tone. We strive to maintain professional and friendly communication.",
        sub_options: &[],
    },
    FeedbackOption {
        id: "technical",
        label: "Technical issues",
        response: "We apologize for the technical issues. Our team will look into resolving these problems.",
        sub_options: &[
            FeedbackOption {
                id: "error",
                label: "Encountered error message",
                response: "We apologize for the error message. Our team will investigate and fix this issue.",
                sub_options: &[],
            },
            FeedbackOption {
                id: "no_response",
                label: "No response",
                response: "We're sorry you received no response. We'll work on improving our system's reliability.",
                sub_options: &[],
            },
        ],
    },
    FeedbackOption {
        id: "misunderstanding",
        label: "Chatbot didn't understand",
        response: "We're sorry for the misunderstanding. We're working to improve our comprehension capabilities.",
        sub_options: &[],
    },
    FeedbackOption {
        id: "other",
        label: "Other",
        response: "We appreciate your feedback and will work on improving our service.",
        sub_options: &[],
    },
];

// ============================================================================
// Option Set
// ============================================================================

/// Which pair of option tables a dialog variant presents. Inline variants
/// show the compact table next to the message; drawer variants open the
/// richer table (the only one with sub-options) in a shared panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OptionSet {
    #[default]
    Inline,
    Drawer,
}

impl OptionSet {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionSet::Inline => "inline",
            OptionSet::Drawer => "drawer",
        }
    }

    /// The option list for a rating polarity.
    pub fn options_for(&self, rating: FeedbackRating) -> &'static [FeedbackOption] {
        match (self, rating) {
            (OptionSet::Inline, FeedbackRating::Positive) => INLINE_POSITIVE_OPTIONS,
            (OptionSet::Inline, FeedbackRating::Negative) => INLINE_NEGATIVE_OPTIONS,
            (OptionSet::Drawer, FeedbackRating::Positive) => DRAWER_POSITIVE_OPTIONS,
            (OptionSet::Drawer, FeedbackRating::Negative) => DRAWER_NEGATIVE_OPTIONS,
        }
    }

    /// Top-level lookup within one polarity's table.
    pub fn find(&self, rating: FeedbackRating, id: &str) -> Option<&'static FeedbackOption> {
        self.options_for(rating).iter().find(|opt| opt.id == id)
    }

    /// Resolve a plain or composite option id against one polarity's table.
    pub fn resolve(&self, rating: FeedbackRating, option_id: &str) -> Option<ResolvedOption> {
        if let Some(option) = self.find(rating, option_id) {
            return Some(ResolvedOption::from_option(option));
        }
        // Composite ids are "{parent}_{sub}"; sub ids may themselves contain
        // underscores, so compare against the composed form rather than
        // splitting.
        for parent in self.options_for(rating) {
            for sub in parent.sub_options {
                if option_id == format!("{}_{}", parent.id, sub.id) {
                    return Some(ResolvedOption::composite(parent, sub));
                }
            }
        }
        None
    }
}

impl std::fmt::Display for OptionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Resolved Option
// ============================================================================

/// The outcome of an option choice, owned so composite (parent + sub)
/// selections can be merged into one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOption {
    pub id: String,
    pub label: String,
    pub response: String,
}

impl ResolvedOption {
    fn from_option(option: &FeedbackOption) -> Self {
        Self {
            id: option.id.to_string(),
            label: option.label.to_string(),
            response: option.response.to_string(),
        }
    }

    /// Merge a parent category and its sub-reason into one option.
    /// The confirmation text is the sub-option's response, not the parent's.
    pub fn composite(parent: &FeedbackOption, sub: &FeedbackOption) -> Self {
        Self {
            id: format!("{}_{}", parent.id, sub.id),
            label: format!("{} - {}", parent.label, sub.label),
            response: sub.response.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tables_end_with_other() {
        for set in [OptionSet::Inline, OptionSet::Drawer] {
            for rating in [FeedbackRating::Positive, FeedbackRating::Negative] {
                assert_eq!(set.options_for(rating).last().unwrap().id, "other");
            }
        }
    }

    #[test]
    fn test_find_is_polarity_scoped() {
        let set = OptionSet::Drawer;
        assert!(set.find(FeedbackRating::Positive, "fast").is_some());
        assert!(set.find(FeedbackRating::Negative, "fast").is_none());
        assert!(set.find(FeedbackRating::Negative, "slow").is_some());
    }

    #[test]
    fn test_sets_differ() {
        // "incorrect" exists only inline, "technical" only in the drawer set
        assert!(OptionSet::Inline
            .find(FeedbackRating::Negative, "incorrect")
            .is_some());
        assert!(OptionSet::Drawer
            .find(FeedbackRating::Negative, "incorrect")
            .is_none());
        assert!(OptionSet::Drawer
            .find(FeedbackRating::Negative, "technical")
            .is_some());
        assert!(OptionSet::Inline
            .find(FeedbackRating::Negative, "technical")
            .is_none());
    }

    #[test]
    fn test_resolve_plain_option() {
        let resolved = OptionSet::Inline
            .resolve(FeedbackRating::Negative, "incorrect")
            .unwrap();
        assert_eq!(resolved.id, "incorrect");
        assert_eq!(
            resolved.response,
            "Apologies for the mistake. We’ll review and improve accuracy."
        );
    }

    #[test]
    fn test_resolve_composite_uses_sub_response() {
        let resolved = OptionSet::Drawer
            .resolve(FeedbackRating::Negative, "technical_error")
            .unwrap();
        assert_eq!(resolved.id, "technical_error");
        assert_eq!(resolved.label, "Technical issues - Encountered error message");
        assert_eq!(
            resolved.response,
            "We apologize for the error message. Our team will investigate and fix this issue."
        );
    }

    #[test]
    fn test_resolve_composite_with_underscored_sub_id() {
        let resolved = OptionSet::Drawer
            .resolve(FeedbackRating::Negative, "technical_no_response")
            .unwrap();
        assert_eq!(resolved.label, "Technical issues - No response");
        assert_eq!(
            resolved.response,
            "We're sorry you received no response. We'll work on improving our system's reliability."
        );
    }

    #[test]
    fn test_resolve_unknown_id() {
        assert!(OptionSet::Inline
            .resolve(FeedbackRating::Positive, "nonsense")
            .is_none());
        assert!(OptionSet::Drawer
            .resolve(FeedbackRating::Negative, "technical_bogus")
            .is_none());
    }
}
