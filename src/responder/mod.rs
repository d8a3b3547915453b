// Response selection - canned pools, keyword routing, pluggable provider

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ============================================================================
// Canned pools
// ============================================================================

/// General assistant filler pool.
pub const GENERAL_POOL: &[&str] = &[
    "I can assist with various tasks like answering questions, providing information, and helping with proposals. Just let me know what you need!",
    "As an AI assistant, I aim to provide accurate and helpful responses while maintaining a natural conversational flow.",
    "I can help you explore different topics and provide detailed explanations. Feel free to ask follow-up questions for clarification.",
    "My responses are generated using advanced language models, but I always encourage users to verify critical information.",
    "I strive to be helpful while being transparent about my capabilities and limitations as an AI assistant.",
];

/// Council assistant filler pool.
pub const COUNCIL_POOL: &[&str] = &[
    "I can assist with various council services like bin collections, housing repairs, and rent inquiries. Just let me know what you need!",
    "As your council assistant, I aim to provide accurate and helpful responses while maintaining a natural conversational flow.",
    "I can help you explore different council services and provide detailed explanations. Feel free to ask follow-up questions for clarification.",
    "My responses are generated using advanced language models, but I always encourage users to verify critical information with the council directly.",
    "I strive to be helpful while being transparent about my capabilities and limitations as an AI assistant.",
];

/// Off-topic placeholder pool carried by one dialog variant. Deliberate
/// filler content, kept as-is.
pub const REACT_POOL: &[&str] = &[
    "React hooks let you use state and lifecycle features in functional components. Common hooks include useState for state management and useEffect for side effects.",
    "TypeScript enhances React development by providing static typing, better IDE support, and catching potential errors at compile time.",
    "ARIA attributes make React components accessible. Key attributes include role, aria-label, and aria-live for dynamic content.",
    "Tailwind CSS provides utility classes for responsive design. Use breakpoints like sm:, md:, and lg: for different screen sizes.",
    "Optimize React performance by using useMemo for expensive calculations, useCallback for function memoization, and React.memo for component memoization.",
];

/// Single fixed reply used by the welcome variant.
pub const WELCOME_POOL: &[&str] = &["I understand your message. Let me help you with that."];

// ============================================================================
// Council routing
// ============================================================================

/// Scripted answer for bin-collection queries.
pub const BINS_RESPONSE: &str = "Your bins are collected every Tuesday morning. Please ensure they are placed outside by 7 AM. You can check specific collection dates on the council website or through your council account. Is there anything else I can help you with?";

/// Scripted answer for rent-balance queries.
pub const RENT_RESPONSE: &str = "To check your rent balance, you'll need to log in to your council account or contact our housing team directly. For security reasons, I cannot access your personal financial information through this chat. Is there anything else I can help you with?";

/// What a council-variant user turn maps to, before falling back to the
/// random pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouncilIntent {
    Bins,
    Rent,
    /// Starts the housing-repair guided flow
    Repair,
}

impl CouncilIntent {
    /// The fixed reply, for intents that have one.
    pub fn response(&self) -> Option<&'static str> {
        match self {
            CouncilIntent::Bins => Some(BINS_RESPONSE),
            CouncilIntent::Rent => Some(RENT_RESPONSE),
            CouncilIntent::Repair => None,
        }
    }
}

/// Keyword classification for the council variant. Exact suggestion-chip
/// text matches first, then keyword scan in bins → repair → rent order.
pub fn classify_council(input: &str) -> Option<CouncilIntent> {
    match input {
        "When are my bins collected?" => return Some(CouncilIntent::Bins),
        "I need to report a housing repair" => return Some(CouncilIntent::Repair),
        "What's my rent balance?" => return Some(CouncilIntent::Rent),
        _ => {}
    }

    let lower = input.to_lowercase();
    let any = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if any(&["bins", "collection", "waste", "recycling"]) {
        return Some(CouncilIntent::Bins);
    }
    if any(&["repair", "fix", "broken", "housing", "maintenance"]) {
        return Some(CouncilIntent::Repair);
    }
    if any(&["rent", "balance", "payment", "account"]) {
        return Some(CouncilIntent::Rent);
    }
    None
}

/// Keyword trigger for the proposal guided flow (capture variants).
pub fn wants_proposal(input: &str) -> bool {
    if input == "Ask for a proposal" {
        return true;
    }
    let lower = input.to_lowercase();
    lower.contains("proposal") || lower.contains("quote")
}

// ============================================================================
// Response Provider
// ============================================================================

/// Seam between the state machine and whatever produces bot text. The
/// canned picker below is the only implementation here; a real backend can
/// slot in without touching the session.
pub trait ResponseProvider {
    fn respond(&mut self, input: &str) -> String;
}

/// Uniform random pick from a fixed pool. Seedable for deterministic tests.
pub struct CannedResponder {
    pool: Vec<String>,
    rng: StdRng,
}

impl CannedResponder {
    pub fn new(pool: &[&str]) -> Self {
        Self {
            pool: pool.iter().map(|s| s.to_string()).collect(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(pool: &[&str], seed: u64) -> Self {
        Self {
            pool: pool.iter().map(|s| s.to_string()).collect(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ResponseProvider for CannedResponder {
    fn respond(&mut self, _input: &str) -> String {
        if self.pool.is_empty() {
            return String::new();
        }
        let idx = self.rng.gen_range(0..self.pool.len());
        self.pool[idx].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_responder_picks_from_pool() {
        let mut responder = CannedResponder::with_seed(GENERAL_POOL, 1);
        for _ in 0..20 {
            let reply = responder.respond("hello");
            assert!(GENERAL_POOL.contains(&reply.as_str()));
        }
    }

    #[test]
    fn test_canned_responder_is_seed_deterministic() {
        let mut a = CannedResponder::with_seed(COUNCIL_POOL, 9);
        let mut b = CannedResponder::with_seed(COUNCIL_POOL, 9);
        for _ in 0..10 {
            assert_eq!(a.respond("x"), b.respond("x"));
        }
    }

    #[test]
    fn test_empty_pool_yields_empty_string() {
        let mut responder = CannedResponder::with_seed(&[], 0);
        assert_eq!(responder.respond("hi"), "");
    }

    #[test]
    fn test_council_suggestion_chips_match_exactly() {
        assert_eq!(
            classify_council("When are my bins collected?"),
            Some(CouncilIntent::Bins)
        );
        assert_eq!(
            classify_council("I need to report a housing repair"),
            Some(CouncilIntent::Repair)
        );
        assert_eq!(
            classify_council("What's my rent balance?"),
            Some(CouncilIntent::Rent)
        );
    }

    #[test]
    fn test_council_keywords() {
        assert_eq!(
            classify_council("when is the recycling picked up"),
            Some(CouncilIntent::Bins)
        );
        assert_eq!(
            classify_council("My boiler is BROKEN"),
            Some(CouncilIntent::Repair)
        );
        assert_eq!(
            classify_council("how do I make a payment"),
            Some(CouncilIntent::Rent)
        );
        assert_eq!(classify_council("hello there"), None);
    }

    #[test]
    fn test_council_bins_wins_over_rent() {
        // Bins keywords are checked first when both families appear
        assert_eq!(
            classify_council("waste charge on my account"),
            Some(CouncilIntent::Bins)
        );
    }

    #[test]
    fn test_proposal_trigger() {
        assert!(wants_proposal("Ask for a proposal"));
        assert!(wants_proposal("can I get a QUOTE for this"));
        assert!(wants_proposal("I need a proposal for a new website project."));
        assert!(!wants_proposal("hello"));
    }

    #[test]
    fn test_intent_fixed_responses() {
        assert_eq!(CouncilIntent::Bins.response(), Some(BINS_RESPONSE));
        assert_eq!(CouncilIntent::Rent.response(), Some(RENT_RESPONSE));
        assert!(CouncilIntent::Repair.response().is_none());
    }
}
