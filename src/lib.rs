// Module declarations
pub mod config;
pub mod error;
pub mod feedback;
pub mod flows;
pub mod forms;
pub mod models;
pub mod render;
pub mod responder;
pub mod session;
pub mod store;

// Re-export the types the rendering layer drives
pub use config::{ConfigLoader, DialogConfig, ResponsePoolKind};
pub use error::ChatError;
pub use feedback::{ChoiceOutcome, FeedbackFlow, FeedbackState, OptionSet, ResolvedOption};
pub use flows::{FlowKind, FlowTurn, GuidedFlow};
pub use forms::{SalesForm, SalesLead};
pub use models::{FeedbackRating, Message, MessagePatch, MessageRole};
pub use responder::{CannedResponder, ResponseProvider};
pub use session::{delivery::deliver, ChatSession, PendingReply};
pub use store::MessageStore;

/// Initialize the logger for binaries and examples embedding the widget
/// core. Safe to call once per process.
pub fn init_logging() {
    env_logger::init();
}
