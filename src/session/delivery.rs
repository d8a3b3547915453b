// Async delivery of pending bot replies

use std::sync::Arc;

use tokio::sync::Mutex;

use super::{ChatSession, PendingReply};

/// Sleep out the simulated typing delay, then land the reply. Returns the
/// appended message id, or `None` when the session was closed while the
/// delay was pending.
pub async fn deliver(session: Arc<Mutex<ChatSession>>, pending: PendingReply) -> Option<String> {
    tokio::time::sleep(pending.delay()).await;
    let mut session = session.lock().await;
    session.complete_reply(pending).map(|m| m.id.clone())
}
