//! Chat reply selection: canned answer first, then the completion provider,
//! then the default deflection.

use tracing::{info, warn};

use crate::completion_client::CompletionProvider;
use crate::dto::ChatMessage;
use crate::legal_responses::{match_topic, DEFAULT_RESPONSE};

/// Produces the assistant reply to the latest message of `conversation`.
///
/// Provider failures are logged and answered with [`DEFAULT_RESPONSE`]; this
/// function never fails.
pub async fn reply(
    conversation: &[ChatMessage],
    provider: Option<&dyn CompletionProvider>,
) -> ChatMessage {
    let last = conversation
        .last()
        .map(|m| m.content.as_str())
        .unwrap_or_default();

    if let Some(topic) = match_topic(last) {
        info!(topic = topic.as_ref(), "answering with canned response");
        return ChatMessage::assistant(topic.answer());
    }

    let Some(provider) = provider else {
        info!("no completion provider configured, using default response");
        return ChatMessage::assistant(DEFAULT_RESPONSE);
    };

    match provider.complete(conversation).await {
        Ok(text) => ChatMessage::assistant(text),
        Err(e) => {
            warn!(%e, "completion provider failed, using default response");
            ChatMessage::assistant(DEFAULT_RESPONSE)
        }
    }
}
