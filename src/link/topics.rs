//! Topic names derived from the device identity.
//!
//! A device named `D` owns three private channels (`D/command`,
//! `D/reply`, `D/error`) and shares two broadcast channels with every
//! other listener (`common/command`, `common/reply`).
//!
//! Routing invariant: the reply destination is selected solely by which
//! command channel the inbound message arrived on. The error destination
//! is always the private error channel.

/// Shared command channel, subscribed by every device.
pub const COMMON_COMMAND_TOPIC: &str = "common/command";

/// Shared reply channel for requests that arrived on [`COMMON_COMMAND_TOPIC`].
pub const COMMON_REPLY_TOPIC: &str = "common/reply";

/// The per-device topic set. Built once at startup, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSet {
    /// Private command topic (`D/command`), subscribed.
    pub command: String,
    /// Private reply topic (`D/reply`), published.
    pub reply: String,
    /// Private error topic (`D/error`), published.
    pub error: String,
}

impl TopicSet {
    pub fn new(identity: &str) -> Self {
        Self {
            command: format!("{identity}/command"),
            reply: format!("{identity}/reply"),
            error: format!("{identity}/error"),
        }
    }

    /// Reply destination for a message that arrived on `arrival`.
    ///
    /// Exact match on the shared command topic routes to the shared
    /// reply topic; everything else routes to the private reply topic.
    pub fn reply_topic_for(&self, arrival: &str) -> &str {
        if arrival == COMMON_COMMAND_TOPIC {
            COMMON_REPLY_TOPIC
        } else {
            &self.reply
        }
    }
}
