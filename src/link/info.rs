//! Device self-description record, exposed through the `getInfo` builtin.

use serde::Serialize;

use super::topics::{COMMON_COMMAND_TOPIC, COMMON_REPLY_TOPIC, TopicSet};

/// Protocol version reported in [`DeviceInfo`].
pub const PROTOCOL_VERSION: &str = "1.0";

/// Static identity record. Built once at startup, returned unchanged for
/// the process lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceInfo {
    /// Board capability tag (e.g. `"ESP32-S3"`).
    pub board: String,
    /// Device identity, also the subscription root.
    pub name: String,
    /// Private command topic.
    pub command: String,
    /// Private reply topic.
    pub reply: String,
    /// Private error topic.
    pub error: String,
    /// Shared command topic.
    pub common_command: String,
    /// Shared reply topic.
    pub common_reply: String,
    /// Protocol version string.
    pub version: String,
}

impl DeviceInfo {
    pub fn new(board: &str, identity: &str, topics: &TopicSet) -> Self {
        Self {
            board: board.to_owned(),
            name: identity.to_owned(),
            command: topics.command.clone(),
            reply: topics.reply.clone(),
            error: topics.error.clone(),
            common_command: COMMON_COMMAND_TOPIC.to_owned(),
            common_reply: COMMON_REPLY_TOPIC.to_owned(),
            version: PROTOCOL_VERSION.to_owned(),
        }
    }
}
