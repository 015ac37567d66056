//! Core dispatch state machine.
//!
//! Each inbound message runs one cycle to completion:
//! decode → route → resolve → invoke → reply/error. Single-threaded by
//! construction — the dispatcher holds the only references to the
//! registry and the acknowledgement flag, so no locking is needed.
//!
//! Exactly zero or one outbound message is produced per inbound message,
//! never more. Failures are reported on the private error channel and
//! never crash the loop.

use log::{info, warn};
use serde_json::Value;

use super::builtins;
use super::envelope::{self, ACK_VALUE};
use super::info::DeviceInfo;
use super::registry::{CallContext, Operation, Outcome, ServiceDef, ServiceRegistry};
use super::topics::TopicSet;
use crate::ports::BoardPort;

/// Error description for an unresolvable method name.
pub const METHOD_NOT_FOUND: &str = "Method don't exist";

/// One outbound publish, tagged with its destination topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub topic: String,
    pub payload: Vec<u8>,
}

/// Pre-run setup phase for a [`Dispatcher`].
///
/// The registry is only reachable through the builder; `build` consumes
/// it, so no registration can happen once dispatch is running.
pub struct LinkBuilder {
    identity: String,
    board_tag: String,
    registry: ServiceRegistry,
}

impl LinkBuilder {
    /// Start a builder with the five builtins pre-registered.
    pub fn new(identity: &str) -> Self {
        let mut registry = ServiceRegistry::new();
        builtins::install(&mut registry);
        Self {
            identity: identity.to_owned(),
            board_tag: "ESP32-S3".to_owned(),
            registry,
        }
    }

    /// Set the board capability tag reported by `getInfo`.
    pub fn board_tag(mut self, tag: &str) -> Self {
        self.board_tag = tag.to_owned();
        self
    }

    /// Register one operation (insert or replace).
    pub fn register(
        mut self,
        name: &str,
        op: impl Operation + 'static,
        parameters: Value,
        description: &str,
    ) -> Self {
        self.registry.register(name, op, parameters, description);
        self
    }

    /// Bulk-register operations from a board extension module.
    pub fn extend(mut self, defs: impl IntoIterator<Item = ServiceDef>) -> Self {
        self.registry.extend(defs);
        self
    }

    /// Freeze the registry and produce the dispatcher.
    pub fn build(self) -> Dispatcher {
        let topics = TopicSet::new(&self.identity);
        let info = DeviceInfo::new(&self.board_tag, &self.identity, &topics);
        info!(
            "link: {} ready ({} methods)",
            self.identity,
            self.registry.len()
        );
        Dispatcher {
            topics,
            info,
            registry: self.registry,
            ack_receipt: false,
        }
    }
}

/// The per-device dispatcher. Owns the frozen registry, the topic set,
/// the identity record, and the acknowledgement mode flag.
pub struct Dispatcher {
    topics: TopicSet,
    info: DeviceInfo,
    registry: ServiceRegistry,
    ack_receipt: bool,
}

impl Dispatcher {
    pub fn builder(identity: &str) -> LinkBuilder {
        LinkBuilder::new(identity)
    }

    pub fn topics(&self) -> &TopicSet {
        &self.topics
    }

    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    pub fn services(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Current acknowledgement mode (off at startup).
    pub fn ack_receipt(&self) -> bool {
        self.ack_receipt
    }

    /// Process one inbound message and return the at-most-one outbound
    /// publish it produces.
    ///
    /// Decode failures are deliberately funnelled through the generic
    /// operation-fault path rather than a distinct classification, so
    /// malformed input surfaces on the error channel the same way an
    /// operation fault does.
    pub fn dispatch(
        &mut self,
        topic: &str,
        body: &[u8],
        board: &mut dyn BoardPort,
    ) -> Option<OutboundMessage> {
        let req = match envelope::parse_request(body) {
            Ok(r) => r,
            Err(e) => return self.error_report(topic, body, &e.to_string()),
        };

        let Some(method) = req.method else {
            return self.error_report(topic, body, METHOD_NOT_FOUND);
        };
        let Some(op) = self.registry.resolve(&method) else {
            return self.error_report(topic, body, METHOD_NOT_FOUND);
        };

        info!("link: {} from {}", method, topic);
        let mut ctx = CallContext {
            info: &self.info,
            services: &self.registry,
            ack_receipt: &mut self.ack_receipt,
            board,
        };
        let outcome = op.invoke(&mut ctx, &req.params);

        let reply_topic = self.topics.reply_topic_for(topic);
        match outcome {
            Outcome::Value(v) => self.reply(reply_topic, &method, &req.params, v, req.id.as_ref()),
            Outcome::Void => {
                if self.ack_receipt {
                    self.reply(
                        reply_topic,
                        &method,
                        &req.params,
                        Value::String(ACK_VALUE.to_owned()),
                        req.id.as_ref(),
                    )
                } else {
                    // Silent success is the default.
                    None
                }
            }
            Outcome::Fault(f) => self.error_report(topic, body, &f.to_string()),
        }
    }

    fn reply(
        &self,
        reply_topic: &str,
        requested: &str,
        params: &Value,
        value: Value,
        id: Option<&Value>,
    ) -> Option<OutboundMessage> {
        match envelope::reply_body(requested, params, value, id) {
            Ok(payload) => Some(OutboundMessage {
                topic: reply_topic.to_owned(),
                payload,
            }),
            Err(e) => {
                warn!("link: reply encode failed: {}", e);
                None
            }
        }
    }

    /// Error reports always go to the private error channel, even for
    /// shared-channel arrivals.
    fn error_report(&self, topic: &str, body: &[u8], description: &str) -> Option<OutboundMessage> {
        warn!("link: error on {}: {}", topic, description);
        match envelope::error_body(topic, body, description) {
            Ok(payload) => Some(OutboundMessage {
                topic: self.topics.error.clone(),
                payload,
            }),
            Err(e) => {
                warn!("link: error encode failed: {}", e);
                None
            }
        }
    }
}
