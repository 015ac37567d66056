//! Transport abstraction — any publish/subscribe message bus.
//!
//! Concrete implementations:
//! - MQTT over WiFi (ESP-IDF, see `adapters::mqtt`)
//! - in-memory queues for host tests
//!
//! The dispatch core is generic over `PubSubTransport`, so adding a new
//! bus requires zero changes to the dispatch logic. Transport failures
//! (including publish failures) are not handled by the core — they
//! propagate to the owning process.

/// One message delivered from a subscribed topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub topic: String,
    pub payload: Vec<u8>,
}

/// Publish/subscribe transport channel.
pub trait PubSubTransport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// Subscribe to a topic; delivered messages surface via
    /// [`wait_message`](Self::wait_message) / [`try_message`](Self::try_message).
    fn subscribe(&mut self, topic: &str) -> Result<(), Self::Error>;

    /// Publish `payload` to `topic`.
    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), Self::Error>;

    /// Block until the next inbound message arrives.
    fn wait_message(&mut self) -> Result<InboundMessage, Self::Error>;

    /// Return the next inbound message if one is pending, without blocking.
    fn try_message(&mut self) -> Result<Option<InboundMessage>, Self::Error>;
}

/// A null transport that discards all publishes and never yields a
/// message. Useful as a default when no broker is connected.
pub struct NullTransport;

impl PubSubTransport for NullTransport {
    type Error = ();

    fn subscribe(&mut self, _topic: &str) -> Result<(), ()> {
        Ok(())
    }

    fn publish(&mut self, _topic: &str, _payload: &[u8]) -> Result<(), ()> {
        Ok(())
    }

    fn wait_message(&mut self) -> Result<InboundMessage, ()> {
        // Nothing will ever arrive; blocking forever would wedge the
        // caller, so the null transport errors instead.
        Err(())
    }

    fn try_message(&mut self) -> Result<Option<InboundMessage>, ()> {
        Ok(None)
    }
}
