//! Device link — couples a dispatcher to a transport.
//!
//! The owning process's main loop chooses between the blocking
//! [`wait_for_message`](DeviceLink::wait_for_message) and the
//! non-blocking [`check_for_message`](DeviceLink::check_for_message);
//! the dispatch step itself is synchronous and agnostic to which is
//! used. One inbound message is processed to completion before the next
//! is accepted.

use log::info;

use super::dispatcher::Dispatcher;
use super::topics::COMMON_COMMAND_TOPIC;
use super::transport::{InboundMessage, PubSubTransport};
use crate::ports::BoardPort;

pub struct DeviceLink<T: PubSubTransport> {
    dispatcher: Dispatcher,
    transport: T,
}

impl<T: PubSubTransport> DeviceLink<T> {
    /// Subscribe to the private and shared command topics and hand the
    /// pair back ready to serve.
    pub fn start(mut transport: T, dispatcher: Dispatcher) -> Result<Self, T::Error> {
        transport.subscribe(&dispatcher.topics().command)?;
        transport.subscribe(COMMON_COMMAND_TOPIC)?;
        info!(
            "link: subscribed to {} and {}",
            dispatcher.topics().command,
            COMMON_COMMAND_TOPIC
        );
        Ok(Self {
            dispatcher,
            transport,
        })
    }

    /// Block until the next message arrives, then dispatch it.
    pub fn wait_for_message(&mut self, board: &mut dyn BoardPort) -> Result<(), T::Error> {
        let msg = self.transport.wait_message()?;
        self.handle(&msg, board)
    }

    /// Dispatch one pending message if there is one. Returns whether a
    /// message was processed.
    pub fn check_for_message(&mut self, board: &mut dyn BoardPort) -> Result<bool, T::Error> {
        match self.transport.try_message()? {
            Some(msg) => {
                self.handle(&msg, board)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn handle(&mut self, msg: &InboundMessage, board: &mut dyn BoardPort) -> Result<(), T::Error> {
        if let Some(out) = self.dispatcher.dispatch(&msg.topic, &msg.payload, board) {
            self.transport.publish(&out.topic, &out.payload)?;
        }
        Ok(())
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}
