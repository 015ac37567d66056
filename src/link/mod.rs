//! Transport-agnostic RPC dispatch over a publish/subscribe bus.
//!
//! JSON command/reply protocol for a single device identity.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                      Link Stack                            │
//! │                                                            │
//! │  ┌───────────┐   ┌──────────┐   ┌──────────────────────┐  │
//! │  │ Transport │──▶│ Envelope │──▶│ Dispatcher           │  │
//! │  │ (trait)   │   │ (JSON)   │   │  → ServiceRegistry   │  │
//! │  └───────────┘   └──────────┘   └──────────────────────┘  │
//! │       ▲                                  │                 │
//! │       └─────────── reply / error ────────┘                 │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! A remote client publishes `{"method": ..., "params": ..., "id": ...}`
//! to the device's command topic (or the shared `common/command` topic).
//! The [`Dispatcher`](dispatcher::Dispatcher) resolves the method in the
//! [`ServiceRegistry`](registry::ServiceRegistry), invokes it, and
//! publishes at most one outcome message: a reply on the routed reply
//! topic or an error report on the device's error topic.

pub mod builtins;
pub mod dispatcher;
pub mod envelope;
pub mod info;
pub mod registry;
pub mod service;
pub mod topics;
pub mod transport;
