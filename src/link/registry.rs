//! Method registry — the string-keyed table of callable operations.
//!
//! Each entry pairs an invocable [`Operation`] with the metadata shown to
//! remote callers (`parameters` shape and a human-readable description).
//! The table is ordered by registration and is only mutable before the
//! dispatch loop starts, via the phase-gated
//! [`LinkBuilder`](super::dispatcher::LinkBuilder) — never from remote
//! input.

use core::fmt;

use serde_json::{Map, Value};

use super::info::DeviceInfo;
use crate::ports::BoardPort;

/// Fault raised by an operation invocation.
///
/// Typed in place of exception-class inspection: the dispatcher
/// classifies the report from the variant, not from downcasting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// The operation indexed into missing or short parameter data.
    ParamCount,
    /// Any other invocation failure, with its message text.
    Operation(String),
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParamCount => write!(f, "Incorrect number of parameters"),
            Self::Operation(msg) => write!(f, "{msg}"),
        }
    }
}

/// Tagged invocation outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The operation computed a result; a reply is always published.
    Value(Value),
    /// The operation returned nothing; a reply is published only when
    /// acknowledgement mode is on.
    Void,
    /// The operation faulted; an error report is published.
    Fault(Fault),
}

impl From<Fault> for Outcome {
    fn from(f: Fault) -> Self {
        Self::Fault(f)
    }
}

/// Shared state handed to every invocation.
///
/// Splitting the dispatcher's fields into one context keeps operations
/// free of back-references into the registry that owns them.
pub struct CallContext<'a> {
    /// The device self-description record.
    pub info: &'a DeviceInfo,
    /// Read-only view of the registry, for `getServices`.
    pub services: &'a ServiceRegistry,
    /// Process-wide acknowledgement mode flag.
    pub ack_receipt: &'a mut bool,
    /// Board side-effect boundary (hardware reset).
    pub board: &'a mut dyn BoardPort,
}

/// A callable operation behind a registry entry.
pub trait Operation {
    fn invoke(&self, ctx: &mut CallContext<'_>, params: &Value) -> Outcome;
}

impl<F> Operation for F
where
    F: Fn(&mut CallContext<'_>, &Value) -> Outcome,
{
    fn invoke(&self, ctx: &mut CallContext<'_>, params: &Value) -> Outcome {
        self(ctx, params)
    }
}

struct Entry {
    name: String,
    op: Box<dyn Operation>,
    parameters: Value,
    description: String,
}

/// A named operation plus metadata, for bulk registration by board
/// extension modules.
pub struct ServiceDef {
    pub name: String,
    pub op: Box<dyn Operation>,
    /// Free-form parameter-shape documentation, `Value::Null` for none.
    pub parameters: Value,
    pub description: String,
}

impl ServiceDef {
    pub fn new(
        name: &str,
        op: impl Operation + 'static,
        parameters: Value,
        description: &str,
    ) -> Self {
        Self {
            name: name.to_owned(),
            op: Box::new(op),
            parameters,
            description: description.to_owned(),
        }
    }
}

/// Registration-ordered method table. Linear lookup: the table is small
/// and fixed for the process lifetime.
#[derive(Default)]
pub struct ServiceRegistry {
    entries: Vec<Entry>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace an entry. Replacing keeps the original position
    /// so `getServices` output stays stable across overrides.
    pub fn register(
        &mut self,
        name: &str,
        op: impl Operation + 'static,
        parameters: Value,
        description: &str,
    ) {
        self.insert(ServiceDef::new(name, op, parameters, description));
    }

    /// Bulk-register entries from an extension module.
    pub fn extend(&mut self, defs: impl IntoIterator<Item = ServiceDef>) {
        for def in defs {
            self.insert(def);
        }
    }

    fn insert(&mut self, def: ServiceDef) {
        let entry = Entry {
            name: def.name,
            op: def.op,
            parameters: def.parameters,
            description: def.description,
        };
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Look up an operation by method name.
    pub fn resolve(&self, name: &str) -> Option<&dyn Operation> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.op.as_ref())
    }

    /// Registration-ordered metadata for every entry.
    ///
    /// Only `parameters` and `description` are exposed — the invocable
    /// itself is never serialized to remote callers.
    pub fn describe_all(&self) -> Value {
        let mut out = Map::new();
        for e in &self.entries {
            let mut meta = Map::new();
            meta.insert("parameters".into(), e.parameters.clone());
            meta.insert("description".into(), Value::String(e.description.clone()));
            out.insert(e.name.clone(), Value::Object(meta));
        }
        Value::Object(out)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Method names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn noop(_ctx: &mut CallContext<'_>, _params: &Value) -> Outcome {
        Outcome::Void
    }

    #[test]
    fn resolve_finds_registered_entry() {
        let mut reg = ServiceRegistry::new();
        reg.register("blink", noop, Value::Null, "blink the LED");
        assert!(reg.resolve("blink").is_some());
        assert!(reg.resolve("missing").is_none());
    }

    #[test]
    fn describe_all_preserves_registration_order() {
        let mut reg = ServiceRegistry::new();
        reg.register("zeta", noop, Value::Null, "last name, first slot");
        reg.register("alpha", noop, json!("pin"), "second slot");
        let meta = reg.describe_all();
        let keys: Vec<&String> = meta.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn replace_keeps_position_and_updates_metadata() {
        let mut reg = ServiceRegistry::new();
        reg.register("a", noop, Value::Null, "first");
        reg.register("b", noop, Value::Null, "second");
        reg.register("a", noop, json!("x"), "replaced");
        assert_eq!(reg.len(), 2);
        let meta = reg.describe_all();
        let keys: Vec<&String> = meta.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(meta["a"]["description"], "replaced");
        assert_eq!(meta["a"]["parameters"], "x");
    }

    #[test]
    fn metadata_never_exposes_the_invocable() {
        let mut reg = ServiceRegistry::new();
        reg.register("a", noop, Value::Null, "first");
        let meta = reg.describe_all();
        let fields: Vec<&String> = meta["a"].as_object().unwrap().keys().collect();
        assert_eq!(fields, ["parameters", "description"]);
    }

    #[test]
    fn fault_messages() {
        assert_eq!(Fault::ParamCount.to_string(), "Incorrect number of parameters");
        assert_eq!(Fault::Operation("boom".into()).to_string(), "boom");
    }
}
