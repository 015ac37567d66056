//! Built-in operations present in every registry.
//!
//! These are plain functions with the [`Operation`] calling convention;
//! [`install`] registers them before any extension entries so they occupy
//! the first slots of `getServices` output.

use log::info;
use serde_json::{Value, json};

use super::envelope::positional_str;
use super::registry::{CallContext, Fault, Outcome, ServiceRegistry};

/// Returns the device identity string, proving the board is alive.
pub fn ping(ctx: &mut CallContext<'_>, _params: &Value) -> Outcome {
    Outcome::Value(Value::String(ctx.info.name.clone()))
}

/// Returns the static identity record.
pub fn get_info(ctx: &mut CallContext<'_>, _params: &Value) -> Outcome {
    match serde_json::to_value(ctx.info) {
        Ok(v) => Outcome::Value(v),
        Err(e) => Outcome::Fault(Fault::Operation(e.to_string())),
    }
}

/// Returns registry metadata: every method name with its parameter shape
/// and description, never the invocables themselves.
pub fn get_services(ctx: &mut CallContext<'_>, _params: &Value) -> Outcome {
    Outcome::Value(ctx.services.describe_all())
}

/// Triggers the board reset side effect. On real hardware execution
/// terminates before any reply could be observed.
pub fn reset(ctx: &mut CallContext<'_>, _params: &Value) -> Outcome {
    info!("link: reset requested");
    ctx.board.reset();
    Outcome::Void
}

/// Sets acknowledgement mode from one positional `"true"`/`"false"`
/// parameter (case-insensitive). Any other value faults and leaves the
/// flag unchanged.
pub fn set_ack_receipt(ctx: &mut CallContext<'_>, params: &Value) -> Outcome {
    let val = match positional_str(params, 0) {
        Ok(v) => v,
        Err(f) => return Outcome::Fault(f),
    };
    if val.eq_ignore_ascii_case("true") {
        *ctx.ack_receipt = true;
        Outcome::Void
    } else if val.eq_ignore_ascii_case("false") {
        *ctx.ack_receipt = false;
        Outcome::Void
    } else {
        Outcome::Fault(Fault::Operation(
            "Bad parameter. Only 'true' or 'false' accepted".into(),
        ))
    }
}

/// Register the five builtins.
pub fn install(reg: &mut ServiceRegistry) {
    reg.register(
        "ping",
        ping,
        Value::Null,
        "Verify if board responds, will reply its name",
    );
    reg.register("getInfo", get_info, Value::Null, "Get board info");
    reg.register(
        "getServices",
        get_services,
        Value::Null,
        "Get available instructions to call",
    );
    reg.register("reset", reset, Value::Null, "Hardware reset electronics");
    reg.register(
        "setAckReceipt",
        set_ack_receipt,
        json!("true/false"),
        "Acknowledge receipt of commands that return no value",
    );
}
