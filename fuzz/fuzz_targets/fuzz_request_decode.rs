//! Fuzz target: `envelope::parse_request`
//!
//! Drives arbitrary byte sequences through request decoding and asserts
//! the decoder never panics and that every decoded request can be echoed
//! back into a reply body.
//!
//! cargo fuzz run fuzz_request_decode

#![no_main]

use libfuzzer_sys::fuzz_target;

use electrolink::link::envelope::{parse_request, reply_body};

fuzz_target!(|data: &[u8]| {
    if let Ok(req) = parse_request(data) {
        let method = req.method.as_deref().unwrap_or("unknown");
        let body = reply_body(
            method,
            &req.params,
            serde_json::Value::String("OK".into()),
            req.id.as_ref(),
        )
        .expect("reply encoding must not fail for decodable requests");
        assert!(!body.is_empty());
    }
});
