//! Fuzz target: `Dispatcher::dispatch`
//!
//! Feeds arbitrary message bodies through a full dispatch cycle and
//! asserts the dispatcher never panics, produces at most one outbound
//! message, and only ever publishes to a known destination topic.
//!
//! cargo fuzz run fuzz_dispatch

#![no_main]

use libfuzzer_sys::fuzz_target;

use electrolink::link::dispatcher::Dispatcher;
use electrolink::ports::NullBoard;

fuzz_target!(|data: &[u8]| {
    let mut dispatcher = Dispatcher::builder("fuzz").build();

    if let Some(out) = dispatcher.dispatch("fuzz/command", data, &mut NullBoard) {
        assert!(
            out.topic == "fuzz/reply" || out.topic == "fuzz/error",
            "unexpected destination {}",
            out.topic
        );
    }

    // Shared-channel arrivals may reply on the shared channel but must
    // still report errors privately.
    if let Some(out) = dispatcher.dispatch("common/command", data, &mut NullBoard) {
        assert!(out.topic == "common/reply" || out.topic == "fuzz/error");
    }
});
