//! Electrolink firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by the `espidf`
//! feature within each module, so the crate builds and tests on host
//! targets without the ESP toolchain.

#![deny(unused_must_use)]

pub mod config;
pub mod link;
pub mod ports;

pub mod adapters;
