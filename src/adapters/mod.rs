//! Adapters — concrete implementations of the port and transport traits.
//!
//! | Adapter | Implements        | Connects to            |
//! |---------|-------------------|------------------------|
//! | `mqtt`  | PubSubTransport   | ESP-IDF MQTT client    |
//! | `board` | BoardPort         | ESP32 chip reset       |
//! | `wifi`  | —                 | ESP-IDF WiFi STA       |
//!
//! All adapters are ESP-IDF-only; host builds use the mocks in the test
//! suite instead.

#[cfg(feature = "espidf")]
pub mod board;
#[cfg(feature = "espidf")]
pub mod mqtt;
#[cfg(feature = "espidf")]
pub mod wifi;
