//! Electrolink firmware — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Adapters (outer ring)                    │
//! │                                                          │
//! │  WifiAdapter    EspMqttTransport    EspBoard             │
//! │  (bring-up)     (PubSubTransport)   (BoardPort)          │
//! │                                                          │
//! │  ─────────────── Port/Trait boundary ─────────────       │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │  DeviceLink → Dispatcher → ServiceRegistry     │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::info;

use electrolink::adapters::board::EspBoard;
use electrolink::adapters::mqtt::EspMqttTransport;
use electrolink::adapters::wifi;
use electrolink::config::LinkConfig;
use electrolink::link::dispatcher::Dispatcher;
use electrolink::link::service::DeviceLink;

use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;

fn main() -> Result<()> {
    // ── ESP-IDF bootstrap ─────────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("electrolink v{}", env!("CARGO_PKG_VERSION"));

    let config =
        LinkConfig::from_json_str(include_str!("../config.json")).context("config.json")?;
    info!("device identity: {}", config.thing_name);

    // ── Network bring-up ──────────────────────────────────────
    let peripherals = Peripherals::take().context("peripherals")?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;
    let _wifi = wifi::connect(peripherals.modem, sysloop, nvs, &config)?;

    // ── Link setup: builtins + board extensions, then freeze ──
    let dispatcher = Dispatcher::builder(&config.thing_name)
        .board_tag(&config.board)
        .build();
    let transport = EspMqttTransport::connect(&config)?;
    let mut link = DeviceLink::start(transport, dispatcher)?;
    let mut board = EspBoard;

    // ── Serve ─────────────────────────────────────────────────
    loop {
        link.wait_for_message(&mut board)?;
    }
}
