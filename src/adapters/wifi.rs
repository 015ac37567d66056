//! WiFi station bring-up — thin wrapper, not part of the dispatch core.
//!
//! Blocks until the station is associated and has an IP, mirroring the
//! boot-time behaviour of the boards this firmware targets. Reconnection
//! policy is left to the surrounding process.

use anyhow::{Context, Result, anyhow};
use esp_idf_hal::modem::Modem;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, ClientConfiguration, Configuration, EspWifi};
use log::info;

use crate::config::LinkConfig;

/// Bring the station interface up and wait for connectivity.
pub fn connect(
    modem: Modem,
    sysloop: EspSystemEventLoop,
    nvs: EspDefaultNvsPartition,
    config: &LinkConfig,
) -> Result<BlockingWifi<EspWifi<'static>>> {
    let wifi = EspWifi::new(modem, sysloop.clone(), Some(nvs)).context("wifi init")?;
    let mut wifi = BlockingWifi::wrap(wifi, sysloop).context("wifi event loop")?;

    wifi.set_configuration(&Configuration::Client(ClientConfiguration {
        ssid: config
            .wifi_ssid
            .as_str()
            .try_into()
            .map_err(|()| anyhow!("SSID too long"))?,
        password: config
            .wifi_password
            .as_str()
            .try_into()
            .map_err(|()| anyhow!("WiFi password too long"))?,
        ..Default::default()
    }))?;

    wifi.start().context("wifi start")?;
    wifi.connect().context("wifi connect")?;
    wifi.wait_netif_up().context("wifi netif")?;

    info!("wifi: connected to {}", config.wifi_ssid);
    Ok(wifi)
}
