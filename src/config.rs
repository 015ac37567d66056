//! Device configuration.
//!
//! Loaded from a JSON document at startup (`config.json` on device).
//! Missing fields fall back to defaults so a minimal config only needs
//! the device name and broker address.

use serde::{Deserialize, Serialize};

/// Startup configuration for the link process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Device identity; subscription root for the private topics.
    pub thing_name: String,
    /// Broker host name or address.
    pub broker_server: String,
    /// Broker port (MQTT default).
    pub broker_port: u16,
    /// Board capability tag reported by `getInfo`.
    pub board: String,
    /// WiFi station SSID (device builds only).
    pub wifi_ssid: String,
    /// WiFi station password.
    pub wifi_password: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            thing_name: "electrolink".to_owned(),
            broker_server: "localhost".to_owned(),
            broker_port: 1883,
            board: "ESP32-S3".to_owned(),
            wifi_ssid: String::new(),
            wifi_password: String::new(),
        }
    }
}

impl LinkConfig {
    /// Parse a JSON config document; absent fields take defaults.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// Broker URL in the form the MQTT client expects.
    pub fn broker_url(&self) -> String {
        format!("mqtt://{}:{}", self.broker_server, self.broker_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = LinkConfig::default();
        assert!(!c.thing_name.is_empty());
        assert!(!c.broker_server.is_empty());
        assert_eq!(c.broker_port, 1883);
    }

    #[test]
    fn partial_json_takes_defaults() {
        let c = LinkConfig::from_json_str(r#"{"thing_name":"pump-7"}"#).unwrap();
        assert_eq!(c.thing_name, "pump-7");
        assert_eq!(c.broker_server, "localhost");
        assert_eq!(c.board, "ESP32-S3");
    }

    #[test]
    fn serde_roundtrip() {
        let c = LinkConfig {
            thing_name: "pump-7".into(),
            broker_server: "10.0.0.2".into(),
            broker_port: 8883,
            board: "ESP8266".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&c).unwrap();
        let c2 = LinkConfig::from_json_str(&json).unwrap();
        assert_eq!(c2.thing_name, c.thing_name);
        assert_eq!(c2.broker_port, c.broker_port);
    }

    #[test]
    fn broker_url_shape() {
        let c = LinkConfig::default();
        assert_eq!(c.broker_url(), "mqtt://localhost:1883");
    }
}
