//! MQTT transport adapter over the ESP-IDF MQTT client.
//!
//! Inbound publishes are queued from the client's event callback into an
//! mpsc channel, so the link loop can choose blocking (`wait_message`)
//! or non-blocking (`try_message`) receipt.

use core::fmt;
use std::sync::mpsc::{Receiver, TryRecvError, channel};

use esp_idf_svc::mqtt::client::{EspMqttClient, EventPayload, MqttClientConfiguration, QoS};
use esp_idf_svc::sys::EspError;
use log::{info, warn};

use crate::config::LinkConfig;
use crate::link::transport::{InboundMessage, PubSubTransport};

#[derive(Debug)]
pub enum MqttTransportError {
    Esp(EspError),
    /// The client event loop ended and no more messages can arrive.
    Disconnected,
}

impl fmt::Display for MqttTransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Esp(e) => write!(f, "mqtt: {e}"),
            Self::Disconnected => write!(f, "mqtt: connection closed"),
        }
    }
}

impl std::error::Error for MqttTransportError {}

impl From<EspError> for MqttTransportError {
    fn from(e: EspError) -> Self {
        Self::Esp(e)
    }
}

pub struct EspMqttTransport {
    client: EspMqttClient<'static>,
    inbound: Receiver<InboundMessage>,
}

impl EspMqttTransport {
    /// Connect to the broker named in `config`, using the device identity
    /// as the MQTT client id.
    pub fn connect(config: &LinkConfig) -> Result<Self, MqttTransportError> {
        let url = config.broker_url();
        let (tx, rx) = channel();

        let client = EspMqttClient::new_cb(
            &url,
            &MqttClientConfiguration {
                client_id: Some(&config.thing_name),
                ..Default::default()
            },
            move |event| match event.payload() {
                EventPayload::Received {
                    topic: Some(topic),
                    data,
                    ..
                } => {
                    let msg = InboundMessage {
                        topic: topic.to_owned(),
                        payload: data.to_vec(),
                    };
                    if tx.send(msg).is_err() {
                        warn!("mqtt: inbound queue closed, dropping message");
                    }
                }
                EventPayload::Connected(_) => info!("mqtt: connected to broker"),
                EventPayload::Disconnected => warn!("mqtt: disconnected from broker"),
                _ => {}
            },
        )?;

        info!("mqtt: client started for {}", url);
        Ok(Self {
            client,
            inbound: rx,
        })
    }
}

impl PubSubTransport for EspMqttTransport {
    type Error = MqttTransportError;

    fn subscribe(&mut self, topic: &str) -> Result<(), Self::Error> {
        self.client.subscribe(topic, QoS::AtLeastOnce)?;
        Ok(())
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), Self::Error> {
        self.client.publish(topic, QoS::AtLeastOnce, false, payload)?;
        Ok(())
    }

    fn wait_message(&mut self) -> Result<InboundMessage, Self::Error> {
        self.inbound
            .recv()
            .map_err(|_| MqttTransportError::Disconnected)
    }

    fn try_message(&mut self) -> Result<Option<InboundMessage>, Self::Error> {
        match self.inbound.try_recv() {
            Ok(msg) => Ok(Some(msg)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(MqttTransportError::Disconnected),
        }
    }
}
