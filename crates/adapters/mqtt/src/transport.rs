//! Supervised MQTT session — connects, (re)subscribes and forwards messages.
//!
//! The session runs in its own task and owns the rumqttc event loop. The
//! lighting core only sees [`TransportEvent`]s arriving on its channel, so a
//! slow or failing broker never blocks a scheduler tick.

use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, Packet, QoS};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use nightglow_app::ports::TransportEvent;
use nightglow_domain::error::{NightglowError, ValidationError};

use crate::config::MqttConfig;
use crate::error::MqttError;
use crate::payload::decode;

/// Handle to the running MQTT session task.
pub struct MqttTransport {
    client: AsyncClient,
    handle: JoinHandle<()>,
}

impl MqttTransport {
    /// Spawn the session task, forwarding everything to `events`.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the client id is empty.
    pub fn start(
        config: &MqttConfig,
        events: mpsc::Sender<TransportEvent>,
    ) -> Result<Self, NightglowError> {
        if config.client_id.is_empty() {
            return Err(MqttError::Domain(ValidationError::EmptyClientId).into());
        }

        let (client, eventloop) = AsyncClient::new(config.options(), config.request_capacity);
        let session = Session {
            client: client.clone(),
            subscriptions: config.subscriptions.clone(),
            topic_prefix: config.topic_prefix.clone(),
            reconnect_delay: config.reconnect_delay(),
            events,
        };

        tracing::info!(
            host = %config.broker_host,
            port = config.broker_port,
            tls = config.use_tls,
            "MQTT transport started"
        );
        let handle = tokio::spawn(session.run(eventloop));
        Ok(Self { client, handle })
    }

    /// Whether the session task has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Disconnect from the broker and stop the session task.
    ///
    /// The task is stopped in every case.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the disconnect request could not be
    /// queued, e.g. because the session had already ended.
    pub fn stop(self) -> Result<(), NightglowError> {
        let disconnect = self.client.try_disconnect().map_err(MqttError::Client);
        self.handle.abort();
        tracing::info!("MQTT transport stopped");
        disconnect.map_err(NightglowError::from)
    }
}

struct Session {
    client: AsyncClient,
    subscriptions: Vec<String>,
    topic_prefix: String,
    reconnect_delay: Duration,
    events: mpsc::Sender<TransportEvent>,
}

impl Session {
    /// Poll the event loop forever; rumqttc reconnects on the next poll
    /// after an error.
    async fn run(self, mut eventloop: EventLoop) {
        loop {
            match self.iterate(&mut eventloop).await {
                Ok(()) => {}
                Err(MqttError::ChannelClosed) => {
                    tracing::info!("lighting core gone, ending MQTT session");
                    break;
                }
                Err(MqttError::Connection(err)) => {
                    tracing::warn!(
                        %err,
                        retry_in_secs = self.reconnect_delay.as_secs(),
                        "MQTT connection failed, retrying"
                    );
                    let event = TransportEvent::Disconnected {
                        reason: err.to_string(),
                    };
                    if self.forward(event).await.is_err() {
                        break;
                    }
                    tokio::time::sleep(self.reconnect_delay).await;
                }
                Err(err) => tracing::warn!(%err, "MQTT session error"),
            }
        }
    }

    async fn iterate(&self, eventloop: &mut EventLoop) -> Result<(), MqttError> {
        let event = eventloop
            .poll()
            .await
            .map_err(|err| MqttError::Connection(Box::new(err)))?;

        match event {
            Event::Incoming(Packet::ConnAck(_)) => {
                let subscribed = self.subscribe_all();
                tracing::info!(
                    subscribed,
                    requested = self.subscriptions.len(),
                    "MQTT connected"
                );
                self.forward(TransportEvent::Connected).await
            }
            Event::Incoming(Packet::Publish(publish)) => {
                match decode(&publish.topic, &publish.payload, &self.topic_prefix) {
                    Ok(Some(message)) => self.forward(TransportEvent::Message(message)).await,
                    Ok(None) => {
                        tracing::trace!(topic = %publish.topic, "ignoring unrelated topic");
                        Ok(())
                    }
                    Err(err) => {
                        tracing::warn!(%err, topic = %publish.topic, "dropping undecodable message");
                        Ok(())
                    }
                }
            }
            _ => Ok(()),
        }
    }

    /// Request every configured subscription, returning how many were queued.
    ///
    /// A rejected filter is logged and does not prevent the others.
    fn subscribe_all(&self) -> usize {
        let mut subscribed = 0;
        for topic in &self.subscriptions {
            match self.client.try_subscribe(topic.as_str(), QoS::AtMostOnce) {
                Ok(()) => subscribed += 1,
                Err(err) => {
                    let err = MqttError::Client(err);
                    tracing::warn!(%err, %topic, "MQTT subscription rejected");
                }
            }
        }
        subscribed
    }

    async fn forward(&self, event: TransportEvent) -> Result<(), MqttError> {
        self.events
            .send(event)
            .await
            .map_err(|_| MqttError::ChannelClosed)
    }
}
