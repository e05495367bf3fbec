//! AMQP broker checker: publish a message and wait for it to come back.
//!
//! # Probe
//! ```text
//! connect → channel
//!     → declare topic exchange (durable, shared by every probe)
//!     → declare server-named exclusive queue
//!     → bind queue with routing key updog.<uuid>
//!     → consume, publish <uuid>, await the echo
//! close channel + connection (detached, after the result is returned)
//! ```
//!
//! # Design Decisions
//! - A fresh correlation key per probe, so concurrent probes (from this or
//!   another instance) never consume each other's messages
//! - The queue is exclusive and auto-deleted; nothing outlives the probe
//! - The whole round trip, connect included, runs under the checker timeout
//! - Teardown happens in a detached task with its own short bound, so a slow
//!   close never adds to the reported latency

use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use lapin::{
    options::{
        BasicConsumeOptions, BasicPublishOptions, ExchangeDeclareOptions, QueueBindOptions,
        QueueDeclareOptions,
    },
    types::FieldTable,
    BasicProperties, Channel, Connection, ConnectionProperties, ExchangeKind,
};
use uuid::Uuid;

use crate::checks::{probe, CheckResult, Checker, ProbeError, Verdict};

pub const KIND: &str = "amqp";
pub const DEFAULT_EXCHANGE: &str = "UpdogExchange";

const CLOSE_TIMEOUT: Duration = Duration::from_millis(500);

pub struct AmqpChecker {
    name: String,
    dsn: String,
    exchange: String,
    timeout: Duration,
}

impl AmqpChecker {
    pub fn new(name: impl Into<String>, dsn: impl Into<String>, exchange: impl Into<String>, timeout: Duration) -> Self {
        Self {
            name: name.into(),
            dsn: dsn.into(),
            exchange: exchange.into(),
            timeout,
        }
    }

    async fn round_trip(&self) -> Result<Verdict, ProbeError> {
        let mut session = Session {
            name: self.name.clone(),
            conn: None,
            channel: None,
        };

        let conn = Connection::connect(&self.dsn, ConnectionProperties::default()).await?;
        let channel = session.conn.insert(conn).create_channel().await?;
        session.channel = Some(channel.clone());

        self.publish_and_await(&channel).await
    }

    async fn publish_and_await(&self, channel: &Channel) -> Result<Verdict, ProbeError> {
        let correlation = Uuid::new_v4().to_string();
        let routing_key = format!("updog.{correlation}");

        channel
            .exchange_declare(
                &self.exchange,
                ExchangeKind::Topic,
                ExchangeDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await?;

        let queue = channel
            .queue_declare(
                "",
                QueueDeclareOptions {
                    exclusive: true,
                    auto_delete: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await?;

        channel
            .queue_bind(
                queue.name().as_str(),
                &self.exchange,
                &routing_key,
                QueueBindOptions::default(),
                FieldTable::default(),
            )
            .await?;

        let mut consumer = channel
            .basic_consume(
                queue.name().as_str(),
                &format!("updog-{correlation}"),
                BasicConsumeOptions {
                    no_ack: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await?;

        channel
            .basic_publish(
                &self.exchange,
                &routing_key,
                BasicPublishOptions::default(),
                correlation.as_bytes(),
                BasicProperties::default(),
            )
            .await?;

        while let Some(delivery) = consumer.next().await {
            if delivery?.data == correlation.as_bytes() {
                return Ok(Verdict::Healthy(None));
            }
        }
        Err(ProbeError::NoEcho)
    }
}

/// Open broker resources for one probe. Dropping it, on completion or when
/// the probe deadline cancels the round trip, closes them in the background.
struct Session {
    name: String,
    conn: Option<Connection>,
    channel: Option<Channel>,
}

impl Drop for Session {
    fn drop(&mut self) {
        let Some(conn) = self.conn.take() else {
            return;
        };
        let channel = self.channel.take();
        let name = std::mem::take(&mut self.name);

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        runtime.spawn(async move {
            let close = async {
                if let Some(channel) = channel {
                    if let Err(e) = channel.close(200, "probe complete").await {
                        tracing::debug!(dependency = %name, error = %e, "Failed closing channel");
                    }
                }
                if let Err(e) = conn.close(200, "probe complete").await {
                    tracing::debug!(dependency = %name, error = %e, "Failed closing connection");
                }
            };
            if tokio::time::timeout(CLOSE_TIMEOUT, close).await.is_err() {
                tracing::debug!(dependency = %name, "Timed out closing broker connection");
            }
        });
    }
}

#[async_trait]
impl Checker for AmqpChecker {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        KIND
    }

    async fn check(&self) -> CheckResult {
        probe(&self.name, KIND, self.timeout, self.round_trip()).await
    }
}
