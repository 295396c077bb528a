//! WebSocket transport backed by `tokio-tungstenite`.

use crate::channel::{
    error::ChannelError,
    events::{ClientEvent, ServerEvent},
    transport::ChannelTransport,
};
use async_trait::async_trait;
use futures_util::stream::{SplitSink, StreamExt};
use futures_util::SinkExt;
use tokio::net::TcpStream;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Capacity of the inbound fan-out buffer. Slow subscribers that lag past
/// this many events miss the oldest ones, the same way a busy browser tab
/// misses events fired before its listener attached.
const INBOUND_BUFFER: usize = 256;

/// Production transport speaking JSON text frames over a WebSocket.
///
/// `connect()` splits the stream: the write half serves `send()`, and a
/// spawned pump decodes inbound frames into [`ServerEvent`]s for the
/// broadcast fan-out. There is no reconnection logic; when the socket
/// drops, the pump ends and delivery stops until the embedder reconnects.
pub struct WebSocketTransport {
    endpoint: String,
    inbound: broadcast::Sender<ServerEvent>,
    writer: Mutex<Option<WsSink>>,
    pump: Mutex<Option<JoinHandle<()>>>,
}

impl WebSocketTransport {
    /// Creates a transport for the statically configured endpoint.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        let (inbound, _) = broadcast::channel(INBOUND_BUFFER);
        Self {
            endpoint: endpoint.into(),
            inbound,
            writer: Mutex::new(None),
            pump: Mutex::new(None),
        }
    }

    /// Creates a transport targeting the configured channel endpoint.
    #[must_use]
    pub fn from_config(config: &crate::config::PortalConfig) -> Self {
        Self::new(config.channel_endpoint())
    }

    /// Returns the endpoint this transport connects to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn decode_frame(text: &str) -> Option<ServerEvent> {
        match serde_json::from_str(text) {
            Ok(event) => Some(event),
            Err(error) => {
                warn!(%error, "dropping undecodable channel frame");
                None
            }
        }
    }
}

#[async_trait]
impl ChannelTransport for WebSocketTransport {
    async fn connect(&self) -> Result<(), ChannelError> {
        let (stream, _response) = connect_async(&self.endpoint)
            .await
            .map_err(ChannelError::transport)?;
        let (sink, mut source) = stream.split();

        let inbound = self.inbound.clone();
        let handle = tokio::spawn(async move {
            while let Some(frame) = source.next().await {
                match frame {
                    Ok(Message::Text(text)) => {
                        if let Some(event) = Self::decode_frame(&text) {
                            inbound.send(event).ok();
                        }
                    }
                    Ok(Message::Close(_)) => {
                        debug!("channel closed by server");
                        break;
                    }
                    Ok(_) => {}
                    Err(error) => {
                        warn!(%error, "channel read failed; delivery stops");
                        break;
                    }
                }
            }
        });

        *self.writer.lock().await = Some(sink);
        *self.pump.lock().await = Some(handle);
        Ok(())
    }

    async fn disconnect(&self) {
        if let Some(mut sink) = self.writer.lock().await.take() {
            sink.send(Message::Close(None)).await.ok();
        }
        if let Some(handle) = self.pump.lock().await.take() {
            handle.abort();
        }
    }

    async fn send(&self, event: ClientEvent) -> Result<(), ChannelError> {
        let text =
            serde_json::to_string(&event).map_err(|e| ChannelError::Encode(e.to_string()))?;
        let mut guard = self.writer.lock().await;
        let sink = guard.as_mut().ok_or(ChannelError::NotConnected)?;
        sink.send(Message::Text(text))
            .await
            .map_err(ChannelError::transport)
    }

    fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.inbound.subscribe()
    }
}
