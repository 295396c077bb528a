//! In-process loopback transport for behavioural tests.
//!
//! The hub plays the socket backend: events a peer emits are routed to
//! the other registered peers the way the server broadcasts to a room.
//! Tests can also inject arbitrary server events directly.

use crate::channel::{
    error::ChannelError,
    events::{ClientEvent, ServerEvent},
    transport::ChannelTransport,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::broadcast;

/// Fan-out capacity per registered peer.
const PEER_BUFFER: usize = 64;

struct Peer {
    id: usize,
    inbound: broadcast::Sender<ServerEvent>,
}

struct HubState {
    peers: Vec<Peer>,
    next_id: usize,
    echo_to_sender: bool,
}

/// Simulated socket backend shared by one or more loopback transports.
#[derive(Clone)]
pub struct InMemoryChannelHub {
    state: Arc<RwLock<HubState>>,
}

impl Default for InMemoryChannelHub {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryChannelHub {
    /// Creates an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(HubState {
                peers: Vec::new(),
                next_id: 0,
                echo_to_sender: false,
            })),
        }
    }

    /// Makes the hub echo `new message` broadcasts back to their sender,
    /// reproducing a backend that does not exclude the origin connection.
    pub fn set_echo_to_sender(&self, echo: bool) {
        if let Ok(mut guard) = self.state.write() {
            guard.echo_to_sender = echo;
        }
    }

    /// Registers a new peer connection and returns its transport.
    #[must_use]
    pub fn register(&self) -> InMemoryChannelTransport {
        let (inbound, _) = broadcast::channel(PEER_BUFFER);
        let id = if let Ok(mut guard) = self.state.write() {
            let id = guard.next_id;
            guard.next_id += 1;
            guard.peers.push(Peer {
                id,
                inbound: inbound.clone(),
            });
            id
        } else {
            0
        };

        InMemoryChannelTransport {
            hub: self.clone(),
            peer_id: id,
            inbound,
            connected: Arc::new(AtomicBool::new(false)),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Delivers a server event to every registered peer.
    pub fn inject(&self, event: &ServerEvent) {
        if let Ok(guard) = self.state.read() {
            for peer in &guard.peers {
                peer.inbound.send(event.clone()).ok();
            }
        }
    }

    fn route(&self, sender_id: usize, event: &ClientEvent) {
        let translated = match event {
            ClientEvent::Typing(task_id) => Some(ServerEvent::TypingStarted(task_id.clone())),
            ClientEvent::StopTyping(task_id) => Some(ServerEvent::TypingStopped(task_id.clone())),
            ClientEvent::NewMessage(envelope) => {
                Some(ServerEvent::MessageReceived(envelope.clone()))
            }
            ClientEvent::Setup { .. } | ClientEvent::JoinChat(_) => None,
        };
        let Some(server_event) = translated else {
            return;
        };

        if let Ok(guard) = self.state.read() {
            for peer in &guard.peers {
                if peer.id == sender_id && !guard.echo_to_sender {
                    continue;
                }
                peer.inbound.send(server_event.clone()).ok();
            }
        }
    }
}

/// Loopback [`ChannelTransport`] registered with an [`InMemoryChannelHub`].
#[derive(Clone)]
pub struct InMemoryChannelTransport {
    hub: InMemoryChannelHub,
    peer_id: usize,
    inbound: broadcast::Sender<ServerEvent>,
    connected: Arc<AtomicBool>,
    sent: Arc<Mutex<Vec<ClientEvent>>>,
}

impl InMemoryChannelTransport {
    /// Returns every event emitted through this transport, in order.
    #[must_use]
    pub fn sent_events(&self) -> Vec<ClientEvent> {
        self.sent
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChannelTransport for InMemoryChannelTransport {
    async fn connect(&self) -> Result<(), ChannelError> {
        self.connected.store(true, Ordering::SeqCst);
        self.inbound.send(ServerEvent::Connected).ok();
        Ok(())
    }

    async fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }

    async fn send(&self, event: ClientEvent) -> Result<(), ChannelError> {
        if !self.connected.load(Ordering::SeqCst) {
            return Err(ChannelError::NotConnected);
        }
        if let Ok(mut guard) = self.sent.lock() {
            guard.push(event.clone());
        }
        self.hub.route(self.peer_id, &event);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.inbound.subscribe()
    }
}
