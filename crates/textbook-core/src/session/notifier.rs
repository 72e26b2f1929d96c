//! Login/logout broadcast.
//!
//! One [`SessionNotifier`] is created by the application context and handed to
//! whoever needs to announce or observe session changes. Listeners only see
//! events sent after they subscribed.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

use super::event::SessionEvent;
use crate::profile::Profile;

const CHANNEL_CAPACITY: usize = 32;

/// Broadcasts [`SessionEvent`]s to every currently registered listener.
#[derive(Debug, Clone)]
pub struct SessionNotifier {
    sender: broadcast::Sender<SessionEvent>,
}

impl SessionNotifier {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Registers a listener. Dropping the returned handle unregisters it.
    pub fn subscribe(&self) -> SessionListener {
        SessionListener {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn announce_login(&self, profile: Profile) {
        tracing::info!(profile_id = profile.id(), "Announcing login");
        self.announce(SessionEvent::Login(profile));
    }

    pub fn announce_logout(&self) {
        tracing::info!("Announcing logout");
        self.announce(SessionEvent::Logout);
    }

    /// Number of listeners that will receive the next event.
    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }

    fn announce(&self, event: SessionEvent) {
        let name = event.name();
        // Sending with no listeners is not an error: nobody is mounted yet.
        if let Ok(delivered) = self.sender.send(event) {
            tracing::debug!(event = name, listeners = delivered, "Session event delivered");
        } else {
            tracing::debug!(event = name, "Session event dropped, no listeners");
        }
    }
}

impl Default for SessionNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving end of a [`SessionNotifier`].
#[derive(Debug)]
pub struct SessionListener {
    receiver: broadcast::Receiver<SessionEvent>,
}

impl SessionListener {
    /// Waits for the next event. Returns `None` once every notifier handle is gone.
    pub async fn recv(&mut self) -> Option<SessionEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Session listener lagged behind, skipping events");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Returns the next pending event without waiting.
    pub fn try_recv(&mut self) -> Option<SessionEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Session listener lagged behind, skipping events");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }
}
