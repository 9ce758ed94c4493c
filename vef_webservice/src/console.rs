//! Server-to-browser console messages.
//!
//! A [`ConsoleSession`] tracks the single browser socket attached to the
//! application. Messages sent while no socket is attached are dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use log::{debug, info};
use serde::Serialize;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::Notify;

pub const CONSOLE_EVENT: &str = "console";
pub const TASK_COMPLETE_EVENT: &str = "task:complete";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsolePayload {
    /// Syntax highlighting hint for the client; empty for plain text.
    pub language: String,
    pub message: String,
}

/// One outbound frame: `{"event": .., "data": {"language": .., "message": ..}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsoleEvent {
    pub event: String,
    pub data: ConsolePayload,
}

impl ConsoleEvent {
    pub fn new(event: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            data: ConsolePayload {
                language: String::new(),
                message: message.into(),
            },
        }
    }

    /// A plain line for the console pane.
    pub fn console(message: impl Into<String>) -> Self {
        Self::new(CONSOLE_EVENT, message)
    }

    /// A console line carrying a JSON-encoded value.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Self> {
        Ok(Self::console(serde_json::to_string(value)?).with_language("json"))
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.data.language = language.into();
        self
    }

    pub fn to_frame(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug)]
struct Client {
    id: u64,
    sender: UnboundedSender<ConsoleEvent>,
}

/// The attached console socket, if any.
///
/// Attaching replaces the previous client, whose receiver then ends. Unless
/// the session is in debug mode, detaching the current client signals
/// [`closed`](Self::closed) so the server can shut down with the window.
#[derive(Debug, Default)]
pub struct ConsoleSession {
    client: Mutex<Option<Client>>,
    next_id: AtomicU64,
    debug: bool,
    shutdown: Notify,
}

impl ConsoleSession {
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            ..Self::default()
        }
    }

    /// Register a new socket and return its id and event stream.
    pub fn attach(&self) -> (u64, UnboundedReceiver<ConsoleEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let previous = self
            .client
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(Client { id, sender });
        if let Some(previous) = previous {
            info!("Console client {} replaced by {}", previous.id, id);
        } else {
            info!("Console client {} attached", id);
        }
        (id, receiver)
    }

    /// Forget socket `id`. A client that was already replaced is ignored.
    pub fn detach(&self, id: u64) {
        let mut client = self.client.lock().unwrap_or_else(PoisonError::into_inner);
        if client.as_ref().map(|current| current.id) != Some(id) {
            return;
        }
        *client = None;
        drop(client);
        info!("Console client {} detached", id);
        if !self.debug {
            self.shutdown.notify_one();
        }
    }

    pub fn is_attached(&self) -> bool {
        self.client
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Deliver `event` to the attached client. Returns whether a client took it.
    pub fn send(&self, event: ConsoleEvent) -> bool {
        let client = self.client.lock().unwrap_or_else(PoisonError::into_inner);
        match client.as_ref() {
            Some(client) => client.sender.send(event).is_ok(),
            None => {
                debug!("No console client attached, dropping '{}' event", event.event);
                false
            }
        }
    }

    pub fn console(&self, message: impl Into<String>) -> bool {
        self.send(ConsoleEvent::console(message))
    }

    /// Resolves once the current client detaches outside debug mode.
    pub async fn closed(&self) {
        self.shutdown.notified().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_frame_shape() {
        let frame = ConsoleEvent::new(TASK_COMPLETE_EVENT, "complete").to_frame().unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&frame).unwrap(),
            serde_json::json!({
                "event": "task:complete",
                "data": {"language": "", "message": "complete"}
            })
        );
    }

    #[test]
    fn test_json_payload() {
        let event = ConsoleEvent::json(&serde_json::json!({"a": 1})).unwrap();
        assert_eq!(event.event, CONSOLE_EVENT);
        assert_eq!(event.data.message, r#"{"a":1}"#);
        assert_eq!(event.data.language, "json");
    }

    #[test]
    fn test_send_without_client_is_dropped() {
        let session = ConsoleSession::new(false);
        assert!(!session.is_attached());
        assert!(!session.console("nobody listening"));
    }

    #[tokio::test]
    async fn test_attached_client_receives() {
        let session = ConsoleSession::new(false);
        let (_id, mut events) = session.attach();
        assert!(session.console("Hello Ann."));
        assert_eq!(events.recv().await, Some(ConsoleEvent::console("Hello Ann.")));
    }

    #[tokio::test]
    async fn test_attach_replaces_previous_client() {
        let session = ConsoleSession::new(false);
        let (first, mut old_events) = session.attach();
        let (_second, mut new_events) = session.attach();
        assert_eq!(old_events.recv().await, None);

        // the replaced socket detaching must not end the session
        session.detach(first);
        assert!(session.is_attached());
        session.console("still here");
        assert_eq!(new_events.recv().await.unwrap().data.message, "still here");
    }

    #[tokio::test]
    async fn test_detach_signals_shutdown() {
        let session = ConsoleSession::new(false);
        let (id, _events) = session.attach();
        session.detach(id);
        tokio::time::timeout(Duration::from_secs(1), session.closed())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_debug_session_keeps_running() {
        let session = ConsoleSession::new(true);
        let (id, _events) = session.attach();
        session.detach(id);
        let waited = tokio::time::timeout(Duration::from_millis(50), session.closed()).await;
        assert!(waited.is_err());
    }
}
