use std::sync::{PoisonError, RwLock};
use vayuhu_shared::Session;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored session is unreadable: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Single read path and single write path for the signed-in identity and its bearer token.
pub trait SessionProvider: Send + Sync {
    /// The active session, if someone is signed in.
    fn current(&self) -> Option<Session>;

    /// Replace the active session (login).
    fn store(&self, session: Session) -> Result<(), SessionError>;

    /// Forget the active session (logout).
    fn clear(&self) -> Result<(), SessionError>;

    /// Bearer header value for the active session. `None` when the backend issued no token.
    fn bearer(&self) -> Option<String> {
        self.current()
            .filter(|session| !session.token.expose().is_empty())
            .map(|session| session.bearer())
    }
}

/// Non-durable session holder, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

impl SessionProvider for MemorySessionStore {
    fn current(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store(&self, session: Session) -> Result<(), SessionError> {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
