use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tracing::{info, warn};
use vayuhu_core::{SessionError, SessionProvider};
use vayuhu_shared::Session;

/// Durable session storage: a JSON file holding `{identity, token}`, cached in memory.
///
/// The file survives process restarts the way browser local storage survives reloads.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    cached: RwLock<Option<Session>>,
}

impl FileSessionStore {
    /// Open the store, reading any session left by a previous run.
    ///
    /// A corrupt file is discarded rather than failing startup.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let cached = match Self::read_file(&path) {
            Ok(session) => session,
            Err(SessionError::Corrupt(e)) => {
                warn!("Discarding unreadable session file {}: {}", path.display(), e);
                None
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            path,
            cached: RwLock::new(cached),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(path: &Path) -> Result<Option<Session>, SessionError> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl SessionProvider for FileSessionStore {
    fn current(&self) -> Option<Session> {
        self.cached
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store(&self, session: Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&session)?)?;

        info!(
            "Session stored for {} {}",
            if session.identity.is_admin() { "admin" } else { "user" },
            session.identity.id()
        );
        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
