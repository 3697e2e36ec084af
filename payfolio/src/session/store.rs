//! Session store capability and its in-memory and file-backed forms.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use tracing::debug;

use crate::error::SessionError;
use crate::models::Session;

const SESSION_DIR: &str = ".payfolio";
const SESSION_FILE: &str = "session.json";

/// Read/replace/clear access to the single active session.
///
/// Each operation is atomic with respect to the others on the same store.
/// The client only ever calls [`SessionStore::get`]; `set` and `clear` are
/// driven by login, refresh and logout.
pub trait SessionStore: Send + Sync {
    /// Current session. A store that was never written yields an empty one.
    fn get(&self) -> Result<Session, SessionError>;

    /// Replace the whole session.
    fn set(&self, session: &Session) -> Result<(), SessionError>;

    /// Drop tokens and user snapshot together.
    fn clear(&self) -> Result<(), SessionError>;
}

/// Process-local store, used for embedding and tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Session, SessionError> {
        self.session
            .read()
            .map(|session| session.clone())
            .map_err(|_| SessionError::Poisoned)
    }

    fn set(&self, session: &Session) -> Result<(), SessionError> {
        let mut guard = self.session.write().map_err(|_| SessionError::Poisoned)?;
        *guard = session.clone();
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.set(&Session::default())
    }
}

/// Durable store: one JSON document on disk.
///
/// Writes go to a sibling temp file that is renamed over the target, so a
/// reader never sees a half-written session. Clearing deletes the file.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    /// Store at the default location (`~/.payfolio/session.json`).
    pub fn open_default() -> Result<Self, SessionError> {
        Ok(Self::at(Self::default_path()?))
    }

    /// Get the default session file path.
    pub fn default_path() -> Result<PathBuf, SessionError> {
        let home = dirs::home_dir().ok_or(SessionError::NoHomeDir)?;
        Ok(home.join(SESSION_DIR).join(SESSION_FILE))
    }

    /// Store at a specific path. Nothing is touched until the first write.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Session, SessionError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Session::default()),
            Err(e) => return Err(self.io_error(e)),
        };

        if content.trim().is_empty() {
            return Ok(Session::default());
        }

        serde_json::from_str(&content).map_err(|e| SessionError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn write(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_vec_pretty(session).map_err(|e| SessionError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        // A leftover from an interrupted write may have looser permissions.
        remove_if_present(&tmp_path).map_err(|e| self.io_error(e))?;

        let written =
            write_private(&tmp_path, &json).and_then(|()| fs::rename(&tmp_path, &self.path));
        if let Err(error) = written {
            if let Err(cleanup) = remove_if_present(&tmp_path) {
                debug!(
                    path = %tmp_path.display(),
                    error = %cleanup,
                    "could not remove temporary session file"
                );
            }
            return Err(self.io_error(error));
        }

        debug!(path = %self.path.display(), "session written");
        Ok(())
    }

    fn io_error(&self, source: io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Session, SessionError> {
        let _guard = self.lock.lock().map_err(|_| SessionError::Poisoned)?;
        self.read()
    }

    fn set(&self, session: &Session) -> Result<(), SessionError> {
        let _guard = self.lock.lock().map_err(|_| SessionError::Poisoned)?;
        self.write(session)
    }

    fn clear(&self) -> Result<(), SessionError> {
        let _guard = self.lock.lock().map_err(|_| SessionError::Poisoned)?;
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "session cleared");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// Write `contents` to a new file readable only by the owner.
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

fn remove_if_present(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
