//! The authenticated user's session and where it is persisted.
//!
//! The only state that outlives a single interaction is the user ID the backend hands out at the end of the
//! authorization flow. It is stored through a [SessionStore]; [MemorySessionStore] keeps it for the lifetime of the
//! process and [FileSessionStore] keeps it on disk between runs.
//!
//! Request-building functions never read the store themselves. The controller loads a [Session] and passes it in
//! explicitly, which makes the "authenticate first" precondition a plain function argument.

use crate::error::{Error, Result};

use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// A user identifier issued by the backend. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: UserId,
}

/// Persistent storage for the user ID.
pub trait SessionStore {
    /// Returns the stored user ID, if there is one.
    fn load(&self) -> Result<Option<UserId>>;

    /// Stores the user ID, replacing any previous one.
    fn save(&mut self, user_id: &UserId) -> Result<()>;

    /// Removes the stored user ID.
    fn clear(&mut self) -> Result<()>;

    /// Returns the current session, or [Error::NotAuthenticated] if no user ID is stored.
    fn session(&self) -> Result<Session> {
        self.load()?.map(Session::new).ok_or(Error::NotAuthenticated)
    }
}

/// Keeps the user ID in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    user_id: Option<UserId>,
}

/// Keeps the user ID in a small JSON file, `{"user_id": "..."}`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    user_id: UserId,
}

impl UserId {
    pub fn new<S>(user_id: S) -> Result<Self>
    where
        S: Into<String>,
    {
        let user_id = user_id.into();

        if user_id.trim().is_empty() {
            Err(Error::InvalidUserId(user_id))
        } else {
            Ok(Self(user_id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(user_id: UserId) -> Self {
        user_id.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Session {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_id(user_id: UserId) -> Self {
        Self { user_id: Some(user_id) }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<UserId>> {
        Ok(self.user_id.clone())
    }

    fn save(&mut self, user_id: &UserId) -> Result<()> {
        self.user_id = Some(user_id.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.user_id = None;
        Ok(())
    }
}

impl FileSessionStore {
    pub fn new<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<UserId>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No stored session at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let stored: StoredSession = serde_json::from_str(&contents)?;
        Ok(Some(stored.user_id))
    }

    fn save(&mut self, user_id: &UserId) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string(&StoredSession {
            user_id: user_id.clone(),
        })?;

        debug!("Storing session to {}", self.path.display());
        fs::write(&self.path, contents)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_rejects_blank() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("   ").is_err());
        assert_eq!(UserId::new("U123").unwrap().as_str(), "U123");
    }

    #[test]
    fn empty_memory_store_is_not_authenticated() {
        let store = MemorySessionStore::new();
        assert!(matches!(store.session(), Err(Error::NotAuthenticated)));
    }

    #[test]
    fn memory_store_overwrites() {
        let mut store = MemorySessionStore::new();
        store.save(&UserId::new("first").unwrap()).unwrap();
        store.save(&UserId::new("second").unwrap()).unwrap();

        assert_eq!(store.session().unwrap().user_id().as_str(), "second");

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn stored_session_with_empty_user_id_is_rejected() {
        assert!(serde_json::from_str::<StoredSession>(r#"{"user_id": ""}"#).is_err());
    }
}
