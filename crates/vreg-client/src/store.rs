//! Session token storage
//!
//! Tokens live in a single JSON document with one slot for the regular
//! account and one for the admin account, plus the admin display identity.
//! The file store keeps it under the vreg home directory the same way the
//! CLI keeps its settings; the memory store backs tests and embedding.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;
use vreg_core::{ActiveSession, AdminIdentity, SessionKind, TokenPair};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Could not find home directory")]
    NoHome,
}

/// Resolve the vreg home directory (~/.vreg, overridable with VREG_HOME)
pub fn vreg_home() -> Result<PathBuf, StoreError> {
    if let Ok(path) = std::env::var("VREG_HOME") {
        return Ok(PathBuf::from(path));
    }
    let home = dirs::home_dir().ok_or(StoreError::NoHome)?;
    Ok(home.join(".vreg"))
}

/// Durable session state.
///
/// Implementations persist whole token pairs; `resolve` applies the
/// precedence rule that an admin session outranks a user session.
pub trait SessionStore: Send + Sync {
    fn get(&self, kind: SessionKind) -> Result<Option<TokenPair>, StoreError>;
    fn set(&self, kind: SessionKind, pair: &TokenPair) -> Result<(), StoreError>;
    /// Replace only the access token, keeping the stored refresh token
    fn set_access(&self, kind: SessionKind, access: &str) -> Result<(), StoreError>;
    fn clear(&self, kind: SessionKind) -> Result<(), StoreError>;
    fn clear_all(&self) -> Result<(), StoreError>;
    fn set_admin_identity(&self, identity: &AdminIdentity) -> Result<(), StoreError>;
    fn admin_identity(&self) -> Result<Option<AdminIdentity>, StoreError>;

    /// The session requests should act as right now
    fn resolve(&self) -> Result<ActiveSession, StoreError> {
        if let Some(pair) = self.get(SessionKind::Admin)? {
            return Ok(ActiveSession::Admin {
                access: pair.access,
            });
        }
        if let Some(pair) = self.get(SessionKind::User)? {
            return Ok(ActiveSession::User {
                access: pair.access,
            });
        }
        Ok(ActiveSession::None)
    }
}

/// On-disk shape of session.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionDoc {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    admin_access_token: Option<String>,
    #[serde(default)]
    admin_refresh_token: Option<String>,
    #[serde(default)]
    admin_username: Option<String>,
    #[serde(default)]
    admin_role: Option<String>,
}

impl SessionDoc {
    fn get(&self, kind: SessionKind) -> Option<TokenPair> {
        let (access, refresh) = match kind {
            SessionKind::User => (&self.access_token, &self.refresh_token),
            SessionKind::Admin => (&self.admin_access_token, &self.admin_refresh_token),
        };
        match (access, refresh) {
            (Some(access), Some(refresh)) => Some(TokenPair {
                access: access.clone(),
                refresh: refresh.clone(),
            }),
            _ => None,
        }
    }

    fn set(&mut self, kind: SessionKind, pair: &TokenPair) {
        match kind {
            SessionKind::User => {
                self.access_token = Some(pair.access.clone());
                self.refresh_token = Some(pair.refresh.clone());
            }
            SessionKind::Admin => {
                self.admin_access_token = Some(pair.access.clone());
                self.admin_refresh_token = Some(pair.refresh.clone());
            }
        }
    }

    fn set_access(&mut self, kind: SessionKind, access: &str) {
        match kind {
            SessionKind::User => self.access_token = Some(access.to_string()),
            SessionKind::Admin => self.admin_access_token = Some(access.to_string()),
        }
    }

    fn clear(&mut self, kind: SessionKind) {
        match kind {
            SessionKind::User => {
                self.access_token = None;
                self.refresh_token = None;
            }
            SessionKind::Admin => {
                self.admin_access_token = None;
                self.admin_refresh_token = None;
                self.admin_username = None;
                self.admin_role = None;
            }
        }
    }

    fn admin_identity(&self) -> Option<AdminIdentity> {
        match (&self.admin_username, &self.admin_role) {
            (Some(username), Some(role)) => Some(AdminIdentity {
                username: username.clone(),
                role: role.clone(),
            }),
            _ => None,
        }
    }
}

/// Session store persisted as `session.json` under the vreg home
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store at the default location (~/.vreg/session.json)
    pub fn open_default() -> Result<FileStore, StoreError> {
        Ok(FileStore {
            path: vreg_home()?.join("session.json"),
        })
    }

    pub fn new(path: PathBuf) -> FileStore {
        FileStore { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn load(&self) -> Result<SessionDoc, StoreError> {
        if !self.path.exists() {
            return Ok(SessionDoc::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, doc: &SessionDoc) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(doc)?;
        std::fs::write(&self.path, content)?;

        // Tokens are credentials, restrict to owner only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&self.path, perms)?;
        }

        Ok(())
    }

    fn update(&self, mutate: impl FnOnce(&mut SessionDoc)) -> Result<(), StoreError> {
        let mut doc = self.load()?;
        mutate(&mut doc);
        self.save(&doc)
    }
}

impl SessionStore for FileStore {
    fn get(&self, kind: SessionKind) -> Result<Option<TokenPair>, StoreError> {
        Ok(self.load()?.get(kind))
    }

    fn set(&self, kind: SessionKind, pair: &TokenPair) -> Result<(), StoreError> {
        self.update(|doc| doc.set(kind, pair))
    }

    fn set_access(&self, kind: SessionKind, access: &str) -> Result<(), StoreError> {
        self.update(|doc| doc.set_access(kind, access))
    }

    fn clear(&self, kind: SessionKind) -> Result<(), StoreError> {
        self.update(|doc| doc.clear(kind))
    }

    fn clear_all(&self) -> Result<(), StoreError> {
        self.update(|doc| {
            doc.clear(SessionKind::User);
            doc.clear(SessionKind::Admin);
        })
    }

    fn set_admin_identity(&self, identity: &AdminIdentity) -> Result<(), StoreError> {
        self.update(|doc| {
            doc.admin_username = Some(identity.username.clone());
            doc.admin_role = Some(identity.role.clone());
        })
    }

    fn admin_identity(&self) -> Result<Option<AdminIdentity>, StoreError> {
        Ok(self.load()?.admin_identity())
    }
}

/// In-memory session store for tests and embedding
#[derive(Default)]
pub struct MemoryStore {
    doc: Mutex<SessionDoc>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    fn with_doc<T>(&self, f: impl FnOnce(&mut SessionDoc) -> T) -> T {
        let mut doc = self.doc.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut doc)
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, kind: SessionKind) -> Result<Option<TokenPair>, StoreError> {
        Ok(self.with_doc(|doc| doc.get(kind)))
    }

    fn set(&self, kind: SessionKind, pair: &TokenPair) -> Result<(), StoreError> {
        self.with_doc(|doc| doc.set(kind, pair));
        Ok(())
    }

    fn set_access(&self, kind: SessionKind, access: &str) -> Result<(), StoreError> {
        self.with_doc(|doc| doc.set_access(kind, access));
        Ok(())
    }

    fn clear(&self, kind: SessionKind) -> Result<(), StoreError> {
        self.with_doc(|doc| doc.clear(kind));
        Ok(())
    }

    fn clear_all(&self) -> Result<(), StoreError> {
        self.with_doc(|doc| {
            doc.clear(SessionKind::User);
            doc.clear(SessionKind::Admin);
        });
        Ok(())
    }

    fn set_admin_identity(&self, identity: &AdminIdentity) -> Result<(), StoreError> {
        self.with_doc(|doc| {
            doc.admin_username = Some(identity.username.clone());
            doc.admin_role = Some(identity.role.clone());
        });
        Ok(())
    }

    fn admin_identity(&self) -> Result<Option<AdminIdentity>, StoreError> {
        Ok(self.with_doc(|doc| doc.admin_identity()))
    }
}
