//! Client facade for the vehicle registry API

use crate::gateway::{Gateway, DEFAULT_TIMEOUT};
use crate::store::SessionStore;
use std::sync::Arc;
use std::time::Duration;
use vreg_core::{ActiveSession, AdminIdentity};

/// Typed entry point to the registry API.
///
/// Resource methods live in per-domain modules (auth, vehicles, owners,
/// dashboard, admin); they all share the gateway and its session store.
pub struct Client {
    gateway: Gateway,
}

impl Client {
    /// Client against `base_url` with the default request timeout
    pub fn new(base_url: impl Into<String>, store: Arc<dyn SessionStore>) -> Client {
        Client::with_timeout(base_url, store, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        store: Arc<dyn SessionStore>,
        timeout: Duration,
    ) -> Client {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Client {
            gateway: Gateway::new(http, base_url, store),
        }
    }

    pub fn base_url(&self) -> &str {
        self.gateway.base_url()
    }

    pub(crate) fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// The session store behind this client
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        self.gateway.store()
    }

    /// Session currently in effect for requests (admin outranks user)
    pub fn session(&self) -> crate::error::Result<ActiveSession> {
        Ok(self.store().resolve()?)
    }

    /// Stored admin display identity, if an admin is signed in
    pub fn admin_identity(&self) -> crate::error::Result<Option<AdminIdentity>> {
        Ok(self.store().admin_identity()?)
    }
}
