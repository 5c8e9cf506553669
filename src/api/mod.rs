//! The CampusWatch operation catalog.
//!
//! One [`ApiClient`] exposes every endpoint as a typed async method, grouped
//! by resource family. All methods share the same contract: the request is
//! built against a fixed path template, sent through the authenticated
//! transport, and every failure comes back as an [`ApiError`](crate::ApiError)
//! whose display string is ready for the UI. Callers never see a raw
//! transport error or a panic.

mod auth;
mod categories;
mod comments;
mod incidents;
mod notifications;
mod roles;
mod subscriptions;
mod teams;
mod users;

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::session::Session;
use crate::storage::SessionStorage;
use crate::transport::Transport;

/// CampusWatch API client.
///
/// Cheap to clone; clones share the session and connection pool. The session
/// is restored from `storage` at construction, so a client built over the
/// same storage as a previous run starts out signed in.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<Transport>,
    session: Session,
}

impl ApiClient {
    /// Create a client with its own connection pool.
    #[must_use]
    pub fn new(config: ApiConfig, storage: impl SessionStorage + 'static) -> Self {
        let session = Session::restore(storage);
        Self {
            transport: Arc::new(Transport::new(
                reqwest::Client::new(),
                config,
                session.clone(),
            )),
            session,
        }
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    #[must_use]
    pub fn with_http_client(self, http: reqwest::Client) -> Self {
        let config = self.transport.config().clone();
        Self {
            transport: Arc::new(Transport::new(http, config, self.session.clone())),
            session: self.session,
        }
    }

    /// The session this client reads tokens from and signs in/out of.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn transport(&self) -> &Transport {
        &self.transport
    }
}
