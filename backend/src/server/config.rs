//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use microloan_backend::inbound::http::state::HttpState;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) state: HttpState,
    pub(crate) store_connected: bool,
}

impl ServerConfig {
    /// Construct a server configuration serving `state` on `bind_addr`.
    ///
    /// The store is assumed unreachable until
    /// [`with_store_connected`](Self::with_store_connected) says otherwise.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, state: HttpState) -> Self {
        Self {
            bind_addr,
            state,
            store_connected: false,
        }
    }

    /// Record whether the document store answered at startup.
    ///
    /// Readiness is only raised for a connected store.
    #[must_use]
    pub fn with_store_connected(mut self, connected: bool) -> Self {
        self.store_connected = connected;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
