//! In-memory client directory.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::AuthResult;
use crate::storage::ClientDirectory;
use crate::types::ClientRegistration;

/// Client directory backed by an immutable map built once at startup.
///
/// Used to seed clients from configuration and in tests. There is no write
/// path, so concurrent readers never contend.
#[derive(Debug, Clone, Default)]
pub struct MemoryClientDirectory {
    clients: HashMap<String, ClientRegistration>,
}

impl MemoryClientDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory from a list of registrations.
    ///
    /// When two registrations share a client id the later one wins.
    #[must_use]
    pub fn from_clients(clients: impl IntoIterator<Item = ClientRegistration>) -> Self {
        let clients = clients
            .into_iter()
            .map(|client| (client.client_id.clone(), client))
            .collect();
        Self { clients }
    }

    /// Returns the number of registered clients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Returns `true` if no clients are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

#[async_trait]
impl ClientDirectory for MemoryClientDirectory {
    async fn get_client(&self, client_id: &str) -> AuthResult<Option<ClientRegistration>> {
        Ok(self.clients.get(client_id).cloned())
    }
}
