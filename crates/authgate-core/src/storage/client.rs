//! Client directory trait.
//!
//! Defines the read-only lookup the authorization and revocation endpoints use
//! to resolve OAuth client registrations. Registration and persistence live
//! elsewhere.

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::ClientRegistration;

// =============================================================================
// Client Directory Trait
// =============================================================================

/// Read-only lookup of registered OAuth 2.0 clients.
///
/// # Example
///
/// ```ignore
/// use authgate_core::storage::ClientDirectory;
///
/// async fn example(directory: &impl ClientDirectory) -> AuthResult<()> {
///     if let Some(client) = directory.get_client("my-app").await? {
///         println!("Found client with {} redirect URIs", client.redirect_uris.len());
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait ClientDirectory: Send + Sync {
    /// Find a client by its OAuth client_id.
    ///
    /// Returns `None` if no client with that id is registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be reached.
    async fn get_client(&self, client_id: &str) -> AuthResult<Option<ClientRegistration>>;
}
