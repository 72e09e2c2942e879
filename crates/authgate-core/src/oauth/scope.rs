//! Requested scope validation.

use crate::error::AuthError;
use crate::types::ClientRegistration;

/// Validates a requested scope string against a client's registered scopes.
///
/// Returns `Ok(None)` when no scope was requested. Otherwise returns the
/// requested tokens in request order, duplicates included.
///
/// # Errors
///
/// Returns `InvalidRequest` naming the first token the client is not
/// registered for.
pub fn validate_scope(
    requested: Option<&str>,
    client: &ClientRegistration,
) -> Result<Option<Vec<String>>, AuthError> {
    let Some(requested) = requested else {
        return Ok(None);
    };

    let allowed = client.allowed_scopes();
    let tokens: Vec<String> = requested.split(' ').map(str::to_owned).collect();

    if let Some(denied) = tokens.iter().find(|t| !allowed.contains(&t.as_str())) {
        return Err(AuthError::invalid_request(format!(
            "Client was not registered with scope {denied}"
        )));
    }

    Ok(Some(tokens))
}
