//! Domain types shared by the authorization and revocation endpoints.

pub mod client;

pub use client::{
    ClientRegistration, ClientValidationError, GrantType, ResponseType, TokenEndpointAuthMethod,
    is_absolute_http_url,
};
