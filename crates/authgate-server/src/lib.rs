pub mod config;
pub mod consent;
pub mod observability;
pub mod revocation;
pub mod server;

pub use config::{AppConfig, ConsentConfig, LoggingConfig, ServerConfig};
pub use consent::ConsentRedirectProvider;
pub use observability::{apply_logging_level, init_tracing};
pub use revocation::TracingTokenRevoker;
pub use server::{AuthgateServer, ServerBuilder, build_app};
