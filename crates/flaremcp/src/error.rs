//! Startup errors for the server binary, with miette diagnostics.
//!
//! Tool-call failures never reach this type -- they are reported through
//! the MCP error channel per invocation. This covers only the path from
//! process start to a running stdio service.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ServerError {
    #[error("No Cloudflare credentials configured")]
    #[diagnostic(
        code(flaremcp::no_credentials),
        help(
            "Set CLOUDFLARE_API_TOKEN, or configure a profile.\n\
             Expected config at: {path}"
        )
    )]
    NoCredentials { path: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(flaremcp::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(flaremcp::config))]
    Config(#[from] flaremcp_config::ConfigError),

    #[error("Failed to build the Cloudflare API client")]
    #[diagnostic(code(flaremcp::client))]
    Client(#[from] flaremcp_api::Error),

    #[error("MCP transport error: {0}")]
    #[diagnostic(code(flaremcp::transport))]
    Serve(String),
}
