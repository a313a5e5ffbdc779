// flaremcp-api: Async Rust client for the Cloudflare v4 REST API

pub mod auth;
pub mod client;
pub mod dns;
pub mod error;
pub mod hyperdrive;
pub mod kv;
pub mod queues;
pub mod transport;
pub mod types;
pub mod zones;

pub use auth::Credentials;
pub use client::Client;
pub use error::Error;
pub use transport::TransportConfig;
