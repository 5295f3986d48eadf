//! GraphQL access to the remote community backend
//!
//! - `client` - HTTP transport and response envelope handling
//! - `documents` - the mutation documents the auth flows send
//! - `backend` - `AuthBackend` implementation over the client

pub mod backend;
pub mod client;
pub mod documents;

pub use backend::GraphqlAuthBackend;
pub use client::GraphqlClient;
