//! Catalog Web API access.
//!
//! - [`CatalogClient`]: paginated fetch and batch lookup engines
//! - [`CatalogTransport`]: the HTTP seam, with [`HttpTransport`] over `reqwest`
//! - [`wire`]: per-endpoint payload shapes
//! - [`retry`]: bounded retry on rate limiting

pub mod client;
pub mod retry;
pub mod transport;
pub mod wire;

#[cfg(test)]
pub(crate) mod testing;

pub use client::CatalogClient;
pub use retry::with_retry;
pub use transport::{CatalogTransport, HttpTransport, RawResponse};
