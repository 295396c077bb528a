//! Authenticated HTTP access to the portal's REST backend.
//!
//! Every screen talks to the backend through one shared [`ApiClient`]. The
//! client attaches the bearer token from the [`crate::auth::TokenStore`] to
//! each request and performs exactly one silent token refresh when the
//! backend reports an expired JWT, retrying the original request once.
//! All other failures propagate to the caller unmodified.

pub mod adapters;
pub mod client;
pub mod error;
pub mod transport;

pub use client::ApiClient;
pub use error::HttpError;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method};
