//! Typed authentication and profile state.
//!
//! The portal keeps a signed-in user's identity and access token in a
//! persisted store slice; this module gives that slice a concrete shape.
//! Session data is read-only once established, and token persistence goes
//! through the [`TokenStore`] port shared with the HTTP layer.

pub mod session;
pub mod token;

pub use session::{ParseRoleError, Role, Session, UserId};
pub use token::{InMemoryTokenStore, TokenStore};
